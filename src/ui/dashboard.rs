use crate::model::Sender;
use crate::store::BlobStore;
use crate::ui::app::{App, FocusPanel};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
    Frame,
};

// Brand colors
const BRAND_DARK: Color = Color::Rgb(0x1F, 0x2F, 0x3C); // #1f2f3c
const BRAND_ACCENT: Color = Color::Rgb(0x58, 0x6B, 0x71); // #586b71
const BRAND_SELECT_BG: Color = Color::Rgb(0xC3, 0xD3, 0xE0); // #c3d3e0
const BRAND_GREEN: Color = Color::Rgb(0x82, 0x9A, 0x68); // #829a68
const BRAND_ORANGE: Color = Color::Rgb(0x9E, 0x68, 0x3C); // #9e683c
const BRAND_MUTED: Color = Color::Rgb(0x71, 0x65, 0x65); // #716565

// Styles
const HEADER_STYLE: Style = Style::new().fg(BRAND_DARK).add_modifier(Modifier::BOLD);
const SELECTED_STYLE: Style = Style::new()
    .bg(BRAND_SELECT_BG)
    .fg(BRAND_DARK)
    .add_modifier(Modifier::BOLD);
const COUNT_COLOR: Color = BRAND_GREEN;

const SPINNER: [&str; 4] = ["·  ", "·· ", "···", " ··"];

pub fn draw_dashboard<S: BlobStore>(frame: &mut Frame, app: &App<S>) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Header
        Constraint::Min(10),   // Main content
        Constraint::Length(3), // Footer
    ])
    .split(frame.area());

    draw_header(frame, chunks[0], app);
    draw_main_content(frame, chunks[1], app);
    draw_footer(frame, chunks[2], app);
}

fn draw_header<S: BlobStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let collection = app.session.collection();
    let active = app
        .session
        .active_building()
        .map_or_else(|| "no active building".to_string(), |b| {
            format!("{} ({} floors)", b.name, b.total_floors)
        });

    let title = format!(
        " SiteWise | {} buildings | {active} ",
        collection.buildings.len()
    );

    let header = Paragraph::new(title)
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

fn draw_main_content<S: BlobStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let chunks = Layout::horizontal([
        Constraint::Percentage(20), // Buildings
        Constraint::Percentage(30), // Layout
        Constraint::Percentage(50), // Chat
    ])
    .split(area);

    draw_buildings(frame, chunks[0], app);
    draw_layout(frame, chunks[1], app);

    let chat = Layout::vertical([Constraint::Min(5), Constraint::Length(3)]).split(chunks[2]);
    draw_transcript(frame, chat[0], app);
    draw_input(frame, chat[1], app);
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(BRAND_ORANGE)
    } else {
        Style::default()
    }
}

fn row_style(selected: bool, focused: bool) -> Style {
    if selected && focused {
        SELECTED_STYLE
    } else if selected {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn draw_buildings<S: BlobStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let is_focused = app.focus_panel == FocusPanel::Buildings;
    let collection = app.session.collection();
    let active = collection.active_building.as_deref();

    let items: Vec<ListItem> = collection
        .buildings
        .iter()
        .enumerate()
        .map(|(i, building)| {
            let is_selected = i == app.selected_building;
            let marker = if Some(building.id.as_str()) == active {
                " ●"
            } else {
                ""
            };

            ListItem::new(Line::from(vec![
                Span::styled(&building.name, row_style(is_selected, is_focused)),
                Span::raw(" "),
                Span::styled(format!("({})", building.total_floors), Style::default().fg(COUNT_COLOR)),
                Span::styled(marker, Style::default().fg(BRAND_ORANGE)),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(format!(" Buildings ({}) ", collection.buildings.len()))
            .borders(Borders::ALL)
            .border_style(border_style(is_focused)),
    );

    frame.render_widget(list, area);
}

fn draw_layout<S: BlobStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let is_focused = app.focus_panel == FocusPanel::Layout;
    let rows = app.rows();

    // Subtract 2 for borders
    let visible_rows = (area.height as usize).saturating_sub(2);
    let scroll_offset = if app.selected_row >= visible_rows {
        app.selected_row - visible_rows + 1
    } else {
        0
    };

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible_rows)
        .map(|(i, row)| {
            let style = if row.depth == 0 && i != app.selected_row {
                HEADER_STYLE
            } else {
                row_style(i == app.selected_row, is_focused)
            };

            let mut spans = vec![
                Span::raw("  ".repeat(row.depth)),
                Span::styled(row.label.clone(), style),
            ];
            if row.has_map {
                spans.push(Span::styled(" [map]", Style::default().fg(COUNT_COLOR)));
            }
            if row.has_fixture {
                spans.push(Span::styled(" [photo]", Style::default().fg(COUNT_COLOR)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let title = app
        .session
        .active_building()
        .map_or_else(|| " Layout ".to_string(), |b| format!(" Layout: {} ", b.name));

    let list = List::new(items).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style(is_focused)),
    );
    frame.render_widget(list, area);

    if rows.len() > visible_rows {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"));
        let mut scrollbar_state = ScrollbarState::new(rows.len()).position(app.selected_row);

        let scrollbar_area = Rect {
            x: area.x + area.width - 1,
            y: area.y + 1,
            width: 1,
            height: area.height.saturating_sub(2),
        };
        frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    }
}

/// Rows a line occupies once wrapped to `width` columns.
fn wrapped_height(line: &Line, width: usize) -> usize {
    let chars = line.width();
    if width == 0 {
        1
    } else {
        chars.div_ceil(width).max(1)
    }
}

fn draw_transcript<S: BlobStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let mut lines: Vec<Line> = Vec::new();

    for message in app.session.messages() {
        let (who, color) = match message.sender {
            Sender::User => ("You", BRAND_ORANGE),
            Sender::Assistant => ("Assistant", BRAND_ACCENT),
        };
        lines.push(Line::from(vec![
            Span::styled(who, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("  {}", message.timestamp.format("%H:%M")),
                Style::default().fg(BRAND_MUTED),
            ),
        ]));
        for text in message.content.lines() {
            lines.push(Line::raw(text.replace("**", "")));
        }
        lines.push(Line::default());
    }

    if let Some(ticks) = app.processing_ticks() {
        let frame_index = (ticks % SPINNER.len() as u128) as usize;
        lines.push(Line::from(Span::styled(
            format!("Assistant is thinking {}", SPINNER[frame_index]),
            Style::default().fg(BRAND_MUTED).add_modifier(Modifier::ITALIC),
        )));
    }

    let inner_width = area.width.saturating_sub(2) as usize;
    let inner_height = area.height.saturating_sub(2) as usize;
    let total: usize = lines.iter().map(|l| wrapped_height(l, inner_width)).sum();
    let bottom = total.saturating_sub(inner_height);
    let offset = bottom.saturating_sub(app.chat_scroll as usize);

    let transcript = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((offset.min(u16::MAX as usize) as u16, 0))
        .block(
            Block::default()
                .title(format!(" Chat ({}) ", app.session.messages().len()))
                .borders(Borders::ALL),
        );

    frame.render_widget(transcript, area);
}

fn draw_input<S: BlobStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let is_focused = app.focus_panel == FocusPanel::Input;

    let (text, style) = if app.session.is_processing() {
        ("Waiting for reply...".to_string(), Style::default().fg(BRAND_MUTED))
    } else if is_focused {
        (format!("{}▏", app.input), Style::default())
    } else {
        (app.input.clone(), Style::default().fg(BRAND_MUTED))
    };

    let input = Paragraph::new(text).style(style).block(
        Block::default()
            .title(" Message ")
            .borders(Borders::ALL)
            .border_style(border_style(is_focused)),
    );

    frame.render_widget(input, area);
}

fn draw_footer<S: BlobStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let help = match app.focus_panel {
        FocusPanel::Buildings => " ↑↓ Building | Enter Activate | Tab Panel | q Quit ",
        FocusPanel::Layout => {
            " ↑↓ Row | f Floor | r Restroom | c Corridor | l Lift | d Delete | n Name | m Map | x Photo | Tab Panel "
        }
        FocusPanel::Input => " Enter Send | :map :fixture :unmap :unfixture :name :clear | PgUp/PgDn Scroll | Esc Quit ",
    };

    let line = match &app.status {
        Some(status) => Line::from(vec![
            Span::styled(format!(" {status} "), Style::default().fg(BRAND_ORANGE)),
            Span::styled("|", Style::default().fg(BRAND_MUTED)),
            Span::styled(help, Style::default().fg(BRAND_MUTED)),
        ]),
        None => Line::from(Span::styled(help, Style::default().fg(BRAND_MUTED))),
    };

    let footer = Paragraph::new(line).block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}
