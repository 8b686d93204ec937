use crate::engine::editor;
use crate::model::{Building, ComponentKind};
use crate::session::Session;
use crate::store::BlobStore;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{DefaultTerminal, Frame};
use std::time::{Duration, Instant};

/// How often the screen is redrawn while waiting for input or a reply.
const TICK: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusPanel {
    Buildings,
    Layout,
    Input,
}

/// One selectable line of the layout tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutNode {
    Floor {
        floor_id: String,
    },
    Restroom {
        floor_id: String,
        restroom_id: String,
    },
    Corridor {
        floor_id: String,
        corridor_id: String,
    },
    Lift {
        floor_id: String,
        corridor_id: String,
        lift_id: String,
    },
}

impl LayoutNode {
    #[must_use]
    pub fn floor_id(&self) -> &str {
        match self {
            Self::Floor { floor_id }
            | Self::Restroom { floor_id, .. }
            | Self::Corridor { floor_id, .. }
            | Self::Lift { floor_id, .. } => floor_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutRow {
    pub node: LayoutNode,
    pub depth: usize,
    pub label: String,
    pub has_map: bool,
    pub has_fixture: bool,
}

/// Flatten a building into floor, restroom, corridor and lift rows.
#[must_use]
pub fn layout_rows(building: &Building) -> Vec<LayoutRow> {
    let mut rows = Vec::new();
    for floor in &building.floors {
        let label = match &floor.name {
            Some(name) => format!("{} · {name}", floor.number),
            None => format!("Floor {}", floor.number),
        };
        rows.push(LayoutRow {
            node: LayoutNode::Floor {
                floor_id: floor.id.clone(),
            },
            depth: 0,
            label,
            has_map: false,
            has_fixture: false,
        });

        for restroom in &floor.restrooms {
            rows.push(LayoutRow {
                node: LayoutNode::Restroom {
                    floor_id: floor.id.clone(),
                    restroom_id: restroom.id.clone(),
                },
                depth: 1,
                label: restroom.name.clone(),
                has_map: restroom.map_2d.is_some(),
                has_fixture: restroom.fixture_details.is_some(),
            });
        }

        for corridor in &floor.corridors {
            rows.push(LayoutRow {
                node: LayoutNode::Corridor {
                    floor_id: floor.id.clone(),
                    corridor_id: corridor.id.clone(),
                },
                depth: 1,
                label: corridor.name.clone(),
                has_map: corridor.map_2d.is_some(),
                has_fixture: false,
            });
            for (k, lift) in corridor.lifts.iter().enumerate() {
                rows.push(LayoutRow {
                    node: LayoutNode::Lift {
                        floor_id: floor.id.clone(),
                        corridor_id: corridor.id.clone(),
                        lift_id: lift.id.clone(),
                    },
                    depth: 2,
                    label: format!("Lift {}", k + 1),
                    has_map: false,
                    has_fixture: false,
                });
            }
        }
    }
    rows
}

/// Input lines starting with `:` act on the selected layout row instead of
/// going to the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalCommand {
    Map(String),
    Fixture(String),
    Unmap,
    Unfixture,
    Name(String),
    Clear,
}

impl LocalCommand {
    /// `None` when `input` is a chat message, `Some(Err)` for an unknown or
    /// incomplete `:` command.
    #[must_use]
    pub fn parse(input: &str) -> Option<std::result::Result<Self, String>> {
        let rest = input.trim().strip_prefix(':')?;
        let (verb, arg) = match rest.split_once(char::is_whitespace) {
            Some((verb, arg)) => (verb, arg.trim()),
            None => (rest, ""),
        };

        let needs_arg = |make: fn(String) -> Self| {
            if arg.is_empty() {
                Err(format!(":{verb} needs an argument"))
            } else {
                Ok(make(arg.to_string()))
            }
        };

        Some(match verb {
            "map" => needs_arg(Self::Map),
            "fixture" => needs_arg(Self::Fixture),
            "name" => Ok(Self::Name(arg.to_string())),
            "unmap" => Ok(Self::Unmap),
            "unfixture" => Ok(Self::Unfixture),
            "clear" => Ok(Self::Clear),
            _ => Err(format!("unknown command :{verb}")),
        })
    }
}

pub struct App<S: BlobStore> {
    pub session: Session<S>,
    pub focus_panel: FocusPanel,
    pub selected_building: usize,
    pub selected_row: usize,
    pub input: String,
    /// Lines scrolled up from the bottom of the transcript.
    pub chat_scroll: u16,
    pub status: Option<String>,
    pub processing_since: Option<Instant>,
    pub should_quit: bool,
}

impl<S: BlobStore> App<S> {
    #[must_use]
    pub fn new(session: Session<S>) -> Self {
        let mut app = Self {
            session,
            focus_panel: FocusPanel::Input, // Start typing right away
            selected_building: 0,
            selected_row: 0,
            input: String::new(),
            chat_scroll: 0,
            status: None,
            processing_since: None,
            should_quit: false,
        };
        app.sync_selection();
        app
    }

    pub fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        super::dashboard::draw_dashboard(frame, self);
    }

    fn handle_events(&mut self) -> Result<()> {
        if let Some(started) = self.processing_since {
            if started.elapsed() >= self.session.delay() {
                self.session.finish();
                self.processing_since = None;
                self.chat_scroll = 0;
                self.sync_selection();
                return Ok(());
            }
        }

        if !event::poll(TICK)? {
            return Ok(());
        }
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.next_panel(),
            KeyCode::BackTab => self.previous_panel(),
            KeyCode::PageUp => self.chat_scroll = self.chat_scroll.saturating_add(5),
            KeyCode::PageDown => self.chat_scroll = self.chat_scroll.saturating_sub(5),
            _ => match self.focus_panel {
                FocusPanel::Buildings => self.handle_building_keys(key.code),
                FocusPanel::Layout => self.handle_layout_keys(key.code),
                FocusPanel::Input => self.handle_input_keys(key.code),
            },
        }
    }

    fn next_panel(&mut self) {
        self.focus_panel = match self.focus_panel {
            FocusPanel::Buildings => FocusPanel::Layout,
            FocusPanel::Layout => FocusPanel::Input,
            FocusPanel::Input => FocusPanel::Buildings,
        };
    }

    fn previous_panel(&mut self) {
        self.focus_panel = match self.focus_panel {
            FocusPanel::Buildings => FocusPanel::Input,
            FocusPanel::Layout => FocusPanel::Buildings,
            FocusPanel::Input => FocusPanel::Layout,
        };
    }

    fn handle_building_keys(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_building = self.selected_building.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let last = self.session.collection().buildings.len().saturating_sub(1);
                if self.selected_building < last {
                    self.selected_building += 1;
                }
            }
            KeyCode::Enter => self.activate_selected_building(),
            _ => {}
        }
    }

    fn activate_selected_building(&mut self) {
        let Some(id) = self
            .session
            .collection()
            .buildings
            .get(self.selected_building)
            .map(|b| b.id.clone())
        else {
            return;
        };
        self.session.switch_to_building(&id);
        self.selected_row = 0;
        self.focus_panel = FocusPanel::Layout;
    }

    fn handle_layout_keys(&mut self, code: KeyCode) {
        if self.processing_since.is_some() {
            return;
        }
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.selected_row = self.selected_row.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected_row + 1 < self.rows().len() {
                    self.selected_row += 1;
                }
            }
            KeyCode::Char('f') => self.structural_edit(editor::add_floor),
            KeyCode::Char('r') => {
                if let Some(node) = self.selected_node() {
                    self.structural_edit(|b, stamps| editor::add_restroom(b, node.floor_id(), stamps));
                }
            }
            KeyCode::Char('c') => {
                if let Some(node) = self.selected_node() {
                    self.structural_edit(|b, stamps| editor::add_corridor(b, node.floor_id(), stamps));
                }
            }
            KeyCode::Char('l') => match self.selected_node() {
                Some(LayoutNode::Corridor { floor_id, corridor_id } | LayoutNode::Lift { floor_id, corridor_id, .. }) => {
                    self.structural_edit(|b, stamps| editor::add_lift(b, &floor_id, &corridor_id, stamps));
                }
                _ => self.status = Some("Select a corridor to add a lift".to_string()),
            },
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('n') => self.prefill(":name "),
            KeyCode::Char('m') => self.prefill(":map "),
            KeyCode::Char('x') => self.prefill(":fixture "),
            _ => {}
        }
    }

    fn prefill(&mut self, text: &str) {
        self.input = text.to_string();
        self.focus_panel = FocusPanel::Input;
    }

    fn handle_input_keys(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) => self.input.push(c),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Enter => self.submit_input(),
            _ => {}
        }
    }

    fn submit_input(&mut self) {
        if self.processing_since.is_some() {
            return;
        }
        let text = std::mem::take(&mut self.input);
        match LocalCommand::parse(&text) {
            Some(Ok(command)) => self.run_local(command),
            Some(Err(message)) => self.status = Some(message),
            None => {
                if self.session.begin(&text) {
                    self.status = None;
                    self.chat_scroll = 0;
                    self.processing_since = Some(Instant::now());
                }
            }
        }
    }

    fn run_local(&mut self, command: LocalCommand) {
        let node = self.selected_node();
        self.status = match (command, node) {
            (LocalCommand::Clear, _) => {
                self.session.clear_building();
                self.sync_selection();
                Some("All buildings cleared".to_string())
            }
            (_, None) => Some("Select a floor or component in the layout first".to_string()),
            (LocalCommand::Map(path), Some(node)) => match component_of(&node) {
                Some((kind, floor_id, component_id)) => {
                    self.session.upload_map(kind, floor_id, component_id, &path);
                    Some(self.upload_status("Map", &path))
                }
                None => Some("Maps attach to restrooms and corridors".to_string()),
            },
            (LocalCommand::Fixture(path), Some(LayoutNode::Restroom { floor_id, restroom_id })) => {
                self.session.upload_fixture(&floor_id, &restroom_id, &path);
                Some(self.upload_status("Fixture photo", &path))
            }
            (LocalCommand::Unmap, Some(node)) => match component_of(&node) {
                Some((kind, floor_id, component_id)) => {
                    self.session.delete_map(kind, floor_id, component_id);
                    Some("Map removed".to_string())
                }
                None => Some("Maps attach to restrooms and corridors".to_string()),
            },
            (LocalCommand::Unfixture, Some(LayoutNode::Restroom { floor_id, restroom_id })) => {
                self.session.delete_fixture(&floor_id, &restroom_id);
                Some("Fixture photo removed".to_string())
            }
            (LocalCommand::Fixture(_) | LocalCommand::Unfixture, Some(_)) => {
                Some("Fixture photos attach to restrooms only".to_string())
            }
            (LocalCommand::Name(name), Some(node)) => self.rename(&node, &name),
        };
    }

    fn upload_status(&self, what: &str, path: &str) -> String {
        let attached = self
            .rows()
            .get(self.selected_row)
            .is_some_and(|row| if what == "Map" { row.has_map } else { row.has_fixture });
        if attached {
            format!("{what} attached from {path}")
        } else {
            format!("Could not read {path}")
        }
    }

    fn rename(&mut self, node: &LayoutNode, name: &str) -> Option<String> {
        match node {
            LayoutNode::Floor { floor_id } => {
                self.structural_edit(|b, _| editor::rename_floor(b, floor_id, name));
            }
            LayoutNode::Restroom { floor_id, restroom_id } => {
                self.structural_edit(|b, _| {
                    editor::rename_component(b, ComponentKind::Restroom, floor_id, restroom_id, name)
                });
            }
            LayoutNode::Corridor { floor_id, corridor_id } => {
                self.structural_edit(|b, _| {
                    editor::rename_component(b, ComponentKind::Corridor, floor_id, corridor_id, name)
                });
            }
            LayoutNode::Lift { .. } => return Some("Lifts have no name".to_string()),
        }
        None
    }

    fn delete_selected(&mut self) {
        let Some(node) = self.selected_node() else {
            return;
        };
        match node {
            LayoutNode::Floor { floor_id } => {
                self.structural_edit(|b, _| editor::remove_floor(b, &floor_id));
            }
            LayoutNode::Restroom { floor_id, restroom_id } => {
                self.structural_edit(|b, _| {
                    editor::remove_component(b, ComponentKind::Restroom, &floor_id, &restroom_id)
                });
            }
            LayoutNode::Corridor { floor_id, corridor_id } => {
                self.structural_edit(|b, _| {
                    editor::remove_component(b, ComponentKind::Corridor, &floor_id, &corridor_id)
                });
            }
            LayoutNode::Lift {
                floor_id,
                corridor_id,
                lift_id,
            } => {
                self.structural_edit(|b, _| editor::remove_lift(b, &floor_id, &corridor_id, &lift_id));
            }
        }
    }

    fn structural_edit(&mut self, edit: impl FnOnce(&Building, &mut crate::engine::IdStamps) -> Building) {
        if self.session.edit_structure(edit) {
            self.chat_scroll = 0;
        }
        let rows = self.rows().len();
        self.selected_row = self.selected_row.min(rows.saturating_sub(1));
    }

    /// Keep the building cursor on the active building after chat commands.
    fn sync_selection(&mut self) {
        let collection = self.session.collection();
        if let Some(active) = collection.active_building.as_deref() {
            if let Some(i) = collection.buildings.iter().position(|b| b.id == active) {
                if i != self.selected_building {
                    self.selected_row = 0;
                }
                self.selected_building = i;
            }
        } else {
            self.selected_building = 0;
        }
        let rows = self.rows().len();
        self.selected_row = self.selected_row.min(rows.saturating_sub(1));
    }

    /// Layout rows of the active building.
    #[must_use]
    pub fn rows(&self) -> Vec<LayoutRow> {
        self.session.active_building().map(layout_rows).unwrap_or_default()
    }

    #[must_use]
    pub fn selected_node(&self) -> Option<LayoutNode> {
        self.rows().into_iter().nth(self.selected_row).map(|row| row.node)
    }

    /// Ticks spent waiting on the current reply, for the spinner.
    #[must_use]
    pub fn processing_ticks(&self) -> Option<u128> {
        self.processing_since
            .map(|since| since.elapsed().as_millis() / TICK.as_millis())
    }
}

fn component_of(node: &LayoutNode) -> Option<(ComponentKind, &str, &str)> {
    match node {
        LayoutNode::Restroom { floor_id, restroom_id } => Some((ComponentKind::Restroom, floor_id, restroom_id)),
        LayoutNode::Corridor { floor_id, corridor_id } => Some((ComponentKind::Corridor, floor_id, corridor_id)),
        LayoutNode::Floor { .. } | LayoutNode::Lift { .. } => None,
    }
}
