//! Small text helpers shared by the command matchers.

use regex::Captures;

/// Straight and curly quote characters stripped from bracketed names.
const QUOTES: &[char] = &['"', '\'', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}'];

/// Parse capture group `index` as a count. Numbers too large for `usize`
/// count as no match.
pub fn number(caps: &Captures<'_>, index: usize) -> Option<usize> {
    caps.get(index)?.as_str().parse().ok()
}

/// Trimmed text of capture group `index`, `None` when empty.
pub fn name(caps: &Captures<'_>, index: usize) -> Option<String> {
    let text = caps.get(index)?.as_str().trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Split the inside of a `[a, b, c]` list into names.
///
/// Splits strictly on commas and removes quotes and surrounding whitespace.
/// Empty entries stay in place so later names keep their positions.
#[must_use]
pub fn bracket_names(inner: &str) -> Vec<String> {
    inner
        .split(',')
        .map(|part| part.replace(QUOTES, "").trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bracket_names_strip_quotes_and_keep_empty_slots() {
        assert_eq!(
            bracket_names(" \"Ground\", , \u{201C}Second\u{201D} ,'Roof' "),
            vec!["Ground", "", "Second", "Roof"]
        );
    }

    #[test]
    fn bracket_names_do_not_split_on_other_separators() {
        assert_eq!(bracket_names("North; South"), vec!["North; South"]);
    }
}
