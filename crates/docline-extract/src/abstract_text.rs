//! Abstract detection via section markers

use crate::lines::split_lines;

/// Section markers, in priority order.
pub const ABSTRACT_MARKERS: [&str; 3] = ["abstract", "summary", "zusammenfassung"];

/// Text after the first marker found, up to the next blank line.
///
/// Markers are tried in [`ABSTRACT_MARKERS`] order; the first one present
/// anywhere in `text` wins. Each captured line is stripped of surrounding
/// colons and whitespace and the lines are joined with single spaces.
pub fn extract_abstract(text: &str) -> String {
    // ASCII lowering keeps byte offsets aligned with `text`
    let lowered = text.to_ascii_lowercase();
    let Some((marker, pos)) = ABSTRACT_MARKERS
        .iter()
        .find_map(|m| lowered.find(m).map(|pos| (m, pos)))
    else {
        return String::new();
    };

    let after = &text[pos + marker.len()..];
    let snippet = match after.find("\n\n") {
        Some(end) => &after[..end],
        None => after,
    };

    split_lines(snippet)
        .into_iter()
        .map(|line| line.trim_matches(|c: char| c == ':' || c == ' ').trim())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}
