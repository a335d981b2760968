//! Author-list parsing from the line following the title

use std::sync::LazyLock;

use regex::Regex;

use crate::title::is_noise_line;

/// Separators between names: commas or the word "and".
static AUTHOR_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",| and ").expect("invalid separator pattern"));

/// Five or more consecutive digits: phone numbers, postcodes, IDs.
static LONG_DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{5,}").expect("invalid digit pattern"));

fn is_plausible_name(piece: &str) -> bool {
    !piece.trim().is_empty()
        && !LONG_DIGIT_RUN.is_match(piece)
        && !piece.to_lowercase().contains("http")
}

/// Candidate author names from the line after `title_idx`.
///
/// Returns empty when the title is the last line or the candidate line is
/// noise. Names keep their original order and are not capped here.
pub fn parse_authors(lines: &[&str], title_idx: usize) -> Vec<String> {
    let Some(candidate) = lines.get(title_idx + 1) else {
        return Vec::new();
    };
    if is_noise_line(candidate) {
        return Vec::new();
    }
    AUTHOR_SEPARATOR
        .split(candidate)
        .filter(|piece| is_plausible_name(piece))
        .map(|piece| piece.trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_digit_runs_and_urls() {
        let lines = ["A Title Of Sufficient Length", "Jane Doe, PO Box 12345, http://example.com"];
        assert_eq!(parse_authors(&lines, 0), vec!["Jane Doe"]);
    }

    #[test]
    fn splits_on_and() {
        let lines = ["Title", "Jane Doe, John Smith and Ada Lovelace"];
        assert_eq!(parse_authors(&lines, 0), vec!["Jane Doe", "John Smith", "Ada Lovelace"]);
    }

    #[test]
    fn and_inside_a_word_is_not_a_separator() {
        let lines = ["Title", "Alexander Anderson, Sandra Band"];
        assert_eq!(parse_authors(&lines, 0), vec!["Alexander Anderson", "Sandra Band"]);
    }

    #[test]
    fn empty_pieces_dropped() {
        let lines = ["Title", "Jane Doe, , John Smith,"];
        assert_eq!(parse_authors(&lines, 0), vec!["Jane Doe", "John Smith"]);
    }

    #[test]
    fn short_digit_runs_kept() {
        let lines = ["Title", "Jane Doe 1234"];
        assert_eq!(parse_authors(&lines, 0), vec!["Jane Doe 1234"]);
    }

    #[test]
    fn title_is_last_line() {
        let lines = ["header", "The Title Line Itself"];
        assert!(parse_authors(&lines, 1).is_empty());
        assert!(parse_authors(&[], 0).is_empty());
    }

    #[test]
    fn noise_candidate_yields_nothing() {
        let lines = ["The Title Line Itself", "www.example.org, Jane Doe"];
        assert!(parse_authors(&lines, 0).is_empty());
    }

    #[test]
    fn url_check_is_case_insensitive() {
        let lines = ["Title", "Jane Doe, HTTPS://EXAMPLE.ORG/x"];
        assert_eq!(parse_authors(&lines, 0), vec!["Jane Doe"]);
    }

    #[test]
    fn uncapped_list() {
        let names: Vec<String> = (0..15).map(|i| format!("Author {i}")).collect();
        let line = names.join(", ");
        let lines = ["Title", line.as_str()];
        assert_eq!(parse_authors(&lines, 0).len(), 15);
    }
}
