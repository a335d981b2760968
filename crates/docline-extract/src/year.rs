//! Publication year detection

use std::sync::LazyLock;

use regex::Regex;

/// A 19xx or 20xx token; ASCII digits only, no word boundary required.
static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:19|20)[0-9]{2}").expect("invalid year pattern"));

/// First 19xx/20xx token anywhere in `text`.
pub fn extract_year(text: &str) -> Option<u16> {
    YEAR.find(text).and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_year_in_sentence() {
        assert_eq!(extract_year("...published in 1998 by..."), Some(1998));
    }

    #[test]
    fn first_match_wins() {
        assert_eq!(extract_year("Received 2003, revised 2004"), Some(2003));
    }

    #[test]
    fn absent_when_no_token() {
        assert_eq!(extract_year("no year here, only 1850 and 2150"), None);
        assert_eq!(extract_year(""), None);
    }

    #[test]
    fn matches_inside_longer_numbers() {
        // No boundary check: the first 19xx/20xx window is taken
        assert_eq!(extract_year("ISSN 1200156"), Some(2001));
    }

    #[test]
    fn non_ascii_digits_ignored() {
        assert_eq!(extract_year("١٩٩٨"), None);
    }
}
