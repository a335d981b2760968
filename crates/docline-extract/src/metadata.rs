//! Bibliographic metadata inference from first-page text

use crate::abstract_text::extract_abstract;
use crate::authors::parse_authors;
use crate::lines::content_lines;
use crate::title::{select_title, title_index};
use crate::year::extract_year;

/// Raw inferred metadata, before sanitizing and truncation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InferredMetadata {
    pub title: String,
    pub authors: Vec<String>,
    pub year: Option<u16>,
    pub abstract_text: String,
}

/// Run every heuristic over `first_page`. Never fails; fields that cannot
/// be inferred are left empty.
pub fn infer_metadata(first_page: &str, min_title_words: usize) -> InferredMetadata {
    let lines = content_lines(first_page);
    let title = select_title(&lines, min_title_words);
    let idx = title_index(&lines, &title);
    let authors = parse_authors(&lines, idx);

    InferredMetadata {
        title,
        authors,
        year: extract_year(first_page),
        abstract_text: extract_abstract(first_page),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIRST_PAGE: &str = "\
www.ssoar.info

Migration and Labour Markets in Europe
Jane Doe, John Smith and Ada Lovelace
Working Paper 2019/04

Abstract: We study how migration shapes
regional labour markets.

1 Introduction
";

    #[test]
    fn realistic_first_page() {
        let meta = infer_metadata(FIRST_PAGE, 4);
        assert_eq!(meta.title, "Migration and Labour Markets in Europe");
        assert_eq!(meta.authors, vec!["Jane Doe", "John Smith", "Ada Lovelace"]);
        assert_eq!(meta.year, Some(2019));
        assert_eq!(
            meta.abstract_text,
            "We study how migration shapes regional labour markets."
        );
    }

    #[test]
    fn short_lines_fall_back_to_first_line() {
        let meta = infer_metadata("  Report  \nPart one\nJane Doe\n", 4);
        assert_eq!(meta.title, "Report");
        assert_eq!(meta.authors, vec!["Part one"]);
    }

    #[test]
    fn empty_page() {
        assert_eq!(infer_metadata("", 4), InferredMetadata::default());
        assert_eq!(infer_metadata("\n\n  \n", 4), InferredMetadata::default());
    }
}
