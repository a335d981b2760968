//! Title selection from first-page lines
//!
//! First pages of papers and working papers open with noise: repository
//! URLs, journal running heads, "Volume 12" banners. The title is taken to
//! be the first line that is neither noise nor too short to be a sentence.

use std::sync::LazyLock;

use regex::Regex;

/// Default minimum word count for a title candidate.
pub const DEFAULT_MIN_TITLE_WORDS: usize = 4;

/// Lines that are never a title (nor an author list).
static NOISE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:www\.|https?://|forum[:\s]|volume\s+\d+)").expect("invalid noise pattern")
});

/// Whether `line` starts like a URL or running header.
pub fn is_noise_line(line: &str) -> bool {
    NOISE_LINE.is_match(line)
}

/// Pick the first non-noise line with at least `min_words` words.
///
/// Falls back to the first line verbatim (even if noise or short), or an
/// empty string when there are no lines.
pub fn select_title(lines: &[&str], min_words: usize) -> String {
    lines
        .iter()
        .filter(|line| !is_noise_line(line))
        .find(|line| line.split_whitespace().count() >= min_words)
        .or_else(|| lines.first())
        .map(|line| line.trim().to_string())
        .unwrap_or_default()
}

/// Position of the first line equal to `title`, or 0 if none matches.
pub fn title_index(lines: &[&str], title: &str) -> usize {
    lines.iter().position(|line| *line == title).unwrap_or(0)
}
