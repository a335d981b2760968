//! Control-character scrubbing and character-count truncation
//!
//! Everything stored in a record passes through here first: control
//! characters break JSON consumers and full-text analyzers, and the index
//! rejects fields over its size limits outright.

/// True for the ASCII control range U+0000–U+001F and U+007F.
fn is_control(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{1f}' | '\u{7f}')
}

/// Remove every ASCII control character; everything else passes through.
pub fn sanitize(text: &str) -> String {
    text.chars().filter(|&c| !is_control(c)).collect()
}

/// Keep at most `max_chars` characters (not bytes).
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

/// Sanitize, then truncate. Every bounded field uses this order.
pub fn sanitize_truncated(text: &str, max_chars: usize) -> String {
    truncate_chars(&sanitize(text), max_chars)
}
