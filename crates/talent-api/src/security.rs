//! Input sanitization for free text that is stored or translated.

use std::sync::LazyLock;

use regex::Regex;

/// Maximum length of long free text (summaries, cover letters, notes).
pub const MAX_TEXT_LENGTH: usize = 5000;

/// Maximum length of short fields (names, titles).
pub const MAX_NAME_LENGTH: usize = 200;

/// Runs of horizontal whitespace.
static INLINE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]{2,}").expect("whitespace pattern is valid"));

/// Strip control characters (keeping newlines and tabs) and cap the length.
pub fn sanitize_text(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .take(MAX_TEXT_LENGTH)
        .collect()
}

/// Single-line field: no control characters, collapsed spaces, capped length.
pub fn sanitize_name(input: &str) -> String {
    let cleaned: String = input
        .trim()
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    INLINE_WHITESPACE
        .replace_all(&cleaned, " ")
        .chars()
        .take(MAX_NAME_LENGTH)
        .collect()
}

/// Emails are compared case-insensitively.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Sanitize an optional text field, dropping it when nothing is left.
pub fn sanitize_optional(input: Option<&str>) -> Option<String> {
    input.map(sanitize_text).filter(|s| !s.is_empty())
}
