//! List-item lead detection.

use std::sync::OnceLock;

use regex::Regex;

fn list_lead() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:[\u{2022}*-]|\d+\.)\s+").expect("valid regex"))
}

/// Check if a line (after trimming) opens with a bullet, dash, asterisk or
/// `<digits>.` lead followed by whitespace.
pub fn is_list_line(text: &str) -> bool {
    list_lead().is_match(text.trim())
}

/// The list item with its lead removed, or `None` for non-list lines.
pub fn strip_list_lead(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    list_lead()
        .find(trimmed)
        .map(|m| trimmed[m.end()..].trim_end())
}
