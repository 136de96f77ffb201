//! Bullet and numbering convention detection.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::{ListStyleInfo, Span};

/// Leading glyphs counted as bullets.
pub const BULLET_GLYPHS: &[char] = &['•', '-', '–', '—', '*', '·'];

/// Only the first non-empty texts are scanned.
const SAMPLE_LIMIT: usize = 200;

/// Number of bullet glyphs reported.
const TOP_BULLETS: usize = 3;

fn dash_lead() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[-*\u{2022}]\s+").expect("valid regex"))
}

fn numbered_lead() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:\d+\.|[a-zA-Z]\))\s+").expect("valid regex"))
}

/// Scan span texts for bullet glyphs and numbered-list leads.
///
/// A glyph followed by whitespace counts twice (once as a glyph, once as a
/// dash/asterisk/bullet lead), which weights real list markers above stray
/// leading dashes when ranking.
pub fn detect_list_style(spans: &[Span]) -> ListStyleInfo {
    let mut counts: Vec<(char, usize)> = Vec::new();
    let mut numbered = false;
    let mut sample_count = 0;

    let mut bump = |glyph: char| match counts.iter_mut().find(|(g, _)| *g == glyph) {
        Some((_, n)) => *n += 1,
        None => counts.push((glyph, 1)),
    };

    for text in spans
        .iter()
        .map(|s| s.trimmed_text())
        .filter(|t| !t.is_empty())
        .take(SAMPLE_LIMIT)
    {
        sample_count += 1;

        let Some(first) = text.chars().next() else {
            continue;
        };
        if BULLET_GLYPHS.contains(&first) {
            bump(first);
        }
        if dash_lead().is_match(text) {
            bump(first);
        }
        if numbered_lead().is_match(text) {
            numbered = true;
        }
    }

    // Stable sort keeps first-seen order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    ListStyleInfo {
        bullets: counts.into_iter().take(TOP_BULLETS).map(|(g, _)| g).collect(),
        numbered,
        sample_count,
    }
}
