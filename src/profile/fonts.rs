//! Font frequency and weight/slant heuristics.

use std::collections::HashMap;

use crate::model::FontUsage;

/// Font-name substrings that mark a bold face (case-sensitive).
pub const BOLD_KEYWORDS: &[&str] = &["Bold", "Bd", "Black", "Semibold", "Heavy"];

/// Font-name substrings that mark an italic face (case-sensitive).
pub const ITALIC_KEYWORDS: &[&str] = &["Italic", "Oblique", "Slanted"];

/// Check if a font name reads as bold.
pub fn is_bold_font(font_name: &str) -> bool {
    BOLD_KEYWORDS.iter().any(|k| font_name.contains(k))
}

/// Check if a font name reads as italic.
pub fn is_italic_font(font_name: &str) -> bool {
    ITALIC_KEYWORDS.iter().any(|k| font_name.contains(k))
}

#[derive(Debug, Default)]
struct FontEntry {
    name: String,
    occurrences: usize,
    sized: usize,
    bold: usize,
    italic: usize,
}

/// Per-font occurrence counts in first-seen order.
#[derive(Debug, Default)]
pub(crate) struct FontTally {
    entries: Vec<FontEntry>,
    index: HashMap<String, usize>,
}

impl FontTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one span using `font`. Weight and slant are only tallied for
    /// spans that carry a usable size.
    pub fn record(&mut self, font: &str, sized: bool) {
        let idx = match self.index.get(font) {
            Some(&idx) => idx,
            None => {
                self.entries.push(FontEntry {
                    name: font.to_string(),
                    ..Default::default()
                });
                self.index.insert(font.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };

        let entry = &mut self.entries[idx];
        entry.occurrences += 1;
        if sized {
            entry.sized += 1;
            if is_bold_font(font) {
                entry.bold += 1;
            }
            if is_italic_font(font) {
                entry.italic += 1;
            }
        }
    }

    /// The `limit` most frequent fonts; ties keep first-seen order.
    pub fn top(&self, limit: usize) -> Vec<FontUsage> {
        let mut ranked: Vec<&FontEntry> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.occurrences.cmp(&a.occurrences));

        ranked
            .into_iter()
            .take(limit)
            .map(|e| FontUsage {
                font: e.name.clone(),
                count: e.occurrences,
                bold_pct: percentage(e.bold, e.sized),
                italic_pct: percentage(e.italic, e.sized),
            })
            .collect()
    }
}

/// Share of `part` in `whole` as a percentage with one decimal.
fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let pct = part as f64 / whole as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}
