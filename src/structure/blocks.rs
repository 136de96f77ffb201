//! Text-block structuring for pages without usable spans.
//!
//! Without font sizes the only heading signal is the shape of a line: short
//! and either all caps or capitalized with few words. Such lines always
//! become level 2 headings.

use crate::model::TextBlock;

use super::markers::strip_list_lead;
use super::state::{Accumulator, Fragment};

/// Lines at least this many characters long are never headings.
const HEADING_MAX_CHARS: usize = 80;

/// Capitalized lines with more words than this are not headings.
const HEADING_MAX_WORDS: usize = 6;

/// Level assigned to every heading found in plain text.
const TEXT_HEADING_LEVEL: u8 = 2;

pub(crate) fn structure_blocks(blocks: &[TextBlock]) -> Accumulator {
    let mut acc = Accumulator::new(false);

    for block in blocks {
        for line in block.text.split(is_line_break).map(str::trim) {
            if line.is_empty() {
                continue;
            }
            acc.source_line();

            if let Some(item) = strip_list_lead(line) {
                acc.list_item(item);
            } else if looks_like_heading(line) {
                acc.heading(TEXT_HEADING_LEVEL, line);
            } else {
                acc.fragment(Fragment::plain(line));
            }
        }
        // Nothing carries over into the next page
        acc.flush();
    }

    acc
}

/// Line boundaries: `\n`, `\r`, vertical tab, form feed, the file/group/record
/// separators, NEL, and the Unicode line and paragraph separators.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\u{0b}'
            | '\u{0c}'
            | '\u{1c}'
            | '\u{1d}'
            | '\u{1e}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

pub(crate) fn looks_like_heading(line: &str) -> bool {
    if line.chars().count() >= HEADING_MAX_CHARS {
        return false;
    }
    if is_all_caps(line) {
        return true;
    }
    line.chars().next().is_some_and(char::is_uppercase)
        && line.split_whitespace().count() <= HEADING_MAX_WORDS
}

/// At least one cased character and no lowercase ones.
fn is_all_caps(line: &str) -> bool {
    let mut cased = false;
    for c in line.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}
