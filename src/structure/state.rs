//! Node accumulation state machine shared by both structurers.
//!
//! At most one buffer is open at a time. Switching kinds flushes the open
//! buffer first, so node order always mirrors input order.

use std::mem;

use crate::model::{ContentNode, InlineRun};

use super::StructureStats;

/// One paragraph line and its emphasis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Fragment {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
}

impl Fragment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
        }
    }
}

#[derive(Debug, Default)]
enum Buffer {
    #[default]
    Idle,
    Paragraph(Vec<Fragment>),
    List(Vec<String>),
}

#[derive(Debug)]
pub(crate) struct Accumulator {
    buffer: Buffer,
    nodes: Vec<ContentNode>,
    stats: StructureStats,
    emphasis_runs: bool,
}

impl Accumulator {
    pub fn new(emphasis_runs: bool) -> Self {
        Self {
            buffer: Buffer::Idle,
            nodes: Vec::new(),
            stats: StructureStats::default(),
            emphasis_runs,
        }
    }

    /// Count one non-blank input line.
    pub fn source_line(&mut self) {
        self.stats.source_lines += 1;
    }

    pub fn list_item(&mut self, item: impl Into<String>) {
        if !matches!(self.buffer, Buffer::List(_)) {
            self.flush();
            self.buffer = Buffer::List(Vec::new());
        }
        if let Buffer::List(items) = &mut self.buffer {
            items.push(item.into());
            self.stats.list_items += 1;
        }
    }

    pub fn fragment(&mut self, fragment: Fragment) {
        if !matches!(self.buffer, Buffer::Paragraph(_)) {
            self.flush();
            self.buffer = Buffer::Paragraph(Vec::new());
        }
        if let Buffer::Paragraph(fragments) = &mut self.buffer {
            fragments.push(fragment);
            self.stats.paragraph_fragments += 1;
        }
    }

    /// Headings are emitted immediately, never buffered.
    pub fn heading(&mut self, level: u8, text: impl Into<String>) {
        self.flush();
        self.nodes.push(ContentNode::heading(level, text));
        self.stats.headings += 1;
    }

    /// Close whichever buffer is open.
    pub fn flush(&mut self) {
        match mem::take(&mut self.buffer) {
            Buffer::Idle => {}
            Buffer::Paragraph(fragments) if fragments.is_empty() => {}
            Buffer::List(items) if items.is_empty() => {}
            Buffer::Paragraph(fragments) => {
                self.nodes.push(paragraph_node(fragments, self.emphasis_runs));
                self.stats.paragraphs += 1;
            }
            Buffer::List(items) => {
                self.nodes.push(ContentNode::list(false, items));
                self.stats.lists += 1;
            }
        }
    }

    pub fn finish(mut self) -> (Vec<ContentNode>, StructureStats) {
        self.flush();
        (self.nodes, self.stats)
    }
}

fn paragraph_node(fragments: Vec<Fragment>, emphasis_runs: bool) -> ContentNode {
    let emphasized = fragments.iter().any(|f| f.bold || f.italic);
    if !(emphasis_runs && emphasized) {
        let text = fragments
            .into_iter()
            .map(|f| f.text)
            .collect::<Vec<_>>()
            .join(" ");
        return ContentNode::paragraph(text);
    }

    let mut runs: Vec<InlineRun> = Vec::new();
    for fragment in fragments {
        match runs.last_mut() {
            Some(last) if last.bold == fragment.bold && last.italic == fragment.italic => {
                last.text.push(' ');
                last.text.push_str(&fragment.text);
            }
            Some(_) => runs.push(InlineRun::styled(
                format!(" {}", fragment.text),
                fragment.bold,
                fragment.italic,
            )),
            None => runs.push(InlineRun::styled(
                fragment.text,
                fragment.bold,
                fragment.italic,
            )),
        }
    }
    ContentNode::paragraph_runs(runs)
}
