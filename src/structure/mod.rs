//! Content structuring: turn a target document's spans or page text into a
//! flat sequence of content nodes.
//!
//! Two structurers share one accumulation state machine:
//!
//! - [`build_content_structure_from_spans`] classifies each span with the
//!   style profile and keeps per-span font information (emphasis runs).
//! - [`build_content_structure_from_text_blocks`] works from plain page text
//!   and recognizes headings by line shape only.
//!
//! [`Structurer::structure`] applies the selection policy: spans first, page
//! text when the span path produces nothing.

mod blocks;
mod markers;
mod spans;
mod state;

pub use markers::{is_list_line, strip_list_lead};

use serde::Serialize;

use crate::model::{ContentNode, Span, StyleProfile, TextBlock};

/// Options for content structuring.
#[derive(Debug, Clone)]
pub struct StructureOptions {
    /// Emit paragraphs with bold/italic runs when fonts indicate emphasis
    pub emphasis_runs: bool,
}

impl StructureOptions {
    /// Create new structure options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable emphasis runs.
    pub fn with_emphasis_runs(mut self, enabled: bool) -> Self {
        self.emphasis_runs = enabled;
        self
    }

    /// Always emit plain-text paragraphs.
    pub fn plain(mut self) -> Self {
        self.emphasis_runs = false;
        self
    }
}

impl Default for StructureOptions {
    fn default() -> Self {
        Self {
            emphasis_runs: true,
        }
    }
}

/// Counts gathered while structuring.
///
/// Every non-blank input line ends up as exactly one paragraph fragment, list
/// item or heading, so `source_lines` always equals their sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StructureStats {
    pub headings: usize,
    pub paragraphs: usize,
    pub paragraph_fragments: usize,
    pub lists: usize,
    pub list_items: usize,
    pub tables: usize,
    pub source_lines: usize,
}

impl StructureStats {
    /// Total nodes emitted.
    pub fn node_count(&self) -> usize {
        self.headings + self.paragraphs + self.lists + self.tables
    }

    /// Check that no input line was dropped or duplicated.
    pub fn is_conserved(&self) -> bool {
        self.source_lines == self.paragraph_fragments + self.list_items + self.headings
    }
}

/// Which input a structure was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureSource {
    Spans,
    TextBlocks,
}

/// Nodes plus the statistics gathered while building them.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    pub nodes: Vec<ContentNode>,
    pub stats: StructureStats,
    pub source: StructureSource,
}

/// Content structurer.
#[derive(Debug, Clone, Default)]
pub struct Structurer {
    options: StructureOptions,
}

impl Structurer {
    /// Create a structurer with the given options.
    pub fn new(options: StructureOptions) -> Self {
        Self { options }
    }

    /// Structure spans against a style profile.
    pub fn from_spans(&self, spans: &[Span], profile: &StyleProfile) -> Structure {
        let (nodes, stats) =
            spans::structure_spans(spans, profile, self.options.emphasis_runs).finish();
        Structure {
            nodes,
            stats,
            source: StructureSource::Spans,
        }
    }

    /// Structure page text blocks.
    pub fn from_text_blocks(&self, blocks: &[TextBlock]) -> Structure {
        let (nodes, stats) = blocks::structure_blocks(blocks).finish();
        Structure {
            nodes,
            stats,
            source: StructureSource::TextBlocks,
        }
    }

    /// Spans first; page text when the span path yields no nodes.
    pub fn structure(
        &self,
        spans: &[Span],
        blocks: &[TextBlock],
        profile: &StyleProfile,
    ) -> Structure {
        let structure = self.from_spans(spans, profile);
        if !structure.nodes.is_empty() {
            return structure;
        }
        log::debug!(
            "Span structuring produced no nodes from {} spans; falling back to {} text blocks",
            spans.len(),
            blocks.len()
        );
        self.from_text_blocks(blocks)
    }
}

/// Build content nodes from spans in reading order.
///
/// # Example
///
/// ```
/// use papermorph::{build_content_structure_from_spans, ContentNode, HeadingRule, Span, StyleProfile};
///
/// let mut profile = StyleProfile::empty();
/// profile.heading_rules.push(HeadingRule::new(1, 20));
///
/// let spans = vec![
///     Span::new("Title", 24.0),
///     Span::new("Hello world.", 12.0),
///     Span::new("- item one", 12.0),
///     Span::new("- item two", 12.0),
/// ];
/// let nodes = build_content_structure_from_spans(&spans, &profile);
/// assert_eq!(nodes, vec![
///     ContentNode::heading(1, "Title"),
///     ContentNode::paragraph("Hello world."),
///     ContentNode::list(false, vec!["item one".into(), "item two".into()]),
/// ]);
/// ```
pub fn build_content_structure_from_spans(
    spans: &[Span],
    profile: &StyleProfile,
) -> Vec<ContentNode> {
    Structurer::default().from_spans(spans, profile).nodes
}

/// Build content nodes from page text blocks.
pub fn build_content_structure_from_text_blocks(blocks: &[TextBlock]) -> Vec<ContentNode> {
    Structurer::default().from_text_blocks(blocks).nodes
}

/// Normalize raw spans before structuring.
///
/// Drops spans whose text is blank, trims the rest, and rounds sizes to whole
/// points. Order is kept.
pub fn group_spans_by_line(spans: &[Span]) -> Vec<Span> {
    spans
        .iter()
        .filter(|s| !s.trimmed_text().is_empty())
        .map(|s| Span {
            page: s.page,
            font: s.font.clone(),
            size: s.rounded_size().map(f64::from),
            text: s.trimmed_text().to_string(),
            color: s.color.clone(),
        })
        .collect()
}
