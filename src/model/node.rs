//! Content nodes: the flat structural sequence handed to the renderer.

use serde::{Deserialize, Serialize};

/// One structural unit of reconstructed content.
///
/// Nodes form a flat, ordered sequence with no nesting. They are built once
/// by a structurer and consumed once by a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentNode {
    /// What this node holds
    #[serde(flatten)]
    pub kind: NodeKind,

    /// Force a page break after this node
    #[serde(default, skip_serializing_if = "is_false")]
    pub page_break_after: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Node variants, tagged by `"type"` in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    /// A heading; level is expected in 1..=6 and clamped at render time
    Heading { level: u8, text: String },

    /// A paragraph, either plain text or styled runs (runs win when non-empty)
    Paragraph {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        runs: Option<Vec<InlineRun>>,
    },

    /// A list of plain-text items
    List {
        #[serde(default)]
        ordered: bool,
        items: Vec<String>,
    },

    /// A table; the first row is a header row when `header` is set
    Table {
        rows: Vec<Vec<String>>,
        #[serde(default)]
        header: bool,
    },

    /// Markup inserted verbatim, without escaping
    #[serde(rename = "raw_html")]
    RawMarkup {
        #[serde(alias = "html")]
        content: String,
    },
}

impl ContentNode {
    fn from_kind(kind: NodeKind) -> Self {
        Self {
            kind,
            page_break_after: false,
        }
    }

    /// Create a heading node.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::from_kind(NodeKind::Heading {
            level,
            text: text.into(),
        })
    }

    /// Create a plain-text paragraph node.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::from_kind(NodeKind::Paragraph {
            text: Some(text.into()),
            runs: None,
        })
    }

    /// Create a paragraph node from styled runs.
    pub fn paragraph_runs(runs: Vec<InlineRun>) -> Self {
        Self::from_kind(NodeKind::Paragraph {
            text: None,
            runs: Some(runs),
        })
    }

    /// Create a list node.
    pub fn list(ordered: bool, items: Vec<String>) -> Self {
        Self::from_kind(NodeKind::List { ordered, items })
    }

    /// Create a table node.
    pub fn table(rows: Vec<Vec<String>>, header: bool) -> Self {
        Self::from_kind(NodeKind::Table { rows, header })
    }

    /// Create a raw markup node. The content is never escaped.
    pub fn raw(content: impl Into<String>) -> Self {
        Self::from_kind(NodeKind::RawMarkup {
            content: content.into(),
        })
    }

    /// Request a page break after this node.
    pub fn with_page_break(mut self) -> Self {
        self.page_break_after = true;
        self
    }

    /// Check if this is a heading node.
    pub fn is_heading(&self) -> bool {
        matches!(self.kind, NodeKind::Heading { .. })
    }

    /// Heading text, if this is a heading node.
    pub fn heading_text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Heading { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Plain text of the node (list items and table cells joined by newlines).
    pub fn plain_text(&self) -> String {
        match &self.kind {
            NodeKind::Heading { text, .. } => text.clone(),
            NodeKind::Paragraph { text, runs } => match runs {
                Some(runs) if !runs.is_empty() => runs.iter().map(|r| r.text.as_str()).collect(),
                _ => text.clone().unwrap_or_default(),
            },
            NodeKind::List { items, .. } => items.join("\n"),
            NodeKind::Table { rows, .. } => rows
                .iter()
                .map(|row| row.join("\t"))
                .collect::<Vec<_>>()
                .join("\n"),
            NodeKind::RawMarkup { content } => content.clone(),
        }
    }
}

/// A run of paragraph text with uniform emphasis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineRun {
    /// The text content
    pub text: String,
    /// Bold text
    #[serde(default)]
    pub bold: bool,
    /// Italic text
    #[serde(default)]
    pub italic: bool,
}

impl InlineRun {
    /// Create an unstyled run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
        }
    }

    /// Create a run with explicit emphasis.
    pub fn styled(text: impl Into<String>, bold: bool, italic: bool) -> Self {
        Self {
            text: text.into(),
            bold,
            italic,
        }
    }

    /// Check if the run carries any emphasis.
    pub fn is_emphasized(&self) -> bool {
        self.bold || self.italic
    }
}
