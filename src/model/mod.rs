//! Data model shared by the pipeline stages.
//!
//! Spans and text blocks come in from extraction, the style profile is derived
//! from a reference document's spans, and content nodes go out to rendering.
//! Every type here is JSON-serializable so collaborators can exchange them.

mod node;
mod profile;
mod role;
mod span;

pub use node::{ContentNode, InlineRun, NodeKind};
pub use profile::{FontUsage, HeadingRule, ListStyleInfo, SampleText, SizePercentiles, StyleProfile};
pub use role::Role;
pub use span::{round_size, Span, TextBlock, UNKNOWN_FONT};
