//! Span-driven structuring: roles come from the style profile.

use crate::model::{Span, StyleProfile};
use crate::profile::{is_bold_font, is_italic_font};
use crate::role::infer_role_for_span;

use super::markers::strip_list_lead;
use super::state::{Accumulator, Fragment};

pub(crate) fn structure_spans(
    spans: &[Span],
    profile: &StyleProfile,
    emphasis_runs: bool,
) -> Accumulator {
    let mut acc = Accumulator::new(emphasis_runs);

    for span in spans {
        let text = span.trimmed_text();
        if text.is_empty() {
            continue;
        }
        acc.source_line();

        if let Some(item) = strip_list_lead(text) {
            acc.list_item(item);
            continue;
        }

        match infer_role_for_span(span, profile).heading_level() {
            Some(level) => acc.heading(level, text),
            None => {
                let font = span.font.as_deref().unwrap_or_default();
                acc.fragment(Fragment {
                    text: text.to_string(),
                    bold: is_bold_font(font),
                    italic: is_italic_font(font),
                });
            }
        }
    }

    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentNode, HeadingRule, InlineRun};

    fn profile_with_h1(min_size: u32) -> StyleProfile {
        let mut profile = StyleProfile::empty();
        profile.heading_rules.push(HeadingRule::new(1, min_size));
        profile
    }

    #[test]
    fn test_heading_paragraph_list() {
        let spans = vec![
            Span::new("Title", 24.0),
            Span::new("Hello world.", 12.0),
            Span::new("- item one", 12.0),
            Span::new("- item two", 12.0),
        ];
        let (nodes, stats) = structure_spans(&spans, &profile_with_h1(20), true).finish();
        assert_eq!(
            nodes,
            vec![
                ContentNode::heading(1, "Title"),
                ContentNode::paragraph("Hello world."),
                ContentNode::list(false, vec!["item one".into(), "item two".into()]),
            ]
        );
        assert_eq!(stats.source_lines, 4);
    }

    #[test]
    fn test_list_items_never_become_headings() {
        let spans = vec![Span::new("• Huge bullet", 30.0)];
        let (nodes, _) = structure_spans(&spans, &profile_with_h1(20), true).finish();
        assert_eq!(nodes, vec![ContentNode::list(false, vec!["Huge bullet".into()])]);
    }

    #[test]
    fn test_whitespace_spans_skipped() {
        let spans = vec![
            Span::new("  ", 12.0),
            Span::new("a", 12.0),
            Span::new("\t", 30.0),
            Span::new("b", 12.0),
        ];
        let (nodes, stats) = structure_spans(&spans, &profile_with_h1(20), true).finish();
        assert_eq!(nodes, vec![ContentNode::paragraph("a b")]);
        assert_eq!(stats.source_lines, 2);
    }

    #[test]
    fn test_heading_splits_paragraphs() {
        let spans = vec![
            Span::new("one", 12.0),
            Span::new("Break", 22.0),
            Span::new("two", 12.0),
        ];
        let (nodes, _) = structure_spans(&spans, &profile_with_h1(20), true).finish();
        assert_eq!(
            nodes,
            vec![
                ContentNode::paragraph("one"),
                ContentNode::heading(1, "Break"),
                ContentNode::paragraph("two"),
            ]
        );
    }

    #[test]
    fn test_emphasis_runs_from_font_names() {
        let spans = vec![
            Span::new("Note:", 12.0).with_font("Helvetica-Bold"),
            Span::new("read this.", 12.0).with_font("Helvetica"),
        ];
        let (nodes, _) = structure_spans(&spans, &StyleProfile::empty(), true).finish();
        assert_eq!(
            nodes,
            vec![ContentNode::paragraph_runs(vec![
                InlineRun::styled("Note:", true, false),
                InlineRun::plain(" read this."),
            ])]
        );

        let (nodes, _) = structure_spans(&spans, &StyleProfile::empty(), false).finish();
        assert_eq!(nodes, vec![ContentNode::paragraph("Note: read this.")]);
    }

    #[test]
    fn test_empty_profile_everything_is_paragraph() {
        let spans = vec![Span::new("Big", 48.0), Span::new("small", 8.0)];
        let (nodes, _) = structure_spans(&spans, &StyleProfile::empty(), true).finish();
        assert_eq!(nodes, vec![ContentNode::paragraph("Big small")]);
    }
}
