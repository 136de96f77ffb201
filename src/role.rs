//! Role inference: classify a single span against a style profile.

use crate::model::{Role, Span, StyleProfile};

/// Classify a span as a heading level or paragraph text.
///
/// Heading rules are scanned level 1 first, so sizes the reference document
/// never used but which clear a threshold still classify. A size below every
/// rule falls back to an exact `size_map` lookup, then to [`Role::Paragraph`].
///
/// # Example
///
/// ```
/// use papermorph::{infer_role_for_span, HeadingRule, Role, Span, StyleProfile};
///
/// let mut profile = StyleProfile::empty();
/// assert_eq!(infer_role_for_span(&Span::new("x", 40.0), &profile), Role::Paragraph);
///
/// profile.heading_rules.push(HeadingRule::new(1, 20));
/// assert_eq!(infer_role_for_span(&Span::new("x", 40.0), &profile), Role::Heading(1));
/// ```
pub fn infer_role_for_span(span: &Span, profile: &StyleProfile) -> Role {
    let Some(size) = span.rounded_size() else {
        return Role::Paragraph;
    };
    if profile.is_empty() {
        return Role::Paragraph;
    }

    if let Some(rule) = profile.heading_rules.iter().find(|r| size >= r.min_size) {
        return Role::Heading(rule.level);
    }

    profile.role_for_size(size).unwrap_or_default()
}
