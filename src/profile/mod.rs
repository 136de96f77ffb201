//! Style profiling: reduce a reference document's spans to a compact
//! statistical typography profile.
//!
//! The profile records font usage, the distribution of rounded sizes, the
//! size thresholds that separate heading levels, and the document's list
//! conventions. Role inference and content structuring consume it.

mod fonts;
mod lists;
mod stats;

pub use fonts::{is_bold_font, is_italic_font, BOLD_KEYWORDS, ITALIC_KEYWORDS};
pub use lists::{detect_list_style, BULLET_GLYPHS};
pub use stats::size_percentiles;

use std::collections::{BTreeMap, BTreeSet};

use crate::model::{HeadingRule, Role, SampleText, SizePercentiles, Span, StyleProfile};
use fonts::FontTally;

/// Number of fonts kept in `fonts_top`.
pub const MAX_TOP_FONTS: usize = 8;

/// Number of diagnostic samples kept.
pub const MAX_SAMPLE_TEXTS: usize = 30;

/// Build a style profile from a reference document's spans.
///
/// Malformed spans never cause a failure: a span without a usable size still
/// counts toward font frequency but not toward size statistics. When no span
/// carries a usable size the result is the empty profile.
///
/// # Example
///
/// ```
/// use papermorph::{build_style_profile, Span};
///
/// let spans = vec![
///     Span::new("Annual Report", 24.0).with_font("Helvetica-Bold"),
///     Span::new("Revenue grew.", 12.0).with_font("Helvetica"),
///     Span::new("Costs fell.", 12.0).with_font("Helvetica"),
/// ];
/// let profile = build_style_profile(&spans);
/// assert_eq!(profile.heading_rules[0].min_size, 24);
/// assert_eq!(profile.top_font(), Some("Helvetica"));
/// ```
pub fn build_style_profile(spans: &[Span]) -> StyleProfile {
    if spans.is_empty() {
        log::debug!("No spans to profile; returning empty profile");
        return StyleProfile::empty();
    }

    let mut tally = FontTally::new();
    let mut sizes = Vec::with_capacity(spans.len());
    let mut sample_texts = Vec::new();

    for span in spans {
        let font = span.font_name();
        let size = span.rounded_size();

        tally.record(font, size.is_some());
        if let Some(size) = size {
            sizes.push(size);
        }

        let text = span.trimmed_text();
        if sample_texts.len() < MAX_SAMPLE_TEXTS && !text.is_empty() {
            sample_texts.push(SampleText {
                font: font.to_string(),
                size,
                text: text.to_string(),
            });
        }
    }

    let Some(percentiles) = size_percentiles(&sizes) else {
        log::debug!(
            "None of {} spans carries a usable size; returning empty profile",
            spans.len()
        );
        return StyleProfile::empty();
    };

    let max_size = percentiles.max;
    let heading_rules = build_heading_rules(&percentiles, max_size);
    let size_map = build_size_map(&sizes, &percentiles);

    log::debug!(
        "Profiled {} spans ({} sized): p90={} p75={} p50={}",
        spans.len(),
        sizes.len(),
        percentiles.p90,
        percentiles.p75,
        percentiles.p50
    );

    StyleProfile {
        fonts_top: tally.top(MAX_TOP_FONTS),
        size_percentiles: Some(percentiles),
        size_map,
        heading_rules,
        list_style: Some(detect_list_style(spans)),
        sample_texts,
    }
}

/// Three heading tiers keyed to p90/p75/p50.
///
/// A tier whose percentile is unavailable (zero) degrades to a smaller
/// statistic or a fraction of the largest size. Thresholds never increase
/// with level, even when the small-sample percentile tiers cross.
fn build_heading_rules(p: &SizePercentiles, max_size: u32) -> Vec<HeadingRule> {
    let nonzero = |v: u32| Some(v).filter(|v| *v > 0);

    let h1 = nonzero(p.p90).unwrap_or(max_size);
    let h2 = nonzero(p.p75)
        .or_else(|| nonzero(p.p50))
        .unwrap_or(max_size / 2);
    let h3 = nonzero(p.p50)
        .or_else(|| nonzero(p.p25))
        .unwrap_or(max_size / 4);

    let mut rules = Vec::with_capacity(3);
    let mut ceiling = u32::MAX;
    for (level, min_size) in [(1u8, h1), (2, h2), (3, h3)] {
        let min_size = min_size.min(ceiling);
        ceiling = min_size;
        rules.push(HeadingRule::new(level, min_size));
    }
    rules
}

/// Heading role for every distinct observed size; body sizes are left out.
fn build_size_map(sizes: &[u32], p: &SizePercentiles) -> BTreeMap<u32, Role> {
    let distinct: BTreeSet<u32> = sizes.iter().copied().collect();
    let mut map = BTreeMap::new();

    for size in distinct.into_iter().rev() {
        let role = if p.p90 > 0 && size >= p.p90 {
            Role::Heading(1)
        } else if p.p75 > 0 && size >= p.p75 {
            Role::Heading(2)
        } else if p.p50 > 0 && size >= p.p50 {
            Role::Heading(3)
        } else {
            continue;
        };
        map.insert(size, role);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, size: f64, font: &str) -> Span {
        Span::new(text, size).with_font(font)
    }

    #[test]
    fn test_empty_input() {
        let profile = build_style_profile(&[]);
        assert!(profile.is_empty());
        assert_eq!(profile, StyleProfile::empty());
    }

    #[test]
    fn test_no_sizeable_spans() {
        let mut a = Span::new("a", 12.0);
        a.size = None;
        let mut b = Span::new("b", 12.0);
        b.size = Some(0.2);
        let profile = build_style_profile(&[a, b]);
        assert!(profile.is_empty());
    }

    #[test]
    fn test_basic_profile() {
        let spans = vec![
            span("Title", 24.0, "Helvetica-Bold"),
            span("Section", 18.0, "Helvetica-Bold"),
            span("Body one", 12.0, "Times-Roman"),
            span("Body two", 12.0, "Times-Roman"),
            span("Body three", 12.0, "Times-Roman"),
            span("Note", 9.0, "Times-Italic"),
        ];
        let profile = build_style_profile(&spans);

        let p = profile.size_percentiles.unwrap();
        assert_eq!(p.max, 24);
        assert_eq!(p.min, 9);
        assert_eq!(p.p90, 24);
        assert_eq!(p.p50, 12);

        assert_eq!(profile.fonts_top[0].font, "Times-Roman");
        assert_eq!(profile.fonts_top[0].count, 3);
        assert_eq!(profile.fonts_top[1].font, "Helvetica-Bold");
        assert_eq!(profile.fonts_top[1].bold_pct, 100.0);
        assert_eq!(profile.fonts_top[2].italic_pct, 100.0);

        assert_eq!(profile.heading_rules.len(), 3);
        assert_eq!(profile.heading_rules[0], HeadingRule::new(1, 24));

        assert_eq!(profile.role_for_size(24), Some(Role::Heading(1)));
        assert_eq!(profile.role_for_size(9), None);
        assert_eq!(profile.sample_texts.len(), 6);
    }

    #[test]
    fn test_size_map_tiers() {
        let spans: Vec<Span> = [10.0, 10.0, 10.0, 10.0, 12.0, 14.0, 18.0, 24.0]
            .iter()
            .enumerate()
            .map(|(i, size)| span(&format!("line {i}"), *size, "Helvetica"))
            .collect();
        let profile = build_style_profile(&spans);

        let p = profile.size_percentiles.unwrap();
        assert_eq!((p.p90, p.p75, p.p50, p.p25), (24, 17, 11, 10));

        let thresholds: Vec<u32> = profile.heading_rules.iter().map(|r| r.min_size).collect();
        assert_eq!(thresholds, vec![24, 17, 11]);

        let expected = BTreeMap::from([
            (12, Role::Heading(3)),
            (14, Role::Heading(3)),
            (18, Role::Heading(2)),
            (24, Role::Heading(1)),
        ]);
        assert_eq!(profile.size_map, expected);
    }

    #[test]
    fn test_size_map_skips_zero_tiers() {
        let p = SizePercentiles {
            p90: 20,
            p75: 0,
            p50: 0,
            p25: 0,
            min: 8,
            max: 20,
        };
        let map = build_size_map(&[8, 8, 20], &p);
        assert_eq!(map, BTreeMap::from([(20, Role::Heading(1))]));

        let p = SizePercentiles { p75: 12, ..p };
        let map = build_size_map(&[8, 12, 20], &p);
        assert_eq!(
            map,
            BTreeMap::from([(12, Role::Heading(2)), (20, Role::Heading(1))])
        );
    }

    #[test]
    fn test_heading_rules_never_increase() {
        // Two samples: p75 (second largest) falls below p50 (rounded median)
        let profile = build_style_profile(&[span("a", 10.0, "F"), span("b", 13.0, "F")]);
        let rules = &profile.heading_rules;
        assert_eq!(rules[0].min_size, 13);
        assert_eq!(rules[1].min_size, 10);
        assert_eq!(rules[2].min_size, 10);
        for pair in rules.windows(2) {
            assert!(pair[0].level < pair[1].level);
            assert!(pair[0].min_size >= pair[1].min_size);
        }
    }

    #[test]
    fn test_heading_rules_fallbacks() {
        let zero = SizePercentiles {
            p90: 0,
            p75: 0,
            p50: 0,
            p25: 0,
            min: 0,
            max: 20,
        };
        let rules = build_heading_rules(&zero, 20);
        assert_eq!(rules[0].min_size, 20);
        assert_eq!(rules[1].min_size, 10);
        assert_eq!(rules[2].min_size, 5);
    }

    #[test]
    fn test_unsized_spans_still_count_fonts() {
        let mut unsized_span = span("x", 12.0, "Courier");
        unsized_span.size = None;
        let spans = vec![
            unsized_span.clone(),
            unsized_span,
            span("body", 12.0, "Times-Roman"),
        ];
        let profile = build_style_profile(&spans);
        assert_eq!(profile.fonts_top[0].font, "Courier");
        assert_eq!(profile.fonts_top[0].count, 2);
        assert_eq!(profile.size_percentiles.unwrap().max, 12);
    }

    #[test]
    fn test_missing_font_is_unknown() {
        let profile = build_style_profile(&[Span::new("x", 12.0)]);
        assert_eq!(profile.fonts_top[0].font, "Unknown");
        assert_eq!(profile.sample_texts[0].font, "Unknown");
    }

    #[test]
    fn test_sample_texts_capped() {
        let spans: Vec<Span> = (0..50)
            .map(|i| Span::new(format!("line {}", i), 12.0))
            .collect();
        let profile = build_style_profile(&spans);
        assert_eq!(profile.sample_texts.len(), MAX_SAMPLE_TEXTS);
        assert_eq!(profile.sample_texts[0].text, "line 0");
    }

    #[test]
    fn test_list_style_recorded() {
        let spans = vec![
            Span::new("• one", 12.0),
            Span::new("• two", 12.0),
            Span::new("1. three", 12.0),
        ];
        let profile = build_style_profile(&spans);
        let lists = profile.list_style.unwrap();
        assert_eq!(lists.bullets, vec!['•']);
        assert!(lists.numbered);
        assert_eq!(lists.sample_count, 3);
    }
}
