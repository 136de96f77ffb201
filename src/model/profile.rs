//! Style profile: a statistical snapshot of a reference document's typography.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Role;

/// Typography summary derived from a reference document's spans.
///
/// A profile built from no usable spans is empty. Consumers treat an empty
/// profile as "everything is a paragraph"; it serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleProfile {
    /// Most frequent fonts first, at most 8
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fonts_top: Vec<FontUsage>,

    /// Percentile thresholds over rounded span sizes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_percentiles: Option<SizePercentiles>,

    /// Observed rounded size -> heading role (sizes classified as `P` are absent)
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub size_map: BTreeMap<u32, Role>,

    /// Heading thresholds, level 1 (largest) first
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub heading_rules: Vec<HeadingRule>,

    /// Bullet and numbering conventions seen in the document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_style: Option<ListStyleInfo>,

    /// Diagnostic samples, at most 30
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sample_texts: Vec<SampleText>,
}

impl StyleProfile {
    /// The degenerate "no classification possible" profile.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if this profile carries no classification data.
    pub fn is_empty(&self) -> bool {
        self.heading_rules.is_empty() && self.size_map.is_empty() && self.fonts_top.is_empty()
    }

    /// Name of the most frequent font, if any.
    pub fn top_font(&self) -> Option<&str> {
        self.fonts_top
            .first()
            .map(|f| f.font.as_str())
            .filter(|f| !f.is_empty())
    }

    /// Look up the role recorded for an exact rounded size.
    pub fn role_for_size(&self, size: u32) -> Option<Role> {
        self.size_map.get(&size).copied()
    }
}

/// How often a font occurs and how often it looks bold or italic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontUsage {
    /// Font name ("Unknown" when the span had none)
    pub font: String,
    /// Number of spans using this font
    pub count: usize,
    /// Percentage of sized spans whose font name reads as bold (one decimal)
    pub bold_pct: f64,
    /// Percentage of sized spans whose font name reads as italic (one decimal)
    pub italic_pct: f64,
}

/// Percentile thresholds over rounded sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizePercentiles {
    pub p90: u32,
    pub p75: u32,
    pub p50: u32,
    pub p25: u32,
    pub min: u32,
    pub max: u32,
}

/// Minimum rounded size for a heading level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingRule {
    /// Heading level (1 = most prominent)
    pub level: u8,
    /// Smallest rounded size that qualifies for this level
    pub min_size: u32,
}

impl HeadingRule {
    /// Create a new heading rule.
    pub fn new(level: u8, min_size: u32) -> Self {
        Self { level, min_size }
    }
}

/// Bullet and numbering conventions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListStyleInfo {
    /// Most frequent leading bullet glyphs, at most 3
    pub bullets: Vec<char>,
    /// Whether any numbered-list lead (`1.` or `a)`) was seen
    pub numbered: bool,
    /// Number of non-empty texts scanned
    pub sample_count: usize,
}

/// A diagnostic (font, size, text) triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleText {
    pub font: String,
    pub size: Option<u32>,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_profile_serializes_as_empty_object() {
        let profile = StyleProfile::empty();
        assert!(profile.is_empty());
        assert_eq!(serde_json::to_string(&profile).unwrap(), "{}");

        let parsed: StyleProfile = serde_json::from_str("{}").unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_size_map_uses_string_keys() {
        let mut profile = StyleProfile::empty();
        profile.size_map.insert(24, Role::Heading(1));
        let json = serde_json::to_string(&profile).unwrap();
        assert_eq!(json, r#"{"size_map":{"24":"H1"}}"#);

        let parsed: StyleProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.role_for_size(24), Some(Role::Heading(1)));
    }

    #[test]
    fn test_top_font() {
        let mut profile = StyleProfile::empty();
        assert_eq!(profile.top_font(), None);

        profile.fonts_top.push(FontUsage {
            font: "Georgia".to_string(),
            count: 3,
            bold_pct: 0.0,
            italic_pct: 0.0,
        });
        assert_eq!(profile.top_font(), Some("Georgia"));
        assert!(!profile.is_empty());
    }
}
