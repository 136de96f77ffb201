//! Typographic atoms produced by span extraction.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One contiguous run of text sharing a font and size on one line.
///
/// Spans are transient: they are produced per extraction call and consumed by
/// profiling and structuring. Every field except `text` may be missing or
/// malformed in collaborator-supplied data; deserialization degrades such
/// values to `None` instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Page number (1-indexed)
    #[serde(default, deserialize_with = "lenient_page")]
    pub page: u32,

    /// Font name (e.g., "Helvetica-Bold"), if known
    #[serde(default, deserialize_with = "lenient_string")]
    pub font: Option<String>,

    /// Font size in points, if known
    #[serde(default, deserialize_with = "lenient_size")]
    pub size: Option<f64>,

    /// Raw text, possibly with leading/trailing whitespace
    #[serde(default, deserialize_with = "lenient_text")]
    pub text: String,

    /// Fill color as a hex string (e.g., "#1a1a1a")
    #[serde(default, deserialize_with = "lenient_color")]
    pub color: Option<String>,
}

impl Span {
    /// Create a span with text and size only.
    pub fn new(text: impl Into<String>, size: f64) -> Self {
        Self {
            page: 1,
            font: None,
            size: Some(size),
            text: text.into(),
            color: None,
        }
    }

    /// Set the font name.
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    /// Set the page number.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Set the fill color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Font size rounded to the nearest integer, or `None` if unusable.
    pub fn rounded_size(&self) -> Option<u32> {
        round_size(self.size)
    }

    /// Font name, or `"Unknown"` when missing or empty.
    pub fn font_name(&self) -> &str {
        match self.font.as_deref() {
            Some(f) if !f.is_empty() => f,
            _ => UNKNOWN_FONT,
        }
    }

    /// Text with surrounding whitespace removed.
    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }
}

/// Placeholder font name for spans without one.
pub const UNKNOWN_FONT: &str = "Unknown";

/// Round a raw size to an integer point size.
///
/// Halves round to the nearest even integer (12.5 -> 12, 13.5 -> 14) so
/// classification matches profiles built by earlier releases. Non-finite and
/// non-positive results are unusable.
pub fn round_size(size: Option<f64>) -> Option<u32> {
    let size = size?;
    if !size.is_finite() {
        return None;
    }
    let rounded = size.round_ties_even();
    if rounded < 1.0 || rounded > u32::MAX as f64 {
        return None;
    }
    Some(rounded as u32)
}

/// Plain text of one source page, used when span extraction is unavailable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Page number (1-indexed)
    #[serde(default, deserialize_with = "lenient_page")]
    pub page: u32,

    /// Page text, lines separated by newlines; may be empty
    #[serde(default, deserialize_with = "lenient_text")]
    pub text: String,
}

impl TextBlock {
    /// Create a new text block.
    pub fn new(page: u32, text: impl Into<String>) -> Self {
        Self {
            page,
            text: text.into(),
        }
    }
}

fn lenient_page<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

fn lenient_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        _ => String::new(),
    })
}

fn lenient_size<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Accepts hex strings as-is and packed sRGB integers (0xRRGGBB).
fn lenient_color<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => n
            .as_u64()
            .filter(|v| *v <= 0xFF_FFFF)
            .map(|v| format!("#{:06x}", v)),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_size_ties_to_even() {
        assert_eq!(round_size(Some(12.5)), Some(12));
        assert_eq!(round_size(Some(13.5)), Some(14));
        assert_eq!(round_size(Some(11.96)), Some(12));
        assert_eq!(round_size(Some(0.4)), None);
        assert_eq!(round_size(Some(f64::NAN)), None);
        assert_eq!(round_size(None), None);
    }

    #[test]
    fn test_font_name_default() {
        let span = Span::new("x", 12.0);
        assert_eq!(span.font_name(), "Unknown");

        let span = Span::new("x", 12.0).with_font("");
        assert_eq!(span.font_name(), "Unknown");

        let span = Span::new("x", 12.0).with_font("Times-Roman");
        assert_eq!(span.font_name(), "Times-Roman");
    }

    #[test]
    fn test_deserialize_well_formed_span() {
        let json = r##"{"page":2,"font":"Helvetica","size":11.8,"text":" Hi ","color":"#000000"}"##;
        let span: Span = serde_json::from_str(json).unwrap();
        assert_eq!(span.page, 2);
        assert_eq!(span.font.as_deref(), Some("Helvetica"));
        assert_eq!(span.rounded_size(), Some(12));
        assert_eq!(span.trimmed_text(), "Hi");
        assert_eq!(span.color.as_deref(), Some("#000000"));
    }

    #[test]
    fn test_deserialize_degraded_span() {
        let json = r#"{"page":"x","font":null,"size":"large","text":null,"color":16711680}"#;
        let span: Span = serde_json::from_str(json).unwrap();
        assert_eq!(span.page, 0);
        assert!(span.font.is_none());
        assert!(span.size.is_none());
        assert_eq!(span.text, "");
        assert_eq!(span.color.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_deserialize_missing_fields() {
        let span: Span = serde_json::from_str(r#"{"text":"only text"}"#).unwrap();
        assert_eq!(span.text, "only text");
        assert!(span.size.is_none());
    }

    #[test]
    fn test_deserialize_numeric_string_size() {
        let span: Span = serde_json::from_str(r#"{"text":"a","size":"14.2"}"#).unwrap();
        assert_eq!(span.rounded_size(), Some(14));
    }

    #[test]
    fn test_text_block_deserialize() {
        let block: TextBlock = serde_json::from_str(r#"{"page":1,"text":null}"#).unwrap();
        assert_eq!(block, TextBlock::new(1, ""));
    }
}
