//! JSON output for profiles and content nodes.

use serde::Serialize;

use crate::error::Result;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize any pipeline value (profile, nodes, spans) to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value)?,
        JsonFormat::Compact => serde_json::to_string(value)?,
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentNode, StyleProfile};

    #[test]
    fn test_to_json_pretty() {
        let nodes = vec![ContentNode::heading(1, "Title"), ContentNode::paragraph("Body")];
        let json = to_json(&nodes, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"type\": \"heading\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let nodes = [ContentNode::paragraph("x")];
        let json = to_json(&nodes[..], JsonFormat::Compact).unwrap();
        assert_eq!(json, r#"[{"type":"paragraph","text":"x"}]"#);
    }

    #[test]
    fn test_empty_profile_json() {
        let json = to_json(&StyleProfile::empty(), JsonFormat::Pretty).unwrap();
        assert_eq!(json, "{}");
    }
}
