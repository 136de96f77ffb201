//! Semantic role labels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic classification of a span: a heading level or body text.
///
/// Serialized as its label: `"H1"`, `"H2"`, ..., or `"P"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Heading of the given level (1 = most prominent)
    Heading(u8),
    /// Plain paragraph text
    #[default]
    Paragraph,
}

impl Role {
    /// Check if this role is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, Role::Heading(_))
    }

    /// Heading level, or `None` for paragraph text.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            Role::Heading(level) => Some(*level),
            Role::Paragraph => None,
        }
    }

    /// Parse a role label.
    ///
    /// Any label starting with `H` is a heading; a level that cannot be read
    /// from the rest of the label defaults to 1. Everything else is `P`.
    pub fn from_label(label: &str) -> Self {
        match label.strip_prefix('H') {
            Some(rest) => Role::Heading(rest.trim().parse().ok().filter(|l| *l > 0).unwrap_or(1)),
            None => Role::Paragraph,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Heading(level) => write!(f, "H{}", level),
            Role::Paragraph => f.write_str("P"),
        }
    }
}

impl From<String> for Role {
    fn from(label: String) -> Self {
        Role::from_label(&label)
    }
}

impl From<&str> for Role {
    fn from(label: &str) -> Self {
        Role::from_label(label)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_labels() {
        assert_eq!(Role::Heading(1).to_string(), "H1");
        assert_eq!(Role::Heading(3).to_string(), "H3");
        assert_eq!(Role::Paragraph.to_string(), "P");
    }

    #[test]
    fn test_role_from_label() {
        assert_eq!(Role::from_label("H2"), Role::Heading(2));
        assert_eq!(Role::from_label("P"), Role::Paragraph);
        assert_eq!(Role::from_label("Hx"), Role::Heading(1));
        assert_eq!(Role::from_label("H"), Role::Heading(1));
        assert_eq!(Role::from_label("body"), Role::Paragraph);
    }

    #[test]
    fn test_role_serde() {
        let json = serde_json::to_string(&Role::Heading(2)).unwrap();
        assert_eq!(json, "\"H2\"");
        let role: Role = serde_json::from_str("\"P\"").unwrap();
        assert_eq!(role, Role::Paragraph);
    }
}
