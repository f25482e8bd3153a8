//! Emphasis markers wrapped around key terms in narration

use serde::{Deserialize, Serialize};

/// Start/end markers used to highlight a term for the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emphasis {
    /// Marker placed before the term (default: `<b>`)
    #[serde(default = "default_start")]
    pub start: String,

    /// Marker placed after the term (default: `</b>`)
    #[serde(default = "default_end")]
    pub end: String,
}

fn default_start() -> String {
    "<b>".to_string()
}

fn default_end() -> String {
    "</b>".to_string()
}

impl Default for Emphasis {
    fn default() -> Self {
        Self {
            start: default_start(),
            end: default_end(),
        }
    }
}

impl Emphasis {
    /// Custom markers
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// No markup at all (plain text output)
    pub fn plain() -> Self {
        Self::new("", "")
    }

    /// Wrap a term in the markers
    pub fn wrap(&self, term: &str) -> String {
        format!("{}{}{}", self.start, term, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_bold() {
        assert_eq!(Emphasis::default().wrap("Hash"), "<b>Hash</b>");
    }

    #[test]
    fn test_plain() {
        assert_eq!(Emphasis::plain().wrap("Hash"), "Hash");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let emphasis: Emphasis = serde_json::from_str(r#"{"start": "**"}"#).unwrap();
        assert_eq!(emphasis.start, "**");
        assert_eq!(emphasis.end, "</b>");
    }
}
