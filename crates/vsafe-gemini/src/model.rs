//! Model name validation.

use crate::error::{GeminiError, GeminiResult};

/// Model used when the requested one cannot be used.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

const MAX_MODEL_NAME_LEN: usize = 128;

/// A validated model identifier, e.g. `gemini-2.0-flash`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelName(String);

impl ModelName {
    /// Validate a model name.
    ///
    /// An optional `models/` prefix is stripped. The remainder must be
    /// non-empty and made of ASCII letters, digits, `.`, `-` or `_`.
    pub fn parse(name: &str) -> GeminiResult<Self> {
        let trimmed = name.trim();
        let bare = trimmed.strip_prefix("models/").unwrap_or(trimmed);

        let valid = !bare.is_empty()
            && bare.len() <= MAX_MODEL_NAME_LEN
            && bare
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));

        if valid {
            Ok(Self(bare.to_string()))
        } else {
            Err(GeminiError::InvalidModel(name.to_string()))
        }
    }

    /// The built-in fallback model.
    pub fn default_model() -> Self {
        Self(DEFAULT_MODEL.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ModelName {
    fn default() -> Self {
        Self::default_model()
    }
}

impl std::fmt::Display for ModelName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_names() {
        assert_eq!(ModelName::parse("gemini-2.0-flash").unwrap().as_str(), "gemini-2.0-flash");
        assert_eq!(ModelName::parse("models/gemini-1.5-pro").unwrap().as_str(), "gemini-1.5-pro");
        assert_eq!(ModelName::parse("  gemini_exp  ").unwrap().as_str(), "gemini_exp");
    }

    #[test]
    fn test_parse_invalid_names() {
        assert!(ModelName::parse("").is_err());
        assert!(ModelName::parse("models/").is_err());
        assert!(ModelName::parse("gemini flash").is_err());
        assert!(ModelName::parse("../secret").is_err());
        assert!(ModelName::parse("gemini:generate").is_err());
        assert!(ModelName::parse(&"a".repeat(200)).is_err());
    }

    #[test]
    fn test_default_model() {
        assert_eq!(ModelName::default().as_str(), DEFAULT_MODEL);
    }
}
