//! Validated character name newtype
//!
//! The character name doubles as the folder key under `characters/`, so it
//! must be usable as a single path component and as the first field of the
//! record line:
//! - Non-empty and trimmed
//! - Within length limits
//! - No path separators, parent references, control characters, `,` or `:`

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length for a character name
const MAX_NAME_LENGTH: usize = 100;

/// A validated character name (non-empty, <=100 chars, trimmed, filesystem-safe)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CharacterName(String);

impl CharacterName {
    /// Create a new validated character name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The name is empty after trimming
    /// - The name exceeds 100 characters after trimming
    /// - The name is `.`/`..` or contains `/`, `\`, `,`, `:` or control characters
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Character name cannot be empty"));
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Character name cannot exceed {} characters",
                MAX_NAME_LENGTH
            )));
        }
        if trimmed == "." || trimmed == ".." {
            return Err(DomainError::validation(
                "Character name cannot be a relative path",
            ));
        }
        if let Some(bad) = trimmed
            .chars()
            .find(|c| matches!(c, '/' | '\\' | ',' | ':') || c.is_control())
        {
            return Err(DomainError::validation(format!(
                "Character name cannot contain {:?}",
                bad
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CharacterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CharacterName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<&str> for CharacterName {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<CharacterName> for String {
    fn from(name: CharacterName) -> String {
        name.0
    }
}

impl AsRef<str> for CharacterName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_name_is_trimmed() {
        let name = CharacterName::new("  Aria Moonwhisper ").unwrap();
        assert_eq!(name.as_str(), "Aria Moonwhisper");
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(CharacterName::new("   ").is_err());
    }

    #[test]
    fn test_path_like_names_rejected() {
        assert!(CharacterName::new("..").is_err());
        assert!(CharacterName::new("a/b").is_err());
        assert!(CharacterName::new("a\\b").is_err());
    }

    #[test]
    fn test_record_separators_rejected() {
        assert!(CharacterName::new("Aria, the Bold").is_err());
        assert!(CharacterName::new("Aria:2").is_err());
    }

    #[test]
    fn test_too_long_rejected() {
        assert!(CharacterName::new("x".repeat(101)).is_err());
        assert!(CharacterName::new("x".repeat(100)).is_ok());
    }

    #[test]
    fn test_serde_validates() {
        let ok: CharacterName = serde_json::from_str("\"Aria\"").unwrap();
        assert_eq!(ok.as_str(), "Aria");
        assert!(serde_json::from_str::<CharacterName>("\"../etc\"").is_err());
    }
}
