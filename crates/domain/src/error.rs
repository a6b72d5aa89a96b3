//! Unified error types for the domain layer
//!
//! Every codec and rule in this crate returns `DomainError` instead of
//! panicking, so the engine can map failures onto its storage errors without
//! resorting to strings.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Entity not found
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Malformed persisted data
    #[error("Parse error: {0}")]
    Parse(String),

    /// A rule such as the attunement cap refused the change
    #[error("Policy violation: {0}")]
    PolicyViolation(String),
}

impl DomainError {
    /// Creates a validation error for values that cannot be stored.
    ///
    /// Use this when a value is outside its allowed range or contains
    /// characters the on-disk format reserves.
    ///
    /// # Example
    /// ```ignore
    /// if name.is_empty() {
    ///     return Err(DomainError::validation("Character name cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a parse error for malformed file content.
    ///
    /// Messages should name the file kind and the 1-based line so the UI can
    /// show a useful diagnostic.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a policy violation error
    pub fn policy(msg: impl Into<String>) -> Self {
        Self::PolicyViolation(msg.into())
    }

    /// Whether this error came from malformed data.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("name cannot be empty");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Validation failed: name cannot be empty");
    }

    #[test]
    fn test_not_found_error() {
        let err = DomainError::not_found("Note section", "Backstory");
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert_eq!(err.to_string(), "Entity not found: Note section 'Backstory'");
    }

    #[test]
    fn test_policy_error() {
        let err = DomainError::policy("cannot attune more than 3 items");
        assert!(matches!(err, DomainError::PolicyViolation(_)));
        assert_eq!(
            err.to_string(),
            "Policy violation: cannot attune more than 3 items"
        );
    }

    #[test]
    fn test_parse_error_is_parse() {
        assert!(DomainError::parse("character.csv line 1").is_parse());
        assert!(!DomainError::validation("x").is_parse());
    }
}
