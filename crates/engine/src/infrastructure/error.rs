//! Unified storage error type.
//!
//! Wraps filesystem, JSON, and domain failures so use cases can handle every
//! storage outcome through one enum.

use charsheet_domain::DomainError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A character folder, file, or entry does not exist.
    #[error("{entity} not found: '{key}'")]
    NotFound { entity: &'static str, key: String },

    /// A file exists but its content is malformed.
    #[error("{0}")]
    Parse(DomainError),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Policy violation: {0}")]
    PolicyViolation(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl StoreError {
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            key: key.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Get the entity type if this is a not-found error.
    pub fn not_found_entity(&self) -> Option<&str> {
        match self {
            Self::NotFound { entity, .. } => Some(entity),
            _ => None,
        }
    }
}

impl From<DomainError> for StoreError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::Validation(msg),
            DomainError::NotFound { entity_type, id } => Self::NotFound {
                entity: entity_type,
                key: id,
            },
            DomainError::PolicyViolation(msg) => Self::PolicyViolation(msg),
            parse @ DomainError::Parse(_) => Self::Parse(parse),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn domain_errors_map_to_store_variants() {
        let err: StoreError = DomainError::not_found("Note section", "Backstory").into();
        assert!(err.is_not_found());
        assert_eq!(err.not_found_entity(), Some("Note section"));

        let err: StoreError = DomainError::policy("too many").into();
        assert!(matches!(err, StoreError::PolicyViolation(_)));

        let err: StoreError = DomainError::validation("bad name").into();
        assert!(matches!(err, StoreError::Validation(_)));

        let err: StoreError = DomainError::parse("line 2: bad").into();
        assert!(matches!(err, StoreError::Parse(ref e) if e.is_parse()));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn io_error_keeps_path_and_source() {
        let err = StoreError::io(
            "data/characters/Aria/character.csv",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("character.csv"));
        assert!(err.source().is_some());
        assert!(!err.is_not_found());
    }
}
