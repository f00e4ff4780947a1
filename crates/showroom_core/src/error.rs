//! Engine error types

use crate::catalog::CatalogError;
use crate::source::FetchError;
use thiserror::Error;

/// Main engine error type
#[derive(Error, Debug)]
pub enum EngineError {
    // ===== Recoverable Errors (surface to user, continue) =====
    #[error("Record fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    // ===== Fatal Errors (bad static data or broken startup) =====
    #[error("Malformed catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Initialization failed: {0}")]
    Init(String),
}

impl EngineError {
    /// Is this error recoverable?
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EngineError::Fetch(_) | EngineError::Io(_))
    }

    /// Is this a fatal error?
    pub fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }

    /// Get a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            EngineError::Fetch(e) => format!("Could not load the collection: {}", e),
            EngineError::Catalog(e) => format!("Catalog data is invalid: {}", e),
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CategoryId;

    #[test]
    fn test_fetch_failure_is_recoverable() {
        let err: EngineError = FetchError::Unavailable("timeout".to_string()).into();
        assert!(err.is_recoverable());
        assert!(!err.is_fatal());
        assert!(err.user_message().contains("timeout"));
    }

    #[test]
    fn test_catalog_error_is_fatal() {
        let err: EngineError = CatalogError::DuplicateId(CategoryId(7)).into();
        assert!(err.is_fatal());
        assert!(err.user_message().contains("7"));
    }
}
