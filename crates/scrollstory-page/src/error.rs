//! Scrollstory: page error types.

use scrollstory_core::error::DomainError;
use thiserror::Error;

/// Startup errors for the page and the replay binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Page content could not be loaded or wired.
    #[error("content error: {0}")]
    Content(#[from] DomainError),

    /// A file could not be read.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A scroll script is malformed or could not be delivered.
    #[error("script error: {0}")]
    Script(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_convert_into_content_errors() {
        // Act
        let err: AppError = DomainError::Validation("nine sections".into()).into();

        // Assert
        assert!(matches!(err, AppError::Content(_)));
        assert_eq!(err.to_string(), "content error: validation error: nine sections");
    }

    #[test]
    fn test_io_errors_convert_into_io_errors() {
        let err: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "page.yaml").into();

        assert!(matches!(err, AppError::Io(_)));
        assert!(err.to_string().starts_with("i/o error"));
    }
}
