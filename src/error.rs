//! Error types for the stackgen CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for stackgen operations.
///
/// Each variant maps to a specific exit code.
#[derive(Error, Debug)]
pub enum StackgenError {
    /// User provided invalid arguments or the invocation is otherwise wrong.
    #[error("{0}")]
    UserError(String),

    /// A descriptor failed validation. Generation aborts before any file
    /// is written so a malformed entry never produces partial artifacts.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A file could not be read or written.
    #[error("I/O error on '{}': {message}", path.display())]
    Io { path: PathBuf, message: String },

    /// Structured data owned by the generator failed to parse or render.
    #[error("Schema error: {0}")]
    Schema(String),

    /// One or more artifacts could not be written during a run. Sibling
    /// descriptors are unaffected; the failures were already reported.
    #[error("generation finished with {failed} failed artifact(s) out of {total}")]
    Generation { failed: usize, total: usize },
}

impl StackgenError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            StackgenError::UserError(_) => exit_codes::USER_ERROR,
            StackgenError::Validation(_) => exit_codes::VALIDATION_FAILURE,
            StackgenError::Io { .. } => exit_codes::IO_FAILURE,
            StackgenError::Generation { .. } => exit_codes::IO_FAILURE,
            StackgenError::Schema(_) => exit_codes::SCHEMA_FAILURE,
        }
    }

    /// Build an `Io` error from a path and source error.
    pub fn io<P: Into<PathBuf>, E: std::fmt::Display>(path: P, err: E) -> Self {
        StackgenError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

/// Result type alias for stackgen operations.
pub type Result<T> = std::result::Result<T, StackgenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = StackgenError::UserError("bad argument".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn validation_error_has_correct_exit_code() {
        let err = StackgenError::Validation("bad name".to_string());
        assert_eq!(err.exit_code(), exit_codes::VALIDATION_FAILURE);
    }

    #[test]
    fn io_error_has_correct_exit_code() {
        let err = StackgenError::io("/tmp/x", "denied");
        assert_eq!(err.exit_code(), exit_codes::IO_FAILURE);
    }

    #[test]
    fn schema_error_has_correct_exit_code() {
        let err = StackgenError::Schema("unresolved placeholder".to_string());
        assert_eq!(err.exit_code(), exit_codes::SCHEMA_FAILURE);
    }

    #[test]
    fn generation_error_has_io_exit_code() {
        let err = StackgenError::Generation {
            failed: 2,
            total: 9,
        };
        assert_eq!(err.exit_code(), exit_codes::IO_FAILURE);
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = StackgenError::Validation("name 'Bad-Name' is not a valid identifier".to_string());
        assert_eq!(
            err.to_string(),
            "Validation failed: name 'Bad-Name' is not a valid identifier"
        );

        let err = StackgenError::io("/out/metadata.json", "permission denied");
        assert!(err.to_string().contains("/out/metadata.json"));
        assert!(err.to_string().contains("permission denied"));
    }
}
