//! Error types for outline operations.
//!
//! [`OutlineError`] wraps everything that can go wrong between receiving a
//! document and handing back its structure.

use std::io;

use thiserror::Error;

use texoutline_parser::error::ParseError;

/// The main error type for texoutline operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the source text next to the structured
/// diagnostics, so spans can be rendered against it.
#[derive(Debug, Error)]
pub enum OutlineError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl OutlineError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use texoutline_parser::error::{Diagnostic, ErrorCode};

    use super::*;

    #[test]
    fn test_parse_error_displays_first_diagnostic() {
        let err = ParseError::from(
            Diagnostic::error("unterminated entry").with_code(ErrorCode::E101),
        );
        let err = OutlineError::new_parse_error(err, "@book{a,");

        assert_eq!(err.to_string(), "error[E101]: unterminated entry");
        match err {
            OutlineError::Parse { src, .. } => assert_eq!(src, "@book{a,"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_io_conversion() {
        let err: OutlineError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.to_string(), "I/O error: gone");
    }
}
