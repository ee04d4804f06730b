//! Error codes for the texoutline diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E1xx` - Syntax errors in a single source
//! - `E2xx` - Source loading and inclusion problems

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Syntax Errors (E1xx)
    // =========================================================================
    /// Unexpected character.
    ///
    /// A BibTeX entry contains a character that is not valid at this position,
    /// such as a missing `{` after the entry type.
    E100,

    /// Unterminated entry.
    ///
    /// A BibTeX entry was opened but the input ended before its closing
    /// delimiter.
    E101,

    /// Missing citation key.
    ///
    /// A BibTeX entry has no key before its first field.
    E102,

    /// Unterminated field value.
    ///
    /// A braced or quoted value was opened but never closed.
    E103,

    /// Missing `=` after a field name.
    E104,

    // =========================================================================
    // Source Errors (E2xx)
    // =========================================================================
    /// Unreadable source.
    ///
    /// The document itself could not be read.
    E200,

    /// Included file not found.
    ///
    /// An inclusion directive names a file that does not exist. Reported as
    /// a warning; the including file is still outlined.
    E201,

    /// Inclusion cycle.
    ///
    /// A file includes itself, directly or through other files.
    E202,

    /// Inclusion depth exceeded.
    ///
    /// The include chain is deeper than the configured maximum.
    E203,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Syntax errors
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E104 => "E104",
            // Source errors
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            // Syntax errors
            ErrorCode::E100 => "unexpected character",
            ErrorCode::E101 => "unterminated entry",
            ErrorCode::E102 => "missing citation key",
            ErrorCode::E103 => "unterminated field value",
            ErrorCode::E104 => "missing `=` after field name",
            // Source errors
            ErrorCode::E200 => "unreadable source",
            ErrorCode::E201 => "included file not found",
            ErrorCode::E202 => "inclusion cycle",
            ErrorCode::E203 => "inclusion depth exceeded",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E104.to_string(), "E104");
        assert_eq!(ErrorCode::E200.to_string(), "E200");
        assert_eq!(ErrorCode::E203.to_string(), "E203");
    }

    #[test]
    fn test_error_code_as_str() {
        assert_eq!(ErrorCode::E101.as_str(), "E101");
        assert_eq!(ErrorCode::E202.as_str(), "E202");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E101.description(), "unterminated entry");
        assert_eq!(ErrorCode::E201.description(), "included file not found");
        assert_eq!(ErrorCode::E202.description(), "inclusion cycle");
    }
}
