//! The error a structure parser returns when it gives up on a document.

use std::fmt;

use crate::error::{Diagnostic, ErrorCode};

/// One or more diagnostics that stopped a document from being outlined.
///
/// A BibTeX source with several broken entries yields one diagnostic per
/// entry, in source order.
#[derive(Debug)]
pub struct ParseError {
    diagnostics: Vec<Diagnostic>,
}

impl ParseError {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Codes of the coded diagnostics, in report order.
    pub fn codes(&self) -> impl Iterator<Item = ErrorCode> + '_ {
        self.diagnostics.iter().filter_map(Diagnostic::code)
    }

    /// Whether any diagnostic carries `code`.
    pub fn has_code(&self, code: ErrorCode) -> bool {
        self.codes().any(|c| c == code)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(first) = self.diagnostics.first() else {
            return write!(f, "parse failed");
        };
        write!(f, "{first}")?;
        match self.diagnostics.len() - 1 {
            0 => Ok(()),
            rest => write!(f, " (and {rest} more)"),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self::new(vec![diagnostic])
    }
}

impl From<Vec<Diagnostic>> for ParseError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self::new(diagnostics)
    }
}
