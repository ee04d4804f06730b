//! Accumulates diagnostics over a pass that keeps going after problems.

use crate::error::{Diagnostic, ParseError, Severity};

/// Diagnostics gathered while parsing or walking a project.
///
/// Warnings travel next to a successful result; a single error turns the
/// whole collection into a [`ParseError`].
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// The most serious severity emitted so far.
    pub fn worst(&self) -> Option<Severity> {
        self.diagnostics.iter().map(Diagnostic::severity).max()
    }

    /// The collected warnings, or every diagnostic as an error if any of
    /// them is one.
    pub fn finish(self) -> Result<Vec<Diagnostic>, ParseError> {
        match self.worst() {
            Some(Severity::Error) => Err(ParseError::new(self.diagnostics)),
            _ => Ok(self.diagnostics),
        }
    }
}
