//! A single error or warning produced while outlining a document.

use std::fmt;

use crate::{
    error::{
        Severity,
        error_code::ErrorCode,
        label::{Label, LabelStyle},
    },
    span::Span,
};

/// An error or warning, optionally with a code, source labels and a hint.
///
/// Rendered by a reporter, a BibTeX error looks like:
///
/// ```text
/// error[E103]: unterminated field value
///   --> refs.bib:4:11
///    |
///  2 | @article{knuth84,
///    | ---------------- in this entry
///  4 |   title = {Literate Programming,
///    |           ^ value starts here
///    |
///    = help: add the closing `}`
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }

    /// Shorthand for an [`Severity::Error`] diagnostic.
    ///
    /// ```
    /// # use texoutline_parser::{Span, error::{Diagnostic, ErrorCode}};
    /// let diag = Diagnostic::error("missing citation key")
    ///     .with_code(ErrorCode::E102)
    ///     .with_label(Span::new(9..10), "expected a key here");
    ///
    /// assert_eq!(diag.to_string(), "error[E102]: missing citation key");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Mark `span` as the location of the problem.
    pub fn with_label(self, span: Span, message: impl Into<String>) -> Self {
        self.labelled(LabelStyle::Primary, span, message)
    }

    /// Point at context for the problem.
    pub fn with_secondary_label(self, span: Span, message: impl Into<String>) -> Self {
        self.labelled(LabelStyle::Secondary, span, message)
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn labelled(mut self, style: LabelStyle, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::new(style, span, message));
        self
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Labels in the order they were added.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{}[{code}]: {}", self.severity, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

impl std::error::Error for Diagnostic {}
