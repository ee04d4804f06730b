//! Turning [`OutlineError`]s into miette reports.
//!
//! A [`ParseError`](texoutline_parser::error::ParseError) may hold several
//! diagnostics (a BibTeX file with more than one broken entry); each one
//! becomes its own [`Report`]. Every other error becomes a single report
//! without source context.

use std::fmt;

use miette::{GraphicalReportHandler, LabeledSpan, SourceSpan};

use texoutline::OutlineError;
use texoutline_parser::{
    Span,
    error::{Diagnostic, Severity},
};

/// One renderable problem.
#[derive(Debug)]
pub struct Report<'a> {
    message: String,
    code: Option<String>,
    severity: miette::Severity,
    help: Option<&'a str>,
    source: Option<&'a str>,
    labels: Vec<LabeledSpan>,
}

impl<'a> Report<'a> {
    /// A report for a parser diagnostic, with `src` as the snippet source.
    ///
    /// An empty `src` renders without snippets.
    pub fn from_diagnostic(diag: &'a Diagnostic, src: &'a str) -> Self {
        let labels = diag
            .labels()
            .iter()
            .map(|label| {
                let span = span_to_miette(label.span());
                let message = Some(label.message().to_string());
                if label.is_primary() {
                    LabeledSpan::new_primary_with_span(message, span)
                } else {
                    LabeledSpan::new_with_span(message, span)
                }
            })
            .collect();

        Self {
            message: diag.message().to_string(),
            code: diag.code().map(|code| code.to_string()),
            severity: match diag.severity() {
                Severity::Warning => miette::Severity::Warning,
                Severity::Error => miette::Severity::Error,
            },
            help: diag.help(),
            source: Some(src).filter(|src| !src.is_empty()),
            labels,
        }
    }

    /// A report for an error without source locations.
    pub fn from_error(err: &OutlineError) -> Self {
        let code = match err {
            OutlineError::Io(_) => Some("texoutline::io"),
            OutlineError::Config(_) => Some("texoutline::config"),
            OutlineError::Parse { .. } => None,
        };
        Self {
            message: err.to_string(),
            code: code.map(str::to_string),
            severity: miette::Severity::Error,
            help: None,
            source: None,
            labels: Vec::new(),
        }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Report<'_> {}

impl miette::Diagnostic for Report<'_> {
    fn code<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        self.code
            .as_ref()
            .map(|code| Box::new(code) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(self.severity)
    }

    fn help<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        self.help.map(|help| Box::new(help) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.source
            .as_ref()
            .map(|src| src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if self.labels.is_empty() {
            return None;
        }
        Some(Box::new(self.labels.iter().cloned()))
    }
}

fn span_to_miette(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Split an [`OutlineError`] into reports, one per parser diagnostic.
pub fn to_reports(err: &OutlineError) -> Vec<Report<'_>> {
    match err {
        OutlineError::Parse { err, src } => err
            .diagnostics()
            .iter()
            .map(|diag| Report::from_diagnostic(diag, src))
            .collect(),
        _ => vec![Report::from_error(err)],
    }
}

/// Render a report with miette's graphical handler.
///
/// Falls back to the plain message if rendering fails.
pub fn render(report: &Report<'_>) -> String {
    let mut out = String::new();
    match GraphicalReportHandler::new().render_report(&mut out, report) {
        Ok(()) => out,
        Err(_) => report.to_string(),
    }
}
