//! Diagnostics reported by the structure parsers.
//!
//! Every problem is a [`Diagnostic`]: a severity, an optional [`ErrorCode`],
//! labelled byte spans and a help line. A parser that gives up returns them
//! as a [`ParseError`]. A project walk that only met inclusion problems
//! returns them as warnings next to its result.
//!
//! # Example
//!
//! ```
//! # use texoutline_parser::{Span, error::{Diagnostic, ErrorCode, ParseError}};
//! let err = ParseError::from(
//!     Diagnostic::error("unterminated field value")
//!         .with_code(ErrorCode::E103)
//!         .with_label(Span::new(100..101), "value starts here")
//!         .with_secondary_label(Span::new(50..70), "in this entry")
//!         .with_help("add the closing `}`"),
//! );
//!
//! assert!(err.has_code(ErrorCode::E103));
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::{Label, LabelStyle};
pub use parse_error::ParseError;
pub use severity::Severity;
