//! # texoutline Parser
//!
//! Structure parsers for the TeX family. Each dialect turns a document into
//! a tree of [`Element`]s:
//!
//! - [`LatexParser`] - sections, environments, tracked commands and
//!   inclusion placeholders; can also walk a multi-file project
//! - [`BibtexParser`] - bibliography entries and their fields
//! - [`DoctexParser`] - the documentation part of `.dtx` sources
//!
//! ## Usage
//!
//! ```
//! # use texoutline_parser::{LatexParser, MemoryResolver, ParseInput, StructureParser};
//! # use std::path::Path;
//! let resolver = MemoryResolver::new()
//!     .with_file("/doc/main.tex", "\\section{Intro}\n\\label{sec:intro}\n");
//!
//! let elements = LatexParser::default()
//!     .parse(ParseInput::File(Path::new("/doc/main.tex")), &resolver)
//!     .unwrap();
//!
//! assert_eq!(elements[0].label(), "1 Intro");
//! ```

mod bibtex;
mod config;
mod doctex;
pub mod error;
mod latex;
mod lexer;
mod resolver;
mod span;
mod tokens;

pub use bibtex::BibtexParser;
pub use config::{
    DEFAULT_COMMANDS, DEFAULT_ENVIRONMENTS, DEFAULT_MAX_INCLUDE_DEPTH, DEFAULT_SECTIONS,
    StructureConfig,
};
pub use doctex::{DoctexParser, documentation_text};
pub use latex::{FileStructure, LatexParser, ProjectStructure};
pub use resolver::{FsResolver, MemoryResolver, SourceResolver};
pub use span::Span;

use std::{borrow::Cow, path::Path};

use texoutline_core::{dialect::Dialect, element::Element};

use error::{Diagnostic, ErrorCode, ParseError};

/// What a parser reads: raw text, or a file identity resolved on demand.
#[derive(Debug, Clone, Copy)]
pub enum ParseInput<'a> {
    Text(&'a str),
    File(&'a Path),
}

impl<'a> ParseInput<'a> {
    /// The source text, read through `resolver` for file inputs.
    ///
    /// # Errors
    ///
    /// Returns `E200` when the file cannot be read.
    pub fn load(&self, resolver: &dyn SourceResolver) -> Result<Cow<'a, str>, ParseError> {
        match *self {
            ParseInput::Text(text) => Ok(Cow::Borrowed(text)),
            ParseInput::File(path) => resolver.read(path).map(Cow::Owned).map_err(|err| {
                Diagnostic::error(format!("cannot read `{}`: {err}", path.display()))
                    .with_code(ErrorCode::E200)
                    .into()
            }),
        }
    }
}

/// A dialect-specific structure parser.
///
/// Implementations never return a partial tree: either the whole document
/// was outlined or the parse failed.
pub trait StructureParser {
    /// The dialect this parser handles.
    fn dialect(&self) -> Dialect;

    /// Build the element tree of `input`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] when the source cannot be read or, for
    /// dialects with strict syntax, cannot be parsed.
    fn parse(
        &self,
        input: ParseInput<'_>,
        resolver: &dyn SourceResolver,
    ) -> Result<Vec<Element>, ParseError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_text_does_not_touch_resolver() {
        let source = ParseInput::Text("abc").load(&MemoryResolver::new()).unwrap();
        assert!(matches!(source, Cow::Borrowed("abc")));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ParseInput::File(Path::new("/nope.tex"))
            .load(&MemoryResolver::new())
            .unwrap_err();

        let diag = &err.diagnostics()[0];
        assert_eq!(diag.code(), Some(ErrorCode::E200));
        assert!(diag.message().starts_with("cannot read `/nope.tex`"));
    }

    #[test]
    fn test_dialects() {
        let parsers: [&dyn StructureParser; 3] = [
            &LatexParser::default(),
            &BibtexParser::new(),
            &DoctexParser::default(),
        ];
        let dialects: Vec<_> = parsers.iter().map(|p| p.dialect()).collect();
        assert_eq!(dialects, [Dialect::Latex, Dialect::Bibtex, Dialect::Doctex]);
    }

    #[test]
    fn test_bibtex_over_file_input() {
        let resolver = MemoryResolver::new().with_file("refs.bib", "@book{k, year = 2001}");
        let elements = BibtexParser::new()
            .parse(ParseInput::File(Path::new("refs.bib")), &resolver)
            .unwrap();

        assert_eq!(elements[0].label(), "book: k");
    }
}
