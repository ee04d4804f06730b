//! Routing documents to the parser of their dialect.

use log::debug;

use texoutline_core::{dialect::Dialect, element::Element};
use texoutline_parser::{
    BibtexParser, DoctexParser, LatexParser, ParseInput, SourceResolver, StructureConfig,
    StructureParser, error::ParseError,
};

use crate::document::SourceDocument;

/// Holds one parser per dialect and picks the right one for a document.
#[derive(Debug, Clone, Default)]
pub(crate) struct StructureDispatcher {
    latex: LatexParser,
    bibtex: BibtexParser,
    doctex: DoctexParser,
}

impl StructureDispatcher {
    pub(crate) fn new(config: StructureConfig) -> Self {
        Self {
            latex: LatexParser::new(config.clone()),
            bibtex: BibtexParser::new(),
            doctex: DoctexParser::new(config),
        }
    }

    pub(crate) fn parser_for(&self, dialect: Dialect) -> &dyn StructureParser {
        match dialect {
            Dialect::Latex => &self.latex,
            Dialect::Bibtex => &self.bibtex,
            Dialect::Doctex => &self.doctex,
        }
    }

    pub(crate) fn latex(&self) -> &LatexParser {
        &self.latex
    }

    /// Build the element tree of `document`.
    ///
    /// BibTeX and DocTeX are parsed from the document text. LaTeX is parsed
    /// from the file the document names, read through `resolver`; a LaTeX
    /// document that is not addressable yields no elements.
    pub(crate) fn extract(
        &self,
        document: &dyn SourceDocument,
        resolver: &dyn SourceResolver,
    ) -> Result<Vec<Element>, ParseError> {
        let dialect = Dialect::from_language_id(document.language_id());
        let input = match dialect {
            Dialect::Bibtex | Dialect::Doctex => ParseInput::Text(document.text()),
            Dialect::Latex => match document.identity().path() {
                Some(path) if document.is_addressable() => ParseInput::File(path),
                _ => {
                    debug!(uri:% = document.identity(); "Skipping unaddressable LaTeX document");
                    return Ok(Vec::new());
                }
            },
        };

        debug!(dialect:% = dialect; "Dispatching document");
        self.parser_for(dialect).parse(input, resolver)
    }
}
