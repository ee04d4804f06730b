//! texoutline - document outlines for the TeX family.
//!
//! Extracts the structure of LaTeX, BibTeX and DocTeX documents and
//! presents it as LSP document symbols.
//!
//! # Examples
//!
//! ```
//! use texoutline::{
//!     OutlineBuilder, config::AppConfig, document::TextDocument, parser::MemoryResolver,
//! };
//!
//! let resolver = MemoryResolver::new()
//!     .with_file("/doc/main.tex", "\\section{Intro}\n\\label{sec:intro}\n");
//! let builder = OutlineBuilder::with_resolver(AppConfig::default(), resolver);
//!
//! let doc = TextDocument::file("/doc/main.tex", "latex", "");
//! let symbols = builder.document_symbols(&doc).unwrap();
//!
//! assert_eq!(symbols[0].name, "1 Intro");
//! ```

pub mod config;
pub mod document;
pub mod notify;
pub mod symbols;

mod dispatch;
mod error;

pub use texoutline_core::{dialect, element, lines};
pub use texoutline_parser as parser;

pub use lsp_types::{DocumentSymbol, SymbolKind};

pub use error::OutlineError;

use std::path::Path;

use log::{debug, error, info, trace};

use texoutline_core::element::Element;
use texoutline_parser::{FsResolver, ProjectStructure, SourceResolver};

use config::AppConfig;
use dispatch::StructureDispatcher;
use document::SourceDocument;

/// Entry point for outline requests.
///
/// Holds the configuration and the [`SourceResolver`] that LaTeX files are
/// read through. Every request builds a fresh tree; nothing is cached
/// between calls.
///
/// # Examples
///
/// ```rust,no_run
/// use texoutline::{OutlineBuilder, document::TextDocument};
///
/// let builder = OutlineBuilder::default();
/// let doc = TextDocument::open("thesis.tex").expect("Failed to read");
///
/// for symbol in builder.provide_document_symbols(&doc) {
///     println!("{}", symbol.name);
/// }
/// ```
#[derive(Debug)]
pub struct OutlineBuilder<R = FsResolver> {
    config: AppConfig,
    resolver: R,
}

impl OutlineBuilder {
    /// Create a builder that reads LaTeX files from the file system.
    ///
    /// # Arguments
    ///
    /// * `config` - Which constructs appear in the outline
    pub fn new(config: AppConfig) -> Self {
        Self::with_resolver(config, FsResolver)
    }
}

impl Default for OutlineBuilder {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl<R: SourceResolver> OutlineBuilder<R> {
    /// Create a builder that reads LaTeX files through `resolver`.
    pub fn with_resolver(config: AppConfig, resolver: R) -> Self {
        Self { config, resolver }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Build the element tree of `document`.
    ///
    /// # Errors
    ///
    /// Returns [`OutlineError::Config`] for an invalid configuration and
    /// [`OutlineError::Parse`] when the source cannot be read or parsed.
    pub fn extract_structure(
        &self,
        document: &dyn SourceDocument,
    ) -> Result<Vec<Element>, OutlineError> {
        info!(uri:% = document.identity(), language = document.language_id(); "Extracting structure");

        let dispatcher = StructureDispatcher::new(self.config.structure_config()?);
        let elements = dispatcher
            .extract(document, &self.resolver)
            .map_err(|err| OutlineError::new_parse_error(err, document.text()))?;

        debug!(
            roots = elements.len(),
            elements = elements.iter().map(Element::count).sum::<usize>();
            "Structure extracted"
        );
        trace!(elements:?; "Element tree");

        Ok(elements)
    }

    /// Build the document symbols of `document`.
    ///
    /// # Errors
    ///
    /// Same as [`extract_structure`](Self::extract_structure).
    pub fn document_symbols(
        &self,
        document: &dyn SourceDocument,
    ) -> Result<Vec<DocumentSymbol>, OutlineError> {
        let elements = self.extract_structure(document)?;
        Ok(symbols::project(&elements))
    }

    /// Answer an editor's outline request.
    ///
    /// Failures are logged and produce an empty outline.
    pub fn provide_document_symbols(&self, document: &dyn SourceDocument) -> Vec<DocumentSymbol> {
        match self.document_symbols(document) {
            Ok(symbols) => symbols,
            Err(err) => {
                error!(uri:% = document.identity(), err:%; "Outline request failed");
                Vec::new()
            }
        }
    }

    /// Build the structure of `root` and every file it includes.
    ///
    /// # Errors
    ///
    /// Returns [`OutlineError::Config`] for an invalid configuration and
    /// [`OutlineError::Parse`] when `root` itself cannot be read.
    pub fn project_structure(&self, root: &Path) -> Result<ProjectStructure, OutlineError> {
        info!(root:? = root; "Extracting project structure");

        let dispatcher = StructureDispatcher::new(self.config.structure_config()?);
        let project = dispatcher
            .latex()
            .parse_project(root, &self.resolver)
            .map_err(|err| OutlineError::new_parse_error(err, ""))?;

        debug!(files = project.files().len(); "Project structure extracted");
        Ok(project)
    }
}
