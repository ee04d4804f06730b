//! Document handles accepted by the outline engine.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use texoutline_core::dialect::Dialect;

/// Where a document lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocumentUri {
    /// A file on durable storage.
    File(PathBuf),
    /// An unsaved buffer or any other non-file resource.
    Virtual(String),
}

impl DocumentUri {
    /// The file path, for file-backed documents.
    pub fn path(&self) -> Option<&Path> {
        match self {
            DocumentUri::File(path) => Some(path),
            DocumentUri::Virtual(_) => None,
        }
    }
}

impl fmt::Display for DocumentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentUri::File(path) => write!(f, "{}", path.display()),
            DocumentUri::Virtual(uri) => write!(f, "{uri}"),
        }
    }
}

/// A document the engine can outline.
///
/// Editors implement this for their own buffer type. [`TextDocument`] is
/// the bundled implementation.
pub trait SourceDocument {
    /// Editor language id, such as `latex` or `bibtex`.
    fn language_id(&self) -> &str;

    fn identity(&self) -> &DocumentUri;

    /// Current content of the document.
    fn text(&self) -> &str;

    /// Whether the document is backed by a file.
    fn is_addressable(&self) -> bool {
        self.identity().path().is_some()
    }
}

/// An owned document snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDocument {
    uri: DocumentUri,
    language_id: String,
    text: String,
}

impl TextDocument {
    pub fn new(uri: DocumentUri, language_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            uri,
            language_id: language_id.into(),
            text: text.into(),
        }
    }

    /// A file-backed document with the given content.
    pub fn file(
        path: impl Into<PathBuf>,
        language_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self::new(DocumentUri::File(path.into()), language_id, text)
    }

    /// A document that exists only in memory, such as an untitled buffer.
    pub fn virtual_document(
        uri: impl Into<String>,
        language_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self::new(DocumentUri::Virtual(uri.into()), language_id, text)
    }

    /// Read a file from disk, guessing its language from the extension.
    ///
    /// # Errors
    ///
    /// Returns the I/O error when the file cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let text = fs::read_to_string(&path)?;
        let language_id = Dialect::from_path(&path).language_id();
        Ok(Self::file(path, language_id, text))
    }
}

impl SourceDocument for TextDocument {
    fn language_id(&self) -> &str {
        &self.language_id
    }

    fn identity(&self) -> &DocumentUri {
        &self.uri
    }

    fn text(&self) -> &str {
        &self.text
    }
}
