//! Document dialects understood by the structure engine.

use std::{fmt, path::Path};

use log::trace;

/// The sub-language a document is written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// LaTeX and every language id without a dedicated parser.
    #[default]
    Latex,
    /// BibTeX bibliography databases.
    Bibtex,
    /// DocTeX documented sources (`.dtx`).
    Doctex,
}

impl Dialect {
    /// Map an editor language id to a dialect.
    ///
    /// Only `bibtex` and `doctex` have dedicated parsers. Every other id,
    /// including `latex-expl3` and the weave variants, is LaTeX.
    pub fn from_language_id(language_id: &str) -> Self {
        match language_id {
            "bibtex" => Dialect::Bibtex,
            "doctex" => Dialect::Doctex,
            "latex" => Dialect::Latex,
            other => {
                trace!(language_id = other; "No dedicated dialect, using LaTeX");
                Dialect::Latex
            }
        }
    }

    /// Guess the dialect of a file from its extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("bib") => Dialect::Bibtex,
            Some(ext) if ext.eq_ignore_ascii_case("dtx") => Dialect::Doctex,
            _ => Dialect::Latex,
        }
    }

    /// The canonical language id of this dialect.
    pub fn language_id(&self) -> &'static str {
        match self {
            Dialect::Latex => "latex",
            Dialect::Bibtex => "bibtex",
            Dialect::Doctex => "doctex",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.language_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_ids() {
        assert_eq!(Dialect::from_language_id("bibtex"), Dialect::Bibtex);
        assert_eq!(Dialect::from_language_id("doctex"), Dialect::Doctex);
        assert_eq!(Dialect::from_language_id("latex"), Dialect::Latex);
        assert_eq!(Dialect::from_language_id("latex-expl3"), Dialect::Latex);
        assert_eq!(Dialect::from_language_id("rsweave"), Dialect::Latex);
        assert_eq!(Dialect::from_language_id(""), Dialect::Latex);
    }

    #[test]
    fn test_paths() {
        assert_eq!(Dialect::from_path(Path::new("refs.bib")), Dialect::Bibtex);
        assert_eq!(Dialect::from_path(Path::new("pkg/foo.DTX")), Dialect::Doctex);
        assert_eq!(Dialect::from_path(Path::new("main.tex")), Dialect::Latex);
        assert_eq!(Dialect::from_path(Path::new("Makefile")), Dialect::Latex);
    }

    #[test]
    fn test_language_id_round_trip() {
        for dialect in [Dialect::Latex, Dialect::Bibtex, Dialect::Doctex] {
            assert_eq!(Dialect::from_language_id(dialect.language_id()), dialect);
        }
    }
}
