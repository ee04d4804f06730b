//! Command-line argument definitions for the texoutline CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the input document, its language, the
//! output format, configuration file and logging verbosity.

use clap::{Parser, ValueEnum};

/// How the outline is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One indented line per symbol
    #[default]
    Tree,
    /// The LSP `DocumentSymbol` array
    Json,
}

/// Command-line arguments for the texoutline tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input document, or `-` for standard input
    #[arg(help = "Path to the input file, or - for stdin")]
    pub input: String,

    /// Language id of the input (latex, bibtex, doctex, ...)
    ///
    /// Guessed from the file extension when omitted.
    #[arg(short, long)]
    pub language: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Tree)]
    pub format: OutputFormat,

    /// Outline every file reachable through `\input`, `\include` and friends
    #[arg(long)]
    pub subfiles: bool,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Args {
    /// Arguments for outlining `input` with every other option at its default.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            language: None,
            format: OutputFormat::default(),
            subfiles: false,
            config: None,
            log_level: "warn".to_string(),
        }
    }

    /// Whether the input is standard input.
    pub fn reads_stdin(&self) -> bool {
        self.input == "-"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["texoutline", "main.tex"]).unwrap();
        assert_eq!(args.input, "main.tex");
        assert_eq!(args.format, OutputFormat::Tree);
        assert!(!args.subfiles);
        assert!(!args.reads_stdin());
        assert_eq!(args.log_level, "warn");
    }

    #[test]
    fn test_all_options() {
        let args = Args::try_parse_from([
            "texoutline",
            "-",
            "--language",
            "bibtex",
            "--format",
            "json",
            "--subfiles",
            "--config",
            "outline.toml",
        ])
        .unwrap();

        assert!(args.reads_stdin());
        assert_eq!(args.language.as_deref(), Some("bibtex"));
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.subfiles);
        assert_eq!(args.config.as_deref(), Some("outline.toml"));
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(Args::try_parse_from(["texoutline", "a.tex", "--format", "xml"]).is_err());
    }
}
