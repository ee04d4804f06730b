//! CLI logic for the texoutline tool.
//!
//! This module contains the core CLI logic: loading the document, building
//! its outline and printing it.

pub mod error_adapter;

mod args;
mod config;
mod output;

pub use args::{Args, OutputFormat};

use std::{
    fs,
    io::{self, Read, Write},
    path::Path,
};

use log::{info, warn};

use texoutline::{
    OutlineBuilder, OutlineError,
    dialect::Dialect,
    document::{SourceDocument, TextDocument},
};

/// Run the texoutline CLI application
///
/// Outlines the input document, or with `--subfiles` every file reachable
/// from it, and writes the result to `out`.
///
/// # Errors
///
/// Returns `OutlineError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
pub fn run(args: &Args, out: &mut dyn Write) -> Result<(), OutlineError> {
    info!(
        input_path = args.input,
        format:? = args.format;
        "Outlining document"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let builder = OutlineBuilder::new(app_config);

    if args.subfiles {
        return run_project(args, &builder, out);
    }

    let document = load_document(args)?;
    let symbols = builder.document_symbols(&document)?;

    match args.format {
        OutputFormat::Tree => output::write_tree(out, &symbols)?,
        OutputFormat::Json => output::write_json(out, &symbols)?,
    }

    info!(symbols = symbols.len(); "Outline written");
    Ok(())
}

fn run_project(
    args: &Args,
    builder: &OutlineBuilder,
    out: &mut dyn Write,
) -> Result<(), OutlineError> {
    if args.reads_stdin() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "--subfiles needs a file path, not standard input",
        )
        .into());
    }

    let project = builder.project_structure(Path::new(&args.input))?;

    match args.format {
        OutputFormat::Tree => output::write_project_tree(out, &project)?,
        OutputFormat::Json => output::write_project_json(out, &project)?,
    }

    info!(
        files = project.files().len(),
        warnings = project.warnings().len();
        "Project outline written"
    );
    Ok(())
}

/// Read the input named on the command line.
///
/// Standard input becomes a virtual document; everything else is a file.
fn load_document(args: &Args) -> Result<TextDocument, OutlineError> {
    if args.reads_stdin() {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        let language_id = args.language.as_deref().unwrap_or("latex");
        if Dialect::from_language_id(language_id) == Dialect::Latex {
            warn!("LaTeX from standard input has no file to read; the outline is empty");
        }
        return Ok(TextDocument::virtual_document("stdin", language_id, text));
    }

    let path = Path::new(&args.input);
    let text = fs::read_to_string(path)?;
    let language_id = match &args.language {
        Some(language_id) => language_id.as_str(),
        None => Dialect::from_path(path).language_id(),
    };
    let document = TextDocument::file(path, language_id, text);
    info!(language = document.language_id(); "Document loaded");

    Ok(document)
}
