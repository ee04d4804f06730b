//! Printing outlines.

use std::io::{self, Write};

use serde::Serialize;

use texoutline::{DocumentSymbol, SymbolKind, symbols};
use texoutline_parser::ProjectStructure;

const KIND_NAMES: [(SymbolKind, &str); 7] = [
    (SymbolKind::MODULE, "Section"),
    (SymbolKind::CLASS, "Environment"),
    (SymbolKind::METHOD, "Command"),
    (SymbolKind::INTERFACE, "SubFile"),
    (SymbolKind::PACKAGE, "Entry"),
    (SymbolKind::PROPERTY, "Field"),
    (SymbolKind::CONSTANT, "Other"),
];

fn kind_name(kind: SymbolKind) -> &'static str {
    KIND_NAMES
        .iter()
        .find(|(k, _)| *k == kind)
        .map_or("Symbol", |(_, name)| name)
}

/// Print one line per symbol, children indented below their parent.
///
/// Line numbers are shown one-based.
pub fn write_tree(out: &mut dyn Write, symbols: &[DocumentSymbol]) -> io::Result<()> {
    write_tree_at(out, symbols, 0)
}

fn write_tree_at(out: &mut dyn Write, symbols: &[DocumentSymbol], depth: usize) -> io::Result<()> {
    for symbol in symbols {
        writeln!(
            out,
            "{:indent$}{} {} [{}-{}]",
            "",
            kind_name(symbol.kind),
            symbol.name,
            symbol.range.start.line + 1,
            symbol.range.end.line + 1,
            indent = depth * 2,
        )?;
        if let Some(children) = &symbol.children {
            write_tree_at(out, children, depth + 1)?;
        }
    }
    Ok(())
}

pub fn write_json(out: &mut dyn Write, value: &impl Serialize) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

#[derive(Debug, Serialize)]
struct FileOutline {
    path: String,
    symbols: Vec<DocumentSymbol>,
}

#[derive(Debug, Serialize)]
struct ProjectOutline {
    files: Vec<FileOutline>,
    warnings: Vec<String>,
}

impl From<&ProjectStructure> for ProjectOutline {
    fn from(project: &ProjectStructure) -> Self {
        Self {
            files: project
                .files()
                .iter()
                .map(|file| FileOutline {
                    path: file.path().display().to_string(),
                    symbols: symbols::project(file.elements()),
                })
                .collect(),
            warnings: project.warnings().iter().map(ToString::to_string).collect(),
        }
    }
}

/// Print every file of a project with its outline, then the inclusion warnings.
pub fn write_project_tree(out: &mut dyn Write, project: &ProjectStructure) -> io::Result<()> {
    let outline = ProjectOutline::from(project);
    for file in &outline.files {
        writeln!(out, "{}", file.path)?;
        write_tree_at(out, &file.symbols, 1)?;
    }
    for warning in &outline.warnings {
        writeln!(out, "{warning}")?;
    }
    Ok(())
}

pub fn write_project_json(out: &mut dyn Write, project: &ProjectStructure) -> io::Result<()> {
    write_json(out, &ProjectOutline::from(project))
}
