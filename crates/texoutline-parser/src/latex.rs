//! LaTeX structure extraction.
//!
//! [`LatexParser`] builds the element tree of a single file, and can walk
//! a whole project through its inclusion directives with
//! [`LatexParser::parse_project`].

mod args;
mod builder;

use std::{
    io,
    path::{Component, Path, PathBuf},
};

use indexmap::IndexSet;
use log::{debug, trace, warn};

use texoutline_core::{dialect::Dialect, element::Element};

use crate::{
    ParseInput, StructureParser,
    config::StructureConfig,
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    resolver::SourceResolver,
};

use builder::{IncludeBase, Inclusion};

/// The element tree of one file of a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStructure {
    path: PathBuf,
    elements: Vec<Element>,
}

impl FileStructure {
    /// Normalized path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Top-level elements, in the file's own line coordinates.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }
}

/// The structure of every file reachable from a root document.
#[derive(Debug, Clone, Default)]
pub struct ProjectStructure {
    files: Vec<FileStructure>,
    warnings: Vec<Diagnostic>,
}

impl ProjectStructure {
    /// Files in first-visit (depth-first) order, the root first.
    pub fn files(&self) -> &[FileStructure] {
        &self.files
    }

    /// Inclusion problems found during the walk.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }
}

/// Structure parser for LaTeX documents.
#[derive(Debug, Clone, Default)]
pub struct LatexParser {
    config: StructureConfig,
}

impl LatexParser {
    pub fn new(config: StructureConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StructureConfig {
        &self.config
    }

    /// Build the element tree of a LaTeX source.
    ///
    /// Inclusion directives become [`SubFile`](texoutline_core::element::ElementKind::SubFile)
    /// placeholders; nothing is read.
    pub fn parse_text(&self, source: &str) -> Vec<Element> {
        builder::build(&self.config, source).elements
    }

    /// Read `path` through `resolver` and build its element tree.
    ///
    /// # Errors
    ///
    /// Returns `E200` when the file cannot be read.
    pub fn parse_file(
        &self,
        path: &Path,
        resolver: &dyn SourceResolver,
    ) -> Result<Vec<Element>, ParseError> {
        let source = ParseInput::File(path).load(resolver)?;
        let elements = self.parse_text(&source);
        debug!(file:? = path, elements = elements.len(); "LaTeX structure built");
        Ok(elements)
    }

    /// Walk the inclusion graph from `root` depth-first and build the tree
    /// of every reachable file.
    ///
    /// Each file is parsed once. Missing files, cycles and chains deeper
    /// than [`StructureConfig::max_include_depth`] are reported as warnings
    /// in the result.
    ///
    /// # Errors
    ///
    /// Returns `E200` when `root` itself cannot be read.
    pub fn parse_project(
        &self,
        root: &Path,
        resolver: &dyn SourceResolver,
    ) -> Result<ProjectStructure, ParseError> {
        let root = normalize(root);
        let source = ParseInput::File(&root).load(resolver)?.into_owned();

        let mut walk = ProjectWalk {
            config: &self.config,
            resolver,
            root_dir: root.parent().map(Path::to_path_buf).unwrap_or_default(),
            visited: IndexSet::new(),
            chain: IndexSet::new(),
            files: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
        };
        walk.visited.insert(root.clone());
        walk.visit(root, &source);

        let files = walk.files;
        let warnings = walk.diagnostics.finish()?;
        debug!(files = files.len(), warnings = warnings.len(); "Project structure built");

        Ok(ProjectStructure { files, warnings })
    }
}

impl StructureParser for LatexParser {
    fn dialect(&self) -> Dialect {
        Dialect::Latex
    }

    fn parse(
        &self,
        input: ParseInput<'_>,
        resolver: &dyn SourceResolver,
    ) -> Result<Vec<Element>, ParseError> {
        match input {
            ParseInput::File(path) => self.parse_file(path, resolver),
            ParseInput::Text(text) => Ok(self.parse_text(text)),
        }
    }
}

struct ProjectWalk<'a> {
    config: &'a StructureConfig,
    resolver: &'a dyn SourceResolver,
    root_dir: PathBuf,
    /// Every file parsed so far.
    visited: IndexSet<PathBuf>,
    /// The inclusion chain from the root to the file being visited.
    chain: IndexSet<PathBuf>,
    files: Vec<FileStructure>,
    diagnostics: DiagnosticCollector,
}

impl ProjectWalk<'_> {
    fn visit(&mut self, file: PathBuf, source: &str) {
        trace!(file:? = file, depth = self.chain.len(); "Visiting file");
        let outline = builder::build(self.config, source);

        self.chain.insert(file.clone());
        self.files.push(FileStructure {
            path: file.clone(),
            elements: outline.elements,
        });
        for inclusion in &outline.inclusions {
            self.follow(&file, inclusion);
        }
        self.chain.pop();
    }

    fn follow(&mut self, from: &Path, inclusion: &Inclusion) {
        let target = self.resolve(from, inclusion);

        if self.chain.contains(&target) {
            let chain = self
                .chain
                .iter()
                .chain(std::iter::once(&target))
                .map(|path| path.display().to_string())
                .collect::<Vec<_>>()
                .join(" -> ");
            warn!(file:? = from, target:? = target; "Inclusion cycle");
            self.diagnostics.emit(
                Diagnostic::warning(format!("inclusion cycle: {chain}"))
                    .with_code(ErrorCode::E202)
                    .with_help("the included file is outlined only once"),
            );
            return;
        }
        if self.visited.contains(&target) {
            return;
        }
        if self.chain.len() > self.config.max_include_depth() {
            warn!(file:? = from, target:? = target; "Inclusion depth exceeded");
            self.diagnostics.emit(
                Diagnostic::warning(format!(
                    "`{}` is nested deeper than {} inclusions",
                    target.display(),
                    self.config.max_include_depth()
                ))
                .with_code(ErrorCode::E203),
            );
            return;
        }

        let source = if self.resolver.exists(&target) {
            self.resolver.read(&target)
        } else {
            Err(io::ErrorKind::NotFound.into())
        };
        match source {
            Ok(source) => {
                self.visited.insert(target.clone());
                self.visit(target, &source);
            }
            Err(err) => {
                warn!(file:? = from, target:? = target, err:? = err; "Included file not found");
                self.diagnostics.emit(
                    Diagnostic::warning(format!(
                        "included file `{}` not found (from `{}`)",
                        target.display(),
                        from.display()
                    ))
                    .with_code(ErrorCode::E201),
                );
            }
        }
    }

    fn resolve(&self, from: &Path, inclusion: &Inclusion) -> PathBuf {
        let base = match inclusion.base {
            IncludeBase::Root => self.root_dir.as_path(),
            IncludeBase::Current => from.parent().unwrap_or(Path::new("")),
        };
        let mut path = base.join(&inclusion.target);
        if path.extension().is_none() {
            path.set_extension("tex");
        }
        normalize(&path)
    }
}

/// Resolve `.` and `..` components without touching the file system.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir if normalized.file_name().is_some() => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}
