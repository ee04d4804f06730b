//! Integration tests for the OutlineBuilder API
//!
//! These tests run the public API against real files on disk.

use std::{cell::RefCell, fs};

use texoutline::{
    OutlineBuilder, SymbolKind,
    document::{SourceDocument, TextDocument},
    notify::UpdateChannel,
};

#[test]
fn test_builder_api_exists() {
    let _builder = OutlineBuilder::default();
}

#[test]
fn test_outline_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let main = dir.path().join("main.tex");
    fs::write(
        &main,
        "\\chapter{Start}\n\\section{Scope}\n\\input{body}\n\\chapter{End}\n",
    )
    .unwrap();

    let builder = OutlineBuilder::default();
    let doc = TextDocument::open(&main).expect("Failed to read main.tex");
    let symbols = builder.document_symbols(&doc).expect("Failed to outline");

    let names: Vec<_> = symbols.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["1 Start", "2 End"]);

    let scope = &symbols[0].children.as_ref().unwrap()[0];
    assert_eq!(scope.name, "1.1 Scope");
    let input = &scope.children.as_ref().unwrap()[0];
    assert_eq!(input.kind, SymbolKind::INTERFACE);
}

#[test]
fn test_bibliography_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let refs = dir.path().join("refs.bib");
    fs::write(
        &refs,
        "@article{knuth84,\n  author = {Donald Knuth},\n  year = 1984\n}\n",
    )
    .unwrap();

    let doc = TextDocument::open(&refs).unwrap();
    let symbols = OutlineBuilder::default().provide_document_symbols(&doc);

    assert_eq!(symbols.len(), 1);
    assert_eq!(symbols[0].name, "article: knuth84");
    assert_eq!(symbols[0].kind, SymbolKind::PACKAGE);

    let fields = symbols[0].children.as_ref().unwrap();
    assert_eq!(fields.len(), 2);
    assert!(fields.iter().all(|f| f.kind == SymbolKind::PROPERTY));
    assert_eq!(fields[1].name, "year: 1984");
}

#[test]
fn test_project_walk_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("parts")).unwrap();
    let main = dir.path().join("main.tex");
    fs::write(&main, "\\include{parts/a}\n\\include{parts/missing}\n").unwrap();
    fs::write(dir.path().join("parts/a.tex"), "\\section{A}\n\\input{main}\n").unwrap();

    let project = OutlineBuilder::default()
        .project_structure(&main)
        .expect("Failed to walk project");

    assert_eq!(project.files().len(), 2);
    // One missing file, one cycle back to main.tex
    assert_eq!(project.warnings().len(), 2);
}

#[test]
fn test_updates_reach_consumer() {
    let dir = tempfile::tempdir().unwrap();
    let main = dir.path().join("main.tex");
    fs::write(&main, "\\section{A}\n").unwrap();

    let updated = RefCell::new(Vec::new());
    let channel = UpdateChannel::bind(|file: &str| updated.borrow_mut().push(file.to_string()));

    let builder = OutlineBuilder::default();
    let doc = TextDocument::open(&main).unwrap();
    if builder.extract_structure(&doc).is_ok() {
        channel.emit(&doc.identity().to_string());
    }

    assert_eq!(*updated.borrow(), [main.display().to_string()]);
}
