use std::fs;

use tempfile::tempdir;

use texoutline::OutlineError;
use texoutline_cli::{Args, OutputFormat, run};

fn run_to_string(args: &Args) -> Result<String, OutlineError> {
    let mut out = Vec::new();
    run(args, &mut out)?;
    Ok(String::from_utf8(out).expect("Output is UTF-8"))
}

#[test]
fn e2e_latex_tree() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let main = temp_dir.path().join("paper.tex");
    fs::write(
        &main,
        "\\documentclass{article}\n\
         \\begin{document}\n\
         \\section{Introduction}\n\
         \\label{sec:intro}\n\
         \\begin{table}\n\
         \\caption{Results}\n\
         \\end{table}\n\
         \\section{Conclusion}\n\
         \\end{document}\n",
    )
    .unwrap();

    let output = run_to_string(&Args::new(main.to_string_lossy())).expect("Failed to outline");
    let lines: Vec<_> = output.lines().collect();

    assert_eq!(lines[0], "Section 1 Introduction [3-7]");
    assert_eq!(lines[1], "  Command #label: sec:intro [4-4]");
    assert!(lines[2].starts_with("  Environment Table"));
    assert_eq!(lines[3], "Section 2 Conclusion [8-9]");
    assert_eq!(lines.len(), 4);
}

#[test]
fn e2e_bibtex_json() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let refs = temp_dir.path().join("refs.bib");
    fs::write(&refs, "@misc{web, url = {https://example.org}}\n").unwrap();

    let args = Args {
        format: OutputFormat::Json,
        ..Args::new(refs.to_string_lossy())
    };
    let output = run_to_string(&args).expect("Failed to outline");

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value[0]["name"], "misc: web");
    assert_eq!(value[0]["children"][0]["name"], "url: https://example.org");
}

#[test]
fn e2e_language_override() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let refs = temp_dir.path().join("refs.txt");
    fs::write(&refs, "@book{k, year = 2001}").unwrap();

    let args = Args {
        language: Some("bibtex".to_string()),
        ..Args::new(refs.to_string_lossy())
    };
    let output = run_to_string(&args).expect("Failed to outline");
    assert!(output.starts_with("Entry book: k [1-1]"));
}

#[test]
fn e2e_broken_bibtex_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let refs = temp_dir.path().join("broken.bib");
    fs::write(&refs, "@article{a, title = {never closed\n").unwrap();

    let result = run_to_string(&Args::new(refs.to_string_lossy()));
    assert!(matches!(result, Err(OutlineError::Parse { .. })));
}

#[test]
fn e2e_missing_input_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let args = Args::new(temp_dir.path().join("nope.tex").to_string_lossy());

    assert!(matches!(run_to_string(&args), Err(OutlineError::Io(_))));
}

#[test]
fn e2e_subfiles() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let main = temp_dir.path().join("main.tex");
    fs::create_dir(temp_dir.path().join("chapters")).unwrap();
    fs::write(&main, "\\include{chapters/one}\n\\include{chapters/two}\n").unwrap();
    fs::write(temp_dir.path().join("chapters/one.tex"), "\\chapter{One}\n").unwrap();

    let args = Args {
        subfiles: true,
        ..Args::new(main.to_string_lossy())
    };
    let output = run_to_string(&args).expect("Failed to outline project");

    assert!(output.contains("chapters/one.tex\n  Section 1 One [1-2]\n"));
    assert!(output.lines().last().unwrap().starts_with("warning[E201]"));
}

#[test]
fn e2e_subfiles_rejects_stdin() {
    let args = Args {
        subfiles: true,
        ..Args::new("-")
    };
    assert!(matches!(run_to_string(&args), Err(OutlineError::Io(_))));
}

#[test]
fn e2e_explicit_config() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let main = temp_dir.path().join("main.tex");
    let config = temp_dir.path().join("config.toml");
    fs::write(&main, "\\section{Plain}\n").unwrap();
    fs::write(&config, "[outline]\nnumbers = false\n").unwrap();

    let args = Args {
        config: Some(config.to_string_lossy().to_string()),
        ..Args::new(main.to_string_lossy())
    };
    let output = run_to_string(&args).expect("Failed to outline");
    assert_eq!(output, "Section Plain [1-2]\n");
}
