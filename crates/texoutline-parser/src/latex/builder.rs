//! Single-pass construction of the LaTeX element tree.
//!
//! The builder walks the token stream once, keeping the open sections and
//! environments on a stack. An element is attached to its parent when it
//! closes, so every finished element already holds all of its children.

use winnow::stream::{Stream, TokenSlice};

use texoutline_core::{
    element::{Element, ElementKind},
    lines::LineIndex,
};

use crate::{
    config::StructureConfig,
    latex::args::{self, Input},
    lexer::tokenize,
    span::Span,
    tokens::Token,
};

/// Environments whose content is not TeX.
const VERBATIM_ENVIRONMENTS: [&str; 6] = [
    "verbatim",
    "verbatim*",
    "Verbatim",
    "lstlisting",
    "minted",
    "comment",
];

/// Where an inclusion target is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IncludeBase {
    /// The directory of the root document.
    Root,
    /// The directory of the file containing the directive.
    Current,
}

/// An inclusion directive found while building.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Inclusion {
    /// The target as written, with the `\import` directory prepended.
    pub target: String,
    pub base: IncludeBase,
    pub span: Span,
}

/// The element tree of one source plus the inclusions it names.
#[derive(Debug, Default)]
pub(crate) struct Outline {
    pub elements: Vec<Element>,
    pub inclusions: Vec<Inclusion>,
}

#[derive(Debug)]
enum FrameKind {
    Section { level: usize },
    Environment { name: String, captioned: bool },
}

/// An element that is still open.
#[derive(Debug)]
struct Frame {
    element: Element,
    kind: FrameKind,
}

impl Frame {
    fn is_environment(&self, env: &str) -> bool {
        matches!(&self.kind, FrameKind::Environment { name, .. } if name == env)
    }
}

/// Build the outline of a LaTeX source.
pub(crate) fn build(config: &StructureConfig, source: &str) -> Outline {
    let tokens = tokenize(source);
    let mut input = TokenSlice::new(&tokens);
    let mut builder = Builder::new(config, LineIndex::new(source));

    let end_line = builder.run(&mut input);
    builder.finish(end_line)
}

struct Builder<'a> {
    config: &'a StructureConfig,
    lines: LineIndex,
    roots: Vec<Element>,
    stack: Vec<Frame>,
    counters: Vec<u32>,
    inclusions: Vec<Inclusion>,
}

impl<'a> Builder<'a> {
    fn new(config: &'a StructureConfig, lines: LineIndex) -> Self {
        Self {
            config,
            lines,
            roots: Vec::new(),
            stack: Vec::new(),
            counters: vec![0; config.section_depth()],
            inclusions: Vec::new(),
        }
    }

    /// Consume the token stream. Returns the line the document ends on.
    fn run(&mut self, input: &mut Input<'_>) -> u32 {
        while let Some(token) = input.next_token() {
            let Token::Command(name) = token.token else {
                continue;
            };
            let line = self.lines.line_of(token.span.start());

            match name {
                "begin" => self.begin(input, line),
                "end" => {
                    if self.end(input, line) {
                        return line;
                    }
                }
                _ => self.command(name, token.span, input, line),
            }
        }
        self.lines.last_line()
    }

    fn finish(mut self, end_line: u32) -> Outline {
        while !self.stack.is_empty() {
            self.close_top(end_line);
        }
        Outline {
            elements: self.roots,
            inclusions: self.inclusions,
        }
    }

    fn begin(&mut self, input: &mut Input<'_>, line: u32) {
        let Some(name) = args::required(input).map(|arg| arg.text()) else {
            return;
        };

        if VERBATIM_ENVIRONMENTS.contains(&name.as_str()) {
            skip_verbatim(input, &name);
            return;
        }
        if !self.config.tracks_environment(&name) {
            return;
        }

        let mut label = capitalize(&name);
        let mut captioned = false;
        if self.config.captions() && name == "frame" {
            args::optionals(input);
            if let Some(title) = args::required(input).map(|arg| arg.text()) {
                label = format!("{label}: {title}");
                captioned = true;
            }
        }

        self.stack.push(Frame {
            element: Element::new(ElementKind::Environment, label, line, line),
            kind: FrameKind::Environment { name, captioned },
        });
    }

    /// Handle `\end{..}`. Returns `true` on `\end{document}`.
    fn end(&mut self, input: &mut Input<'_>, line: u32) -> bool {
        let Some(name) = args::required(input).map(|arg| arg.text()) else {
            return false;
        };
        if name == "document" {
            return true;
        }

        if let Some(position) = self.stack.iter().rposition(|frame| frame.is_environment(&name)) {
            while self.stack.len() > position {
                self.close_top(line);
            }
        }
        false
    }

    fn command(&mut self, name: &str, span: Span, input: &mut Input<'_>, line: u32) {
        if let Some(level) = self.config.section_level(name) {
            self.section(level, input, line);
        } else if self.config.captions() && matches!(name, "caption" | "frametitle") {
            self.caption(input);
        } else if let Some(arity) = inclusion_arity(name) {
            self.inclusion(name, arity, span, input, line);
        } else if self.config.tracks_command(name) {
            args::star(input);
            args::optionals(input);
            if let Some(arg) = args::required(input) {
                self.attach(Element::new(
                    ElementKind::Command,
                    format!("#{name}: {}", arg.text()),
                    line,
                    line,
                ));
            }
        }
    }

    fn section(&mut self, level: usize, input: &mut Input<'_>, line: u32) {
        let starred = args::star(input);
        args::optionals(input);
        let Some(title) = args::required(input).map(|arg| arg.text()) else {
            return;
        };

        while matches!(
            self.stack.last(),
            Some(Frame { kind: FrameKind::Section { level: open }, .. }) if *open >= level
        ) {
            self.close_top(line.saturating_sub(1));
        }

        let element = if starred {
            Element::new(ElementKind::SectionStar, title, line, line)
        } else {
            let label = self.number(level, title);
            Element::new(ElementKind::Section, label, line, line)
        };
        self.stack.push(Frame {
            element,
            kind: FrameKind::Section { level },
        });
    }

    /// Step the counters for a numbered section and build its label.
    fn number(&mut self, level: usize, title: String) -> String {
        self.counters[level] += 1;
        for counter in &mut self.counters[level + 1..] {
            *counter = 0;
        }
        if !self.config.numbers() {
            return title;
        }

        let used = &self.counters[..=level];
        let first = used.iter().position(|&c| c > 0).unwrap_or(level);
        let number = used[first..]
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(".");
        format!("{number} {title}")
    }

    /// Append a caption to the innermost environment, once.
    fn caption(&mut self, input: &mut Input<'_>) {
        args::star(input);
        args::optionals(input);
        let Some(caption) = args::required(input).map(|arg| arg.text()) else {
            return;
        };

        let innermost = self
            .stack
            .iter_mut()
            .rev()
            .find(|frame| matches!(frame.kind, FrameKind::Environment { .. }));
        if let Some(Frame {
            element,
            kind: FrameKind::Environment { captioned, .. },
        }) = innermost
        {
            if !*captioned {
                let label = format!("{}: {caption}", element.label());
                element.set_label(label);
                *captioned = true;
            }
        }
    }

    fn inclusion(&mut self, name: &str, arity: usize, span: Span, input: &mut Input<'_>, line: u32) {
        args::star(input);
        let (target, end) = if arity == 2 {
            let (Some(directory), Some(file)) = (args::required(input), args::required(input)) else {
                return;
            };
            (join_target(&directory.text(), &file.text()), file.span())
        } else if let Some(file) = args::required(input) {
            (file.text(), file.span())
        } else if name == "input" {
            let Some((word, word_span)) = args::bare_word(input) else {
                return;
            };
            (word.to_string(), word_span)
        } else {
            return;
        };

        if target.is_empty() {
            return;
        }

        let base = if name.starts_with("sub") || name == "import" {
            IncludeBase::Current
        } else {
            IncludeBase::Root
        };
        self.attach(Element::new(ElementKind::SubFile, target.clone(), line, line));
        self.inclusions.push(Inclusion {
            target,
            base,
            span: span.union(end),
        });
    }

    /// Attach a finished element to the innermost open element.
    fn attach(&mut self, element: Element) {
        match self.stack.last_mut() {
            Some(frame) => frame.element.push_child(element),
            None => self.roots.push(element),
        }
    }

    /// Close the innermost open element at `line_to`, clamped so the span
    /// covers the element's own line and all of its children.
    fn close_top(&mut self, line_to: u32) {
        let Some(Frame { mut element, .. }) = self.stack.pop() else {
            return;
        };
        let line_to = line_to
            .max(element.line_from())
            .max(element.last_child_line().unwrap_or(0));
        element.set_line_to(line_to);
        self.attach(element);
    }
}

/// Number of path arguments of an inclusion command.
fn inclusion_arity(name: &str) -> Option<usize> {
    match name {
        "input" | "include" | "subfile" | "InputIfFileExists" => Some(1),
        "import" | "subimport" | "inputfrom" | "includefrom" | "subinputfrom"
        | "subincludefrom" => Some(2),
        _ => None,
    }
}

fn join_target(directory: &str, file: &str) -> String {
    if directory.is_empty() || directory.ends_with('/') {
        format!("{directory}{file}")
    } else {
        format!("{directory}/{file}")
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Skip to the matching `\end{name}`.
fn skip_verbatim(input: &mut Input<'_>, name: &str) {
    while let Some(token) = input.next_token() {
        if token.token == Token::Command("end")
            && args::required(input).is_some_and(|arg| arg.text() == name)
        {
            return;
        }
    }
}
