//! BibTeX structure extraction.
//!
//! Every entry becomes a [`BibItem`](ElementKind::BibItem) with one
//! [`BibField`](ElementKind::BibField) child per field. `@string` macros are
//! expanded in later values, `@comment` and `@preamble` produce nothing, and
//! text between entries is ignored.
//!
//! Syntax errors are collected: after an error the parser resumes at the
//! next `@`, so one pass reports every broken entry. Any error fails the
//! parse as a whole.

use std::collections::HashMap;

use log::debug;
use winnow::{
    ModalResult, Parser as _,
    ascii::{digit1, multispace0},
    error::{AddContext, ContextError, ErrMode},
    stream::{LocatingSlice, Location, Offset as _, Stream},
    token::{one_of, take_till, take_while},
};

use texoutline_core::{
    dialect::Dialect,
    element::{Element, ElementKind},
    lines::LineIndex,
};

use crate::{
    ParseInput, StructureParser,
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    resolver::SourceResolver,
    span::Span,
};

/// Rich diagnostic information attached to BibTeX parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BibDiagnostic {
    code: ErrorCode,
    message: &'static str,
    help: Option<&'static str>,
    /// The error span covers from `start` to the error position.
    start: usize,
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError<BibDiagnostic>>;

const MONTHS: [(&str, &str); 12] = [
    ("jan", "January"),
    ("feb", "February"),
    ("mar", "March"),
    ("apr", "April"),
    ("may", "May"),
    ("jun", "June"),
    ("jul", "July"),
    ("aug", "August"),
    ("sep", "September"),
    ("oct", "October"),
    ("nov", "November"),
    ("dec", "December"),
];

fn cut(input: &Input<'_>, diagnostic: BibDiagnostic) -> ErrMode<ContextError<BibDiagnostic>> {
    ErrMode::Cut(ContextError::new().add_context(input, &input.checkpoint(), diagnostic))
}

fn ws(input: &mut Input<'_>) -> IResult<()> {
    multispace0.void().parse_next(input)
}

fn entry_type<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_' || c == '-').parse_next(input)
}

fn field_name<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    take_while(1.., |c: char| {
        c.is_alphanumeric() || matches!(c, '_' | '-' | ':' | '.' | '+' | '/')
    })
    .parse_next(input)
}

fn citation_key<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    take_while(1.., |c: char| {
        !c.is_whitespace() && !matches!(c, ',' | '{' | '}' | '(' | ')' | '=' | '"' | '#')
    })
    .parse_next(input)
}

/// Consume up to and including the `}` that balances an already consumed `{`.
///
/// Returns the text between the braces.
fn balanced<'a>(input: &mut Input<'a>, start: usize) -> IResult<&'a str> {
    let body_start = input.checkpoint();
    let mut depth = 0usize;
    loop {
        match input.next_token() {
            None => {
                return Err(cut(
                    input,
                    BibDiagnostic {
                        code: ErrorCode::E103,
                        message: "unterminated field value",
                        help: Some("add the closing `}`"),
                        start,
                    },
                ));
            }
            Some('{') => depth += 1,
            Some('}') if depth == 0 => break,
            Some('}') => depth -= 1,
            Some(_) => {}
        }
    }
    let len = input.offset_from(&body_start) - 1;
    input.reset(&body_start);
    let body = input.next_slice(len);
    input.next_token();
    Ok(body)
}

/// Consume a `"..."` value after its opening quote. Quotes inside braces
/// do not end the value.
fn quoted<'a>(input: &mut Input<'a>, start: usize) -> IResult<&'a str> {
    let body_start = input.checkpoint();
    let mut depth = 0usize;
    loop {
        match input.next_token() {
            None => {
                return Err(cut(
                    input,
                    BibDiagnostic {
                        code: ErrorCode::E103,
                        message: "unterminated field value",
                        help: Some("add the closing `\"`"),
                        start,
                    },
                ));
            }
            Some('{') => depth += 1,
            Some('}') => depth = depth.saturating_sub(1),
            Some('"') if depth == 0 => break,
            Some(_) => {}
        }
    }
    let len = input.offset_from(&body_start) - 1;
    input.reset(&body_start);
    let body = input.next_slice(len);
    input.next_token();
    Ok(body)
}

/// Strip grouping braces and collapse whitespace.
fn clean(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != '{' && *c != '}')
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reads the entries of one BibTeX source.
struct Reader {
    lines: LineIndex,
    macros: HashMap<String, String>,
    elements: Vec<Element>,
}

impl Reader {
    fn new(source: &str) -> Self {
        let macros = MONTHS
            .iter()
            .map(|(name, month)| ((*name).to_string(), (*month).to_string()))
            .collect();
        Self {
            lines: LineIndex::new(source),
            macros,
            elements: Vec::new(),
        }
    }

    fn line(&self, offset: usize) -> u32 {
        self.lines.line_of(offset)
    }

    /// Parse one `@...` block. Backtracks when the `@` does not start an
    /// entry at all.
    fn block(&mut self, input: &mut Input<'_>) -> IResult<()> {
        let start = input.current_token_start();
        '@'.parse_next(input)?;
        ws(input)?;
        let kind = entry_type(input)?.to_ascii_lowercase();
        ws(input)?;

        if kind == "comment" {
            if let Some(open) = input.peek_token().filter(|c| matches!(*c, '{' | '(')) {
                input.next_token();
                skip_comment(input, open);
            }
            return Ok(());
        }

        let close = one_of(['{', '('])
            .map(|open| if open == '{' { '}' } else { ')' })
            .parse_next(input)?;

        match kind.as_str() {
            "preamble" => {
                ws(input)?;
                self.value(input)?;
                ws(input)?;
                closing(input, close, start)?;
            }
            "string" => {
                loop {
                    ws(input)?;
                    if eat(input, close) {
                        break;
                    }
                    let (name, value, _) = self.field(input)?;
                    self.macros.insert(name.to_ascii_lowercase(), value);
                    ws(input)?;
                    if !eat(input, ',') {
                        closing(input, close, start)?;
                        break;
                    }
                }
            }
            _ => self.entry(input, kind, close, start)?,
        }
        Ok(())
    }

    fn entry(&mut self, input: &mut Input<'_>, kind: String, close: char, start: usize) -> IResult<()> {
        ws(input)?;
        let key = citation_key(input).map_err(|_: ErrMode<ContextError<BibDiagnostic>>| {
            if input.is_empty() {
                unterminated(input, start)
            } else {
                cut(
                    input,
                    BibDiagnostic {
                        code: ErrorCode::E102,
                        message: "missing citation key",
                        help: Some("entries start with a key: `@article{key, ...}`"),
                        start,
                    },
                )
            }
        })?;

        let mut item = Element::new(ElementKind::BibItem, format!("{kind}: {key}"), self.line(start), 0);
        loop {
            ws(input)?;
            if eat(input, close) {
                break;
            }
            closing_or(input, ',', close, start)?;
            ws(input)?;
            if eat(input, close) {
                break;
            }
            let (name, value, field) = self.field(input)?;
            item.push_child(field.with_label(name, value));
        }

        item.set_line_to(self.line(input.previous_token_end().saturating_sub(1)));
        self.elements.push(item);
        Ok(())
    }

    /// Parse `name = value`. Returns the field name, the expanded value and
    /// the unlabelled field element.
    fn field(&mut self, input: &mut Input<'_>) -> IResult<(String, String, FieldSpan)> {
        let start = input.current_token_start();
        if input.is_empty() {
            return Err(unterminated(input, start));
        }
        let name = field_name(input).map_err(|_: ErrMode<ContextError<BibDiagnostic>>| {
            cut(
                input,
                BibDiagnostic {
                    code: ErrorCode::E100,
                    message: "expected a field name",
                    help: None,
                    start,
                },
            )
        })?;
        ws(input)?;
        '='.parse_next(input)
            .map_err(|_: ErrMode<ContextError<BibDiagnostic>>| {
                cut(
                    input,
                    BibDiagnostic {
                        code: ErrorCode::E104,
                        message: "missing `=` after field name",
                        help: Some("fields are written `name = value`"),
                        start,
                    },
                )
            })?;
        ws(input)?;
        let (value, end) = self.value(input)?;

        let span = FieldSpan {
            line_from: self.line(start),
            line_to: self.line(end.saturating_sub(1)),
        };
        Ok((name.to_ascii_lowercase(), value, span))
    }

    /// Parse a value: pieces joined by `#`. Returns the expanded text and
    /// the offset just past the last piece.
    fn value(&self, input: &mut Input<'_>) -> IResult<(String, usize)> {
        let mut text = String::new();
        loop {
            text.push_str(&self.piece(input)?);
            let end = input.current_token_start();
            ws(input)?;
            if !eat(input, '#') {
                return Ok((clean(&text), end));
            }
            ws(input)?;
        }
    }

    fn piece(&self, input: &mut Input<'_>) -> IResult<String> {
        let start = input.current_token_start();
        match input.peek_token() {
            Some('{') => {
                input.next_token();
                balanced(input, start).map(str::to_string)
            }
            Some('"') => {
                input.next_token();
                quoted(input, start).map(str::to_string)
            }
            Some(c) if c.is_ascii_digit() => digit1.map(str::to_string).parse_next(input),
            Some(_) => {
                let name = field_name(input).map_err(|_: ErrMode<ContextError<BibDiagnostic>>| {
                    cut(
                        input,
                        BibDiagnostic {
                            code: ErrorCode::E100,
                            message: "expected a field value",
                            help: Some("values are `{...}`, `\"...\"`, numbers or `@string` names"),
                            start,
                        },
                    )
                })?;
                Ok(self
                    .macros
                    .get(&name.to_ascii_lowercase())
                    .cloned()
                    .unwrap_or_else(|| name.to_string()))
            }
            None => Err(unterminated(input, start)),
        }
    }
}

/// Line span of a field, waiting for its label.
struct FieldSpan {
    line_from: u32,
    line_to: u32,
}

impl FieldSpan {
    fn with_label(self, name: String, value: String) -> Element {
        Element::new(ElementKind::BibField, format!("{name}: {value}"), self.line_from, self.line_to)
    }
}

/// Consume `c` if it is next.
fn eat(input: &mut Input<'_>, c: char) -> bool {
    if input.peek_token() == Some(c) {
        input.next_token();
        true
    } else {
        false
    }
}

fn unterminated(input: &Input<'_>, start: usize) -> ErrMode<ContextError<BibDiagnostic>> {
    cut(
        input,
        BibDiagnostic {
            code: ErrorCode::E101,
            message: "unterminated entry",
            help: Some("add the closing delimiter of the entry"),
            start,
        },
    )
}

fn closing(input: &mut Input<'_>, close: char, start: usize) -> IResult<()> {
    closing_or(input, close, close, start)
}

/// Expect `expected`, reporting a missing `close` at end of input.
fn closing_or(input: &mut Input<'_>, expected: char, close: char, start: usize) -> IResult<()> {
    if eat(input, expected) {
        return Ok(());
    }
    if input.is_empty() {
        return Err(unterminated(input, start));
    }
    let at = input.current_token_start();
    let message = if expected == close {
        "unexpected character, expected the closing delimiter"
    } else {
        "unexpected character, expected `,` or the closing delimiter"
    };
    Err(cut(
        input,
        BibDiagnostic {
            code: ErrorCode::E100,
            message,
            help: Some(if close == '}' {
                "separate fields with `,` and close the entry with `}`"
            } else {
                "separate fields with `,` and close the entry with `)`"
            }),
            start: at,
        },
    ))
}

/// Skip the body of `@comment{...}`. An unbalanced comment runs to the end.
fn skip_comment(input: &mut Input<'_>, open: char) {
    let close = if open == '{' { '}' } else { ')' };
    let mut depth = 0usize;
    while let Some(c) = input.next_token() {
        if c == open {
            depth += 1;
        } else if c == close {
            if depth == 0 {
                return;
            }
            depth -= 1;
        }
    }
}

/// Convert a failed block into a diagnostic.
///
/// Falls back to E100 (unexpected character) if no context is found.
fn convert_err_mode(err: ErrMode<ContextError<BibDiagnostic>>, error_pos: usize) -> Diagnostic {
    let context_error = match err {
        ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
        ErrMode::Incomplete(_) => ContextError::new(),
    };

    if let Some(BibDiagnostic {
        code,
        message,
        help,
        start,
    }) = context_error.context().next()
    {
        let end = error_pos.max(start + 1);
        let mut diag = Diagnostic::error(*message)
            .with_code(*code)
            .with_label(Span::new(*start..end), code.description());
        if let Some(h) = help {
            diag = diag.with_help(*h);
        }
        return diag;
    }

    let span = Span::new(error_pos..error_pos.saturating_add(1));
    Diagnostic::error("unexpected character")
        .with_code(ErrorCode::E100)
        .with_label(span, ErrorCode::E100.description())
}

/// Structure parser for BibTeX databases.
#[derive(Debug, Clone, Copy, Default)]
pub struct BibtexParser;

impl BibtexParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a BibTeX source into one element per entry.
    ///
    /// # Errors
    ///
    /// Returns every syntax error found (`E100`-`E104`).
    pub fn parse_text(&self, source: &str) -> Result<Vec<Element>, ParseError> {
        let mut input = LocatingSlice::new(source);
        let mut reader = Reader::new(source);
        let mut diagnostics = DiagnosticCollector::new();

        loop {
            let _: IResult<&str> = take_till(0.., '@').parse_next(&mut input);
            if input.is_empty() {
                break;
            }

            let start = input.checkpoint();
            let start_pos = input.current_token_start();
            match reader.block(&mut input) {
                Ok(()) => {}
                Err(ErrMode::Backtrack(_)) => {
                    // A stray `@` in free text
                    input.reset(&start);
                    input.next_token();
                }
                Err(err) => {
                    let error_pos = input.current_token_start();
                    diagnostics.emit(convert_err_mode(err, error_pos));
                    if error_pos == start_pos {
                        input.next_token();
                    }
                }
            }
        }

        diagnostics.finish()?;
        debug!(entries = reader.elements.len(); "BibTeX entries parsed");
        Ok(reader.elements)
    }
}

impl StructureParser for BibtexParser {
    fn dialect(&self) -> Dialect {
        Dialect::Bibtex
    }

    fn parse(
        &self,
        input: ParseInput<'_>,
        resolver: &dyn SourceResolver,
    ) -> Result<Vec<Element>, ParseError> {
        let source = input.load(resolver)?;
        self.parse_text(&source)
    }
}
