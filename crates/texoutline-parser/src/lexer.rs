//! Lexical analyzer for TeX source text.
//!
//! The lexer converts source text into a stream of [`Token`]s for the
//! structure builder. It is total: every input, including malformed TeX,
//! produces a token stream that covers the source without gaps.

use winnow::{
    ModalResult, Parser as _,
    combinator::{alt, opt, preceded},
    stream::{LocatingSlice, Location, Stream},
    token::{any, literal, one_of, take_till, take_while},
};

use crate::{
    span::Span,
    tokens::{PositionedToken, Token},
};

type Input<'a> = LocatingSlice<&'a str>;

/// Characters with a meaning of their own. Everything else is text.
const SPECIAL: [char; 7] = ['\\', '{', '}', '[', ']', '*', '%'];

fn is_command_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '@'
}

/// Parse `% ...` up to the end of the line.
fn comment<'a>(input: &mut Input<'a>) -> ModalResult<Token<'a>> {
    preceded('%', take_till(0.., '\n'))
        .map(Token::Comment)
        .parse_next(input)
}

/// Parse `\verb<d>...<d>` (and `\verb*`). The body may not span lines.
fn verbatim<'a>(input: &mut Input<'a>) -> ModalResult<Token<'a>> {
    literal("\\verb").parse_next(input)?;
    opt('*').parse_next(input)?;
    let mut delimiter = any
        .verify(|c: &char| !c.is_ascii_alphabetic() && !c.is_whitespace())
        .parse_next(input)?;
    let body = take_till(0.., (delimiter, '\n')).parse_next(input)?;
    delimiter.parse_next(input)?;
    Ok(Token::Verbatim(body))
}

/// Parse a control word `\name`.
fn command<'a>(input: &mut Input<'a>) -> ModalResult<Token<'a>> {
    preceded('\\', take_while(1.., is_command_char))
        .map(Token::Command)
        .parse_next(input)
}

/// Parse a control symbol `\<char>`.
fn control_symbol<'a>(input: &mut Input<'a>) -> ModalResult<Token<'a>> {
    preceded('\\', any).map(Token::ControlSymbol).parse_next(input)
}

fn grouping<'a>(input: &mut Input<'a>) -> ModalResult<Token<'a>> {
    alt((
        '{'.value(Token::LeftBrace),
        '}'.value(Token::RightBrace),
        '['.value(Token::LeftBracket),
        ']'.value(Token::RightBracket),
        '*'.value(Token::Star),
    ))
    .parse_next(input)
}

fn newline<'a>(input: &mut Input<'a>) -> ModalResult<Token<'a>> {
    '\n'.value(Token::Newline).parse_next(input)
}

/// Parse whitespace (spaces, tabs, etc. but not newlines)
fn whitespace<'a>(input: &mut Input<'a>) -> ModalResult<Token<'a>> {
    take_while(1.., |c: char| c.is_whitespace() && c != '\n')
        .value(Token::Whitespace)
        .parse_next(input)
}

fn text<'a>(input: &mut Input<'a>) -> ModalResult<Token<'a>> {
    take_while(1.., |c: char| !c.is_whitespace() && !SPECIAL.contains(&c))
        .map(Token::Text)
        .parse_next(input)
}

/// A backslash at the very end of the input.
fn lone_backslash<'a>(input: &mut Input<'a>) -> ModalResult<Token<'a>> {
    one_of('\\').take().map(Token::Text).parse_next(input)
}

/// Parse a single token with position tracking
fn positioned_token<'a>(input: &mut Input<'a>) -> ModalResult<PositionedToken<'a>> {
    let start_pos = input.current_token_start();

    let token = alt((
        comment,
        verbatim,       // Must come before command
        command,        // Must come before control_symbol
        control_symbol, // Must come before lone_backslash
        lone_backslash,
        grouping,
        newline, // Must come before whitespace
        whitespace,
        text,
    ))
    .parse_next(input)?;

    let end_pos = input.current_token_start();
    Ok(PositionedToken::new(token, Span::new(start_pos..end_pos)))
}

/// Split TeX source into positioned tokens.
///
/// Never fails. Spans are byte offsets into `input`.
pub fn tokenize(input: &str) -> Vec<PositionedToken<'_>> {
    let mut input = LocatingSlice::new(input);
    let mut tokens = Vec::new();

    while !input.is_empty() {
        let start = input.current_token_start();
        match positioned_token(&mut input) {
            Ok(token) => tokens.push(token),
            Err(_) => {
                // `text` accepts anything the other alternatives reject.
                if let Some(c) = input.next_token() {
                    let span = Span::new(start..start + c.len_utf8());
                    tokens.push(PositionedToken::new(Token::Text(""), span));
                }
            }
        }
    }

    tokens
}
