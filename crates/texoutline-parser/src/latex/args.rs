//! Argument parsers for LaTeX commands.
//!
//! These run over the token stream right after a command token and mirror
//! how TeX picks up arguments: spaces, line ends and comments between
//! arguments are skipped, `[...]` is optional, `{...}` is mandatory.
//! Every entry point backtracks on a miss, leaving the stream where it was.

use winnow::{
    ModalResult, Parser as _,
    combinator::{opt, preceded, repeat},
    error::{ContextError, ErrMode},
    stream::{Offset as _, Stream, TokenSlice},
    token::any,
};

use crate::{
    span::Span,
    tokens::{PositionedToken, Token},
};

pub(crate) type Input<'src> = TokenSlice<'src, PositionedToken<'src>>;

/// The tokens between an argument's delimiters.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Argument<'src> {
    tokens: &'src [PositionedToken<'src>],
    span: Span,
}

impl<'src> Argument<'src> {
    /// Span of the argument, delimiters included.
    pub(crate) fn span(&self) -> Span {
        self.span
    }

    /// Plain text of the argument.
    ///
    /// Comments are removed, groups flattened, control words dropped and
    /// whitespace collapsed to single spaces.
    pub(crate) fn text(&self) -> String {
        let mut raw = String::new();
        for token in self.tokens {
            match token.token {
                Token::Text(text) | Token::Verbatim(text) => raw.push_str(text),
                Token::ControlSymbol(c) if c.is_ascii_punctuation() && c != '\\' => raw.push(c),
                Token::ControlSymbol(_) | Token::Whitespace | Token::Newline => raw.push(' '),
                Token::LeftBracket => raw.push('['),
                Token::RightBracket => raw.push(']'),
                Token::Star => raw.push('*'),
                Token::Command(_) | Token::Comment(_) | Token::LeftBrace | Token::RightBrace => {}
            }
        }
        raw.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

fn backtrack() -> ErrMode<ContextError> {
    ErrMode::Backtrack(ContextError::new())
}

/// Parse one whitespace, newline or comment token
fn filler_token<'src>(input: &mut Input<'src>) -> ModalResult<()> {
    any.verify(|token: &PositionedToken<'_>| {
        matches!(
            token.token,
            Token::Whitespace | Token::Newline | Token::Comment(_)
        )
    })
    .void()
    .parse_next(input)
}

/// Skip whitespace, line ends and comments
fn filler<'src>(input: &mut Input<'src>) -> ModalResult<()> {
    repeat(0.., filler_token).parse_next(input)
}

/// Parse a delimited argument, tracking brace depth.
///
/// `close` only ends the argument outside nested braces.
fn delimited_argument<'src>(
    input: &mut Input<'src>,
    open: Token<'static>,
    close: Token<'static>,
) -> ModalResult<Argument<'src>> {
    let first = any
        .verify(|token: &PositionedToken<'_>| token.token == open)
        .parse_next(input)?;

    let body_start = input.checkpoint();
    let mut depth = 0usize;
    let last = loop {
        let Some(token) = input.next_token() else {
            return Err(backtrack());
        };
        if depth == 0 && token.token == close {
            break token;
        }
        match token.token {
            Token::LeftBrace => depth += 1,
            Token::RightBrace if depth > 0 => depth -= 1,
            Token::RightBrace => return Err(backtrack()),
            _ => {}
        }
    };

    let body_len = input.offset_from(&body_start) - 1;
    input.reset(&body_start);
    let tokens = input.next_slice(body_len);
    input.next_token();

    Ok(Argument {
        tokens,
        span: first.span.union(last.span),
    })
}

fn group<'src>(input: &mut Input<'src>) -> ModalResult<Argument<'src>> {
    delimited_argument(input, Token::LeftBrace, Token::RightBrace)
}

fn bracket<'src>(input: &mut Input<'src>) -> ModalResult<Argument<'src>> {
    delimited_argument(input, Token::LeftBracket, Token::RightBracket)
}

/// Consume a `*` directly after the command name.
pub(crate) fn star(input: &mut Input<'_>) -> bool {
    let star: ModalResult<_> =
        opt(any.verify(|token: &PositionedToken<'_>| token.token == Token::Star)).parse_next(input);
    star.is_ok_and(|star| star.is_some())
}

/// Skip any number of optional `[...]` arguments.
pub(crate) fn optionals(input: &mut Input<'_>) {
    let _: ModalResult<()> = repeat(0.., preceded(filler, bracket).void()).parse_next(input);
}

/// Parse a mandatory `{...}` argument.
pub(crate) fn required<'src>(input: &mut Input<'src>) -> Option<Argument<'src>> {
    opt(preceded(filler, group)).parse_next(input).ok().flatten()
}

/// Parse an undelimited file name, as in `\input chapter.tex`.
pub(crate) fn bare_word<'src>(input: &mut Input<'src>) -> Option<(&'src str, Span)> {
    opt(preceded(
        filler,
        any.verify_map(|token: &PositionedToken<'src>| match token.token {
            Token::Text(text) => Some((text, token.span)),
            _ => None,
        }),
    ))
    .parse_next(input)
    .ok()
    .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    #[test]
    fn test_required_skips_filler() {
        let tokens = tokenize(" % comment\n {Intro to \\emph{TeX}}rest");
        let mut input = TokenSlice::new(&tokens);

        let arg = required(&mut input).unwrap();
        assert_eq!(arg.text(), "Intro to TeX");
        assert_eq!(arg.span(), Span::new(12..33));
        assert_eq!(input.next_token().map(|t| t.token.clone()), Some(Token::Text("rest")));
    }

    #[test]
    fn test_required_backtracks() {
        let tokens = tokenize(" \\label{x}");
        let mut input = TokenSlice::new(&tokens);

        assert!(required(&mut input).is_none());
        assert_eq!(input.eof_offset(), tokens.len());
    }

    #[test]
    fn test_unterminated_group_backtracks() {
        let tokens = tokenize("{never closed");
        let mut input = TokenSlice::new(&tokens);

        assert!(required(&mut input).is_none());
        assert_eq!(input.eof_offset(), tokens.len());
    }

    #[test]
    fn test_star_and_optionals() {
        let tokens = tokenize("*[short][other {]}]{Long}");
        let mut input = TokenSlice::new(&tokens);

        assert!(star(&mut input));
        optionals(&mut input);
        assert_eq!(required(&mut input).unwrap().text(), "Long");
        assert!(!star(&mut input));
    }

    #[test]
    fn test_text_flattening() {
        let tokens = tokenize("{  50\\% of {the}\n  \\textbf{data}\\\\ [x] }");
        let mut input = TokenSlice::new(&tokens);

        assert_eq!(required(&mut input).unwrap().text(), "50% of the data [x]");
    }

    #[test]
    fn test_environment_name_with_star() {
        let tokens = tokenize("{figure*}");
        let mut input = TokenSlice::new(&tokens);

        assert_eq!(required(&mut input).unwrap().text(), "figure*");
    }

    #[test]
    fn test_bare_word() {
        let tokens = tokenize(" chapters/intro.tex\n");
        let mut input = TokenSlice::new(&tokens);

        let (word, span) = bare_word(&mut input).unwrap();
        assert_eq!(word, "chapters/intro.tex");
        assert_eq!(span, Span::new(1..19));
    }
}
