//! Token types produced by the TeX [`lexer`](super::lexer).

use std::fmt;

use winnow::stream::Location;

use crate::span::Span;

/// TeX tokens, as far as document structure is concerned.
///
/// The lexer does not know catcodes. Characters that are not special to
/// structure extraction are grouped into [`Token::Text`] runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'src> {
    /// A control word, without the backslash: `\section` is `Command("section")`.
    Command(&'src str),
    /// A backslash followed by a single non-letter: `\%`, `\\`, `\{`.
    ControlSymbol(char),
    /// The body of `\verb|...|`, without delimiters.
    Verbatim(&'src str),

    // Grouping
    LeftBrace,    // {
    RightBrace,   // }
    LeftBracket,  // [
    RightBracket, // ]
    Star,         // *

    /// A `%` comment up to, not including, the end of line.
    Comment(&'src str),

    Whitespace,
    Newline,

    /// A run of ordinary characters.
    Text(&'src str),
}

/// A token with its byte span in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedToken<'src> {
    pub token: Token<'src>,
    pub span: Span,
}

impl<'src> PositionedToken<'src> {
    pub fn new(token: Token<'src>, span: Span) -> Self {
        Self { token, span }
    }
}

impl<'src> std::ops::Deref for PositionedToken<'src> {
    type Target = Token<'src>;

    fn deref(&self) -> &Self::Target {
        &self.token
    }
}

impl Location for PositionedToken<'_> {
    fn previous_token_end(&self) -> usize {
        self.span.end()
    }

    fn current_token_start(&self) -> usize {
        self.span.start()
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Command(name) => write!(f, "\\{name}"),
            Token::ControlSymbol(c) => write!(f, "\\{c}"),
            Token::Verbatim(body) => write!(f, "\\verb|{body}|"),
            Token::LeftBrace => write!(f, "{{"),
            Token::RightBrace => write!(f, "}}"),
            Token::LeftBracket => write!(f, "["),
            Token::RightBracket => write!(f, "]"),
            Token::Star => write!(f, "*"),
            Token::Comment(text) => write!(f, "%{text}"),
            Token::Whitespace => write!(f, " "),
            Token::Newline => writeln!(f),
            Token::Text(text) => write!(f, "{text}"),
        }
    }
}
