use logos::Logos;
use std::fmt;

use crate::ast::Span;

/// Token type for map files.
///
/// A map line is a run of words separated by blanks; roads are written as
/// `direction=city`. Anything that is not a blank, a newline, or `=` belongs
/// to a word, so names like `Qu-ux` or `St.Gallen` need no quoting.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r]+")]
pub enum Token {
    /// Key/value separator `=`.
    #[token("=")]
    Equals,

    /// End of a map line.
    #[token("\n")]
    Newline,

    /// City name or direction keyword.
    #[regex(r"[^ \t\r\n=]+", |lex| lex.slice().to_string())]
    Word(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Equals => write!(f, "="),
            Token::Newline => write!(f, "end of line"),
            Token::Word(w) => write!(f, "{w}"),
        }
    }
}

/// Input the lexer could not turn into a token.
#[derive(Debug, Clone)]
pub struct LexError {
    /// Offending bytes.
    pub span: Span,
    /// What went wrong.
    pub message: String,
}

/// Split `source` into spanned tokens.
///
/// Bad input is collected rather than fatal, so every problem in a file is
/// reported in one pass.
pub fn lex(source: &str) -> (Vec<(Token, Span)>, Vec<LexError>) {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    for (result, span) in Token::lexer(source).spanned() {
        match result {
            Ok(token) => tokens.push((token, span)),
            Err(()) => errors.push(LexError {
                message: format!("unexpected character: {:?}", &source[span.clone()]),
                span,
            }),
        }
    }

    (tokens, errors)
}
