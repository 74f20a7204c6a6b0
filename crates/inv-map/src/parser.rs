use std::collections::HashSet;

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;
use inv_core::Direction;

use crate::ast::{CityDef, Link, Span};
use crate::lexer::Token;

/// Parse error with source span.
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Byte range the error points at.
    pub span: Span,
    /// What went wrong.
    pub message: String,
    /// Short hint shown next to the span.
    pub label: Option<String>,
}

impl ParseError {
    fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            label: None,
        }
    }

    fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// First token of a line.
#[derive(Debug, Clone)]
enum Head {
    Name(String),
    Stray(Token, Span),
}

/// Anything after the city name.
#[derive(Debug, Clone)]
enum Piece {
    Pair {
        direction: (String, Span),
        target: (String, Span),
    },
    /// `word=` with nothing after the `=`.
    Dangling { equals: Span },
    Stray(Token, Span),
}

type RawLine = (Head, Vec<Piece>);

/// Line structure of a map file.
///
/// Accepts any token stream; malformed pieces are kept as [`Piece::Stray`] or
/// [`Piece::Dangling`] so [`build_def`] can report them per line.
fn map_parser<'a, I>() -> impl Parser<'a, I, Vec<RawLine>, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let word = select! { Token::Word(w) => w }.labelled("word");
    let spanned_word = word.clone().map_with(|w, e| (w, { let s: SimpleSpan = e.span(); s.into_range() }));
    let not_newline = any().filter(|t: &Token| *t != Token::Newline);

    let head = choice((
        word.clone().map(Head::Name),
        not_newline.clone().map_with(|t, e| Head::Stray(t, { let s: SimpleSpan = e.span(); s.into_range() })),
    ));

    let pair = spanned_word
        .clone()
        .then_ignore(just(Token::Equals))
        .then(spanned_word)
        .map(|(direction, target)| Piece::Pair { direction, target });
    let dangling = word
        .ignore_then(just(Token::Equals).map_with(|_, e| { let s: SimpleSpan = e.span(); s.into_range() }))
        .map(|equals| Piece::Dangling { equals });
    let stray = not_newline.map_with(|t, e| Piece::Stray(t, { let s: SimpleSpan = e.span(); s.into_range() }));

    let line = head.then(choice((pair, dangling, stray)).repeated().collect::<Vec<_>>());

    line.separated_by(just(Token::Newline).repeated().at_least(1))
        .allow_trailing()
        .collect::<Vec<_>>()
        .padded_by(just(Token::Newline).repeated())
        .then_ignore(end())
}

/// Parse a token stream into city definitions, one per non-blank line.
///
/// A line with an error is dropped and the rest of the file is still checked,
/// so a single pass reports every broken line.
pub fn parse(tokens: &[(Token, Span)]) -> Result<Vec<CityDef>, Vec<ParseError>> {
    let token_iter = tokens
        .iter()
        .map(|(tok, span)| (tok.clone(), SimpleSpan::from(span.clone())));
    let len = tokens.last().map_or(0, |(_, s)| s.end);
    let eoi: SimpleSpan = (len..len).into();
    let stream = Stream::from_iter(token_iter).map(eoi, |(t, s): (_, _)| (t, s));

    let (output, errors) = map_parser().parse(stream).into_output_errors();
    let mut errors: Vec<ParseError> = errors
        .into_iter()
        .map(|e| ParseError::new(e.span().into_range(), e.to_string()))
        .collect();

    let mut defs = Vec::new();
    for line in output.unwrap_or_default() {
        match build_def(line) {
            Ok(def) => defs.push(def),
            Err(e) => errors.push(e),
        }
    }

    if errors.is_empty() {
        Ok(defs)
    } else {
        Err(errors)
    }
}

/// Check one raw line and turn it into a [`CityDef`], stopping at the first
/// problem.
fn build_def((head, pieces): RawLine) -> Result<CityDef, ParseError> {
    let name = match head {
        Head::Name(name) => name,
        Head::Stray(token, span) => {
            return Err(
                ParseError::new(span, format!("expected city name, found `{token}`"))
                    .with_label("a line must start with the city name"),
            );
        }
    };

    let mut links = Vec::with_capacity(pieces.len());
    let mut seen = HashSet::new();

    for piece in pieces {
        let link = match piece {
            Piece::Pair {
                direction: (dir, dir_span),
                target: (target, target_span),
            } => {
                let direction: Direction = dir.parse().map_err(|e| {
                    ParseError::new(dir_span.clone(), format!("{e}"))
                        .with_label("expected east, north, west or south")
                })?;
                Link {
                    direction,
                    target,
                    span: dir_span.start..target_span.end,
                }
            }
            Piece::Dangling { equals } => {
                return Err(ParseError::new(equals, "missing city name after `=`")
                    .with_label("expected a city name here"));
            }
            Piece::Stray(token, span) => {
                return Err(ParseError::new(
                    span,
                    format!("expected `direction=city`, found `{token}`"),
                )
                .with_label("roads are written as direction=city"));
            }
        };

        if !seen.insert(link.direction) {
            return Err(ParseError::new(
                link.span.clone(),
                format!("direction `{}` given twice for `{name}`", link.direction),
            ));
        }
        links.push(link);
    }

    Ok(CityDef { name, links })
}
