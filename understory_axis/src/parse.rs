// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parsing of the interval syntax produced by [`crate::IntervalFormatter`].
//!
//! The grammar is `('[' | '(') start ", " end (']' | ')')`, optionally followed by
//! trailing text that is handed back to the caller. Boundary text may not contain
//! the `", "` separator or bracket characters.

use alloc::string::{String, ToString};
use core::fmt;
use core::marker::PhantomData;
use core::str::FromStr;

use crate::endpoint::Endpoint;

/// An error produced while parsing interval text.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// The input does not start with `[` or `(`.
    MissingOpenBracket,
    /// A bracket appeared where the parser does not accept it.
    MismatchedBracket {
        /// The offending bracket.
        found: char,
    },
    /// The `", "` separator between the two boundaries is missing.
    MissingSeparator,
    /// The input ended before the closing bracket.
    Unterminated,
    /// A boundary could not be parsed into the boundary type.
    InvalidBoundary {
        /// The boundary text.
        text: String,
    },
    /// Text followed the interval where none was expected.
    TrailingInput {
        /// The unconsumed text.
        rest: String,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingOpenBracket => f.write_str("interval must start with '[' or '('"),
            Self::MismatchedBracket { found } => write!(f, "unexpected bracket '{found}'"),
            Self::MissingSeparator => f.write_str("missing \", \" between interval boundaries"),
            Self::Unterminated => f.write_str("interval is missing its closing bracket"),
            Self::InvalidBoundary { text } => write!(f, "invalid boundary {text:?}"),
            Self::TrailingInput { rest } => write!(f, "unexpected text after interval: {rest:?}"),
        }
    }
}

impl core::error::Error for ParseError {}

/// Parses interval text into a pair of boundaries of type `B`.
pub trait IntervalParser<B> {
    /// Parse an interval at the start of `input`.
    ///
    /// Returns `(start, end, rest)` where `rest` is the text after the closing
    /// bracket with surrounding whitespace removed.
    fn parse_interval_prefix<'a>(&self, input: &'a str) -> Result<(B, B, &'a str), ParseError>;

    /// Parse `input` as exactly one interval.
    ///
    /// Surrounding whitespace is ignored; any other trailing text is an error.
    fn parse_interval(&self, input: &str) -> Result<(B, B), ParseError> {
        let (start, end, rest) = self.parse_interval_prefix(input)?;
        if !rest.is_empty() {
            return Err(ParseError::TrailingInput {
                rest: rest.to_string(),
            });
        }
        Ok((start, end))
    }
}

/// The pieces of interval text, before the boundaries are interpreted.
#[derive(Debug)]
struct RawInterval<'a> {
    open: char,
    start: &'a str,
    end: &'a str,
    close: char,
    rest: &'a str,
}

fn split_interval(input: &str) -> Result<RawInterval<'_>, ParseError> {
    let input = input.trim_start();
    let mut chars = input.chars();
    let open = match chars.next() {
        Some(c @ ('[' | '(')) => c,
        Some(c @ (']' | ')')) => return Err(ParseError::MismatchedBracket { found: c }),
        _ => return Err(ParseError::MissingOpenBracket),
    };
    let body = chars.as_str();
    let (start, tail) = body
        .split_once(", ")
        .ok_or(ParseError::MissingSeparator)?;
    let close_at = tail
        .find(['[', '(', ']', ')'])
        .ok_or(ParseError::Unterminated)?;
    let end = &tail[..close_at];
    let mut rest = tail[close_at..].chars();
    let close = match rest.next() {
        Some(c @ (']' | ')')) => c,
        Some(c) => return Err(ParseError::MismatchedBracket { found: c }),
        None => return Err(ParseError::Unterminated),
    };
    Ok(RawInterval {
        open,
        start,
        end,
        close,
        rest: rest.as_str().trim(),
    })
}

fn parse_boundary<B: FromStr>(text: &str) -> Result<B, ParseError> {
    text.parse().map_err(|_| ParseError::InvalidBoundary {
        text: text.to_string(),
    })
}

/// Parses half-open `[start, end)` intervals of [`FromStr`] boundaries.
///
/// This is the inverse of [`crate::BasicFormatter`].
pub struct BasicParser<B> {
    _boundary: PhantomData<fn() -> B>,
}

impl<B> BasicParser<B> {
    /// Create a parser.
    pub const fn new() -> Self {
        Self {
            _boundary: PhantomData,
        }
    }
}

impl<B> Default for BasicParser<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> Clone for BasicParser<B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B> Copy for BasicParser<B> {}

impl<B> fmt::Debug for BasicParser<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicParser").finish()
    }
}

impl<B: FromStr> IntervalParser<B> for BasicParser<B> {
    fn parse_interval_prefix<'a>(&self, input: &'a str) -> Result<(B, B, &'a str), ParseError> {
        let raw = split_interval(input)?;
        if raw.open != '[' {
            return Err(ParseError::MismatchedBracket { found: raw.open });
        }
        if raw.close != ')' {
            return Err(ParseError::MismatchedBracket { found: raw.close });
        }
        Ok((parse_boundary(raw.start)?, parse_boundary(raw.end)?, raw.rest))
    }
}

/// Parses intervals with any openness into [`Endpoint`] pairs.
///
/// The inner parser supplies the boundary values; it is handed a half-open
/// rendering of the same boundaries. This is the inverse of
/// [`crate::EndpointFormatter`].
#[derive(Copy, Clone, Debug, Default)]
pub struct EndpointParser<P> {
    inner: P,
}

impl<P> EndpointParser<P> {
    /// Wrap a parser for the underlying boundary type.
    pub const fn new(inner: P) -> Self {
        Self { inner }
    }
}

impl<B, P: IntervalParser<B>> IntervalParser<Endpoint<B>> for EndpointParser<P> {
    fn parse_interval_prefix<'a>(
        &self,
        input: &'a str,
    ) -> Result<(Endpoint<B>, Endpoint<B>, &'a str), ParseError> {
        let raw = split_interval(input)?;
        let mut half_open = String::with_capacity(raw.start.len() + raw.end.len() + 4);
        half_open.push('[');
        half_open.push_str(raw.start);
        half_open.push_str(", ");
        half_open.push_str(raw.end);
        half_open.push(')');
        let (start, end) = self.inner.parse_interval(&half_open)?;
        Ok((
            Endpoint {
                b: start,
                plus_epsilon: raw.open == '(',
            },
            Endpoint {
                b: end,
                plus_epsilon: raw.close == ']',
            },
            raw.rest,
        ))
    }
}
