//! Error taxonomy. `SyntaxError` is raised by the Lexer, [`crate::TokenStream`],
//! [`crate::Parser`] and [`crate::KeyStore`] and never escapes the crate;
//! [`ParseException`] and [`DumpException`] are the only error types a caller
//! ever sees.

use std::fmt::{Display, Formatter};

use crate::util::Position;

/// Internal lexical/syntactic/semantic failure. Always converted to a
/// [`ParseException`] at the entry surface (see `entry.rs`), never recovered
/// from in place.
#[derive(Debug, Clone)]
pub(crate) struct SyntaxError {
    pub position: Position,
    pub message: String,
}

impl SyntaxError {
    pub(crate) fn new(position: Position, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "SyntaxError at {}: {}", self.position, self.message)
    }
}

/// A parse failure, enriched with as much context as the entry point had
/// available: the optional file the input came from, the 1-based line the
/// failure was anchored to, and a short snippet of the offending source line.
#[derive(Debug, Clone)]
pub struct ParseException {
    pub message: String,
    pub filename: Option<String>,
    pub line: Option<usize>,
    pub snippet: Option<String>,
}

impl ParseException {
    pub(crate) fn from_syntax_error(err: SyntaxError, filename: Option<&str>, snippet: Option<String>) -> Self {
        Self {
            message: err.message,
            filename: filename.map(|s| s.to_string()),
            line: Some(err.position.line),
            snippet,
        }
    }

    pub(crate) fn structural(message: impl Into<String>, filename: Option<&str>) -> Self {
        Self {
            message: message.into(),
            filename: filename.map(|s| s.to_string()),
            line: None,
            snippet: None,
        }
    }
}

impl Display for ParseException {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ParseException: {}", self.message)?;
        if let Some(filename) = &self.filename {
            write!(f, " (in {})", filename)?;
        }
        if let Some(line) = self.line {
            write!(f, " at line {}", line)?;
        }
        if let Some(snippet) = &self.snippet {
            write!(f, "\n  {}", snippet)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseException {}

/// A failure raised by the [`crate::Builder`]: an unsupported value type, a
/// duplicate or invalid key, a mixed-type array, or a string that cannot be
/// safely encoded.
#[derive(Debug, Clone)]
pub struct DumpException {
    pub message: String,
}

impl DumpException {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for DumpException {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "DumpException: {}", self.message)
    }
}

impl std::error::Error for DumpException {}
