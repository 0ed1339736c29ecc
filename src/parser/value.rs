//! Scalar and array value parsing (`spec.md` §4.5).

use crate::error::SyntaxError;
use crate::token::TokenKind;
use crate::value::{Value, ValueTag};

use super::numeric::{parse_datetime, validate_float, validate_integer};
use super::strings::{consume_basic_string, consume_literal_string};
use super::Parser;

impl Parser {
    /// A single non-array, non-inline-table value.
    pub(super) fn consume_scalar(&mut self) -> Result<Value, SyntaxError> {
        let position = self.stream.position();
        match self.stream.peek().kind {
            TokenKind::Null => {
                if !self.config.allow_null {
                    return Err(SyntaxError::new(position, "`null` is disabled by this parser's configuration"));
                }
                self.stream.advance();
                Ok(Value::Null)
            }
            TokenKind::Boolean => {
                let lexeme = self.stream.advance().expect("checked above").lexeme.clone();
                Ok(Value::Bool(lexeme == "true"))
            }
            TokenKind::Integer => {
                let lexeme = self.stream.advance().expect("checked above").lexeme.clone();
                validate_integer(&lexeme)
                    .map(Value::Integer)
                    .map_err(|m| SyntaxError::new(position, m))
            }
            TokenKind::Float => {
                let lexeme = self.stream.advance().expect("checked above").lexeme.clone();
                validate_float(&lexeme)
                    .map(Value::Float)
                    .map_err(|m| SyntaxError::new(position, m))
            }
            TokenKind::DateTime => {
                let lexeme = self.stream.advance().expect("checked above").lexeme.clone();
                Ok(Value::Datetime(parse_datetime(&lexeme)))
            }
            TokenKind::QuotationMark => {
                self.stream.advance();
                let text = consume_basic_string(&mut self.stream, &self.code, false)?;
                self.stream.expect(TokenKind::QuotationMark)?;
                Ok(Value::String(text))
            }
            TokenKind::TripleQuotationMark => {
                self.stream.advance();
                let text = consume_basic_string(&mut self.stream, &self.code, true)?;
                self.stream.expect(TokenKind::TripleQuotationMark)?;
                Ok(Value::String(text))
            }
            TokenKind::Apostrophe => {
                self.stream.advance();
                let text = consume_literal_string(&mut self.stream, &self.code, false)?;
                self.stream.expect(TokenKind::Apostrophe)?;
                Ok(Value::String(text))
            }
            TokenKind::TripleApostrophe => {
                self.stream.advance();
                let text = consume_literal_string(&mut self.stream, &self.code, true)?;
                self.stream.expect(TokenKind::TripleApostrophe)?;
                Ok(Value::String(text))
            }
            other => Err(SyntaxError::new(position, format!("expected a value, found {:?}", other))),
        }
    }

    fn skip_array_filler(&mut self) -> Result<(), SyntaxError> {
        loop {
            self.stream.skip_while(&[TokenKind::Space, TokenKind::Newline]);
            if self.stream.matches(TokenKind::Hash) {
                self.consume_comment()?;
                continue;
            }
            break;
        }
        Ok(())
    }

    /// Assumes the opening `[` has already been consumed.
    pub(super) fn consume_array(&mut self) -> Result<Vec<Value>, SyntaxError> {
        let mut elements = Vec::new();
        let mut tag: Option<ValueTag> = None;
        self.skip_array_filler()?;

        while !self.stream.matches(TokenKind::RightSquareBracket) {
            let position = self.stream.position();
            let element = if self.stream.matches(TokenKind::LeftSquareBracket) {
                self.stream.advance();
                Value::Array(self.consume_array()?)
            } else {
                self.consume_scalar()?
            };
            match tag {
                None => tag = Some(element.tag()),
                Some(expected) if expected == element.tag() => {}
                Some(_) => {
                    return Err(SyntaxError::new(
                        position,
                        "array elements must share the same value type",
                    ))
                }
            }
            elements.push(element);

            self.skip_array_filler()?;
            if self.stream.matches(TokenKind::Comma) {
                self.stream.advance();
                self.skip_array_filler()?;
            } else {
                break;
            }
        }
        self.stream.expect(TokenKind::RightSquareBracket)?;
        Ok(elements)
    }
}
