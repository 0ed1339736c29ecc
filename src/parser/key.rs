//! Key and dotted-name parsing (`spec.md` §4.5, §6 grammar: `key :=
//! UNQUOTED_KEY | basic_string | integer_lexeme`).
//!
//! Dotted names (table/array-of-table headers) are threaded through the
//! Parser as `Vec<String>` segments, never rejoined into a single string and
//! re-split — the cleaner alternative to the source's `%*%` escape sentinel
//! that `spec.md` §9 recommends.

use crate::error::SyntaxError;
use crate::token::TokenKind;

use super::Parser;

impl Parser {
    /// A single key segment: unquoted, a single-line basic string, or a
    /// bare integer lexeme used as a key (a lenient extension preserved
    /// from the original source; see `spec.md` §9 open question).
    pub(super) fn consume_key_segment(&mut self) -> Result<String, SyntaxError> {
        match self.stream.peek().kind {
            TokenKind::QuotationMark => {
                self.stream.advance();
                let text = super::strings::consume_basic_string(&mut self.stream, &self.code, false)?;
                self.stream.expect(TokenKind::QuotationMark)?;
                Ok(text)
            }
            TokenKind::UnquotedKey | TokenKind::Integer => {
                Ok(self.stream.advance().expect("checked above").lexeme.clone())
            }
            other => Err(SyntaxError::new(
                self.stream.position(),
                format!("expected a key, found {:?}", other),
            )),
        }
    }

    pub(super) fn consume_dotted_name(&mut self) -> Result<Vec<String>, SyntaxError> {
        let mut segments = vec![self.consume_key_segment()?];
        while self.stream.matches(TokenKind::Dot) {
            self.stream.advance();
            segments.push(self.consume_key_segment()?);
        }
        Ok(segments)
    }

    /// `consume_key_value(inline)`: parses `key = value`, dispatching on the
    /// value's opening token (`[` → array, `{` → inline table, else → a
    /// scalar). `inline` suppresses the trailing newline/EOS requirement
    /// that applies to top-level assignments.
    pub(super) fn consume_key_value(&mut self, inline: bool) -> Result<(), SyntaxError> {
        let key = self.consume_key_segment()?;
        self.stream.skip_while(&[TokenKind::Space]);
        self.stream.expect(TokenKind::Equal)?;
        self.stream.skip_while(&[TokenKind::Space]);

        if self.stream.matches(TokenKind::LeftSquareBracket) {
            self.stream.advance();
            let array = self.consume_array()?;
            self.register_leaf(&key)?;
            self.value_tree.put(&key, crate::value::Value::Array(array));
        } else if self.stream.matches(TokenKind::LeftCurlyBrace) {
            self.stream.advance();
            self.key_store
                .add_inline_table_key(&key)
                .map_err(|m| SyntaxError::new(self.stream.position(), m))?;
            self.value_tree.begin_inline(&key);
            self.consume_inline_table_body()?;
            self.value_tree.end_inline();
            self.key_store.exit_inline();
        } else {
            let value = self.consume_scalar()?;
            self.register_leaf(&key)?;
            self.value_tree.put(&key, value);
        }

        if !inline {
            self.consume_header_trailer()?;
        }
        Ok(())
    }

    fn register_leaf(&mut self, key: &str) -> Result<(), SyntaxError> {
        self.key_store
            .add_key(key)
            .map_err(|m| SyntaxError::new(self.stream.position(), m))?;
        self.trace.key("key", key);
        Ok(())
    }

    pub(super) fn consume_inline_table_body(&mut self) -> Result<(), SyntaxError> {
        self.stream.skip_while(&[TokenKind::Space]);
        if self.stream.matches(TokenKind::RightCurlyBrace) {
            self.stream.advance();
            return Ok(());
        }
        loop {
            self.consume_key_value(true)?;
            self.stream.skip_while(&[TokenKind::Space]);
            if self.stream.matches(TokenKind::Comma) {
                self.stream.advance();
                self.stream.skip_while(&[TokenKind::Space]);
                continue;
            }
            break;
        }
        self.stream.skip_while(&[TokenKind::Space]);
        self.stream.expect(TokenKind::RightCurlyBrace)?;
        Ok(())
    }
}
