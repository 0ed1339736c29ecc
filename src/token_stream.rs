//! Cursor over the lexer's token sequence (`spec.md` §4.2), grounded on
//! `lang-pt`'s `src/filtered_stream.rs` cursor, but exposing non-consuming
//! `peek`/`matches`/`matches_sequence` directly rather than advance-then-
//! roll-back, per the design note in `spec.md` §9.

use crate::error::SyntaxError;
use crate::token::{Token, TokenKind};
use crate::util::Position;

pub(crate) struct TokenStream {
    tokens: Vec<Token>,
    cursor: usize,
}

impl TokenStream {
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, cursor: 0 }
    }

    pub(crate) fn advance(&mut self) -> Option<&Token> {
        if self.exhausted() {
            return None;
        }
        let token = &self.tokens[self.cursor];
        self.cursor += 1;
        Some(token)
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.cursor.min(self.tokens.len() - 1)]
    }

    pub(crate) fn peek_at(&self, offset: usize) -> &Token {
        let index = (self.cursor + offset).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    pub(crate) fn position(&self) -> Position {
        let t = self.peek();
        Position::new(t.line, 1)
    }

    /// Advance past a token of `kind`, returning its lexeme, or fail with a
    /// syntax error naming the expected and actual kind.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<String, SyntaxError> {
        let actual = self.peek().kind;
        if actual != kind {
            return Err(SyntaxError::new(
                self.position(),
                format!("expected {:?}, found {:?} ({:?})", kind, actual, self.peek().lexeme),
            ));
        }
        Ok(self.advance().expect("checked above").lexeme.clone())
    }

    pub(crate) fn matches(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub(crate) fn matches_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.peek().kind)
    }

    /// Non-consuming lookahead over `kinds`, one per successive token.
    pub(crate) fn matches_sequence(&self, kinds: &[TokenKind]) -> bool {
        kinds
            .iter()
            .enumerate()
            .all(|(i, kind)| self.peek_at(i).kind == *kind)
    }

    pub(crate) fn skip_while(&mut self, kinds: &[TokenKind]) {
        while self.matches_any(kinds) && !self.exhausted() {
            self.advance();
        }
    }

    pub(crate) fn exhausted(&self) -> bool {
        self.peek().kind == TokenKind::Eos && self.cursor >= self.tokens.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(kinds: &[TokenKind]) -> TokenStream {
        let tokens = kinds
            .iter()
            .map(|k| Token::new(*k, "", 1, 0))
            .collect::<Vec<_>>();
        TokenStream::new(tokens)
    }

    #[test]
    fn peek_does_not_consume() {
        let s = stream(&[TokenKind::Equal, TokenKind::Eos]);
        assert!(s.matches(TokenKind::Equal));
        assert!(s.matches(TokenKind::Equal));
    }

    #[test]
    fn matches_sequence_restores_cursor() {
        let s = stream(&[TokenKind::LeftSquareBracket, TokenKind::LeftSquareBracket, TokenKind::Eos]);
        assert!(s.matches_sequence(&[TokenKind::LeftSquareBracket, TokenKind::LeftSquareBracket]));
        assert!(s.matches(TokenKind::LeftSquareBracket));
    }

    #[test]
    fn expect_wrong_kind_errors() {
        let mut s = stream(&[TokenKind::Equal, TokenKind::Eos]);
        assert!(s.expect(TokenKind::Comma).is_err());
    }

    #[test]
    fn skip_while_and_exhausted() {
        let mut s = stream(&[TokenKind::Space, TokenKind::Space, TokenKind::Eos]);
        s.skip_while(&[TokenKind::Space]);
        assert!(s.exhausted());
    }
}
