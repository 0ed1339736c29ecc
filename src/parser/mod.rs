//! Recursive-descent driver (`spec.md` §4.5). Consumes tokens and mutates
//! the [`ValueTree`] and [`KeyStore`] in lockstep; never attempts recovery
//! on a [`SyntaxError`] (`spec.md` §7's "no partial result" policy), which
//! is why every `consume_*` here returns `Result` and propagates with `?`
//! rather than catching anything itself.

mod key;
mod numeric;
mod strings;
mod value;

#[cfg(test)]
mod __tests__;

use crate::config::ParserConfig;
use crate::error::SyntaxError;
use crate::key_store::KeyStore;
use crate::lexer::Lexer;
use crate::token::TokenKind;
use crate::token_stream::TokenStream;
use crate::util::{Code, Trace};
use crate::value::Table;
use crate::value_tree::ValueTree;

pub(crate) struct Parser {
    code: Code,
    config: ParserConfig,
    trace: Trace,
    stream: TokenStream,
    key_store: KeyStore,
    value_tree: ValueTree,
}

impl Parser {
    pub(crate) fn new(source: &str, config: ParserConfig, trace: Trace) -> Result<Self, SyntaxError> {
        let code = Code::new(normalize(source));
        let tokens = Lexer::new(&code, trace).tokenize()?;
        Ok(Self {
            code,
            config,
            trace,
            stream: TokenStream::new(tokens),
            key_store: KeyStore::new(),
            value_tree: ValueTree::new(),
        })
    }

    pub(crate) fn parse(mut self) -> Result<Table, SyntaxError> {
        while !self.stream.exhausted() {
            let kind = self.stream.peek().kind;
            match kind {
                TokenKind::Hash => self.consume_comment()?,
                TokenKind::QuotationMark | TokenKind::UnquotedKey | TokenKind::Integer => {
                    self.consume_key_value(false)?;
                }
                TokenKind::LeftSquareBracket
                    if self
                        .stream
                        .matches_sequence(&[TokenKind::LeftSquareBracket, TokenKind::LeftSquareBracket]) =>
                {
                    self.consume_array_of_tables_header()?;
                }
                TokenKind::LeftSquareBracket => self.consume_table_header()?,
                TokenKind::Space | TokenKind::Newline | TokenKind::Eos => {
                    self.stream.advance();
                }
                other => {
                    return Err(SyntaxError::new(
                        self.stream.position(),
                        format!("unexpected token {:?} at top level", other),
                    ))
                }
            }
        }
        Ok(self.value_tree.into_root())
    }

    fn consume_comment(&mut self) -> Result<(), SyntaxError> {
        self.stream.expect(TokenKind::Hash)?;
        while !self.stream.matches(TokenKind::Newline) && !self.stream.matches(TokenKind::Eos) {
            self.stream.advance();
        }
        Ok(())
    }

    /// A space, then an optional `# comment`, then a required newline/EOS.
    /// Shared by key-value assignments and both header forms.
    fn consume_header_trailer(&mut self) -> Result<(), SyntaxError> {
        self.stream.skip_while(&[TokenKind::Space]);
        if self.stream.matches(TokenKind::Hash) {
            self.consume_comment()?;
        }
        if !(self.stream.matches(TokenKind::Newline) || self.stream.matches(TokenKind::Eos)) {
            return Err(SyntaxError::new(
                self.stream.position(),
                format!("expected end of line, found {:?}", self.stream.peek().kind),
            ));
        }
        Ok(())
    }

    fn consume_table_header(&mut self) -> Result<(), SyntaxError> {
        self.stream.expect(TokenKind::LeftSquareBracket)?;
        let segments = self.consume_dotted_name()?;
        self.stream.expect(TokenKind::RightSquareBracket)?;
        self.consume_header_trailer()?;

        let flags = self.key_store.array_prefix_flags(&segments);
        self.key_store
            .add_table_key(segments.clone())
            .map_err(|m| SyntaxError::new(self.stream.position(), m))?;
        self.trace.key("table", &segments.join("."));
        self.value_tree.enter_table(&segments, &flags);
        Ok(())
    }

    fn consume_array_of_tables_header(&mut self) -> Result<(), SyntaxError> {
        self.stream.expect(TokenKind::LeftSquareBracket)?;
        self.stream.expect(TokenKind::LeftSquareBracket)?;
        let segments = self.consume_dotted_name()?;
        self.stream.expect(TokenKind::RightSquareBracket)?;
        self.stream.expect(TokenKind::RightSquareBracket)?;
        self.consume_header_trailer()?;

        let flags = self.key_store.array_prefix_flags(&segments);
        self.key_store
            .add_array_table_key(segments.clone())
            .map_err(|m| SyntaxError::new(self.stream.position(), m))?;
        self.trace.key("array-of-tables", &segments.join("."));
        self.value_tree.enter_array_table(&segments, &flags);
        Ok(())
    }
}

/// `\r\n` and `\r` become `\n`; tabs become a single space (`spec.md` §4.1).
fn normalize(source: &str) -> String {
    let unified = source.replace("\r\n", "\n").replace('\r', "\n");
    unified.replace('\t', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Table {
        Parser::new(src, ParserConfig::default(), Trace::None)
            .unwrap()
            .parse()
            .unwrap()
    }

    #[test]
    fn normalizes_crlf_and_tabs() {
        let table = parse("a\t=\t1\r\nb = 2\r\n");
        assert_eq!(table.get("a"), Some(&crate::value::Value::Integer(1)));
        assert_eq!(table.get("b"), Some(&crate::value::Value::Integer(2)));
    }

    #[test]
    fn rejects_garbage_at_top_level() {
        let err = Parser::new("]", ParserConfig::default(), Trace::None)
            .unwrap()
            .parse()
            .unwrap_err();
        assert!(err.message.contains("unexpected"));
    }
}
