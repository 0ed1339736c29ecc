//! Splits a normalized UTF-8 source into a flat, ordered token sequence
//! (`spec.md` §4.1), grounded on `lang-pt`'s `src/lexeme/pattern.rs` (regex
//! terminals for irregular patterns) and `src/tokenization.rs` (line-by-line
//! scan loop, ordered terminal list, `NEWLINE`/`EOS` emission).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::SyntaxError;
use crate::token::{Token, TokenKind};
use crate::util::{Code, Trace};

static DATE_TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\d{4}-\d{2}-\d{2}(T\d{2}:\d{2}:\d{2}(\.\d{1,6})?(Z|[+-]\d{2}:\d{2})?)?",
    )
    .expect("static date-time pattern")
});

static FLOAT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?\d[\d_]*((\.[\d_]+)?([eE][+-]?[\d_]+)?)").expect("static float pattern"));

static INTEGER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?\d[\d_]*").expect("static integer pattern"));

static UNQUOTED_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+").expect("static unquoted-key pattern"));

static ESCAPED_CHAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\\([btnfr"\\]|u[0-9A-Fa-f]{4}|U[0-9A-Fa-f]{8})"#).expect("static escaped-char pattern")
});

static SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ +").expect("static space pattern"));

/// Whether a byte at `slice.as_bytes()[0]` would continue an unquoted-key
/// run; used to keep keyword/numeric terminals from swallowing a prefix of
/// a longer `UNQUOTED_KEY` (e.g. `nullable` must not lex as `NULL` + `able`).
fn continues_identifier(slice: &str) -> bool {
    matches!(slice.chars().next(), Some(c) if c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

pub(crate) struct Lexer<'a> {
    code: &'a Code,
    trace: Trace,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(code: &'a Code, trace: Trace) -> Self {
        Self { code, trace }
    }

    pub(crate) fn tokenize(&self) -> Result<Vec<Token>, SyntaxError> {
        let lines: Vec<&str> = self.code.value.split('\n').collect();
        let mut tokens = Vec::new();
        let mut offset = 0usize;
        let last_line_index = lines.len().saturating_sub(1);

        for (line_index, line) in lines.iter().enumerate() {
            let line_number = line_index + 1;
            let line_start_offset = offset;
            let mut pos = 0usize;
            while pos < line.len() {
                let rest = &line[pos..];
                let (kind, len) = match_terminal(rest).ok_or_else(|| {
                    SyntaxError::new(
                        self.code.obtain_position(line_start_offset + pos),
                        format!("no token matches at {:?}", &rest[..rest.len().min(20)]),
                    )
                })?;
                let lexeme = &rest[..len];
                self.trace.token(kind, lexeme, self.code, line_start_offset + pos);
                tokens.push(Token::new(kind, lexeme, line_number, line_start_offset + pos));
                pos += len;
            }
            offset += line.len() + 1;
            if line_index != last_line_index {
                tokens.push(Token::new(TokenKind::Newline, "\n", line_number, offset - 1));
            }
        }
        let eos_line = lines.len().max(1);
        tokens.push(Token::new(TokenKind::Eos, "", eos_line, self.code.value.len()));
        Ok(tokens)
    }
}

/// Try every terminal in `spec.md` §4.1's order, first match wins.
fn match_terminal(rest: &str) -> Option<(TokenKind, usize)> {
    if rest.starts_with('=') {
        return Some((TokenKind::Equal, 1));
    }
    if rest.starts_with("null") && !continues_identifier(&rest[4..]) {
        return Some((TokenKind::Null, 4));
    }
    if rest.starts_with("true") && !continues_identifier(&rest[4..]) {
        return Some((TokenKind::Boolean, 4));
    }
    if rest.starts_with("false") && !continues_identifier(&rest[5..]) {
        return Some((TokenKind::Boolean, 5));
    }
    if let Some(m) = DATE_TIME_RE.find(rest) {
        if !continues_identifier(&rest[m.end()..]) {
            return Some((TokenKind::DateTime, m.end()));
        }
    }
    if let Some(caps) = FLOAT_RE.captures(rest) {
        let whole = caps.get(0).unwrap();
        let has_frac_or_exp = caps.get(2).is_some() || caps.get(3).is_some();
        if has_frac_or_exp && !continues_identifier(&rest[whole.end()..]) {
            return Some((TokenKind::Float, whole.end()));
        }
    }
    if let Some(m) = INTEGER_RE.find(rest) {
        if !continues_identifier(&rest[m.end()..]) {
            return Some((TokenKind::Integer, m.end()));
        }
    }
    if rest.starts_with("\"\"\"") {
        return Some((TokenKind::TripleQuotationMark, 3));
    }
    if rest.starts_with('"') {
        return Some((TokenKind::QuotationMark, 1));
    }
    if rest.starts_with("'''") {
        return Some((TokenKind::TripleApostrophe, 3));
    }
    if rest.starts_with('\'') {
        return Some((TokenKind::Apostrophe, 1));
    }
    if rest.starts_with('#') {
        return Some((TokenKind::Hash, 1));
    }
    if let Some(m) = SPACE_RE.find(rest) {
        return Some((TokenKind::Space, m.end()));
    }
    if rest.starts_with('[') {
        return Some((TokenKind::LeftSquareBracket, 1));
    }
    if rest.starts_with(']') {
        return Some((TokenKind::RightSquareBracket, 1));
    }
    if rest.starts_with('{') {
        return Some((TokenKind::LeftCurlyBrace, 1));
    }
    if rest.starts_with('}') {
        return Some((TokenKind::RightCurlyBrace, 1));
    }
    if rest.starts_with(',') {
        return Some((TokenKind::Comma, 1));
    }
    if rest.starts_with('.') {
        return Some((TokenKind::Dot, 1));
    }
    if let Some(m) = UNQUOTED_KEY_RE.find(rest) {
        return Some((TokenKind::UnquotedKey, m.end()));
    }
    if let Some(m) = ESCAPED_CHAR_RE.find(rest) {
        return Some((TokenKind::EscapedCharacter, m.end()));
    }
    if rest.starts_with('\\') {
        return Some((TokenKind::Escape, 1));
    }
    let basic_unescaped_len = rest
        .char_indices()
        .take_while(|&(_, c)| c != '"' && c != '\\')
        .last()
        .map(|(i, c)| i + c.len_utf8());
    if let Some(len) = basic_unescaped_len {
        return Some((TokenKind::BasicUnescaped, len));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        let code = Code::new(src);
        Lexer::new(&code, Trace::None)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn simple_assignment() {
        assert_eq!(
            kinds("key = 1"),
            vec![
                TokenKind::UnquotedKey,
                TokenKind::Space,
                TokenKind::Equal,
                TokenKind::Space,
                TokenKind::Integer,
                TokenKind::Eos,
            ]
        );
    }

    #[test]
    fn keyword_does_not_swallow_longer_identifier() {
        assert_eq!(kinds("nullable"), vec![TokenKind::UnquotedKey, TokenKind::Eos]);
        assert_eq!(kinds("null"), vec![TokenKind::Null, TokenKind::Eos]);
    }

    #[test]
    fn malformed_float_lexes_as_one_token_for_parser_to_reject() {
        assert_eq!(kinds("1_.0"), vec![TokenKind::Float, TokenKind::Eos]);
        assert_eq!(kinds("1_e1"), vec![TokenKind::Float, TokenKind::Eos]);
    }

    #[test]
    fn newline_between_lines() {
        assert_eq!(
            kinds("a = 1\nb = 2"),
            vec![
                TokenKind::UnquotedKey,
                TokenKind::Space,
                TokenKind::Equal,
                TokenKind::Space,
                TokenKind::Integer,
                TokenKind::Newline,
                TokenKind::UnquotedKey,
                TokenKind::Space,
                TokenKind::Equal,
                TokenKind::Space,
                TokenKind::Integer,
                TokenKind::Eos,
            ]
        );
    }

    #[test]
    fn date_time_token() {
        assert_eq!(
            kinds("1979-05-27T07:32:00Z"),
            vec![TokenKind::DateTime, TokenKind::Eos]
        );
    }
}
