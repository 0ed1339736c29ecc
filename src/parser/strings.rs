//! Basic/literal string body consumption (`spec.md` §4.5). Callers have
//! already consumed the opening delimiter token and consume the closing one
//! themselves; these functions only gather the body.

use crate::error::SyntaxError;
use crate::token::TokenKind;
use crate::token_stream::TokenStream;
use crate::util::Code;

fn decode_escaped_character(lexeme: &str) -> char {
    match lexeme {
        "\\b" => '\u{8}',
        "\\t" => '\t',
        "\\n" => '\n',
        "\\f" => '\u{C}',
        "\\r" => '\r',
        "\\\"" => '"',
        "\\\\" => '\\',
        _ => {
            let hex = &lexeme[2..];
            u32::from_str_radix(hex, 16)
                .ok()
                .and_then(char::from_u32)
                .unwrap_or(char::REPLACEMENT_CHARACTER)
        }
    }
}

/// A bare `\` followed by any run of `\`, SPACE, NEWLINE tokens, inside a
/// multi-line basic string, is a line continuation: skipped entirely.
fn skip_line_continuation(stream: &mut TokenStream) {
    stream.advance();
    stream.skip_while(&[TokenKind::Escape, TokenKind::Space, TokenKind::Newline]);
}

pub(crate) fn consume_basic_string(
    stream: &mut TokenStream,
    code: &Code,
    multiline: bool,
) -> Result<String, SyntaxError> {
    if multiline && stream.matches(TokenKind::Newline) {
        stream.advance();
    }
    let closing = if multiline {
        TokenKind::TripleQuotationMark
    } else {
        TokenKind::QuotationMark
    };
    let mut out = String::new();
    loop {
        let kind = stream.peek().kind;
        if kind == closing {
            break;
        }
        match kind {
            TokenKind::EscapedCharacter => {
                let lexeme = stream.advance().expect("checked above").lexeme.clone();
                out.push(decode_escaped_character(&lexeme));
            }
            TokenKind::Escape if multiline => skip_line_continuation(stream),
            TokenKind::Escape => {
                return Err(SyntaxError::new(
                    code.obtain_position(stream.peek().start),
                    "bare backslash is not a valid escape in a basic string",
                ))
            }
            TokenKind::Newline if !multiline => {
                return Err(SyntaxError::new(
                    code.obtain_position(stream.peek().start),
                    "unterminated basic string: newline before closing quote",
                ))
            }
            TokenKind::Eos => {
                return Err(SyntaxError::new(
                    code.obtain_position(stream.peek().start),
                    "unterminated basic string: end of input before closing quote",
                ))
            }
            _ => out.push_str(&stream.advance().expect("checked above").lexeme.clone()),
        }
    }
    Ok(out)
}

pub(crate) fn consume_literal_string(
    stream: &mut TokenStream,
    code: &Code,
    multiline: bool,
) -> Result<String, SyntaxError> {
    if multiline && stream.matches(TokenKind::Newline) {
        stream.advance();
    }
    let closing = if multiline {
        TokenKind::TripleApostrophe
    } else {
        TokenKind::Apostrophe
    };
    let mut out = String::new();
    loop {
        let kind = stream.peek().kind;
        if kind == closing {
            break;
        }
        match kind {
            TokenKind::Newline if !multiline => {
                return Err(SyntaxError::new(
                    code.obtain_position(stream.peek().start),
                    "unterminated literal string: newline before closing quote",
                ))
            }
            TokenKind::Eos => {
                return Err(SyntaxError::new(
                    code.obtain_position(stream.peek().start),
                    "unterminated literal string: end of input before closing quote",
                ))
            }
            _ => out.push_str(&stream.advance().expect("checked above").lexeme.clone()),
        }
    }
    Ok(out)
}
