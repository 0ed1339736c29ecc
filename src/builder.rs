//! Fluent ZCONF source emitter (`spec.md` §4.6). The mirror image of the
//! Parser: instead of consuming tokens into a `Value` tree, it accumulates
//! an output string from a sequence of `add_*` calls, validating structure
//! against its own [`KeyStore`] exactly as the Parser does against its own.
//!
//! Grounded in `lang-pt`'s plain-struct-plus-impl constructor style
//! (`Tokenizer`/`CombinedTokenizer`) rather than a generic string-builder
//! crate — there is no teacher counterpart for an emitter, so this module is
//! new, built in the same idiom as the rest of the crate.

use crate::config::BuilderConfig;
use crate::error::DumpException;
use crate::key_store::KeyStore;
use crate::value::Value;

/// `[A-Za-z0-9_-]+`, the same pattern the Lexer's `UNQUOTED_KEY` terminal
/// matches (`spec.md` §4.1), used to decide whether a key can be emitted
/// bare or must be quoted.
fn is_unquoted_key(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn quote_key(segment: &str) -> String {
    if is_unquoted_key(segment) {
        segment.to_string()
    } else {
        format!("\"{}\"", segment.replace('\\', "\\\\").replace('"', "\\\""))
    }
}

fn split_segments(dotted_name: &str) -> Result<Vec<String>, DumpException> {
    let trimmed = dotted_name.trim();
    if trimmed.is_empty() {
        return Err(DumpException::new("a table/array-of-tables name must be non-empty"));
    }
    let segments: Vec<String> = trimmed.split('.').map(|s| s.trim().to_string()).collect();
    for seg in &segments {
        if seg.is_empty() {
            return Err(DumpException::new(format!("empty key segment in '{}'", dotted_name)));
        }
        if !is_unquoted_key(seg) {
            return Err(DumpException::new(format!(
                "table/array-of-tables segment '{}' must match [A-Za-z0-9_-]+",
                seg
            )));
        }
    }
    Ok(segments)
}

/// Whether `rest` (the text immediately following a backslash) already
/// forms one of the recognized escape continuations.
fn escape_continuation_len(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    match bytes.first() {
        Some(b'b' | b't' | b'n' | b'f' | b'r' | b'"' | b'\\') => Some(1),
        Some(b'u') if rest.len() >= 5 && rest[1..5].chars().all(|c| c.is_ascii_hexdigit()) => Some(5),
        Some(b'U') if rest.len() >= 9 && rest[1..9].chars().all(|c| c.is_ascii_hexdigit()) => Some(9),
        _ => None,
    }
}

/// Normalize a user string into a quoted basic string (escaping the
/// characters `spec.md` §4.6 lists) or, if it begins with `@`, into a
/// literal (apostrophe-quoted) string with that prefix stripped.
///
/// A literal backslash in `raw` is tolerated, unescaped, only when what
/// follows it already forms a recognized escape (`\b\t\n\f\r\"\\` or a
/// `\uXXXX`/`\UXXXXXXXX` sequence) — i.e. the caller pre-escaped it
/// themselves. Any other backslash fails instead of being silently doubled.
/// This is intentionally asymmetric: a caller cannot emit a literal
/// backslash immediately followed by `u`/`U` that is *not* meant as a
/// unicode escape (`spec.md` §9, documented as a known limitation).
fn encode_string(raw: &str) -> Result<String, DumpException> {
    if let Some(literal) = raw.strip_prefix('@') {
        return Ok(format!("'{}'", literal));
    }

    let mut escaped = String::with_capacity(raw.len() + 2);
    let mut rest = raw;
    while let Some(c) = rest.chars().next() {
        let len = c.len_utf8();
        match c {
            '\\' => {
                let after = &rest[len..];
                match escape_continuation_len(after) {
                    Some(n) => {
                        escaped.push('\\');
                        escaped.push_str(&after[..n]);
                        rest = &after[n..];
                        continue;
                    }
                    None => {
                        return Err(DumpException::new(format!(
                            "string contains a backslash that is not a valid escape or unicode pre-escape: '{}'",
                            raw
                        )))
                    }
                }
            }
            '\u{8}' => escaped.push_str("\\b"),
            '\t' => escaped.push_str("\\t"),
            '\n' => escaped.push_str("\\n"),
            '\u{C}' => escaped.push_str("\\f"),
            '\r' => escaped.push_str("\\r"),
            '"' => escaped.push_str("\\\""),
            other => escaped.push(other),
        }
        rest = &rest[len..];
    }

    Ok(format!("\"{}\"", escaped))
}

fn encode_value(value: &Value) -> Result<String, DumpException> {
    match value {
        Value::Null => Ok("null".to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Float(f) => {
            if f.fract() == 0.0 && f.is_finite() {
                Ok(format!("{:.1}", f))
            } else {
                Ok(f.to_string())
            }
        }
        Value::Datetime(dt) => Ok(dt.to_zulu_string()),
        Value::String(s) => encode_string(s),
        Value::Array(items) => {
            let tag = items.first().map(Value::tag);
            for item in items {
                if Some(item.tag()) != tag {
                    return Err(DumpException::new("array elements must share the same value type"));
                }
            }
            let rendered: Result<Vec<String>, DumpException> = items.iter().map(encode_value).collect();
            Ok(format!("[{}]", rendered?.join(", ")))
        }
        Value::Table(_) => Err(DumpException::new(
            "inline tables cannot be emitted via add_value; use add_table/add_array_of_table",
        )),
    }
}

/// Accumulates ZCONF source text from `add_*` calls, discarded once
/// [`Builder::get_string`] extracts the final string (`spec.md` §3
/// Lifecycles).
pub struct Builder {
    config: BuilderConfig,
    key_store: KeyStore,
    out: String,
    wrote_any_line: bool,
}

impl Builder {
    pub fn new() -> Self {
        Self::with_config(BuilderConfig::default())
    }

    pub fn with_config(config: BuilderConfig) -> Self {
        Self {
            config,
            key_store: KeyStore::new(),
            out: String::new(),
            wrote_any_line: false,
        }
    }

    fn newline_if_needed(&mut self) {
        if self.wrote_any_line {
            self.out.push('\n');
        }
        self.wrote_any_line = true;
    }

    /// Emit a standalone `# text` comment line.
    pub fn add_comment(&mut self, text: &str) -> Result<(), DumpException> {
        self.newline_if_needed();
        self.out.push_str("# ");
        self.out.push_str(text);
        self.out.push('\n');
        Ok(())
    }

    /// Emit a `[a.b.c]` table header, preceded by a blank line unless this
    /// is the very first output line (`spec.md` §4.6).
    pub fn add_table(&mut self, dotted_name: &str) -> Result<(), DumpException> {
        let segments = split_segments(dotted_name)?;
        self.key_store
            .add_table_key(segments.clone())
            .map_err(DumpException::new)?;

        if self.wrote_any_line {
            self.out.push('\n');
        }
        self.wrote_any_line = true;
        self.out.push('[');
        self.out.push_str(&segments.iter().map(|s| quote_key(s)).collect::<Vec<_>>().join("."));
        self.out.push_str("]\n");
        Ok(())
    }

    /// Emit a `[[a.b.c]]` array-of-tables header, preceded by a blank line
    /// unless this is the very first output line.
    pub fn add_array_of_table(&mut self, dotted_name: &str) -> Result<(), DumpException> {
        let segments = split_segments(dotted_name)?;
        self.key_store
            .add_array_table_key(segments.clone())
            .map_err(DumpException::new)?;

        if self.wrote_any_line {
            self.out.push('\n');
        }
        self.wrote_any_line = true;
        self.out.push_str("[[");
        self.out.push_str(&segments.iter().map(|s| quote_key(s)).collect::<Vec<_>>().join("."));
        self.out.push_str("]]\n");
        Ok(())
    }

    /// Emit `key = value`, optionally followed by a trailing `# comment`.
    pub fn add_value(&mut self, key: &str, value: Value, comment: Option<&str>) -> Result<(), DumpException> {
        let trimmed = key.trim();
        if trimmed.is_empty() {
            return Err(DumpException::new("a key must be non-empty"));
        }
        self.key_store.add_key(trimmed).map_err(DumpException::new)?;
        let encoded = encode_value(&value)?;

        self.newline_if_needed();
        for _ in 0..self.config.indent_width {
            self.out.push(' ');
        }
        self.out.push_str(&quote_key(trimmed));
        self.out.push_str(" = ");
        self.out.push_str(&encoded);
        if let Some(c) = comment {
            self.out.push_str(" # ");
            self.out.push_str(c);
        }
        self.out.push('\n');
        Ok(())
    }

    /// Consume the builder and return the accumulated source text.
    pub fn get_string(self) -> String {
        self.out
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}
