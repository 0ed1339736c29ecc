//! Public entry surface (`spec.md` §4.7): `parse_string`/`parse_file`, plus
//! the `as_object` container-shape conversion. This is the only place a
//! [`crate::error::SyntaxError`] is ever caught and converted to the public
//! [`ParseException`] — matching `spec.md` §7's propagation policy and
//! grounded in `lang-pt`'s `src/lib.rs` doc-comment usage pattern
//! (`DefaultParser::new(...).parse()`) for a small, direct public API.

use std::io;
use std::path::Path;

use crate::config::ParserConfig;
use crate::error::ParseException;
use crate::parser::Parser;
use crate::value::Table;

/// A parsed document's outermost shape. `parse_string`/`parse_file` return
/// `Document` when `as_object` is `false` (bare root `Table`) and `Value`
/// when it is `true` — an opaque record-like wrapper over the same keys and
/// values, per `spec.md` §4.7 ("same keys, same values, just a different
/// container shape for the root").
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    Document(Document),
    Object(Document),
}

impl Parsed {
    /// Borrow the parsed root regardless of which variant this is — both
    /// carry the same underlying table.
    pub fn root(&self) -> &Table {
        match self {
            Parsed::Document(d) | Parsed::Object(d) => &d.0,
        }
    }

    pub fn into_root(self) -> Table {
        match self {
            Parsed::Document(d) | Parsed::Object(d) => d.0,
        }
    }
}

/// Opaque wrapper around the root [`Table`]. Its only purpose is to give
/// `as_object = true` callers a distinct container type from the bare
/// `Table` that `as_object = false` returns, per `spec.md` §4.7; the keys
/// and values inside are identical either way.
#[derive(Debug, Clone, PartialEq)]
pub struct Document(Table);

impl Document {
    pub fn get(&self, key: &str) -> Option<&crate::value::Value> {
        self.0.get(key)
    }

    pub fn as_table(&self) -> &Table {
        &self.0
    }
}

fn wrap(root: Table, as_object: bool) -> Parsed {
    if as_object {
        Parsed::Object(Document(root))
    } else {
        Parsed::Document(Document(root))
    }
}

fn snippet_for(source: &str, line: usize) -> Option<String> {
    source.split('\n').nth(line.saturating_sub(1)).map(|s| s.trim().to_string())
}

/// Parse `input` with the default [`ParserConfig`]. See
/// [`parse_string_with_config`] to gate the `null` extension.
pub fn parse_string(input: &str, as_object: bool) -> Result<Parsed, ParseException> {
    parse_string_with_config(input, as_object, ParserConfig::default())
}

pub fn parse_string_with_config(
    input: &str,
    as_object: bool,
    config: ParserConfig,
) -> Result<Parsed, ParseException> {
    let root = Parser::new(input, config, crate::util::Trace::None)
        .and_then(|p| p.parse())
        .map_err(|err| {
            let snippet = snippet_for(input, err.position.line);
            ParseException::from_syntax_error(err, None, snippet)
        })?;
    Ok(wrap(root, as_object))
}

/// Parse the UTF-8 contents of the file at `path`. Distinguishes "file does
/// not exist" from "file exists but is not readable" per `spec.md` §4.7, and
/// attaches `path` to any [`ParseException`] produced.
pub fn parse_file(path: impl AsRef<Path>, as_object: bool) -> Result<Parsed, ParseException> {
    parse_file_with_config(path, as_object, ParserConfig::default())
}

pub fn parse_file_with_config(
    path: impl AsRef<Path>,
    as_object: bool,
    config: ParserConfig,
) -> Result<Parsed, ParseException> {
    let path = path.as_ref();
    let filename = path.to_string_lossy().to_string();

    let bytes = std::fs::read(path).map_err(|err| {
        let message = match err.kind() {
            io::ErrorKind::NotFound => "file does not exist".to_string(),
            _ => format!("file is not readable: {}", err),
        };
        ParseException::structural(message, Some(&filename))
    })?;
    let input = String::from_utf8(bytes)
        .map_err(|_| ParseException::structural("file is not valid UTF-8", Some(&filename)))?;

    let root = Parser::new(&input, config, crate::util::Trace::None)
        .and_then(|p| p.parse())
        .map_err(|err| {
            let snippet = snippet_for(&input, err.position.line);
            ParseException::from_syntax_error(err, Some(&filename), snippet)
        })?;
    Ok(wrap(root, as_object))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_string_empty_input_yields_empty_table() {
        let parsed = parse_string("", false).unwrap();
        assert!(parsed.root().is_empty());
    }

    #[test]
    fn parse_string_reports_line_and_snippet() {
        let err = parse_string("dup = 1\ndup = 2\n", false).unwrap_err();
        assert_eq!(err.line, Some(2));
        assert_eq!(err.snippet.as_deref(), Some("dup = 2"));
    }

    #[test]
    fn as_object_preserves_keys_and_values() {
        let doc = parse_string("a = 1\n", false).unwrap();
        let obj = parse_string("a = 1\n", true).unwrap();
        assert_eq!(doc.root().get("a"), obj.root().get("a"));
        assert!(matches!(doc, Parsed::Document(_)));
        assert!(matches!(obj, Parsed::Object(_)));
    }

    #[test]
    fn parse_file_missing_file_is_distinguishable() {
        let err = parse_file("/nonexistent/path/to/zconf-test-file.toml", false).unwrap_err();
        assert!(err.message.contains("does not exist"));
    }

    #[test]
    fn parse_file_reads_and_parses_real_file() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("zconf-entry-test-{}.toml", std::process::id()));
        std::fs::write(&path, b"a = 1\n").unwrap();
        let parsed = parse_file(&path, false).unwrap();
        assert_eq!(parsed.root().get("a"), Some(&crate::value::Value::Integer(1)));
        std::fs::remove_file(&path).ok();
    }
}
