//! End-to-end parser tests exercising `spec.md` §8's concrete scenarios and
//! boundary behaviors against the full Lexer → Token Stream → Parser
//! pipeline (as opposed to the unit tests embedded in each module, which
//! exercise one piece in isolation).

use crate::config::ParserConfig;
use crate::util::Trace;
use crate::value::Value;

use super::Parser;

fn parse(src: &str) -> Value {
    Value::Table(
        Parser::new(src, ParserConfig::default(), Trace::None)
            .unwrap()
            .parse()
            .unwrap(),
    )
}

fn parse_err(src: &str) -> String {
    match Parser::new(src, ParserConfig::default(), Trace::None).and_then(|p| p.parse()) {
        Ok(_) => panic!("expected a syntax error for {:?}", src),
        Err(e) => e.message,
    }
}

/// Scenario 1: `key = [1,2,3]` → `{ key: [1,2,3] }`.
#[test]
fn scenario_flat_array() {
    let root = parse("key = [1,2,3]\n");
    let table = root.as_table().unwrap();
    assert_eq!(
        table.get("key"),
        Some(&Value::Array(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]))
    );
}

/// Scenario 2: nested table headers reposition the cursor and leave the
/// parent's earlier keys untouched.
#[test]
fn scenario_nested_table_headers() {
    let root = parse("[a]\nx = 1\n[a.b]\ny = 2\n");
    let a = root.as_table().unwrap().get("a").unwrap().as_table().unwrap();
    assert_eq!(a.get("x"), Some(&Value::Integer(1)));
    let b = a.get("b").unwrap().as_table().unwrap();
    assert_eq!(b.get("y"), Some(&Value::Integer(2)));
}

/// Scenario 3: array-of-tables give each element its own namespace, and a
/// nested array-of-tables only applies to the parent element it was
/// declared under.
#[test]
fn scenario_nested_array_of_tables() {
    let root = parse(
        "[[fruit]]\nname = \"apple\"\n[[fruit.variety]]\nname = \"red\"\n[[fruit]]\nname = \"banana\"\n",
    );
    let fruit = root.as_table().unwrap().get("fruit").unwrap().as_array().unwrap();
    assert_eq!(fruit.len(), 2);

    let apple = fruit[0].as_table().unwrap();
    assert_eq!(apple.get("name"), Some(&Value::String("apple".into())));
    let variety = apple.get("variety").unwrap().as_array().unwrap();
    assert_eq!(variety.len(), 1);
    assert_eq!(
        variety[0].as_table().unwrap().get("name"),
        Some(&Value::String("red".into()))
    );

    let banana = fruit[1].as_table().unwrap();
    assert_eq!(banana.get("name"), Some(&Value::String("banana".into())));
    assert!(banana.get("variety").is_none());
}

/// Scenario 4: apostrophe-quoted strings are literal; the `@` convention is
/// a Builder-side-only thing and has no effect when parsing.
#[test]
fn scenario_literal_string_at_sign_is_inert_on_parse() {
    let root = parse("k = '@literal'\n");
    assert_eq!(
        root.as_table().unwrap().get("k"),
        Some(&Value::String("@literal".into()))
    );
}

/// Scenario 5: a duplicate key at the same scope fails on the second
/// declaration, at its own line.
#[test]
fn scenario_duplicate_key_fails_on_second_line() {
    let err = Parser::new("dup = 1\ndup = 2\n", ParserConfig::default(), Trace::None)
        .unwrap()
        .parse()
        .unwrap_err();
    assert_eq!(err.position.line, 2);
}

#[test]
fn boundary_empty_input_yields_empty_table() {
    let root = parse("");
    assert!(root.as_table().unwrap().is_empty());
}

#[test]
fn boundary_integer_bad_underscore_placement() {
    assert!(parse_err("a = 1_\n").contains("underscore"));
    assert!(parse_err("a = _0\n").len() > 0);
}

#[test]
fn boundary_integer_leading_zero() {
    assert!(parse_err("a = 01\n").contains("leading zero"));
}

#[test]
fn boundary_malformed_float_literals() {
    for src in ["a = 1_.0\n", "a = 1._0\n", "a = 1e_1\n", "a = 1_e1\n"] {
        parse_err(src);
    }
}

#[test]
fn boundary_mixed_type_array() {
    assert!(parse_err("a = [1, \"a\"]\n").contains("same value type"));
}

#[test]
fn boundary_duplicate_table_header() {
    assert!(parse_err("[a]\n[a]\n").contains("conflicts"));
}

#[test]
fn boundary_implicit_array_parent_rejects_array_table() {
    // `[[a.b]]` makes `a` an implicit array-of-tables parent; `[[a]]` then
    // conflicts with that.
    assert!(parse_err("[[a.b]]\n[[a]]\n").len() > 0);
}

#[test]
fn boundary_array_of_tables_then_plain_table() {
    assert!(parse_err("[[a]]\n[a]\n").contains("conflicts"));
}

#[test]
fn boundary_unterminated_basic_string() {
    assert!(parse_err("a = \"unterminated\n").contains("unterminated"));
}

/// `null` is accepted by default, and can be turned off via `ParserConfig`
/// for stricter TOML v0.4.0 compatibility (`spec.md` §9).
#[test]
fn null_literal_gated_by_config() {
    let root = parse("a = null\n");
    assert_eq!(root.as_table().unwrap().get("a"), Some(&Value::Null));

    let strict = ParserConfig { allow_null: false };
    let err = Parser::new("a = null\n", strict, Trace::None)
        .unwrap()
        .parse()
        .unwrap_err();
    assert!(err.message.contains("null"));
}

/// An integer lexeme is accepted as a bare key, the lenient extension
/// `spec.md` §9 calls out as an open question to preserve rather than fix.
#[test]
fn integer_literal_as_bare_key() {
    let root = parse("123 = \"numeric key\"\n");
    assert_eq!(
        root.as_table().unwrap().get("123"),
        Some(&Value::String("numeric key".into()))
    );
}

#[test]
fn inline_table_values_live_under_the_outer_key() {
    let root = parse("point = { x = 1, y = 2 }\n");
    let point = root.as_table().unwrap().get("point").unwrap().as_table().unwrap();
    assert_eq!(point.get("x"), Some(&Value::Integer(1)));
    assert_eq!(point.get("y"), Some(&Value::Integer(2)));
}

#[test]
fn multiline_basic_string_drops_leading_newline_and_handles_continuation() {
    let root = parse("s = \"\"\"\nhello \\\n   world\"\"\"\n");
    assert_eq!(
        root.as_table().unwrap().get("s"),
        Some(&Value::String("hello world".into()))
    );
}

/// `Value::print_tree` (backed by `ptree`) should not panic on a populated
/// tree; this is the crate's only non-parser ambient tool surface, so it
/// gets at least one smoke test.
#[test]
fn print_tree_does_not_panic() {
    let root = parse("[a]\nx = 1\narr = [1, 2]\n");
    root.print_tree().unwrap();
}

/// Expected nested structures expressed with `serde_json::json!` for
/// concision, converted into this crate's own `Value` tree and compared
/// directly (`spec.md` §A.4 ambient test tooling).
fn from_json(v: &serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) if n.is_i64() => Value::Integer(n.as_i64().unwrap()),
        serde_json::Value::Number(n) => Value::Float(n.as_f64().unwrap()),
        serde_json::Value::String(s) => Value::String(s.clone()),
        serde_json::Value::Array(a) => Value::Array(a.iter().map(from_json).collect()),
        serde_json::Value::Object(map) => {
            let mut table = crate::value::Table::new();
            for (k, v) in map {
                table.insert(k.clone(), from_json(v));
            }
            Value::Table(table)
        }
    }
}

#[test]
fn scenario_flat_array_matches_json_expectation() {
    let root = parse("key = [1,2,3]\n");
    let expected = from_json(&serde_json::json!({ "key": [1, 2, 3] }));
    assert_eq!(root, expected);
}
