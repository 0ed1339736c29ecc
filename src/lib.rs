//! # zconf
//!
//! A parser and builder for **ZCONF**, a configuration language compatible
//! with TOML v0.4.0 and extended with a `null` literal.
//!
//! ```
//! let parsed = zconf::parse_string("name = \"example\"\nport = 8080\n", false).unwrap();
//! assert_eq!(
//!     parsed.root().get("port"),
//!     Some(&zconf::Value::Integer(8080))
//! );
//! ```
//!
//! The crate is split into the same components `spec.md` describes: a
//! lexer/token-stream pipeline, a key store for cross-cutting uniqueness
//! rules, a value tree the parser mutates in place, and a [`Builder`] that
//! shares the key store's rules to emit syntactically valid ZCONF source.
//! Most of these are internal plumbing; the public surface is
//! [`parse_string`], [`parse_file`], [`Builder`], [`Value`], and the error
//! types [`ParseException`]/[`DumpException`].

mod builder;
mod config;
mod entry;
mod error;
mod key_store;
mod lexer;
mod parser;
mod print;
mod token;
mod token_stream;
mod util;
mod value;
mod value_tree;

pub use builder::Builder;
pub use config::{BuilderConfig, ParserConfig};
pub use entry::{parse_file, parse_file_with_config, parse_string, parse_string_with_config, Document, Parsed};
pub use error::{DumpException, ParseException};
pub use token::{Token, TokenKind};
pub use util::{Position, Trace};
pub use value::{Datetime, Table, Time, Value, ValueTag};
