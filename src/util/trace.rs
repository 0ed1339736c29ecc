use std::fmt::Display;

use super::Code;

/// Opt-in debug verbosity for the [`crate::Lexer`] and [`crate::Parser`].
///
/// Every call site that uses this is compiled to nothing in release builds;
/// in debug builds it prints one line per event to stdout. This crate has no
/// other logging surface — there is no background service or request loop to
/// instrument, just a single-shot parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Trace {
    #[default]
    None,
    /// Trace every token produced by the lexer.
    Tokens,
    /// `Tokens`, plus every Key Store registration (tables, array-of-tables,
    /// leaf keys).
    Keys,
    /// Everything above, plus parser production entry/exit.
    Verbose,
}

impl Trace {
    #[cfg(debug_assertions)]
    pub(crate) fn token<T: Display>(&self, kind: T, lexeme: &str, code: &Code, pointer: usize) {
        if *self >= Trace::Tokens {
            println!(
                "[zconf; token]: {} {:?} at {}",
                kind,
                lexeme,
                code.obtain_position(pointer)
            );
        }
    }

    #[cfg(not(debug_assertions))]
    pub(crate) fn token<T>(&self, _kind: T, _lexeme: &str, _code: &Code, _pointer: usize) {}

    #[cfg(debug_assertions)]
    pub(crate) fn key(&self, what: &str, path: &str) {
        if *self >= Trace::Keys {
            println!("[zconf; key]: {} '{}'", what, path);
        }
    }

    #[cfg(not(debug_assertions))]
    pub(crate) fn key(&self, _what: &str, _path: &str) {}
}
