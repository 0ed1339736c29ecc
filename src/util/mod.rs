//! Small cross-cutting helpers shared by the lexer, parser and builder:
//! source position tracking and opt-in debug tracing.

mod position;
mod trace;

pub use position::Position;
pub use trace::Trace;

use once_cell::unsync::OnceCell;

/// An owned source text wrapper that lazily indexes line breaks so that any
/// byte offset can be turned into a 1-based [`Position`] without rescanning
/// the whole input each time. Owns its text (rather than borrowing) so the
/// Parser can normalize newlines/tabs once and then hold both the text and
/// everything that borrows from it in the same struct.
pub struct Code {
    pub value: String,
    line_breaks: OnceCell<Vec<usize>>,
}

impl From<String> for Code {
    fn from(value: String) -> Self {
        Code::new(value)
    }
}

impl Code {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            line_breaks: OnceCell::new(),
        }
    }

    fn obtain_line_breaks(&self) -> &Vec<usize> {
        self.line_breaks.get_or_init(|| {
            self.value
                .char_indices()
                .filter_map(|(index, c)| if c == '\n' { Some(index) } else { None })
                .collect()
        })
    }

    /// Resolve a byte offset into the source to a 1-based line/column pair.
    pub fn obtain_position(&self, pointer: usize) -> Position {
        let line_breaks = self.obtain_line_breaks();
        let index = match line_breaks.binary_search(&pointer) {
            Ok(index) | Err(index) => index,
        };
        if index == 0 {
            Position::new(1, pointer + 1)
        } else {
            let break_point = line_breaks[index - 1] + 1;
            Position::new(index + 1, pointer - break_point + 1)
        }
    }

    /// Return the full text of a single 1-based source line, for error
    /// snippets. Returns an empty string for an out-of-range line.
    pub fn line_text(&self, line: usize) -> &str {
        self.value.split('\n').nth(line.saturating_sub(1)).unwrap_or("")
    }
}
