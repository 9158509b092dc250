#![allow(clippy::module_inception)]

use std::path::Path;

use crate::errors::errors::{Error, ErrorTip};

pub mod errors;
pub mod lexer;
pub mod logging;
pub mod macros;

extern crate regex;

/// Byte offset into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end.0 - self.start.0
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Resolves a byte offset to `(line_number, line_text, column)` for display.
/// Lines are 1-based, the column is a byte offset within the line.
pub fn get_line_at_position(source: &str, position: usize) -> Option<(usize, String, usize)> {
    let mut start = 0;

    for (index, line) in source.split_inclusive('\n').enumerate() {
        let end = start + line.len();

        if (start..end).contains(&position) {
            return Some((index + 1, line.to_string(), position - start));
        }

        start = end;
    }

    None
}

#[cfg(test)]
mod tests {
    const SOURCE: &str = "Hello, world!\nlet x = 1\n\nTesting { }\n";

    #[test]
    fn test_get_line_at_position() {
        let (line_number, line, line_pos) = super::get_line_at_position(SOURCE, 10).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::get_line_at_position(SOURCE, 33).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, "Testing { }\n");
        assert_eq!(line_pos, 8);
    }

    #[test]
    fn test_get_line_past_end() {
        assert!(super::get_line_at_position(SOURCE, SOURCE.len()).is_none());
        assert!(super::get_line_at_position("", 0).is_none());
    }

    #[test]
    fn test_caret_column_counts_characters() {
        assert_eq!(super::caret_column("let a = @\n", 8), ("let a = @", 9));
        assert_eq!(super::caret_column("\t\tlet a = @", 10), ("let a = @", 9));
        assert_eq!(super::caret_column("  \"é\" @", 7), ("\"é\" @", 5));
    }

    #[test]
    fn test_span_len() {
        let span = super::Span { start: super::Position(3), end: super::Position(7) };
        assert_eq!(span.len(), 4);
        assert!(!span.is_empty());
    }
}

pub fn display_error(error: &Error, file: &Path, source: &str) {
    /*
        error: message
        -> final.lang
           |
        20 | let a = @;
           | --------^
    */

    if let ErrorTip::None = error.get_tip() {
        eprintln!("Error: {}", error);
    } else {
        eprintln!("Error: {} ({})", error, error.get_tip());
    }
    eprintln!("-> {}", file.as_os_str().to_string_lossy());

    let Some((line, line_text, line_pos)) = get_line_at_position(source, error.get_position().0) else {
        return;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    eprintln!("{:>padding$}", "|");

    let (line_text_removed, arrows) = caret_column(&line_text, line_pos);
    eprintln!("{} | {}", line_string, line_text_removed);

    eprintln!("{:>padding$} {:->arrows$}", "|", "^");
}

/// Strips leading whitespace from `line` and returns it with the 1-based
/// character column of byte offset `line_pos` in the stripped text.
pub fn caret_column(line: &str, line_pos: usize) -> (&str, usize) {
    let stripped = line.trim_start();
    let removed = line.len() - stripped.len();

    let column = line
        .get(removed..line_pos.max(removed))
        .map_or(0, |prefix| prefix.chars().count());

    (stripped.trim_end(), column + 1)
}
