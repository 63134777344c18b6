//! Input and output collaborators.
//!
//! The engine reads typed values through [`Input`] and writes text through
//! [`Output`]. Both are plain blocking calls.

use std::io::{self, BufRead, Write};

use ippcode_common::argument::parse_int;

/// Source of values for READ.
///
/// Every method returns `None` at end of input or when the next line does
/// not parse as the requested type.
pub trait Input {
    fn read_int(&mut self) -> Option<i64>;
    fn read_bool(&mut self) -> Option<bool>;
    fn read_string(&mut self) -> Option<String>;
}

/// Sink for WRITE.
pub trait Output {
    fn write_str(&mut self, text: &str) -> io::Result<()>;
}

impl<W: Write> Output for W {
    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.write_all(text.as_bytes())
    }
}

/// Line-oriented [`Input`]: each read consumes one line.
#[derive(Debug)]
pub struct LineInput<R> {
    reader: R,
}

impl<R: BufRead> LineInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    fn next_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                if line.ends_with('\n') {
                    line.pop();
                    if line.ends_with('\r') {
                        line.pop();
                    }
                }
                Some(line)
            }
        }
    }
}

impl<R: BufRead> Input for LineInput<R> {
    fn read_int(&mut self) -> Option<i64> {
        let line = self.next_line()?;
        parse_int(line.trim()).ok()
    }

    fn read_bool(&mut self) -> Option<bool> {
        let line = self.next_line()?;
        let word = line.trim();
        if word.eq_ignore_ascii_case("true") {
            Some(true)
        } else if word.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }

    fn read_string(&mut self) -> Option<String> {
        self.next_line()
    }
}

/// An [`Input`] that is always at end of input.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl Input for NoInput {
    fn read_int(&mut self) -> Option<i64> {
        None
    }

    fn read_bool(&mut self) -> Option<bool> {
        None
    }

    fn read_string(&mut self) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_typed_lines() {
        let mut input = LineInput::new("42\ntrue\nhello world\n".as_bytes());
        assert_eq!(input.read_int(), Some(42));
        assert_eq!(input.read_bool(), Some(true));
        assert_eq!(input.read_string(), Some("hello world".to_string()));
        assert_eq!(input.read_string(), None);
    }

    #[test]
    fn unparsable_lines_are_none() {
        let mut input = LineInput::new("forty\nyes\n".as_bytes());
        assert_eq!(input.read_int(), None);
        assert_eq!(input.read_bool(), None);
    }

    #[test]
    fn bool_ignores_case_and_padding() {
        let mut input = LineInput::new("  TRUE \nFalse\n".as_bytes());
        assert_eq!(input.read_bool(), Some(true));
        assert_eq!(input.read_bool(), Some(false));
    }

    #[test]
    fn crlf_and_missing_final_newline() {
        let mut input = LineInput::new("a\r\nb".as_bytes());
        assert_eq!(input.read_string(), Some("a".to_string()));
        assert_eq!(input.read_string(), Some("b".to_string()));
        assert_eq!(input.read_string(), None);
    }

    #[test]
    fn empty_line_is_empty_string() {
        let mut input = LineInput::new("\n".as_bytes());
        assert_eq!(input.read_string(), Some(String::new()));
    }

    #[test]
    fn int_accepts_hex() {
        let mut input = LineInput::new("0x10\n".as_bytes());
        assert_eq!(input.read_int(), Some(16));
    }

    #[test]
    fn vec_is_an_output() {
        let mut out = Vec::new();
        out.write_str("ab").unwrap();
        out.write_str("c").unwrap();
        assert_eq!(out, b"abc");
    }

    #[test]
    fn no_input_is_always_eof() {
        let mut input = NoInput;
        assert_eq!(input.read_int(), None);
        assert_eq!(input.read_bool(), None);
        assert_eq!(input.read_string(), None);
    }
}
