//! Line-oriented prompting and numeric coercion.
//!
//! # Invariants
//! - One prompt reads exactly one line; the line terminator is stripped.
//! - End of input surfaces as `ShellError::InputClosed`, never as an empty answer.

use crate::error::{InputError, ShellError, ShellResult};
use std::fmt::Display;
use std::io::{BufRead, Write};

/// Prompt/answer channel over any reader and writer.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes one line of output.
    pub fn say(&mut self, text: impl Display) -> ShellResult<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Writes `prompt` without a newline and reads the answer.
    pub fn ask(&mut self, prompt: &str) -> ShellResult<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ShellError::InputClosed);
        }

        let answer = line.trim_end_matches(['\n', '\r']);
        Ok(answer.to_string())
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

/// Parses an integer, ignoring surrounding whitespace.
pub fn parse_int(text: &str) -> Result<i64, InputError> {
    text.trim().parse().map_err(|_| InputError {
        text: text.to_string(),
    })
}

/// Like [`parse_int`], but an empty answer means "no value".
///
/// Whitespace-only input is not empty and fails to parse.
pub fn parse_optional_int(text: &str) -> Result<Option<i64>, InputError> {
    if text.is_empty() {
        return Ok(None);
    }
    parse_int(text).map(Some)
}

/// Returns `Some(text)` unless the answer is empty.
pub fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Only `y` (any case) confirms.
pub fn is_confirmation(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn ask_strips_line_endings_and_echoes_prompt() {
        let mut prompter = Prompter::new(Cursor::new("Dune\r\nnext\n"), Vec::new());

        assert_eq!(prompter.ask("Title: ").unwrap(), "Dune");
        assert_eq!(prompter.ask("Again: ").unwrap(), "next");
        let output = String::from_utf8(prompter.into_output()).unwrap();
        assert_eq!(output, "Title: Again: ");
    }

    #[test]
    fn ask_reports_closed_input() {
        let mut prompter = Prompter::new(Cursor::new(""), Vec::new());
        assert!(matches!(
            prompter.ask("Title: "),
            Err(ShellError::InputClosed)
        ));
    }

    #[test]
    fn blank_line_is_an_empty_answer_not_closed_input() {
        let mut prompter = Prompter::new(Cursor::new("\n"), Vec::new());
        assert_eq!(prompter.ask("Title: ").unwrap(), "");
    }

    #[test]
    fn parse_int_accepts_padded_numbers_and_rejects_text() {
        assert_eq!(parse_int(" 3011 ").unwrap(), 3011);
        assert_eq!(parse_int("-4").unwrap(), -4);
        assert_eq!(
            parse_int("ten").unwrap_err(),
            InputError {
                text: "ten".to_string()
            }
        );
        assert!(parse_int("").is_err());
        assert!(parse_int("2.5").is_err());
    }

    #[test]
    fn parse_optional_int_treats_only_empty_as_keep() {
        assert_eq!(parse_optional_int("").unwrap(), None);
        assert!(parse_optional_int("  ").is_err());
        assert_eq!(parse_optional_int("7").unwrap(), Some(7));
        assert!(parse_optional_int("seven").is_err());
    }

    #[test]
    fn confirmation_requires_y() {
        assert!(is_confirmation("y"));
        assert!(is_confirmation("Y"));
        assert!(!is_confirmation("yes"));
        assert!(!is_confirmation("n"));
        assert!(!is_confirmation(""));
    }
}
