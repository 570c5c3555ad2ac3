//! Console input and locale-invariant number parsing.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::error::{HarnessError, HarnessResult};

/// A source of prompted input lines.
pub trait LineSource: Send {
    /// Show `prompt`, then read one line. Returns `Ok(None)` at end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Prompt on a writer, read from a buffered reader.
pub struct Console<R, W> {
    reader: R,
    writer: W,
}

impl Console<io::BufReader<io::Stdin>, io::Stdout> {
    /// Console bound to the process stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Create a console over arbitrary streams.
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Consume the console, returning the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead + Send, W: Write + Send> LineSource for Console<R, W> {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        writeln!(self.writer, "{prompt}")?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Pre-supplied input lines. Prompts are recorded, not printed.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedInput {
    /// Create a source that yields `lines` in order.
    pub fn new(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Prompts shown so far.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front())
    }
}

/// Parse a real number using the invariant format (`.` decimal separator,
/// optional exponent, no grouping). Surrounding whitespace is ignored.
///
/// No range is enforced here.
pub fn parse_real(text: &str) -> HarnessResult<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(HarnessError::invalid_input(text, "expected a real number"));
    }
    trimmed
        .parse::<f64>()
        .map_err(|err| HarnessError::invalid_input(text, err.to_string()))
}

/// Prompt for and parse one real number from `source`.
pub fn read_real(source: &mut dyn LineSource, prompt: &str) -> HarnessResult<f64> {
    let line = source
        .read_line(prompt)
        .map_err(|err| HarnessError::invalid_input("", format!("failed to read input: {err}")))?
        .ok_or_else(|| HarnessError::invalid_input("", "end of input"))?;
    parse_real(&line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_real_accepts_invariant_forms() {
        assert_eq!(parse_real("0.5").unwrap(), 0.5);
        assert_eq!(parse_real("  1 ").unwrap(), 1.0);
        assert_eq!(parse_real("-0.25").unwrap(), -0.25);
        assert_eq!(parse_real("2.5e-1").unwrap(), 0.25);
        assert_eq!(parse_real(".75").unwrap(), 0.75);
        // Out-of-range values are the operation's concern.
        assert_eq!(parse_real("3").unwrap(), 3.0);
    }

    #[test]
    fn test_parse_real_accepts_non_finite_literals() {
        // Parsing stays permissive; operations reject values they cannot use.
        assert_eq!(parse_real("inf").unwrap(), f64::INFINITY);
        assert_eq!(parse_real("Infinity").unwrap(), f64::INFINITY);
        assert_eq!(parse_real("-inf").unwrap(), f64::NEG_INFINITY);
        assert!(parse_real("NaN").unwrap().is_nan());
        assert!(parse_real(" nan ").unwrap().is_nan());
    }

    #[test]
    fn test_parse_real_rejects_malformed() {
        for text in ["not-a-number", "", "   ", "0,5", "1 000", "0.5.1", "½"] {
            let err = parse_real(text).unwrap_err();
            assert!(
                matches!(err, HarnessError::InvalidInput { .. }),
                "{text:?} should be invalid"
            );
        }
    }

    #[test]
    fn test_console_prompts_and_reads_line() {
        let mut console = Console::new("0.3\r\n".as_bytes(), Vec::new());
        let value = read_real(&mut console, "Pick a number:").unwrap();
        assert_eq!(value, 0.3);
        assert_eq!(console.into_writer(), b"Pick a number:\n");
    }

    #[test]
    fn test_console_end_of_input_is_invalid() {
        let mut console = Console::new("".as_bytes(), Vec::new());
        let err = read_real(&mut console, "?").unwrap_err();
        assert_eq!(err.to_string(), "Invalid input \"\": end of input");
    }

    #[test]
    fn test_scripted_input_records_prompts() {
        let mut input = ScriptedInput::new(["1", "2"]);
        assert_eq!(read_real(&mut input, "first").unwrap(), 1.0);
        assert_eq!(read_real(&mut input, "second").unwrap(), 2.0);
        assert!(read_real(&mut input, "third").is_err());
        assert_eq!(input.prompts(), ["first", "second", "third"]);
    }
}
