// ABOUTME: Plain numbered prompt that reads a single 1-based choice from a line of input
// ABOUTME: Used when stdin is not a terminal or when the interactive list is turned off

use crate::error::WandError;
use crate::ui::Picker;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

pub struct NumberedPicker<R, W> {
    input: R,
    output: W,
}

impl NumberedPicker<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> NumberedPicker<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn prompt(&mut self, title: &str, options: &[String]) -> io::Result<String> {
        writeln!(self.output, "{title}:")?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, option)?;
        }
        write!(self.output, "Enter number: ")?;
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line)
    }
}

impl<R: BufRead, W: Write> Picker for NumberedPicker<R, W> {
    fn pick(&mut self, title: &str, options: &[String]) -> Result<Option<usize>, WandError> {
        let line = self.prompt(title, options).map_err(WandError::Terminal)?;
        parse_choice(&line, options.len()).map(Some)
    }
}

/// Turns a 1-based entry into a 0-based index. No re-prompting on bad input.
fn parse_choice(line: &str, len: usize) -> Result<usize, WandError> {
    let entry = line.trim();
    match entry.parse::<usize>() {
        Ok(n) if (1..=len).contains(&n) => Ok(n - 1),
        _ => Err(WandError::InvalidSelection(entry.to_string())),
    }
}
