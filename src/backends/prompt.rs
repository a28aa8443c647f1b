//! Terminal quick-select prompt
//!
//! The list goes to stderr so stdout only ever carries the picked value.
//! Input is one line: 1-based numbers separated by commas or spaces. A blank
//! line, `q` or end of input cancels.

use colored::Colorize;
use std::io::{self, BufRead, BufReader, Stderr, Stdin, Write};

use crate::backends::{PromptOptions, Prompter, QuickPickItem};
use crate::core::error::Result;

/// Outcome of parsing one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineSelection {
    Cancel,
    Picked(Vec<usize>),
    Invalid(String),
}

/// Parse an answer line into 0-based indices
pub fn parse_selection(line: &str, count: usize, many: bool) -> LineSelection {
    let line = line.trim();
    if line.is_empty() || line.eq_ignore_ascii_case("q") {
        return LineSelection::Cancel;
    }

    let mut picked: Vec<usize> = Vec::new();
    for token in line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        let number: usize = match token.parse() {
            Ok(n) => n,
            Err(_) => return LineSelection::Invalid(format!("not a number: {}", token)),
        };
        if number == 0 || number > count {
            return LineSelection::Invalid(format!("out of range: {} (1-{})", number, count));
        }
        if !picked.contains(&(number - 1)) {
            picked.push(number - 1);
        }
    }

    if !many && picked.len() > 1 {
        return LineSelection::Invalid("only one entry can be selected".to_string());
    }

    LineSelection::Picked(picked)
}

/// Quick-select list on a terminal
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompter<BufReader<Stdin>, Stderr> {
    /// Prompt on stderr, read answers from stdin
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    fn print_list(&mut self, items: &[QuickPickItem], options: &PromptOptions) -> io::Result<()> {
        if let Some(title) = &options.title {
            writeln!(self.output, "{}", title.bold())?;
        }
        if let Some(placeholder) = &options.placeholder {
            writeln!(self.output, "{}", placeholder.dimmed())?;
        }

        let width = items.len().to_string().len();
        for (i, item) in items.iter().enumerate() {
            let label = if item.is_dir {
                item.label.blue().bold().to_string()
            } else {
                item.label.clone()
            };
            writeln!(self.output, "  {:>width$}) {}", i + 1, label, width = width)?;
        }

        if options.can_pick_many {
            write!(
                self.output,
                "Select one or more [1-{}], separated by commas (blank to cancel): ",
                items.len()
            )?;
        } else {
            write!(self.output, "Select [1-{}] (blank to cancel): ", items.len())?;
        }
        self.output.flush()
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn prompt(
        &mut self,
        items: &[QuickPickItem],
        options: &PromptOptions,
    ) -> Result<Option<Vec<usize>>> {
        if items.is_empty() {
            if let Some(placeholder) = &options.placeholder {
                writeln!(self.output, "{}", placeholder.dimmed())?;
            }
            writeln!(self.output, "no entries")?;
            return Ok(None);
        }

        loop {
            self.print_list(items, options)?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(None);
            }

            match parse_selection(&line, items.len(), options.can_pick_many) {
                LineSelection::Cancel => return Ok(None),
                LineSelection::Picked(indices) => return Ok(Some(indices)),
                LineSelection::Invalid(reason) => {
                    writeln!(self.output, "{}", reason.red())?;
                }
            }
        }
    }
}
