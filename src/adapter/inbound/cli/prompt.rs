//! Interactive answers: dialoguer widgets on a terminal, one line per
//! answer from stdin otherwise.

use std::io::{self, BufRead, IsTerminal};

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::error::{Error, Result, ValidationError};

/// Source of answers for interactive commands.
pub trait Prompter {
    /// Pick one of `items`, returning its index.
    fn select(&mut self, prompt: &str, items: &[String], default: usize) -> Result<usize>;

    /// Free-form text.
    fn input(&mut self, prompt: &str) -> Result<String>;

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;
}

/// Prompter for the current process: terminal widgets when stdin is a TTY.
#[must_use]
pub fn stdin_prompter() -> Box<dyn Prompter> {
    if io::stdin().is_terminal() {
        Box::new(TerminalPrompter::default())
    } else {
        Box::new(LinePrompter::new(io::stdin().lock()))
    }
}

#[derive(Default)]
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl Prompter for TerminalPrompter {
    fn select(&mut self, prompt: &str, items: &[String], default: usize) -> Result<usize> {
        Ok(Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()?)
    }

    fn input(&mut self, prompt: &str) -> Result<String> {
        Ok(Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .interact_text()?)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }
}

/// Reads newline-delimited answers, one per prompt.
///
/// A selection may be given as the item text (any case) or its 1-based
/// position; a blank line takes the default. End of input cancels.
pub struct LinePrompter<R> {
    reader: R,
}

impl<R: BufRead> LinePrompter<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    fn next_line(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(Error::Cancelled);
        }
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead> Prompter for LinePrompter<R> {
    fn select(&mut self, _prompt: &str, items: &[String], default: usize) -> Result<usize> {
        let answer = self.next_line()?;
        if answer.is_empty() {
            return Ok(default);
        }
        if let Some(index) = items.iter().position(|i| i.eq_ignore_ascii_case(&answer)) {
            return Ok(index);
        }
        match answer.parse::<usize>() {
            Ok(n) if (1..=items.len()).contains(&n) => Ok(n - 1),
            _ => Err(ValidationError::InvalidChoice {
                answer,
                options: items.join(", "),
            }
            .into()),
        }
    }

    fn input(&mut self, _prompt: &str) -> Result<String> {
        self.next_line()
    }

    fn confirm(&mut self, _prompt: &str, default: bool) -> Result<bool> {
        let answer = self.next_line()?;
        Ok(match answer.to_ascii_lowercase().as_str() {
            "" => default,
            "y" | "yes" => true,
            _ => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn items() -> Vec<String> {
        vec!["USDC".into(), "USDT".into(), "DAI".into()]
    }

    #[test]
    fn select_accepts_text_position_or_blank() {
        let mut prompter = LinePrompter::new(Cursor::new("usdt\n3\n\n"));
        assert_eq!(prompter.select("from", &items(), 0).unwrap(), 1);
        assert_eq!(prompter.select("from", &items(), 0).unwrap(), 2);
        assert_eq!(prompter.select("from", &items(), 0).unwrap(), 0);
    }

    #[test]
    fn select_rejects_unknown_answer() {
        let mut prompter = LinePrompter::new(Cursor::new("WBTC\n"));
        assert!(prompter.select("from", &items(), 0).is_err());

        let mut prompter = LinePrompter::new(Cursor::new("4\n"));
        assert!(prompter.select("from", &items(), 0).is_err());
    }

    #[test]
    fn input_is_trimmed() {
        let mut prompter = LinePrompter::new(Cursor::new("  12.5 \r\n"));
        assert_eq!(prompter.input("amount").unwrap(), "12.5");
    }

    #[test]
    fn end_of_input_cancels() {
        let mut prompter = LinePrompter::new(Cursor::new(""));
        assert!(matches!(prompter.input("amount"), Err(Error::Cancelled)));
    }

    #[test]
    fn confirm_needs_explicit_yes() {
        let mut prompter = LinePrompter::new(Cursor::new("y\nno\n\nYES\n"));
        assert!(prompter.confirm("go?", false).unwrap());
        assert!(!prompter.confirm("go?", true).unwrap());
        assert!(prompter.confirm("go?", true).unwrap());
        assert!(prompter.confirm("go?", false).unwrap());
    }
}
