use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use crate::error::{FixError, Result};

#[cfg(unix)]
const TTY_PATH: &str = "/dev/tty";
#[cfg(windows)]
const TTY_PATH: &str = "CONIN$";

/// Source of yes/no answers from the operator.
pub trait Prompter {
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Reads answers from the controlling terminal, so confirmation still works
/// when stdin is redirected.
#[derive(Debug, Default)]
pub struct TtyPrompter;

impl Prompter for TtyPrompter {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        let tty = File::open(TTY_PATH).map_err(FixError::TerminalUnavailable)?;
        ask(question, BufReader::new(tty), io::stdout()).map_err(FixError::TerminalUnavailable)
    }
}

/// Only a lone `y` or `Y` counts as yes; EOF and blank lines are a no.
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

fn ask<R: BufRead, W: Write>(question: &str, mut input: R, mut output: W) -> io::Result<bool> {
    write!(output, "{}", question)?;
    output.flush()?;

    // Raw bytes: an answer that is not UTF-8 is still just "not y".
    let mut line = Vec::new();
    input.read_until(b'\n', &mut line)?;
    Ok(is_affirmative(&String::from_utf8_lossy(&line)))
}
