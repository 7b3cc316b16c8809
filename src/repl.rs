//! Read loops feeding lines to an [`Interpreter`].
//!
//! Interactive input goes through `rustyline` with a prompt and history. Batch input
//! is read from a file and each line is echoed before it runs.

use crate::Interpreter;
use anyhow::{Context, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::borrow::Cow;
use std::io::{BufRead, Write};

pub const PROMPT: &str = "wish> ";

/// Ends the loop; never reaches the interpreter.
const EXIT_COMMAND: &str = "exit";

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

fn dispatch(
    interp: &mut Interpreter,
    line: &str,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Flow {
    let line = line.trim();
    if line == EXIT_COMMAND {
        return Flow::Exit;
    }
    if !line.is_empty() {
        interp.execute_line(line, stdout, stderr);
    }
    Flow::Continue
}

/// Prompt for lines on the terminal until end of input or `exit`.
pub fn run_interactive(interp: &mut Interpreter) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    rl.add_history_entry(line.as_str())?;
                }
                if dispatch(interp, &line, &mut stdout, &mut stderr) == Flow::Exit {
                    break;
                }
            }
            // Ctrl-C drops the line being edited
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err).context("failed to read from terminal"),
        }
    }

    Ok(())
}

/// Run every line of `input` until end of input or `exit`.
///
/// Each line is written to `stdout` before it is executed. Bytes that are not valid
/// UTF-8 are replaced with U+FFFD instead of ending the loop.
pub fn run_batch(
    interp: &mut Interpreter,
    mut input: impl BufRead,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<()> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let n = input
            .read_until(b'\n', &mut buf)
            .context("failed to read batch file")?;
        if n == 0 {
            break;
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        let line = String::from_utf8_lossy(&buf);
        if let Cow::Owned(_) = line {
            log::warn!("batch line is not valid UTF-8, decoded lossily");
        }
        writeln!(stdout, "{}", line)?;
        // the echo must precede anything a child process prints
        stdout.flush()?;
        if dispatch(interp, &line, stdout, stderr) == Flow::Exit {
            break;
        }
    }
    Ok(())
}
