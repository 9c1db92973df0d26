//! Console channel used by `io.print` and `io.input`.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::error::EvalResult;

/// Where program output goes and where input comes from.
///
/// `Stdio` is the process console. `Captured` keeps printed lines in memory
/// and serves queued input lines, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub enum Console {
    #[default]
    Stdio,
    Captured {
        output: Vec<String>,
        input: VecDeque<String>,
    },
}

impl Console {
    /// An in-memory console with no queued input.
    pub fn captured() -> Self {
        Console::Captured {
            output: Vec::new(),
            input: VecDeque::new(),
        }
    }

    /// An in-memory console that answers `io.input()` with `lines`, in order.
    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Console::Captured {
            output: Vec::new(),
            input: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Write one line of program output.
    pub fn print_line(&mut self, line: &str) -> EvalResult<()> {
        match self {
            Console::Stdio => {
                let mut out = io::stdout().lock();
                writeln!(out, "{line}")?;
                out.flush()?;
            }
            Console::Captured { output, .. } => output.push(line.to_string()),
        }
        Ok(())
    }

    /// Read one line without its line terminator. `None` at end of input.
    pub fn read_line(&mut self) -> EvalResult<Option<String>> {
        match self {
            Console::Stdio => {
                let mut line = String::new();
                if io::stdin().lock().read_line(&mut line)? == 0 {
                    return Ok(None);
                }
                let trimmed = line.trim_end_matches(&['\n', '\r'][..]).len();
                line.truncate(trimmed);
                Ok(Some(line))
            }
            Console::Captured { input, .. } => Ok(input.pop_front()),
        }
    }

    /// Lines printed so far. Always empty for `Stdio`.
    pub fn output(&self) -> &[String] {
        match self {
            Console::Stdio => &[],
            Console::Captured { output, .. } => output,
        }
    }

    /// Drain the captured output.
    pub fn take_output(&mut self) -> Vec<String> {
        match self {
            Console::Stdio => Vec::new(),
            Console::Captured { output, .. } => std::mem::take(output),
        }
    }
}
