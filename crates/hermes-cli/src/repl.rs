//! Interactive read-eval-print loop.

use std::ops::ControlFlow;

use hermes_eval::{run_source, Evaluator};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::report::{report, ErrorFormat};

const PROMPT: &str = ">>> ";

/// Typing this on its own line leaves the REPL.
const EXIT_COMMAND: &str = "exit";

/// What to do with one line of input.
fn classify(line: &str) -> ControlFlow<(), Option<&str>> {
    let trimmed = line.trim();
    if trimmed == EXIT_COMMAND {
        ControlFlow::Break(())
    } else if trimmed.is_empty() {
        ControlFlow::Continue(None)
    } else {
        ControlFlow::Continue(Some(line))
    }
}

/// Run the REPL until `exit` or Ctrl-D. Every line shares `evaluator`;
/// errors are reported and the loop goes on.
pub fn start(
    mut evaluator: Evaluator,
    version: &str,
    format: ErrorFormat,
) -> Result<(), ReadlineError> {
    let mut rl = DefaultEditor::new()?;
    println!("Hermes ({version}) REPL - enter code line by line ({EXIT_COMMAND} to quit)");

    loop {
        let line = match rl.readline(PROMPT) {
            Ok(line) => line,
            // Ctrl-C clears the line
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err),
        };

        let source = match classify(&line) {
            ControlFlow::Break(()) => break,
            ControlFlow::Continue(None) => continue,
            ControlFlow::Continue(Some(source)) => source,
        };
        rl.add_history_entry(source)?;

        if let Err(err) = run_source(&mut evaluator, source) {
            report(&err.to_diagnostic(), format);
        }
    }
    Ok(())
}
