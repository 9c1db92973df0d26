mod config;
mod repl;
mod report;
mod runner;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use hermes_types::{Diagnostic, ErrorKind};

use config::{ConfigSource, DEFAULT_CONFIG_FILE};
use report::{report, ErrorFormat};

#[derive(Parser)]
#[command(name = "hermes", author, version, about = "Run Hermes scripts or start a REPL")]
struct Cli {
    /// Script to run. Without one the REPL starts.
    file: Option<PathBuf>,

    /// Start the REPL even when a file is given (after running it).
    #[arg(short, long)]
    interactive: bool,

    /// Config file; generated with defaults when missing.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Directory of `*.hs` modules. Overrides the config file.
    #[arg(long)]
    module_path: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = ErrorFormat::Text)]
    error_format: ErrorFormat,

    /// Print a line on stderr whenever a user module is loaded.
    #[arg(long)]
    trace_imports: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match config::load_or_create(&cli.config) {
        Ok((config, ConfigSource::Loaded)) => config,
        Ok((config, ConfigSource::Generated)) => {
            eprintln!("generated config: {}", cli.config.display());
            config
        }
        Err(err) => {
            report(&Diagnostic::new(ErrorKind::Io, err.to_string()), cli.error_format);
            return ExitCode::FAILURE;
        }
    };

    let module_path = cli.module_path.or_else(|| config.module_dir());
    let mut evaluator = runner::build_evaluator(module_path, cli.trace_imports);

    if let Some(path) = &cli.file {
        if let Err(diagnostic) = runner::run_file(&mut evaluator, path) {
            report(&diagnostic, cli.error_format);
            return ExitCode::FAILURE;
        }
        if !cli.interactive {
            return ExitCode::SUCCESS;
        }
    }

    match repl::start(evaluator, &config.version, cli.error_format) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&Diagnostic::new(ErrorKind::Io, err.to_string()), cli.error_format);
            ExitCode::FAILURE
        }
    }
}
