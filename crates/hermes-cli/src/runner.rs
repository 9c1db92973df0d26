//! Building the evaluator and running a whole file.

use std::fs;
use std::path::{Path, PathBuf};

use hermes_eval::{
    run_source, DirectoryResolver, EvalError, EvalOptions, Evaluator, ModuleResolver,
    ResolveError,
};
use hermes_types::ast::Module;
use hermes_types::Diagnostic;
use hermes_types::ErrorKind;

/// Prints `loading module: <name>` on stderr for each module it resolves.
pub struct TracingResolver<R> {
    inner: R,
}

impl<R> TracingResolver<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: ModuleResolver> ModuleResolver for TracingResolver<R> {
    fn resolve(&mut self, name: &str) -> Result<Option<Module>, ResolveError> {
        let module = self.inner.resolve(name)?;
        if let Some(module) = &module {
            eprintln!("loading module: {}", module.name);
        }
        Ok(module)
    }
}

/// Evaluator configured with the module directory, optionally tracing imports.
pub fn build_evaluator(module_path: Option<PathBuf>, trace_imports: bool) -> Evaluator {
    let options = EvalOptions {
        module_path: module_path.clone(),
        ..EvalOptions::default()
    };
    let evaluator = Evaluator::with_options(options);
    match module_path {
        Some(path) if trace_imports => {
            evaluator.with_resolver(TracingResolver::new(DirectoryResolver::new(path)))
        }
        _ => evaluator,
    }
}

/// Read `path` and run it on `evaluator`. The first error is returned as a diagnostic.
pub fn run_file(evaluator: &mut Evaluator, path: &Path) -> Result<(), Diagnostic> {
    let source = fs::read_to_string(path).map_err(|err| {
        Diagnostic::new(
            ErrorKind::Io,
            format!("cannot read '{}': {err}", path.display()),
        )
    })?;
    run_source(evaluator, &source).map_err(|err: EvalError| err.to_diagnostic())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hermes_eval::Console;

    #[test]
    fn test_missing_file_is_io_diagnostic() {
        let mut evaluator = Evaluator::new().with_console(Console::captured());
        let diag = run_file(&mut evaluator, Path::new("definitely/not/here.hs")).unwrap_err();
        assert_eq!(diag.kind, ErrorKind::Io);
        assert!(diag.message.contains("here.hs"));
    }

    #[test]
    fn test_runs_file_contents() {
        let path = std::env::temp_dir().join(format!("hermes-cli-{}-run.hs", std::process::id()));
        fs::write(&path, "@import io\nio.print(\"hi\", 1 + 1)\n").unwrap();

        let mut evaluator = build_evaluator(None, false).with_console(Console::captured());
        run_file(&mut evaluator, &path).unwrap();
        assert_eq!(evaluator.console().output(), ["hi 2"]);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_runtime_error_becomes_diagnostic() {
        let path = std::env::temp_dir().join(format!("hermes-cli-{}-err.hs", std::process::id()));
        fs::write(&path, "var x = 1\nvar y = z\n").unwrap();

        let mut evaluator = build_evaluator(None, false).with_console(Console::captured());
        let diag = run_file(&mut evaluator, &path).unwrap_err();
        assert_eq!(diag.kind, ErrorKind::UndefinedVariable);
        assert_eq!(evaluator.get_var("x").map(ToString::to_string), Some("1".into()));

        fs::remove_file(&path).unwrap();
    }
}
