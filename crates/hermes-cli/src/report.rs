//! Error reporting on stderr.

use clap::ValueEnum;
use hermes_types::Diagnostic;

/// How errors are written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ErrorFormat {
    /// `error[kind] line:col: message`
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Render a diagnostic in the chosen format.
pub fn render(diagnostic: &Diagnostic, format: ErrorFormat) -> String {
    match format {
        ErrorFormat::Text => diagnostic.to_string(),
        ErrorFormat::Json => {
            serde_json::to_string(diagnostic).unwrap_or_else(|_| diagnostic.to_string())
        }
    }
}

pub fn report(diagnostic: &Diagnostic, format: ErrorFormat) {
    eprintln!("{}", render(diagnostic, format));
}

#[cfg(test)]
mod tests {
    use super::*;
    use hermes_types::{ErrorKind, Span, SyntaxError};

    #[test]
    fn test_text_format() {
        let diag = Diagnostic::from(&SyntaxError::parse("expected ')'", Span::point(2, 5)));
        assert_eq!(
            render(&diag, ErrorFormat::Text),
            "error[parse] 2:5: expected ')'"
        );
    }

    #[test]
    fn test_json_format() {
        let diag = Diagnostic::new(ErrorKind::ModuleNotImported, "module 'math' is not imported");
        let json: serde_json::Value =
            serde_json::from_str(&render(&diag, ErrorFormat::Json)).unwrap();
        assert_eq!(json["kind"], "module_not_imported");
        assert_eq!(json["message"], "module 'math' is not imported");
        assert!(json.get("line").is_none());
    }
}
