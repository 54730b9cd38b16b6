// src/errors/report.rs
//! Rendering utilities for miette diagnostics.

use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme, ThemeCharacters, ThemeStyles};
use std::io::Write as IoWrite;

/// Create a handler for terminal output (unicode + colors).
pub fn terminal_handler() -> GraphicalReportHandler {
    let theme = GraphicalTheme {
        characters: ThemeCharacters::unicode(),
        styles: ThemeStyles::ansi(),
    };
    GraphicalReportHandler::new_themed(theme)
}

/// Create a handler for plain output (ascii + no colors).
pub fn plain_handler() -> GraphicalReportHandler {
    let theme = GraphicalTheme {
        characters: ThemeCharacters::ascii(),
        styles: ThemeStyles::none(),
    };
    GraphicalReportHandler::new_themed(theme)
}

/// Render to stderr, colored or plain.
pub fn render_to_stderr(report: &dyn Diagnostic, colored: bool) {
    let handler = if colored {
        terminal_handler()
    } else {
        plain_handler()
    };
    let mut output = String::new();
    if handler.render_report(&mut output, report).is_ok() {
        eprint!("{}", output);
    }
}

/// Render to a buffer without colors (for testing).
pub fn render_to_string(report: &dyn Diagnostic) -> String {
    let mut output = String::new();
    let handler = plain_handler();
    let _ = handler.render_report(&mut output, report);
    output
}

/// Render to any Write impl.
pub fn render_to_writer<W: IoWrite>(report: &dyn Diagnostic, mut writer: W) -> std::io::Result<()> {
    let output = render_to_string(report);
    writer.write_all(output.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PipelineError;
    use crate::frontend::parse_type;
    use crate::spec::{NormalizeError, NormalizeErrorKind};

    #[test]
    fn render_parse_error_with_context() {
        let err = parse_type("std::vector<>").unwrap_err();
        let output = render_to_string(&err);
        assert!(output.contains("E1002"), "should contain error code: {output}");
        assert!(output.contains("std::vector<>"), "should show the input: {output}");
    }

    #[test]
    fn pipeline_error_forwards_code() {
        let parse = parse_type("a<>").unwrap_err();
        let err = PipelineError::from(NormalizeError::new(
            "record 'Point'",
            "field 'x'",
            NormalizeErrorKind::TypeParse(parse),
        ));
        let output = render_to_string(&err);
        assert!(output.contains("E4001"), "should contain error code: {output}");
        assert!(output.contains("record 'Point'"), "should name the entity: {output}");
    }

    #[test]
    fn render_to_writer_matches_string() {
        let err = parse_type("a<>").unwrap_err();
        let mut buf = Vec::new();
        render_to_writer(&err, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), render_to_string(&err));
    }
}
