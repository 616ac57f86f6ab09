//! Plain-text rendering of errors through miette's report handler.

use miette::{GraphicalReportHandler, GraphicalTheme};

use crate::Error;

/// Render `error` with its diagnostic code and help, without colors.
///
/// ```
/// use verdict::{Interpreter, render_error};
///
/// let err = Interpreter::new().evaluate("1 / 0").unwrap_err();
/// let text = render_error(&err);
/// assert!(text.contains("V007"));
/// assert!(text.contains("integer division by zero"));
/// ```
pub fn render_error(error: &Error) -> String {
    let mut out = String::new();
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());
    if handler.render_report(&mut out, error).is_err() {
        return error.to_string();
    }
    out
}

/// Render every error of a failed validation, one report after another.
pub fn render_errors(errors: &[Error]) -> String {
    errors.iter().map(render_error).collect::<Vec<_>>().join("\n")
}
