//! Shared CLI output helpers.
//!
//! Everything goes to stderr: stdout belongs to the command being launched.
//! Colors are dropped when NO_COLOR is set or stderr is not a terminal.

use console::style;

/// Check if color output is enabled for stderr.
fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && console::colors_enabled_stderr()
}

/// Print an error message to stderr (red), on a single line.
///
/// Example: `✗ secret not found: db/creds`
pub fn error(msg: &str) {
    eprintln!("{}", format_error(msg, colors_enabled()));
}

fn format_error(msg: &str, color: bool) -> String {
    // keep the message on one line whatever the backend put in the body
    let msg = msg.replace(['\r', '\n'], " ");
    if color {
        format!("{} {}", style("✗").red().force_styling(true), msg)
    } else {
        format!("✗ {}", msg)
    }
}
