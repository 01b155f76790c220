//! Terminal helpers.

use std::io::Write;

/// Sets the terminal title via the xterm escape sequence.
pub fn set_terminal_title(title: &str) {
    print!("\x1b]0;{}\x07", title);
}

/// Sets the terminal title and flushes stdout so it takes effect immediately.
pub fn set_terminal_title_and_flush(title: &str) {
    set_terminal_title(title);
    let _ = std::io::stdout().flush();
}
