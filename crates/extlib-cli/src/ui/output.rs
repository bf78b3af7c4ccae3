//! Console implementation of [`Reporter`].
//!
//! Progress goes to stderr so that command output on stdout (version listings,
//! completions) stays pipeable.

use crossterm::style::Stylize;
use extlib_core::Reporter;

/// Prints reporter messages to the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    verbose: bool,
}

impl Output {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Reporter for Output {
    fn debug(&self, msg: &str) {
        if self.verbose {
            eprintln!("{} {}", "debug".dark_grey(), msg.dark_grey());
        }
    }

    fn info(&self, msg: &str) {
        eprintln!("{msg}");
    }

    fn success(&self, msg: &str) {
        eprintln!("{} {msg}", "✓".green());
    }

    fn warning(&self, msg: &str) {
        eprintln!("{} {msg}", "warning:".yellow().bold());
    }

    fn error(&self, msg: &str) {
        eprintln!("{} {msg}", "error:".red().bold());
    }
}
