//! Colored terminal output utilities.

use console::{Style, Term};

use docman_manifest::{Diagnostic, NavItem, Severity};

/// Terminal output formatter.
///
/// Status messages go to stderr; command results go to stdout so they can
/// be piped.
pub(crate) struct Output {
    term: Term,
    stdout: Term,
    green: Style,
    yellow: Style,
    red: Style,
    dim: Style,
    cyan_bold: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            stdout: Term::stdout(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            dim: Style::new().dim(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.term.write_line(&self.yellow.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Print a highlighted message (cyan bold).
    pub(crate) fn highlight(&self, msg: &str) {
        let _ = self
            .term
            .write_line(&self.cyan_bold.apply_to(msg).to_string());
    }

    /// Print a command result line to stdout.
    pub(crate) fn data(&self, msg: &str) {
        let _ = self.stdout.write_line(msg);
    }

    /// Print a diagnostic, colored by severity.
    pub(crate) fn diagnostic(&self, diagnostic: &Diagnostic) {
        let line = diagnostic.to_string();
        match diagnostic.severity {
            Severity::Error => self.error(&line),
            Severity::Warning => self.warning(&line),
        }
    }

    /// Print a navigation tree to stdout, one entry per line.
    pub(crate) fn nav_tree(&self, items: &[NavItem], depth: usize) {
        for item in items {
            let indent = "  ".repeat(depth);
            let line = match &item.path {
                Some(path) => format!(
                    "{indent}{} {}",
                    item.title,
                    self.dim.apply_to(format!("({path})"))
                ),
                None => format!("{indent}{}", self.cyan_bold.apply_to(&item.title)),
            };
            self.data(&line);
            self.nav_tree(&item.children, depth + 1);
        }
    }
}
