//! Styled status output
//!
//! Status messages go to stderr so that filtered documents on stdout can be
//! piped without noise.

use console::style;

/// Output handler for consistent CLI formatting
pub struct Output {
    verbose: bool,
    quiet: bool,
}

impl Output {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    pub fn success(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", style("✔").green(), message);
        }
    }

    /// Errors are shown even in quiet mode
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✖").red(), message);
    }

    pub fn warning(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", style("⚠").yellow(), message);
        }
    }

    pub fn info(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", style("ℹ").blue(), message);
        }
    }

    /// Only with `-v`
    pub fn verbose(&self, message: &str) {
        if self.verbose && !self.quiet {
            eprintln!("{} {}", style("ℹ").dim(), style(message).dim());
        }
    }

    /// `==> name <==` separator between documents on stdout
    pub fn document_header(&self, name: &str, first: bool) {
        if !first {
            println!();
        }
        println!("{}", style(format!("==> {name} <==")).bold());
    }

    /// Print a document body, ending with exactly one newline
    pub fn document(&self, text: &str) {
        if text.ends_with('\n') {
            print!("{text}");
        } else {
            println!("{text}");
        }
    }

    pub fn table_row(&self, key: &str, value: &str) {
        println!("  {:<28} {}", style(key).dim(), value);
    }
}
