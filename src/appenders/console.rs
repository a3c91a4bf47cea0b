//! Console appender implementation

use crate::core::{banner, Appender, LogKind, LogRecord, Result};
use colored::{Color, Colorize};
use std::io::Write;

/// Echoes records to standard output with a per-kind color scheme.
pub struct ConsoleAppender {
    use_colors: bool,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Render a record the way it appears on the console.
    ///
    /// Separators are centered in a rule of `=`, Empty records are a bare
    /// line break, everything else is `KIND:\tTIME\tMESSAGE`.
    pub fn format_record(&self, record: &LogRecord) -> String {
        let text = match record.kind() {
            LogKind::Empty => return String::new(),
            LogKind::Separator => banner(record.message()),
            kind => format!("{}:\t{}\t{}", kind, record.time(), record.message()),
        };

        if self.use_colors {
            let (fg, bg) = record.kind().color_pair();
            text.color(fg).on_color(bg).to_string()
        } else {
            text
        }
    }

    /// Print a diagnostic banner that is hard to miss
    pub fn print_banner(message: &str) {
        let rule = banner("LOGGING DIAGNOSTIC");
        for line in [rule.as_str(), message, rule.as_str()] {
            eprintln!("{}", line.color(Color::Yellow).on_color(Color::Red).bold());
        }
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, record: &LogRecord) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", self.format_record(record))?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
