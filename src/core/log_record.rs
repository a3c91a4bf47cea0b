//! Log record structure

use super::log_kind::LogKind;
use chrono::Local;
use serde::{Deserialize, Serialize};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Width of the `=` rule separator records are centered in
pub const BANNER_WIDTH: usize = 78;

/// One log event. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    kind: LogKind,
    message: String,
    date: String,
    time: String,
}

impl LogRecord {
    /// Create a record stamped with the current local date and time
    pub fn new(kind: LogKind, message: impl Into<String>) -> Self {
        let now = Local::now();
        Self {
            kind,
            message: message.into(),
            date: now.format(DATE_FORMAT).to_string(),
            time: now.format(TIME_FORMAT).to_string(),
        }
    }

    pub fn kind(&self) -> LogKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    /// Escape line breaks and tabs so the record stays on one physical line
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    /// Render as a single plain-text line.
    ///
    /// Separator records become a centered banner, Empty records an empty line,
    /// everything else `KIND:\tTIME\tMESSAGE`.
    pub fn to_line(&self) -> String {
        self.line_with(&self.message)
    }

    /// Same layout as [`to_line`](Self::to_line) with a substitute message
    pub(crate) fn line_with(&self, message: &str) -> String {
        match self.kind {
            LogKind::Separator => banner(message),
            LogKind::Empty => String::new(),
            kind => format!(
                "{}:\t{}\t{}",
                kind,
                self.time,
                Self::sanitize_message(message)
            ),
        }
    }

    /// Render as an HTML table row. The message is emitted as-is, so callers
    /// may embed markup in messages intended for HTML reports.
    pub fn to_html_row(&self) -> String {
        match self.kind {
            LogKind::Separator => format!(
                "<tr class=\"separator\"><td colspan=\"4\">{}</td></tr>",
                self.message
            ),
            LogKind::Empty => "<tr class=\"empty\"><td colspan=\"4\">&nbsp;</td></tr>".to_string(),
            kind => format!(
                "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                kind.css_class(),
                kind,
                self.date,
                self.time,
                self.message
            ),
        }
    }
}

/// Center `message` inside a rule of `=` characters
pub fn banner(message: &str) -> String {
    if message.is_empty() {
        return "=".repeat(BANNER_WIDTH);
    }
    format!("{:=^width$}", format!(" {} ", message), width = BANNER_WIDTH)
}
