//! Plain-text and HTML rendering of a [`RunningLog`]
//!
//! Rendering never mutates the history: Verbose records are skipped on read.

use super::log_record::{LogRecord, DATE_FORMAT, TIME_FORMAT};
use super::running_log::RunningLog;
use regex::Regex;
use std::sync::LazyLock;

static MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)</?[A-Za-z][^>]*>").expect("markup pattern is valid"));

const REPORT_STYLE: &str = "<style type=\"text/css\">\
table.runlog{border-collapse:collapse;font-family:Consolas,monospace;font-size:9pt}\
table.runlog td{padding:1px 6px;vertical-align:top}\
tr.error{color:#fff;background-color:#8b0000}\
tr.warning{color:#00008b;background-color:#ffd700}\
tr.information{color:#008b8b}\
tr.verbose{color:#808080}\
tr.debug{color:#8b008b}\
tr.success{color:#ffff00;background-color:#006400}\
tr.successaudit{color:#006400}\
tr.failureaudit{color:#8b0000}\
tr.separator td{font-weight:bold;text-align:center;border-top:1px solid #000}\
</style>";

/// Remove HTML tags and decode the handful of entities messages commonly carry
pub fn strip_markup(message: &str) -> String {
    MARKUP
        .replace_all(message, "")
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

fn plain_line(record: &LogRecord) -> String {
    record.line_with(&strip_markup(record.message()))
}

/// Render the history as plain text, one record per line
pub fn render_plain(log: &RunningLog, include_verbose: bool) -> String {
    let mut out = String::new();
    for record in log.iter_filtered(include_verbose) {
        out.push_str(&plain_line(record));
        out.push('\n');
    }
    out
}

/// Render the history as a styled HTML table fragment
pub fn render_html_table(log: &RunningLog, include_verbose: bool) -> String {
    let mut out = String::from(REPORT_STYLE);
    out.push_str("<table class=\"runlog\">");
    out.push_str("<tr><th>Kind</th><th>Date</th><th>Time</th><th>Message</th></tr>");
    for record in log.iter_filtered(include_verbose) {
        out.push_str(&record.to_html_row());
    }
    out.push_str("</table>");
    out
}

/// Render the history as a standalone HTML document
pub fn render_html_document(log: &RunningLog, include_verbose: bool) -> String {
    let started = log
        .start_date()
        .format(&format!("{} {}", DATE_FORMAT, TIME_FORMAT))
        .to_string();
    format!(
        "<html><head><meta charset=\"utf-8\"><title>Log started {}</title></head><body>{}</body></html>",
        started,
        render_html_table(log, include_verbose)
    )
}
