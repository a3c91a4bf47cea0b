//! Session history of flushed records

use super::log_kind::{KindMask, LogKind};
use super::log_record::LogRecord;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Ordered, append-only history of every record drained by the engine.
///
/// Insertion order is chronological order. The type does no locking of its
/// own; the engine only touches it while holding its queue lock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunningLog {
    start_date: DateTime<Local>,
    end_date: Option<DateTime<Local>>,
    entries: Vec<LogRecord>,
}

impl RunningLog {
    pub fn new() -> Self {
        Self::starting_at(Local::now())
    }

    /// Start a history at an explicit time, e.g. when resuming a session
    pub fn starting_at(start_date: DateTime<Local>) -> Self {
        Self {
            start_date,
            end_date: None,
            entries: Vec::new(),
        }
    }

    pub fn append(&mut self, record: LogRecord) {
        self.entries.push(record);
    }

    pub fn entries(&self) -> &[LogRecord] {
        &self.entries
    }

    /// Entries in order, optionally skipping Verbose records
    pub fn iter_filtered(&self, include_verbose: bool) -> impl Iterator<Item = &LogRecord> {
        let mask = if include_verbose {
            KindMask::ALL
        } else {
            KindMask::ALL.without(LogKind::Verbose)
        };
        self.iter_kinds(mask)
    }

    /// Entries in order whose kind is in `mask`
    pub fn iter_kinds(&self, mask: KindMask) -> impl Iterator<Item = &LogRecord> {
        self.entries
            .iter()
            .filter(move |record| mask.contains(record.kind()))
    }

    /// Drop every Verbose record from the history.
    ///
    /// This is destructive. Reports filter on read and never call it.
    pub fn remove_verbose(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|record| record.kind() != LogKind::Verbose);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn start_date(&self) -> DateTime<Local> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<DateTime<Local>> {
        self.end_date
    }

    pub fn set_end_date(&mut self, end_date: DateTime<Local>) {
        self.end_date = Some(end_date);
    }
}

impl Default for RunningLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> RunningLog {
        let mut log = RunningLog::new();
        log.append(LogRecord::new(LogKind::Information, "one"));
        log.append(LogRecord::new(LogKind::Verbose, "two"));
        log.append(LogRecord::new(LogKind::Error, "three"));
        log.append(LogRecord::new(LogKind::Verbose, "four"));
        log
    }

    #[test]
    fn test_append_keeps_order_and_duplicates() {
        let mut log = RunningLog::new();
        log.append(LogRecord::new(LogKind::Information, "same"));
        log.append(LogRecord::new(LogKind::Information, "same"));
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].message(), log.entries()[1].message());
    }

    #[test]
    fn test_iter_filtered_does_not_mutate() {
        let log = sample();
        let messages: Vec<&str> = log.iter_filtered(false).map(|r| r.message()).collect();
        assert_eq!(messages, vec!["one", "three"]);
        assert_eq!(log.len(), 4);
    }

    #[test]
    fn test_iter_kinds_with_mask() {
        let log = sample();
        let messages: Vec<&str> = log
            .iter_kinds(LogKind::Error | LogKind::Verbose)
            .map(|r| r.message())
            .collect();
        assert_eq!(messages, vec!["two", "three", "four"]);
        assert_eq!(log.iter_kinds(KindMask::NONE).count(), 0);
    }

    #[test]
    fn test_remove_verbose_is_idempotent() {
        let mut log = sample();
        assert_eq!(log.remove_verbose(), 2);
        let once = log.clone();
        assert_eq!(log.remove_verbose(), 0);
        assert_eq!(log, once);
    }

    #[test]
    fn test_explicit_start_and_end_dates() {
        let start = Local.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let mut log = RunningLog::starting_at(start);
        assert_eq!(log.start_date(), start);
        assert!(log.end_date().is_none());

        let end = Local.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        log.set_end_date(end);
        assert_eq!(log.end_date(), Some(end));
    }

    #[test]
    fn test_serializes_camel_case() {
        let log = sample();
        let json = serde_json::to_value(&log).unwrap();
        assert!(json["startDate"].is_string());
        assert!(json["endDate"].is_null());
        assert_eq!(json["entries"].as_array().unwrap().len(), 4);
        assert_eq!(json["entries"][2]["kind"], "Error");
    }
}
