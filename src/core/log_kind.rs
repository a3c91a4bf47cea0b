//! Log kind definitions

use colored::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

/// Severity or category of a log record.
///
/// Discriminants are powers of two so several kinds can be combined into a
/// [`KindMask`] for filtering. A record itself always carries exactly one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LogKind {
    Error = 1,
    Warning = 2,
    #[default]
    Information = 4,
    SuccessAudit = 8,
    FailureAudit = 16,
    Debug = 32,
    Separator = 64,
    Verbose = 128,
    Success = 256,
    Empty = 512,
}

impl LogKind {
    pub const ALL: [LogKind; 10] = [
        LogKind::Error,
        LogKind::Warning,
        LogKind::Information,
        LogKind::SuccessAudit,
        LogKind::FailureAudit,
        LogKind::Debug,
        LogKind::Separator,
        LogKind::Verbose,
        LogKind::Success,
        LogKind::Empty,
    ];

    pub const fn bits(self) -> u16 {
        self as u16
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            LogKind::Error => "ERROR",
            LogKind::Warning => "WARNING",
            LogKind::Information => "INFORMATION",
            LogKind::SuccessAudit => "SUCCESSAUDIT",
            LogKind::FailureAudit => "FAILUREAUDIT",
            LogKind::Debug => "DEBUG",
            LogKind::Separator => "SEPARATOR",
            LogKind::Verbose => "VERBOSE",
            LogKind::Success => "SUCCESS",
            LogKind::Empty => "EMPTY",
        }
    }

    /// CSS class used for this kind in HTML reports
    pub fn css_class(&self) -> &'static str {
        match self {
            LogKind::Error => "error",
            LogKind::Warning => "warning",
            LogKind::Information => "information",
            LogKind::SuccessAudit => "successaudit",
            LogKind::FailureAudit => "failureaudit",
            LogKind::Debug => "debug",
            LogKind::Separator => "separator",
            LogKind::Verbose => "verbose",
            LogKind::Success => "success",
            LogKind::Empty => "empty",
        }
    }

    /// Foreground and background used when echoing to the console
    pub fn color_pair(&self) -> (Color, Color) {
        match self {
            LogKind::Error => (Color::White, Color::Red),
            LogKind::Warning => (Color::Blue, Color::Yellow),
            LogKind::Information => (Color::Cyan, Color::Black),
            LogKind::Verbose => (Color::BrightBlack, Color::Black),
            LogKind::Success => (Color::Yellow, Color::Green),
            LogKind::Debug => (Color::Magenta, Color::Black),
            LogKind::SuccessAudit => (Color::Green, Color::Black),
            LogKind::FailureAudit => (Color::Red, Color::Black),
            LogKind::Separator | LogKind::Empty => (Color::White, Color::Black),
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ERROR" => Ok(LogKind::Error),
            "WARN" | "WARNING" => Ok(LogKind::Warning),
            "INFO" | "INFORMATION" => Ok(LogKind::Information),
            "SUCCESSAUDIT" => Ok(LogKind::SuccessAudit),
            "FAILUREAUDIT" => Ok(LogKind::FailureAudit),
            "DEBUG" => Ok(LogKind::Debug),
            "SEPARATOR" => Ok(LogKind::Separator),
            "VERBOSE" => Ok(LogKind::Verbose),
            "SUCCESS" => Ok(LogKind::Success),
            "EMPTY" => Ok(LogKind::Empty),
            _ => Err(format!("Invalid log kind: '{}'", s)),
        }
    }
}

/// Set of log kinds built from their bit values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KindMask(u16);

impl KindMask {
    pub const NONE: KindMask = KindMask(0);
    pub const ALL: KindMask = KindMask(0x3FF);

    pub const fn from_bits(bits: u16) -> Self {
        KindMask(bits & Self::ALL.0)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn contains(self, kind: LogKind) -> bool {
        self.0 & kind.bits() != 0
    }

    #[must_use]
    pub const fn without(self, kind: LogKind) -> Self {
        KindMask(self.0 & !kind.bits())
    }
}

impl From<LogKind> for KindMask {
    fn from(kind: LogKind) -> Self {
        KindMask(kind.bits())
    }
}

impl BitOr<LogKind> for LogKind {
    type Output = KindMask;

    fn bitor(self, rhs: LogKind) -> KindMask {
        KindMask(self.bits() | rhs.bits())
    }
}

impl BitOr<LogKind> for KindMask {
    type Output = KindMask;

    fn bitor(self, rhs: LogKind) -> KindMask {
        KindMask(self.0 | rhs.bits())
    }
}
