pub mod handlers;

use crate::parser::EventRecord;
use std::str::FromStr;

pub use handlers::HandlerReport;

/// Number of recognized severity levels.
pub const LEVEL_COUNT: usize = 5;

/// Recognized severity levels, in canonical column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Level {
    pub const ALL: [Level; LEVEL_COUNT] = [
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Critical,
    ];

    /// Exact match against the upper-cased token; anything else is unrecognized.
    pub fn from_token(token: &str) -> Option<Level> {
        match token {
            "DEBUG" => Some(Level::Debug),
            "INFO" => Some(Level::Info),
            "WARNING" => Some(Level::Warning),
            "ERROR" => Some(Level::Error),
            "CRITICAL" => Some(Level::Critical),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }

    /// Column index in canonical order.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accumulates event records and renders them as text.
///
/// `add` receives one file's full record list at a time; the dispatcher never
/// interleaves two calls, so implementations need no internal locking.
pub trait Report {
    /// Fold a batch of records into the tally.
    fn add(&mut self, records: &[EventRecord]);

    /// Render the accumulated tally.
    fn render(&self) -> String;
}

/// The closed set of report kinds selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Request counts per handler and severity level.
    Handlers,
}

impl ReportKind {
    pub const ALL: [ReportKind; 1] = [ReportKind::Handlers];

    pub fn name(self) -> &'static str {
        match self {
            ReportKind::Handlers => "handlers",
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Lookup failure for a report name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportKindError {
    Unknown { name: String },
}

impl std::fmt::Display for ReportKindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportKindError::Unknown { name } => {
                let known: Vec<&str> = ReportKind::ALL.iter().map(|k| k.name()).collect();
                write!(
                    f,
                    "unknown report '{}' (available: {})",
                    name,
                    known.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for ReportKindError {}

impl FromStr for ReportKind {
    type Err = ReportKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ReportKindError::Unknown {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_tokens_round_trip_in_canonical_order() {
        let names: Vec<&str> = Level::ALL.iter().map(|l| l.as_str()).collect();
        assert_eq!(names, ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"]);
        for (i, level) in Level::ALL.iter().enumerate() {
            assert_eq!(level.index(), i);
            assert_eq!(Level::from_token(level.as_str()), Some(*level));
        }
    }

    #[test]
    fn level_matching_is_exact() {
        assert_eq!(Level::from_token("info"), None);
        assert_eq!(Level::from_token("WARN"), None);
        assert_eq!(Level::from_token("FATAL"), None);
        assert_eq!(Level::from_token(""), None);
    }

    #[test]
    fn report_kind_parses_known_name() {
        assert_eq!("handlers".parse::<ReportKind>(), Ok(ReportKind::Handlers));
    }

    #[test]
    fn report_kind_rejects_unknown_name() {
        let err = "users".parse::<ReportKind>().unwrap_err();
        assert_eq!(
            err,
            ReportKindError::Unknown {
                name: "users".to_string()
            }
        );
        assert_eq!(err.to_string(), "unknown report 'users' (available: handlers)");
    }
}
