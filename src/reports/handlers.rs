use super::{Level, Report, LEVEL_COUNT};
use crate::parser::EventRecord;
use std::collections::BTreeMap;
use std::fmt::Write;

pub const DEFAULT_HANDLER_WIDTH: usize = 20;
pub const DEFAULT_LEVEL_WIDTH: usize = 10;

/// Request counts per handler and severity level.
///
/// Handlers are kept in a `BTreeMap` so rendering walks them in ascending
/// lexicographic order. Counts per handler are indexed by [`Level::index`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerReport {
    counts: BTreeMap<String, [u64; LEVEL_COUNT]>,
    total_requests: u64,
    handler_width: usize,
    level_width: usize,
}

impl HandlerReport {
    pub fn new() -> Self {
        Self::with_widths(DEFAULT_HANDLER_WIDTH, DEFAULT_LEVEL_WIDTH)
    }

    /// Create an empty report with custom column widths.
    pub fn with_widths(handler_width: usize, level_width: usize) -> Self {
        Self {
            counts: BTreeMap::new(),
            total_requests: 0,
            handler_width,
            level_width,
        }
    }

    /// Total number of counted requests across all handlers.
    pub fn total_requests(&self) -> u64 {
        self.total_requests
    }

    /// Count for one handler/level cell (0 if never incremented).
    #[cfg(test)]
    pub fn count(&self, handler: &str, level: Level) -> u64 {
        self.counts
            .get(handler)
            .map_or(0, |row| row[level.index()])
    }

    /// Handlers seen so far, in lexicographic order.
    pub fn handlers(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// Column-wise sums over all handlers.
    pub fn level_totals(&self) -> [u64; LEVEL_COUNT] {
        let mut totals = [0; LEVEL_COUNT];
        for row in self.counts.values() {
            for (total, count) in totals.iter_mut().zip(row) {
                *total += count;
            }
        }
        totals
    }

    fn push_row<I>(&self, out: &mut String, first: &str, cells: I)
    where
        I: IntoIterator,
        I::Item: std::fmt::Display,
    {
        let _ = write!(out, "{:<width$}", first, width = self.handler_width);
        for cell in cells {
            let _ = write!(out, "{:<width$}", cell, width = self.level_width);
        }
        out.push('\n');
    }
}

impl Default for HandlerReport {
    fn default() -> Self {
        Self::new()
    }
}

impl Report for HandlerReport {
    fn add(&mut self, records: &[EventRecord]) {
        for record in records {
            // Unrecognized levels are dropped without touching any counter
            let Some(level) = Level::from_token(&record.level) else {
                continue;
            };
            let row = self
                .counts
                .entry(record.handler.clone())
                .or_insert([0; LEVEL_COUNT]);
            row[level.index()] += 1;
            self.total_requests += 1;
        }
    }

    fn render(&self) -> String {
        let mut out = format!("\nTotal requests: {}\n\n", self.total_requests);

        self.push_row(&mut out, "HANDLER", Level::ALL.iter());
        for (handler, row) in &self.counts {
            self.push_row(&mut out, handler, row.iter());
        }
        self.push_row(&mut out, "", self.level_totals().iter());

        out
    }
}
