/// Per-file scan: read a log file line by line and collect parsed events.
use crate::parser::{parse_line, EventRecord};
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Errors raised while scanning a single log file.
#[derive(Debug)]
pub enum ScanError {
    /// The file could not be opened.
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A line could not be read (I/O failure or invalid UTF-8).
    Read {
        path: PathBuf,
        line: usize,
        source: std::io::Error,
    },
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanError::Open { path, source } => {
                write!(f, "failed to open {}: {}", path.display(), source)
            }
            ScanError::Read { path, line, source } => {
                write!(
                    f,
                    "failed to read {} at line {}: {}",
                    path.display(),
                    line,
                    source
                )
            }
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScanError::Open { source, .. } => Some(source),
            ScanError::Read { source, .. } => Some(source),
        }
    }
}

/// Scan one log file and return its request events in line order.
///
/// Lines end at `\n`, `\r\n` or a bare `\r`. Malformed lines are skipped
/// silently; only I/O failures are errors.
pub fn scan_file(path: &Path) -> Result<Vec<EventRecord>, ScanError> {
    let file = std::fs::File::open(path).map_err(|e| ScanError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;
    let reader = std::io::BufReader::new(file);

    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| ScanError::Read {
            path: path.to_path_buf(),
            line: idx + 1,
            source: e,
        })?;
        // A bare `\r` also ends a line
        records.extend(line.split('\r').filter_map(parse_line));
    }

    tracing::debug!(path = %path.display(), records = records.len(), "scanned log file");
    Ok(records)
}
