use crate::reports::handlers::{DEFAULT_HANDLER_WIDTH, DEFAULT_LEVEL_WIDTH};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "logtally.toml";

/// Top-level configuration loaded from logtally.toml.
#[derive(Debug, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct AnalyzerConfig {
    pub scan: ScanConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct ScanConfig {
    /// Upper bound on concurrently scanned files. 0 means available parallelism.
    pub max_workers: usize,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Report kind used when `--report` is not given.
    pub default: String,
    pub handler_width: usize,
    pub level_width: usize,
}

// --- Default implementations ---

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            default: "handlers".to_string(),
            handler_width: DEFAULT_HANDLER_WIDTH,
            level_width: DEFAULT_LEVEL_WIDTH,
        }
    }
}

impl ScanConfig {
    /// Resolve the worker bound, falling back to the machine's parallelism.
    pub fn effective_workers(&self) -> usize {
        if self.max_workers > 0 {
            return self.max_workers;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
    }
}

/// Errors that can occur while loading the config file.
#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "failed to read config {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "failed to parse config {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

impl AnalyzerConfig {
    /// Load config from `path`.
    ///
    /// When `required` is false (the default path was not overridden), a
    /// missing file yields the defaults. An explicitly requested file must
    /// exist. A malformed file is always an error.
    pub fn load(path: &Path, required: bool) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };

        toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_report_layout() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.scan.max_workers, 0);
        assert_eq!(config.report.default, "handlers");
        assert_eq!(config.report.handler_width, 20);
        assert_eq!(config.report.level_width, 10);
    }

    #[test]
    fn missing_optional_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AnalyzerConfig::load(&dir.path().join("logtally.toml"), false).unwrap();
        assert_eq!(config.report.handler_width, 20);
    }

    #[test]
    fn missing_required_file_is_error() {
        let dir = TempDir::new().unwrap();
        let err = AnalyzerConfig::load(&dir.path().join("custom.toml"), true).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logtally.toml");
        std::fs::write(&path, "[scan]\nmax_workers = 3\n\n[report]\nlevel_width = 12\n").unwrap();

        let config = AnalyzerConfig::load(&path, true).unwrap();
        assert_eq!(config.scan.max_workers, 3);
        assert_eq!(config.report.level_width, 12);
        assert_eq!(config.report.handler_width, 20);
        assert_eq!(config.report.default, "handlers");
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logtally.toml");
        std::fs::write(&path, "[scan]\nmax_workers = \"many\"\n").unwrap();

        let err = AnalyzerConfig::load(&path, false).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn effective_workers_prefers_explicit_value() {
        assert_eq!(ScanConfig { max_workers: 2 }.effective_workers(), 2);
        assert!(ScanConfig::default().effective_workers() >= 1);
    }
}
