/// Pre-flight check that every input path is an existing regular file.
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidateError {
    NotAFile { path: PathBuf },
}

impl std::fmt::Display for ValidateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidateError::NotAFile { path } => write!(f, "file not found: {}", path.display()),
        }
    }
}

impl std::error::Error for ValidateError {}

/// Check the paths in order and stop at the first one that is not a file.
pub fn validate_files(paths: &[PathBuf]) -> Result<(), ValidateError> {
    match paths.iter().find(|p| !p.is_file()) {
        Some(path) => Err(ValidateError::NotAFile { path: path.clone() }),
        None => Ok(()),
    }
}
