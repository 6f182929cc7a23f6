//! Pure path normalization logic

use crate::error::{CliError, CliResult};
use std::path::PathBuf;

/// Expand a path that may contain a `~/` prefix
pub fn expand_home_directory(path: &str) -> CliResult<PathBuf> {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = dirs::home_dir().ok_or(CliError::HomeDirectoryNotFound)?;
        Ok(home.join(rest))
    } else if path == "~" {
        dirs::home_dir().ok_or(CliError::HomeDirectoryNotFound)
    } else {
        Ok(PathBuf::from(path))
    }
}

/// Normalize a user-supplied path, rejecting empty input
pub fn normalize_path(path: &str) -> CliResult<PathBuf> {
    if path.trim().is_empty() {
        return Err(CliError::PathError("Path cannot be empty".to_string()));
    }
    expand_home_directory(path)
}
