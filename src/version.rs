use regex::Regex;
use std::fs;
use std::path::Path;

use crate::error::{LoggitError, Result};

/// Reads the commit message file handed over by the commit hook.
pub fn read_commit_message(path: &Path) -> Result<String> {
    let bytes = fs::read(path)
        .map_err(|e| LoggitError::CommitMessage(format!("{}: {}", path.display(), e)))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Extracts the version declared by a bump commit message.
///
/// # Returns
/// * `Ok(version)` - First match of `pattern` anywhere in the message
/// * `Err(LoggitError::NoVersion)` - Message does not start with `bump_marker`
/// * `Err(LoggitError::MalformedVersion)` - Marker present but no version found
pub fn extract_version(message: &str, bump_marker: &str, pattern: &Regex) -> Result<String> {
    if message.is_empty() || !message.as_bytes().starts_with(bump_marker.as_bytes()) {
        return Err(LoggitError::NoVersion);
    }

    match pattern.find(message) {
        Some(m) => Ok(m.as_str().to_string()),
        None => {
            let first_line = message.lines().next().unwrap_or_default();
            Err(LoggitError::MalformedVersion(first_line.to_string()))
        }
    }
}
