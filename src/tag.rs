use tracing::info;

use crate::error::{LoggitError, Result};
use crate::git::Repository;

/// Tags `HEAD` with the released version.
///
/// Failures are never retried; an existing tag with the same name is an error.
pub fn create_version_tag<R: Repository>(repo: &R, version: &str) -> Result<()> {
    if version.trim().is_empty() {
        return Err(LoggitError::tag("refusing to create an empty tag name"));
    }
    repo.create_tag(version)?;
    info!(tag = version, "created tag");
    Ok(())
}
