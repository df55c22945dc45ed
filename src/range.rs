//! Commit-range resolution for both changelog modes.

use tracing::info;

use crate::config::Config;
use crate::error::{LoggitError, Result};
use crate::git::{CommitRange, LogField, Repository};

/// Range scanned when appending a release section.
///
/// Starts after the most recent bump commit, or at the first commit when no
/// bump commit exists yet.
pub fn resolve_append_range<R: Repository>(repo: &R, config: &Config) -> Result<CommitRange> {
    let hashes = repo.query_log(
        &CommitRange::head(),
        Some(config.bump_marker.as_str()),
        LogField::Hash,
        Some(1),
    )?;

    match hashes.into_iter().next() {
        Some(hash) => {
            info!(bump_commit = %hash, "scanning commits since previous bump");
            Ok(CommitRange::since(hash))
        }
        None => {
            info!("no previous bump commit, scanning the whole history");
            Ok(CommitRange::head())
        }
    }
}

/// Range holding the commits unique to the current branch.
///
/// The lower bound is the oldest commit listed by `<base>~..<branch>`, and
/// like every lower bound it is excluded from the scan.
///
/// # Returns
/// * `Ok((branch, range))`
/// * `Err` - Detached `HEAD`, missing base branch, or nothing listed
pub fn resolve_branch_range<R: Repository>(
    repo: &R,
    config: &Config,
) -> Result<(String, CommitRange)> {
    let branch = repo.current_branch()?;
    let interval = CommitRange::between(format!("{}~", config.base_branch), branch.as_str());

    let hashes = repo
        .query_log(&interval, None, LogField::Hash, None)
        .map_err(|e| {
            LoggitError::range(format!(
                "could not list commits of '{}' against '{}': {}",
                branch, config.base_branch, e
            ))
        })?;

    let first = hashes.last().ok_or_else(|| {
        LoggitError::range(format!(
            "could not find the first commit of branch '{}'",
            branch
        ))
    })?;

    info!(branch = %branch, first_commit = %first, "resolved branch range");
    let range = CommitRange::since(first.as_str());
    Ok((branch, range))
}
