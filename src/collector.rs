//! Collects changelog entries from commit trailers.

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{LoggitError, Result};
use crate::git::{CommitRange, LogField, Repository};

/// Collects the log entries of every commit in `range`, newest first.
///
/// Subjects and bodies are queried separately with the same trailer filter;
/// a count mismatch between both queries is fatal.
pub fn collect_log_entries<R: Repository>(
    repo: &R,
    range: &CommitRange,
    config: &Config,
) -> Result<Vec<String>> {
    let grep = Some(config.trailer_marker.as_str());
    let subjects = repo.query_log(range, grep, LogField::Subject, None)?;
    let bodies = repo.query_log(range, grep, LogField::Body, None)?;
    debug!(range = %range, commits = subjects.len(), "queried trailer commits");

    let entries = entries_from_log(
        &subjects,
        &bodies,
        &config.trailer_marker,
        &config.use_subject_sentinel,
    )?;
    info!(range = %range, entries = entries.len(), "collected log entries");
    Ok(entries)
}

/// Pairs subjects with bodies by position and extracts one entry per trailer.
///
/// A body carries the trailer when, once trimmed, it starts with `trailer`.
/// The entry is the rest of that line, or the subject when that rest equals
/// `sentinel`.
pub fn entries_from_log(
    subjects: &[String],
    bodies: &[String],
    trailer: &str,
    sentinel: &str,
) -> Result<Vec<String>> {
    if subjects.len() != bodies.len() {
        return Err(LoggitError::LogMismatch {
            subjects: subjects.len(),
            bodies: bodies.len(),
        });
    }

    let entries = subjects
        .iter()
        .zip(bodies)
        .filter_map(|(subject, body)| {
            let payload = trailer_payload(body, trailer)?;
            if payload == sentinel {
                Some(subject.trim().to_string())
            } else {
                Some(payload.to_string())
            }
        })
        .collect();

    Ok(entries)
}

fn trailer_payload<'a>(body: &'a str, trailer: &str) -> Option<&'a str> {
    let rest = body.trim().strip_prefix(trailer)?;
    let line = rest.lines().next().unwrap_or_default();
    Some(line.trim())
}
