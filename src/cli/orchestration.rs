//! Main workflow orchestration logic
//!
//! Both workflows take an explicit [Config] and a [Repository] so they can
//! run against a real checkout or an in-memory history. Argument parsing and
//! terminal output stay in `main.rs`.

use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::boundary::BoundaryWarning;
use crate::changelog::{self, ChangelogSection};
use crate::collector::collect_log_entries;
use crate::config::Config;
use crate::error::{LoggitError, Result};
use crate::git::Repository;
use crate::range::{resolve_append_range, resolve_branch_range};
use crate::tag::create_version_tag;
use crate::version::{extract_version, read_commit_message};

/// Arguments for the append workflow
///
/// Mirrors the CLI arguments without depending on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct AppendWorkflowArgs {
    /// Commit message file handed over by the commit hook
    pub commit_msg_path: PathBuf,

    /// Tag the release after writing the changelog
    pub also_tag: bool,

    /// Date printed in the section header
    pub date: NaiveDate,
}

/// What a completed release run produced
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseSummary {
    pub version: String,
    pub changelog: PathBuf,
    pub entries: Vec<String>,
    pub tagged: bool,
    pub warnings: Vec<BoundaryWarning>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppendOutcome {
    /// The commit declares no version; nothing was changed
    NoVersion(BoundaryWarning),
    Released(ReleaseSummary),
}

/// What a branch changelog run produced
#[derive(Debug, Clone, PartialEq)]
pub struct BranchSummary {
    pub branch: String,
    pub path: PathBuf,
    pub entries: Vec<String>,
    pub warnings: Vec<BoundaryWarning>,
}

/// Append-and-tag workflow
///
/// 1. Extract the version from the commit message
/// 2. Resolve the range since the previous bump commit
/// 3. Collect trailer entries and prepend a section to the changelog
/// 4. Tag the release when enabled
///
/// A commit without a version declaration ends the run early with
/// [AppendOutcome::NoVersion]; every other failure is returned as an error.
pub fn run_append_workflow<R: Repository>(
    repo: &R,
    config: &Config,
    args: &AppendWorkflowArgs,
) -> Result<AppendOutcome> {
    let message = read_commit_message(&args.commit_msg_path)?;
    let version = match extract_version(&message, &config.bump_marker, &config.version_pattern) {
        Ok(version) => version,
        Err(LoggitError::NoVersion) => {
            info!("commit does not declare a version, nothing to do");
            return Ok(AppendOutcome::NoVersion(
                BoundaryWarning::NoVersionDeclared {
                    bump_marker: config.bump_marker.clone(),
                },
            ));
        }
        Err(e) => return Err(e),
    };
    info!(version = %version, "found new version");

    let mut warnings = Vec::new();
    let range = resolve_append_range(repo, config)?;
    if range.is_unbounded() {
        warnings.push(BoundaryWarning::NoPreviousBump);
    }

    let entries = collect_log_entries(repo, &range, config)?;
    if entries.is_empty() {
        warnings.push(BoundaryWarning::NoLogEntries {
            range: range.to_string(),
            trailer: config.trailer_marker.clone(),
        });
    }

    let header = changelog::section_header(&config.section_header, &version, args.date);
    let path = changelog::resolve_changelog_path(&repo.repo_root()?, &config.changelog_path);
    let section = ChangelogSection::new(header, entries);
    changelog::prepend_section(&path, &section)?;

    if args.also_tag {
        create_version_tag(repo, &version)?;
    }

    for warning in &warnings {
        warn!("{}", warning);
    }

    Ok(AppendOutcome::Released(ReleaseSummary {
        version,
        changelog: path,
        entries: section.entries,
        tagged: args.also_tag,
        warnings,
    }))
}

/// Branch changelog workflow
///
/// Collects the entries of every commit unique to the current branch and
/// writes them to `<branch>-<changelog name>` in the repository root,
/// replacing any earlier branch changelog.
pub fn run_branch_workflow<R: Repository>(repo: &R, config: &Config) -> Result<BranchSummary> {
    let (branch, range) = resolve_branch_range(repo, config)?;
    let entries = collect_log_entries(repo, &range, config)?;

    let mut warnings = Vec::new();
    if entries.is_empty() {
        warnings.push(BoundaryWarning::NoLogEntries {
            range: range.to_string(),
            trailer: config.trailer_marker.clone(),
        });
    }

    let path = changelog::branch_changelog_path(&repo.repo_root()?, &config.changelog_path, &branch);
    changelog::write_branch_changelog(&path, &entries)?;

    for warning in &warnings {
        warn!("{}", warning);
    }

    Ok(BranchSummary {
        branch,
        path,
        entries,
        warnings,
    })
}
