//! Version-control abstraction layer
//!
//! All repository access goes through the [Repository] trait so the
//! changelog logic never talks to `git` directly. Two implementations exist:
//!
//! - [command::GitCli]: runs the `git` executable as a subprocess
//! - [mock::MockRepository]: an in-memory linear history for tests
//!
//! ```rust
//! # use loggit::git::{CommitRange, LogField, Repository};
//! # fn example<R: Repository>(repo: &R) -> loggit::Result<()> {
//! let hashes = repo.query_log(&CommitRange::head(), Some("Bump version"), LogField::Hash, Some(1))?;
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod mock;

pub use command::GitCli;
pub use mock::{MockCommit, MockRepository};

use crate::error::Result;
use std::fmt;
use std::path::PathBuf;

/// An interval of history, newest end inclusive and oldest end exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRange {
    /// Exclusive lower bound; `None` scans from the first commit
    pub lower: Option<String>,
    pub upper: String,
}

impl CommitRange {
    /// Everything reachable from `HEAD`
    pub fn head() -> Self {
        CommitRange {
            lower: None,
            upper: "HEAD".to_string(),
        }
    }

    /// Commits after `lower` up to `HEAD`
    pub fn since(lower: impl Into<String>) -> Self {
        CommitRange {
            lower: Some(lower.into()),
            upper: "HEAD".to_string(),
        }
    }

    pub fn between(lower: impl Into<String>, upper: impl Into<String>) -> Self {
        CommitRange {
            lower: Some(lower.into()),
            upper: upper.into(),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.lower.is_none()
    }
}

impl fmt::Display for CommitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.lower {
            Some(lower) => write!(f, "{}..{}", lower, self.upper),
            None => write!(f, "{}", self.upper),
        }
    }
}

/// Which part of each commit a log query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogField {
    Hash,
    Subject,
    Body,
}

impl LogField {
    /// `git log --pretty` placeholder for this field
    pub fn placeholder(self) -> &'static str {
        match self {
            LogField::Hash => "%H",
            LogField::Subject => "%s",
            LogField::Body => "%b",
        }
    }
}

/// Repository capabilities loggit relies on.
///
/// ## Error Handling
///
/// Implementations report every failure of the underlying tool as a
/// [crate::error::LoggitError]; callers treat them as fatal.
pub trait Repository {
    /// Absolute path of the working tree root
    fn repo_root(&self) -> Result<PathBuf>;

    /// Query one field of each commit in `range`, newest first.
    ///
    /// # Arguments
    /// * `range` - Interval to walk
    /// * `grep` - Keep only commits whose full message contains this text
    /// * `field` - Field to return per commit
    /// * `limit` - Maximum number of commits
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - One entry per matching commit, possibly empty
    /// * `Err` - If a revision is unknown or the tool fails
    fn query_log(
        &self,
        range: &CommitRange,
        grep: Option<&str>,
        field: LogField,
        limit: Option<usize>,
    ) -> Result<Vec<String>>;

    /// Name of the checked out branch
    ///
    /// Fails when `HEAD` is detached.
    fn current_branch(&self) -> Result<String>;

    /// Create a lightweight tag at `HEAD`
    ///
    /// Fails if the tag already exists.
    fn create_tag(&self, name: &str) -> Result<()>;
}
