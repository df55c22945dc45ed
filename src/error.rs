use thiserror::Error;

/// Unified error type for loggit operations
#[derive(Error, Debug)]
pub enum LoggitError {
    /// The commit message does not declare a version bump. Not fatal.
    #[error("No new version in this commit")]
    NoVersion,

    #[error("Invalid format for new version in this commit: {0}")]
    MalformedVersion(String),

    #[error("Could not read the commit message: {0}")]
    CommitMessage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git command failed: {0}")]
    Git(String),

    #[error("Branch error: {0}")]
    Branch(String),

    #[error("Commit range error: {0}")]
    Range(String),

    #[error("Different number of commit subjects ({subjects}) and bodies ({bodies})")]
    LogMismatch { subjects: usize, bodies: usize },

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Changelog error: {0}")]
    Changelog(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in loggit
pub type Result<T> = std::result::Result<T, LoggitError>;

impl LoggitError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        LoggitError::Config(msg.into())
    }

    /// Create a git error with context
    pub fn git(msg: impl Into<String>) -> Self {
        LoggitError::Git(msg.into())
    }

    /// Create a branch error with context
    pub fn branch(msg: impl Into<String>) -> Self {
        LoggitError::Branch(msg.into())
    }

    /// Create a commit range error with context
    pub fn range(msg: impl Into<String>) -> Self {
        LoggitError::Range(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        LoggitError::Tag(msg.into())
    }

    /// Create a changelog error with context
    pub fn changelog(msg: impl Into<String>) -> Self {
        LoggitError::Changelog(msg.into())
    }

    /// Whether the run should end cleanly instead of failing.
    ///
    /// Only a commit without a version declaration qualifies; everything
    /// else halts the process.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, LoggitError::NoVersion)
    }
}
