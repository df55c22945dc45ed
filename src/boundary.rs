use std::fmt;

/// Notices raised near the edges of history or input.
/// These are non-fatal and are reported to the user after a run.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The commit message does not start with the bump marker
    NoVersionDeclared { bump_marker: String },
    /// No earlier bump commit exists, so the whole history was scanned
    NoPreviousBump,
    /// The scanned range holds no commit carrying the trailer
    NoLogEntries { range: String, trailer: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoVersionDeclared { bump_marker } => {
                write!(
                    f,
                    "No new version in this commit (message does not start with '{}')",
                    bump_marker
                )
            }
            BoundaryWarning::NoPreviousBump => {
                write!(f, "No previous bump commit found, scanned the whole history")
            }
            BoundaryWarning::NoLogEntries { range, trailer } => {
                write!(f, "No commits in '{}' carry the '{}' trailer", range, trailer)
            }
        }
    }
}
