use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::{LoggitError, Result};
use crate::git::{CommitRange, LogField, Repository};

/// A commit in a [MockRepository]
#[derive(Debug, Clone, PartialEq)]
pub struct MockCommit {
    pub hash: String,
    pub subject: String,
    pub body: String,
}

impl MockCommit {
    pub fn new(hash: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        MockCommit {
            hash: hash.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }

    fn message(&self) -> String {
        format!("{}\n\n{}", self.subject, self.body)
    }
}

/// Mock repository with a single linear history, for testing without git.
///
/// Commits are pushed oldest first. Revisions accept `HEAD`, commit hashes,
/// branch names and any number of trailing `~` parent suffixes.
pub struct MockRepository {
    root: PathBuf,
    /// newest first
    commits: Vec<MockCommit>,
    branches: HashMap<String, String>,
    current_branch: Option<String>,
    tags: Mutex<Vec<String>>,
}

impl MockRepository {
    /// Create a new empty mock repository rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        MockRepository {
            root: root.into(),
            commits: Vec::new(),
            branches: HashMap::new(),
            current_branch: None,
            tags: Mutex::new(Vec::new()),
        }
    }

    /// Append a commit on top of the history
    pub fn commit(&mut self, commit: MockCommit) -> &mut Self {
        self.commits.insert(0, commit);
        self
    }

    /// Point `name` at the commit with `hash`
    pub fn set_branch(&mut self, name: impl Into<String>, hash: impl Into<String>) -> &mut Self {
        self.branches.insert(name.into(), hash.into());
        self
    }

    /// Check out `name`; `None` detaches `HEAD`
    pub fn checkout(&mut self, name: Option<&str>) -> &mut Self {
        self.current_branch = name.map(str::to_string);
        self
    }

    /// Tags created so far
    pub fn tags(&self) -> Vec<String> {
        self.tags.lock().map(|t| t.clone()).unwrap_or_default()
    }

    /// Index into `commits` of a revision.
    ///
    /// Walking past the root commit fails the way `git` does.
    fn resolve(&self, rev: &str) -> Result<usize> {
        let base = rev.trim_end_matches('~');
        let parents = rev.len() - base.len();

        let index = if base == "HEAD" {
            0
        } else {
            let hash = self.branches.get(base).map(String::as_str).unwrap_or(base);
            self.commits
                .iter()
                .position(|c| c.hash == hash)
                .ok_or_else(|| LoggitError::git(format!("unknown revision '{}'", rev)))?
        };

        let target = index + parents;
        if target >= self.commits.len() {
            return Err(LoggitError::git(format!("unknown revision '{}'", rev)));
        }
        Ok(target)
    }
}

impl Repository for MockRepository {
    fn repo_root(&self) -> Result<PathBuf> {
        Ok(self.root.clone())
    }

    fn query_log(
        &self,
        range: &CommitRange,
        grep: Option<&str>,
        field: LogField,
        limit: Option<usize>,
    ) -> Result<Vec<String>> {
        if self.commits.is_empty() {
            return Err(LoggitError::git(format!(
                "bad revision '{}': no commits yet",
                range.upper
            )));
        }

        let start = self.resolve(&range.upper)?;
        let end = match &range.lower {
            Some(lower) => self.resolve(lower)?,
            None => self.commits.len(),
        };

        let selected = self
            .commits
            .get(start..end.max(start))
            .unwrap_or_default()
            .iter()
            .filter(|c| grep.map_or(true, |g| c.message().contains(g)))
            .take(limit.unwrap_or(usize::MAX))
            .map(|c| match field {
                LogField::Hash => c.hash.clone(),
                LogField::Subject => c.subject.clone(),
                LogField::Body => c.body.clone(),
            })
            .collect();

        Ok(selected)
    }

    fn current_branch(&self) -> Result<String> {
        self.current_branch
            .clone()
            .ok_or_else(|| LoggitError::branch("HEAD is detached"))
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        let mut tags = self
            .tags
            .lock()
            .map_err(|_| LoggitError::tag("tag store poisoned"))?;
        if tags.iter().any(|t| t == name) {
            return Err(LoggitError::tag(format!("tag '{}' already exists", name)));
        }
        tags.push(name.to_string());
        Ok(())
    }
}
