use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::debug;

use crate::error::{LoggitError, Result};
use crate::git::{CommitRange, LogField, Repository};

/// Separates records in `git log` output so multi-line bodies stay aligned.
const RECORD_SEPARATOR: char = '\u{1e}';

/// [Repository] backed by the `git` executable.
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    /// Run git commands from `workdir`
    pub fn new<P: AsRef<Path>>(workdir: P) -> Self {
        GitCli {
            workdir: workdir.as_ref().to_path_buf(),
        }
    }

    fn output(&self, args: &[String]) -> Result<Output> {
        debug!(args = %args.join(" "), "running git");
        Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|e| LoggitError::git(format!("failed to run git: {}", e)))
    }

    fn run(&self, args: &[String]) -> Result<String> {
        let output = self.output(args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(LoggitError::git(format!(
                "`git {}` exited with code {}: {}",
                args.join(" "),
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn log_args(
    range: &CommitRange,
    grep: Option<&str>,
    field: LogField,
    limit: Option<usize>,
) -> Vec<String> {
    let mut args = vec!["log".to_string(), range.to_string()];
    if let Some(pattern) = grep {
        args.push("--fixed-strings".to_string());
        args.push(format!("--grep={}", pattern));
    }
    if let Some(n) = limit {
        args.push("-n".to_string());
        args.push(n.to_string());
    }
    args.push(format!("--pretty=format:{}%x1e", field.placeholder()));
    args.push("--".to_string());
    args
}

/// Splits `git log` output produced by [log_args] into one string per commit.
fn split_records(output: &str) -> Vec<String> {
    let mut records: Vec<String> = output
        .split(RECORD_SEPARATOR)
        .map(|record| record.strip_prefix('\n').unwrap_or(record).to_string())
        .collect();
    // whatever follows the last separator is not a record
    records.pop();
    records
}

impl Repository for GitCli {
    fn repo_root(&self) -> Result<PathBuf> {
        let out = self.run(&["rev-parse".to_string(), "--show-toplevel".to_string()])?;
        Ok(PathBuf::from(out.trim()))
    }

    fn query_log(
        &self,
        range: &CommitRange,
        grep: Option<&str>,
        field: LogField,
        limit: Option<usize>,
    ) -> Result<Vec<String>> {
        let out = self.run(&log_args(range, grep, field, limit))?;
        Ok(split_records(&out))
    }

    fn current_branch(&self) -> Result<String> {
        let out = self
            .run(&["branch".to_string(), "--show-current".to_string()])
            .map_err(|e| LoggitError::branch(format!("could not get the current branch: {}", e)))?;
        let branch = out.trim();
        if branch.is_empty() {
            return Err(LoggitError::branch("HEAD is detached"));
        }
        Ok(branch.to_string())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        let out = self
            .run(&["tag".to_string(), name.to_string()])
            .map_err(|e| LoggitError::tag(format!("could not create tag '{}': {}", name, e)))?;
        if !out.trim().is_empty() {
            return Err(LoggitError::tag(format!(
                "unexpected output creating tag '{}': {}",
                name,
                out.trim()
            )));
        }
        Ok(())
    }
}
