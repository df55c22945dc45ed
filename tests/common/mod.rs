//! Shared git repository fixture for integration tests.
#![allow(dead_code)]

use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// A throwaway repository on branch `master` with a fixed identity.
pub struct GitFixture {
    pub dir: TempDir,
}

/// Whether a usable `git` executable is on the PATH.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

impl GitFixture {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");
        let fixture = GitFixture { dir };
        fixture.git(&["init", "-q"]);
        fixture.git(&["symbolic-ref", "HEAD", "refs/heads/master"]);
        fixture.git(&["config", "user.name", "Test User"]);
        fixture.git(&["config", "user.email", "test@example.com"]);
        fixture.git(&["config", "commit.gpgsign", "false"]);
        fixture.git(&["config", "tag.gpgsign", "false"]);
        fixture
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Run git in the repository and return its stdout, panicking on failure.
    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.dir.path())
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    /// Create an empty commit with a subject and an optional body.
    pub fn commit(&self, subject: &str, body: Option<&str>) {
        let mut args = vec!["commit", "-q", "--allow-empty", "-m", subject];
        if let Some(body) = body {
            args.push("-m");
            args.push(body);
        }
        self.git(&args);
    }

    pub fn head(&self) -> String {
        self.git(&["rev-parse", "HEAD"]).trim().to_string()
    }
}
