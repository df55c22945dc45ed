//! Changelog assembly and atomic file replacement.

use chrono::NaiveDate;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::DEFAULT_CHANGELOG_PATH;
use crate::error::{LoggitError, Result};

#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

/// One release section: a header line followed by bulleted entries.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangelogSection {
    pub header: String,
    pub entries: Vec<String>,
}

impl ChangelogSection {
    pub fn new(header: impl Into<String>, entries: Vec<String>) -> Self {
        ChangelogSection {
            header: header.into(),
            entries,
        }
    }

    /// Header, one `* entry` line per entry, then a blank line.
    pub fn render(&self) -> String {
        let mut out = format!("{}\n", self.header);
        out.push_str(&render_entries(&self.entries));
        out.push('\n');
        out
    }
}

/// Header for a release, e.g. `# Version 1.0.0 - 2024-01-01`.
pub fn section_header(template: &str, version: &str, date: NaiveDate) -> String {
    format!("{}{} - {}", template, version, date.format("%Y-%m-%d"))
}

fn render_entries(entries: &[String]) -> String {
    entries.iter().map(|e| format!("* {}\n", e)).collect()
}

/// Resolves the configured changelog path against the repository root.
pub fn resolve_changelog_path(repo_root: &Path, configured: &Path) -> PathBuf {
    if configured.is_absolute() {
        configured.to_path_buf()
    } else {
        repo_root.join(configured)
    }
}

/// Path of the per-branch changelog: `<branch>-<changelog file name>`.
pub fn branch_changelog_path(repo_root: &Path, configured: &Path, branch: &str) -> PathBuf {
    let file_name = configured
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_CHANGELOG_PATH.to_string());
    let branch = branch.replace('/', "-");
    repo_root.join(format!("{}-{}", branch, file_name))
}

/// Puts `section` in front of the changelog at `path`.
///
/// A missing changelog counts as empty. The previous content is kept
/// byte-for-byte after the new section.
pub fn prepend_section(path: &Path, section: &ChangelogSection) -> Result<()> {
    let previous = match fs::read(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
        Err(e) => {
            return Err(LoggitError::changelog(format!(
                "cannot read {}: {}",
                path.display(),
                e
            )))
        }
    };

    let mut content = section.render().into_bytes();
    content.extend_from_slice(&previous);
    replace_file(path, &content)?;

    info!(
        path = %path.display(),
        entries = section.entries.len(),
        "prepended changelog section"
    );
    Ok(())
}

/// Writes a fresh branch changelog holding only the entry lines.
pub fn write_branch_changelog(path: &Path, entries: &[String]) -> Result<()> {
    replace_file(path, render_entries(entries).as_bytes())?;
    info!(path = %path.display(), entries = entries.len(), "wrote branch changelog");
    Ok(())
}

/// Replaces `path` with `content` in a single rename.
///
/// The temporary file lives next to the target so the rename stays on one
/// filesystem; it is removed if anything fails before the rename. The target
/// keeps its permissions; a new file gets `0644` minus the umask.
fn replace_file(path: &Path, content: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let write_err =
        |e: std::io::Error| LoggitError::changelog(format!("cannot write {}: {}", path.display(), e));

    let existing = fs::metadata(path).ok().map(|m| m.permissions());

    let mut builder = tempfile::Builder::new();
    builder.prefix(".loggit-");
    if existing.is_none() {
        default_permissions(&mut builder);
    }

    let mut temp = builder.tempfile_in(dir).map_err(write_err)?;
    if let Some(permissions) = existing {
        temp.as_file().set_permissions(permissions).map_err(write_err)?;
    }
    temp.write_all(content).map_err(write_err)?;
    temp.as_file().sync_all().map_err(write_err)?;
    temp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

#[cfg(unix)]
fn default_permissions(builder: &mut tempfile::Builder<'_, '_>) {
    use std::os::unix::fs::PermissionsExt;
    builder.permissions(fs::Permissions::from_mode(NEW_FILE_MODE));
}

#[cfg(not(unix))]
fn default_permissions(_builder: &mut tempfile::Builder<'_, '_>) {}
