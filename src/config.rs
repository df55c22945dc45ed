use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{LoggitError, Result};

pub const CONFIG_FILE_NAME: &str = "loggit.json";

pub const DEFAULT_BUMP_VERSION_MSG: &str = "Bump version";
pub const DEFAULT_VERSION_REGEXP: &str = r"\d+\.\d+\.\d+";
pub const DEFAULT_LOG_GIT_TRAILER: &str = "log:";
pub const DEFAULT_USE_COMMIT_TITLE_MSG: &str = "%s";
pub const DEFAULT_CHANGELOG_PATH: &str = "CHANGELOG.md";
pub const DEFAULT_VERSION_HEADER: &str = "# Version ";
pub const DEFAULT_MASTER_BRANCH: &str = "master";
pub const DEFAULT_ALSO_TAG: bool = true;

/// Effective configuration for a loggit run.
///
/// Built once from an optional [`ConfigFile`] overlay; every field holds a
/// non-empty value afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// Prefix that marks a commit as a version bump
    pub bump_marker: String,
    /// Pattern locating the version token inside a bump commit message
    pub version_pattern: Regex,
    /// Trailer that marks a commit body line as changelog-worthy
    pub trailer_marker: String,
    /// Trailer payload meaning "use the commit subject instead"
    pub use_subject_sentinel: String,
    pub changelog_path: PathBuf,
    /// Text placed in front of the version in each section header
    pub section_header: String,
    pub base_branch: String,
    pub also_tag: bool,
}

/// On-disk representation of `loggit.json`.
///
/// Absent keys and empty strings both fall back to the defaults.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ConfigFile {
    #[serde(default)]
    pub bump_version_msg: Option<String>,

    #[serde(default)]
    pub version_regexp_str: Option<String>,

    #[serde(default)]
    pub log_git_trailer: Option<String>,

    #[serde(default)]
    pub use_commit_title_msg: Option<String>,

    #[serde(default)]
    pub changelog_relative_path: Option<String>,

    #[serde(default)]
    pub version_header: Option<String>,

    #[serde(default)]
    pub master_branch_name: Option<String>,

    #[serde(default)]
    pub also_tag: Option<bool>,
}

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl ConfigFile {
    /// Fill unset fields with defaults and compile the version pattern.
    pub fn resolve(self) -> Result<Config> {
        let pattern = or_default(self.version_regexp_str, DEFAULT_VERSION_REGEXP);
        let version_pattern = Regex::new(&pattern).map_err(|e| {
            LoggitError::config(format!("invalid VersionRegexpStr '{}': {}", pattern, e))
        })?;

        Ok(Config {
            bump_marker: or_default(self.bump_version_msg, DEFAULT_BUMP_VERSION_MSG),
            version_pattern,
            trailer_marker: or_default(self.log_git_trailer, DEFAULT_LOG_GIT_TRAILER),
            use_subject_sentinel: or_default(
                self.use_commit_title_msg,
                DEFAULT_USE_COMMIT_TITLE_MSG,
            ),
            changelog_path: PathBuf::from(or_default(
                self.changelog_relative_path,
                DEFAULT_CHANGELOG_PATH,
            )),
            section_header: or_default(self.version_header, DEFAULT_VERSION_HEADER),
            base_branch: or_default(self.master_branch_name, DEFAULT_MASTER_BRANCH),
            also_tag: self.also_tag.unwrap_or(DEFAULT_ALSO_TAG),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bump_marker: DEFAULT_BUMP_VERSION_MSG.to_string(),
            version_pattern: Regex::new(DEFAULT_VERSION_REGEXP)
                .expect("default version pattern is valid"),
            trailer_marker: DEFAULT_LOG_GIT_TRAILER.to_string(),
            use_subject_sentinel: DEFAULT_USE_COMMIT_TITLE_MSG.to_string(),
            changelog_path: PathBuf::from(DEFAULT_CHANGELOG_PATH),
            section_header: DEFAULT_VERSION_HEADER.to_string(),
            base_branch: DEFAULT_MASTER_BRANCH.to_string(),
            also_tag: DEFAULT_ALSO_TAG,
        }
    }
}

/// Parses a JSON configuration document and applies defaults.
pub fn parse_config(contents: &str) -> Result<Config> {
    let file: ConfigFile = serde_json::from_str(contents)
        .map_err(|e| LoggitError::config(format!("invalid JSON: {}", e)))?;
    file.resolve()
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `loggit.json` in the repository root
/// 3. `loggit.json` in the user config directory (`~/.config` on Linux)
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If the custom path is unreadable, or a found file cannot be parsed
pub fn load_config(config_path: Option<&Path>, repo_root: Option<&Path>) -> Result<Config> {
    let path = if let Some(path) = config_path {
        Some(path.to_path_buf())
    } else {
        find_config_file(repo_root)
    };

    let Some(path) = path else {
        debug!("no configuration file found, using defaults");
        return Ok(Config::default());
    };

    debug!(path = %path.display(), "loading configuration");
    let contents = fs::read_to_string(&path).map_err(|e| {
        LoggitError::config(format!("cannot read {}: {}", path.display(), e))
    })?;
    parse_config(&contents).map_err(|e| match e {
        LoggitError::Config(msg) => LoggitError::config(format!("{}: {}", path.display(), msg)),
        other => other,
    })
}

fn find_config_file(repo_root: Option<&Path>) -> Option<PathBuf> {
    let in_repo = repo_root.map(|root| root.join(CONFIG_FILE_NAME));
    let in_user_dir = dirs::config_dir().map(|dir| dir.join(CONFIG_FILE_NAME));

    in_repo.into_iter().chain(in_user_dir).find(|p| p.is_file())
}
