use chrono::NaiveDate;
use loggit::boundary::BoundaryWarning;
use loggit::cli::orchestration::{
    run_append_workflow, run_branch_workflow, AppendOutcome, AppendWorkflowArgs,
};
use loggit::config::{parse_config, Config};
use loggit::git::{MockCommit, MockRepository};
use loggit::LoggitError;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn release_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn append_args(dir: &Path, message: &str, also_tag: bool) -> AppendWorkflowArgs {
    let commit_msg_path = dir.join("COMMIT_EDITMSG");
    fs::write(&commit_msg_path, message).unwrap();
    AppendWorkflowArgs {
        commit_msg_path,
        also_tag,
        date: release_date(),
    }
}

fn released_repo(root: &Path) -> MockRepository {
    let mut repo = MockRepository::new(root);
    repo.commit(MockCommit::new("a1", "Initial commit", "log: first release\n"))
        .commit(MockCommit::new("b2", "Bump version to 0.1.0", ""))
        .commit(MockCommit::new("c3", "Add feature", "log: %s\n"))
        .commit(MockCommit::new("d4", "Refactor", ""))
        .commit(MockCommit::new("e5", "Fix bug", "log: fixed bug\n"));
    repo
}

#[test]
fn test_append_prepends_section_and_tags() {
    let dir = TempDir::new().unwrap();
    let repo = released_repo(dir.path());
    fs::write(dir.path().join("CHANGELOG.md"), "old stuff\n").unwrap();

    let args = append_args(dir.path(), "Bump version to 0.2.0\n", true);
    let outcome = run_append_workflow(&repo, &Config::default(), &args).unwrap();

    let summary = match outcome {
        AppendOutcome::Released(summary) => summary,
        other => panic!("expected a release, got {:?}", other),
    };
    assert_eq!(summary.version, "0.2.0");
    assert_eq!(summary.entries, vec!["fixed bug", "Add feature"]);
    assert!(summary.tagged);
    assert!(summary.warnings.is_empty());
    assert_eq!(repo.tags(), vec!["0.2.0"]);

    assert_eq!(
        fs::read_to_string(dir.path().join("CHANGELOG.md")).unwrap(),
        "# Version 0.2.0 - 2024-01-01\n* fixed bug\n* Add feature\n\nold stuff\n"
    );
}

#[test]
fn test_append_without_version_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let repo = released_repo(dir.path());

    let args = append_args(dir.path(), "Fix another bug\n\nlog: more fixes\n", true);
    let outcome = run_append_workflow(&repo, &Config::default(), &args).unwrap();

    assert!(matches!(
        outcome,
        AppendOutcome::NoVersion(BoundaryWarning::NoVersionDeclared { .. })
    ));
    assert!(!dir.path().join("CHANGELOG.md").exists());
    assert!(repo.tags().is_empty());
}

#[test]
fn test_append_with_malformed_version_is_fatal() {
    let dir = TempDir::new().unwrap();
    let repo = released_repo(dir.path());

    let args = append_args(dir.path(), "Bump version to the next one\n", true);
    let err = run_append_workflow(&repo, &Config::default(), &args).unwrap_err();

    assert!(matches!(err, LoggitError::MalformedVersion(_)));
    assert!(!dir.path().join("CHANGELOG.md").exists());
    assert!(repo.tags().is_empty());
}

#[test]
fn test_append_with_unreadable_message_is_fatal() {
    let dir = TempDir::new().unwrap();
    let repo = released_repo(dir.path());
    let args = AppendWorkflowArgs {
        commit_msg_path: dir.path().join("missing"),
        also_tag: true,
        date: release_date(),
    };

    let err = run_append_workflow(&repo, &Config::default(), &args).unwrap_err();
    assert!(matches!(err, LoggitError::CommitMessage(_)));
}

#[test]
fn test_append_first_release_scans_whole_history() {
    let dir = TempDir::new().unwrap();
    let mut repo = MockRepository::new(dir.path());
    repo.commit(MockCommit::new("a1", "Initial commit", "log: %s\n"))
        .commit(MockCommit::new("b2", "Add docs", "log: documentation\n"));

    let args = append_args(dir.path(), "Bump version to 1.0.0", false);
    let outcome = run_append_workflow(&repo, &Config::default(), &args).unwrap();

    let AppendOutcome::Released(summary) = outcome else {
        panic!("expected a release");
    };
    assert_eq!(summary.entries, vec!["documentation", "Initial commit"]);
    assert!(!summary.tagged);
    assert_eq!(summary.warnings, vec![BoundaryWarning::NoPreviousBump]);
    assert!(repo.tags().is_empty());
    assert_eq!(
        fs::read_to_string(dir.path().join("CHANGELOG.md")).unwrap(),
        "# Version 1.0.0 - 2024-01-01\n* documentation\n* Initial commit\n\n"
    );
}

#[test]
fn test_append_uses_configured_paths_and_markers() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("docs")).unwrap();
    let mut repo = MockRepository::new(dir.path());
    repo.commit(MockCommit::new("a1", "Release 1.0", ""))
        .commit(MockCommit::new("b2", "Speed up", "note: USE-SUBJECT\n"));

    let config = parse_config(
        r###"{
            "BumpVersionMsg": "Release",
            "VersionRegexpStr": "\\d+\\.\\d+",
            "LogGitTrailer": "note:",
            "UseCommitTitleMsg": "USE-SUBJECT",
            "ChangelogRelativePath": "docs/NEWS.md",
            "VersionHeader": "## "
        }"###,
    )
    .unwrap();

    let args = append_args(dir.path(), "Release 1.1", false);
    run_append_workflow(&repo, &config, &args).unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("docs/NEWS.md")).unwrap(),
        "## 1.1 - 2024-01-01\n* Speed up\n\n"
    );
}

#[test]
fn test_duplicate_tag_fails_after_changelog_written() {
    let dir = TempDir::new().unwrap();
    let repo = released_repo(dir.path());
    loggit::git::Repository::create_tag(&repo, "0.2.0").unwrap();

    let args = append_args(dir.path(), "Bump version to 0.2.0\n", true);
    let err = run_append_workflow(&repo, &Config::default(), &args).unwrap_err();
    assert!(matches!(err, LoggitError::Tag(_)));
}

#[test]
fn test_branch_workflow_writes_branch_changelog() {
    let dir = TempDir::new().unwrap();
    let mut repo = MockRepository::new(dir.path());
    repo.commit(MockCommit::new("a1", "Initial commit", "log: base work\n"))
        .commit(MockCommit::new("b2", "Master tip", "log: master work\n"))
        .commit(MockCommit::new("c3", "Start login", "log: %s\n"))
        .commit(MockCommit::new("d4", "Style login", ""))
        .commit(MockCommit::new("e5", "Finish login", "log: login page\n"));
    repo.set_branch("master", "b2")
        .set_branch("feature/login", "e5")
        .checkout(Some("feature/login"));

    let summary = run_branch_workflow(&repo, &Config::default()).unwrap();

    assert_eq!(summary.branch, "feature/login");
    assert_eq!(summary.entries, vec!["login page", "Start login"]);
    assert_eq!(summary.path, dir.path().join("feature-login-CHANGELOG.md"));
    assert_eq!(
        fs::read_to_string(&summary.path).unwrap(),
        "* login page\n* Start login\n"
    );
    assert!(repo.tags().is_empty());
}

#[test]
fn test_branch_workflow_detached_head_is_fatal() {
    let dir = TempDir::new().unwrap();
    let mut repo = released_repo(dir.path());
    repo.set_branch("master", "e5").checkout(None);

    let err = run_branch_workflow(&repo, &Config::default()).unwrap_err();
    assert!(matches!(err, LoggitError::Branch(_)));
}

#[test]
fn test_branch_workflow_without_entries_warns() {
    let dir = TempDir::new().unwrap();
    let mut repo = MockRepository::new(dir.path());
    repo.commit(MockCommit::new("r0", "Initial commit", ""))
        .commit(MockCommit::new("a1", "Master work", ""))
        .commit(MockCommit::new("b2", "Topic work", ""));
    repo.set_branch("master", "a1")
        .set_branch("topic", "b2")
        .checkout(Some("topic"));

    let summary = run_branch_workflow(&repo, &Config::default()).unwrap();
    assert!(summary.entries.is_empty());
    assert_eq!(summary.warnings.len(), 1);
    assert_eq!(fs::read_to_string(&summary.path).unwrap(), "");
}
