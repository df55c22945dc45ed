use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use loggit::cli::orchestration::{
    run_append_workflow, run_branch_workflow, AppendOutcome, AppendWorkflowArgs,
};
use loggit::config;
use loggit::git::{GitCli, Repository};
use loggit::ui;

#[derive(clap::Parser)]
#[command(
    name = "loggit",
    version,
    about = "Prepend release notes built from commit trailers to the changelog"
)]
struct Args {
    #[arg(
        help = "Commit message file of the bump commit",
        required_unless_present = "branch"
    )]
    commit_msg_file: Option<PathBuf>,

    #[arg(short, long, help = "Write a changelog of the current branch's commits")]
    branch: bool,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "Do not tag the new version")]
    no_tag: bool,

    #[arg(short, long, help = "Log debug output to stderr")]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let cwd = std::env::current_dir().context("Could not determine the working directory")?;
    let repo = GitCli::new(cwd);

    // outside a repository only the explicit and user-level config files apply
    let repo_root = repo.repo_root().ok();
    let config = config::load_config(args.config.as_deref(), repo_root.as_deref())
        .context("Error loading config")?;

    if args.branch {
        let summary = run_branch_workflow(&repo, &config)
            .context("Could not write the branch changelog")?;
        ui::display_entries(&summary.entries);
        for warning in &summary.warnings {
            ui::display_boundary_warning(warning);
        }
        ui::display_success(&format!(
            "Wrote {} entries for branch '{}' to {}",
            summary.entries.len(),
            summary.branch,
            summary.path.display()
        ));
        return Ok(());
    }

    let commit_msg_path = args
        .commit_msg_file
        .context("Please provide the commit message file or use --branch")?;
    let workflow_args = AppendWorkflowArgs {
        commit_msg_path,
        also_tag: config.also_tag && !args.no_tag,
        date: chrono::Local::now().date_naive(),
    };

    match run_append_workflow(&repo, &config, &workflow_args)
        .context("Could not update the changelog")?
    {
        AppendOutcome::NoVersion(notice) => {
            ui::display_status(&notice.to_string());
        }
        AppendOutcome::Released(summary) => {
            for warning in &summary.warnings {
                ui::display_boundary_warning(warning);
            }
            ui::display_success(&format!(
                "Added {} entries for version {} to {}",
                summary.entries.len(),
                summary.version,
                summary.changelog.display()
            ));
            if summary.tagged {
                ui::display_success(&format!("Created tag: {}", summary.version));
            }
        }
    }

    Ok(())
}
