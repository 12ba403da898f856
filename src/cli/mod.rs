//! cli
//!
//! Command-line interface layer.
//!
//! # Responsibilities
//!
//! - Parse flags and resolve configuration against the environment
//! - Construct the forge and the syncer
//! - Drive one sync run on a tokio runtime, bounded by an overall timeout
//!
//! The CLI layer is thin; all decision logic lives in [`crate::sync`].

pub mod args;

pub use args::Cli;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context as _, Result};

use crate::core::config::{self, Config};
use crate::forge::github::GitHubForge;
use crate::forge::Forge;
use crate::sync::Syncer;
use crate::ui::output::Verbosity;

/// Overall bound on one sync run, including all remote calls.
const RUN_TIMEOUT: Duration = Duration::from_secs(300);

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let verbosity = Verbosity::from_level(&cli.log_level);

    let config = Config {
        github_token: config::flag_or_env(cli.github_token, "GITHUB_TOKEN"),
        github_repo: config::flag_or_env(cli.github_repo, "GITHUB_REPOSITORY"),
        git_ref: config::flag_or_env(cli.git_ref, "GITHUB_REF"),
        commit_sha: config::flag_or_env(cli.commit_sha, "GITHUB_SHA"),
        sync_major: cli.sync_major,
        sync_minor: cli.sync_minor,
        skip_prereleases: cli.skip_prereleases,
        dry_run: cli.dry_run,
        github_enterprise_url: cli.github_enterprise_url,
    };

    config.validate()?;

    let forge: Arc<dyn Forge> = Arc::new(match &config.github_enterprise_url {
        Some(base) => GitHubForge::with_api_base(&config.github_token, base),
        None => GitHubForge::new(&config.github_token),
    });

    let syncer = Syncer::new(forge, config, verbosity);

    // Use a tokio runtime to run the async sync; the whole run, including
    // every remote call, is bounded by one timeout.
    let rt = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    rt.block_on(async {
        tokio::time::timeout(RUN_TIMEOUT, syncer.run())
            .await
            .map_err(|_| anyhow!("sync timed out after {}s", RUN_TIMEOUT.as_secs()))?
            .map_err(Into::into)
    })
}
