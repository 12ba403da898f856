//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! The string-valued flags fall back to the ambient GitHub Actions
//! environment (`GITHUB_TOKEN`, `GITHUB_REPOSITORY`, `GITHUB_REF`,
//! `GITHUB_SHA`) when not given, so the binary runs unconfigured inside a
//! workflow. The fallback happens during config resolution, not here.

use clap::{ArgAction, Parser};

/// Keep rolling version tags (v1, v1.2) pointed at the latest matching release
#[derive(Parser, Debug)]
#[command(name = "semver-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// GitHub token for authentication (or set GITHUB_TOKEN)
    #[arg(long, value_name = "TOKEN")]
    pub github_token: Option<String>,

    /// Target repository in owner/repo format (default: GITHUB_REPOSITORY)
    #[arg(long, value_name = "OWNER/REPO")]
    pub github_repo: Option<String>,

    /// Git reference, e.g. refs/tags/v1.2.3 (default: GITHUB_REF)
    #[arg(long, value_name = "REF")]
    pub git_ref: Option<String>,

    /// Commit SHA to point the rolling tags at (default: GITHUB_SHA)
    #[arg(long, value_name = "SHA")]
    pub commit_sha: Option<String>,

    /// Sync the major version tag (e.g. v1)
    #[arg(long, value_name = "BOOL", default_value_t = true, action = ArgAction::Set)]
    pub sync_major: bool,

    /// Sync the minor version tag (e.g. v1.2)
    #[arg(long, value_name = "BOOL", default_value_t = true, action = ArgAction::Set)]
    pub sync_minor: bool,

    /// Skip syncing for prerelease versions (e.g. v1.2.3-beta)
    #[arg(long, value_name = "BOOL", default_value_t = true, action = ArgAction::Set)]
    pub skip_prereleases: bool,

    /// Report intended actions without making changes
    #[arg(long)]
    pub dry_run: bool,

    /// GitHub Enterprise API base URL (optional)
    #[arg(long, value_name = "URL")]
    pub github_enterprise_url: Option<String>,

    /// Log level (debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}
