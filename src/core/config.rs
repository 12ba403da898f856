//! core::config
//!
//! Invocation configuration: flag values with GitHub Actions environment
//! fallback, validated once before the sync runs and read-only afterwards.

use std::env;

use thiserror::Error;

/// Errors from configuration validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("github token is required (set --github-token or GITHUB_TOKEN)")]
    MissingToken,

    #[error("github repo is required (set --github-repo or GITHUB_REPOSITORY)")]
    MissingRepo,

    #[error("git ref is required (set --git-ref or GITHUB_REF)")]
    MissingRef,

    #[error("commit sha is required (set --commit-sha or GITHUB_SHA)")]
    MissingSha,

    #[error("at least one of --sync-major or --sync-minor must be enabled")]
    NothingToSync,
}

/// Resolved invocation configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Token used as the bearer credential against the GitHub API.
    pub github_token: String,
    /// Target repository in `owner/repo` form.
    pub github_repo: String,
    /// Fully qualified ref that triggered the run, e.g. `refs/tags/v1.2.3`.
    pub git_ref: String,
    /// Commit to point the rolling tags at.
    pub commit_sha: String,
    /// Sync the major rolling tag (e.g. `v1`).
    pub sync_major: bool,
    /// Sync the minor rolling tag (e.g. `v1.2`).
    pub sync_minor: bool,
    /// Skip the whole run for prerelease versions.
    pub skip_prereleases: bool,
    /// Report intended actions without mutating the remote.
    pub dry_run: bool,
    /// GitHub Enterprise API base URL, if any.
    pub github_enterprise_url: Option<String>,
}

impl Config {
    /// Check the configuration for required values.
    ///
    /// Must pass before the orchestrator runs; the orchestrator does not
    /// re-check these invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.github_token.is_empty() {
            return Err(ConfigError::MissingToken);
        }
        if self.github_repo.is_empty() {
            return Err(ConfigError::MissingRepo);
        }
        if self.git_ref.is_empty() {
            return Err(ConfigError::MissingRef);
        }
        if self.commit_sha.is_empty() {
            return Err(ConfigError::MissingSha);
        }
        if !self.sync_major && !self.sync_minor {
            return Err(ConfigError::NothingToSync);
        }
        Ok(())
    }
}

/// Prefer the flag value; fall back to an environment variable.
///
/// Used to pick up the ambient GitHub Actions variables (`GITHUB_TOKEN`,
/// `GITHUB_REPOSITORY`, `GITHUB_REF`, `GITHUB_SHA`) when the corresponding
/// flag was not given.
pub fn flag_or_env(flag: Option<String>, var: &str) -> String {
    flag.unwrap_or_else(|| env::var(var).unwrap_or_default())
}
