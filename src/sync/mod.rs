//! sync
//!
//! The tag sync orchestrator.
//!
//! # Pipeline
//!
//! ```text
//! git ref -> tag -> parsed version -> (prerelease skip) ->
//!     {major tag, minor tag} x reconcile-against-remote -> outcome
//! ```
//!
//! The first stages fail fast: a malformed ref, tag, or repository spec
//! aborts the whole run. Reconciliation is different: each enabled rolling
//! tag is attempted independently, failures are collected rather than
//! raised, and the run fails at the end with every per-tag failure intact.
//!
//! Reconciliation itself is a two-state machine per tag. One existence
//! probe decides between create and force-update; dry-run mode still
//! probes (the reported verb depends on it) but returns before any
//! mutation.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::core::config::Config;
use crate::core::refs::{self, RefError};
use crate::core::semver::{self, ParseError};
use crate::forge::{Forge, ForgeError};
use crate::ui::output::{self, Verbosity};

/// Which rolling tag a failure concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// The major rolling tag, e.g. `v1`.
    Major,
    /// The minor rolling tag, e.g. `v1.2`.
    Minor,
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagKind::Major => write!(f, "major"),
            TagKind::Minor => write!(f, "minor"),
        }
    }
}

/// A reconciliation failure attributed to one rolling tag.
#[derive(Debug, Error)]
#[error("failed to sync {kind} tag {tag}: {source}")]
pub struct TagSyncError {
    /// Which rolling tag failed.
    pub kind: TagKind,
    /// The rolling tag name, e.g. `v1`.
    pub tag: String,
    /// The underlying forge failure.
    #[source]
    pub source: ForgeError,
}

/// Errors from a sync run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The ref was not a tag ref, or the repository spec was malformed.
    #[error(transparent)]
    Ref(#[from] RefError),

    /// The tag was not a valid semantic version.
    #[error(transparent)]
    Semver(#[from] ParseError),

    /// One or more rolling tags failed to reconcile. Always non-empty;
    /// every per-tag failure is preserved.
    #[error("{}", format_failures(.0))]
    Failed(Vec<TagSyncError>),
}

fn format_failures(failures: &[TagSyncError]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// The sync orchestrator.
///
/// Single-shot: one `run` handles exactly one tag push. No retry loop of
/// its own; transient remote failures surface to the caller, and because
/// reconciliation is idempotent, re-running the whole invocation is safe.
pub struct Syncer {
    forge: Arc<dyn Forge>,
    config: Config,
    verbosity: Verbosity,
}

impl Syncer {
    pub fn new(forge: Arc<dyn Forge>, config: Config, verbosity: Verbosity) -> Self {
        Self {
            forge,
            config,
            verbosity,
        }
    }

    /// Execute the sync.
    ///
    /// Steps, in order:
    /// 1. Extract the tag from the configured ref (fatal on failure)
    /// 2. Parse it as a semantic version (fatal on failure)
    /// 3. If it is a prerelease and prereleases are skipped, succeed with
    ///    zero side effects
    /// 4. Parse the repository spec (fatal on failure)
    /// 5. Reconcile the major tag, then the minor tag, collecting failures
    /// 6. Fail with the aggregated failures, or succeed
    pub async fn run(&self) -> Result<(), SyncError> {
        output::print(
            format!(
                "syncing rolling tags in {} for {}",
                self.config.github_repo, self.config.git_ref
            ),
            self.verbosity,
        );

        let tag = refs::extract_tag_from_ref(&self.config.git_ref)?;
        let version = semver::parse(tag)?;

        output::debug(
            format!(
                "parsed {}: major={} minor={} patch={} suffix={:?} prerelease={}",
                version.full,
                version.major,
                version.minor,
                version.patch,
                version.suffix,
                version.is_prerelease
            ),
            self.verbosity,
        );

        if version.is_prerelease && self.config.skip_prereleases {
            output::print(
                format!("skipping prerelease tag {}", version.full),
                self.verbosity,
            );
            return Ok(());
        }

        let (owner, repo) = refs::parse_repository(&self.config.github_repo)?;

        let mut failures = Vec::new();

        // Major first, then minor. The two reconciliations are independent;
        // a failure on one never prevents the other from being attempted.
        if self.config.sync_major {
            let tag = version.major_tag();
            if let Err(source) = self.sync_tag(owner, repo, &tag).await {
                output::warn(
                    format!("failed to sync major tag {}: {}", tag, source),
                    self.verbosity,
                );
                failures.push(TagSyncError {
                    kind: TagKind::Major,
                    tag,
                    source,
                });
            }
        }

        if self.config.sync_minor {
            let tag = version.minor_tag();
            if let Err(source) = self.sync_tag(owner, repo, &tag).await {
                output::warn(
                    format!("failed to sync minor tag {}: {}", tag, source),
                    self.verbosity,
                );
                failures.push(TagSyncError {
                    kind: TagKind::Minor,
                    tag,
                    source,
                });
            }
        }

        if !failures.is_empty() {
            return Err(SyncError::Failed(failures));
        }

        output::success("rolling tag sync completed", self.verbosity);
        Ok(())
    }

    /// Reconcile one rolling tag: probe, then create or force-update.
    ///
    /// A `NotFound` probe result selects the create branch; any other
    /// probe failure aborts reconciliation for this tag. The existing
    /// target of a present ref is never inspected, it is unconditionally
    /// overwritten.
    async fn sync_tag(&self, owner: &str, repo: &str, tag: &str) -> Result<(), ForgeError> {
        let ref_path = format!("tags/{}", tag);
        let full_ref = format!("refs/tags/{}", tag);
        let sha = &self.config.commit_sha;

        let exists = match self.forge.get_ref(owner, repo, &ref_path).await {
            Ok(_) => true,
            Err(ForgeError::NotFound(_)) => false,
            Err(err) => return Err(err),
        };

        if self.config.dry_run {
            let verb = if exists { "update" } else { "create" };
            output::print(
                format!("[dry-run] would {} tag {} -> {}", verb, tag, sha),
                self.verbosity,
            );
            return Ok(());
        }

        if exists {
            output::print(format!("updating tag {} -> {}", tag, sha), self.verbosity);
            self.forge.update_ref(owner, repo, &ref_path, sha).await?;
        } else {
            output::print(format!("creating tag {} -> {}", tag, sha), self.verbosity);
            self.forge.create_ref(owner, repo, &full_ref, sha).await?;
        }

        Ok(())
    }
}
