//! forge::traits
//!
//! Forge trait definition for the remote ref store.
//!
//! # Design
//!
//! The `Forge` trait is async because every operation is a network call.
//! A missing ref is a distinct [`ForgeError::NotFound`] variant rather than
//! an `Option`: during reconciliation "not found" is a protocol signal that
//! selects the create branch, and it must stay distinguishable from
//! transport and API failures, which are fatal for the tag in question.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from forge operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForgeError {
    /// Authentication is required but not available.
    #[error("authentication required")]
    AuthRequired,

    /// Authentication failed (invalid token, expired, insufficient permissions).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The requested ref was not found.
    ///
    /// Consumed by the reconciliation probe to select the create branch;
    /// never surfaced to the operator from a probe.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded.
    #[error("rate limited")]
    RateLimited,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    NetworkError(String),
}

/// A git reference as reported by the forge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitRef {
    /// Fully qualified ref name, e.g. `refs/tags/v1`.
    pub name: String,
    /// Target commit sha.
    pub sha: String,
}

/// The capability trait for a remote git ref store.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Cancellation
///
/// All methods observe cancellation by future drop; the caller bounds the
/// whole run with a timeout.
#[async_trait]
pub trait Forge: Send + Sync {
    /// Get the forge name (e.g., "github").
    fn name(&self) -> &'static str;

    /// Look up a ref by its short path, e.g. `tags/v1`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the ref does not exist
    /// - `NetworkError` / `ApiError` / auth errors for everything else
    async fn get_ref(&self, owner: &str, repo: &str, ref_path: &str)
        -> Result<GitRef, ForgeError>;

    /// Create a new ref. `full_ref` is fully qualified, e.g. `refs/tags/v1`.
    ///
    /// # Errors
    ///
    /// - `ApiError` with status 422 if the ref already exists
    async fn create_ref(
        &self,
        owner: &str,
        repo: &str,
        full_ref: &str,
        sha: &str,
    ) -> Result<GitRef, ForgeError>;

    /// Force-move an existing ref to `sha`. `ref_path` is the short path,
    /// e.g. `tags/v1`.
    ///
    /// The move is always forced: rolling tags routinely move sideways or
    /// backwards relative to their previous target, so a fast-forward-safe
    /// update would be rejected.
    async fn update_ref(
        &self,
        owner: &str,
        repo: &str,
        ref_path: &str,
        sha: &str,
    ) -> Result<GitRef, ForgeError>;
}
