//! core::refs
//!
//! Git ref and repository identity parsing.
//!
//! Both operations here are pure string splits. Semver validity of an
//! extracted tag is checked later by [`crate::core::semver::parse`].

use thiserror::Error;

/// Errors from ref and repository parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefError {
    /// The ref did not carry the `refs/tags/` prefix.
    #[error("ref {0:?} is not a tag (expected refs/tags/...)")]
    NotATag(String),

    /// The repository spec was not of the form `owner/repo`.
    #[error("invalid repository format {0:?} (expected owner/repo)")]
    InvalidRepository(String),
}

/// Extract the tag name from a fully qualified git ref.
///
/// Only `refs/tags/...` refs are accepted; branch refs, pull refs, and
/// anything else fail. The remainder after the prefix is returned
/// unmodified.
pub fn extract_tag_from_ref(git_ref: &str) -> Result<&str, RefError> {
    git_ref
        .strip_prefix("refs/tags/")
        .ok_or_else(|| RefError::NotATag(git_ref.to_string()))
}

/// Parse a repository spec in `owner/repo` form.
///
/// Exactly one `/` separating two non-empty segments.
pub fn parse_repository(spec: &str) -> Result<(&str, &str), RefError> {
    match spec.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok((owner, name))
        }
        _ => Err(RefError::InvalidRepository(spec.to_string())),
    }
}
