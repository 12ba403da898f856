//! core::semver
//!
//! Parsing of semantic version tags into their components.
//!
//! The accepted grammar is anchored at both ends:
//!
//! ```text
//! v<digits>.<digits>.<digits>[suffix]
//! suffix := ('-' | '+') <rest of string>
//! ```
//!
//! Numeric components are captured as the literal digit strings from the
//! tag: `v01.02.03` parses with `major == "01"`, and the rolling tags
//! derived from such a version reproduce the zeros verbatim. The suffix is
//! opaque text; a combined `-pre+build` form is not split further.

use thiserror::Error;

/// Error returned when a tag does not match the semver grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("tag {tag:?} does not match semantic versioning format (expected vX.Y.Z)")]
pub struct ParseError {
    /// The offending tag.
    pub tag: String,
}

/// A parsed semantic version tag.
///
/// Immutable once constructed; consumed once per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemVer {
    /// Major component as a literal digit string.
    pub major: String,
    /// Minor component as a literal digit string.
    pub minor: String,
    /// Patch component as a literal digit string.
    pub patch: String,
    /// Prerelease and/or build metadata suffix (e.g. "-beta+build"),
    /// including its leading `-` or `+`. Empty if none.
    pub suffix: String,
    /// The original tag string.
    pub full: String,
    /// True only if `suffix` starts with `-`. Build metadata alone
    /// (`+build.123`) is not a prerelease.
    pub is_prerelease: bool,
}

impl SemVer {
    /// The rolling major tag, e.g. "v1".
    pub fn major_tag(&self) -> String {
        format!("v{}", self.major)
    }

    /// The rolling minor tag, e.g. "v1.2".
    pub fn minor_tag(&self) -> String {
        format!("v{}.{}", self.major, self.minor)
    }
}

/// Parse a semantic version tag like `v1.2.3`, `v1.2.3-beta`, or
/// `v1.2.3+build.5`.
///
/// Requires the lowercase `v` prefix and exactly three dot-separated
/// numeric components. No partial results: any input failing the grammar
/// is a [`ParseError`].
pub fn parse(tag: &str) -> Result<SemVer, ParseError> {
    let err = || ParseError {
        tag: tag.to_string(),
    };

    let rest = tag.strip_prefix('v').ok_or_else(err)?;

    let (major, rest) = take_digits(rest).ok_or_else(err)?;
    let rest = rest.strip_prefix('.').ok_or_else(err)?;
    let (minor, rest) = take_digits(rest).ok_or_else(err)?;
    let rest = rest.strip_prefix('.').ok_or_else(err)?;
    let (patch, suffix) = take_digits(rest).ok_or_else(err)?;

    // Whatever follows the patch number must be a '-' or '+' suffix running
    // to the end of the string.
    if !suffix.is_empty() && !suffix.starts_with(['-', '+']) {
        return Err(err());
    }

    Ok(SemVer {
        major: major.to_string(),
        minor: minor.to_string(),
        patch: patch.to_string(),
        suffix: suffix.to_string(),
        full: tag.to_string(),
        is_prerelease: suffix.starts_with('-'),
    })
}

/// Split a leading run of ASCII digits off `s`. `None` if there is none.
fn take_digits(s: &str) -> Option<(&str, &str)> {
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    if end == 0 {
        None
    } else {
        Some(s.split_at(end))
    }
}
