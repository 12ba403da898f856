//! semver-sync - keep rolling version tags pointed at the latest release
//!
//! When a semantic version tag like `v1.2.3` is pushed, semver-sync repoints
//! the rolling tags `v1` and `v1.2` at the same commit, creating them when
//! they do not exist yet. It runs once per tag push, typically from a CI
//! workflow, and issues at most two ref upserts against the GitHub API.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses flags, resolves config)
//! - [`core`] - Semver parsing, ref handling, and configuration validation
//! - [`sync`] - Orchestrator that reconciles each rolling tag with the remote
//! - [`forge`] - Abstraction for the remote ref store (GitHub v1)
//! - [`ui`] - Output utilities
//!
//! # Correctness Invariants
//!
//! 1. One invocation considers exactly the single pushed tag
//! 2. Prerelease tags (suffix beginning with `-`) roll nothing by default
//! 3. Rolling tag updates are always forced, so reconciliation is idempotent
//! 4. A failure on one rolling tag never prevents the other from being attempted

pub mod cli;
pub mod core;
pub mod forge;
pub mod sync;
pub mod ui;
