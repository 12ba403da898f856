//! core
//!
//! Domain types and parsing: semantic version tags, git refs, and the
//! invocation configuration. Everything here is pure; no I/O.

pub mod config;
pub mod refs;
pub mod semver;
