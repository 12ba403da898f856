//! forge
//!
//! Abstraction for the remote ref store (GitHub v1).
//!
//! # Architecture
//!
//! The `Forge` trait defines the three ref operations the sync needs:
//! look up a ref, create a ref, and force-move a ref. The orchestrator
//! depends only on the trait, so it is testable with the in-memory
//! [`mock::MockForge`] and portable to any host exposing equivalent ref
//! semantics.
//!
//! # Modules
//!
//! - `traits`: the `Forge` trait, `GitRef`, and `ForgeError`
//! - [`github`]: GitHub implementation using the git-refs REST API
//! - [`mock`]: in-memory implementation for deterministic testing

pub mod github;
pub mod mock;
mod traits;

pub use traits::{Forge, ForgeError, GitRef};
