//! forge::mock
//!
//! Mock forge implementation for deterministic testing.
//!
//! # Design
//!
//! The mock forge stores refs in memory, records every operation for later
//! verification, and allows configuring failure scenarios per operation.
//!
//! # Example
//!
//! ```
//! use semver_sync::forge::mock::MockForge;
//! use semver_sync::forge::{Forge, ForgeError};
//!
//! # tokio_test::block_on(async {
//! let forge = MockForge::new();
//!
//! // Nothing there yet
//! let err = forge.get_ref("owner", "repo", "tags/v1").await.unwrap_err();
//! assert!(matches!(err, ForgeError::NotFound(_)));
//!
//! // Create it
//! forge.create_ref("owner", "repo", "refs/tags/v1", "abc123").await.unwrap();
//! let r = forge.get_ref("owner", "repo", "tags/v1").await.unwrap();
//! assert_eq!(r.sha, "abc123");
//! # });
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::traits::{Forge, ForgeError, GitRef};

/// Mock forge for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone)]
pub struct MockForge {
    /// Internal state shared across clones.
    inner: Arc<Mutex<MockForgeInner>>,
}

/// Internal mutable state.
#[derive(Debug)]
struct MockForgeInner {
    /// Stored refs by short path (e.g. `tags/v1`) to target sha.
    refs: HashMap<String, String>,
    /// Operation to fail (for testing error paths).
    fail_on: Option<FailOn>,
    /// Recorded operations for verification.
    operations: Vec<MockOperation>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail get_ref with the given error.
    GetRef(ForgeError),
    /// Fail create_ref with the given error.
    CreateRef(ForgeError),
    /// Fail update_ref with the given error.
    UpdateRef(ForgeError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    GetRef {
        ref_path: String,
    },
    CreateRef {
        full_ref: String,
        sha: String,
    },
    UpdateRef {
        ref_path: String,
        sha: String,
    },
}

impl MockForge {
    /// Create a new empty mock forge.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockForgeInner {
                refs: HashMap::new(),
                fail_on: None,
                operations: Vec::new(),
            })),
        }
    }

    /// Create a mock forge with pre-existing refs.
    ///
    /// Keys are short ref paths, e.g. `tags/v1`.
    pub fn with_refs(refs: Vec<(&str, &str)>) -> Self {
        let refs = refs
            .into_iter()
            .map(|(name, sha)| (name.to_string(), sha.to_string()))
            .collect();

        Self {
            inner: Arc::new(Mutex::new(MockForgeInner {
                refs,
                fail_on: None,
                operations: Vec::new(),
            })),
        }
    }

    /// Configure the mock to fail on a specific operation.
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.fail_on = Some(fail_on);
        }
        self
    }

    /// Clear the failure configuration.
    pub fn clear_fail_on(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_on = None;
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<MockOperation> {
        let inner = self.inner.lock().unwrap();
        inner.operations.clone()
    }

    /// Clear recorded operations.
    pub fn clear_operations(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.clear();
    }

    /// Get the target sha of a stored ref (for test verification).
    pub fn ref_sha(&self, ref_path: &str) -> Option<String> {
        let inner = self.inner.lock().unwrap();
        inner.refs.get(ref_path).cloned()
    }

    /// Number of stored refs.
    pub fn ref_count(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.refs.len()
    }

    /// Record an operation.
    fn record(&self, op: MockOperation) {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(op);
    }

    /// Check if the named operation should fail and return the error if so.
    fn check_fail(&self, expected: &str) -> Option<ForgeError> {
        let inner = self.inner.lock().unwrap();
        match &inner.fail_on {
            Some(FailOn::GetRef(e)) if expected == "get_ref" => Some(e.clone()),
            Some(FailOn::CreateRef(e)) if expected == "create_ref" => Some(e.clone()),
            Some(FailOn::UpdateRef(e)) if expected == "update_ref" => Some(e.clone()),
            _ => None,
        }
    }
}

impl Default for MockForge {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Forge for MockForge {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn get_ref(
        &self,
        _owner: &str,
        _repo: &str,
        ref_path: &str,
    ) -> Result<GitRef, ForgeError> {
        self.record(MockOperation::GetRef {
            ref_path: ref_path.to_string(),
        });

        if let Some(err) = self.check_fail("get_ref") {
            return Err(err);
        }

        let inner = self.inner.lock().unwrap();
        match inner.refs.get(ref_path) {
            Some(sha) => Ok(GitRef {
                name: format!("refs/{}", ref_path),
                sha: sha.clone(),
            }),
            None => Err(ForgeError::NotFound(ref_path.to_string())),
        }
    }

    async fn create_ref(
        &self,
        _owner: &str,
        _repo: &str,
        full_ref: &str,
        sha: &str,
    ) -> Result<GitRef, ForgeError> {
        self.record(MockOperation::CreateRef {
            full_ref: full_ref.to_string(),
            sha: sha.to_string(),
        });

        if let Some(err) = self.check_fail("create_ref") {
            return Err(err);
        }

        let short = full_ref.strip_prefix("refs/").unwrap_or(full_ref);

        let mut inner = self.inner.lock().unwrap();
        if inner.refs.contains_key(short) {
            return Err(ForgeError::ApiError {
                status: 422,
                message: "Reference already exists".to_string(),
            });
        }
        inner.refs.insert(short.to_string(), sha.to_string());

        Ok(GitRef {
            name: full_ref.to_string(),
            sha: sha.to_string(),
        })
    }

    async fn update_ref(
        &self,
        _owner: &str,
        _repo: &str,
        ref_path: &str,
        sha: &str,
    ) -> Result<GitRef, ForgeError> {
        self.record(MockOperation::UpdateRef {
            ref_path: ref_path.to_string(),
            sha: sha.to_string(),
        });

        if let Some(err) = self.check_fail("update_ref") {
            return Err(err);
        }

        let mut inner = self.inner.lock().unwrap();
        match inner.refs.get_mut(ref_path) {
            Some(stored) => {
                *stored = sha.to_string();
                Ok(GitRef {
                    name: format!("refs/{}", ref_path),
                    sha: sha.to_string(),
                })
            }
            None => Err(ForgeError::ApiError {
                status: 422,
                message: format!("Reference {} does not exist", ref_path),
            }),
        }
    }
}
