//! Test fixtures and helpers.
//!
//! Common setup code for scenario tests.

use permgrid_core::{AccessRecord, FileName, PermissionSet, UserId};
use permgrid_matrix::{AccessVerdict, MatrixStore};

/// A test fixture wrapping a matrix store.
pub struct MatrixFixture {
    pub store: MatrixStore,
}

impl MatrixFixture {
    /// Create a fixture with an empty store.
    pub fn new() -> Self {
        Self {
            store: MatrixStore::new(),
        }
    }

    /// Create the canonical sample matrix:
    ///
    /// - alice: f1 `rw`, f2 `o`
    /// - bob: f1 `r`
    ///
    /// Catalog: f1 counted twice, f2 once.
    pub fn sample() -> Self {
        let mut fixture = Self::new();
        fixture.grant("alice", "f1", "rw");
        fixture.grant("alice", "f2", "o");
        fixture.grant("bob", "f1", "r");
        fixture
    }

    /// Grant permissions from string shorthand.
    pub fn grant(&mut self, user: &str, file: &str, perms: &str) -> bool {
        self.store.grant(
            UserId::from(user),
            FileName::from(file),
            PermissionSet::decode(perms),
        )
    }

    /// Evaluate a request from string shorthand.
    pub fn evaluate(&self, user: &str, file: &str, perms: &str) -> AccessVerdict {
        self.store.evaluate_request(
            &UserId::from(user),
            &FileName::from(file),
            PermissionSet::decode(perms),
        )
    }

    /// The catalog count for a file name.
    pub fn count(&self, file: &str) -> usize {
        self.store.catalog().count(&FileName::from(file))
    }

    /// The chain file names for a user, in chain order.
    pub fn chain_files(&self, user: &str) -> Vec<String> {
        self.store
            .users()
            .find(|(u, _)| u.as_str() == user)
            .map(|(_, chain)| {
                chain
                    .iter()
                    .map(|e| e.file_name.as_str().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Default for MatrixFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Grant records for the canonical sample matrix, in load order.
pub fn sample_records() -> Vec<AccessRecord> {
    vec![
        AccessRecord::new("alice", "f1", PermissionSet::decode("rw")),
        AccessRecord::new("alice", "f2", PermissionSet::decode("o")),
        AccessRecord::new("bob", "f1", PermissionSet::decode("r")),
    ]
}
