//! # Permgrid Matrix
//!
//! The sparse access-control matrix engine.
//!
//! ## Overview
//!
//! The matrix stores only non-empty (user, file) permission pairs. Each
//! user owns a singly-linked chain of [`Entry`] nodes in grant-encounter
//! order, and a global [`Catalog`] reference-counts how many chains
//! currently hold an entry for each file name.
//!
//! ## Key Types
//!
//! - [`Entry`] - One user's permission record for one file
//! - [`UserChain`] - Per-user list operations: insert-or-merge,
//!   splice-remove, revoke-with-auto-remove, evaluation
//! - [`Catalog`] - Reference-counted file name index
//! - [`MatrixStore`] - Owns all chains and the catalog; batch load/update
//!   and request evaluation
//!
//! ## Invariants
//!
//! - Within one chain, file names are unique.
//! - No entry with an empty permission mask survives a completed revoke.
//! - The catalog count for a file always equals the number of entries for
//!   that file across all chains.
//!
//! Catalog bookkeeping is a mandatory side effect of the chain operations
//! that create or destroy links, which is why those operations take the
//! catalog as a parameter rather than leaving counts to the caller.

pub mod catalog;
pub mod chain;
pub mod entry;
pub mod error;
pub mod store;

pub use catalog::Catalog;
pub use chain::{Entries, RemoveOutcome, RevokeOutcome, UserChain};
pub use entry::Entry;
pub use error::{MatrixError, Result};
pub use store::{AccessVerdict, MatrixStore, UpdateFailure, UpdateReport};
