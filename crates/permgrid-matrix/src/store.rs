//! The matrix store: all user chains plus the file catalog.
//!
//! The store owns every chain head and the catalog as instance fields;
//! there is no process-wide state. One store corresponds to one session.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use permgrid_core::{AccessRecord, AccessRequest, FileName, PermissionSet, UpdateAction, UpdateRecord, UserId};

use crate::catalog::Catalog;
use crate::chain::{RevokeOutcome, UserChain};
use crate::entry::Entry;
use crate::error::{MatrixError, Result};

/// Verdict of an access request evaluation.
///
/// The unknown cases are expected, reported outcomes, not failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessVerdict {
    /// The user holds an entry for the file and it grants the request.
    Permit,
    /// The user or the entry does not grant the request.
    Deny,
    /// The user holds no permissions at all.
    UnknownUser,
    /// No chain anywhere holds an entry for the file.
    UnknownFile,
}

impl AccessVerdict {
    /// True iff the verdict is [`AccessVerdict::Permit`].
    pub fn is_permit(&self) -> bool {
        matches!(self, AccessVerdict::Permit)
    }
}

/// Result of an update batch.
///
/// Per-record failures are collected here; the batch never aborts early.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Grants that created a new link.
    pub granted: usize,
    /// Grants merged into an existing entry.
    pub merged: usize,
    /// Revocations applied (whether or not the entry survived).
    pub revoked: usize,
    /// Entries removed because their mask emptied.
    pub entries_removed: usize,
    /// Users dropped because their last entry was removed.
    pub users_removed: usize,
    /// Records that failed, in input order.
    pub failures: Vec<UpdateFailure>,
}

impl UpdateReport {
    /// True iff every record in the batch applied.
    pub fn success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// One failed record in an update batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateFailure {
    /// Zero-based index of the record in the batch.
    pub index: usize,
    /// Why the record could not be applied.
    pub reason: MatrixError,
}

/// The sparse access-control matrix.
///
/// Maps each user to the head of their permission chain and keeps the
/// [`Catalog`] counts consistent with every mutation. Users are stored in
/// sorted order, which fixes the row order of the rendered matrix.
#[derive(Debug, Clone, Default)]
pub struct MatrixStore {
    users: BTreeMap<UserId, UserChain>,
    catalog: Catalog,
}

impl MatrixStore {
    /// Create an empty matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant permissions for one (user, file) pair.
    ///
    /// A new user gets a single-node chain registered under their id, with
    /// the catalog incremented directly since there is no chain to search.
    /// An existing user's chain handles insert-or-merge itself. Returns
    /// true iff a new link was created.
    pub fn grant(
        &mut self,
        user: UserId,
        file: FileName,
        permissions: PermissionSet,
    ) -> bool {
        match self.users.get_mut(&user) {
            Some(chain) => chain.insert_or_merge(&mut self.catalog, file, user, permissions),
            None => {
                self.catalog.increment(file.clone());
                let entry = Entry::new(file, user.clone(), permissions);
                self.users.insert(user, UserChain::new(entry));
                true
            }
        }
    }

    /// Apply a batch of grant records in input order.
    pub fn load(&mut self, records: impl IntoIterator<Item = AccessRecord>) {
        let mut created = 0usize;
        let mut merged = 0usize;
        for record in records {
            if self.grant(record.user, record.file, record.permissions) {
                created += 1;
            } else {
                merged += 1;
            }
        }
        tracing::debug!(created, merged, "load batch applied");
    }

    /// Subtract permissions from one (user, file) pair.
    ///
    /// Fails with [`MatrixError::UnknownUser`] when the user holds no
    /// permissions at all. A revoke that empties the entry's mask removes
    /// the entry, and removing the last entry drops the user.
    pub fn revoke(
        &mut self,
        user: &UserId,
        file: &FileName,
        permissions: PermissionSet,
    ) -> Result<RevokeOutcome> {
        let chain = self
            .users
            .get_mut(user)
            .ok_or_else(|| MatrixError::UnknownUser(user.clone()))?;

        let outcome = chain.revoke(&mut self.catalog, file, permissions);
        if outcome == RevokeOutcome::ChainEmptied {
            self.users.remove(user);
        }
        Ok(outcome)
    }

    /// Apply a batch of update records in input order.
    ///
    /// Grant records behave like [`MatrixStore::load`]'s per-record branch.
    /// Revoke records naming an unknown user or an absent entry fail for
    /// that record only; the batch continues and the report collects every
    /// failure.
    pub fn update(&mut self, records: impl IntoIterator<Item = UpdateRecord>) -> UpdateReport {
        let mut report = UpdateReport::default();
        for (index, record) in records.into_iter().enumerate() {
            let UpdateRecord {
                action,
                user,
                file,
                permissions,
            } = record;
            match action {
                UpdateAction::Grant => {
                    if self.grant(user, file, permissions) {
                        report.granted += 1;
                    } else {
                        report.merged += 1;
                    }
                }
                UpdateAction::Revoke => match self.revoke(&user, &file, permissions) {
                    Ok(RevokeOutcome::Revoked) => report.revoked += 1,
                    Ok(RevokeOutcome::EntryRemoved) => {
                        report.revoked += 1;
                        report.entries_removed += 1;
                    }
                    Ok(RevokeOutcome::ChainEmptied) => {
                        report.revoked += 1;
                        report.entries_removed += 1;
                        report.users_removed += 1;
                    }
                    Ok(RevokeOutcome::NotFound) => {
                        let reason = MatrixError::UnknownEntry { user, file };
                        tracing::warn!(index, %reason, "update record skipped");
                        report.failures.push(UpdateFailure { index, reason });
                    }
                    Err(reason) => {
                        tracing::warn!(index, %reason, "update record skipped");
                        report.failures.push(UpdateFailure { index, reason });
                    }
                },
            }
        }
        report
    }

    /// Evaluate an access request to a structured verdict.
    ///
    /// User lookup comes first, then catalog membership for the file, then
    /// the chain's permission check.
    pub fn evaluate_request(
        &self,
        user: &UserId,
        file: &FileName,
        required: PermissionSet,
    ) -> AccessVerdict {
        let Some(chain) = self.users.get(user) else {
            return AccessVerdict::UnknownUser;
        };
        if !self.catalog.contains(file) {
            return AccessVerdict::UnknownFile;
        }
        if chain.evaluate(file, required) {
            AccessVerdict::Permit
        } else {
            AccessVerdict::Deny
        }
    }

    /// Evaluate a parsed request record.
    pub fn evaluate(&self, request: &AccessRequest) -> AccessVerdict {
        self.evaluate_request(&request.user, &request.file, request.permissions)
    }

    /// Drop a user and their whole chain. Returns false if absent.
    ///
    /// Each removed entry releases its catalog link.
    pub fn remove_user(&mut self, user: &UserId) -> bool {
        match self.users.remove(user) {
            Some(chain) => {
                for entry in chain.iter() {
                    self.catalog.decrement(&entry.file_name);
                }
                true
            }
            None => false,
        }
    }

    /// Sorted iteration over users and their chains.
    pub fn users(&self) -> impl Iterator<Item = (&UserId, &UserChain)> {
        self.users.iter()
    }

    /// The file catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The permission mask a user holds for a file, if any.
    ///
    /// This is the cell of the conceptual matrix; `None` renders as an
    /// empty cell.
    pub fn permissions_for(&self, user: &UserId, file: &FileName) -> Option<PermissionSet> {
        self.users
            .get(user)?
            .find(file)
            .map(|entry| entry.permissions)
    }

    /// Number of users currently holding at least one permission.
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// True iff no user holds any permission.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
