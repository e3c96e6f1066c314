//! Parsed record tuples.
//!
//! The matrix engine consumes already-split, already-decoded records; the
//! delimited-text reader that produces them lives with the CLI. Field
//! count validation is the reader's concern, so every record here is
//! well-formed by construction.

use serde::{Deserialize, Serialize};

use crate::permission::PermissionSet;
use crate::types::{FileName, UserId};

/// A grant record from a load batch: `user,file,permissions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRecord {
    /// The user receiving the permissions.
    pub user: UserId,

    /// The file the permissions apply to.
    pub file: FileName,

    /// The decoded permission mask.
    pub permissions: PermissionSet,
}

impl AccessRecord {
    /// Create a grant record.
    pub fn new(
        user: impl Into<UserId>,
        file: impl Into<FileName>,
        permissions: PermissionSet,
    ) -> Self {
        Self {
            user: user.into(),
            file: file.into(),
            permissions,
        }
    }
}

/// What an update record does to the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateAction {
    /// Grant permissions, merging into any existing entry.
    Grant,

    /// Revoke permissions, removing the entry if its mask empties.
    Revoke,
}

impl UpdateAction {
    /// Map an action token to an action.
    ///
    /// The token `add` means grant; every other token means revoke.
    pub fn from_token(token: &str) -> Self {
        if token == "add" {
            UpdateAction::Grant
        } else {
            UpdateAction::Revoke
        }
    }
}

/// An update record: `action,user,file,permissions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRecord {
    /// Grant or revoke.
    pub action: UpdateAction,

    /// The user whose entry is updated.
    pub user: UserId,

    /// The file the update applies to.
    pub file: FileName,

    /// The decoded permission mask to merge or subtract.
    pub permissions: PermissionSet,
}

impl UpdateRecord {
    /// Create an update record.
    pub fn new(
        action: UpdateAction,
        user: impl Into<UserId>,
        file: impl Into<FileName>,
        permissions: PermissionSet,
    ) -> Self {
        Self {
            action,
            user: user.into(),
            file: file.into(),
            permissions,
        }
    }

    /// Shorthand for a grant update.
    pub fn grant(
        user: impl Into<UserId>,
        file: impl Into<FileName>,
        permissions: PermissionSet,
    ) -> Self {
        Self::new(UpdateAction::Grant, user, file, permissions)
    }

    /// Shorthand for a revoke update.
    pub fn revoke(
        user: impl Into<UserId>,
        file: impl Into<FileName>,
        permissions: PermissionSet,
    ) -> Self {
        Self::new(UpdateAction::Revoke, user, file, permissions)
    }
}

/// An evaluation request: `user,file,permissions`, interpreted as a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRequest {
    /// The user asking for access.
    pub user: UserId,

    /// The file being accessed.
    pub file: FileName,

    /// The requested permission mask.
    pub permissions: PermissionSet,
}

impl AccessRequest {
    /// Create an evaluation request.
    pub fn new(
        user: impl Into<UserId>,
        file: impl Into<FileName>,
        permissions: PermissionSet,
    ) -> Self {
        Self {
            user: user.into(),
            file: file.into(),
            permissions,
        }
    }
}
