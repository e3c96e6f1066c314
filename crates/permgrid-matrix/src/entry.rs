//! The chain node: one user's permission record for one file.

use permgrid_core::{FileName, PermissionSet, UserId};

/// One user's permission record for one file.
///
/// Entries form a singly-linked chain per user; each entry exclusively
/// owns its successor. Lookup within a chain is always an explicit keyed
/// search by file name, never a whole-value comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The file this entry grants access to.
    pub file_name: FileName,

    /// The user whose chain this entry belongs to.
    pub owner: UserId,

    /// The current permission mask. Never empty for a stored entry.
    pub permissions: PermissionSet,

    /// The next entry in the chain, if any.
    pub next: Option<Box<Entry>>,
}

impl Entry {
    /// Create a detached entry with no successor.
    pub fn new(file_name: FileName, owner: UserId, permissions: PermissionSet) -> Self {
        Self {
            file_name,
            owner,
            permissions,
            next: None,
        }
    }

    /// Merge additional permissions into this entry's mask.
    pub fn grant(&mut self, permissions: PermissionSet) {
        self.permissions = self.permissions.merge(permissions);
    }

    /// Subtract permissions from this entry's mask.
    ///
    /// The caller is responsible for removing the entry if the mask
    /// empties; see [`UserChain::revoke`](crate::UserChain::revoke).
    pub fn revoke(&mut self, permissions: PermissionSet) {
        self.permissions = self.permissions.subtract(permissions);
    }

    /// Keyed lookup down the chain starting at this entry.
    pub fn find(&self, file_name: &FileName) -> Option<&Entry> {
        if self.file_name == *file_name {
            return Some(self);
        }
        self.next.as_deref()?.find(file_name)
    }

    /// Mutable keyed lookup down the chain starting at this entry.
    pub(crate) fn find_mut(&mut self, file_name: &FileName) -> Option<&mut Entry> {
        if self.file_name == *file_name {
            return Some(self);
        }
        self.next.as_deref_mut()?.find_mut(file_name)
    }
}
