//! Per-user chain operations.
//!
//! A [`UserChain`] owns the head [`Entry`] of one user's chain by value.
//! Insertion appends at the tail so the chain preserves grant-encounter
//! order; removal splices; revocation subtracts and removes the entry
//! when its mask empties.
//!
//! The chain cannot remove its own last entry — the head is the value the
//! store holds for the user, so emptying the chain is reported as
//! [`RemoveOutcome::ChainEmptied`] and the store drops the user.

use permgrid_core::{FileName, PermissionSet, UserId};

use crate::catalog::Catalog;
use crate::entry::Entry;

/// Result of a link removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The entry was spliced out; the chain still holds at least one entry.
    Removed,
    /// The removed entry was the only one; the caller must drop the chain.
    ChainEmptied,
    /// No entry with that file name exists in the chain.
    NotFound,
}

/// Result of a revocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevokeOutcome {
    /// Permissions were subtracted; the entry survives with a non-empty mask.
    Revoked,
    /// The mask emptied and the entry was removed from the chain.
    EntryRemoved,
    /// The mask emptied, the entry was the chain's last; drop the chain.
    ChainEmptied,
    /// No entry with that file name exists in the chain.
    NotFound,
}

/// One user's singly-linked permission chain.
///
/// A chain always holds at least one entry; a user with no entries has no
/// chain at all. Operations that create or destroy links take the
/// [`Catalog`] so reference counts stay in lockstep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChain {
    head: Entry,
}

impl UserChain {
    /// Create a chain from its first entry.
    ///
    /// The caller registers the link in the catalog itself, since there is
    /// no existing chain to search. See
    /// [`MatrixStore::grant`](crate::MatrixStore::grant).
    pub fn new(head: Entry) -> Self {
        Self { head }
    }

    /// Grant permissions for a file, merging into an existing entry or
    /// appending a new one at the tail.
    ///
    /// On merge the catalog is untouched (the link already exists); on
    /// append the catalog count for the file is incremented. Returns true
    /// iff a new link was created.
    pub fn insert_or_merge(
        &mut self,
        catalog: &mut Catalog,
        file_name: FileName,
        owner: UserId,
        permissions: PermissionSet,
    ) -> bool {
        if self.head.file_name == file_name {
            self.head.grant(permissions);
            return false;
        }

        let mut link = &mut self.head.next;
        while let Some(entry) = link {
            if entry.file_name == file_name {
                entry.grant(permissions);
                return false;
            }
            link = &mut entry.next;
        }

        catalog.increment(file_name.clone());
        *link = Some(Box::new(Entry::new(file_name, owner, permissions)));
        true
    }

    /// Remove the entry for a file, splicing the chain around it.
    ///
    /// Removing the head promotes its successor to head; removing the last
    /// entry returns [`RemoveOutcome::ChainEmptied`] and leaves the stale
    /// head in place for the caller to discard with the chain. Every
    /// successful removal decrements the catalog.
    pub fn remove_link(&mut self, catalog: &mut Catalog, file_name: &FileName) -> RemoveOutcome {
        if self.head.file_name == *file_name {
            catalog.decrement(file_name);
            return match self.head.next.take() {
                Some(next) => {
                    self.head = *next;
                    RemoveOutcome::Removed
                }
                None => RemoveOutcome::ChainEmptied,
            };
        }

        let mut current = &mut self.head;
        loop {
            let hit = current
                .next
                .as_ref()
                .map(|next| next.file_name == *file_name)
                .unwrap_or(false);
            if hit {
                if let Some(removed) = current.next.take() {
                    current.next = removed.next;
                }
                catalog.decrement(file_name);
                return RemoveOutcome::Removed;
            }
            match current.next {
                Some(ref mut next) => current = next,
                None => return RemoveOutcome::NotFound,
            }
        }
    }

    /// Subtract permissions from the entry for a file.
    ///
    /// If the subtraction empties the mask, the entry is removed as a
    /// follow-up step. Subtracting an empty mask leaves the entry as-is.
    pub fn revoke(
        &mut self,
        catalog: &mut Catalog,
        file_name: &FileName,
        permissions: PermissionSet,
    ) -> RevokeOutcome {
        let Some(entry) = self.head.find_mut(file_name) else {
            return RevokeOutcome::NotFound;
        };
        entry.revoke(permissions);
        if !entry.permissions.is_empty() {
            return RevokeOutcome::Revoked;
        }

        match self.remove_link(catalog, file_name) {
            RemoveOutcome::ChainEmptied => RevokeOutcome::ChainEmptied,
            // The entry was just located, so removal cannot miss.
            _ => RevokeOutcome::EntryRemoved,
        }
    }

    /// Whether the chain grants the requested permissions for a file.
    ///
    /// False when the chain holds no entry for the file. The permission
    /// check is [`PermissionSet::grants`].
    pub fn evaluate(&self, file_name: &FileName, required: PermissionSet) -> bool {
        self.head
            .find(file_name)
            .map(|entry| entry.permissions.grants(required))
            .unwrap_or(false)
    }

    /// Keyed lookup for the entry of a file.
    pub fn find(&self, file_name: &FileName) -> Option<&Entry> {
        self.head.find(file_name)
    }

    /// Iterate entries in chain (grant-encounter) order.
    pub fn iter(&self) -> Entries<'_> {
        Entries {
            next: Some(&self.head),
        }
    }

    /// Number of entries in the chain (always at least 1).
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// The head entry.
    pub fn head(&self) -> &Entry {
        &self.head
    }
}

/// Iterator over a chain's entries in order.
pub struct Entries<'a> {
    next: Option<&'a Entry>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.next?;
        self.next = entry.next.as_deref();
        Some(entry)
    }
}

impl<'a> IntoIterator for &'a UserChain {
    type Item = &'a Entry;
    type IntoIter = Entries<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserId {
        UserId::from("alice")
    }

    fn name(s: &str) -> FileName {
        FileName::from(s)
    }

    fn perms(s: &str) -> PermissionSet {
        PermissionSet::decode(s)
    }

    /// A chain over f1, f2, f3 with a catalog tracking each link once.
    fn three_entry_chain() -> (UserChain, Catalog) {
        let mut catalog = Catalog::new();
        catalog.increment(name("f1"));
        let mut chain = UserChain::new(Entry::new(name("f1"), user(), perms("rw")));
        chain.insert_or_merge(&mut catalog, name("f2"), user(), perms("o"));
        chain.insert_or_merge(&mut catalog, name("f3"), user(), perms("r"));
        (chain, catalog)
    }

    fn chain_files(chain: &UserChain) -> Vec<&str> {
        chain.iter().map(|e| e.file_name.as_str()).collect()
    }

    #[test]
    fn test_insert_appends_at_tail() {
        let (chain, catalog) = three_entry_chain();
        assert_eq!(chain_files(&chain), vec!["f1", "f2", "f3"]);
        assert_eq!(chain.len(), 3);
        assert_eq!(catalog.count(&name("f2")), 1);
    }

    #[test]
    fn test_insert_duplicate_merges_without_new_link() {
        let (mut chain, mut catalog) = three_entry_chain();

        let created = chain.insert_or_merge(&mut catalog, name("f2"), user(), perms("w"));
        assert!(!created);
        assert_eq!(chain.len(), 3);
        // Merge ORs into the existing mask and leaves the catalog alone.
        assert_eq!(chain.find(&name("f2")).unwrap().permissions.encode(), "ow");
        assert_eq!(catalog.count(&name("f2")), 1);
    }

    #[test]
    fn test_remove_middle_splices() {
        let (mut chain, mut catalog) = three_entry_chain();

        let outcome = chain.remove_link(&mut catalog, &name("f2"));
        assert_eq!(outcome, RemoveOutcome::Removed);
        assert_eq!(chain_files(&chain), vec!["f1", "f3"]);
        assert!(!catalog.contains(&name("f2")));
    }

    #[test]
    fn test_remove_tail() {
        let (mut chain, mut catalog) = three_entry_chain();

        let outcome = chain.remove_link(&mut catalog, &name("f3"));
        assert_eq!(outcome, RemoveOutcome::Removed);
        assert_eq!(chain_files(&chain), vec!["f1", "f2"]);
    }

    #[test]
    fn test_remove_head_promotes_successor() {
        let (mut chain, mut catalog) = three_entry_chain();

        let outcome = chain.remove_link(&mut catalog, &name("f1"));
        assert_eq!(outcome, RemoveOutcome::Removed);
        // Siblings keep their relative order.
        assert_eq!(chain_files(&chain), vec!["f2", "f3"]);
        assert!(!catalog.contains(&name("f1")));
    }

    #[test]
    fn test_remove_last_entry_reports_chain_emptied() {
        let mut catalog = Catalog::new();
        catalog.increment(name("f1"));
        let mut chain = UserChain::new(Entry::new(name("f1"), user(), perms("r")));

        let outcome = chain.remove_link(&mut catalog, &name("f1"));
        assert_eq!(outcome, RemoveOutcome::ChainEmptied);
        assert!(!catalog.contains(&name("f1")));
    }

    #[test]
    fn test_remove_missing_is_not_found() {
        let (mut chain, mut catalog) = three_entry_chain();

        let outcome = chain.remove_link(&mut catalog, &name("f9"));
        assert_eq!(outcome, RemoveOutcome::NotFound);
        assert_eq!(chain.len(), 3);
        assert_eq!(catalog.count(&name("f1")), 1);
    }

    #[test]
    fn test_revoke_partial_keeps_entry() {
        let (mut chain, mut catalog) = three_entry_chain();

        let outcome = chain.revoke(&mut catalog, &name("f1"), perms("w"));
        assert_eq!(outcome, RevokeOutcome::Revoked);
        assert_eq!(chain.find(&name("f1")).unwrap().permissions.encode(), "r");
        assert_eq!(catalog.count(&name("f1")), 1);
    }

    #[test]
    fn test_revoke_to_zero_removes_entry() {
        let (mut chain, mut catalog) = three_entry_chain();

        let outcome = chain.revoke(&mut catalog, &name("f2"), perms("o"));
        assert_eq!(outcome, RevokeOutcome::EntryRemoved);
        assert!(chain.find(&name("f2")).is_none());
        assert!(!catalog.contains(&name("f2")));
    }

    #[test]
    fn test_revoke_last_entry_to_zero_reports_chain_emptied() {
        let mut catalog = Catalog::new();
        catalog.increment(name("f1"));
        let mut chain = UserChain::new(Entry::new(name("f1"), user(), perms("r")));

        let outcome = chain.revoke(&mut catalog, &name("f1"), perms("r"));
        assert_eq!(outcome, RevokeOutcome::ChainEmptied);
        assert!(!catalog.contains(&name("f1")));
    }

    #[test]
    fn test_revoke_missing_is_not_found() {
        let (mut chain, mut catalog) = three_entry_chain();

        let outcome = chain.revoke(&mut catalog, &name("f9"), perms("r"));
        assert_eq!(outcome, RevokeOutcome::NotFound);
        assert_eq!(chain.len(), 3);
    }

    #[test]
    fn test_revoke_empty_mask_is_noop() {
        let (mut chain, mut catalog) = three_entry_chain();

        // An unrecognized permission letter decodes to the empty mask.
        let outcome = chain.revoke(&mut catalog, &name("f1"), perms("x"));
        assert_eq!(outcome, RevokeOutcome::Revoked);
        assert_eq!(chain.find(&name("f1")).unwrap().permissions.encode(), "rw");
    }

    #[test]
    fn test_evaluate() {
        let (chain, _catalog) = three_entry_chain();

        assert!(chain.evaluate(&name("f1"), perms("rw")));
        assert!(chain.evaluate(&name("f1"), perms("r")));
        assert!(!chain.evaluate(&name("f1"), perms("o")));
        assert!(!chain.evaluate(&name("f9"), perms("r")));
    }
}
