//! The global file catalog.
//!
//! Tracks, for each file name, how many (user, chain-entry) links
//! currently reference it. The catalog owns no entries; its counts are
//! derived state, kept in lockstep by the chain operations.

use std::collections::BTreeMap;

use permgrid_core::FileName;

/// Reference-counted index of every file name known to the matrix.
///
/// An absent key means a count of zero; the map never stores a zero.
/// Iteration over file names is sorted, which fixes the column order of
/// the rendered matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    counts: BTreeMap<FileName, usize>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more link to `file_name`.
    pub fn increment(&mut self, file_name: FileName) {
        *self.counts.entry(file_name).or_insert(0) += 1;
    }

    /// Record one link to `file_name` gone, deleting the key at zero.
    ///
    /// Every decrement pairs with a prior increment for the same link;
    /// decrementing an absent key is a contract violation by the caller.
    pub fn decrement(&mut self, file_name: &FileName) {
        match self.counts.get_mut(file_name) {
            Some(count) if *count > 1 => *count -= 1,
            Some(_) => {
                self.counts.remove(file_name);
            }
            None => debug_assert!(false, "decrement of untracked file {file_name}"),
        }
    }

    /// Whether any chain currently holds an entry for `file_name`.
    pub fn contains(&self, file_name: &FileName) -> bool {
        self.counts.contains_key(file_name)
    }

    /// The current link count for `file_name` (zero when absent).
    pub fn count(&self, file_name: &FileName) -> usize {
        self.counts.get(file_name).copied().unwrap_or(0)
    }

    /// Sorted iteration over the known file names.
    pub fn files(&self) -> impl Iterator<Item = &FileName> {
        self.counts.keys()
    }

    /// Number of distinct file names tracked.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True iff no file is tracked.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> FileName {
        FileName::from(s)
    }

    #[test]
    fn test_increment_from_absent() {
        let mut catalog = Catalog::new();
        assert!(!catalog.contains(&name("f1")));
        catalog.increment(name("f1"));
        assert_eq!(catalog.count(&name("f1")), 1);
        catalog.increment(name("f1"));
        assert_eq!(catalog.count(&name("f1")), 2);
    }

    #[test]
    fn test_decrement_deletes_at_zero() {
        let mut catalog = Catalog::new();
        catalog.increment(name("f1"));
        catalog.increment(name("f1"));

        catalog.decrement(&name("f1"));
        assert_eq!(catalog.count(&name("f1")), 1);
        assert!(catalog.contains(&name("f1")));

        catalog.decrement(&name("f1"));
        assert_eq!(catalog.count(&name("f1")), 0);
        assert!(!catalog.contains(&name("f1")));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_files_sorted() {
        let mut catalog = Catalog::new();
        catalog.increment(name("b.txt"));
        catalog.increment(name("a.txt"));
        catalog.increment(name("c.txt"));

        let files: Vec<&str> = catalog.files().map(|f| f.as_str()).collect();
        assert_eq!(files, vec!["a.txt", "b.txt", "c.txt"]);
    }
}
