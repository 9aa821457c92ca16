//! Prefix index for autocomplete
//!
//! A character-keyed trie that grows by insertion only. Words and queries
//! are folded to lower case before they touch the tree.

mod trie;

pub use trie::{PrefixIndex, TrieNode};

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Index handle shared between the completion service and its callers.
///
/// Single-writer/multi-reader: guards are taken for one `insert` or one
/// `autocomplete` at a time and are never held across an `.await`.
pub type SharedIndex = Arc<RwLock<PrefixIndex>>;

/// Case-fold a word or query.
///
/// Applied identically on insert and on lookup. Folding happens on the whole
/// string, so characters whose lower case form expands are handled the same
/// way on both sides.
pub fn fold(text: &str) -> String {
    text.to_lowercase()
}

/// Wrap an index for sharing.
pub fn shared(index: PrefixIndex) -> SharedIndex {
    Arc::new(RwLock::new(index))
}

/// Acquire a read guard, recovering from poisoning.
///
/// `insert` never panics halfway through a mutation, so a poisoned lock still
/// guards a well-formed tree.
pub fn read(index: &SharedIndex) -> RwLockReadGuard<'_, PrefixIndex> {
    index.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Acquire a write guard, recovering from poisoning.
pub fn write(index: &SharedIndex) -> RwLockWriteGuard<'_, PrefixIndex> {
    index.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold() {
        assert_eq!(fold("CaT"), "cat");
        assert_eq!(fold("ÄPFEL"), "äpfel");
        assert_eq!(fold(""), "");
    }

    #[test]
    fn test_shared_guards() {
        let index = shared(PrefixIndex::new());
        assert!(write(&index).insert("dog"));
        assert_eq!(read(&index).autocomplete("d"), vec!["dog"]);
    }
}
