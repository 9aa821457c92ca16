//! Trie implementation

use super::fold;
use std::collections::BTreeMap;
use tracing::trace;

/// A node in the prefix tree
#[derive(Debug, Clone, Default)]
pub struct TrieNode {
    /// Child edges keyed by a folded character, iterated in ascending order
    children: BTreeMap<char, TrieNode>,
    /// Whether an inserted word ends exactly here
    is_end_of_word: bool,
}

impl TrieNode {
    /// Whether an inserted word terminates at this node
    pub fn is_end_of_word(&self) -> bool {
        self.is_end_of_word
    }

    /// Child reached through `ch`, if any
    pub fn child(&self, ch: char) -> Option<&TrieNode> {
        self.children.get(&ch)
    }

    /// Child edges in canonical (ascending character) order
    pub fn children(&self) -> impl Iterator<Item = (char, &TrieNode)> {
        self.children.iter().map(|(ch, node)| (*ch, node))
    }
}

/// Incremental prefix index
///
/// The root is a sentinel with no incoming edge. Insertion is the only
/// mutation; the index grows for the life of the process.
#[derive(Debug, Clone, Default)]
pub struct PrefixIndex {
    root: TrieNode,
    words: usize,
    nodes: usize,
}

impl PrefixIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an index seeded with a vocabulary
    pub fn with_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::new();
        index.extend(words);
        index
    }

    /// Insert a word, returning `true` if it was not already indexed.
    ///
    /// Empty input is rejected: it would mark the root as a word and make the
    /// empty prefix enumerate the whole vocabulary.
    pub fn insert(&mut self, word: &str) -> bool {
        let folded = fold(word);
        if folded.is_empty() {
            trace!("Ignoring empty insert");
            return false;
        }

        let mut created = 0;
        let mut node = &mut self.root;
        for ch in folded.chars() {
            node = node.children.entry(ch).or_insert_with(|| {
                created += 1;
                TrieNode::default()
            });
        }
        self.nodes += created;

        if node.is_end_of_word {
            return false;
        }
        node.is_end_of_word = true;
        self.words += 1;
        true
    }

    /// Walk from the root along the folded prefix.
    ///
    /// Returns `None` as soon as a character has no matching edge.
    pub fn search_prefix_node(&self, prefix: &str) -> Option<&TrieNode> {
        let mut node = &self.root;
        for ch in fold(prefix).chars() {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }

    /// Enumerate every word in the subtree under `node`.
    ///
    /// `prefix` is the path spelled from the root to `node`. Words come out in
    /// pre-order with siblings visited by ascending character, so a word is
    /// listed before its extensions. Uses an explicit stack rather than
    /// recursion.
    pub fn collect_words(node: &TrieNode, prefix: &str) -> Vec<String> {
        enum Step<'a> {
            Enter(char, &'a TrieNode),
            Leave,
        }

        let mut results = Vec::new();
        let mut spelled = prefix.to_string();
        if node.is_end_of_word {
            results.push(spelled.clone());
        }

        // Children are pushed in reverse so the smallest character pops first
        let mut stack: Vec<Step<'_>> = node
            .children
            .iter()
            .rev()
            .map(|(ch, child)| Step::Enter(*ch, child))
            .collect();

        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(ch, child) => {
                    spelled.push(ch);
                    if child.is_end_of_word {
                        results.push(spelled.clone());
                    }
                    stack.push(Step::Leave);
                    stack.extend(
                        child
                            .children
                            .iter()
                            .rev()
                            .map(|(ch, grandchild)| Step::Enter(*ch, grandchild)),
                    );
                }
                Step::Leave => {
                    spelled.pop();
                }
            }
        }

        results
    }

    /// All indexed words starting with `prefix` (after folding).
    ///
    /// A prefix with no matches, and the empty prefix, yield an empty list.
    pub fn autocomplete(&self, prefix: &str) -> Vec<String> {
        let folded = fold(prefix);
        if folded.is_empty() {
            return Vec::new();
        }

        match self.search_prefix_node(&folded) {
            Some(node) => Self::collect_words(node, &folded),
            None => Vec::new(),
        }
    }

    /// Whether exactly this word (after folding) has been inserted
    pub fn contains(&self, word: &str) -> bool {
        let folded = fold(word);
        !folded.is_empty()
            && self
                .search_prefix_node(&folded)
                .is_some_and(TrieNode::is_end_of_word)
    }

    /// Number of distinct words indexed
    pub fn len(&self) -> usize {
        self.words
    }

    /// Whether no word has been indexed
    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    /// Number of nodes, excluding the root
    pub fn node_count(&self) -> usize {
        self.nodes
    }

    /// The sentinel root node
    pub fn root(&self) -> &TrieNode {
        &self.root
    }
}

// Deep chains would otherwise be torn down recursively
impl Drop for TrieNode {
    fn drop(&mut self) {
        let mut pending: Vec<TrieNode> =
            std::mem::take(&mut self.children).into_values().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(std::mem::take(&mut node.children).into_values());
        }
    }
}

impl<S: AsRef<str>> Extend<S> for PrefixIndex {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for word in iter {
            self.insert(word.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for PrefixIndex {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::with_words(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> PrefixIndex {
        PrefixIndex::with_words(["apple", "application", "banana", "band", "cat", "dog"])
    }

    #[test]
    fn test_autocomplete_seed_vocabulary() {
        let index = seeded();
        assert_eq!(index.autocomplete("app"), vec!["apple", "application"]);
        assert_eq!(index.autocomplete("ban"), vec!["banana", "band"]);
        assert!(index.autocomplete("xyz").is_empty());
    }

    #[test]
    fn test_case_folding() {
        let mut index = seeded();
        index.insert("Cat");
        assert_eq!(index.autocomplete("CAT"), vec!["cat"]);

        index.insert("Xylophone");
        assert_eq!(index.autocomplete("xY"), vec!["xylophone"]);
    }

    #[test]
    fn test_word_listed_before_extensions() {
        let index = PrefixIndex::with_words(["band", "bandana", "ban", "bandit"]);
        assert_eq!(
            index.autocomplete("ban"),
            vec!["ban", "band", "bandana", "bandit"]
        );
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut once = seeded();
        let mut twice = seeded();
        assert!(once.insert("cattle"));
        assert!(twice.insert("cattle"));
        assert!(!twice.insert("cattle"));
        assert!(!twice.insert("CATTLE"));

        assert_eq!(once.autocomplete("c"), twice.autocomplete("c"));
        assert_eq!(once.len(), twice.len());
        assert_eq!(once.node_count(), twice.node_count());
    }

    #[test]
    fn test_empty_input_rejected() {
        let mut index = seeded();
        assert!(!index.insert(""));
        assert!(index.autocomplete("").is_empty());
        assert!(!index.contains(""));
        assert!(!index.root().is_end_of_word());
        assert_eq!(index.len(), 6);
    }

    #[test]
    fn test_every_prefix_completes_to_word() {
        let words = ["apple", "application", "banana", "band", "cat", "dog", "über"];
        let index = PrefixIndex::with_words(words);

        for word in words {
            let folded = fold(word);
            let chars: Vec<char> = folded.chars().collect();
            for end in 1..=chars.len() {
                let prefix: String = chars[..end].iter().collect();
                let results = index.autocomplete(&prefix);
                assert!(
                    results.contains(&folded),
                    "{prefix:?} should complete to {folded:?}"
                );
                assert!(results.iter().all(|r| r.starts_with(&prefix)));
            }
        }
    }

    #[test]
    fn test_results_are_unique_and_sorted() {
        let index: PrefixIndex = ["dog", "do", "dot", "doge", "Do", "dOt"].into_iter().collect();
        let results = index.autocomplete("d");
        assert_eq!(results, vec!["do", "dog", "doge", "dot"]);
    }

    #[test]
    fn test_search_prefix_node() {
        let index = seeded();
        let node = index.search_prefix_node("BAN").expect("prefix exists");
        assert!(!node.is_end_of_word());
        assert_eq!(
            node.children().map(|(ch, _)| ch).collect::<Vec<_>>(),
            vec!['a', 'd']
        );
        assert!(index.search_prefix_node("bx").is_none());
        assert!(index.search_prefix_node("band").unwrap().is_end_of_word());
    }

    #[test]
    fn test_collect_words_from_subtree() {
        let index = seeded();
        let node = index.search_prefix_node("appl").unwrap();
        let words = PrefixIndex::collect_words(node, "appl");
        assert_eq!(words, vec!["apple", "application"]);
    }

    #[test]
    fn test_counts() {
        let mut index = PrefixIndex::new();
        assert!(index.is_empty());
        index.insert("ab");
        index.insert("abc");
        index.insert("ad");
        assert_eq!(index.len(), 3);
        assert_eq!(index.node_count(), 4);
        assert!(index.contains("AB"));
        assert!(!index.contains("a"));
    }

    #[test]
    fn test_deep_word_does_not_overflow() {
        let long = "a".repeat(100_000);
        let mut index = PrefixIndex::new();
        index.insert(&long);
        let results = index.autocomplete("aaa");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].len(), 100_000);
    }
}
