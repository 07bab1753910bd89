//! Suffix Index
//!
//! A reverse-character trie mapping suffixes to values. Words are read from
//! their last character towards the first, so every registered suffix of a
//! query word is found in a single walk whose cost depends on the word length
//! only, never on how many suffixes are registered.

use std::collections::HashMap;
use std::fmt;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SuffixIndexError {
    #[error("suffix cannot be empty")]
    EmptySuffix,
}

#[derive(Debug, Clone)]
struct Node<V> {
    children: HashMap<char, Node<V>>,
    value: Option<V>,
}

impl<V> Default for Node<V> {
    fn default() -> Self {
        Self {
            children: HashMap::new(),
            value: None,
        }
    }
}

/// A registered suffix found at the end of a query word.
///
/// `suffix` borrows from the query word, `value` from the index.
#[derive(Debug, PartialEq, Eq)]
pub struct SuffixMatch<'w, 'i, V> {
    pub suffix: &'w str,
    pub value: &'i V,
}

impl<V> Clone for SuffixMatch<'_, '_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for SuffixMatch<'_, '_, V> {}

impl<V> SuffixMatch<'_, '_, V> {
    /// Length of the matched suffix in characters.
    pub fn char_len(&self) -> usize {
        self.suffix.chars().count()
    }
}

/// Reverse trie over suffixes, populated once and read-only afterwards.
///
/// Lookups take `&self`, so a built index can be shared between threads
/// whenever `V` is `Sync`.
#[derive(Clone)]
pub struct SuffixIndex<V> {
    root: Node<V>,
    len: usize,
    min_query_length: usize,
}

impl<V> Default for SuffixIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for SuffixIndex<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuffixIndex")
            .field("min_query_length", &self.min_query_length)
            .field("entries", &self.entries())
            .finish()
    }
}

impl<V> SuffixIndex<V> {
    /// Create an empty index with a minimum query length of 0.
    pub fn new() -> Self {
        Self {
            root: Node::default(),
            len: 0,
            min_query_length: 0,
        }
    }

    pub fn with_min_query_length(mut self, min_query_length: usize) -> Self {
        self.min_query_length = min_query_length;
        self
    }

    /// Threshold below which callers should skip lookups entirely.
    pub fn min_query_length(&self) -> usize {
        self.min_query_length
    }

    pub fn set_min_query_length(&mut self, min_query_length: usize) {
        self.min_query_length = min_query_length;
    }

    /// Number of distinct suffixes registered.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Register `suffix` with `value`.
    ///
    /// Inserting a suffix that is already present replaces its value and
    /// returns the previous one.
    pub fn insert(&mut self, suffix: &str, value: V) -> Result<Option<V>, SuffixIndexError> {
        if suffix.is_empty() {
            return Err(SuffixIndexError::EmptySuffix);
        }

        let mut node = &mut self.root;
        for ch in suffix.chars().rev() {
            node = node.children.entry(ch).or_default();
        }

        let previous = node.value.replace(value);
        if previous.is_none() {
            self.len += 1;
        }
        Ok(previous)
    }

    /// Value stored for exactly `suffix`.
    pub fn get(&self, suffix: &str) -> Option<&V> {
        if suffix.is_empty() {
            return None;
        }
        let mut node = &self.root;
        for ch in suffix.chars().rev() {
            node = node.children.get(&ch)?;
        }
        node.value.as_ref()
    }

    pub fn contains_suffix(&self, suffix: &str) -> bool {
        self.get(suffix).is_some()
    }

    /// Every registered suffix of `word`, shortest first.
    ///
    /// Callers wanting the longest match first iterate the result in reverse.
    pub fn longest_suffix_matches<'w>(&self, word: &'w str) -> Vec<SuffixMatch<'w, '_, V>> {
        let mut matches = Vec::new();
        let mut node = &self.root;

        for (offset, ch) in word.char_indices().rev() {
            match node.children.get(&ch) {
                Some(next) => node = next,
                None => break,
            }
            if let Some(value) = node.value.as_ref() {
                matches.push(SuffixMatch {
                    suffix: &word[offset..],
                    value,
                });
            }
        }

        matches
    }

    /// The longest registered suffix of `word`, if any.
    pub fn longest_match<'w>(&self, word: &'w str) -> Option<SuffixMatch<'w, '_, V>> {
        let mut longest = None;
        let mut node = &self.root;

        for (offset, ch) in word.char_indices().rev() {
            match node.children.get(&ch) {
                Some(next) => node = next,
                None => break,
            }
            if let Some(value) = node.value.as_ref() {
                longest = Some(SuffixMatch {
                    suffix: &word[offset..],
                    value,
                });
            }
        }

        longest
    }

    /// All `(suffix, value)` pairs, ordered by suffix length and then
    /// lexicographically.
    pub fn entries(&self) -> Vec<(String, &V)> {
        let mut entries = Vec::with_capacity(self.len);
        let mut stack: Vec<(&Node<V>, Vec<char>)> = vec![(&self.root, Vec::new())];

        while let Some((node, reversed)) = stack.pop() {
            if let Some(value) = node.value.as_ref() {
                entries.push((reversed.iter().rev().collect::<String>(), value));
            }
            for (ch, child) in &node.children {
                let mut path = reversed.clone();
                path.push(*ch);
                stack.push((child, path));
            }
        }

        entries.sort_by(|(a, _), (b, _)| {
            a.chars()
                .count()
                .cmp(&b.chars().count())
                .then_with(|| a.cmp(b))
        });
        entries
    }
}
