//! Stemmer Traits
//!
//! Common interface for stemming algorithms.

use rayon::prelude::*;

/// A word-in, word-out stemming algorithm.
///
/// Implementations are immutable once built, so one instance can serve any
/// number of threads.
pub trait Stemmer: Send + Sync {
    /// Reduce a single word. Never fails; words the algorithm cannot handle
    /// come back unchanged.
    fn stem(&self, word: &str) -> String;

    /// Short identifier of the algorithm.
    fn name(&self) -> &'static str;

    /// Stem every word in parallel, preserving input order.
    fn stem_all(&self, words: &[&str]) -> Vec<String> {
        words.par_iter().map(|word| self.stem(word)).collect()
    }
}
