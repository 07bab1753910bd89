//! Savoy Light Stemmer
//!
//! Light stemming for Portuguese as described by J. Savoy, "Light stemming
//! approaches for the French, Portuguese, German and Hungarian languages"
//! (ACM SAC 2006). Three passes run in order:
//!
//! 1. plural reduction through the plural rule table
//! 2. feminine reduction through the feminine rule table, for long words
//!    ending in `a`
//! 3. removal of a final `a`, `e` or `o`
//!
//! The final pass is a plain truncation; the `finalvowel` table is loaded but
//! never consulted, and wiring it in would change the output.

use std::collections::HashSet;

use serde::Serialize;
use tracing::trace;

use crate::config::StemmerConfig;
use crate::error::RuleSetError;
use crate::rules::{RuleSet, RuleTable};
use crate::traits::Stemmer;

/// Index of the last character, 0 for the empty word.
fn last_index(word: &str) -> usize {
    word.chars().count().saturating_sub(1)
}

/// Replace the longest suffix of `word` whose rule guard holds.
///
/// Candidates are tried from the longest matching suffix down; a failed guard
/// falls back to the next shorter match. Returns `word` unchanged when it is
/// shorter than the table's minimum query length or no guard holds.
pub fn apply_longest_matching_rule(word: &str, table: &RuleTable) -> String {
    let length = last_index(word);
    if length < table.min_query_length() {
        return word.to_string();
    }

    for candidate in table.longest_suffix_matches(word).iter().rev() {
        let rule = candidate.value;
        if length > rule.min_stem_length {
            let stem = &word[..word.len() - candidate.suffix.len()];
            return format!("{stem}{}", rule.replacement);
        }
    }

    word.to_string()
}

/// Intermediate results of one stemming run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StemTrace {
    pub input: String,
    pub after_plural: String,
    pub after_feminine: String,
    pub stem: String,
}

impl StemTrace {
    fn unchanged(word: &str) -> Self {
        Self {
            input: word.to_string(),
            after_plural: word.to_string(),
            after_feminine: word.to_string(),
            stem: word.to_string(),
        }
    }
}

/// Savoy stemmer over a loaded [`RuleSet`].
#[derive(Debug, Clone)]
pub struct SavoyStemmer {
    rules: RuleSet,
    ignored: HashSet<String>,
}

impl SavoyStemmer {
    /// Stemmer using the bundled rules.
    pub fn new() -> Result<Self, RuleSetError> {
        Ok(Self::with_rules(RuleSet::builtin()?))
    }

    pub fn with_rules(rules: RuleSet) -> Self {
        Self {
            rules,
            ignored: HashSet::new(),
        }
    }

    pub fn from_config(config: &StemmerConfig) -> Result<Self, RuleSetError> {
        let rules = config.load_rules()?;
        Ok(Self::with_rules(rules).with_ignored(config.ignore.iter().cloned()))
    }

    /// Words to return unchanged.
    pub fn with_ignored<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn is_ignored(&self, word: &str) -> bool {
        self.ignored.contains(word)
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn stem(&self, word: &str) -> String {
        self.trace(word).stem
    }

    /// Stem `word`, keeping the word produced by each pass.
    pub fn trace(&self, word: &str) -> StemTrace {
        if self.is_ignored(word) || last_index(word) <= 2 {
            return StemTrace::unchanged(word);
        }

        let after_plural = apply_longest_matching_rule(word, self.rules.plural_reduction());
        trace!(input = word, output = %after_plural, "plural reduction");

        let after_feminine = if last_index(&after_plural) > 5 && after_plural.ends_with('a') {
            apply_longest_matching_rule(&after_plural, self.rules.feminine_reduction())
        } else {
            after_plural.clone()
        };
        trace!(input = %after_plural, output = %after_feminine, "feminine reduction");

        let mut stem = after_feminine.clone();
        if last_index(&stem) > 3 && matches!(stem.chars().last(), Some('a' | 'e' | 'o')) {
            stem.pop();
        }
        trace!(input = %after_feminine, output = %stem, "final vowel");

        StemTrace {
            input: word.to_string(),
            after_plural,
            after_feminine,
            stem,
        }
    }
}

impl Stemmer for SavoyStemmer {
    fn stem(&self, word: &str) -> String {
        self.trace(word).stem
    }

    fn name(&self) -> &'static str {
        "savoy"
    }
}
