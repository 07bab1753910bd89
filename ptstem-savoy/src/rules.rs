//! Rule Tables
//!
//! The three suffix-indexed rule tables the Savoy stemmer is built from.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use ptstem_index::SuffixIndex;
use serde::{Deserialize, Serialize};

use crate::error::RuleSetError;
use crate::loader::{BuiltinRules, JsonRuleLoader, RuleLoader};

/// A suffix replacement guarded by a minimum stem length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rule {
    /// The rule applies only when the word's last index exceeds this value.
    pub min_stem_length: usize,
    /// Text substituted for the matched suffix.
    pub replacement: String,
}

impl Rule {
    pub fn new(min_stem_length: usize, replacement: impl Into<String>) -> Self {
        Self {
            min_stem_length,
            replacement: replacement.into(),
        }
    }
}

/// Suffix -> rule table for one step.
pub type RuleTable = SuffixIndex<Rule>;

/// Named steps of a rule document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    PluralReduction,
    FeminineReduction,
    FinalVowel,
}

impl Step {
    pub const ALL: [Step; 3] = [
        Step::PluralReduction,
        Step::FeminineReduction,
        Step::FinalVowel,
    ];

    /// Name used in rule documents.
    pub fn name(&self) -> &'static str {
        match self {
            Step::PluralReduction => "pluralreduction",
            Step::FeminineReduction => "femininereduction",
            Step::FinalVowel => "finalvowel",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Step {
    type Err = RuleSetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Step::ALL
            .into_iter()
            .find(|step| step.name() == s)
            .ok_or_else(|| RuleSetError::UnknownStep(s.to_string()))
    }
}

/// The complete, validated set of tables. Built once, read-only afterwards.
#[derive(Debug, Clone)]
pub struct RuleSet {
    plural_reduction: RuleTable,
    feminine_reduction: RuleTable,
    final_vowel: RuleTable,
}

impl RuleSet {
    /// Assemble a rule set; fails unless every table holds at least one rule.
    pub fn new(
        plural_reduction: RuleTable,
        feminine_reduction: RuleTable,
        final_vowel: RuleTable,
    ) -> Result<Self, RuleSetError> {
        for (step, table) in [
            (Step::PluralReduction, &plural_reduction),
            (Step::FeminineReduction, &feminine_reduction),
            (Step::FinalVowel, &final_vowel),
        ] {
            if table.is_empty() {
                return Err(RuleSetError::EmptyStep(step));
            }
        }

        Ok(Self {
            plural_reduction,
            feminine_reduction,
            final_vowel,
        })
    }

    /// The Savoy Portuguese rules shipped with this crate.
    pub fn builtin() -> Result<Self, RuleSetError> {
        BuiltinRules.load()
    }

    pub fn from_json_str(content: &str) -> Result<Self, RuleSetError> {
        JsonRuleLoader::from_string(content).load()
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RuleSetError> {
        JsonRuleLoader::from_path(path.as_ref()).load()
    }

    pub fn plural_reduction(&self) -> &RuleTable {
        &self.plural_reduction
    }

    pub fn feminine_reduction(&self) -> &RuleTable {
        &self.feminine_reduction
    }

    /// Loaded for completeness; the stemmer trims final vowels without it.
    pub fn final_vowel(&self) -> &RuleTable {
        &self.final_vowel
    }

    pub fn table(&self, step: Step) -> &RuleTable {
        match step {
            Step::PluralReduction => &self.plural_reduction,
            Step::FeminineReduction => &self.feminine_reduction,
            Step::FinalVowel => &self.final_vowel,
        }
    }
}
