//! Savoy light stemmer for Portuguese.
//!
//! Plural and feminine endings are reduced through suffix-indexed rule tables
//! and a trailing `a`, `e` or `o` is removed. Rule tables are loaded once into
//! a [`RuleSet`] and shared read-only by every stemming call.

mod config;
mod error;
mod loader;
mod rules;
mod savoy;
mod traits;

pub use config::{RuleSource, StemmerConfig, CONFIG_ENV_VAR};
pub use error::RuleSetError;
pub use loader::{parse_rule_document, BuiltinRules, JsonRuleLoader, RuleLoader, BUILTIN_RULES};
pub use ptstem_index::{SuffixIndex, SuffixIndexError, SuffixMatch};
pub use rules::{Rule, RuleSet, RuleTable, Step};
pub use savoy::{apply_longest_matching_rule, SavoyStemmer, StemTrace};
pub use traits::Stemmer;
