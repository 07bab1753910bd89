//! Rule Document Loading
//!
//! Rule tables are read from a JSON document listing named steps, each with a
//! minimum query length (`size`) and a list of `suffix`/`size`/`replacement`
//! rules. Loading is all-or-nothing: any malformed entry or missing step
//! fails the whole load.

use std::fs;
use std::path::PathBuf;

use ptstem_index::SuffixIndexError;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::RuleSetError;
use crate::rules::{Rule, RuleSet, RuleTable, Step};

/// Savoy Portuguese rules bundled with the crate.
pub const BUILTIN_RULES: &str = include_str!("../rules/savoy.json");

/// Source of a complete [`RuleSet`].
pub trait RuleLoader {
    fn load(&self) -> Result<RuleSet, RuleSetError>;
}

/// Loads the bundled rule document.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinRules;

impl RuleLoader for BuiltinRules {
    fn load(&self) -> Result<RuleSet, RuleSetError> {
        parse_rule_document(BUILTIN_RULES)
    }
}

/// Loads a JSON rule document held in memory or on disk.
#[derive(Debug, Clone)]
pub enum JsonRuleLoader {
    Inline(String),
    Path(PathBuf),
}

impl JsonRuleLoader {
    pub fn from_string(content: impl Into<String>) -> Self {
        Self::Inline(content.into())
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }
}

impl RuleLoader for JsonRuleLoader {
    fn load(&self) -> Result<RuleSet, RuleSetError> {
        match self {
            JsonRuleLoader::Inline(content) => parse_rule_document(content),
            JsonRuleLoader::Path(path) => {
                debug!(path = %path.display(), "loading rule document");
                let content = fs::read_to_string(path)?;
                parse_rule_document(&content)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct RuleDocument {
    #[serde(default)]
    steps: Vec<StepEntry>,
}

#[derive(Debug, Deserialize)]
struct StepEntry {
    name: Option<String>,
    size: Option<Value>,
    #[serde(default)]
    rules: Vec<RuleEntry>,
}

#[derive(Debug, Deserialize)]
struct RuleEntry {
    suffix: Option<String>,
    size: Option<Value>,
    replacement: Option<String>,
}

/// Parse a rule document into a validated [`RuleSet`].
pub fn parse_rule_document(content: &str) -> Result<RuleSet, RuleSetError> {
    let document: RuleDocument = serde_json::from_str(content)?;

    let mut plural_reduction = None;
    let mut feminine_reduction = None;
    let mut final_vowel = None;

    for entry in document.steps {
        let name = entry.name.as_deref().ok_or(RuleSetError::UnnamedStep)?;
        let step = match name.parse::<Step>() {
            Ok(step) => step,
            Err(_) => {
                warn!(step = name, "skipping unknown rule step");
                continue;
            }
        };

        let table = build_table(step, entry)?;
        let slot = match step {
            Step::PluralReduction => &mut plural_reduction,
            Step::FeminineReduction => &mut feminine_reduction,
            Step::FinalVowel => &mut final_vowel,
        };
        if slot.replace(table).is_some() {
            debug!(%step, "step defined twice, keeping the later definition");
        }
    }

    RuleSet::new(
        plural_reduction.ok_or(RuleSetError::MissingStep(Step::PluralReduction))?,
        feminine_reduction.ok_or(RuleSetError::MissingStep(Step::FeminineReduction))?,
        final_vowel.ok_or(RuleSetError::MissingStep(Step::FinalVowel))?,
    )
}

fn build_table(step: Step, entry: StepEntry) -> Result<RuleTable, RuleSetError> {
    let mut table = RuleTable::new();
    if let Some(size) = &entry.size {
        table.set_min_query_length(parse_size(size, step, "step size")?);
    }

    for rule in entry.rules {
        let suffix = rule.suffix.ok_or(RuleSetError::MissingAttribute {
            step,
            attribute: "suffix",
        })?;
        let size = rule.size.ok_or(RuleSetError::MissingAttribute {
            step,
            attribute: "size",
        })?;
        let replacement = rule.replacement.ok_or(RuleSetError::MissingAttribute {
            step,
            attribute: "replacement",
        })?;

        let min_stem_length = parse_size(&size, step, "rule size")?;
        match table.insert(&suffix, Rule::new(min_stem_length, replacement)) {
            Ok(Some(_)) => debug!(%step, suffix = %suffix, "duplicate suffix, last rule wins"),
            Ok(None) => {}
            Err(SuffixIndexError::EmptySuffix) => return Err(RuleSetError::EmptySuffix { step }),
        }
    }

    debug!(
        %step,
        rules = table.len(),
        min_query_length = table.min_query_length(),
        "loaded rule step"
    );
    Ok(table)
}

/// Accepts JSON integers and decimal strings.
fn parse_size(value: &Value, step: Step, field: &'static str) -> Result<usize, RuleSetError> {
    let parsed = match value {
        Value::Number(number) => number.as_u64().and_then(|n| usize::try_from(n).ok()),
        Value::String(text) => text.trim().parse::<usize>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| RuleSetError::InvalidNumber {
        step,
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "steps": [
            { "name": "pluralreduction", "size": 3,
              "rules": [ { "suffix": "s", "size": 2, "replacement": "" } ] },
            { "name": "femininereduction", "size": "5",
              "rules": [ { "suffix": "inha", "size": "3", "replacement": "inho" } ] },
            { "name": "finalvowel",
              "rules": [ { "suffix": "a", "size": 3, "replacement": "" } ] }
        ]
    }"#;

    #[test]
    fn loads_minimal_document() {
        let rules = parse_rule_document(MINIMAL).unwrap();
        assert_eq!(rules.plural_reduction().min_query_length(), 3);
        assert_eq!(rules.feminine_reduction().min_query_length(), 5);
        assert_eq!(rules.final_vowel().min_query_length(), 0);
        assert_eq!(
            rules.feminine_reduction().get("inha"),
            Some(&Rule::new(3, "inho"))
        );
    }

    #[test]
    fn loads_builtin_rules() {
        let rules = BuiltinRules.load().unwrap();
        assert_eq!(rules.plural_reduction().len(), 11);
        assert_eq!(rules.feminine_reduction().len(), 15);
        assert_eq!(rules.final_vowel().len(), 3);
    }

    #[test]
    fn missing_step_fails() {
        let doc = r#"{ "steps": [
            { "name": "pluralreduction", "rules": [ { "suffix": "s", "size": 2, "replacement": "" } ] },
            { "name": "finalvowel", "rules": [ { "suffix": "a", "size": 3, "replacement": "" } ] }
        ] }"#;
        let err = parse_rule_document(doc).unwrap_err();
        assert!(matches!(err, RuleSetError::MissingStep(Step::FeminineReduction)));
    }

    #[test]
    fn unnamed_step_fails() {
        let doc = r#"{ "steps": [ { "size": 3, "rules": [] } ] }"#;
        let err = parse_rule_document(doc).unwrap_err();
        assert!(matches!(err, RuleSetError::UnnamedStep));
    }

    #[test]
    fn rule_without_replacement_fails() {
        let doc = r#"{ "steps": [
            { "name": "pluralreduction", "rules": [ { "suffix": "s", "size": 2 } ] }
        ] }"#;
        let err = parse_rule_document(doc).unwrap_err();
        assert!(matches!(
            err,
            RuleSetError::MissingAttribute {
                step: Step::PluralReduction,
                attribute: "replacement"
            }
        ));
    }

    #[test]
    fn negative_or_textual_sizes_fail() {
        for size in ["-1", "\"two\"", "1.5", "null"] {
            let doc = format!(
                r#"{{ "steps": [ {{ "name": "pluralreduction",
                   "rules": [ {{ "suffix": "s", "size": {size}, "replacement": "" }} ] }} ] }}"#
            );
            let err = parse_rule_document(&doc).unwrap_err();
            assert!(
                matches!(err, RuleSetError::InvalidNumber { .. } | RuleSetError::MissingAttribute { .. }),
                "size {size} gave {err:?}"
            );
        }
    }

    #[test]
    fn invalid_step_size_fails() {
        let doc = r#"{ "steps": [ { "name": "finalvowel", "size": "x", "rules": [] } ] }"#;
        let err = parse_rule_document(doc).unwrap_err();
        assert!(matches!(
            err,
            RuleSetError::InvalidNumber {
                step: Step::FinalVowel,
                field: "step size",
                ..
            }
        ));
    }

    #[test]
    fn empty_suffix_fails() {
        let doc = r#"{ "steps": [
            { "name": "pluralreduction", "rules": [ { "suffix": "", "size": 2, "replacement": "" } ] }
        ] }"#;
        let err = parse_rule_document(doc).unwrap_err();
        assert!(matches!(err, RuleSetError::EmptySuffix { step: Step::PluralReduction }));
    }

    #[test]
    fn empty_step_fails() {
        let doc = MINIMAL.replace(
            r#"[ { "suffix": "a", "size": 3, "replacement": "" } ]"#,
            "[]",
        );
        let err = parse_rule_document(&doc).unwrap_err();
        assert!(matches!(err, RuleSetError::EmptyStep(Step::FinalVowel)));
    }

    #[test]
    fn unknown_steps_are_skipped() {
        let doc = MINIMAL.replacen(
            r#""steps": ["#,
            r#""steps": [ { "name": "prefixes", "rules": [ { "suffix": "x" } ] },"#,
            1,
        );
        assert!(parse_rule_document(&doc).is_ok());
    }

    #[test]
    fn duplicate_suffix_keeps_last_rule() {
        let doc = MINIMAL.replace(
            r#"{ "suffix": "s", "size": 2, "replacement": "" }"#,
            r#"{ "suffix": "s", "size": 2, "replacement": "" },
               { "suffix": "s", "size": 4, "replacement": "z" }"#,
        );
        let rules = parse_rule_document(&doc).unwrap();
        assert_eq!(rules.plural_reduction().len(), 1);
        assert_eq!(rules.plural_reduction().get("s"), Some(&Rule::new(4, "z")));
    }

    #[test]
    fn malformed_json_fails() {
        let err = parse_rule_document("{ steps: ").unwrap_err();
        assert!(matches!(err, RuleSetError::Parse(_)));
    }

    #[test]
    fn loads_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        fs::write(&path, MINIMAL).unwrap();

        let rules = JsonRuleLoader::from_path(&path).load().unwrap();
        assert_eq!(rules.plural_reduction().len(), 1);

        let err = JsonRuleLoader::from_path(dir.path().join("absent.json"))
            .load()
            .unwrap_err();
        assert!(matches!(err, RuleSetError::Io(_)));
    }
}
