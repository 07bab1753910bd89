//! Helpers behind the `ptstem` command line tool.

use std::io::BufRead;

use ptstem_savoy::{RuleSet, SavoyStemmer, Step};
use serde::Serialize;

/// One stemmed word, as printed with `--json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StemRecord {
    pub word: String,
    pub stem: String,
}

/// Whitespace-separated words from `reader`, in order.
pub fn read_words(reader: impl BufRead) -> std::io::Result<Vec<String>> {
    let mut words = Vec::new();
    for line in reader.lines() {
        words.extend(line?.split_whitespace().map(str::to_string));
    }
    Ok(words)
}

pub fn stem_words(stemmer: &SavoyStemmer, words: &[String]) -> Vec<StemRecord> {
    words
        .iter()
        .map(|word| StemRecord {
            word: word.clone(),
            stem: stemmer.stem(word),
        })
        .collect()
}

/// Human readable listing of one step's rules.
pub fn describe_step(rules: &RuleSet, step: Step) -> Vec<String> {
    let table = rules.table(step);
    let mut lines = vec![format!(
        "{step} (min query length {}, {} rules)",
        table.min_query_length(),
        table.len()
    )];
    for (suffix, rule) in table.entries() {
        lines.push(format!(
            "  -{suffix} -> -{} (min stem length {})",
            rule.replacement, rule.min_stem_length
        ));
    }
    lines
}
