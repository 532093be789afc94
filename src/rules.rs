//! Replacement-rule table loading and whole-word substitution
//!
//! Rules come from a two-column CSV (`Find`, `Replace With`) and are applied
//! sequentially in table order: each rule rewrites the text seen by the rules
//! after it. Matches are case-sensitive and bounded by word boundaries, so a
//! find term never rewrites the inside of a larger token.

use std::path::{Path, PathBuf};

use regex::{NoExpand, Regex};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("failed to load replacement rules from {path}: {source}")]
pub struct RulesError {
    pub path: PathBuf,
    #[source]
    pub source: csv::Error,
}

#[derive(Debug, Deserialize)]
struct RuleRow {
    #[serde(rename = "Find")]
    find: String,
    #[serde(rename = "Replace With", default)]
    replace_with: String,
}

#[derive(Debug, Clone)]
struct CompiledRule {
    find: String,
    pattern: Regex,
    replace: String,
}

/// Ordered find/replace table. Re-inserting an existing find term updates
/// its replacement but keeps its original position, so iteration order is
/// first-insertion order.
#[derive(Debug, Clone, Default)]
pub struct ReplacementRules {
    rules: Vec<CompiledRule>,
}

impl ReplacementRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load rules from a CSV table. Rows with an empty find term are
    /// discarded.
    pub fn load(path: &Path) -> Result<Self, RulesError> {
        let wrap = |source| RulesError {
            path: path.to_path_buf(),
            source,
        };
        let mut reader = csv::Reader::from_path(path).map_err(wrap)?;
        let mut rules = Self::new();
        for row in reader.deserialize::<RuleRow>() {
            let row = row.map_err(wrap)?;
            if row.find.is_empty() {
                continue;
            }
            rules.insert(row.find, row.replace_with);
        }
        Ok(rules)
    }

    pub fn insert(&mut self, find: impl Into<String>, replace: impl Into<String>) {
        let find = find.into();
        let replace = replace.into();
        if find.is_empty() {
            return;
        }
        if let Some(existing) = self.rules.iter_mut().find(|rule| rule.find == find) {
            existing.replace = replace;
            return;
        }
        // The find term is escaped, so the pattern always compiles.
        let Ok(pattern) = Regex::new(&format!(r"\b{}\b", regex::escape(&find))) else {
            return;
        };
        self.rules.push(CompiledRule {
            find,
            pattern,
            replace,
        });
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule in order. An empty table is the identity function.
    pub fn apply(&self, text: &str) -> String {
        let mut out = text.to_string();
        for rule in &self.rules {
            out = rule
                .pattern
                .replace_all(&out, NoExpand(rule.replace.as_str()))
                .into_owned();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(pairs: &[(&str, &str)]) -> ReplacementRules {
        let mut rules = ReplacementRules::new();
        for (find, replace) in pairs {
            rules.insert(*find, *replace);
        }
        rules
    }

    #[test]
    fn replaces_whole_words_only() {
        let rules = rules(&[("cat", "dog")]);
        assert_eq!(rules.apply("cat category"), "dog category");
    }

    #[test]
    fn replacement_is_case_sensitive() {
        let rules = rules(&[("cat", "dog")]);
        assert_eq!(rules.apply("Cat cat CAT"), "Cat dog CAT");
    }

    #[test]
    fn rules_apply_sequentially_in_order() {
        let rules = rules(&[("a", "b"), ("b", "c")]);
        assert_eq!(rules.apply("a"), "c");
    }

    #[test]
    fn later_duplicate_wins_but_keeps_position() {
        let rules = rules(&[("a", "b"), ("b", "x"), ("a", "z")]);
        // "a" still applies before "b", with its updated replacement.
        assert_eq!(rules.apply("a"), "z");
        assert_eq!(rules.len(), 2);
    }

    #[test]
    fn empty_table_is_identity() {
        let rules = ReplacementRules::new();
        assert_eq!(rules.apply("10-20 SAND (40%)"), "10-20 SAND (40%)");
    }

    #[test]
    fn empty_find_terms_are_discarded() {
        let rules = rules(&[("", "x"), ("silt", "Silt")]);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules.apply("silt"), "Silt");
    }

    #[test]
    fn special_characters_in_find_terms_are_literal() {
        let rules = rules(&[("gr-brn", "grey-brown")]);
        assert_eq!(rules.apply("sand gr-brn mottled"), "sand grey-brown mottled");
    }

    #[test]
    fn replacement_text_is_literal() {
        let rules = rules(&[("qtz", "$quartz")]);
        assert_eq!(rules.apply("qtz"), "$quartz");
    }
}
