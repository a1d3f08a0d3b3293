use std::fs;
use std::path::Path;

use anyhow::Result;
use log::{info, warn};
use regex::{Regex, RegexBuilder};
use serde::Deserialize;

use crate::errors::{RankingError, with_io_context, with_parse_context};

/// Built-in nickname and suffix rules, applied in this order
const DEFAULT_RULES: &[(&str, &str)] = &[
    (r"\bCanelo\b", "Canelo Alvarez"),
    (r"\bTank\b", "Gervonta Davis"),
    (r"\bRay Leonard\b", "Sugar Ray Leonard"),
    (r"\s+Jr\b\.?", " Jr"),
    (r"\s+Sr\b\.?", " Sr"),
];

/// A case-insensitive pattern rewritten to a canonical string
#[derive(Debug, Clone)]
pub struct AliasRule {
    pattern: Regex,
    replacement: String,
}

impl AliasRule {
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self, RankingError> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| RankingError::InvalidAliasPattern {
                pattern: pattern.to_string(),
                source,
            })?;

        Ok(Self {
            pattern: regex,
            replacement: replacement.into(),
        })
    }

    /// Matches `alias` as a whole word or phrase, without regex syntax
    pub fn literal(alias: &str, canonical: impl Into<String>) -> Result<Self, RankingError> {
        let pattern = format!(r"\b{}\b", regex::escape(alias.trim()));
        Self::new(&pattern, canonical)
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    pub fn apply(&self, name: &str) -> String {
        self.pattern
            .replace_all(name, regex::NoExpand(&self.replacement))
            .into_owned()
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RuleEntry {
    Pattern { pattern: String, replacement: String },
    Literal { alias: String, canonical: String },
}

impl RuleEntry {
    fn into_rule(self) -> Result<AliasRule, RankingError> {
        match self {
            RuleEntry::Pattern {
                pattern,
                replacement,
            } => AliasRule::new(&pattern, replacement),
            RuleEntry::Literal { alias, canonical } => AliasRule::literal(&alias, canonical),
        }
    }
}

/// Ordered alias rules; a later rule sees the output of earlier ones
#[derive(Debug, Clone)]
pub struct AliasTable {
    rules: Vec<AliasRule>,
}

impl AliasTable {
    pub fn new(rules: Vec<AliasRule>) -> Self {
        Self { rules }
    }

    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Built-in rules; one that fails to compile is logged and left out
    pub fn builtin() -> Self {
        let rules = DEFAULT_RULES
            .iter()
            .filter_map(|(pattern, replacement)| match AliasRule::new(pattern, *replacement) {
                Ok(rule) => Some(rule),
                Err(e) => {
                    warn!("Dropping built-in alias rule: {}", e);
                    None
                }
            })
            .collect();
        Self { rules }
    }

    /// Compiles `(pattern, replacement)` pairs in order, failing on the first bad pattern
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Result<Self, RankingError> {
        let rules = pairs
            .iter()
            .map(|(pattern, replacement)| AliasRule::new(pattern, *replacement))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Parses a JSON array of `{pattern, replacement}` or `{alias, canonical}` entries
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<RuleEntry> = with_parse_context(serde_json::from_str(json), "alias table")?;
        let rules = entries
            .into_iter()
            .map(RuleEntry::into_rule)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = with_io_context(fs::read_to_string(path), "read alias", path)?;
        let table = Self::from_json_str(&json)?;
        info!("Loaded {} alias rules from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn push(&mut self, rule: AliasRule) {
        self.rules.push(rule);
    }

    pub fn extend(&mut self, other: AliasTable) {
        self.rules.extend(other.rules);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &[AliasRule] {
        &self.rules
    }

    pub fn apply(&self, name: &str) -> String {
        self.rules
            .iter()
            .fold(name.to_string(), |acc, rule| rule.apply(&acc))
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_rules_all_compile() {
        assert!(AliasTable::from_pairs(DEFAULT_RULES).is_ok());
        assert_eq!(AliasTable::builtin().len(), DEFAULT_RULES.len());
    }

    #[test]
    fn test_from_pairs_reports_bad_pattern() {
        let err = AliasTable::from_pairs(&[(r"\bAli\b", "Muhammad Ali"), (r"(Clay", "Muhammad Ali")])
            .unwrap_err();
        match err {
            RankingError::InvalidAliasPattern { pattern, .. } => assert_eq!(pattern, "(Clay"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_nickname_expands_case_insensitively() {
        let table = AliasTable::builtin();
        assert_eq!(table.apply("canelo"), "Canelo Alvarez");
        assert_eq!(table.apply("TANK"), "Gervonta Davis");
        assert_eq!(table.apply("Ray Leonard"), "Sugar Ray Leonard");
    }

    #[test]
    fn test_suffix_canonicalized() {
        let table = AliasTable::builtin();
        assert_eq!(table.apply("Roy Jones Jr."), "Roy Jones Jr");
        assert_eq!(table.apply("Roy Jones JR"), "Roy Jones Jr");
        assert_eq!(table.apply("Roy Jones  jr"), "Roy Jones Jr");
        assert_eq!(table.apply("Marvin Hagler Sr"), "Marvin Hagler Sr");
        // not a suffix
        assert_eq!(table.apply("Tony Jrake"), "Tony Jrake");
    }

    #[test]
    fn test_rules_apply_in_order() {
        let table = AliasTable::new(vec![
            AliasRule::literal("Iron Mike", "Mike Tyson").unwrap(),
            AliasRule::literal("Mike Tyson", "Michael Tyson").unwrap(),
        ]);
        assert_eq!(table.apply("Iron Mike"), "Michael Tyson");
    }

    #[test]
    fn test_replacement_is_not_expanded() {
        let rule = AliasRule::new(r"\bMoney\b", "$1 Mayweather").unwrap();
        assert_eq!(rule.apply("Money"), "$1 Mayweather");
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let err = AliasRule::new(r"(unclosed", "x").unwrap_err();
        assert!(matches!(err, RankingError::InvalidAliasPattern { .. }));
    }

    #[test]
    fn test_from_json_str_keeps_order_and_forms() {
        let json = r#"[
            {"alias": "The Greatest", "canonical": "Muhammad Ali"},
            {"pattern": "\\bCassius Clay\\b", "replacement": "Muhammad Ali"}
        ]"#;
        let table = AliasTable::from_json_str(json).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.apply("the greatest"), "Muhammad Ali");
        assert_eq!(table.apply("Cassius Clay"), "Muhammad Ali");
        assert_eq!(table.rules()[1].replacement(), "Muhammad Ali");
    }

    #[test]
    fn test_from_json_str_rejects_bad_shape() {
        assert!(AliasTable::from_json_str(r#"{"Canelo": "Canelo Alvarez"}"#).is_err());
    }
}
