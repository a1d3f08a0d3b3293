use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::canonical_combining_class;

use super::aliases::AliasTable;

/// Maps raw competitor names onto one canonical identity string.
///
/// Steps, in order: strip diacritics (NFKD, drop combining marks), collapse
/// whitespace, drop periods and apostrophes, apply alias rules, collapse
/// adjacent duplicate words. Total over every input, empty included.
#[derive(Debug, Clone, Default)]
pub struct NameNormalizer {
    aliases: AliasTable,
}

impl NameNormalizer {
    pub fn new(aliases: AliasTable) -> Self {
        Self { aliases }
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn normalize(&self, name: &str) -> String {
        let stripped = strip_diacritics(name);
        let collapsed = collapse_whitespace(&stripped);
        let unpunctuated = remove_punctuation(&collapsed);
        let aliased = self.aliases.apply(&unpunctuated);
        collapse_repeated_words(&aliased)
    }

    /// Normalizes anything with a textual representation
    pub fn normalize_value<T: ToString + ?Sized>(&self, value: &T) -> String {
        self.normalize(&value.to_string())
    }

    /// Orders the two normalized names so `(a, b)` and `(b, a)` share a key
    pub fn canonical_pair(&self, a: &str, b: &str) -> CanonicalPair {
        CanonicalPair::new(self.normalize(a), self.normalize(b))
    }
}

/// Two canonical names with `low <= high`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalPair {
    pub low: String,
    pub high: String,
}

impl CanonicalPair {
    pub fn new(a: String, b: String) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }
}

fn strip_diacritics(name: &str) -> String {
    name.nfkd()
        .filter(|c| canonical_combining_class(*c) == 0)
        .collect()
}

fn collapse_whitespace(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn remove_punctuation(name: &str) -> String {
    name.chars().filter(|c| *c != '.' && *c != '\'').collect()
}

fn collapse_repeated_words(name: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();

    for word in name.split_whitespace() {
        let repeated = kept
            .last()
            .is_some_and(|last| last.to_lowercase() == word.to_lowercase());
        if !repeated {
            kept.push(word);
        }
    }

    kept.join(" ")
}

/// Normalizes with the built-in alias table
pub fn normalize_name(raw: &str) -> String {
    NameNormalizer::default().normalize(raw)
}
