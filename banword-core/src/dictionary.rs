//! dictionary.rs - Named word-list registry and bad-word set aggregation.
//!
//! A `DictionaryStore` holds immutable, named word lists (for example `en-base`,
//! `en-us`, `nl`). Callers pick lists with a `DictionarySelector` and get back a
//! deduplicated `BadWordSet`. Unknown names never fail a lookup; they are skipped
//! so a partially available dictionary bundle still loads.
//!
//! License: MIT OR APACHE 2.0

use std::collections::{HashMap, HashSet};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::errors::BanwordError;

/// An ordered set of bad words.
///
/// Order is first-insertion order and determines the order in which compiled
/// patterns are evaluated. Uniqueness is exact and case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BadWordSet {
    words: Vec<String>,
    seen: HashSet<String>,
}

impl BadWordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from any sequence of words, keeping the first occurrence of each.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        set.extend(words);
        set
    }

    /// Inserts a word, returning `false` if it was already present.
    pub fn insert(&mut self, word: impl Into<String>) -> bool {
        let word = word.into();
        if self.seen.contains(&word) {
            return false;
        }
        self.seen.insert(word.clone());
        self.words.push(word);
        true
    }

    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for word in words {
            self.insert(word);
        }
    }

    /// Returns the union of `self` and `other` without touching either.
    pub fn union(&self, other: &BadWordSet) -> BadWordSet {
        let mut merged = self.clone();
        merged.extend(other.iter().cloned());
        merged
    }

    pub fn contains(&self, word: &str) -> bool {
        self.seen.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.words.iter()
    }

    /// The materialized evaluation order.
    pub fn as_slice(&self) -> &[String] {
        &self.words
    }
}

impl<'a> IntoIterator for &'a BadWordSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for BadWordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_words(iter)
    }
}

/// Picks words out of a `DictionaryStore`.
///
/// A selector is a registered dictionary name, a literal list of words, or any
/// mix of the two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DictionarySelector {
    Name(String),
    Words(Vec<String>),
    Many(Vec<DictionarySelector>),
}

impl DictionarySelector {
    pub fn name(name: impl Into<String>) -> Self {
        DictionarySelector::Name(name.into())
    }

    pub fn words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DictionarySelector::Words(words.into_iter().map(Into::into).collect())
    }

    /// Selects several registered dictionaries by name.
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DictionarySelector::Many(names.into_iter().map(|n| DictionarySelector::Name(n.into())).collect())
    }

    pub fn many(selectors: impl IntoIterator<Item = DictionarySelector>) -> Self {
        DictionarySelector::Many(selectors.into_iter().collect())
    }
}

impl From<&str> for DictionarySelector {
    fn from(name: &str) -> Self {
        DictionarySelector::Name(name.to_string())
    }
}

impl From<String> for DictionarySelector {
    fn from(name: String) -> Self {
        DictionarySelector::Name(name)
    }
}

/// Registry of named, immutable word lists.
#[derive(Debug, Clone, Default)]
pub struct DictionaryStore {
    dictionaries: HashMap<String, BadWordSet>,
}

impl DictionaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `words` under `name`, replacing any list already registered there.
    pub fn register<I, S>(&mut self, name: impl Into<String>, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let set = BadWordSet::from_words(words);
        debug!("Registering dictionary '{}' with {} words.", name, set.len());
        if self.dictionaries.insert(name.clone(), set).is_some() {
            info!("Dictionary '{}' replaced an existing registration.", name);
        }
    }

    /// Registers a dictionary stored as a JSON array of strings.
    pub fn register_json(&mut self, name: impl Into<String>, json: &str) -> Result<(), BanwordError> {
        let name = name.into();
        let words: Vec<String> = serde_json::from_str(json)
            .map_err(|e| BanwordError::InvalidDictionary(name.clone(), e))?;
        self.register(name, words);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&BadWordSet> {
        self.dictionaries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.dictionaries.contains_key(name)
    }

    /// Registered dictionary names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.dictionaries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Resolves a selector into a deduplicated word set. Unknown names are skipped.
    pub fn resolve(&self, selector: &DictionarySelector) -> BadWordSet {
        let mut resolved = BadWordSet::new();
        self.resolve_into(selector, &mut resolved);
        debug!("Resolved dictionary selector into {} words.", resolved.len());
        resolved
    }

    fn resolve_into(&self, selector: &DictionarySelector, out: &mut BadWordSet) {
        match selector {
            DictionarySelector::Name(name) => match self.dictionaries.get(name) {
                Some(set) => out.extend(set.iter().cloned()),
                None => debug!("Dictionary '{}' is not registered; skipping.", name),
            },
            DictionarySelector::Words(words) => out.extend(words.iter().cloned()),
            DictionarySelector::Many(selectors) => {
                for inner in selectors {
                    self.resolve_into(inner, out);
                }
            }
        }
    }

    /// Set union of two word sets. Neither input is mutated.
    pub fn merge(existing: &BadWordSet, addition: &BadWordSet) -> BadWordSet {
        existing.union(addition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> DictionaryStore {
        let mut store = DictionaryStore::new();
        store.register("en", ["darn", "heck", "darn"]);
        store.register("nl", ["verdorie", "heck"]);
        store
    }

    #[test]
    fn test_register_collapses_duplicates() {
        let store = store();
        assert_eq!(store.get("en").unwrap().as_slice(), &["darn", "heck"]);
    }

    #[test]
    fn test_register_replaces_existing_name() {
        let mut store = store();
        store.register("en", ["gosh"]);
        assert_eq!(store.get("en").unwrap().as_slice(), &["gosh"]);
    }

    #[test]
    fn test_resolve_skips_unknown_names() {
        let store = store();
        let set = store.resolve(&DictionarySelector::names(["missing", "nl"]));
        assert_eq!(set.as_slice(), &["verdorie", "heck"]);
        assert!(store.resolve(&"missing".into()).is_empty());
    }

    #[test]
    fn test_resolve_mixes_names_and_literal_words() {
        let store = store();
        let selector = DictionarySelector::many([
            DictionarySelector::name("en"),
            DictionarySelector::words(["heck", "blast"]),
        ]);
        assert_eq!(store.resolve(&selector).as_slice(), &["darn", "heck", "blast"]);
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let store = DictionaryStore::new();
        let set = store.resolve(&DictionarySelector::words(["Darn", "darn"]));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_merge_does_not_mutate_inputs() {
        let a = BadWordSet::from_words(["one", "two"]);
        let b = BadWordSet::from_words(["two", "three"]);
        let merged = DictionaryStore::merge(&a, &b);
        assert_eq!(merged.as_slice(), &["one", "two", "three"]);
        assert_eq!(a.len(), 2);
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn test_register_json() {
        let mut store = DictionaryStore::new();
        store.register_json("json", r#"["alpha", "beta", "alpha"]"#).unwrap();
        assert_eq!(store.get("json").unwrap().len(), 2);
        assert!(matches!(
            store.register_json("bad", r#"{"not": "a list"}"#),
            Err(BanwordError::InvalidDictionary(name, _)) if name == "bad"
        ));
        assert!(!store.contains("bad"));
    }

    #[test]
    fn test_selector_deserializes_untagged() {
        let selector: DictionarySelector = serde_json::from_str(r#"["en", ["extra"]]"#).unwrap();
        assert_eq!(
            selector,
            DictionarySelector::many([
                DictionarySelector::name("en"),
                DictionarySelector::words(["extra"]),
            ])
        );
    }
}
