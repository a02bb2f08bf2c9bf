//! whitelist.rs - Reversible protection of whitelisted terms.
//!
//! Before masking, every whitelisted term is swapped for a placeholder the
//! compiled patterns can never match. After masking the placeholders are swapped
//! back, so whitelisted text survives verbatim.
//!
//! A placeholder carries the entry index as private-use-area characters between
//! two edge characters. Each edge mirrors the word's own edge: `\u{203F}` (a
//! connector, so a word character) when the word starts or ends with a word
//! character, `\n` otherwise. Swapping a word for its placeholder therefore
//! never adds or removes a `\b` boundary in the surrounding text.
//!
//! Input that already contains the private-use sentinels is escaped by
//! `protect` and unescaped by `restore`, so only placeholders `protect` wrote
//! are ever turned back into words.
//!
//! License: MIT OR APACHE 2.0

use std::borrow::Cow;

use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const PLACEHOLDER_OPEN: char = '\u{E000}';
const PLACEHOLDER_CLOSE: char = '\u{E001}';
const PLACEHOLDER_DIGIT_BASE: u32 = 0xE010;
const WORD_EDGE: char = '\u{203F}';
const NON_WORD_EDGE: char = '\n';

const SENTINEL_ESCAPE: char = '\u{E002}';
const ESCAPED_OPEN: char = '\u{E003}';
const ESCAPED_ESCAPE: char = '\u{E004}';

static WORD_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w").expect("word start pattern is valid"));

static WORD_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w$").expect("word end pattern is valid"));

/// A placeholder (group 1 holds its index digits) or an escaped sentinel (group 2).
static PROTECTED_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"[\n\x{203F}]\x{E000}([\x{E010}-\x{E01F}]+)\x{E001}[\n\x{203F}]|\x{E002}([\x{E003}\x{E004}])",
    )
    .expect("placeholder pattern is valid")
});

/// A single whitelisted term and its lazily assigned placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhitelistEntry {
    pub word: String,
    pub placeholder: Option<String>,
}

/// Ordered collection of whitelist entries owned by one engine.
#[derive(Debug, Clone, Default)]
pub struct WhitelistProtector {
    entries: Vec<WhitelistEntry>,
}

impl WhitelistProtector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends every non-empty word as a new entry. Duplicates are kept.
    pub fn add_entries<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for word in words {
            let word = word.into();
            if word.is_empty() {
                continue;
            }
            self.entries.push(WhitelistEntry { word, placeholder: None });
        }
        debug!("Whitelist now holds {} entries.", self.entries.len());
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[WhitelistEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replaces every whitelisted word with its entry's placeholder.
    pub fn protect(&mut self, text: &str) -> String {
        let mut protected = escape_sentinels(text).into_owned();
        for (index, entry) in self.entries.iter_mut().enumerate() {
            let placeholder = entry.placeholder.get_or_insert_with(|| placeholder_for(index, &entry.word));
            let word = escape_sentinels(&entry.word);
            if protected.contains(word.as_ref()) {
                protected = protected.replace(word.as_ref(), placeholder.as_str());
            }
        }
        protected
    }

    /// Swaps placeholders back to their words and unescapes sentinels.
    ///
    /// Entries never used by `protect` are skipped.
    pub fn restore(&self, text: &str) -> String {
        PROTECTED_TOKEN
            .replace_all(text, |caps: &Captures| {
                let token = &caps[0];
                if let Some(digits) = caps.get(1) {
                    return self.word_for(digits.as_str(), token).unwrap_or(token).to_string();
                }
                match caps.get(2).and_then(|code| code.as_str().chars().next()) {
                    Some(ESCAPED_OPEN) => PLACEHOLDER_OPEN.to_string(),
                    Some(ESCAPED_ESCAPE) => SENTINEL_ESCAPE.to_string(),
                    _ => token.to_string(),
                }
            })
            .into_owned()
    }

    fn word_for(&self, digits: &str, token: &str) -> Option<&str> {
        let index = digits.chars().try_fold(0usize, |acc, digit| {
            let value = (digit as u32).checked_sub(PLACEHOLDER_DIGIT_BASE)?;
            acc.checked_mul(16)?.checked_add(value as usize)
        })?;
        let entry = self.entries.get(index)?;
        (entry.placeholder.as_deref() == Some(token)).then_some(entry.word.as_str())
    }
}

fn placeholder_for(index: usize, word: &str) -> String {
    let edge = |is_word: bool| if is_word { WORD_EDGE } else { NON_WORD_EDGE };

    let mut placeholder = String::new();
    placeholder.push(edge(WORD_START.is_match(word)));
    placeholder.push(PLACEHOLDER_OPEN);
    for digit in format!("{:x}", index).chars() {
        // Hex digits only, so `to_digit` cannot fail.
        let value = digit.to_digit(16).unwrap_or(0);
        placeholder.push(char::from_u32(PLACEHOLDER_DIGIT_BASE + value).unwrap_or(PLACEHOLDER_OPEN));
    }
    placeholder.push(PLACEHOLDER_CLOSE);
    placeholder.push(edge(WORD_END.is_match(word)));
    placeholder
}

fn escape_sentinels(text: &str) -> Cow<'_, str> {
    if !text.contains(&[PLACEHOLDER_OPEN, SENTINEL_ESCAPE][..]) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            PLACEHOLDER_OPEN => {
                escaped.push(SENTINEL_ESCAPE);
                escaped.push(ESCAPED_OPEN);
            }
            SENTINEL_ESCAPE => {
                escaped.push(SENTINEL_ESCAPE);
                escaped.push(ESCAPED_ESCAPE);
            }
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_words_are_ignored() {
        let mut whitelist = WhitelistProtector::new();
        whitelist.add_entries(["", "okay", "", "okay"]);
        assert_eq!(whitelist.entries().len(), 2);
    }

    #[test]
    fn test_protect_then_restore_round_trips() {
        let mut whitelist = WhitelistProtector::new();
        whitelist.add_entries(["scunthorpe", "class"]);
        let text = "classes in scunthorpe, class dismissed";
        let protected = whitelist.protect(text);
        assert!(!protected.contains("scunthorpe"));
        assert!(!protected.contains("class"));
        assert_eq!(whitelist.restore(&protected), text);
    }

    #[test]
    fn test_placeholders_are_stable_and_distinct() {
        let mut whitelist = WhitelistProtector::new();
        whitelist.add_entries(["one", "two"]);
        whitelist.protect("nothing here");
        let first: Vec<_> = whitelist.entries().iter().map(|e| e.placeholder.clone()).collect();
        whitelist.protect("one two");
        let second: Vec<_> = whitelist.entries().iter().map(|e| e.placeholder.clone()).collect();
        assert_eq!(first, second);
        assert_ne!(first[0], first[1]);
    }

    #[test]
    fn test_placeholder_alphabet() {
        let placeholder = placeholder_for(26, "-ok!");
        assert!(placeholder.starts_with('\n') && placeholder.ends_with('\n'));
        assert!(!placeholder.chars().any(|c| c.is_ascii_alphanumeric()));

        let placeholder = placeholder_for(26, "okay");
        assert!(placeholder.starts_with(WORD_EDGE) && placeholder.ends_with(WORD_EDGE));
        assert!(!placeholder.chars().any(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_placeholder_keeps_word_boundaries() {
        let full_word = Regex::new(r"\bass\b").unwrap();
        let mut whitelist = WhitelistProtector::new();
        whitelist.add_entries(["es", "-x"]);

        assert!(!full_word.is_match(&whitelist.protect("asses")));
        assert!(full_word.is_match(&whitelist.protect("ass-x")));
        assert!(!full_word.is_match(&whitelist.protect("esass")));
    }

    #[test]
    fn test_sentinels_in_input_are_left_alone() {
        let mut whitelist = WhitelistProtector::new();
        whitelist.add_entries(["okay"]);
        let forged = "hi \n\u{E000}\u{E010}\u{E001}\n there \u{E002}\u{E003} okay";

        let protected = whitelist.protect(forged);
        assert!(!protected.contains("okay"));
        assert_eq!(whitelist.restore(&protected), forged);

        let forged_word_edges = "\u{203F}\u{E000}\u{E010}\u{E001}\u{203F}";
        let protected_edges = whitelist.protect(forged_word_edges);
        assert_eq!(whitelist.restore(&protected_edges), forged_word_edges);
    }

    #[test]
    fn test_restore_without_protect_is_identity() {
        let mut whitelist = WhitelistProtector::new();
        whitelist.add_entries(["okay"]);
        assert_eq!(whitelist.restore("okay then"), "okay then");
    }
}
