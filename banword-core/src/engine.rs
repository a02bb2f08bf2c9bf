// banword-core/src/engine.rs
//! The `CensorEngine`: sanitize, protect, mask, restore.
//!
//! An engine owns its active bad-word set, the compiled patterns for that set,
//! its whitelist and its masking options. Patterns are compiled lazily on the
//! first `censor` call and cached until the word set changes or a call asks
//! for a different full-word mode.
//!
//! Masking is sequential: each pattern runs over the output of the previous
//! one, so the order of the word set is the order of evaluation.
//!
//! License: MIT OR APACHE 2.0

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::censor_match::{log_censor_match_debug, CensorResult};
use crate::config::CensorConfig;
use crate::dictionary::{BadWordSet, DictionarySelector, DictionaryStore};
use crate::mask::{build_mask, MaskShuffler, RandomShuffler, DEFAULT_MARKER};
use crate::patterns::compiler::{compile_all, CompiledPatterns};
use crate::sanitizer::{HtmlSanitizer, Sanitizer};
use crate::whitelist::{WhitelistEntry, WhitelistProtector};

#[derive(Debug)]
pub struct CensorEngine {
    store: DictionaryStore,
    bad_words: BadWordSet,
    whitelist: WhitelistProtector,
    marker: String,
    full_words: bool,
    compiled: Option<Arc<CompiledPatterns>>,
    sanitizer: Box<dyn Sanitizer>,
    shuffler: Box<dyn MaskShuffler>,
}

impl CensorEngine {
    /// Creates an engine over `store` with no active words.
    pub fn new(store: DictionaryStore) -> Self {
        Self {
            store,
            bad_words: BadWordSet::new(),
            whitelist: WhitelistProtector::new(),
            marker: DEFAULT_MARKER.to_string(),
            full_words: false,
            compiled: None,
            sanitizer: Box::new(HtmlSanitizer::new()),
            shuffler: Box::new(RandomShuffler),
        }
    }

    /// Creates an engine and applies every setting in `config`.
    pub fn from_config(store: DictionaryStore, config: &CensorConfig) -> Self {
        let mut engine = Self::new(store).with_sanitizer(HtmlSanitizer::with_ansi_stripping(config.strip_ansi()));
        engine.configure(&config.selector());
        engine.set_whitelist(config.whitelist.iter().cloned());
        engine.set_replacement_marker(config.marker());
        engine.full_words = config.full_words();
        engine
    }

    pub fn with_sanitizer(mut self, sanitizer: impl Sanitizer + 'static) -> Self {
        self.sanitizer = Box::new(sanitizer);
        self
    }

    pub fn with_shuffler(mut self, shuffler: impl MaskShuffler + 'static) -> Self {
        self.shuffler = Box::new(shuffler);
        self
    }

    /// Replaces the active word set with the words `selector` resolves to.
    pub fn configure(&mut self, selector: &DictionarySelector) {
        self.bad_words = self.store.resolve(selector);
        self.invalidate();
        info!("Active bad-word set configured with {} words.", self.bad_words.len());
    }

    /// Adds the words `selector` resolves to.
    pub fn extend(&mut self, selector: &DictionarySelector) {
        let addition = self.store.resolve(selector);
        self.merge_words(&addition);
    }

    /// Adds raw words.
    pub fn extend_with_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let addition = BadWordSet::from_words(words);
        self.merge_words(&addition);
    }

    fn merge_words(&mut self, addition: &BadWordSet) {
        let before = self.bad_words.len();
        self.bad_words = DictionaryStore::merge(&self.bad_words, addition);
        self.invalidate();
        debug!("Bad-word set grew from {} to {} words.", before, self.bad_words.len());
    }

    fn invalidate(&mut self) {
        if self.compiled.take().is_some() {
            debug!("Dropped cached patterns after a word-set change.");
        }
    }

    /// Replaces the whitelist.
    pub fn set_whitelist<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.whitelist.clear();
        self.whitelist.add_entries(words);
    }

    /// Appends to the whitelist.
    pub fn add_whitelist<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.whitelist.add_entries(words);
    }

    /// Sets the mask marker. An empty marker is ignored.
    pub fn set_replacement_marker(&mut self, marker: impl Into<String>) {
        let marker = marker.into();
        if marker.is_empty() {
            warn!("Ignoring empty replacement marker; keeping '{}'.", self.marker);
            return;
        }
        self.marker = marker;
    }

    pub fn set_full_words(&mut self, full_words: bool) {
        self.full_words = full_words;
    }

    pub fn replacement_marker(&self) -> &str {
        &self.marker
    }

    pub fn full_words(&self) -> bool {
        self.full_words
    }

    pub fn bad_words(&self) -> &BadWordSet {
        &self.bad_words
    }

    pub fn whitelist(&self) -> &[WhitelistEntry] {
        self.whitelist.entries()
    }

    pub fn store(&self) -> &DictionaryStore {
        &self.store
    }

    /// Returns patterns for the active words and `full_words`, compiling if the cache is stale.
    pub fn compiled_patterns(&mut self, full_words: bool) -> Result<Arc<CompiledPatterns>> {
        if let Some(compiled) = &self.compiled {
            if compiled.full_words == full_words {
                debug!("Serving {} compiled patterns from cache.", compiled.len());
                return Ok(Arc::clone(compiled));
            }
        }

        let compiled = compile_all(&self.bad_words, full_words)
            .context("Failed to compile bad-word patterns for CensorEngine")?;
        let compiled = Arc::new(compiled);
        self.compiled = Some(Arc::clone(&compiled));
        Ok(compiled)
    }

    /// Censors `text` using the engine's configured full-word mode.
    pub fn censor_text(&mut self, text: &str) -> Result<CensorResult> {
        self.censor(text, self.full_words)
    }

    /// Censors `text`, masking every match of every active word.
    pub fn censor(&mut self, text: &str, full_words: bool) -> Result<CensorResult> {
        let original = self.sanitizer.sanitize(text);
        let protected = self.whitelist.protect(&original);
        let compiled = self.compiled_patterns(full_words)?;

        let mut buffer = protected;
        let mut matches = BTreeMap::new();
        let mut counter = 0usize;

        for pattern in compiled.iter() {
            let mut masked = String::with_capacity(buffer.len());
            let mut last_end = 0usize;

            for found in pattern.regex.find_iter(&buffer) {
                if found.as_str().is_empty() {
                    continue;
                }
                let mask = build_mask(&self.marker, found.as_str().chars().count(), self.shuffler.as_ref());
                log_censor_match_debug(module_path!(), &pattern.word, found.as_str(), &mask, counter);

                masked.push_str(&buffer[last_end..found.start()]);
                masked.push_str(&mask);
                last_end = found.end();

                matches.insert(counter, found.as_str().to_string());
                counter += 1;
            }

            if last_end > 0 {
                masked.push_str(&buffer[last_end..]);
                buffer = masked;
            }
        }

        let clean = self.whitelist.restore(&buffer);
        debug!("Censor pass finished with {} matches.", matches.len());

        Ok(CensorResult { original, clean, matches })
    }
}
