//! compiler.rs - Compiles bad words into leetspeak-tolerant matchers.
//!
//! Every word in a `BadWordSet` becomes exactly one case-insensitive regular
//! expression. The compiled set remembers the full-word flag it was built with
//! so the engine can tell when it must rebuild.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::{Regex, RegexBuilder};

use crate::errors::BanwordError;
use crate::patterns::leet;

/// Upper bound on the compiled size of a single pattern.
pub const PATTERN_SIZE_LIMIT: usize = 10 * (1 << 20);

/// A single compiled bad-word matcher.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// The dictionary word this pattern was built from.
    pub word: String,
    /// The compiled, case-insensitive expression.
    pub regex: Regex,
}

/// All compiled patterns for one word set, in evaluation order.
#[derive(Debug, Clone)]
pub struct CompiledPatterns {
    pub patterns: Vec<CompiledPattern>,
    pub full_words: bool,
}

impl CompiledPatterns {
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CompiledPattern> {
        self.patterns.iter()
    }
}

/// Builds the regex source for one word, anchored on word boundaries when asked.
pub fn pattern_source(word: &str, full_words: bool) -> String {
    let body = leet::expand(word);
    if full_words {
        format!(r"\b{}\b", body)
    } else {
        body
    }
}

/// Compiles one word.
pub fn compile_word(word: &str, full_words: bool) -> Result<CompiledPattern, BanwordError> {
    compile_word_with_limit(word, full_words, PATTERN_SIZE_LIMIT)
}

/// Compiles one word, failing once the compiled program outgrows `size_limit` bytes.
pub fn compile_word_with_limit(
    word: &str,
    full_words: bool,
    size_limit: usize,
) -> Result<CompiledPattern, BanwordError> {
    let source = pattern_source(word, full_words);
    let regex = RegexBuilder::new(&source)
        .case_insensitive(true)
        .size_limit(size_limit)
        .build()
        .map_err(|e| BanwordError::PatternCompilationError(word.to_string(), e))?;
    Ok(CompiledPattern { word: word.to_string(), regex })
}

/// Compiles every word, preserving input order.
///
/// All failures are collected and reported together.
pub fn compile_all<'a, I>(words: I, full_words: bool) -> Result<CompiledPatterns, BanwordError>
where
    I: IntoIterator<Item = &'a String>,
{
    compile_all_with_limit(words, full_words, PATTERN_SIZE_LIMIT)
}

/// `compile_all` with a caller-chosen per-pattern size limit.
pub fn compile_all_with_limit<'a, I>(
    words: I,
    full_words: bool,
    size_limit: usize,
) -> Result<CompiledPatterns, BanwordError>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut patterns = Vec::new();
    let mut compilation_errors = Vec::new();

    for word in words {
        match compile_word_with_limit(word, full_words, size_limit) {
            Ok(pattern) => patterns.push(pattern),
            Err(e) => compilation_errors.push(e),
        }
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        return Err(BanwordError::Fatal(format!(
            "Failed to compile {} word(s):\n{}",
            compilation_errors.len(),
            error_message
        )));
    }

    debug!(
        target: "banword_core::compiler",
        "Compiled {} patterns (full_words: {}).",
        patterns.len(),
        full_words
    );
    Ok(CompiledPatterns { patterns, full_words })
}
