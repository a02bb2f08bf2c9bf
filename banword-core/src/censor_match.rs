//! censor_match.rs - Result types for a censor pass and text-safe debug logging.
//!
//! Matched words are offensive by definition and often user-supplied, so they
//! are kept out of debug logs unless `BANWORD_ALLOW_DEBUG_TEXT=true` is set.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Read once: whether matched text may appear verbatim in debug logs.
    static ref DEBUG_TEXT_ALLOWED: bool = {
        std::env::var("BANWORD_ALLOW_DEBUG_TEXT")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// Outcome of a single `censor` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CensorResult {
    /// Sanitized input before whitelist protection and masking.
    pub original: String,
    /// Masked output with whitelisted terms restored.
    pub clean: String,
    /// Every replaced substring, keyed by discovery order.
    pub matches: BTreeMap<usize, String>,
}

impl CensorResult {
    pub fn has_matches(&self) -> bool {
        !self.matches.is_empty()
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Matched substrings in discovery order.
    pub fn matched_words(&self) -> impl Iterator<Item = &str> {
        self.matches.values().map(String::as_str)
    }
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    let len = s.chars().count();
    if len <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", len)
    }
}

fn get_loggable_content(sensitive_content: &str) -> String {
    if *DEBUG_TEXT_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

pub fn log_censor_match_debug(module_path: &str, word: &str, matched: &str, mask: &str, index: usize) {
    debug!(
        "{} Match #{} for word '{}': Original='{}', Masked='{}'",
        module_path,
        index,
        get_loggable_content(word),
        get_loggable_content(matched),
        mask
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_sensitive_short_string() {
        assert_eq!(redact_sensitive("abc"), "[REDACTED]".to_string());
    }

    #[test]
    fn test_redact_sensitive_counts_chars() {
        assert_eq!(redact_sensitive("ααααααααα"), "[REDACTED: 9 chars]".to_string());
    }

    #[test]
    fn test_result_helpers() {
        let mut result = CensorResult::default();
        assert!(!result.has_matches());
        result.matches.insert(0, "darn".to_string());
        result.matches.insert(1, "heck".to_string());
        assert_eq!(result.match_count(), 2);
        assert_eq!(result.matched_words().collect::<Vec<_>>(), ["darn", "heck"]);
    }
}
