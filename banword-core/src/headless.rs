// banword-core/src/headless.rs

//! `headless.rs`
//! Convenience wrapper for one-shot censoring without keeping an engine around.

use anyhow::Result;

use crate::censor_match::CensorResult;
use crate::config::CensorConfig;
use crate::dictionary::DictionaryStore;
use crate::engine::CensorEngine;

/// Builds an engine from `config` over `store` and censors `content` once,
/// using the config's full-word setting.
pub fn headless_censor_string(store: DictionaryStore, config: &CensorConfig, content: &str) -> Result<CensorResult> {
    config.validate()?;
    let mut engine = CensorEngine::from_config(store, config);
    engine.censor_text(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_censor_string() -> Result<()> {
        let mut store = DictionaryStore::new();
        store.register("en-base", ["darn", "heck"]);
        let config = CensorConfig {
            dictionaries: vec!["en-base".to_string(), "not-installed".to_string()],
            words: vec!["blast".to_string()],
            replacement_marker: Some("-".to_string()),
            ..Default::default()
        };

        let result = headless_censor_string(store, &config, "Darn it, blast!")?;
        assert_eq!(result.clean, "---- it, -----!");
        assert_eq!(result.match_count(), 2);
        Ok(())
    }

    #[test]
    fn test_headless_rejects_invalid_config() {
        let config = CensorConfig {
            replacement_marker: Some(String::new()),
            ..Default::default()
        };
        assert!(headless_censor_string(DictionaryStore::new(), &config, "text").is_err());
    }
}
