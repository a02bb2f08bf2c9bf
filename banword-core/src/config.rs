//! Configuration management for `banword-core`.
//!
//! A `CensorConfig` names the dictionaries to activate, extra literal words,
//! the whitelist and the masking options. Configs are usually YAML files; a
//! user config can be overlaid on a default one with [`merge_configs`].
//!
//! License: MIT OR Apache-2.0

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::dictionary::DictionarySelector;
use crate::errors::BanwordError;
use crate::mask::DEFAULT_MARKER;

/// Settings for a `CensorEngine`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CensorConfig {
    /// Registered dictionary names to activate (e.g. "en-base", "nl").
    pub dictionaries: Vec<String>,
    /// Extra literal bad words.
    pub words: Vec<String>,
    /// Terms that are never masked.
    pub whitelist: Vec<String>,
    /// Mask marker. Defaults to `*`.
    pub replacement_marker: Option<String>,
    /// Match on token boundaries only. Defaults to false.
    pub full_words: Option<bool>,
    /// Strip ANSI escape sequences before censoring. Defaults to false.
    pub strip_ansi: Option<bool>,
}

impl CensorConfig {
    /// Loads a config from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading censor config from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .map_err(BanwordError::from)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml_str(&text)
            .with_context(|| format!("Failed to load config file {}", path.display()))?;
        info!(
            "Loaded config from {}: {} dictionaries, {} extra words, {} whitelist entries.",
            path.display(),
            config.dictionaries.len(),
            config.words.len(),
            config.whitelist.len()
        );
        Ok(config)
    }

    /// Parses and validates a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: CensorConfig = serde_yml::from_str(yaml).context("Failed to parse censor config")?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every field and reports all problems at once.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.dictionaries.iter().any(|name| name.trim().is_empty()) {
            errors.push("`dictionaries` contains an empty name.".to_string());
        }
        if let Some(marker) = &self.replacement_marker {
            if marker.is_empty() {
                errors.push("`replacement_marker` cannot be empty.".to_string());
            }
        }
        if self.words.iter().any(String::is_empty) {
            errors.push("`words` contains an empty word.".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(BanwordError::InvalidConfig(errors.join("\n")).into())
        }
    }

    pub fn marker(&self) -> &str {
        self.replacement_marker.as_deref().unwrap_or(DEFAULT_MARKER)
    }

    pub fn full_words(&self) -> bool {
        self.full_words.unwrap_or(false)
    }

    pub fn strip_ansi(&self) -> bool {
        self.strip_ansi.unwrap_or(false)
    }

    /// The selector covering both the named dictionaries and the literal words.
    pub fn selector(&self) -> DictionarySelector {
        let mut selectors: Vec<DictionarySelector> =
            self.dictionaries.iter().map(|name| DictionarySelector::name(name.as_str())).collect();
        if !self.words.is_empty() {
            selectors.push(DictionarySelector::words(self.words.iter().cloned()));
        }
        DictionarySelector::Many(selectors)
    }
}

/// Overlays `user_config` on `default_config`.
///
/// Scalar settings present in the user config win. List settings are unioned,
/// keeping default entries first and dropping duplicates.
pub fn merge_configs(default_config: CensorConfig, user_config: Option<CensorConfig>) -> CensorConfig {
    let Some(user) = user_config else {
        debug!("No user config provided; using defaults.");
        return default_config;
    };
    debug!("Merging user config over defaults.");

    CensorConfig {
        dictionaries: union_lists(default_config.dictionaries, user.dictionaries),
        words: union_lists(default_config.words, user.words),
        whitelist: union_lists(default_config.whitelist, user.whitelist),
        replacement_marker: user.replacement_marker.or(default_config.replacement_marker),
        full_words: user.full_words.or(default_config.full_words),
        strip_ansi: user.strip_ansi.or(default_config.strip_ansi),
    }
}

fn union_lists(base: Vec<String>, extra: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    base.into_iter().chain(extra).filter(|item| seen.insert(item.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CensorConfig::default();
        assert_eq!(config.marker(), "*");
        assert!(!config.full_words());
        assert!(!config.strip_ansi());
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let config = CensorConfig {
            dictionaries: vec![" ".to_string()],
            replacement_marker: Some(String::new()),
            ..Default::default()
        };
        let message = config.validate().unwrap_err().to_string();
        assert!(message.contains("empty name"));
        assert!(message.contains("replacement_marker"));
    }

    #[test]
    fn test_selector_includes_words() {
        let config = CensorConfig {
            dictionaries: vec!["en".to_string()],
            words: vec!["blast".to_string()],
            ..Default::default()
        };
        assert_eq!(
            config.selector(),
            DictionarySelector::many([DictionarySelector::name("en"), DictionarySelector::words(["blast"])])
        );
    }
}
