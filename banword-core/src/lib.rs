// banword-core/src/lib.rs
//! # Banword Core Library
//!
//! `banword-core` detects obfuscated profanity in free-form text and masks it.
//! Words come from named dictionaries; each word is compiled into a
//! case-insensitive pattern that also accepts common leetspeak renderings
//! (`b4d`, `b@d`, `bäd`). A whitelist protects terms that must never be masked.
//!
//! ## Modules
//!
//! * `dictionary`: `DictionaryStore` registry and the deduplicated `BadWordSet`.
//! * `whitelist`: reversible placeholder protection of whitelisted terms.
//! * `patterns`: the leetspeak table and the pattern compiler.
//! * `engine`: the `CensorEngine` that runs the full pass.
//! * `sanitizer`: the `Sanitizer` trait and the default HTML stripper.
//! * `mask`: replacement-text generation.
//! * `censor_match`: `CensorResult` and text-safe debug logging.
//! * `config`: YAML configuration.
//! * `headless`: one-shot convenience wrapper.
//!
//! ## Usage Example
//!
//! ```rust
//! use banword_core::{CensorEngine, DictionarySelector, DictionaryStore};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let mut store = DictionaryStore::new();
//!     store.register("en-base", ["badword"]);
//!
//!     let mut engine = CensorEngine::new(store);
//!     engine.configure(&DictionarySelector::name("en-base"));
//!
//!     let result = engine.censor("this is a badword here", false)?;
//!     assert_eq!(result.clean, "this is a ******* here");
//!     assert_eq!(result.matches[&0], "badword");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Censoring is fail-soft: unknown dictionary names and empty whitelist entries
//! are skipped. Configuration, dictionary parsing and pattern compilation
//! failures are reported as `anyhow::Error`, with [`BanwordError`] as the
//! underlying typed error.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod censor_match;
pub mod config;
pub mod dictionary;
pub mod engine;
pub mod errors;
pub mod headless;
pub mod mask;
pub mod patterns;
pub mod sanitizer;
pub mod whitelist;

pub use censor_match::{redact_sensitive, CensorResult};
pub use config::{merge_configs, CensorConfig};
pub use dictionary::{BadWordSet, DictionarySelector, DictionaryStore};
pub use engine::CensorEngine;
pub use errors::BanwordError;
pub use headless::headless_censor_string;
pub use mask::{build_mask, MaskShuffler, NoShuffle, RandomShuffler, DEFAULT_MARKER};
pub use patterns::compiler::{
    compile_all, compile_all_with_limit, compile_word, compile_word_with_limit, CompiledPattern, CompiledPatterns,
};
pub use patterns::leet::LEET_TABLE;
pub use sanitizer::{HtmlSanitizer, PassThroughSanitizer, Sanitizer};
pub use whitelist::{WhitelistEntry, WhitelistProtector};
