//! errors.rs - Custom error types for the banword-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `banword-core` library.
///
/// The censoring path itself is fail-soft; these variants only surface from
/// configuration loading, dictionary parsing and pattern compilation.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BanwordError {
    #[error("Failed to compile pattern for word '{0}': {1}")]
    PatternCompilationError(String, regex::Error),

    #[error("Dictionary '{0}' is not a JSON array of strings: {1}")]
    InvalidDictionary(String, serde_json::Error),

    #[error("Invalid censor configuration: {0}")]
    InvalidConfig(String),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}
