// SPDX-FileCopyrightText: 2026 Phraselock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for phraselock.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level phraselock configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PhraselockConfig {
    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Passphrase key-derivation settings.
    #[serde(default)]
    pub kdf: KdfConfig,

    /// Secrets document settings.
    #[serde(default)]
    pub store: StoreConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Key-derivation configuration.
///
/// The v1 state format does not record the iteration count, so this must stay
/// equal to the value in effect when the state was created.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KdfConfig {
    /// PBKDF2-HMAC-SHA256 iteration count (default: 1,000,000).
    #[serde(default = "default_kdf_iterations")]
    pub iterations: u32,
}

impl Default for KdfConfig {
    fn default() -> Self {
        Self {
            iterations: default_kdf_iterations(),
        }
    }
}

fn default_kdf_iterations() -> u32 {
    1_000_000
}

/// Secrets document configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Path to the JSON document holding the encryption state and sealed values.
    #[serde(default = "default_store_path")]
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

fn default_store_path() -> String {
    "phraselock.json".to_string()
}
