// SPDX-FileCopyrightText: 2026 Phraselock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./phraselock.toml` > `~/.config/phraselock/phraselock.toml`
//! > `/etc/phraselock/phraselock.toml` with environment variable overrides via
//! the `PHRASELOCK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::PhraselockConfig;

/// Config file name searched in every layer.
pub const CONFIG_FILE_NAME: &str = "phraselock.toml";

/// Environment sections that map onto config keys. Anything else under the
/// `PHRASELOCK_` prefix (the passphrase variables in particular) is ignored.
const ENV_SECTIONS: &[&str] = &["logging", "kdf", "store"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/phraselock/phraselock.toml` (system-wide)
/// 3. `~/.config/phraselock/phraselock.toml` (user XDG config)
/// 4. `./phraselock.toml` (local directory)
/// 5. `PHRASELOCK_*` environment variables
pub fn load_config() -> Result<PhraselockConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<PhraselockConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PhraselockConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PhraselockConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PhraselockConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    config_paths()
        .into_iter()
        .fold(
            Figment::new().merge(Serialized::defaults(PhraselockConfig::default())),
            |figment, path| figment.merge(Toml::file(path)),
        )
        .merge(env_provider())
}

/// Config file locations, lowest precedence first.
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("/etc/phraselock").join(CONFIG_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("phraselock").join(CONFIG_FILE_NAME));
    }
    paths.push(PathBuf::from(CONFIG_FILE_NAME));
    paths
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so that
/// `PHRASELOCK_STORE_PATH` maps to `store.path` and multi-word keys survive.
fn env_provider() -> Env {
    Env::prefixed("PHRASELOCK_")
        .filter(|key| {
            let key = key.as_str().to_ascii_lowercase();
            ENV_SECTIONS
                .iter()
                .any(|section| key.starts_with(&format!("{section}_")))
        })
        .map(|key| {
            let key = key.as_str().to_ascii_lowercase();
            let mapped = ENV_SECTIONS.iter().fold(key, |acc, section| {
                acc.replacen(&format!("{section}_"), &format!("{section}."), 1)
            });
            mapped.into()
        })
}
