// SPDX-FileCopyrightText: 2026 Phraselock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::PhraselockConfig;

/// Lowest accepted PBKDF2 iteration count.
pub const MIN_KDF_ITERATIONS: u32 = 100_000;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &PhraselockConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.logging.level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.kdf.iterations < MIN_KDF_ITERATIONS {
        errors.push(ConfigError::Validation {
            message: format!(
                "kdf.iterations must be at least {MIN_KDF_ITERATIONS}, got {}",
                config.kdf.iterations
            ),
        });
    }

    if config.store.path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "store.path must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = PhraselockConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn low_iteration_count_fails_validation() {
        let mut config = PhraselockConfig::default();
        config.kdf.iterations = 1000;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("kdf.iterations"))));
    }

    #[test]
    fn unknown_log_level_fails_validation() {
        let mut config = PhraselockConfig::default();
        config.logging.level = "chatty".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("logging.level"))));
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = PhraselockConfig::default();
        config.logging.level = "nope".to_string();
        config.kdf.iterations = 1;
        config.store.path = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn uppercase_log_level_is_accepted() {
        let mut config = PhraselockConfig::default();
        config.logging.level = "DEBUG".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
