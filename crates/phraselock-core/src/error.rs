// SPDX-FileCopyrightText: 2026 Phraselock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for phraselock.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::CryptoOperation;

/// The primary error type used across all phraselock crates.
#[derive(Debug, Error)]
pub enum PhraselockError {
    /// Configuration errors (invalid TOML, out-of-range values).
    #[error("configuration error: {0}")]
    Config(String),

    /// The persisted state string does not have the `version:salt:marker` shape.
    #[error("malformed state value: {0}")]
    MalformedState(String),

    /// The persisted state carries a version tag this build does not understand.
    #[error("unknown state version `{0}`")]
    UnsupportedVersion(String),

    /// The verification marker did not decrypt under the supplied passphrase.
    #[error("incorrect passphrase")]
    IncorrectPassphrase,

    /// No passphrase source is available and the process is not interactive.
    #[error(
        "passphrase must be set with PHRASELOCK_CONFIG_PASSPHRASE or \
         PHRASELOCK_CONFIG_PASSPHRASE_FILE environment variables"
    )]
    PassphraseRequired,

    /// A cryptographic operation was attempted on a locked manager.
    #[error(
        "failed to {operation}: incorrect passphrase, please set PHRASELOCK_CONFIG_PASSPHRASE \
         to the correct passphrase or set PHRASELOCK_CONFIG_PASSPHRASE_FILE to a file \
         containing the passphrase"
    )]
    LockedOperation { operation: CryptoOperation },

    /// Rotation was requested without an interactive terminal.
    #[error("passphrase rotation requires an interactive terminal")]
    RotationRequiresTerminal,

    /// The file named by PHRASELOCK_CONFIG_PASSPHRASE_FILE could not be read.
    #[error("unable to read PHRASELOCK_CONFIG_PASSPHRASE_FILE ({}): {source}", path.display())]
    PassphraseFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Reading from the terminal failed.
    #[error("failed to read passphrase: {0}")]
    Prompt(#[source] std::io::Error),

    /// Seal/open failures, bad ciphertext encoding, or random source failure.
    #[error("crypto error: {0}")]
    Crypto(String),

    /// The outer persisted state document could not be (de)serialized.
    #[error("unmarshalling state: {0}")]
    StateDocument(#[from] serde_json::Error),

    /// Secrets document I/O or format errors.
    #[error("store error: {message}")]
    Store {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An interactive prompt loop was cancelled by the host.
    #[error("passphrase prompt cancelled")]
    Cancelled,

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PhraselockError {
    /// Returns true for the one failure the prompting and persisted-state
    /// workflows treat as recoverable.
    pub fn is_incorrect_passphrase(&self) -> bool {
        matches!(self, Self::IncorrectPassphrase)
    }
}
