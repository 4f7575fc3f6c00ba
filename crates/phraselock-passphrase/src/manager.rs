// SPDX-FileCopyrightText: 2026 Phraselock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The passphrase secrets manager and its locked fallback.

use std::collections::HashMap;

use phraselock_core::{CryptoOperation, Decrypter, Encrypter, PhraselockError, SecretsManager};
use serde::{Deserialize, Serialize};

use crate::crypter::SymmetricCrypter;

/// Provider type reported by [`SecretsManager::manager_type`].
pub const MANAGER_TYPE: &str = "passphrase";

/// Persisted form of the manager state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerState {
    /// The encoded state string (`v1:<salt>:<marker>`).
    pub salt: String,
}

/// A passphrase secrets manager.
///
/// `Unlocked` holds a verified crypter. `Locked` only carries the state so
/// documents referencing it can be re-serialized unchanged; every
/// cryptographic operation on it fails with `LockedOperation`.
#[derive(Debug)]
pub enum PassphraseManager {
    Unlocked {
        state: ManagerState,
        crypter: SymmetricCrypter,
    },
    Locked {
        state: ManagerState,
    },
}

impl PassphraseManager {
    pub(crate) fn unlocked(state: String, crypter: SymmetricCrypter) -> Self {
        Self::Unlocked {
            state: ManagerState { salt: state },
            crypter,
        }
    }

    pub(crate) fn locked(state: ManagerState) -> Self {
        Self::Locked { state }
    }

    /// The encoded state string this manager was built from.
    pub fn state_str(&self) -> &str {
        &self.manager_state().salt
    }

    pub fn manager_state(&self) -> &ManagerState {
        match self {
            Self::Unlocked { state, .. } | Self::Locked { state } => state,
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Locked { .. })
    }

    fn crypter(&self, operation: CryptoOperation) -> Result<&SymmetricCrypter, PhraselockError> {
        match self {
            Self::Unlocked { crypter, .. } => Ok(crypter),
            Self::Locked { .. } => Err(PhraselockError::LockedOperation { operation }),
        }
    }

    pub fn encrypt_value(&self, plaintext: &str) -> Result<String, PhraselockError> {
        self.crypter(CryptoOperation::Encrypt)?.encrypt_value(plaintext)
    }

    pub fn decrypt_value(&self, ciphertext: &str) -> Result<String, PhraselockError> {
        self.crypter(CryptoOperation::Decrypt)?.decrypt_value(ciphertext)
    }

    /// Decrypt a batch; a locked manager fails the whole batch with one error.
    pub fn bulk_decrypt(
        &self,
        ciphertexts: &[String],
    ) -> Result<HashMap<String, String>, PhraselockError> {
        self.crypter(CryptoOperation::Decrypt)?.bulk_decrypt(ciphertexts)
    }
}

impl SecretsManager for PassphraseManager {
    fn manager_type(&self) -> &'static str {
        MANAGER_TYPE
    }

    fn state(&self) -> serde_json::Value {
        serde_json::json!({ "salt": self.state_str() })
    }

    fn encrypter(&self) -> Result<&dyn Encrypter, PhraselockError> {
        let crypter: &dyn Encrypter = self.crypter(CryptoOperation::Encrypt)?;
        Ok(crypter)
    }

    fn decrypter(&self) -> Result<&dyn Decrypter, PhraselockError> {
        let crypter: &dyn Decrypter = self.crypter(CryptoOperation::Decrypt)?;
        Ok(crypter)
    }
}
