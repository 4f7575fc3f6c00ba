// SPDX-FileCopyrightText: 2026 Phraselock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations.
//!
//! Each command loads the secrets document, resolves a manager for its state
//! through the provider, and writes the document back only when every step
//! has succeeded.

use std::path::Path;
use std::sync::Arc;

use phraselock_core::{PhraselockError, SecretsManager};
use phraselock_passphrase::{PassphraseManager, PassphraseProvider};
use tracing::info;

use crate::store::{self, SecretsDocument};

/// Create passphrase state for a new document.
pub fn init(provider: &PassphraseProvider, path: &Path) -> Result<(), PhraselockError> {
    let mut doc = store::load(path)?;
    if doc.encryption_salt.is_some() {
        return Err(PhraselockError::Store {
            message: format!("{} is already initialized", path.display()),
            source: None,
        });
    }

    let (state, _) = provider.create_manager(false)?;
    doc.encryption_salt = Some(state);
    store::save(path, &doc)?;
    info!(path = %path.display(), "initialized secrets document");
    Ok(())
}

/// Encrypt `value` and store it under `key`, replacing any previous value.
pub fn set(
    provider: &PassphraseProvider,
    path: &Path,
    key: &str,
    value: &str,
) -> Result<(), PhraselockError> {
    let mut doc = store::load(path)?;
    let manager = unlock(provider, path, &doc)?;

    let ciphertext = manager.encrypt_value(value)?;
    doc.secrets.insert(key.to_string(), ciphertext);
    store::save(path, &doc)
}

/// Decrypt the value stored under `key`.
pub fn get(provider: &PassphraseProvider, path: &Path, key: &str) -> Result<String, PhraselockError> {
    let doc = store::load(path)?;
    let Some(ciphertext) = doc.secrets.get(key) else {
        return Err(PhraselockError::Store {
            message: format!("no secret named `{key}`"),
            source: None,
        });
    };

    unlock(provider, path, &doc)?.decrypt_value(ciphertext)
}

/// Secret names, sorted. Values are left sealed.
pub fn list(path: &Path) -> Result<Vec<String>, PhraselockError> {
    Ok(store::load(path)?.secrets.into_keys().collect())
}

/// Re-encrypt every secret under a new passphrase and salt.
///
/// Returns the number of secrets re-sealed.
pub fn rotate(provider: &PassphraseProvider, path: &Path) -> Result<usize, PhraselockError> {
    let mut doc = store::load(path)?;
    let current = unlock(provider, path, &doc)?;

    let ciphertexts: Vec<String> = doc.secrets.values().cloned().collect();
    let plaintexts = current.bulk_decrypt(&ciphertexts)?;

    let (state, next) = provider.create_manager(true)?;
    for ciphertext in doc.secrets.values_mut() {
        // Every ciphertext was decrypted above.
        let plaintext = plaintexts.get(ciphertext.as_str()).ok_or_else(|| {
            PhraselockError::Internal("secret missing from bulk decryption".to_string())
        })?;
        *ciphertext = next.encrypt_value(plaintext)?;
    }
    doc.encryption_salt = Some(state);

    store::save(path, &doc)?;
    info!(secrets = doc.secrets.len(), "rotated passphrase");
    Ok(doc.secrets.len())
}

/// Write the document to `dest` through its manager without decrypting.
///
/// Works with a wrong passphrase: the manager is then locked and its state
/// is carried over unchanged. `dest` must not exist yet.
pub fn copy(provider: &PassphraseProvider, path: &Path, dest: &Path) -> Result<(), PhraselockError> {
    let doc = store::load(path)?;
    let manager = unlock(provider, path, &doc)?;
    let state = manager.state();
    let copied = SecretsDocument {
        encryption_salt: state["salt"].as_str().map(str::to_string),
        secrets: doc.secrets,
    };

    store::create(dest, &copied)?;
    info!(locked = manager.is_locked(), dest = %dest.display(), "copied secrets document");
    Ok(())
}

fn unlock(
    provider: &PassphraseProvider,
    path: &Path,
    doc: &SecretsDocument,
) -> Result<Arc<PassphraseManager>, PhraselockError> {
    let Some(state) = &doc.encryption_salt else {
        return Err(PhraselockError::Store {
            message: format!(
                "{} has no passphrase state, run `phraselock init` first",
                path.display()
            ),
            source: None,
        });
    };

    let persisted = serde_json::json!({ "salt": state }).to_string();
    provider.manager_from_persisted_state(&persisted)
}
