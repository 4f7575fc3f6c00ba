// SPDX-FileCopyrightText: 2026 Phraselock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Passphrase-derived symmetric crypter.
//!
//! Ciphertexts are encoded as `v1:<base64 nonce>:<base64 ciphertext||tag>`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use phraselock_config::KdfConfig;
use phraselock_core::{Decrypter, Encrypter, PhraselockError};
use ring::aead::NONCE_LEN;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use zeroize::Zeroizing;

use crate::crypto::{self, KEY_LEN};
use crate::kdf;

const CIPHERTEXT_VERSION: &str = "v1";

/// AES-256-GCM crypter bound to a key derived from a passphrase and salt.
///
/// Debug output intentionally omits the key.
pub struct SymmetricCrypter {
    key: Zeroizing<[u8; KEY_LEN]>,
}

impl std::fmt::Debug for SymmetricCrypter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymmetricCrypter")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl SymmetricCrypter {
    /// Derive a crypter from `passphrase` and `salt`.
    ///
    /// Pure function of its inputs: the same passphrase, salt, and iteration
    /// count always yield a compatible crypter.
    pub fn from_passphrase(
        passphrase: &SecretString,
        salt: &[u8],
        kdf_config: &KdfConfig,
    ) -> Result<Self, PhraselockError> {
        debug!(iterations = kdf_config.iterations, "deriving passphrase key");
        let key = kdf::derive_key(
            passphrase.expose_secret().as_bytes(),
            salt,
            kdf_config.iterations,
        )?;
        Ok(Self { key })
    }
}

impl Encrypter for SymmetricCrypter {
    fn encrypt_value(&self, plaintext: &str) -> Result<String, PhraselockError> {
        let (ciphertext, nonce) = crypto::seal(&self.key, plaintext.as_bytes())?;
        Ok(format!(
            "{CIPHERTEXT_VERSION}:{}:{}",
            STANDARD.encode(nonce),
            STANDARD.encode(ciphertext)
        ))
    }
}

impl Decrypter for SymmetricCrypter {
    fn decrypt_value(&self, ciphertext: &str) -> Result<String, PhraselockError> {
        let mut parts = ciphertext.splitn(3, ':');
        let (Some(version), Some(nonce), Some(body)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(PhraselockError::Crypto("bad value: expected three parts".to_string()));
        };
        if version != CIPHERTEXT_VERSION {
            return Err(PhraselockError::Crypto(format!(
                "unknown ciphertext version `{version}`"
            )));
        }

        let nonce: [u8; NONCE_LEN] = STANDARD
            .decode(nonce)
            .map_err(|e| PhraselockError::Crypto(format!("bad nonce encoding: {e}")))?
            .try_into()
            .map_err(|_| PhraselockError::Crypto("bad nonce length".to_string()))?;
        let body = STANDARD
            .decode(body)
            .map_err(|e| PhraselockError::Crypto(format!("bad ciphertext encoding: {e}")))?;

        let plaintext = crypto::open(&self.key, &nonce, &body)?;
        String::from_utf8(plaintext)
            .map_err(|e| PhraselockError::Crypto(format!("decrypted value is not valid UTF-8: {e}")))
    }
}
