// SPDX-FileCopyrightText: 2026 Phraselock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seal/open capabilities over opaque secret strings.

use std::collections::HashMap;

use crate::error::PhraselockError;

/// Seals plaintext secret values.
pub trait Encrypter: Send + Sync {
    /// Encrypts a single value, returning its ciphertext encoding.
    fn encrypt_value(&self, plaintext: &str) -> Result<String, PhraselockError>;
}

/// Opens ciphertexts produced by a matching [`Encrypter`].
pub trait Decrypter: Send + Sync {
    /// Decrypts a single value.
    ///
    /// Fails if the ciphertext was produced under a different key or was
    /// tampered with.
    fn decrypt_value(&self, ciphertext: &str) -> Result<String, PhraselockError>;

    /// Decrypts a batch of values, keyed by ciphertext.
    ///
    /// Fails as a whole on the first error; partial results are never returned.
    fn bulk_decrypt(&self, ciphertexts: &[String]) -> Result<HashMap<String, String>, PhraselockError> {
        let mut out = HashMap::with_capacity(ciphertexts.len());
        for ct in ciphertexts {
            if out.contains_key(ct) {
                continue;
            }
            let plaintext = self.decrypt_value(ct)?;
            out.insert(ct.clone(), plaintext);
        }
        Ok(out)
    }
}

/// Both halves of the capability, bound to one key.
pub trait Crypter: Encrypter + Decrypter {}

impl<T: Encrypter + Decrypter> Crypter for T {}
