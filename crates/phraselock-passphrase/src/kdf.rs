// SPDX-FileCopyrightText: 2026 Phraselock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! PBKDF2-HMAC-SHA256 key derivation from a passphrase.

use std::num::NonZeroU32;

use phraselock_core::PhraselockError;
use ring::pbkdf2;
use zeroize::Zeroizing;

use crate::crypto::{self, KEY_LEN};

/// Length of a freshly generated salt in bytes.
pub const SALT_LEN: usize = 8;

/// Derive a 32-byte key from `passphrase` and `salt`.
///
/// Deliberately slow: cost scales linearly with `iterations`. The returned key
/// is wrapped in [`Zeroizing`] for automatic memory zeroing on drop.
pub fn derive_key(
    passphrase: &[u8],
    salt: &[u8],
    iterations: u32,
) -> Result<Zeroizing<[u8; KEY_LEN]>, PhraselockError> {
    let iterations = NonZeroU32::new(iterations)
        .ok_or_else(|| PhraselockError::Config("kdf iterations must be non-zero".to_string()))?;

    let mut output = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2::derive(
        pbkdf2::PBKDF2_HMAC_SHA256,
        iterations,
        salt,
        passphrase,
        output.as_mut(),
    );
    Ok(output)
}

/// Generate a random salt from the system CSPRNG.
pub fn generate_salt() -> Result<[u8; SALT_LEN], PhraselockError> {
    crypto::random_bytes()
}
