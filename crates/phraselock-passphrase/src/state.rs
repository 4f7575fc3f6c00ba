// SPDX-FileCopyrightText: 2026 Phraselock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Encoding and decoding of the persisted encryption state.
//!
//! The state string is `v1:<base64 salt>:<marker ciphertext>`. The marker
//! ciphertext is itself colon-separated, so decoding splits on the first two
//! separators only.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use phraselock_core::PhraselockError;

/// The only state version this build understands.
pub const STATE_VERSION: &str = "v1";

/// Plaintext sealed into every state to verify a candidate passphrase.
pub const VERIFICATION_MARKER: &str = "phraselock";

const SEPARATOR: char = ':';

/// A decoded state string, borrowing the marker ciphertext from its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedState<'a> {
    pub salt: Vec<u8>,
    pub marker_ciphertext: &'a str,
}

/// Split and validate a state string.
///
/// Errors describe the shape of the input, never its content.
pub fn decode(state: &str) -> Result<DecodedState<'_>, PhraselockError> {
    let mut parts = state.splitn(3, SEPARATOR);
    let (Some(version), Some(salt), Some(marker_ciphertext)) =
        (parts.next(), parts.next(), parts.next())
    else {
        return Err(PhraselockError::MalformedState(format!(
            "expected 3 `{SEPARATOR}`-separated parts, found {}",
            state.split(SEPARATOR).count()
        )));
    };

    if version != STATE_VERSION {
        return Err(PhraselockError::UnsupportedVersion(version.to_string()));
    }

    let salt = STANDARD.decode(salt).map_err(|e| {
        PhraselockError::MalformedState(format!("salt is not valid base64: {e}"))
    })?;

    Ok(DecodedState {
        salt,
        marker_ciphertext,
    })
}

/// Build a state string tagged with the current version.
pub fn encode(salt: &[u8], marker_ciphertext: &str) -> String {
    format!(
        "{STATE_VERSION}{SEPARATOR}{}{SEPARATOR}{marker_ciphertext}",
        STANDARD.encode(salt)
    )
}

/// Constant-time comparison of a decrypted marker against [`VERIFICATION_MARKER`].
pub fn is_verification_marker(candidate: &str) -> bool {
    let expected = VERIFICATION_MARKER.as_bytes();
    let candidate = candidate.as_bytes();
    if candidate.len() != expected.len() {
        return false;
    }
    candidate
        .iter()
        .zip(expected)
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}
