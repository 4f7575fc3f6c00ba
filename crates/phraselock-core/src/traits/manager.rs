// SPDX-FileCopyrightText: 2026 Phraselock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The secrets manager surface consumed by the rest of a host system.

use crate::error::PhraselockError;
use crate::traits::crypter::{Decrypter, Encrypter};

/// A secrets manager pairs persisted, non-secret state with the capability to
/// seal and open values.
pub trait SecretsManager: Send + Sync + std::fmt::Debug {
    /// Short identifier of the provider kind, e.g. `"passphrase"`.
    fn manager_type(&self) -> &'static str;

    /// Serializable state that must be persisted alongside encrypted data.
    fn state(&self) -> serde_json::Value;

    /// Returns the sealing capability, or an error if the manager cannot encrypt.
    fn encrypter(&self) -> Result<&dyn Encrypter, PhraselockError>;

    /// Returns the opening capability, or an error if the manager cannot decrypt.
    fn decrypter(&self) -> Result<&dyn Decrypter, PhraselockError>;
}
