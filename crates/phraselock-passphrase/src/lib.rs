// SPDX-FileCopyrightText: 2026 Phraselock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Passphrase-based secrets manager.
//!
//! A key is derived from an operator passphrase with PBKDF2 and used for
//! AES-256-GCM. Only a small state string is persisted: the salt plus a
//! marker sealed under the key, which lets a later passphrase be verified
//! without ever storing it.

pub mod cache;
pub mod crypter;
pub mod crypto;
pub mod kdf;
pub mod manager;
pub mod prompt;
pub mod provider;
pub mod state;

pub use cache::ManagerCache;
pub use crypter::SymmetricCrypter;
pub use manager::{ManagerState, PassphraseManager, MANAGER_TYPE};
pub use prompt::{
    Prompter, ResolvedPassphrase, TtyPrompter, PASSPHRASE_ENV_VAR, PASSPHRASE_FILE_ENV_VAR,
    TEST_INTERACTIVE_ENV_VAR,
};
pub use provider::PassphraseProvider;
