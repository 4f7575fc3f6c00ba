// SPDX-FileCopyrightText: 2026 Phraselock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for phraselock.
//!
//! This crate provides the error taxonomy and the capability traits shared by
//! every secrets manager implementation in the workspace.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::PhraselockError;
pub use traits::{Crypter, Decrypter, Encrypter, SecretsManager};
pub use types::CryptoOperation;
