// SPDX-FileCopyrightText: 2026 Phraselock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability traits exposed by secrets managers.
//!
//! A manager hands out an [`Encrypter`] and a [`Decrypter`]; callers never see
//! the key material behind them.

pub mod crypter;
pub mod manager;

pub use crypter::{Crypter, Decrypter, Encrypter};
pub use manager::SecretsManager;
