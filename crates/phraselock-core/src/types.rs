// SPDX-FileCopyrightText: 2026 Phraselock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across phraselock crates.

use strum::Display;

/// The kind of cryptographic operation, used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum CryptoOperation {
    Encrypt,
    Decrypt,
}
