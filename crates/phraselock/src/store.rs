// SPDX-FileCopyrightText: 2026 Phraselock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! On-disk secrets document.
//!
//! The document is plain JSON: the encoded passphrase state plus a map of
//! secret names to ciphertexts. Nothing in it is readable without the
//! passphrase except the names.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use phraselock_core::PhraselockError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretsDocument {
    /// Encoded passphrase state. `None` until `init` has run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_salt: Option<String>,

    /// Secret name to ciphertext.
    #[serde(default)]
    pub secrets: BTreeMap<String, String>,
}

/// Load the document at `path`. A missing file is an empty document.
pub fn load(path: &Path) -> Result<SecretsDocument, PhraselockError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(SecretsDocument::default());
        }
        Err(e) => {
            return Err(store_error(format!("reading {}", path.display()), e));
        }
    };

    serde_json::from_str(&raw).map_err(|e| store_error(format!("parsing {}", path.display()), e))
}

/// Write `doc` to `path`, replacing the previous file only once the new
/// contents are fully written.
pub fn save(path: &Path, doc: &SecretsDocument) -> Result<(), PhraselockError> {
    let json = to_json(doc)?;

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json).map_err(|e| store_error(format!("writing {}", tmp.display()), e))?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(store_error(format!("replacing {}", path.display()), e));
    }
    Ok(())
}

/// Write `doc` to a new file at `path`. Fails if anything already exists there.
pub fn create(path: &Path, doc: &SecretsDocument) -> Result<(), PhraselockError> {
    let json = to_json(doc)?;

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| {
            let message = if e.kind() == std::io::ErrorKind::AlreadyExists {
                format!("{} already exists", path.display())
            } else {
                format!("creating {}", path.display())
            };
            store_error(message, e)
        })?;
    file.write_all(json.as_bytes())
        .map_err(|e| store_error(format!("writing {}", path.display()), e))
}

fn to_json(doc: &SecretsDocument) -> Result<String, PhraselockError> {
    let mut json = serde_json::to_string_pretty(doc)
        .map_err(|e| store_error("serializing secrets document", e))?;
    json.push('\n');
    Ok(json)
}

pub fn store_error(
    message: impl Into<String>,
    source: impl std::error::Error + Send + Sync + 'static,
) -> PhraselockError {
    PhraselockError::Store {
        message: message.into(),
        source: Some(Box::new(source)),
    }
}
