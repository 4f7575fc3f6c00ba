// SPDX-FileCopyrightText: 2026 Phraselock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Unlocking existing state: cache lookups, prompting, and locked managers.

mod common;

use std::io::Write;
use std::sync::Arc;

use common::*;
use phraselock_core::{CryptoOperation, PhraselockError, SecretsManager};
use phraselock_passphrase::{PASSPHRASE_ENV_VAR, PASSPHRASE_FILE_ENV_VAR, TEST_INTERACTIVE_ENV_VAR};
use serial_test::serial;
use tokio_util::sync::CancellationToken;

fn persisted(state: &str) -> String {
    serde_json::json!({ "salt": state }).to_string()
}

#[test]
#[serial]
fn cached_state_resolves_without_asking() {
    clear_env();
    let state = state_for("p", b"saltsalt");
    let prompter = ScriptedPrompter::new(&[]);
    let provider = provider_with(prompter.clone());
    let constructed = provider.construct(&secret("p"), &state).unwrap();

    let resolved = provider.resolve_manager_for_state(&state).unwrap();

    assert!(Arc::ptr_eq(&constructed, &resolved));
    assert!(prompter.prompts().is_empty());
}

#[test]
#[serial]
fn env_passphrase_unlocks_state() {
    clear_env();
    set_env(PASSPHRASE_ENV_VAR, "correct-horse");
    let state = state_for("correct-horse", b"saltsalt");
    let provider = provider_with(ScriptedPrompter::new(&[]));

    let sm = provider.resolve_manager_for_state(&state);
    clear_env();

    assert!(!sm.unwrap().is_locked());
    assert_eq!(provider.cache().len(), 1);
}

#[test]
#[serial]
fn passphrase_file_unlocks_state() {
    clear_env();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "  correct-horse  ").unwrap();
    set_env(PASSPHRASE_FILE_ENV_VAR, file.path().to_str().unwrap());
    let state = state_for("correct-horse", b"saltsalt");
    let provider = provider_with(ScriptedPrompter::new(&[]));

    let sm = provider.resolve_manager_for_state(&state);
    clear_env();

    assert!(sm.is_ok());
}

#[test]
#[serial]
fn missing_passphrase_file_is_reported() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.txt");
    set_env(PASSPHRASE_FILE_ENV_VAR, missing.to_str().unwrap());
    let state = state_for("p", b"saltsalt");
    let provider = provider_with(ScriptedPrompter::new(&[]));

    let err = provider.resolve_manager_for_state(&state).unwrap_err();
    clear_env();

    assert!(matches!(err, PhraselockError::PassphraseFile { path, .. } if path == missing));
}

#[test]
#[serial]
fn wrong_env_passphrase_is_not_retried() {
    clear_env();
    set_env(PASSPHRASE_ENV_VAR, "wrong-horse");
    set_env(TEST_INTERACTIVE_ENV_VAR, "1");
    let state = state_for("correct-horse", b"saltsalt");
    let prompter = ScriptedPrompter::new(&["correct-horse"]);
    let provider = provider_with(prompter.clone());

    let err = provider.resolve_manager_for_state(&state).unwrap_err();
    clear_env();

    assert!(err.is_incorrect_passphrase());
    assert!(prompter.prompts().is_empty());
    assert!(provider.cache().is_empty());
}

#[test]
#[serial]
fn interactive_entry_retries_after_wrong_passphrase() {
    clear_env();
    set_env(TEST_INTERACTIVE_ENV_VAR, "TRUE");
    let state = state_for("correct-horse", b"saltsalt");
    let prompter = ScriptedPrompter::new(&["wrong-horse", "still-wrong", "correct-horse"]);
    let provider = provider_with(prompter.clone());

    let sm = provider.resolve_manager_for_state(&state);
    clear_env();

    assert!(!sm.unwrap().is_locked());
    assert_eq!(prompter.prompts().len(), 3);
    assert!(prompter.prompts()[0].contains(PASSPHRASE_ENV_VAR));
    assert_eq!(
        prompter.errors(),
        vec!["incorrect passphrase", "incorrect passphrase"]
    );
}

#[test]
#[serial]
fn no_passphrase_source_without_terminal() {
    clear_env();
    if stdin_is_terminal() {
        return;
    }
    let state = state_for("p", b"saltsalt");
    let provider = provider_with(ScriptedPrompter::new(&["p"]));

    assert!(matches!(
        provider.resolve_manager_for_state(&state),
        Err(PhraselockError::PassphraseRequired)
    ));
}

#[test]
#[serial]
fn cancellation_stops_the_retry_loop() {
    clear_env();
    set_env(TEST_INTERACTIVE_ENV_VAR, "1");
    let state = state_for("correct-horse", b"saltsalt");
    let token = CancellationToken::new();
    token.cancel();
    let prompter = ScriptedPrompter::new(&["correct-horse", "correct-horse"]);
    let provider = provider_with(prompter.clone()).with_cancellation(token);

    let resolved = provider.resolve_manager_for_state(&state);
    let created = provider.create_manager(false);
    clear_env();

    assert!(matches!(resolved, Err(PhraselockError::Cancelled)));
    assert!(matches!(created, Err(PhraselockError::Cancelled)));
    assert!(prompter.prompts().is_empty());
}

#[test]
#[serial]
fn persisted_state_with_correct_passphrase_is_unlocked() {
    clear_env();
    set_env(PASSPHRASE_ENV_VAR, "correct-horse");
    let state = state_for("correct-horse", b"saltsalt");
    let provider = provider_with(ScriptedPrompter::new(&[]));

    let sm = provider.manager_from_persisted_state(&persisted(&state));
    clear_env();

    let sm = sm.unwrap();
    assert!(!sm.is_locked());
    assert_eq!(sm.manager_type(), "passphrase");
    assert_eq!(sm.state(), serde_json::json!({ "salt": state }));
}

#[test]
#[serial]
fn persisted_state_with_wrong_passphrase_is_locked() {
    clear_env();
    set_env(PASSPHRASE_ENV_VAR, "wrong-horse");
    let state = state_for("correct-horse", b"saltsalt");
    let provider = provider_with(ScriptedPrompter::new(&[]));

    let sm = provider.manager_from_persisted_state(&persisted(&state));
    clear_env();

    let sm = sm.unwrap();
    assert!(sm.is_locked());
    assert_eq!(sm.state_str(), state);
    assert_eq!(sm.state(), serde_json::json!({ "salt": state }));
    assert!(provider.cache().is_empty());

    let err = sm.encrypt_value("x").unwrap_err();
    assert!(matches!(
        err,
        PhraselockError::LockedOperation { operation: CryptoOperation::Encrypt }
    ));
    assert!(err.to_string().starts_with("failed to encrypt: incorrect passphrase"));
    assert!(matches!(
        sm.decrypt_value("v1:AAAA:AAAA"),
        Err(PhraselockError::LockedOperation { operation: CryptoOperation::Decrypt })
    ));
    assert!(sm.encrypter().is_err());
    assert!(sm.decrypter().is_err());
}

#[test]
#[serial]
fn persisted_state_must_be_json() {
    clear_env();
    let provider = provider_with(ScriptedPrompter::new(&[]));

    assert!(matches!(
        provider.manager_from_persisted_state("not json"),
        Err(PhraselockError::StateDocument(_))
    ));
    assert!(matches!(
        provider.manager_from_persisted_state(r#"{"sault": "v1:a:b"}"#),
        Err(PhraselockError::StateDocument(_))
    ));
}

#[test]
#[serial]
fn persisted_state_surfaces_decode_errors() {
    clear_env();
    set_env(PASSPHRASE_ENV_VAR, "p");
    let provider = provider_with(ScriptedPrompter::new(&[]));

    let err = provider
        .manager_from_persisted_state(&persisted("v7:c2FsdHNhbHQ=:x"))
        .unwrap_err();
    clear_env();

    assert!(matches!(err, PhraselockError::UnsupportedVersion(_)));
}
