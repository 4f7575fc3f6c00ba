// SPDX-FileCopyrightText: 2026 Phraselock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared helpers for passphrase integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use phraselock_config::KdfConfig;
use phraselock_core::{Encrypter, PhraselockError};
use phraselock_passphrase::{
    state, ManagerCache, PassphraseProvider, Prompter, SymmetricCrypter, PASSPHRASE_ENV_VAR,
    PASSPHRASE_FILE_ENV_VAR, TEST_INTERACTIVE_ENV_VAR,
};
use secrecy::SecretString;

/// Low iteration count so tests stay fast.
pub fn test_kdf() -> KdfConfig {
    KdfConfig { iterations: 1000 }
}

/// Replays scripted answers and records what was asked and reported.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<String>>,
    pub prompts: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(answers.iter().map(|a| a.to_string()).collect()),
            ..Default::default()
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn read_passphrase(&self, prompt: &str) -> Result<SecretString, PhraselockError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .map(SecretString::from)
            .ok_or_else(|| PhraselockError::Internal("prompter ran out of answers".to_string()))
    }

    fn report_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

pub fn provider_with(prompter: Arc<ScriptedPrompter>) -> PassphraseProvider {
    PassphraseProvider::new(Arc::new(ManagerCache::new()), test_kdf()).with_prompter(prompter)
}

pub fn secret(phrase: &str) -> SecretString {
    SecretString::from(phrase.to_string())
}

/// Build a state string for `phrase` and `salt` without going through a provider.
pub fn state_for(phrase: &str, salt: &[u8]) -> String {
    let crypter = SymmetricCrypter::from_passphrase(&secret(phrase), salt, &test_kdf()).unwrap();
    let marker = crypter.encrypt_value(state::VERIFICATION_MARKER).unwrap();
    state::encode(salt, &marker)
}

pub fn clear_env() {
    // SAFETY: test-only env mutation. Tests using env vars run under #[serial].
    unsafe {
        std::env::remove_var(PASSPHRASE_ENV_VAR);
        std::env::remove_var(PASSPHRASE_FILE_ENV_VAR);
        std::env::remove_var(TEST_INTERACTIVE_ENV_VAR);
    }
}

pub fn set_env(name: &str, value: &str) {
    // SAFETY: see clear_env.
    unsafe { std::env::set_var(name, value) };
}

/// True when the test process has a real terminal on stdin.
pub fn stdin_is_terminal() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stdin())
}
