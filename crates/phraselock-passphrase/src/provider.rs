// SPDX-FileCopyrightText: 2026 Phraselock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Manager lifecycle: validating a passphrase against state, unlocking
//! persisted state, and creating or rotating state.

use std::sync::Arc;

use phraselock_config::KdfConfig;
use phraselock_core::{Decrypter, Encrypter, PhraselockError};
use secrecy::{ExposeSecret, SecretString};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::cache::ManagerCache;
use crate::crypter::SymmetricCrypter;
use crate::kdf;
use crate::manager::{ManagerState, PassphraseManager};
use crate::prompt::{self, Prompter, TtyPrompter};
use crate::state::{self, VERIFICATION_MARKER};

const UNLOCK_PROMPT: &str = "Enter your passphrase to unlock config/secrets\n    \
     (set PHRASELOCK_CONFIG_PASSPHRASE or PHRASELOCK_CONFIG_PASSPHRASE_FILE to remember)";

/// Builds passphrase managers, sharing one [`ManagerCache`].
///
/// Interactive loops check the cancellation token before every prompt.
pub struct PassphraseProvider {
    cache: Arc<ManagerCache>,
    kdf: KdfConfig,
    prompter: Arc<dyn Prompter>,
    cancel: CancellationToken,
}

impl std::fmt::Debug for PassphraseProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PassphraseProvider")
            .field("cached_managers", &self.cache.len())
            .field("kdf", &self.kdf)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}

impl PassphraseProvider {
    /// Create a provider that prompts on the terminal.
    pub fn new(cache: Arc<ManagerCache>, kdf: KdfConfig) -> Self {
        Self {
            cache,
            kdf,
            prompter: Arc::new(TtyPrompter),
            cancel: CancellationToken::new(),
        }
    }

    /// Replace the prompt source.
    pub fn with_prompter(mut self, prompter: Arc<dyn Prompter>) -> Self {
        self.prompter = prompter;
        self
    }

    /// Use `token` to abort interactive retry loops.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn cache(&self) -> &Arc<ManagerCache> {
        &self.cache
    }

    /// Validate `passphrase` against `state` and return the manager for it.
    ///
    /// The passphrase is verified by opening the marker sealed into the state.
    /// Only a successful verification touches the cache; if a manager for this
    /// state is already cached that instance is returned.
    pub fn construct(
        &self,
        passphrase: &SecretString,
        state: &str,
    ) -> Result<Arc<PassphraseManager>, PhraselockError> {
        let decoded = state::decode(state)?;
        let crypter = SymmetricCrypter::from_passphrase(passphrase, &decoded.salt, &self.kdf)?;

        let verified = crypter
            .decrypt_value(decoded.marker_ciphertext)
            .is_ok_and(|marker| state::is_verification_marker(&marker));
        if !verified {
            return Err(PhraselockError::IncorrectPassphrase);
        }

        let manager = Arc::new(PassphraseManager::unlocked(state.to_string(), crypter));
        Ok(self.cache.get_or_insert(state, manager))
    }

    /// Return the manager for `state`, obtaining a passphrase if it is not cached.
    ///
    /// A wrong passphrase typed at the prompt is reported and asked for again.
    /// A wrong passphrase from the environment fails with `IncorrectPassphrase`.
    pub fn resolve_manager_for_state(
        &self,
        state: &str,
    ) -> Result<Arc<PassphraseManager>, PhraselockError> {
        if let Some(manager) = self.cache.get(state) {
            return Ok(manager);
        }

        loop {
            self.check_cancelled()?;
            let resolved = prompt::read_passphrase(self.prompter.as_ref(), UNLOCK_PROMPT, true)?;

            match self.construct(&resolved.phrase, state) {
                Err(e) if e.is_incorrect_passphrase() && resolved.interactive => {
                    debug!("incorrect passphrase entered, prompting again");
                    self.prompter.report_error("incorrect passphrase");
                }
                result => return result,
            }
        }
    }

    /// Build a manager from a persisted `{"salt": "<state>"}` document.
    ///
    /// If the available passphrase does not match, a locked manager carrying
    /// the same state is returned instead of an error, so documents can still
    /// be round-tripped without the passphrase.
    pub fn manager_from_persisted_state(
        &self,
        raw_state: &str,
    ) -> Result<Arc<PassphraseManager>, PhraselockError> {
        let persisted: ManagerState = serde_json::from_str(raw_state)?;

        match self.resolve_manager_for_state(&persisted.salt) {
            Err(e) if e.is_incorrect_passphrase() => {
                warn!("passphrase does not match persisted state; secrets are locked");
                Ok(Arc::new(PassphraseManager::locked(persisted)))
            }
            result => result,
        }
    }

    /// Ask for a new passphrase (twice) and create fresh state for it.
    ///
    /// When `rotating`, the environment is ignored and an interactive
    /// terminal is required. A new random salt is generated every time.
    pub fn create_manager(
        &self,
        rotating: bool,
    ) -> Result<(String, Arc<PassphraseManager>), PhraselockError> {
        if rotating && !prompt::is_interactive() {
            return Err(PhraselockError::RotationRequiresTerminal);
        }

        let (first_prompt, confirm_prompt) = if rotating {
            (
                "Enter your new passphrase to protect config/secrets",
                "Re-enter your new passphrase to confirm",
            )
        } else {
            (
                "Enter your passphrase to protect config/secrets",
                "Re-enter your passphrase to confirm",
            )
        };

        let use_env = !rotating;
        let phrase = loop {
            self.check_cancelled()?;
            let first = prompt::read_passphrase(self.prompter.as_ref(), first_prompt, use_env)?;
            self.check_cancelled()?;
            let second = prompt::read_passphrase(self.prompter.as_ref(), confirm_prompt, use_env)?;

            if first.phrase.expose_secret() == second.phrase.expose_secret() {
                break first.phrase;
            }
            self.prompter.report_error("passphrases do not match");
        };

        let salt = kdf::generate_salt()?;
        let crypter = SymmetricCrypter::from_passphrase(&phrase, &salt, &self.kdf)?;
        let marker = crypter.encrypt_value(VERIFICATION_MARKER)?;
        let state = state::encode(&salt, &marker);

        let manager = self.construct(&phrase, &state)?;
        info!(rotating, "created passphrase state");
        Ok((state, manager))
    }

    fn check_cancelled(&self) -> Result<(), PhraselockError> {
        if self.cancel.is_cancelled() {
            Err(PhraselockError::Cancelled)
        } else {
            Ok(())
        }
    }
}
