// SPDX-FileCopyrightText: 2026 Phraselock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Passphrase acquisition: environment variables first, then a TTY prompt.

use std::io::IsTerminal;
use std::path::Path;

use phraselock_core::PhraselockError;
use secrecy::SecretString;
use tracing::debug;

/// Environment variable holding the literal passphrase.
pub const PASSPHRASE_ENV_VAR: &str = "PHRASELOCK_CONFIG_PASSPHRASE";

/// Environment variable holding a path to a file containing the passphrase.
pub const PASSPHRASE_FILE_ENV_VAR: &str = "PHRASELOCK_CONFIG_PASSPHRASE_FILE";

/// When truthy, forces interactive behavior so prompting can be driven by tests.
pub const TEST_INTERACTIVE_ENV_VAR: &str = "PHRASELOCK_TEST_PASSPHRASE";

/// Source of typed passphrases and sink for user-facing error lines.
///
/// The TTY implementation is [`TtyPrompter`]; hosts that are not terminals
/// (or that need to abort a pending prompt) provide their own.
pub trait Prompter: Send + Sync {
    /// Display `prompt` and read one passphrase with echo disabled.
    fn read_passphrase(&self, prompt: &str) -> Result<SecretString, PhraselockError>;

    /// Report a recoverable problem (mismatch, wrong passphrase) before re-prompting.
    fn report_error(&self, message: &str);
}

/// Reads from the controlling terminal via `rpassword`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TtyPrompter;

impl Prompter for TtyPrompter {
    fn read_passphrase(&self, prompt: &str) -> Result<SecretString, PhraselockError> {
        eprint!("{prompt}: ");
        let phrase = rpassword::read_password().map_err(PhraselockError::Prompt)?;
        Ok(SecretString::from(phrase))
    }

    fn report_error(&self, message: &str) {
        eprintln!("error: {message}");
    }
}

/// A passphrase together with how it was obtained.
pub struct ResolvedPassphrase {
    pub phrase: SecretString,
    /// True when typed at a prompt, so a mismatch can be retried.
    pub interactive: bool,
}

impl std::fmt::Debug for ResolvedPassphrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedPassphrase")
            .field("phrase", &"[REDACTED]")
            .field("interactive", &self.interactive)
            .finish()
    }
}

/// Obtain a passphrase.
///
/// With `use_env` the order is:
/// 1. `PHRASELOCK_CONFIG_PASSPHRASE`, if set and non-empty
/// 2. the trimmed contents of the file named by `PHRASELOCK_CONFIG_PASSPHRASE_FILE`
/// 3. an interactive prompt, if [`is_interactive`]
///
/// and fails with `PassphraseRequired` when none apply. Without `use_env` the
/// prompt is used unconditionally.
pub fn read_passphrase(
    prompter: &dyn Prompter,
    prompt: &str,
    use_env: bool,
) -> Result<ResolvedPassphrase, PhraselockError> {
    if use_env {
        if let Some(phrase) = non_empty_env(PASSPHRASE_ENV_VAR) {
            debug!("using passphrase from {PASSPHRASE_ENV_VAR}");
            return Ok(ResolvedPassphrase {
                phrase: SecretString::from(phrase),
                interactive: false,
            });
        }
        if let Some(path) = non_empty_env(PASSPHRASE_FILE_ENV_VAR) {
            debug!("using passphrase from {PASSPHRASE_FILE_ENV_VAR}");
            return Ok(ResolvedPassphrase {
                phrase: read_passphrase_file(Path::new(&path))?,
                interactive: false,
            });
        }
        if !is_interactive() {
            return Err(PhraselockError::PassphraseRequired);
        }
    }

    Ok(ResolvedPassphrase {
        phrase: prompter.read_passphrase(prompt)?,
        interactive: true,
    })
}

/// Read a passphrase file, trimming surrounding whitespace.
pub fn read_passphrase_file(path: &Path) -> Result<SecretString, PhraselockError> {
    let path = std::path::absolute(path).map_err(|source| PhraselockError::PassphraseFile {
        path: path.to_path_buf(),
        source,
    })?;
    let contents = std::fs::read_to_string(&path)
        .map_err(|source| PhraselockError::PassphraseFile { path, source })?;
    Ok(SecretString::from(contents.trim().to_string()))
}

/// True if stdin is a terminal, or the test override variable is truthy.
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal()
        || std::env::var(TEST_INTERACTIVE_ENV_VAR).is_ok_and(|v| is_truthy(&v))
}

/// `1` or any casing of `true`.
fn is_truthy(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
