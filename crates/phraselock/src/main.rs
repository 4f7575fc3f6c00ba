// SPDX-FileCopyrightText: 2026 Phraselock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Phraselock - passphrase-protected secrets documents.
//!
//! This is the binary entry point.

mod commands;
mod store;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use colored::Colorize;
use phraselock_passphrase::{ManagerCache, PassphraseProvider};

/// Phraselock - passphrase-protected secrets documents.
#[derive(Parser, Debug)]
#[command(name = "phraselock", version, about, long_about = None)]
struct Cli {
    /// Secrets document to operate on (overrides `[store] path`).
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Create passphrase state for a new secrets document.
    Init,
    /// Encrypt and store a secret.
    Set { key: String, value: String },
    /// Decrypt and print a secret.
    Get { key: String },
    /// List secret names.
    List,
    /// Re-encrypt every secret under a new passphrase.
    Rotate,
    /// Copy the document without decrypting it.
    Copy { dest: PathBuf },
}

fn main() {
    let cli = Cli::parse();

    let config = match phraselock_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            phraselock_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.level);

    let path = cli.store.unwrap_or_else(|| PathBuf::from(&config.store.path));
    let provider = PassphraseProvider::new(Arc::new(ManagerCache::new()), config.kdf);

    let result = match cli.command {
        Commands::Init => commands::init(&provider, &path),
        Commands::Set { key, value } => commands::set(&provider, &path, &key, &value),
        Commands::Get { key } => {
            commands::get(&provider, &path, &key).map(|value| println!("{value}"))
        }
        Commands::List => commands::list(&path).map(|keys| {
            for key in keys {
                println!("{key}");
            }
        }),
        Commands::Rotate => commands::rotate(&provider, &path)
            .map(|count| eprintln!("{} re-encrypted {count} secret(s)", "rotated:".green())),
        Commands::Copy { dest } => commands::copy(&provider, &path, &dest),
    };

    if let Err(e) = result {
        eprintln!("{} {e}", "error:".red().bold());
        let mut cause = std::error::Error::source(&e);
        while let Some(inner) = cause {
            eprintln!("  caused by: {inner}");
            cause = inner.source();
        }
        std::process::exit(1);
    }
}

/// Log to stderr so decrypted values on stdout stay clean.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("phraselock={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
