// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bazari - Telegram marketplace bot for paid gift and channel listings.
//!
//! This is the binary entry point for the bot.

mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Bazari - Telegram marketplace bot.
#[derive(Parser, Debug)]
#[command(name = "bazari", version, about, long_about = None)]
struct Cli {
    /// Explicit configuration file, bypassing the XDG hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the bot.
    Serve,
    /// Load and validate the configuration, then exit.
    Check,
}

fn load_config(path: Option<&PathBuf>) -> bazari_config::BazariConfig {
    let result = match path {
        Some(path) => bazari_config::load_and_validate_path(path),
        None => bazari_config::load_and_validate(),
    };
    match result {
        Ok(config) => config,
        Err(errors) => {
            for error in &errors {
                eprintln!("bazari: {error}");
            }
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref());

    match cli.command {
        Some(Commands::Serve) | None => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("bazari: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Check) => {
            println!(
                "bazari: config ok (channel={}, database={})",
                config.channel.id, config.storage.database_path
            );
        }
    }
}
