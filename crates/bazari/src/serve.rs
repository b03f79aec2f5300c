// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `bazari serve` command implementation.
//!
//! Wires the SQLite repository, the Telegram gateway (which doubles as the
//! Stars billing provider), and the configured roles into the engine, then
//! runs the event loop until Ctrl-C.

use std::sync::Arc;

use bazari_config::BazariConfig;
use bazari_core::error::BazariError;
use bazari_engine::{ConfigRoles, Engine};
use bazari_storage::{Database, SqliteRepository};
use bazari_telegram::TelegramGateway;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Runs the `bazari serve` command.
pub async fn run_serve(config: BazariConfig) -> Result<(), BazariError> {
    init_tracing(&config.bot.log_level);
    info!("starting bazari serve");

    let db = Database::open(&config.storage.database_path).await?;
    let repo = Arc::new(SqliteRepository::new(db));
    info!(path = %config.storage.database_path, "database ready");

    let gateway = Arc::new(TelegramGateway::new(&config.bot)?);
    gateway.connect().await;

    let roles = Arc::new(ConfigRoles::new(&config.admins));
    let engine = Engine::new(
        &config,
        repo,
        gateway.clone(),
        gateway.clone(),
        roles,
    );

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("shutdown signal received");
                signal_token.cancel();
            }
            Err(e) => error!(error = %e, "failed to listen for shutdown signal"),
        }
    });

    engine.run(shutdown).await;
    info!("bazari stopped");
    Ok(())
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("bazari={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
