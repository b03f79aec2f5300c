// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Bazari marketplace bot.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a single-writer
//! concurrency model via `tokio-rusqlite`, and typed CRUD operations for
//! users, ads, support requests, and the rate-limit action log.

pub mod database;
pub mod migrations;
pub mod queries;
pub mod repository;

pub use database::Database;
pub use repository::SqliteRepository;
