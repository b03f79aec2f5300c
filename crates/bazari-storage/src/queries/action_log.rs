// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Action-log queries backing the rate limiter.
//!
//! Rows are append-only; timestamps are unix seconds so window arithmetic is
//! plain integer comparison.

use bazari_core::BazariError;
use bazari_core::types::{ActionKind, UserId};
use rusqlite::params;

use crate::database::Database;

/// Append one action-log entry at `at` (unix seconds).
pub async fn record_action(
    db: &Database,
    user: UserId,
    kind: ActionKind,
    at: i64,
) -> Result<(), BazariError> {
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO action_log (user_id, action, created_at) VALUES (?1, ?2, ?3)",
                params![user.0, kind.to_string(), at],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Number of entries for (user, kind) at or after `since` (unix seconds).
pub async fn count_actions_since(
    db: &Database,
    user: UserId,
    kind: ActionKind,
    since: i64,
) -> Result<u32, BazariError> {
    db.connection()
        .call(move |conn| {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM action_log
                 WHERE user_id = ?1 AND action = ?2 AND created_at >= ?3",
                params![user.0, kind.to_string(), since],
                |row| row.get(0),
            )?;
            Ok(count)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Timestamp of the user's most recent action of this kind, if any.
pub async fn last_action_at(
    db: &Database,
    user: UserId,
    kind: ActionKind,
) -> Result<Option<i64>, BazariError> {
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                "SELECT MAX(created_at) FROM action_log
                 WHERE user_id = ?1 AND action = ?2",
                params![user.0, kind.to_string()],
                |row| row.get::<_, Option<i64>>(0),
            )?;
            Ok(result)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn counting_respects_the_window() {
        let (db, _dir) = setup_db().await;
        let user = UserId(1);
        record_action(&db, user, ActionKind::AdCreation, 100)
            .await
            .unwrap();
        record_action(&db, user, ActionKind::AdCreation, 200)
            .await
            .unwrap();
        record_action(&db, user, ActionKind::SupportRequest, 200)
            .await
            .unwrap();

        let count = count_actions_since(&db, user, ActionKind::AdCreation, 150)
            .await
            .unwrap();
        assert_eq!(count, 1);

        let all = count_actions_since(&db, user, ActionKind::AdCreation, 0)
            .await
            .unwrap();
        assert_eq!(all, 2);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn last_action_tracks_kind_separately() {
        let (db, _dir) = setup_db().await;
        let user = UserId(1);
        record_action(&db, user, ActionKind::AdCreation, 100)
            .await
            .unwrap();
        record_action(&db, user, ActionKind::AdCreation, 300)
            .await
            .unwrap();

        let last = last_action_at(&db, user, ActionKind::AdCreation)
            .await
            .unwrap();
        assert_eq!(last, Some(300));

        let none = last_action_at(&db, user, ActionKind::SupportRequest)
            .await
            .unwrap();
        assert_eq!(none, None);
        db.close().await.unwrap();
    }
}
