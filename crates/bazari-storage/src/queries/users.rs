// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User registration and profile queries.

use bazari_core::BazariError;
use bazari_core::types::{User, UserId, UserProfile, UserStats, UserWithStats};
use rusqlite::params;

use crate::database::Database;

const USER_COLUMNS: &str = "user_id, username, first_name, last_name, language_code, \
     is_bot, is_premium, language, created_at, last_seen";

fn user_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: UserId(row.get(0)?),
        username: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        language_code: row.get(4)?,
        is_bot: row.get(5)?,
        is_premium: row.get(6)?,
        language: row.get(7)?,
        created_at: row.get(8)?,
        last_seen: row.get(9)?,
    })
}

/// Insert or refresh a user from their platform profile.
///
/// Profile fields and `last_seen` are always updated; the stored locale
/// preference is only written on first insert so a later `/start` never
/// resets a chosen language.
pub async fn upsert_user(
    db: &Database,
    profile: &UserProfile,
    locale: &str,
) -> Result<(), BazariError> {
    let profile = profile.clone();
    let locale = locale.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO users
                     (user_id, username, first_name, last_name, language_code,
                      is_bot, is_premium, language)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                 ON CONFLICT (user_id) DO UPDATE SET
                     username = excluded.username,
                     first_name = excluded.first_name,
                     last_name = excluded.last_name,
                     language_code = excluded.language_code,
                     is_bot = excluded.is_bot,
                     is_premium = excluded.is_premium,
                     last_seen = CURRENT_TIMESTAMP",
                params![
                    profile.id.0,
                    profile.username,
                    profile.first_name,
                    profile.last_name,
                    profile.language_code,
                    profile.is_bot,
                    profile.is_premium,
                    locale,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a user by id.
pub async fn get_user(db: &Database, id: UserId) -> Result<Option<User>, BazariError> {
    db.connection()
        .call(move |conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = ?1"))?;
            match stmt.query_row(params![id.0], user_from_row) {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Persist the user's locale preference.
pub async fn set_user_locale(db: &Database, id: UserId, locale: &str) -> Result<(), BazariError> {
    let locale = locale.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE users SET language = ?1 WHERE user_id = ?2",
                params![locale, id.0],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// All users, newest first.
pub async fn list_users(db: &Database) -> Result<Vec<User>, BazariError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC, user_id DESC"
            ))?;
            let rows = stmt.query_map([], user_from_row)?;
            let mut users = Vec::new();
            for row in rows {
                users.push(row?);
            }
            Ok(users)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// A user joined with their ad and support counters.
pub async fn user_with_stats(
    db: &Database,
    id: UserId,
) -> Result<Option<UserWithStats>, BazariError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {USER_COLUMNS},
                        (SELECT COUNT(*) FROM ads WHERE ads.user_id = users.user_id),
                        (SELECT COUNT(*) FROM ads
                          WHERE ads.user_id = users.user_id AND ads.status = 'approved'),
                        (SELECT COUNT(*) FROM support_requests
                          WHERE support_requests.user_id = users.user_id)
                 FROM users WHERE user_id = ?1"
            ))?;
            let result = stmt.query_row(params![id.0], |row| {
                Ok(UserWithStats {
                    user: user_from_row(row)?,
                    stats: UserStats {
                        total_ads: row.get(10)?,
                        approved_ads: row.get(11)?,
                        support_requests: row.get(12)?,
                    },
                })
            });
            match result {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
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

    fn make_profile(id: i64, username: Option<&str>) -> UserProfile {
        UserProfile {
            id: UserId(id),
            username: username.map(str::to_string),
            first_name: Some("Ada".to_string()),
            last_name: None,
            language_code: Some("en".to_string()),
            is_bot: false,
            is_premium: false,
        }
    }

    #[tokio::test]
    async fn upsert_and_get_roundtrips() {
        let (db, _dir) = setup_db().await;
        upsert_user(&db, &make_profile(1, Some("ada")), "fa")
            .await
            .unwrap();

        let user = get_user(&db, UserId(1)).await.unwrap().unwrap();
        assert_eq!(user.username.as_deref(), Some("ada"));
        assert_eq!(user.language, "fa");
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn upsert_keeps_stored_locale() {
        let (db, _dir) = setup_db().await;
        upsert_user(&db, &make_profile(1, Some("ada")), "fa")
            .await
            .unwrap();
        set_user_locale(&db, UserId(1), "ru").await.unwrap();

        // A later /start with a different default must not reset the choice.
        upsert_user(&db, &make_profile(1, Some("ada_new")), "fa")
            .await
            .unwrap();

        let user = get_user(&db, UserId(1)).await.unwrap().unwrap();
        assert_eq!(user.language, "ru");
        assert_eq!(user.username.as_deref(), Some("ada_new"));
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn get_nonexistent_returns_none() {
        let (db, _dir) = setup_db().await;
        assert!(get_user(&db, UserId(99)).await.unwrap().is_none());
        assert!(user_with_stats(&db, UserId(99)).await.unwrap().is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn list_users_returns_all() {
        let (db, _dir) = setup_db().await;
        upsert_user(&db, &make_profile(1, Some("a")), "fa")
            .await
            .unwrap();
        upsert_user(&db, &make_profile(2, Some("b")), "en")
            .await
            .unwrap();

        let users = list_users(&db).await.unwrap();
        assert_eq!(users.len(), 2);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn stats_start_at_zero() {
        let (db, _dir) = setup_db().await;
        upsert_user(&db, &make_profile(1, Some("a")), "fa")
            .await
            .unwrap();

        let with_stats = user_with_stats(&db, UserId(1)).await.unwrap().unwrap();
        assert_eq!(with_stats.stats, UserStats::default());
        db.close().await.unwrap();
    }
}
