// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Support request queries.

use bazari_core::BazariError;
use bazari_core::types::{RequestId, SupportRequest, SupportRequestWithUser, UserId};
use rusqlite::params;

use crate::database::Database;
use crate::queries::parse_stored;

const REQUEST_COLUMNS: &str =
    "r.id, r.user_id, r.message, r.status, r.admin_response, r.created_at, r.responded_at";

fn request_with_user_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SupportRequestWithUser> {
    Ok(SupportRequestWithUser {
        request: SupportRequest {
            id: RequestId(row.get(0)?),
            user_id: UserId(row.get(1)?),
            message: row.get(2)?,
            status: parse_stored(3, row.get(3)?)?,
            admin_response: row.get(4)?,
            created_at: row.get(5)?,
            responded_at: row.get(6)?,
        },
        username: row.get(7)?,
        first_name: row.get(8)?,
        last_name: row.get(9)?,
    })
}

/// Persist a new support request (status `pending`) and return its id.
pub async fn create_support_request(
    db: &Database,
    user: UserId,
    message: &str,
) -> Result<RequestId, BazariError> {
    let message = message.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO support_requests (user_id, message) VALUES (?1, ?2)",
                params![user.0, message],
            )?;
            Ok(RequestId(conn.last_insert_rowid()))
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// A support request joined with the requester's public fields.
pub async fn get_support_request(
    db: &Database,
    id: RequestId,
) -> Result<Option<SupportRequestWithUser>, BazariError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {REQUEST_COLUMNS}, u.username, u.first_name, u.last_name
                 FROM support_requests r JOIN users u ON r.user_id = u.user_id
                 WHERE r.id = ?1"
            ))?;
            match stmt.query_row(params![id.0], request_with_user_from_row) {
                Ok(request) => Ok(Some(request)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Pending requests joined with requester fields, oldest first.
pub async fn list_pending_support_requests(
    db: &Database,
) -> Result<Vec<SupportRequestWithUser>, BazariError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {REQUEST_COLUMNS}, u.username, u.first_name, u.last_name
                 FROM support_requests r JOIN users u ON r.user_id = u.user_id
                 WHERE r.status = 'pending'
                 ORDER BY r.created_at ASC, r.id ASC"
            ))?;
            let rows = stmt.query_map([], request_with_user_from_row)?;
            let mut requests = Vec::new();
            for row in rows {
                requests.push(row?);
            }
            Ok(requests)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Mark a request responded and store the admin's reply.
pub async fn respond_to_support_request(
    db: &Database,
    id: RequestId,
    response: &str,
) -> Result<(), BazariError> {
    let response = response.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE support_requests
                 SET status = 'responded', admin_response = ?1,
                     responded_at = CURRENT_TIMESTAMP
                 WHERE id = ?2",
                params![response, id.0],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::users::upsert_user;
    use bazari_core::types::{SupportStatus, UserProfile};
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        let profile = UserProfile {
            id: UserId(1),
            username: Some("asker".to_string()),
            first_name: Some("Amir".to_string()),
            last_name: None,
            language_code: None,
            is_bot: false,
            is_premium: false,
        };
        upsert_user(&db, &profile, "fa").await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn create_and_get_roundtrips() {
        let (db, _dir) = setup_db().await;
        let id = create_support_request(&db, UserId(1), "my payment failed")
            .await
            .unwrap();

        let found = get_support_request(&db, id).await.unwrap().unwrap();
        assert_eq!(found.request.message, "my payment failed");
        assert_eq!(found.request.status, SupportStatus::Pending);
        assert_eq!(found.username.as_deref(), Some("asker"));
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn responding_closes_the_request() {
        let (db, _dir) = setup_db().await;
        let id = create_support_request(&db, UserId(1), "help")
            .await
            .unwrap();

        respond_to_support_request(&db, id, "resolved, sorry for the trouble")
            .await
            .unwrap();

        let found = get_support_request(&db, id).await.unwrap().unwrap();
        assert_eq!(found.request.status, SupportStatus::Responded);
        assert_eq!(
            found.request.admin_response.as_deref(),
            Some("resolved, sorry for the trouble")
        );
        assert!(found.request.responded_at.is_some());

        let pending = list_pending_support_requests(&db).await.unwrap();
        assert!(pending.is_empty());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn pending_list_is_oldest_first() {
        let (db, _dir) = setup_db().await;
        let first = create_support_request(&db, UserId(1), "first")
            .await
            .unwrap();
        let second = create_support_request(&db, UserId(1), "second")
            .await
            .unwrap();

        let pending = list_pending_support_requests(&db).await.unwrap();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].request.id, first);
        assert_eq!(pending[1].request.id, second);
        db.close().await.unwrap();
    }
}
