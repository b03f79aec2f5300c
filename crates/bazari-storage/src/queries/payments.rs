// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Payment bookkeeping queries over the ads table.
//!
//! A "payment record" is the billing view of a paid ad: its charge id, the
//! paying user, and the refunded flag. The flag transition `0 -> 1` is
//! compare-and-set so a charge can never be reversed twice.

use bazari_core::BazariError;
use bazari_core::types::{AdId, ChargeId, PaymentRecord, UserId};
use rusqlite::params;

use crate::database::Database;

const PAYMENT_COLUMNS: &str = "id, user_id, payment_charge_id, stars_amount, refunded";

fn payment_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PaymentRecord> {
    Ok(PaymentRecord {
        ad_id: AdId(row.get(0)?),
        owner: UserId(row.get(1)?),
        charge_id: ChargeId(row.get(2)?),
        stars_amount: row.get(3)?,
        refunded: row.get(4)?,
    })
}

/// Every paid charge not yet refunded, oldest first.
pub async fn list_unrefunded_payments(db: &Database) -> Result<Vec<PaymentRecord>, BazariError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PAYMENT_COLUMNS} FROM ads
                 WHERE payment_status = 'paid'
                   AND payment_charge_id IS NOT NULL
                   AND refunded = 0
                 ORDER BY created_at ASC, id ASC"
            ))?;
            let rows = stmt.query_map([], payment_from_row)?;
            let mut payments = Vec::new();
            for row in rows {
                payments.push(row?);
            }
            Ok(payments)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// The user's most recent paid charge, refunded or not.
pub async fn latest_paid_charge_for_user(
    db: &Database,
    user: UserId,
) -> Result<Option<PaymentRecord>, BazariError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PAYMENT_COLUMNS} FROM ads
                 WHERE user_id = ?1
                   AND payment_status = 'paid'
                   AND payment_charge_id IS NOT NULL
                 ORDER BY created_at DESC, id DESC
                 LIMIT 1"
            ))?;
            match stmt.query_row(params![user.0], payment_from_row) {
                Ok(payment) => Ok(Some(payment)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Look up a payment by its provider charge id.
pub async fn payment_by_charge(
    db: &Database,
    charge: &ChargeId,
) -> Result<Option<PaymentRecord>, BazariError> {
    let charge = charge.0.clone();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PAYMENT_COLUMNS} FROM ads WHERE payment_charge_id = ?1"
            ))?;
            match stmt.query_row(params![charge], payment_from_row) {
                Ok(payment) => Ok(Some(payment)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Compare-and-set `refunded = 0 -> 1` for a charge.
///
/// Returns whether a row changed, i.e. whether this caller won the flag.
pub async fn mark_payment_refunded(db: &Database, charge: &ChargeId) -> Result<bool, BazariError> {
    let charge = charge.0.clone();
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE ads SET refunded = 1
                 WHERE payment_charge_id = ?1 AND refunded = 0",
                params![charge],
            )?;
            Ok(changed > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::ads::create_ad;
    use crate::queries::users::upsert_user;
    use bazari_core::types::{NewAd, PaymentStatus, UserProfile};
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        let profile = UserProfile {
            id: UserId(1),
            username: Some("seller".to_string()),
            first_name: None,
            last_name: None,
            language_code: None,
            is_bot: false,
            is_premium: false,
        };
        upsert_user(&db, &profile, "fa").await.unwrap();
        (db, dir)
    }

    async fn insert_paid(db: &Database, charge: &str) -> AdId {
        let ad = NewAd {
            owner: UserId(1),
            link: "https://t.me/nft/gift".to_string(),
            price: "50".to_string(),
            description: "توضیحات ندارد".to_string(),
            payment_charge_id: ChargeId(charge.to_string()),
            stars_amount: 2,
            channel_photo: None,
        };
        let id = create_ad(db, &ad).await.unwrap();
        crate::queries::ads::update_payment_status(db, id, PaymentStatus::Paid)
            .await
            .unwrap();
        id
    }

    #[tokio::test]
    async fn unrefunded_list_excludes_refunded() {
        let (db, _dir) = setup_db().await;
        insert_paid(&db, "charge-a").await;
        insert_paid(&db, "charge-b").await;

        assert!(
            mark_payment_refunded(&db, &ChargeId("charge-a".to_string()))
                .await
                .unwrap()
        );

        let remaining = list_unrefunded_payments(&db).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].charge_id, ChargeId("charge-b".to_string()));
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn refund_flag_is_won_once() {
        let (db, _dir) = setup_db().await;
        insert_paid(&db, "charge-a").await;

        let charge = ChargeId("charge-a".to_string());
        assert!(mark_payment_refunded(&db, &charge).await.unwrap());
        assert!(!mark_payment_refunded(&db, &charge).await.unwrap());

        let record = payment_by_charge(&db, &charge).await.unwrap().unwrap();
        assert!(record.refunded);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn latest_charge_picks_newest() {
        let (db, _dir) = setup_db().await;
        insert_paid(&db, "charge-old").await;
        let newest = insert_paid(&db, "charge-new").await;

        let latest = latest_paid_charge_for_user(&db, UserId(1))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(latest.ad_id, newest);
        assert_eq!(latest.charge_id, ChargeId("charge-new".to_string()));
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn unknown_charge_returns_none() {
        let (db, _dir) = setup_db().await;
        let missing = payment_by_charge(&db, &ChargeId("nope".to_string()))
            .await
            .unwrap();
        assert!(missing.is_none());
        assert!(
            !mark_payment_refunded(&db, &ChargeId("nope".to_string()))
                .await
                .unwrap()
        );
        db.close().await.unwrap();
    }
}
