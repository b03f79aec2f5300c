// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ad lifecycle queries.
//!
//! Moderation transitions are compare-and-set: one UPDATE guarded by the
//! current status, so concurrent moderators cannot both win.

use bazari_core::BazariError;
use bazari_core::types::{
    Ad, AdId, AdStatus, AdWithOwner, ChargeId, MessageRef, NewAd, PaymentStatus, SoldStatus,
    UserId,
};
use rusqlite::params;

use crate::database::Database;
use crate::queries::parse_stored;

const AD_COLUMNS: &str = "a.id, a.user_id, a.gift_link, a.price, a.description, a.status, \
     a.payment_status, a.sold_status, a.payment_charge_id, a.stars_amount, a.channel_photo, \
     a.channel_message_id, a.refunded, a.created_at, a.approved_at";

pub(crate) fn ad_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Ad> {
    Ok(Ad {
        id: AdId(row.get(0)?),
        owner: UserId(row.get(1)?),
        link: row.get(2)?,
        price: row.get(3)?,
        description: row.get(4)?,
        status: parse_stored(5, row.get(5)?)?,
        payment_status: parse_stored(6, row.get(6)?)?,
        sold_status: parse_stored(7, row.get(7)?)?,
        payment_charge_id: row.get::<_, Option<String>>(8)?.map(ChargeId),
        stars_amount: row.get(9)?,
        channel_photo: row.get(10)?,
        channel_message_id: row.get::<_, Option<i64>>(11)?.map(MessageRef),
        refunded: row.get(12)?,
        created_at: row.get(13)?,
        approved_at: row.get(14)?,
    })
}

fn ad_with_owner_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AdWithOwner> {
    Ok(AdWithOwner {
        ad: ad_from_row(row)?,
        username: row.get(15)?,
        first_name: row.get(16)?,
        last_name: row.get(17)?,
    })
}

/// Persist a new ad (status `pending`, payment `unpaid`) and return its id.
pub async fn create_ad(db: &Database, ad: &NewAd) -> Result<AdId, BazariError> {
    let ad = ad.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO ads
                     (user_id, gift_link, price, description, payment_charge_id,
                      stars_amount, channel_photo)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    ad.owner.0,
                    ad.link,
                    ad.price,
                    ad.description,
                    ad.payment_charge_id.0,
                    ad.stars_amount,
                    ad.channel_photo,
                ],
            )?;
            Ok(AdId(conn.last_insert_rowid()))
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// An ad joined with its owner's public fields.
pub async fn get_ad(db: &Database, id: AdId) -> Result<Option<AdWithOwner>, BazariError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {AD_COLUMNS}, u.username, u.first_name, u.last_name
                 FROM ads a JOIN users u ON a.user_id = u.user_id
                 WHERE a.id = ?1"
            ))?;
            match stmt.query_row(params![id.0], ad_with_owner_from_row) {
                Ok(ad) => Ok(Some(ad)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// All ads owned by a user, newest first.
pub async fn list_ads_by_owner(db: &Database, owner: UserId) -> Result<Vec<Ad>, BazariError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {AD_COLUMNS} FROM ads a
                 WHERE a.user_id = ?1
                 ORDER BY a.created_at DESC, a.id DESC"
            ))?;
            let rows = stmt.query_map(params![owner.0], ad_from_row)?;
            let mut ads = Vec::new();
            for row in rows {
                ads.push(row?);
            }
            Ok(ads)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Ads awaiting moderation: paid but still pending, oldest first.
pub async fn list_pending_paid_ads(db: &Database) -> Result<Vec<AdWithOwner>, BazariError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {AD_COLUMNS}, u.username, u.first_name, u.last_name
                 FROM ads a JOIN users u ON a.user_id = u.user_id
                 WHERE a.status = 'pending' AND a.payment_status = 'paid'
                 ORDER BY a.created_at ASC, a.id ASC"
            ))?;
            let rows = stmt.query_map([], ad_with_owner_from_row)?;
            let mut ads = Vec::new();
            for row in rows {
                ads.push(row?);
            }
            Ok(ads)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Compare-and-set moderation transition `from -> to`, stamping `approved_at`.
///
/// Returns whether a row changed; `false` means another moderator already
/// decided this ad.
pub async fn update_ad_status(
    db: &Database,
    id: AdId,
    from: AdStatus,
    to: AdStatus,
) -> Result<bool, BazariError> {
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE ads SET status = ?1, approved_at = CURRENT_TIMESTAMP
                 WHERE id = ?2 AND status = ?3",
                params![to.to_string(), id.0, from.to_string()],
            )?;
            Ok(changed > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Update the billing state of an ad.
pub async fn update_payment_status(
    db: &Database,
    id: AdId,
    status: PaymentStatus,
) -> Result<(), BazariError> {
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE ads SET payment_status = ?1 WHERE id = ?2",
                params![status.to_string(), id.0],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Toggle the post-publication sold flag.
pub async fn set_sold_status(
    db: &Database,
    id: AdId,
    status: SoldStatus,
) -> Result<(), BazariError> {
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE ads SET sold_status = ?1 WHERE id = ?2",
                params![status.to_string(), id.0],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Record the published channel message id for later edits.
pub async fn set_channel_message(
    db: &Database,
    id: AdId,
    message: MessageRef,
) -> Result<(), BazariError> {
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE ads SET channel_message_id = ?1 WHERE id = ?2",
                params![message.0, id.0],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}
