// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bot-wide aggregate statistics for the admin panels.

use bazari_core::BazariError;
use bazari_core::types::BotStats;

use crate::database::Database;

/// Collect the counters shown on the super admin panel.
pub async fn bot_stats(db: &Database) -> Result<BotStats, BazariError> {
    db.connection()
        .call(|conn| {
            let stats = conn.query_row(
                "SELECT
                     (SELECT COUNT(*) FROM users),
                     (SELECT COUNT(*) FROM ads),
                     (SELECT COUNT(*) FROM ads WHERE status = 'approved'),
                     (SELECT COUNT(*) FROM ads
                       WHERE status = 'pending' AND payment_status = 'paid'),
                     (SELECT COUNT(*) FROM support_requests),
                     (SELECT COUNT(*) FROM support_requests WHERE status = 'pending')",
                [],
                |row| {
                    Ok(BotStats {
                        total_users: row.get(0)?,
                        total_ads: row.get(1)?,
                        approved_ads: row.get(2)?,
                        pending_ads: row.get(3)?,
                        total_support_requests: row.get(4)?,
                        pending_support_requests: row.get(5)?,
                    })
                },
            )?;
            Ok(stats)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
