// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`Repository`] implementation over the SQLite query modules.

use async_trait::async_trait;
use bazari_core::BazariError;
use bazari_core::traits::Repository;
use bazari_core::types::{
    ActionKind, Ad, AdId, AdStatus, AdWithOwner, BotStats, ChargeId, MessageRef, NewAd,
    PaymentRecord, PaymentStatus, RequestId, SoldStatus, SupportRequestWithUser, User, UserId,
    UserProfile, UserWithStats,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed repository. Cheap to clone; all writes funnel through the
/// database's single writer thread.
#[derive(Clone)]
pub struct SqliteRepository {
    db: Database,
}

impl SqliteRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl Repository for SqliteRepository {
    async fn upsert_user(&self, profile: &UserProfile, locale: &str) -> Result<(), BazariError> {
        queries::users::upsert_user(&self.db, profile, locale).await
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, BazariError> {
        queries::users::get_user(&self.db, id).await
    }

    async fn set_user_locale(&self, id: UserId, locale: &str) -> Result<(), BazariError> {
        queries::users::set_user_locale(&self.db, id, locale).await
    }

    async fn list_users(&self) -> Result<Vec<User>, BazariError> {
        queries::users::list_users(&self.db).await
    }

    async fn user_with_stats(&self, id: UserId) -> Result<Option<UserWithStats>, BazariError> {
        queries::users::user_with_stats(&self.db, id).await
    }

    async fn create_ad(&self, ad: &NewAd) -> Result<AdId, BazariError> {
        queries::ads::create_ad(&self.db, ad).await
    }

    async fn get_ad(&self, id: AdId) -> Result<Option<AdWithOwner>, BazariError> {
        queries::ads::get_ad(&self.db, id).await
    }

    async fn list_ads_by_owner(&self, owner: UserId) -> Result<Vec<Ad>, BazariError> {
        queries::ads::list_ads_by_owner(&self.db, owner).await
    }

    async fn list_pending_paid_ads(&self) -> Result<Vec<AdWithOwner>, BazariError> {
        queries::ads::list_pending_paid_ads(&self.db).await
    }

    async fn update_ad_status(
        &self,
        id: AdId,
        from: AdStatus,
        to: AdStatus,
    ) -> Result<bool, BazariError> {
        queries::ads::update_ad_status(&self.db, id, from, to).await
    }

    async fn update_payment_status(
        &self,
        id: AdId,
        status: PaymentStatus,
    ) -> Result<(), BazariError> {
        queries::ads::update_payment_status(&self.db, id, status).await
    }

    async fn set_sold_status(&self, id: AdId, status: SoldStatus) -> Result<(), BazariError> {
        queries::ads::set_sold_status(&self.db, id, status).await
    }

    async fn set_channel_message(
        &self,
        id: AdId,
        message: MessageRef,
    ) -> Result<(), BazariError> {
        queries::ads::set_channel_message(&self.db, id, message).await
    }

    async fn list_unrefunded_payments(&self) -> Result<Vec<PaymentRecord>, BazariError> {
        queries::payments::list_unrefunded_payments(&self.db).await
    }

    async fn latest_paid_charge_for_user(
        &self,
        user: UserId,
    ) -> Result<Option<PaymentRecord>, BazariError> {
        queries::payments::latest_paid_charge_for_user(&self.db, user).await
    }

    async fn payment_by_charge(
        &self,
        charge: &ChargeId,
    ) -> Result<Option<PaymentRecord>, BazariError> {
        queries::payments::payment_by_charge(&self.db, charge).await
    }

    async fn mark_payment_refunded(&self, charge: &ChargeId) -> Result<bool, BazariError> {
        queries::payments::mark_payment_refunded(&self.db, charge).await
    }

    async fn create_support_request(
        &self,
        user: UserId,
        message: &str,
    ) -> Result<RequestId, BazariError> {
        queries::support::create_support_request(&self.db, user, message).await
    }

    async fn get_support_request(
        &self,
        id: RequestId,
    ) -> Result<Option<SupportRequestWithUser>, BazariError> {
        queries::support::get_support_request(&self.db, id).await
    }

    async fn list_pending_support_requests(
        &self,
    ) -> Result<Vec<SupportRequestWithUser>, BazariError> {
        queries::support::list_pending_support_requests(&self.db).await
    }

    async fn respond_to_support_request(
        &self,
        id: RequestId,
        response: &str,
    ) -> Result<(), BazariError> {
        queries::support::respond_to_support_request(&self.db, id, response).await
    }

    async fn record_action(
        &self,
        user: UserId,
        kind: ActionKind,
        at: i64,
    ) -> Result<(), BazariError> {
        queries::action_log::record_action(&self.db, user, kind, at).await
    }

    async fn count_actions_since(
        &self,
        user: UserId,
        kind: ActionKind,
        since: i64,
    ) -> Result<u32, BazariError> {
        queries::action_log::count_actions_since(&self.db, user, kind, since).await
    }

    async fn last_action_at(
        &self,
        user: UserId,
        kind: ActionKind,
    ) -> Result<Option<i64>, BazariError> {
        queries::action_log::last_action_at(&self.db, user, kind).await
    }

    async fn bot_stats(&self) -> Result<BotStats, BazariError> {
        queries::stats::bot_stats(&self.db).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn repository_exercises_all_tables() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        let repo = SqliteRepository::new(db);

        let profile = UserProfile {
            id: UserId(7),
            username: Some("seller".to_string()),
            first_name: Some("Sam".to_string()),
            last_name: None,
            language_code: None,
            is_bot: false,
            is_premium: false,
        };
        repo.upsert_user(&profile, "fa").await.unwrap();

        let ad_id = repo
            .create_ad(&NewAd {
                owner: UserId(7),
                link: "https://t.me/nft/gift".to_string(),
                price: "50".to_string(),
                description: "توضیحات ندارد".to_string(),
                payment_charge_id: ChargeId("charge-1".to_string()),
                stars_amount: 2,
                channel_photo: None,
            })
            .await
            .unwrap();
        repo.update_payment_status(ad_id, PaymentStatus::Paid)
            .await
            .unwrap();

        assert_eq!(repo.list_pending_paid_ads().await.unwrap().len(), 1);
        assert!(
            repo.update_ad_status(ad_id, AdStatus::Pending, AdStatus::Approved)
                .await
                .unwrap()
        );

        let request_id = repo
            .create_support_request(UserId(7), "hello")
            .await
            .unwrap();
        repo.respond_to_support_request(request_id, "hi")
            .await
            .unwrap();

        repo.record_action(UserId(7), ActionKind::AdCreation, 1000)
            .await
            .unwrap();
        assert_eq!(
            repo.last_action_at(UserId(7), ActionKind::AdCreation)
                .await
                .unwrap(),
            Some(1000)
        );

        let stats = repo.bot_stats().await.unwrap();
        assert_eq!(stats.total_users, 1);
        assert_eq!(stats.approved_ads, 1);
    }
}
