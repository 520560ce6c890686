use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::subscriptions::UserSubscriptionEntity;

#[async_trait]
#[automock]
pub trait SubscriptionRepository {
    /// Latest subscription row for the user, regardless of status.
    async fn find_current_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<UserSubscriptionEntity>>;
}
