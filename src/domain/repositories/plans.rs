use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::plans::SubscriptionPlanEntity;

#[async_trait]
#[automock]
pub trait PlanRepository {
    async fn find_by_id(&self, plan_id: Uuid) -> Result<Option<SubscriptionPlanEntity>>;
    async fn list_active_plans(&self) -> Result<Vec<SubscriptionPlanEntity>>;
}
