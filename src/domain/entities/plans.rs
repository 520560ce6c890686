use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::subscription_plans;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = subscription_plans)]
pub struct SubscriptionPlanEntity {
    pub id: Uuid,
    pub name: String,
    pub duration_months: i32,
    pub price_minor: i32,
    pub discount_percent: i32,
    pub is_active: bool,
    pub tier: Option<String>,
    pub created_at: DateTime<Utc>,
}
