use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::{plans::SubscriptionPlanEntity, subscriptions::UserSubscriptionEntity},
    value_objects::enums::{
        plan_tiers::PlanTier, restricted_features::RestrictedFeature,
        subscription_statuses::SubscriptionStatus,
    },
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSubscriptionModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub status: SubscriptionStatus,
    pub trial_ends_at: Option<DateTime<Utc>>,
    pub current_period_start: Option<DateTime<Utc>>,
    pub current_period_end: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl From<UserSubscriptionEntity> for UserSubscriptionModel {
    fn from(entity: UserSubscriptionEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            plan_id: entity.plan_id,
            status: SubscriptionStatus::from_str(&entity.status),
            trial_ends_at: entity.trial_ends_at,
            current_period_start: entity.current_period_start,
            current_period_end: entity.current_period_end,
            cancelled_at: entity.cancelled_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanDto {
    pub id: Uuid,
    pub name: String,
    pub duration_months: i32,
    pub price_minor: i32,
    pub discount_percent: i32,
    pub tier: Option<PlanTier>,
}

impl From<SubscriptionPlanEntity> for PlanDto {
    fn from(entity: SubscriptionPlanEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            duration_months: entity.duration_months,
            price_minor: entity.price_minor,
            discount_percent: entity.discount_percent,
            tier: entity.tier.as_deref().and_then(PlanTier::from_str),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureAccessDto {
    pub feature: RestrictedFeature,
    pub allowed: bool,
}

/// Current subscription plus the gate verdict for every restricted feature.
/// Plan attributes are copied for display only, never authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentSubscriptionDto {
    pub subscription: Option<UserSubscriptionModel>,
    pub plan: Option<PlanDto>,
    pub is_active: bool,
    pub features: Vec<FeatureAccessDto>,
}
