pub mod expiration_statuses;
pub mod plan_tiers;
pub mod plan_types;
pub mod restricted_features;
pub mod service_types;
pub mod subscription_statuses;
