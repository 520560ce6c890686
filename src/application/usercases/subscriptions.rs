use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    application::usercases::subscription_gate::SubscriptionGate,
    domain::{
        repositories::{plans::PlanRepository, subscriptions::SubscriptionRepository},
        value_objects::{
            enums::restricted_features::RestrictedFeature,
            subscriptions::{CurrentSubscriptionDto, FeatureAccessDto, PlanDto,
                UserSubscriptionModel},
        },
    },
};

#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl SubscriptionError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            SubscriptionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, SubscriptionError>;

/// Answers whether a user may reach a gated feature right now. Implemented by
/// [`SubscriptionUseCase`]; mocked by dependents.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait FeatureGate: Send + Sync {
    async fn can_access(&self, user_id: Uuid, feature: RestrictedFeature) -> bool;
}

pub struct SubscriptionUseCase<S, P>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    subscription_repo: Arc<S>,
    plan_repo: Arc<P>,
}

impl<S, P> SubscriptionUseCase<S, P>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    pub fn new(subscription_repo: Arc<S>, plan_repo: Arc<P>) -> Self {
        Self {
            subscription_repo,
            plan_repo,
        }
    }

    pub async fn list_plans(&self) -> UseCaseResult<Vec<PlanDto>> {
        info!("subscriptions: listing active plans");
        let plans = self.plan_repo.list_active_plans().await.map_err(|err| {
            error!(db_error = ?err, "subscriptions: failed to list active plans");
            SubscriptionError::Internal(err)
        })?;
        let plan_count = plans.len();
        info!(plan_count, "subscriptions: active plans loaded");
        Ok(plans.into_iter().map(PlanDto::from).collect())
    }

    /// Builds the gate for the user. A failed load degrades to
    /// [`SubscriptionGate::unavailable`] rather than erroring out: a user
    /// whose record cannot be read is blocked, never fully privileged.
    pub async fn current_gate(&self, user_id: Uuid) -> SubscriptionGate {
        match self.subscription_repo.find_current_by_user(user_id).await {
            Ok(subscription) => {
                SubscriptionGate::ready(subscription.map(UserSubscriptionModel::from))
            }
            Err(err) => {
                error!(
                    %user_id,
                    db_error = ?err,
                    "subscriptions: failed to load subscription, gate degrades to blocked"
                );
                SubscriptionGate::unavailable()
            }
        }
    }

    /// Current subscription with copied plan attributes and the gate verdict
    /// for every restricted feature.
    pub async fn get_current(&self, user_id: Uuid) -> CurrentSubscriptionDto {
        let gate = self.current_gate(user_id).await;
        let subscription = gate.subscription().cloned();

        let plan = match &subscription {
            Some(subscription) => match self.plan_repo.find_by_id(subscription.plan_id).await {
                Ok(plan) => plan.map(PlanDto::from),
                Err(err) => {
                    warn!(
                        %user_id,
                        plan_id = %subscription.plan_id,
                        db_error = ?err,
                        "subscriptions: failed to load plan for display"
                    );
                    None
                }
            },
            None => None,
        };

        let is_active = gate.is_active();
        let features = RestrictedFeature::ALL
            .into_iter()
            .map(|feature| FeatureAccessDto {
                feature,
                allowed: gate.can_access_feature(feature),
            })
            .collect();

        CurrentSubscriptionDto {
            subscription,
            plan,
            is_active,
            features,
        }
    }
}

#[async_trait]
impl<S, P> FeatureGate for SubscriptionUseCase<S, P>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    async fn can_access(&self, user_id: Uuid, feature: RestrictedFeature) -> bool {
        self.current_gate(user_id).await.can_access_feature(feature)
    }
}
