use chrono::{DateTime, Utc};

use crate::domain::value_objects::{
    enums::{restricted_features::RestrictedFeature, subscription_statuses::SubscriptionStatus},
    subscriptions::UserSubscriptionModel,
};

/// Resolution state of the user's own subscription.
///
/// `Loading` answers "allow" so consumers never flash a blocked UI before the
/// record resolves. `Unavailable` (load failed) blocks everything beyond the
/// feature defaults; a failed load must never grant full privileges.
#[derive(Debug, Clone, PartialEq)]
pub enum GateState {
    Loading,
    Ready(Option<UserSubscriptionModel>),
    Unavailable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionGate {
    state: GateState,
}

impl SubscriptionGate {
    pub fn loading() -> Self {
        Self {
            state: GateState::Loading,
        }
    }

    pub fn ready(subscription: Option<UserSubscriptionModel>) -> Self {
        Self {
            state: GateState::Ready(subscription),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            state: GateState::Unavailable,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state == GateState::Loading
    }

    pub fn subscription(&self) -> Option<&UserSubscriptionModel> {
        match &self.state {
            GateState::Ready(subscription) => subscription.as_ref(),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.is_active_at(Utc::now())
    }

    /// True iff the subscription is a running trial or a paid period that has
    /// not ended. An `active` row with no period end is treated as open-ended.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        let Some(subscription) = self.subscription() else {
            return false;
        };

        match subscription.status {
            SubscriptionStatus::Trial => subscription
                .trial_ends_at
                .map(|ends_at| ends_at > now)
                .unwrap_or(false),
            SubscriptionStatus::Active => subscription
                .current_period_end
                .map(|ends_at| ends_at > now)
                .unwrap_or(true),
            SubscriptionStatus::Expired | SubscriptionStatus::Cancelled => false,
        }
    }

    pub fn can_access_feature(&self, feature: RestrictedFeature) -> bool {
        self.can_access_feature_at(feature, Utc::now())
    }

    /// An active subscription unlocks the whole feature table; anything else
    /// falls back to the per-feature defaults.
    pub fn can_access_feature_at(&self, feature: RestrictedFeature, now: DateTime<Utc>) -> bool {
        if self.is_loading() {
            return true;
        }
        feature.default_allowed() || self.is_active_at(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn subscription(status: SubscriptionStatus) -> UserSubscriptionModel {
        UserSubscriptionModel {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            plan_id: Uuid::new_v4(),
            status,
            trial_ends_at: None,
            current_period_start: None,
            current_period_end: None,
            cancelled_at: None,
        }
    }

    #[test]
    fn running_trial_is_active() {
        let now = Utc::now();
        let mut sub = subscription(SubscriptionStatus::Trial);
        sub.trial_ends_at = Some(now + Duration::days(3));
        assert!(SubscriptionGate::ready(Some(sub)).is_active_at(now));
    }

    #[test]
    fn lapsed_trial_is_not_active() {
        let now = Utc::now();
        let mut sub = subscription(SubscriptionStatus::Trial);
        sub.trial_ends_at = Some(now - Duration::hours(1));
        assert!(!SubscriptionGate::ready(Some(sub)).is_active_at(now));
    }

    #[test]
    fn trial_without_end_date_is_not_active() {
        let now = Utc::now();
        let sub = subscription(SubscriptionStatus::Trial);
        assert!(!SubscriptionGate::ready(Some(sub)).is_active_at(now));
    }

    #[test]
    fn active_with_open_ended_period_is_active() {
        let now = Utc::now();
        let sub = subscription(SubscriptionStatus::Active);
        assert!(SubscriptionGate::ready(Some(sub)).is_active_at(now));
    }

    #[test]
    fn active_past_period_end_is_not_active() {
        let now = Utc::now();
        let mut sub = subscription(SubscriptionStatus::Active);
        sub.current_period_end = Some(now - Duration::days(1));
        assert!(!SubscriptionGate::ready(Some(sub)).is_active_at(now));
    }

    #[test]
    fn expired_subscription_blocks_gated_features_only() {
        let now = Utc::now();
        let gate = SubscriptionGate::ready(Some(subscription(SubscriptionStatus::Expired)));

        assert!(!gate.can_access_feature_at(RestrictedFeature::CanSendWhatsapp, now));
        assert!(gate.can_access_feature_at(RestrictedFeature::CanViewDashboard, now));
    }

    #[test]
    fn active_subscription_unlocks_everything() {
        let now = Utc::now();
        let mut sub = subscription(SubscriptionStatus::Active);
        sub.current_period_end = Some(now + Duration::days(10));
        let gate = SubscriptionGate::ready(Some(sub));

        for feature in RestrictedFeature::ALL {
            assert!(gate.can_access_feature_at(feature, now), "{feature}");
        }
    }

    #[test]
    fn loading_gate_allows_everything_but_reports_inactive() {
        let now = Utc::now();
        let gate = SubscriptionGate::loading();

        assert!(gate.is_loading());
        assert!(!gate.is_active_at(now));
        for feature in RestrictedFeature::ALL {
            assert!(gate.can_access_feature_at(feature, now), "{feature}");
        }
    }

    #[test]
    fn unavailable_gate_degrades_to_defaults() {
        let now = Utc::now();
        let gate = SubscriptionGate::unavailable();

        assert!(!gate.is_active_at(now));
        assert!(!gate.can_access_feature_at(RestrictedFeature::CanCreateClients, now));
        assert!(gate.can_access_feature_at(RestrictedFeature::CanManageSubscription, now));
    }

    #[test]
    fn missing_subscription_gets_defaults_only() {
        let now = Utc::now();
        let gate = SubscriptionGate::ready(None);

        assert!(!gate.can_access_feature_at(RestrictedFeature::CanUseAiAgent, now));
        assert!(gate.can_access_feature_at(RestrictedFeature::CanViewClients, now));
    }
}
