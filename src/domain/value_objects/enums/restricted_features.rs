use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Capabilities gated by the user's own subscription. The variant-to-bool
/// mapping in [`RestrictedFeature::default_allowed`] is the policy source of
/// truth: features defaulting to `false` require an active subscription,
/// features defaulting to `true` stay reachable even when the subscription
/// has lapsed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RestrictedFeature {
    CanCreateClients,
    CanEditClients,
    CanDeleteClients,
    CanSendWhatsapp,
    CanExportContacts,
    CanUseAiAgent,
    CanViewDashboard,
    CanViewClients,
    CanViewProfile,
    CanManageSubscription,
}

impl RestrictedFeature {
    pub const ALL: [RestrictedFeature; 10] = [
        RestrictedFeature::CanCreateClients,
        RestrictedFeature::CanEditClients,
        RestrictedFeature::CanDeleteClients,
        RestrictedFeature::CanSendWhatsapp,
        RestrictedFeature::CanExportContacts,
        RestrictedFeature::CanUseAiAgent,
        RestrictedFeature::CanViewDashboard,
        RestrictedFeature::CanViewClients,
        RestrictedFeature::CanViewProfile,
        RestrictedFeature::CanManageSubscription,
    ];

    /// Whether the feature is reachable without an active subscription.
    pub fn default_allowed(&self) -> bool {
        match self {
            RestrictedFeature::CanCreateClients
            | RestrictedFeature::CanEditClients
            | RestrictedFeature::CanDeleteClients
            | RestrictedFeature::CanSendWhatsapp
            | RestrictedFeature::CanExportContacts
            | RestrictedFeature::CanUseAiAgent => false,
            RestrictedFeature::CanViewDashboard
            | RestrictedFeature::CanViewClients
            | RestrictedFeature::CanViewProfile
            | RestrictedFeature::CanManageSubscription => true,
        }
    }
}

impl Display for RestrictedFeature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let feature = match self {
            RestrictedFeature::CanCreateClients => "can_create_clients",
            RestrictedFeature::CanEditClients => "can_edit_clients",
            RestrictedFeature::CanDeleteClients => "can_delete_clients",
            RestrictedFeature::CanSendWhatsapp => "can_send_whatsapp",
            RestrictedFeature::CanExportContacts => "can_export_contacts",
            RestrictedFeature::CanUseAiAgent => "can_use_ai_agent",
            RestrictedFeature::CanViewDashboard => "can_view_dashboard",
            RestrictedFeature::CanViewClients => "can_view_clients",
            RestrictedFeature::CanViewProfile => "can_view_profile",
            RestrictedFeature::CanManageSubscription => "can_manage_subscription",
        };
        write!(f, "{}", feature)
    }
}
