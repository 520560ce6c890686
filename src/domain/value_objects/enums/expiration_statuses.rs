use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Classification of a client service relative to its expiration timestamp.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExpirationStatus {
    Active,
    Expiring,
    Expired,
}

impl Display for ExpirationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            ExpirationStatus::Active => "active",
            ExpirationStatus::Expiring => "expiring",
            ExpirationStatus::Expired => "expired",
        };
        write!(f, "{}", status)
    }
}
