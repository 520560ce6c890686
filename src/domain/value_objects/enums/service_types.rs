use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    #[default]
    Iptv,
    Vpn,
}

impl Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let service = match self {
            ServiceType::Iptv => "iptv",
            ServiceType::Vpn => "vpn",
        };
        write!(f, "{}", service)
    }
}

impl ServiceType {
    pub fn from_str(value: &str) -> Self {
        match value {
            "vpn" => ServiceType::Vpn,
            _ => ServiceType::Iptv,
        }
    }
}
