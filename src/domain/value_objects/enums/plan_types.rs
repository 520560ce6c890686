use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    #[default]
    Monthly,
    Quarterly,
    Semiannual,
    Annual,
}

impl Display for PlanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let plan = match self {
            PlanType::Monthly => "monthly",
            PlanType::Quarterly => "quarterly",
            PlanType::Semiannual => "semiannual",
            PlanType::Annual => "annual",
        };
        write!(f, "{}", plan)
    }
}

impl PlanType {
    pub fn from_str(value: &str) -> Self {
        match value {
            "quarterly" => PlanType::Quarterly,
            "semiannual" => PlanType::Semiannual,
            "annual" => PlanType::Annual,
            _ => PlanType::Monthly,
        }
    }

    pub fn duration_months(&self) -> u32 {
        match self {
            PlanType::Monthly => 1,
            PlanType::Quarterly => 3,
            PlanType::Semiannual => 6,
            PlanType::Annual => 12,
        }
    }

    /// Fallback price in centavos used when neither the caller nor the client
    /// record carries an explicit price.
    pub fn default_price_minor(&self) -> i32 {
        match self {
            PlanType::Monthly => 3000,
            PlanType::Quarterly => 8000,
            PlanType::Semiannual => 15000,
            PlanType::Annual => 28000,
        }
    }

    pub fn display_name_pt_br(&self) -> &'static str {
        match self {
            PlanType::Monthly => "Mensal",
            PlanType::Quarterly => "Trimestral",
            PlanType::Semiannual => "Semestral",
            PlanType::Annual => "Anual",
        }
    }
}
