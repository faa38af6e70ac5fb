use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Discount;

/// Persisted discount inputs of a proposal.
///
/// Services without an entry carry no discount.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscountSettings {
    pub package: Discount,
    pub services: BTreeMap<String, Discount>,
    pub overall: Discount,
}

/// The persisted inputs of a proposal. The price breakdown is never stored;
/// it is recomputed from these settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalSettings {
    pub client_name: String,
    #[serde(default)]
    pub package_id: Option<String>,
    #[serde(default = "default_include_package")]
    pub include_package: bool,
    #[serde(default)]
    pub service_ids: Vec<String>,
    #[serde(default)]
    pub discounts: DiscountSettings,
    #[serde(default)]
    pub tax_enabled: bool,
}

fn default_include_package() -> bool {
    true
}
