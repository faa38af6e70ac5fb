use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingCycle {
    #[default]
    OneTime,
    Monthly,
}

impl BillingCycle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneTime => "one_time",
            Self::Monthly => "monthly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "one_time" => Some(Self::OneTime),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }
}

/// A fixed bundle of deliverables sold at one price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub features: Vec<String>,
}

/// An optional add-on priced independently of the package.
///
/// For monthly services `price` is the one-time setup fee and
/// `recurring_fee` the monthly charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub billing: BillingCycle,
    pub recurring_fee: Decimal,
}

impl Service {
    pub fn is_recurring(&self) -> bool {
        self.billing == BillingCycle::Monthly
    }
}
