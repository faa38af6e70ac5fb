use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a discount value is interpreted against its base amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// `value` is a percentage of the base amount, 0 to 100.
    #[default]
    Percentage,
    /// `value` is an amount in major currency units deducted from the base.
    Absolute,
}

impl DiscountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Absolute => "absolute",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "percentage" => Some(Self::Percentage),
            "absolute" => Some(Self::Absolute),
            _ => None,
        }
    }
}

/// A single discount: its kind and value.
///
/// Out-of-range values are not rejected here; the resolver in
/// [`crate::calculations::discount`] clamps them when the discount is applied.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Discount {
    #[serde(rename = "type")]
    pub kind: DiscountKind,
    pub value: Decimal,
}

impl Discount {
    pub fn percentage(value: Decimal) -> Self {
        Self {
            kind: DiscountKind::Percentage,
            value,
        }
    }

    pub fn absolute(value: Decimal) -> Self {
        Self {
            kind: DiscountKind::Absolute,
            value,
        }
    }

    /// A 0% discount.
    pub fn none() -> Self {
        Self::default()
    }

    /// True when applying this discount leaves any base amount unchanged.
    pub fn is_zero(&self) -> bool {
        self.value <= Decimal::ZERO
    }
}
