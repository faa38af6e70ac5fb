use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Discount;

/// VAT rate applied when a proposal has tax enabled (5%).
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// One priced item: the package, or one service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLine {
    pub id: String,
    pub base_amount: Decimal,
    #[serde(default)]
    pub discount: Discount,
    /// Flat recurring charge tracked outside the one-time total.
    #[serde(default)]
    pub recurring_fee: Decimal,
}

impl PriceLine {
    pub fn new(
        id: impl Into<String>,
        base_amount: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            base_amount,
            discount: Discount::none(),
            recurring_fee: Decimal::ZERO,
        }
    }

    pub fn with_discount(
        mut self,
        discount: Discount,
    ) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_recurring_fee(
        mut self,
        recurring_fee: Decimal,
    ) -> Self {
        self.recurring_fee = recurring_fee;
        self
    }
}

/// Everything the price calculator needs for one recomputation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSelection {
    pub include_package: bool,
    pub package_line: Option<PriceLine>,
    pub service_lines: Vec<PriceLine>,
    pub overall_discount: Discount,
    pub tax_enabled: bool,
    pub tax_rate: Decimal,
}

impl Default for PriceSelection {
    fn default() -> Self {
        Self {
            include_package: true,
            package_line: None,
            service_lines: Vec::new(),
            overall_discount: Discount::none(),
            tax_enabled: false,
            tax_rate: DEFAULT_TAX_RATE,
        }
    }
}
