use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Original and discounted amount of one priced line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAmount {
    pub id: String,
    pub original_amount: Decimal,
    pub discounted_amount: Decimal,
}

impl LineAmount {
    /// Amount removed from this line by its own discount.
    pub fn discount_amount(&self) -> Decimal {
        self.original_amount - self.discounted_amount
    }
}

/// Every intermediate and final amount of a proposal price.
///
/// Amounts are unrounded; formatting is left to whoever displays them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub lines: Vec<LineAmount>,
    pub subtotal: Decimal,
    pub overall_discount_amount: Decimal,
    pub subtotal_after_overall_discount: Decimal,
    pub tax_amount: Decimal,
    /// One-time amount due at acceptance.
    pub total: Decimal,
    /// Monthly charges, never part of `total`.
    pub recurring_fees: Decimal,
}

impl PriceBreakdown {
    /// Sum of the per-line discounts, excluding the overall discount.
    pub fn line_discount_total(&self) -> Decimal {
        self.lines.iter().map(LineAmount::discount_amount).sum()
    }

    /// Look up a line by id.
    pub fn line(
        &self,
        id: &str,
    ) -> Option<&LineAmount> {
        self.lines.iter().find(|line| line.id == id)
    }
}
