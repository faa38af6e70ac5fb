//! Proposal price calculation.
//!
//! Produces a [`PriceBreakdown`] from a [`PriceSelection`]. Every surface that
//! shows a proposal or invoice amount (generator, editor, custom builder,
//! invoice generator, document renderer) goes through this one calculation.
//!
//! # Calculation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Package price after its own discount (0 when excluded) |
//! | 2    | Each service price after its own discount |
//! | 3    | Subtotal (Step 1 + sum of Step 2) |
//! | 4    | Overall discount, applied to the Step 3 subtotal |
//! | 5    | Subtotal after overall discount (Step 3 - Step 4) |
//! | 6    | Tax (Step 5 × tax rate, when tax is enabled) |
//! | 7    | Total (Step 5 + Step 6) |
//! | 8    | Recurring fees (sum of service recurring fees, not in total) |
//!
//! Tax always applies after every discount, and the overall discount always
//! applies after the line discounts. Sums and products that would overflow
//! `Decimal` saturate at `Decimal::MAX` and log a warning.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use pricing_core::{Discount, PriceLine, PriceSelection};
//! use pricing_core::calculations::PriceCalculator;
//!
//! let selection = PriceSelection {
//!     include_package: true,
//!     package_line: Some(
//!         PriceLine::new("growth", dec!(15000)).with_discount(Discount::percentage(dec!(10))),
//!     ),
//!     service_lines: vec![PriceLine::new("seo", dec!(5000))],
//!     overall_discount: Discount::none(),
//!     tax_enabled: true,
//!     tax_rate: dec!(0.05),
//! };
//!
//! let breakdown = PriceCalculator::new().calculate(&selection);
//!
//! assert_eq!(breakdown.subtotal, dec!(18500));
//! assert_eq!(breakdown.tax_amount, dec!(925));
//! assert_eq!(breakdown.total, dec!(19425));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::{floor_at_zero, saturating_add, saturating_mul, saturating_sum};
use crate::calculations::discount::apply_discount;
use crate::models::{Discount, LineAmount, PriceBreakdown, PriceLine, PriceSelection};

/// Stateless proposal price calculator.
///
/// Holds no cache: a breakdown is computed fresh on every call so it always
/// reflects the selection it was given.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceCalculator;

impl PriceCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Calculates the full price breakdown for `selection`.
    ///
    /// The package line is left out of `lines` when `include_package` is false
    /// or no package is selected.
    pub fn calculate(
        &self,
        selection: &PriceSelection,
    ) -> PriceBreakdown {
        let mut lines = Vec::with_capacity(selection.service_lines.len() + 1);

        // Step 1: Package
        if let Some(package) = self.included_package(selection) {
            lines.push(self.line_amount(package));
        }

        // Step 2: Services
        lines.extend(
            selection
                .service_lines
                .iter()
                .map(|service| self.line_amount(service)),
        );

        // Step 3: Subtotal
        let subtotal = self.subtotal(&lines);

        // Steps 4 and 5: Overall discount against the discounted subtotal
        let overall_discount_amount =
            self.overall_discount_amount(subtotal, &selection.overall_discount);
        let subtotal_after_overall_discount = subtotal - overall_discount_amount;

        // Step 6: Tax
        let tax_amount = self.tax_amount(
            subtotal_after_overall_discount,
            selection.tax_enabled,
            selection.tax_rate,
        );

        // Step 7: Total
        let total = saturating_add(subtotal_after_overall_discount, tax_amount, "total");

        // Step 8: Recurring fees
        let recurring_fees = self.recurring_fees(&selection.service_lines);

        debug!(
            lines = lines.len(),
            subtotal = %subtotal,
            overall_discount = %overall_discount_amount,
            tax = %tax_amount,
            total = %total,
            recurring_fees = %recurring_fees,
            "Calculated proposal price"
        );

        PriceBreakdown {
            lines,
            subtotal,
            overall_discount_amount,
            subtotal_after_overall_discount,
            tax_amount,
            total,
            recurring_fees,
        }
    }

    fn included_package<'a>(
        &self,
        selection: &'a PriceSelection,
    ) -> Option<&'a PriceLine> {
        if selection.include_package {
            selection.package_line.as_ref()
        } else {
            None
        }
    }

    fn line_amount(
        &self,
        line: &PriceLine,
    ) -> LineAmount {
        LineAmount {
            id: line.id.clone(),
            original_amount: floor_at_zero(line.base_amount),
            discounted_amount: apply_discount(line.base_amount, &line.discount),
        }
    }

    fn subtotal(
        &self,
        lines: &[LineAmount],
    ) -> Decimal {
        saturating_sum(lines.iter().map(|line| line.discounted_amount), "subtotal")
    }

    fn overall_discount_amount(
        &self,
        subtotal: Decimal,
        overall_discount: &Discount,
    ) -> Decimal {
        subtotal - apply_discount(subtotal, overall_discount)
    }

    fn tax_amount(
        &self,
        taxable: Decimal,
        tax_enabled: bool,
        tax_rate: Decimal,
    ) -> Decimal {
        if !tax_enabled {
            return Decimal::ZERO;
        }

        if tax_rate < Decimal::ZERO {
            warn!(tax_rate = %tax_rate, "Negative tax rate; no tax applied");
            return Decimal::ZERO;
        }

        saturating_mul(taxable, tax_rate, "tax")
    }

    fn recurring_fees(
        &self,
        services: &[PriceLine],
    ) -> Decimal {
        let fees = services.iter().map(|service| {
            if service.recurring_fee < Decimal::ZERO {
                warn!(
                    service = %service.id,
                    recurring_fee = %service.recurring_fee,
                    "Negative recurring fee; treating as zero"
                );
            }
            floor_at_zero(service.recurring_fee)
        });
        saturating_sum(fees, "recurring_fees")
    }
}

/// Calculates a price breakdown with the default [`PriceCalculator`].
pub fn calculate_breakdown(selection: &PriceSelection) -> PriceBreakdown {
    PriceCalculator::new().calculate(selection)
}
