//! Discount resolution.
//!
//! Turns a `(base_amount, discount)` pair into the discounted amount, and
//! converts a discount between percentage and absolute form against a base
//! amount while keeping the effective deduction the same.
//!
//! Nothing here fails. Out-of-range input is clamped the way a pricing form
//! would clamp it: a percentage of 150 acts as 100, a negative value acts as
//! zero, and an absolute discount larger than its base drives the line to
//! zero rather than below it.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use pricing_core::Discount;
//! use pricing_core::calculations::discount::apply_discount;
//!
//! assert_eq!(apply_discount(dec!(15000), &Discount::percentage(dec!(10))), dec!(13500));
//! assert_eq!(apply_discount(dec!(1000), &Discount::absolute(dec!(1500))), dec!(0));
//! ```

use rust_decimal::Decimal;
use tracing::warn;

use crate::calculations::common::{MAX_PERCENTAGE, clamp_percentage, floor_at_zero, round_half_up};
use crate::models::{Discount, DiscountKind};

/// Applies `discount` to `base_amount` and returns the discounted amount.
///
/// The result is always within `[0, base_amount]`. A negative base amount is
/// treated as zero.
pub fn apply_discount(
    base_amount: Decimal,
    discount: &Discount,
) -> Decimal {
    let base = non_negative_base(base_amount);
    if base.is_zero() {
        return Decimal::ZERO;
    }

    let value = clamped_value(discount);
    match discount.kind {
        DiscountKind::Percentage => base * (Decimal::ONE - value / MAX_PERCENTAGE),
        DiscountKind::Absolute => floor_at_zero(base - value),
    }
}

/// Amount deducted from `base_amount` by `discount`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use pricing_core::Discount;
/// use pricing_core::calculations::discount::discount_amount;
///
/// assert_eq!(discount_amount(dec!(5000), &Discount::percentage(dec!(5))), dec!(250));
/// ```
pub fn discount_amount(
    base_amount: Decimal,
    discount: &Discount,
) -> Decimal {
    non_negative_base(base_amount) - apply_discount(base_amount, discount)
}

/// Re-expresses `discount` as `target` relative to `base_amount`.
///
/// The converted value is rounded to two decimal places. Converting an
/// absolute discount to a percentage against a zero base yields 0%, and one
/// that covers the whole base yields 100% however large it is.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use pricing_core::{Discount, DiscountKind};
/// use pricing_core::calculations::discount::convert_discount_type;
///
/// let absolute = convert_discount_type(
///     &Discount::percentage(dec!(10)),
///     dec!(15000),
///     DiscountKind::Absolute,
/// );
/// assert_eq!(absolute, Discount::absolute(dec!(1500)));
///
/// let percentage = convert_discount_type(&absolute, dec!(15000), DiscountKind::Percentage);
/// assert_eq!(percentage, Discount::percentage(dec!(10)));
/// ```
pub fn convert_discount_type(
    discount: &Discount,
    base_amount: Decimal,
    target: DiscountKind,
) -> Discount {
    let base = non_negative_base(base_amount);
    let value = clamped_value(discount);

    let converted = match (discount.kind, target) {
        (DiscountKind::Percentage, DiscountKind::Absolute) => (value / MAX_PERCENTAGE)
            .checked_mul(base)
            .unwrap_or(base),
        (DiscountKind::Absolute, DiscountKind::Percentage) => {
            if base.is_zero() {
                Decimal::ZERO
            } else if value >= base {
                MAX_PERCENTAGE
            } else {
                value
                    .checked_div(base)
                    .and_then(|ratio| ratio.checked_mul(MAX_PERCENTAGE))
                    .map_or(MAX_PERCENTAGE, |percentage| percentage.min(MAX_PERCENTAGE))
            }
        }
        _ => value,
    };

    Discount {
        kind: target,
        value: round_half_up(converted),
    }
}

/// Clamps a raw discount input into the domain valid for `kind`.
///
/// Used when a value is typed into a discount field so the stored value is
/// the same one that will be applied.
pub fn clamp_discount_value(
    kind: DiscountKind,
    value: Decimal,
) -> Decimal {
    match kind {
        DiscountKind::Percentage => clamp_percentage(value),
        DiscountKind::Absolute => floor_at_zero(value),
    }
}

fn clamped_value(discount: &Discount) -> Decimal {
    let clamped = clamp_discount_value(discount.kind, discount.value);
    if clamped != discount.value {
        warn!(
            kind = discount.kind.as_str(),
            value = %discount.value,
            clamped = %clamped,
            "Discount value out of range; clamping"
        );
    }
    clamped
}

fn non_negative_base(base_amount: Decimal) -> Decimal {
    if base_amount < Decimal::ZERO {
        warn!(
            base_amount = %base_amount,
            "Negative base amount; treating as zero"
        );
        return Decimal::ZERO;
    }
    base_amount
}
