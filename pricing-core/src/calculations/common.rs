//! Common helpers for pricing calculations.
//!
//! Rounding lives here so every surface rounds money the same way. Rounding
//! is only applied at output boundaries, never between calculation steps.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;

/// Largest percentage a discount can take.
pub const MAX_PERCENTAGE: Decimal = Decimal::ONE_HUNDRED;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use pricing_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `value`, or zero when `value` is negative.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use pricing_core::calculations::common::floor_at_zero;
///
/// assert_eq!(floor_at_zero(dec!(12.50)), dec!(12.50));
/// assert_eq!(floor_at_zero(dec!(-3)), dec!(0));
/// ```
pub fn floor_at_zero(value: Decimal) -> Decimal {
    if value < Decimal::ZERO { Decimal::ZERO } else { value }
}

/// Clamps a percentage into `[0, 100]`.
pub fn clamp_percentage(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, MAX_PERCENTAGE)
}

/// Adds two amounts, saturating at the `Decimal` bounds instead of panicking.
///
/// `quantity` names the amount being accumulated in the overflow warning.
pub fn saturating_add(
    lhs: Decimal,
    rhs: Decimal,
    quantity: &'static str,
) -> Decimal {
    lhs.checked_add(rhs).unwrap_or_else(|| {
        warn!(quantity, lhs = %lhs, rhs = %rhs, "Amount overflowed; saturating");
        saturated(lhs.is_sign_negative())
    })
}

/// Multiplies two amounts, saturating at the `Decimal` bounds instead of panicking.
pub fn saturating_mul(
    lhs: Decimal,
    rhs: Decimal,
    quantity: &'static str,
) -> Decimal {
    lhs.checked_mul(rhs).unwrap_or_else(|| {
        warn!(quantity, lhs = %lhs, rhs = %rhs, "Amount overflowed; saturating");
        saturated(lhs.is_sign_negative() != rhs.is_sign_negative())
    })
}

/// Sums amounts with [`saturating_add`].
pub fn saturating_sum<I>(
    amounts: I,
    quantity: &'static str,
) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |acc, amount| saturating_add(acc, amount, quantity))
}

fn saturated(negative: bool) -> Decimal {
    if negative { Decimal::MIN } else { Decimal::MAX }
}
