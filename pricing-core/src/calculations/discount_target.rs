//! Editing the discounts of a proposal.
//!
//! A discount field in a proposal form belongs to exactly one
//! [`DiscountTarget`]. Edits are resolved against that target once, so an
//! edit can only ever reach the package, a named service, or the overall
//! discount.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::discount::{clamp_discount_value, convert_discount_type};
use crate::calculations::price_calculator::calculate_breakdown;
use crate::models::{Discount, DiscountKind, DiscountSettings, PriceSelection};

/// The line a discount belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "target", content = "id", rename_all = "snake_case")]
pub enum DiscountTarget {
    Package,
    Service(String),
    Overall,
}

impl fmt::Display for DiscountTarget {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Package => write!(f, "package"),
            Self::Service(id) => write!(f, "service:{id}"),
            Self::Overall => write!(f, "overall"),
        }
    }
}

/// A single change made to a discount field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountEdit {
    /// A new value was typed; the kind stays as it is.
    SetValue(Decimal),
    /// The kind toggle was switched; the value is converted.
    SetKind(DiscountKind),
}

impl DiscountSettings {
    /// Current discount for `target`.
    pub fn discount(
        &self,
        target: &DiscountTarget,
    ) -> Discount {
        match target {
            DiscountTarget::Package => self.package.clone(),
            DiscountTarget::Service(id) => self.services.get(id).cloned().unwrap_or_default(),
            DiscountTarget::Overall => self.overall.clone(),
        }
    }

    /// Applies `edit` to the discount of `target` and returns the stored result.
    ///
    /// `base_amount` is the amount the discount is measured against: the line
    /// price for package and service targets, the discounted subtotal for the
    /// overall target. It is only used when the kind changes.
    pub fn apply_edit(
        &mut self,
        target: &DiscountTarget,
        edit: DiscountEdit,
        base_amount: Decimal,
    ) -> Discount {
        let current = self.discount(target);

        let updated = match edit {
            DiscountEdit::SetValue(value) => {
                let clamped = clamp_discount_value(current.kind, value);
                if clamped != value {
                    warn!(
                        discount_target = %target,
                        value = %value,
                        clamped = %clamped,
                        "Discount input out of range; clamping"
                    );
                }
                Discount {
                    kind: current.kind,
                    value: clamped,
                }
            }
            DiscountEdit::SetKind(kind) => convert_discount_type(&current, base_amount, kind),
        };

        debug!(
            discount_target = %target,
            kind = updated.kind.as_str(),
            value = %updated.value,
            "Discount updated"
        );
        self.set(target, updated.clone());
        updated
    }

    /// The amount a discount on `target` is measured against in `selection`.
    ///
    /// Unknown services and a missing package measure against zero.
    pub fn base_amount_for(
        target: &DiscountTarget,
        selection: &PriceSelection,
    ) -> Decimal {
        match target {
            DiscountTarget::Package => selection
                .package_line
                .as_ref()
                .map_or(Decimal::ZERO, |line| line.base_amount),
            DiscountTarget::Service(id) => selection
                .service_lines
                .iter()
                .find(|line| &line.id == id)
                .map_or(Decimal::ZERO, |line| line.base_amount),
            DiscountTarget::Overall => calculate_breakdown(selection).subtotal,
        }
    }

    fn set(
        &mut self,
        target: &DiscountTarget,
        discount: Discount,
    ) {
        match target {
            DiscountTarget::Package => self.package = discount,
            DiscountTarget::Service(id) => {
                self.services.insert(id.clone(), discount);
            }
            DiscountTarget::Overall => self.overall = discount,
        }
    }
}
