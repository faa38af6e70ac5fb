//! Invoice drafts for accepted proposals.
//!
//! An invoice copies its amounts from the proposal's [`PriceBreakdown`]; it
//! never prices anything itself, so an invoice always matches the proposal the
//! client accepted.

use std::sync::LazyLock;

use chrono::{Days, NaiveDate};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::PriceBreakdown;

/// Payment terms used when a proposal does not specify any.
pub const DEFAULT_PAYMENT_TERMS_DAYS: u32 = 30;

static INVOICE_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z0-9]+(-[A-Z0-9]+)*$").expect("invoice number pattern is valid")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvoiceError {
    #[error("invalid invoice number '{0}': expected upper-case letters, digits and dashes")]
    InvalidNumber(String),

    #[error("client name must not be empty")]
    MissingClient,

    #[error("due date out of range: {issue_date} + {days} days")]
    DueDateOutOfRange { issue_date: NaiveDate, days: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub id: String,
    pub original_amount: Decimal,
    pub discounted_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    pub number: String,
    pub client_name: String,
    pub currency: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub lines: Vec<InvoiceLine>,
    pub subtotal: Decimal,
    pub overall_discount_amount: Decimal,
    pub subtotal_after_overall_discount: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
    pub recurring_fees: Decimal,
}

impl InvoiceDraft {
    /// Creates an invoice draft from the breakdown of an accepted proposal.
    ///
    /// # Errors
    ///
    /// Returns [`InvoiceError`] when the invoice number is malformed, the
    /// client name is blank, or the due date cannot be represented.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use rust_decimal_macros::dec;
    /// use pricing_core::{PriceLine, PriceSelection};
    /// use pricing_core::calculations::{InvoiceDraft, calculate_breakdown};
    ///
    /// let selection = PriceSelection {
    ///     package_line: Some(PriceLine::new("growth", dec!(15000))),
    ///     ..PriceSelection::default()
    /// };
    /// let breakdown = calculate_breakdown(&selection);
    /// let issued = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    ///
    /// let invoice =
    ///     InvoiceDraft::from_breakdown("INV-0001", "Acme", issued, 30, &breakdown, "AED").unwrap();
    ///
    /// assert_eq!(invoice.total, dec!(15000));
    /// assert_eq!(invoice.due_date, NaiveDate::from_ymd_opt(2026, 3, 31).unwrap());
    /// ```
    pub fn from_breakdown(
        number: &str,
        client_name: &str,
        issue_date: NaiveDate,
        payment_terms_days: u32,
        breakdown: &PriceBreakdown,
        currency: &str,
    ) -> Result<Self, InvoiceError> {
        if !INVOICE_NUMBER.is_match(number) {
            return Err(InvoiceError::InvalidNumber(number.to_string()));
        }
        let client_name = client_name.trim();
        if client_name.is_empty() {
            return Err(InvoiceError::MissingClient);
        }
        let due_date = issue_date
            .checked_add_days(Days::new(u64::from(payment_terms_days)))
            .ok_or(InvoiceError::DueDateOutOfRange {
                issue_date,
                days: payment_terms_days,
            })?;

        Ok(Self {
            number: number.to_string(),
            client_name: client_name.to_string(),
            currency: currency.to_string(),
            issue_date,
            due_date,
            lines: breakdown
                .lines
                .iter()
                .map(|line| InvoiceLine {
                    id: line.id.clone(),
                    original_amount: line.original_amount,
                    discounted_amount: line.discounted_amount,
                })
                .collect(),
            subtotal: breakdown.subtotal,
            overall_discount_amount: breakdown.overall_discount_amount,
            subtotal_after_overall_discount: breakdown.subtotal_after_overall_discount,
            tax_amount: breakdown.tax_amount,
            total: breakdown.total,
            recurring_fees: breakdown.recurring_fees,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::LineAmount;

    fn breakdown() -> PriceBreakdown {
        PriceBreakdown {
            lines: vec![LineAmount {
                id: "growth".to_string(),
                original_amount: dec!(15000),
                discounted_amount: dec!(13500),
            }],
            subtotal: dec!(13500),
            overall_discount_amount: dec!(500),
            subtotal_after_overall_discount: dec!(13000),
            tax_amount: dec!(650),
            total: dec!(13650),
            recurring_fees: dec!(2500),
        }
    }

    fn date(
        y: i32,
        m: u32,
        d: u32,
    ) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn copies_amounts_from_breakdown() {
        let invoice = InvoiceDraft::from_breakdown(
            "INV-2026-0042",
            "Acme Trading LLC",
            date(2026, 1, 15),
            DEFAULT_PAYMENT_TERMS_DAYS,
            &breakdown(),
            "AED",
        )
        .unwrap();

        assert_eq!(invoice.subtotal, dec!(13500));
        assert_eq!(invoice.subtotal_after_overall_discount, dec!(13000));
        assert_eq!(invoice.overall_discount_amount, dec!(500));
        assert_eq!(invoice.tax_amount, dec!(650));
        assert_eq!(invoice.total, dec!(13650));
        assert_eq!(invoice.recurring_fees, dec!(2500));
        assert_eq!(invoice.lines.len(), 1);
        assert_eq!(invoice.lines[0].discounted_amount, dec!(13500));
        assert_eq!(invoice.currency, "AED");
    }

    #[test]
    fn due_date_adds_payment_terms() {
        let invoice = InvoiceDraft::from_breakdown(
            "INV-7",
            "Acme",
            date(2026, 12, 15),
            30,
            &breakdown(),
            "AED",
        )
        .unwrap();

        assert_eq!(invoice.due_date, date(2027, 1, 14));
    }

    #[test]
    fn zero_payment_terms_are_due_on_issue() {
        let invoice =
            InvoiceDraft::from_breakdown("INV-8", "Acme", date(2026, 2, 1), 0, &breakdown(), "AED")
                .unwrap();

        assert_eq!(invoice.due_date, invoice.issue_date);
    }

    #[test]
    fn rejects_malformed_number() {
        let result = InvoiceDraft::from_breakdown(
            "inv 01",
            "Acme",
            date(2026, 2, 1),
            30,
            &breakdown(),
            "AED",
        );

        assert_eq!(result, Err(InvoiceError::InvalidNumber("inv 01".to_string())));
    }

    #[test]
    fn rejects_trailing_dash() {
        let result =
            InvoiceDraft::from_breakdown("INV-", "Acme", date(2026, 2, 1), 30, &breakdown(), "AED");

        assert!(matches!(result, Err(InvoiceError::InvalidNumber(_))));
    }

    #[test]
    fn rejects_blank_client() {
        let result =
            InvoiceDraft::from_breakdown("INV-9", "   ", date(2026, 2, 1), 30, &breakdown(), "AED");

        assert_eq!(result, Err(InvoiceError::MissingClient));
    }

    #[test]
    fn trims_client_name() {
        let invoice = InvoiceDraft::from_breakdown(
            "INV-10",
            "  Acme  ",
            date(2026, 2, 1),
            30,
            &breakdown(),
            "AED",
        )
        .unwrap();

        assert_eq!(invoice.client_name, "Acme");
    }

    #[test]
    fn due_date_overflow_is_an_error() {
        let result = InvoiceDraft::from_breakdown(
            "INV-11",
            "Acme",
            NaiveDate::MAX,
            1,
            &breakdown(),
            "AED",
        );

        assert_eq!(
            result,
            Err(InvoiceError::DueDateOutOfRange {
                issue_date: NaiveDate::MAX,
                days: 1,
            })
        );
    }
}
