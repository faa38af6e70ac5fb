use std::fmt;

use pricing_core::PriceBreakdown;
use pricing_core::calculations::InvoiceDraft;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::format::format_money;

/// A priced proposal ready to print, optionally with its invoice draft.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteReport {
    pub client_name: String,
    pub currency: String,
    pub breakdown: PriceBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice: Option<InvoiceDraft>,
}

impl QuoteReport {
    fn money(
        &self,
        amount: Decimal,
    ) -> String {
        format_money(amount, &self.currency)
    }
}

impl fmt::Display for QuoteReport {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let b = &self.breakdown;

        writeln!(f, "Client:             {}", self.client_name)?;
        for line in &b.lines {
            if line.discount_amount().is_zero() {
                writeln!(f, "  {:<18}{:>20}", line.id, self.money(line.discounted_amount))?;
            } else {
                writeln!(
                    f,
                    "  {:<18}{:>20}  (was {})",
                    line.id,
                    self.money(line.discounted_amount),
                    self.money(line.original_amount)
                )?;
            }
        }
        writeln!(f, "Subtotal:           {:>20}", self.money(b.subtotal))?;
        writeln!(f, "Overall discount:   {:>20}", self.money(b.overall_discount_amount))?;
        writeln!(f, "After discount:     {:>20}", self.money(b.subtotal_after_overall_discount))?;
        writeln!(f, "Tax:                {:>20}", self.money(b.tax_amount))?;
        write!(f, "Total:              {:>20}", self.money(b.total))?;
        if !b.recurring_fees.is_zero() {
            write!(f, "\nMonthly fees:       {:>20}", self.money(b.recurring_fees))?;
        }

        if let Some(invoice) = &self.invoice {
            write!(
                f,
                "\nInvoice {} issued {} due {}",
                invoice.number, invoice.issue_date, invoice.due_date
            )?;
        }
        Ok(())
    }
}
