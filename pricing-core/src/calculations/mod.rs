//! Pricing calculations for proposals and invoices.
//!
//! The discount resolver and the price calculator are pure; the selection
//! builder is the only part that talks to a catalog, and only to fetch
//! records before pricing.

pub mod common;
pub mod discount;
pub mod discount_target;
pub mod invoice;
pub mod price_calculator;
pub mod selection;

pub use discount::{apply_discount, convert_discount_type, discount_amount};
pub use discount_target::{DiscountEdit, DiscountTarget};
pub use invoice::{DEFAULT_PAYMENT_TERMS_DAYS, InvoiceDraft, InvoiceError, InvoiceLine};
pub use price_calculator::{PriceCalculator, calculate_breakdown};
pub use selection::SelectionBuilder;
