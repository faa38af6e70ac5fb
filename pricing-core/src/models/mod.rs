mod catalog;
mod discount;
mod price_breakdown;
mod price_selection;
mod proposal;

pub use catalog::{BillingCycle, Package, Service};
pub use discount::{Discount, DiscountKind};
pub use price_breakdown::{LineAmount, PriceBreakdown};
pub use price_selection::{DEFAULT_TAX_RATE, PriceLine, PriceSelection};
pub use proposal::{DiscountSettings, ProposalSettings};
