pub mod catalog;
pub mod format;
pub mod loader;
pub mod proposal_file;
pub mod report;

pub use catalog::InMemoryCatalog;
pub use loader::{CatalogLoader, CatalogLoaderError};
pub use proposal_file::{PricingConfig, ProposalFile, ProposalFileError};
pub use report::QuoteReport;
