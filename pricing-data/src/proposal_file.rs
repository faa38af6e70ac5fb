//! Proposal settings files.
//!
//! A proposal file is TOML with a required `[proposal]` table holding the
//! saved inputs of one proposal and an optional `[pricing]` table.
//!
//! ```toml
//! [proposal]
//! client_name = "Acme Trading LLC"
//! package_id = "growth"
//! service_ids = ["seo", "social"]
//! tax_enabled = true
//!
//! [proposal.discounts.package]
//! type = "percentage"
//! value = 10
//!
//! [proposal.discounts.services.seo]
//! type = "absolute"
//! value = 250
//!
//! [pricing]
//! tax_rate = "0.05"
//! currency = "AED"
//! payment_terms_days = 30
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use pricing_core::calculations::DEFAULT_PAYMENT_TERMS_DAYS;
use pricing_core::{DEFAULT_TAX_RATE, ProposalSettings};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProposalFileError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid proposal file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("tax rate must be between 0 and 1, got {0}")]
    InvalidTaxRate(Decimal),
}

/// Pricing parameters shared by every proposal priced from one file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub tax_rate: Decimal,
    pub currency: String,
    pub payment_terms_days: u32,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tax_rate: DEFAULT_TAX_RATE,
            currency: "AED".to_string(),
            payment_terms_days: DEFAULT_PAYMENT_TERMS_DAYS,
        }
    }
}

impl PricingConfig {
    pub fn validate(&self) -> Result<(), ProposalFileError> {
        if self.tax_rate < Decimal::ZERO || self.tax_rate > Decimal::ONE {
            return Err(ProposalFileError::InvalidTaxRate(self.tax_rate));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProposalFile {
    pub proposal: ProposalSettings,
    #[serde(default)]
    pub pricing: PricingConfig,
}

impl ProposalFile {
    pub fn load(path: &Path) -> Result<Self, ProposalFileError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ProposalFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        contents.parse()
    }
}

impl FromStr for ProposalFile {
    type Err = ProposalFileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let file: ProposalFile = toml::from_str(s)?;
        file.pricing.validate()?;
        Ok(file)
    }
}
