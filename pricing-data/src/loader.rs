//! CSV loader for the package and service catalog.
//!
//! Headers are matched by name, so column order does not matter. Amounts
//! accept a comma as thousands separator (quote the cell: `"15,000.00"`).
//!
//! ## Packages (`packages.csv`)
//!
//! | Column     | Required | Notes |
//! |------------|----------|-------|
//! | `id`       | yes      | Unique package id |
//! | `name`     | yes      | |
//! | `price`    | yes      | One-time package price |
//! | `features` | no       | Features separated by `;` |
//!
//! ## Services (`services.csv`)
//!
//! | Column          | Required | Notes |
//! |-----------------|----------|-------|
//! | `id`            | yes      | Unique service id |
//! | `name`          | yes      | |
//! | `price`         | yes      | One-time price, or setup fee for monthly services |
//! | `billing`       | yes      | `one_time` or `monthly` |
//! | `recurring_fee` | no       | Monthly charge; empty means 0 |
//!
//! ```csv
//! id,name,price,billing,recurring_fee
//! seo,SEO Optimisation,5000,one_time,
//! social,Social Media Management,1000,monthly,2500
//! ```

use std::collections::HashSet;
use std::io::Read;

use pricing_core::{BillingCycle, Package, Service};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading catalog data.
#[derive(Debug, Error)]
pub enum CatalogLoaderError {
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("invalid amount '{value}' in column '{column}' on row {row}")]
    InvalidAmount {
        column: &'static str,
        value: String,
        row: usize,
    },

    #[error("negative amount '{value}' in column '{column}' on row {row}")]
    NegativeAmount {
        column: &'static str,
        value: Decimal,
        row: usize,
    },

    #[error("unrecognised billing cycle '{billing}' on row {row}")]
    InvalidBilling { billing: String, row: usize },

    #[error("duplicate id '{id}' on row {row}")]
    DuplicateId { id: String, row: usize },
}

#[derive(Debug, Deserialize)]
struct PackageRow {
    id: String,
    name: String,
    price: String,
    #[serde(default)]
    features: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ServiceRow {
    id: String,
    name: String,
    price: String,
    billing: String,
    #[serde(default)]
    recurring_fee: Option<String>,
}

/// Parses an amount cell, tolerating thousands separators. An empty cell is 0.
fn parse_amount(
    column: &'static str,
    value: &str,
    row: usize,
) -> Result<Decimal, CatalogLoaderError> {
    let normalized = value.trim().replace(',', "");
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let amount: Decimal = normalized
        .parse()
        .map_err(|_| CatalogLoaderError::InvalidAmount {
            column,
            value: value.to_string(),
            row,
        })?;

    if amount < Decimal::ZERO {
        return Err(CatalogLoaderError::NegativeAmount {
            column,
            value: amount,
            row,
        });
    }
    Ok(amount)
}

fn split_features(features: Option<String>) -> Vec<String> {
    features
        .unwrap_or_default()
        .split(';')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect()
}

fn check_unique(
    seen: &mut HashSet<String>,
    id: &str,
    row: usize,
) -> Result<(), CatalogLoaderError> {
    if seen.insert(id.to_string()) {
        Ok(())
    } else {
        Err(CatalogLoaderError::DuplicateId {
            id: id.to_string(),
            row,
        })
    }
}

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input)
}

/// Loader for catalog CSV files.
///
/// Rows are returned in file order; row numbers in errors are 1-based with
/// the header excluded.
pub struct CatalogLoader;

impl CatalogLoader {
    pub fn parse_packages<R: Read>(input: R) -> Result<Vec<Package>, CatalogLoaderError> {
        let mut seen = HashSet::new();

        reader(input)
            .deserialize::<PackageRow>()
            .enumerate()
            .map(|(idx, result)| {
                let row = result?;
                let row_number = idx + 1;
                check_unique(&mut seen, &row.id, row_number)?;

                Ok(Package {
                    price: parse_amount("price", &row.price, row_number)?,
                    features: split_features(row.features),
                    id: row.id,
                    name: row.name,
                })
            })
            .collect()
    }

    pub fn parse_services<R: Read>(input: R) -> Result<Vec<Service>, CatalogLoaderError> {
        let mut seen = HashSet::new();

        reader(input)
            .deserialize::<ServiceRow>()
            .enumerate()
            .map(|(idx, result)| {
                let row = result?;
                let row_number = idx + 1;
                check_unique(&mut seen, &row.id, row_number)?;

                let billing = BillingCycle::parse(&row.billing).ok_or_else(|| {
                    CatalogLoaderError::InvalidBilling {
                        billing: row.billing.clone(),
                        row: row_number,
                    }
                })?;
                let recurring_fee = parse_amount(
                    "recurring_fee",
                    row.recurring_fee.as_deref().unwrap_or_default(),
                    row_number,
                )?;

                Ok(Service {
                    price: parse_amount("price", &row.price, row_number)?,
                    billing,
                    recurring_fee,
                    id: row.id,
                    name: row.name,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const PACKAGES_CSV: &str = "\
id,name,price,features
starter,Starter,\"7,500.00\",Logo refresh; Two social templates
growth,Growth,15000,Brand audit;Content calendar;Monthly report
enterprise,Enterprise,42000,
";

    const SERVICES_CSV: &str = "\
id,name,price,billing,recurring_fee
seo,SEO Optimisation,5000,one_time,
social,Social Media Management,1000,monthly,2500
";

    #[test]
    fn parses_packages_in_file_order() {
        let packages = CatalogLoader::parse_packages(PACKAGES_CSV.as_bytes()).unwrap();

        let ids: Vec<_> = packages.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["starter", "growth", "enterprise"]);
    }

    #[test]
    fn package_price_accepts_thousands_separator() {
        let packages = CatalogLoader::parse_packages(PACKAGES_CSV.as_bytes()).unwrap();

        assert_eq!(packages[0].price, dec!(7500.00));
    }

    #[test]
    fn package_features_are_split_and_trimmed() {
        let packages = CatalogLoader::parse_packages(PACKAGES_CSV.as_bytes()).unwrap();

        assert_eq!(
            packages[0].features,
            vec!["Logo refresh".to_string(), "Two social templates".to_string()]
        );
        assert_eq!(packages[1].features.len(), 3);
        assert!(packages[2].features.is_empty());
    }

    #[test]
    fn parses_services_with_billing_cycles() {
        let services = CatalogLoader::parse_services(SERVICES_CSV.as_bytes()).unwrap();

        assert_eq!(services.len(), 2);
        assert_eq!(services[0].billing, BillingCycle::OneTime);
        assert_eq!(services[0].recurring_fee, dec!(0));
        assert_eq!(services[1].billing, BillingCycle::Monthly);
        assert_eq!(services[1].price, dec!(1000));
        assert_eq!(services[1].recurring_fee, dec!(2500));
    }

    #[test]
    fn rejects_unknown_billing_cycle() {
        let csv = "id,name,price,billing,recurring_fee\nseo,SEO,5000,weekly,\n";

        let result = CatalogLoader::parse_services(csv.as_bytes());

        assert!(matches!(
            result,
            Err(CatalogLoaderError::InvalidBilling { ref billing, row: 1 }) if billing == "weekly"
        ));
    }

    #[test]
    fn rejects_unparseable_price() {
        let csv = "id,name,price\ngrowth,Growth,fifteen\n";

        let result = CatalogLoader::parse_packages(csv.as_bytes());

        assert!(matches!(
            result,
            Err(CatalogLoaderError::InvalidAmount { column: "price", row: 1, .. })
        ));
    }

    #[test]
    fn rejects_negative_price() {
        let csv = "id,name,price,billing\nseo,SEO,-5,one_time\n";

        let result = CatalogLoader::parse_services(csv.as_bytes());

        assert!(matches!(
            result,
            Err(CatalogLoaderError::NegativeAmount { column: "price", .. })
        ));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let csv = "id,name,price\ngrowth,Growth,15000\ngrowth,Growth again,16000\n";

        let result = CatalogLoader::parse_packages(csv.as_bytes());

        assert!(matches!(
            result,
            Err(CatalogLoaderError::DuplicateId { ref id, row: 2 }) if id == "growth"
        ));
    }

    #[test]
    fn missing_required_column_is_a_parse_error() {
        let csv = "id,name\ngrowth,Growth\n";

        let result = CatalogLoader::parse_packages(csv.as_bytes());

        assert!(matches!(result, Err(CatalogLoaderError::Parse(_))));
    }
}
