//! Mapping catalog records and saved proposal settings into a
//! [`PriceSelection`].

use rust_decimal::Decimal;
use tracing::debug;

use crate::db::repository::{CatalogRepository, RepositoryError};
use crate::models::{
    DiscountSettings, Package, PriceLine, PriceSelection, ProposalSettings, Service,
};

pub struct SelectionBuilder;

impl SelectionBuilder {
    pub fn package_line(
        package: &Package,
        discounts: &DiscountSettings,
    ) -> PriceLine {
        PriceLine::new(package.id.clone(), package.price).with_discount(discounts.package.clone())
    }

    /// Builds the line for a service. Only monthly services carry a recurring
    /// fee into the selection.
    pub fn service_line(
        service: &Service,
        discounts: &DiscountSettings,
    ) -> PriceLine {
        let discount = discounts
            .services
            .get(&service.id)
            .cloned()
            .unwrap_or_default();
        let recurring_fee = if service.is_recurring() {
            service.recurring_fee
        } else {
            Decimal::ZERO
        };

        PriceLine::new(service.id.clone(), service.price)
            .with_discount(discount)
            .with_recurring_fee(recurring_fee)
    }

    /// Builds a selection from already-fetched records.
    ///
    /// `services` are priced in the order given.
    pub fn build(
        package: Option<&Package>,
        services: &[Service],
        settings: &ProposalSettings,
        tax_rate: Decimal,
    ) -> PriceSelection {
        PriceSelection {
            include_package: settings.include_package,
            package_line: package.map(|p| Self::package_line(p, &settings.discounts)),
            service_lines: services
                .iter()
                .map(|s| Self::service_line(s, &settings.discounts))
                .collect(),
            overall_discount: settings.discounts.overall.clone(),
            tax_enabled: settings.tax_enabled,
            tax_rate,
        }
    }

    /// Fetches the package and services named in `settings` and builds a
    /// selection from them.
    ///
    /// The package is fetched even when it is toggled off so that the
    /// selection keeps it for re-inclusion.
    ///
    /// # Errors
    ///
    /// Returns the repository error of the first record that cannot be
    /// fetched.
    pub async fn resolve(
        repo: &dyn CatalogRepository,
        settings: &ProposalSettings,
        tax_rate: Decimal,
    ) -> Result<PriceSelection, RepositoryError> {
        let package = match &settings.package_id {
            Some(id) => Some(repo.get_package(id).await?),
            None => None,
        };

        let mut services = Vec::with_capacity(settings.service_ids.len());
        for id in &settings.service_ids {
            services.push(repo.get_service(id).await?);
        }

        debug!(
            client = %settings.client_name,
            package = ?settings.package_id,
            services = services.len(),
            "Resolved proposal selection"
        );

        Ok(Self::build(package.as_ref(), &services, settings, tax_rate))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::price_calculator::calculate_breakdown;
    use crate::models::{BillingCycle, DEFAULT_TAX_RATE, Discount};

    struct FixedCatalog {
        packages: Vec<Package>,
        services: Vec<Service>,
    }

    #[async_trait]
    impl CatalogRepository for FixedCatalog {
        async fn get_package(
            &self,
            id: &str,
        ) -> Result<Package, RepositoryError> {
            self.packages
                .iter()
                .find(|p| p.id == id)
                .cloned()
                .ok_or_else(|| RepositoryError::NotFound(format!("package '{id}'")))
        }

        async fn list_packages(&self) -> Result<Vec<Package>, RepositoryError> {
            Ok(self.packages.clone())
        }

        async fn get_service(
            &self,
            id: &str,
        ) -> Result<Service, RepositoryError> {
            self.services
                .iter()
                .find(|s| s.id == id)
                .cloned()
                .ok_or_else(|| RepositoryError::NotFound(format!("service '{id}'")))
        }

        async fn list_services(&self) -> Result<Vec<Service>, RepositoryError> {
            Ok(self.services.clone())
        }
    }

    fn growth_package() -> Package {
        Package {
            id: "growth".to_string(),
            name: "Growth".to_string(),
            price: dec!(15000),
            features: vec!["Brand audit".to_string(), "Content calendar".to_string()],
        }
    }

    fn seo_service() -> Service {
        Service {
            id: "seo".to_string(),
            name: "SEO".to_string(),
            price: dec!(5000),
            billing: BillingCycle::OneTime,
            recurring_fee: dec!(0),
        }
    }

    fn social_service() -> Service {
        Service {
            id: "social".to_string(),
            name: "Social media management".to_string(),
            price: dec!(1000),
            billing: BillingCycle::Monthly,
            recurring_fee: dec!(2500),
        }
    }

    fn catalog() -> FixedCatalog {
        FixedCatalog {
            packages: vec![growth_package()],
            services: vec![seo_service(), social_service()],
        }
    }

    fn settings() -> ProposalSettings {
        ProposalSettings {
            client_name: "Acme Trading LLC".to_string(),
            package_id: Some("growth".to_string()),
            include_package: true,
            service_ids: vec!["seo".to_string()],
            discounts: DiscountSettings {
                package: Discount::percentage(dec!(10)),
                services: BTreeMap::new(),
                overall: Discount::none(),
            },
            tax_enabled: true,
        }
    }

    #[test]
    fn service_line_uses_its_own_discount() {
        let mut discounts = DiscountSettings::default();
        discounts
            .services
            .insert("seo".to_string(), Discount::absolute(dec!(400)));

        let line = SelectionBuilder::service_line(&seo_service(), &discounts);

        assert_eq!(line.discount, Discount::absolute(dec!(400)));
        assert_eq!(line.recurring_fee, dec!(0));
    }

    #[test]
    fn one_time_service_drops_recurring_fee() {
        let service = Service {
            recurring_fee: dec!(99),
            ..seo_service()
        };

        let line = SelectionBuilder::service_line(&service, &DiscountSettings::default());

        assert_eq!(line.recurring_fee, dec!(0));
    }

    #[test]
    fn monthly_service_carries_recurring_fee() {
        let line = SelectionBuilder::service_line(&social_service(), &DiscountSettings::default());

        assert_eq!(line.base_amount, dec!(1000));
        assert_eq!(line.recurring_fee, dec!(2500));
    }

    #[test]
    fn build_copies_flags_and_overall_discount() {
        let settings = ProposalSettings {
            include_package: false,
            discounts: DiscountSettings {
                overall: Discount::absolute(dec!(250)),
                ..DiscountSettings::default()
            },
            ..settings()
        };

        let selection = SelectionBuilder::build(
            Some(&growth_package()),
            &[seo_service()],
            &settings,
            DEFAULT_TAX_RATE,
        );

        assert!(!selection.include_package);
        assert!(selection.package_line.is_some());
        assert!(selection.tax_enabled);
        assert_eq!(selection.overall_discount, Discount::absolute(dec!(250)));
        assert_eq!(selection.tax_rate, dec!(0.05));
    }

    #[tokio::test]
    async fn resolve_fetches_records_and_prices_proposal() {
        let selection = SelectionBuilder::resolve(&catalog(), &settings(), DEFAULT_TAX_RATE)
            .await
            .expect("selection should resolve");

        let breakdown = calculate_breakdown(&selection);

        assert_eq!(breakdown.subtotal, dec!(18500));
        assert_eq!(breakdown.total, dec!(19425));
    }

    #[tokio::test]
    async fn resolve_without_package_prices_services_only() {
        let settings = ProposalSettings {
            package_id: None,
            service_ids: vec!["seo".to_string(), "social".to_string()],
            tax_enabled: false,
            ..settings()
        };

        let selection = SelectionBuilder::resolve(&catalog(), &settings, DEFAULT_TAX_RATE)
            .await
            .expect("selection should resolve");
        let breakdown = calculate_breakdown(&selection);

        assert_eq!(breakdown.total, dec!(6000));
        assert_eq!(breakdown.recurring_fees, dec!(2500));
    }

    #[tokio::test]
    async fn resolve_surfaces_missing_service() {
        let settings = ProposalSettings {
            service_ids: vec!["podcast".to_string()],
            ..settings()
        };

        let result = SelectionBuilder::resolve(&catalog(), &settings, DEFAULT_TAX_RATE).await;

        assert!(matches!(result, Err(RepositoryError::NotFound(msg)) if msg.contains("podcast")));
    }
}
