use std::fs::File;
use std::path::Path;

use async_trait::async_trait;
use pricing_core::{CatalogRepository, Package, RepositoryError, Service};
use tracing::info;

use crate::loader::CatalogLoader;

pub const PACKAGES_FILE: &str = "packages.csv";
pub const SERVICES_FILE: &str = "services.csv";

/// A catalog held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    packages: Vec<Package>,
    services: Vec<Service>,
}

impl InMemoryCatalog {
    pub fn new(
        packages: Vec<Package>,
        services: Vec<Service>,
    ) -> Self {
        Self { packages, services }
    }

    /// Loads `packages.csv` and `services.csv` from `dir`.
    ///
    /// # Errors
    ///
    /// [`RepositoryError::Connection`] when a file cannot be opened and
    /// [`RepositoryError::Database`] when its contents are invalid.
    pub fn load_dir(dir: &Path) -> Result<Self, RepositoryError> {
        let packages = CatalogLoader::parse_packages(open(dir, PACKAGES_FILE)?)
            .map_err(|e| RepositoryError::Database(format!("{PACKAGES_FILE}: {e}")))?;
        let services = CatalogLoader::parse_services(open(dir, SERVICES_FILE)?)
            .map_err(|e| RepositoryError::Database(format!("{SERVICES_FILE}: {e}")))?;

        info!(
            dir = %dir.display(),
            packages = packages.len(),
            services = services.len(),
            "Loaded catalog"
        );

        Ok(Self::new(packages, services))
    }
}

fn open(
    dir: &Path,
    name: &str,
) -> Result<File, RepositoryError> {
    let path = dir.join(name);
    File::open(&path)
        .map_err(|e| RepositoryError::Connection(format!("failed to open {}: {e}", path.display())))
}

#[async_trait]
impl CatalogRepository for InMemoryCatalog {
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
