use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Package, Service};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),
}

/// Read access to the package and service catalog.
///
/// Implementations fetch plain records; pricing never happens behind this
/// trait.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    // Packages
    async fn get_package(
        &self,
        id: &str,
    ) -> Result<Package, RepositoryError>;
    async fn list_packages(&self) -> Result<Vec<Package>, RepositoryError>;

    // Services
    async fn get_service(
        &self,
        id: &str,
    ) -> Result<Service, RepositoryError>;
    async fn list_services(&self) -> Result<Vec<Service>, RepositoryError>;
}
