pub mod calculations;
pub mod db;
pub mod models;

pub use db::repository::{CatalogRepository, RepositoryError};
pub use models::*;
