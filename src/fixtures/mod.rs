//! Fixtures
//!
//! Catalogs are described in YAML. The storefront's own catalog is compiled
//! into the binary; other sets can be loaded from a fixture directory laid
//! out as `<base>/products/<name>.yml`.

use std::{fs, path::PathBuf};

use thiserror::Error;

use crate::catalog::{Catalog, CatalogError};

pub mod products;

/// The storefront catalog, embedded at compile time.
pub const BUILTIN_PRODUCTS: &str = include_str!("../../fixtures/products/trendora.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// The products parsed but do not form a valid catalog
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,
}

impl Fixture {
    /// Create a new fixture loader with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new fixture loader with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Load a catalog from `<base>/products/<name>.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// products do not form a valid catalog.
    pub fn load_catalog(&self, name: &str) -> Result<Catalog, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        tracing::debug!(path = %file_path.display(), "loading catalog fixture");

        parse_catalog(&contents)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a catalog from YAML text.
///
/// # Errors
///
/// Returns an error if the YAML is malformed or the products do not form a
/// valid catalog.
pub fn parse_catalog(yaml: &str) -> Result<Catalog, FixtureError> {
    let fixture: products::ProductsFixture = serde_norway::from_str(yaml)?;

    Ok(Catalog::new(fixture.products)?)
}

/// The storefront's built-in catalog.
///
/// # Errors
///
/// Returns an error if the embedded fixture is invalid.
pub fn builtin_catalog() -> Result<Catalog, FixtureError> {
    parse_catalog(BUILTIN_PRODUCTS)
}
