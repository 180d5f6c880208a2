//! Product Fixtures

use serde::Deserialize;

use crate::products::Product;

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Products in catalog order
    pub products: Vec<Product>,
}
