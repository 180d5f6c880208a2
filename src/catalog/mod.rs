//! Catalog
//!
//! The read-only product list every other store queries. A catalog is built
//! once and never mutated; all queries borrow from it.

use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::SlotMap;
use thiserror::Error;

use crate::products::{Product, ProductKey};

pub mod filter;

pub use filter::{FilterCriteria, PricePreset, PriceRange, SortKey};

/// Default number of products in the featured and trending rails.
pub const DEFAULT_LIMIT: usize = 8;

/// Number of products shown under "related products" on a product page.
pub const RELATED_LIMIT: usize = 4;

/// Errors raised while assembling a catalog.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// Two products share an identifier.
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),

    /// A product's rating is outside 0..=5 (product id, rating).
    #[error("Product {0} has rating {1}, expected a value between 0 and 5")]
    InvalidRating(String, f32),
}

/// A category with the number of products filed under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    /// Category name
    pub name: String,

    /// Number of products in the category
    pub count: usize,
}

/// Catalog
#[derive(Debug, Default)]
pub struct Catalog {
    products: SlotMap<ProductKey, Product>,
    keys: FxHashMap<String, ProductKey>,
    order: Vec<ProductKey>,
}

impl Catalog {
    /// Build a catalog from products in display order.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::DuplicateProduct`]: two products share an id.
    /// - [`CatalogError::InvalidRating`]: a rating is not within 0..=5.
    pub fn new(products: impl IntoIterator<Item = Product>) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();

        for product in products {
            if !(0.0..=5.0).contains(&product.rating) {
                return Err(CatalogError::InvalidRating(product.id, product.rating));
            }

            if catalog.keys.contains_key(&product.id) {
                return Err(CatalogError::DuplicateProduct(product.id));
            }

            let id = product.id.clone();
            let key = catalog.products.insert(product);

            catalog.keys.insert(id, key);
            catalog.order.push(key);
        }

        Ok(catalog)
    }

    /// A catalog with no products.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Products in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.order.iter().filter_map(|key| self.products.get(*key))
    }

    /// Look up a product by identifier.
    pub fn get_by_id(&self, id: &str) -> Option<&Product> {
        self.keys.get(id).and_then(|key| self.products.get(*key))
    }

    /// All products in `category`, in catalog order.
    pub fn get_by_category(&self, category: &str) -> Vec<&Product> {
        self.iter()
            .filter(|product| product.category == category)
            .collect()
    }

    /// The first `limit` featured products.
    pub fn get_featured(&self, limit: usize) -> Vec<&Product> {
        self.iter()
            .filter(|product| product.featured)
            .take(limit)
            .collect()
    }

    /// The first `limit` trending products.
    pub fn get_trending(&self, limit: usize) -> Vec<&Product> {
        self.iter()
            .filter(|product| product.trending)
            .take(limit)
            .collect()
    }

    /// Case-insensitive search over name, description, tags and category.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.to_lowercase();

        self.iter()
            .filter(|product| product.matches_query(&needle))
            .collect()
    }

    /// Products passing every criterion, ordered by `criteria.sort_by`.
    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&Product> {
        let mut products: Vec<&Product> = self
            .iter()
            .filter(|product| criteria.matches(product))
            .collect();

        criteria.sort_by.sort(&mut products);

        products
    }

    /// Distinct categories in first-seen order with their product counts.
    pub fn get_categories(&self) -> Vec<CategoryCount> {
        let mut categories: Vec<CategoryCount> = Vec::new();

        for product in self.iter() {
            match categories
                .iter_mut()
                .find(|category| category.name == product.category)
            {
                Some(category) => category.count += 1,
                None => categories.push(CategoryCount {
                    name: product.category.clone(),
                    count: 1,
                }),
            }
        }

        categories
    }

    /// Lowest and highest price in the catalog, `None` when it is empty.
    pub fn get_price_range(&self) -> Option<PriceRange> {
        let min = self.iter().map(|product| product.price).min()?;
        let max = self.iter().map(|product| product.price).max()?;

        Some(PriceRange::new(min, max))
    }

    /// Products to suggest alongside `id`.
    ///
    /// Same-category products come first; the rest is topped up from the
    /// trending rail. The product itself and duplicates are never included.
    pub fn related(&self, id: &str, limit: usize) -> Vec<&Product> {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        seen.insert(id);

        let same_category = self
            .get_by_id(id)
            .map(|product| self.get_by_category(&product.category))
            .unwrap_or_default();

        same_category
            .into_iter()
            .chain(self.get_trending(DEFAULT_LIMIT))
            .filter(|product| seen.insert(product.id.as_str()))
            .take(limit)
            .collect()
    }
}
