//! Placeholder products
//!
//! Cart and wishlist operations never fail on an unknown product id. Instead
//! they resolve the id with [`resolve_with_fallback`], which returns the
//! catalog product when there is one and a synthesized placeholder
//! otherwise. Placeholder values are derived from a hash of the id, so the
//! same unknown id always produces the same placeholder.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;
use smallvec::SmallVec;

use crate::{catalog::Catalog, products::Product};

/// Full-size image shown for placeholder products.
pub const PLACEHOLDER_IMAGE: &str = "https://images.unsplash.com/photo-1441986300917-64674bd600d8?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=80";

/// Thumbnail shown for placeholder cart lines.
pub const PLACEHOLDER_THUMBNAIL: &str = "https://images.unsplash.com/photo-1441986300917-64674bd600d8?ixlib=rb-4.0.3&auto=format&fit=crop&w=150&q=80";

/// Description given to placeholder products.
pub const PLACEHOLDER_DESCRIPTION: &str = "Product description";

/// Category placeholder products are filed under.
pub const PLACEHOLDER_CATEGORY: &str = "general";

/// Lowest placeholder price.
pub const PLACEHOLDER_MIN_PRICE: u64 = 1_000;

/// Width of the placeholder price band; prices fall in `min..min + span`.
pub const PLACEHOLDER_PRICE_SPAN: u64 = 5_000;

/// Result of resolving a product id.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<'a> {
    /// The catalog knows the id
    Found(&'a Product),

    /// The catalog missed; this placeholder stands in
    Placeholder(Product),
}

impl Resolved<'_> {
    /// Whether this is a synthesized placeholder.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Resolved::Placeholder(_))
    }

    /// The resolved product.
    pub fn product(&self) -> &Product {
        match self {
            Resolved::Found(product) => product,
            Resolved::Placeholder(product) => product,
        }
    }

    /// An owned snapshot of the resolved product.
    pub fn into_owned(self) -> Product {
        match self {
            Resolved::Found(product) => product.clone(),
            Resolved::Placeholder(product) => product,
        }
    }
}

/// Look `id` up in `catalog`, synthesizing a placeholder on a miss.
pub fn resolve_with_fallback<'a>(catalog: &'a Catalog, id: &str) -> Resolved<'a> {
    match catalog.get_by_id(id) {
        Some(product) => Resolved::Found(product),
        None => {
            tracing::warn!(product_id = id, "product not in catalog, using placeholder");

            Resolved::Placeholder(placeholder_product(id))
        }
    }
}

/// Synthesize the placeholder product for `id`.
pub fn placeholder_product(id: &str) -> Product {
    let seed = seed(id);

    Product {
        id: id.to_string(),
        name: format!("Product {id}"),
        description: PLACEHOLDER_DESCRIPTION.to_string(),
        price: PLACEHOLDER_MIN_PRICE + seed % PLACEHOLDER_PRICE_SPAN,
        original_price: None,
        category: PLACEHOLDER_CATEGORY.to_string(),
        subcategory: String::new(),
        rating: 4.0,
        reviews: bounded(seed >> 16, 10, 100),
        image: PLACEHOLDER_IMAGE.to_string(),
        images: None,
        in_stock: true,
        stock_count: bounded(seed >> 32, 5, 50),
        tags: SmallVec::new(),
        sizes: SmallVec::new(),
        colors: SmallVec::new(),
        badge: None,
        featured: false,
        trending: false,
    }
}

fn seed(id: &str) -> u64 {
    let mut hasher = FxHasher::default();
    id.hash(&mut hasher);
    hasher.finish()
}

/// `base + value % span`, as a `u32`.
fn bounded(value: u64, base: u32, span: u32) -> u32 {
    base + u32::try_from(value % u64::from(span)).unwrap_or(0)
}
