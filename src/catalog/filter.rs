//! Filter criteria and sort orders for catalog listings.

use std::{cmp::Ordering, convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::products::Product;

/// Lower bound of the default price filter.
pub const DEFAULT_MIN_PRICE: u64 = 0;

/// Upper bound of the default price filter.
pub const DEFAULT_MAX_PRICE: u64 = 50_000;

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    /// Lowest accepted price
    pub min: u64,

    /// Highest accepted price
    pub max: u64,
}

impl PriceRange {
    /// Create a new inclusive range.
    pub fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    /// Whether `price` falls inside the range, inclusive at both ends.
    pub fn contains(&self, price: u64) -> bool {
        (self.min..=self.max).contains(&price)
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_PRICE, DEFAULT_MAX_PRICE)
    }
}

/// Predefined price buckets offered by the listing page's price dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricePreset {
    /// `0-4000`
    UpTo4000,

    /// `4000-8000`
    From4000To8000,

    /// `8000-16000`
    From8000To16000,

    /// `16000+`
    Over16000,
}

impl PricePreset {
    /// Parse a dropdown value. Unknown values are not presets.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "0-4000" => Some(Self::UpTo4000),
            "4000-8000" => Some(Self::From4000To8000),
            "8000-16000" => Some(Self::From8000To16000),
            "16000+" => Some(Self::Over16000),
            _ => None,
        }
    }

    /// The inclusive range this preset stands for.
    pub fn range(self) -> PriceRange {
        match self {
            Self::UpTo4000 => PriceRange::new(0, 4_000),
            Self::From4000To8000 => PriceRange::new(4_000, 8_000),
            Self::From8000To16000 => PriceRange::new(8_000, 16_000),
            Self::Over16000 => PriceRange::new(16_000, DEFAULT_MAX_PRICE),
        }
    }
}

/// Listing sort order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Name, A to Z
    #[default]
    Name,

    /// Price, lowest first
    PriceLow,

    /// Price, highest first
    PriceHigh,

    /// Rating, highest first
    Rating,

    /// Identifier read as an integer, highest first
    Newest,

    /// Review count, highest first
    Popular,

    /// Unrecognized key; catalog order is kept
    Unsorted(String),
}

impl FromStr for SortKey {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value {
            "name" => Self::Name,
            "price-low" => Self::PriceLow,
            "price-high" => Self::PriceHigh,
            "rating" => Self::Rating,
            "newest" => Self::Newest,
            "popular" => Self::Popular,
            other => Self::Unsorted(other.to_string()),
        })
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Rating => "rating",
            Self::Newest => "newest",
            Self::Popular => "popular",
            Self::Unsorted(other) => other.as_str(),
        })
    }
}

impl SortKey {
    /// Sort `products` in place. Sorting is stable, so ties keep catalog order.
    pub fn sort(&self, products: &mut [&Product]) {
        match self {
            Self::Name => products.sort_by(|a, b| locale_cmp(&a.name, &b.name)),
            Self::PriceLow => products.sort_by_key(|product| product.price),
            Self::PriceHigh => products.sort_by(|a, b| b.price.cmp(&a.price)),
            Self::Rating => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
            Self::Newest => products.sort_by(|a, b| b.numeric_id().cmp(&a.numeric_id())),
            Self::Popular => products.sort_by(|a, b| b.reviews.cmp(&a.reviews)),
            Self::Unsorted(_) => {}
        }
    }
}

/// Locale-style comparison: case-insensitive first, raw order on ties.
fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Listing filter.
///
/// Every populated criterion must hold for a product to be listed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterCriteria {
    /// Only products in this category
    pub category: Option<String>,

    /// Inclusive price bounds
    pub price_range: PriceRange,

    /// Inclusive minimum rating
    pub min_rating: f32,

    /// Only products that are in stock
    pub in_stock_only: bool,

    /// Free-text search over name, description and tags
    pub search: String,

    /// Result order
    pub sort_by: SortKey,
}

impl FilterCriteria {
    /// Restrict to a category.
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Restrict to a price range.
    #[must_use]
    pub fn price_range(mut self, range: PriceRange) -> Self {
        self.price_range = range;
        self
    }

    /// Restrict to a dropdown preset. Unknown presets leave the range alone.
    #[must_use]
    pub fn price_preset(mut self, preset: &str) -> Self {
        if let Some(preset) = PricePreset::parse(preset) {
            self.price_range = preset.range();
        }
        self
    }

    /// Require a minimum rating.
    #[must_use]
    pub fn min_rating(mut self, rating: f32) -> Self {
        self.min_rating = rating;
        self
    }

    /// Only list products in stock.
    #[must_use]
    pub fn in_stock_only(mut self) -> Self {
        self.in_stock_only = true;
        self
    }

    /// Free-text search.
    #[must_use]
    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = query.into();
        self
    }

    /// Result order.
    #[must_use]
    pub fn sort_by(mut self, key: SortKey) -> Self {
        self.sort_by = key;
        self
    }

    /// Whether a single product passes every criterion.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = self.category.as_deref()
            && !category.is_empty()
            && product.category != category
        {
            return false;
        }

        if !self.price_range.contains(product.price) {
            return false;
        }

        if product.rating < self.min_rating {
            return false;
        }

        if self.in_stock_only && !product.in_stock {
            return false;
        }

        let needle = self.search.to_lowercase();

        needle.is_empty() || product.matches_text(&needle)
    }
}
