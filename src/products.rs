//! Products

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use smallvec::SmallVec;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Short ordered string lists carried by a product (tags, sizes, colours).
pub type Labels = SmallVec<[String; 5]>;

/// Merchandising badge shown on a product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    /// Newly listed
    New,

    /// Discounted
    Sale,

    /// Editorially featured
    Featured,
}

impl Badge {
    /// Lowercase label used on product cards.
    pub fn as_str(self) -> &'static str {
        match self {
            Badge::New => "new",
            Badge::Sale => "sale",
            Badge::Featured => "featured",
        }
    }
}

/// Product
///
/// Field names follow the storefront's camelCase JSON so that persisted
/// wishlist snapshots stay readable by the browser scripts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product identifier, unique within a catalog
    pub id: String,

    /// Product name
    pub name: String,

    /// Product description
    #[serde(default)]
    pub description: String,

    /// Price in whole rupees
    pub price: u64,

    /// Price before discount, if the product is marked down
    #[serde(default)]
    pub original_price: Option<u64>,

    /// Top-level category (`women`, `men`, ...)
    #[serde(default)]
    pub category: String,

    /// Subcategory within the category
    #[serde(default)]
    pub subcategory: String,

    /// Average rating between 0 and 5
    #[serde(default)]
    pub rating: f32,

    /// Number of reviews
    #[serde(default)]
    pub reviews: u32,

    /// Primary image URL
    #[serde(default)]
    pub image: String,

    /// Gallery image URLs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,

    /// Whether the product can be ordered
    #[serde(default)]
    pub in_stock: bool,

    /// Units in stock
    #[serde(default)]
    pub stock_count: u32,

    /// Search tags
    #[serde(default)]
    pub tags: Labels,

    /// Available sizes
    #[serde(default)]
    pub sizes: Labels,

    /// Available colours
    #[serde(default)]
    pub colors: Labels,

    /// Card badge
    #[serde(default)]
    pub badge: Option<Badge>,

    /// Shown in the featured rail
    #[serde(default)]
    pub featured: bool,

    /// Shown in the trending rail
    #[serde(default)]
    pub trending: bool,
}

impl Product {
    /// Case-insensitive substring match against name, description and tags.
    ///
    /// `needle` must already be lowercase.
    pub fn matches_text(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle))
    }

    /// As [`Product::matches_text`], additionally matching the category.
    pub fn matches_query(&self, needle: &str) -> bool {
        self.matches_text(needle) || self.category.to_lowercase().contains(needle)
    }

    /// The identifier read as an integer, used for newest-first ordering.
    pub fn numeric_id(&self) -> Option<i64> {
        self.id.trim().parse().ok()
    }

    /// Label describing stock availability.
    pub fn stock_label(&self) -> String {
        if self.in_stock {
            format!("In Stock ({})", self.stock_count)
        } else {
            "Out of Stock".to_string()
        }
    }
}
