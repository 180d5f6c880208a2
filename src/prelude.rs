//! Trendora prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartLine, CartStore},
    catalog::{Catalog, CatalogError, CategoryCount, FilterCriteria, PricePreset, PriceRange, SortKey},
    fallback::{Resolved, resolve_with_fallback},
    fixtures::{Fixture, FixtureError, builtin_catalog},
    products::{Badge, Product, ProductKey},
    storage::{DirectoryStorage, MemoryStorage, Storage, StorageError, StorageKeys},
    storefront::{Badges, Listing, ProductCard, ProductDetails, Storefront, StorefrontError},
    suggestions::{Suggestion, suggest},
    wishlist::{Wishlist, WishlistStore},
};
