//! Trendora
//!
//! Trendora is the storefront core of a small fashion shop: a queryable product catalog, and a
//! cart and wishlist persisted as JSON in a local-storage style key/value store.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod fallback;
pub mod fixtures;
pub mod observability;
pub mod prelude;
pub mod prices;
pub mod products;
pub mod ratings;
pub mod render;
pub mod storage;
pub mod storefront;
pub mod suggestions;
pub mod wishlist;
