//! Wishlist
//!
//! An ordered list of product snapshots, at most one per product id.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::{
    catalog::Catalog,
    fallback::resolve_with_fallback,
    products::Product,
    storage::{Storage, StorageError, WISHLIST_KEY, load_json, read_json, save_json},
};

/// Saved products in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wishlist {
    items: Vec<Product>,
}

impl Wishlist {
    /// Create an empty wishlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saved products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if nothing is saved.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether `id` is saved.
    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// The snapshot saved for `id`.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Saved products, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.items.iter()
    }

    /// Append a snapshot. Returns `false` if the id is already saved.
    pub fn push(&mut self, product: Product) -> bool {
        if self.contains(&product.id) {
            return false;
        }

        self.items.push(product);

        true
    }

    /// Remove the snapshot for `id`.
    pub fn remove(&mut self, id: &str) -> Option<Product> {
        let position = self.items.iter().position(|item| item.id == id)?;

        Some(self.items.remove(position))
    }

    /// Drop repeated ids, keeping the first snapshot. Returns how many were dropped.
    pub(crate) fn dedup(&mut self) -> usize {
        let before = self.items.len();
        let mut seen = FxHashSet::default();

        self.items.retain(|item| seen.insert(item.id.clone()));

        before - self.items.len()
    }
}

impl IntoIterator for Wishlist {
    type Item = Product;
    type IntoIter = std::vec::IntoIter<Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// The persisted wishlist.
#[derive(Debug)]
pub struct WishlistStore<'a, S: Storage> {
    catalog: &'a Catalog,
    storage: &'a S,
    key: String,
}

impl<'a, S: Storage> WishlistStore<'a, S> {
    /// Create a wishlist store using the default storage key.
    pub fn new(catalog: &'a Catalog, storage: &'a S) -> Self {
        Self::with_key(catalog, storage, WISHLIST_KEY)
    }

    /// Create a wishlist store persisting under `key`.
    pub fn with_key(catalog: &'a Catalog, storage: &'a S, key: impl Into<String>) -> Self {
        Self {
            catalog,
            storage,
            key: key.into(),
        }
    }

    /// The stored wishlist. Malformed data reads as an empty wishlist.
    pub fn load(&self) -> Wishlist {
        self.tidy(load_json(self.storage, &self.key))
    }

    /// The stored wishlist ahead of a write; storage that cannot be read is an error.
    fn load_for_update(&self) -> Result<Wishlist, StorageError> {
        Ok(self.tidy(read_json(self.storage, &self.key)?))
    }

    fn tidy(&self, mut wishlist: Wishlist) -> Wishlist {
        let dropped = wishlist.dedup();

        if dropped > 0 {
            tracing::warn!(key = %self.key, dropped, "dropped repeated wishlist entries");
        }

        wishlist
    }

    /// Saved products, oldest first.
    pub fn list(&self) -> Vec<Product> {
        self.load().into_iter().collect()
    }

    /// Saved product ids, oldest first.
    pub fn ids(&self) -> Vec<String> {
        self.load().into_iter().map(|item| item.id).collect()
    }

    /// Whether `id` is saved.
    pub fn contains(&self, id: &str) -> bool {
        self.load().contains(id)
    }

    /// The snapshot saved for `id`.
    pub fn get(&self, id: &str) -> Option<Product> {
        self.load().remove(id)
    }

    /// Number of saved products.
    pub fn len(&self) -> usize {
        self.load().len()
    }

    /// Check if nothing is saved.
    pub fn is_empty(&self) -> bool {
        self.load().is_empty()
    }

    /// Save product `id`. Returns `false` and leaves storage untouched when
    /// it is already saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the wishlist cannot be read or written.
    pub fn add(&self, id: &str) -> Result<bool, StorageError> {
        let mut wishlist = self.load_for_update()?;

        if wishlist.contains(id) {
            return Ok(false);
        }

        wishlist.push(resolve_with_fallback(self.catalog, id).into_owned());

        save_json(self.storage, &self.key, &wishlist)?;

        tracing::debug!(product_id = id, "added to wishlist");

        Ok(true)
    }

    /// Forget product `id`. Returns whether it was saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the wishlist cannot be read or written.
    pub fn remove(&self, id: &str) -> Result<bool, StorageError> {
        let mut wishlist = self.load_for_update()?;

        if wishlist.remove(id).is_none() {
            return Ok(false);
        }

        save_json(self.storage, &self.key, &wishlist)?;

        tracing::debug!(product_id = id, "removed from wishlist");

        Ok(true)
    }

    /// Add `id` if absent, remove it if present. Returns `true` when the
    /// product is saved afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the wishlist cannot be read or written.
    pub fn toggle(&self, id: &str) -> Result<bool, StorageError> {
        if self.load_for_update()?.contains(id) {
            self.remove(id).map(|_| false)
        } else {
            self.add(id).map(|_| true)
        }
    }

    /// Forget everything.
    ///
    /// # Errors
    ///
    /// Returns an error if the wishlist cannot be removed from storage.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove_item(&self.key)
    }
}
