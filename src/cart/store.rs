//! Cart store.

use crate::{
    cart::{Cart, CartLine, quantity::coerce_quantity},
    catalog::Catalog,
    fallback::{PLACEHOLDER_THUMBNAIL, Resolved, resolve_with_fallback},
    products::Product,
    storage::{CART_KEY, Storage, StorageError, load_json, read_json, save_json},
};

/// The persisted cart.
///
/// Every call reads the cart from storage and every mutation writes it back,
/// so stores sharing a storage handle always agree.
#[derive(Debug)]
pub struct CartStore<'a, S: Storage> {
    catalog: &'a Catalog,
    storage: &'a S,
    key: String,
}

impl<'a, S: Storage> CartStore<'a, S> {
    /// Create a cart store using the default storage key.
    pub fn new(catalog: &'a Catalog, storage: &'a S) -> Self {
        Self::with_key(catalog, storage, CART_KEY)
    }

    /// Create a cart store persisting under `key`.
    pub fn with_key(catalog: &'a Catalog, storage: &'a S, key: impl Into<String>) -> Self {
        Self {
            catalog,
            storage,
            key: key.into(),
        }
    }

    /// The stored cart. Malformed data reads as an empty cart.
    pub fn load(&self) -> Cart {
        self.tidy(load_json(self.storage, &self.key))
    }

    /// The stored cart ahead of a write; storage that cannot be read is an error.
    fn load_for_update(&self) -> Result<Cart, StorageError> {
        Ok(self.tidy(read_json(self.storage, &self.key)?))
    }

    fn tidy(&self, mut cart: Cart) -> Cart {
        let dropped = cart.discard_empty_lines();

        if dropped > 0 {
            tracing::warn!(key = %self.key, dropped, "dropped stored cart lines without quantity");
        }

        cart
    }

    fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        save_json(self.storage, &self.key, cart)
    }

    /// Add `quantity` of product `id`; quantities below one count as one.
    ///
    /// New lines copy their details from the catalog, or from a placeholder
    /// when the catalog does not know `id`. Returns the updated line.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be read or written.
    pub fn add(&self, id: &str, quantity: i64) -> Result<CartLine, StorageError> {
        let quantity = coerce_quantity(quantity);
        let mut cart = self.load_for_update()?;

        let line = if let Some(line) = cart.increase(id, quantity) {
            line.clone()
        } else {
            let line = match resolve_with_fallback(self.catalog, id) {
                Resolved::Found(product) => CartLine::from_product(product, quantity),
                Resolved::Placeholder(product) => CartLine {
                    image: PLACEHOLDER_THUMBNAIL.to_string(),
                    ..CartLine::from_product(&product, quantity)
                },
            };

            cart.insert(line).clone()
        };

        self.commit(&cart, line)
    }

    /// Add `quantity` of a product snapshot, e.g. one saved in the wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be read or written.
    pub fn add_product(&self, product: &Product, quantity: i64) -> Result<CartLine, StorageError> {
        let mut cart = self.load_for_update()?;
        let line = cart
            .insert(CartLine::from_product(product, coerce_quantity(quantity)))
            .clone();

        self.commit(&cart, line)
    }

    fn commit(&self, cart: &Cart, line: CartLine) -> Result<CartLine, StorageError> {
        self.save(cart)?;

        tracing::debug!(
            product_id = %line.id,
            quantity = line.quantity,
            "cart line updated"
        );

        Ok(line)
    }

    /// Remove the line for `id`. Returns whether there was one.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be read or written.
    pub fn remove(&self, id: &str) -> Result<bool, StorageError> {
        let mut cart = self.load_for_update()?;

        if cart.remove(id).is_none() {
            return Ok(false);
        }

        self.save(&cart)?;

        tracing::debug!(product_id = id, "cart line removed");

        Ok(true)
    }

    /// Overwrite the quantity for `id`; zero or less removes the line.
    ///
    /// Does nothing when there is no line for `id` and returns `false`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be read or written.
    pub fn set_quantity(&self, id: &str, quantity: i64) -> Result<bool, StorageError> {
        let mut cart = self.load_for_update()?;

        if !cart.set_quantity(id, quantity) {
            return Ok(false);
        }

        self.save(&cart)?;

        tracing::debug!(product_id = id, quantity, "cart quantity set");

        Ok(true)
    }

    /// The stored cart lines, ordered by product id.
    pub fn lines(&self) -> Vec<CartLine> {
        self.load().iter().cloned().collect()
    }

    /// Sum of price times quantity over the stored cart.
    pub fn total(&self) -> u64 {
        self.load().total()
    }

    /// Total units in the stored cart.
    pub fn count(&self) -> u64 {
        self.load().count()
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be removed from storage.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove_item(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        fallback::PLACEHOLDER_MIN_PRICE,
        products::tests::product,
        storage::{DirectoryStorage, MemoryStorage},
    };

    use super::*;

    fn catalog() -> Result<Catalog, crate::catalog::CatalogError> {
        Catalog::new([
            product("p1", "Blazer", "women", 1459),
            product("p2", "Sneakers", "men", 1100),
        ])
    }

    #[test]
    fn repeat_adds_accumulate() -> TestResult {
        let catalog = catalog()?;
        let storage = MemoryStorage::new();
        let cart = CartStore::new(&catalog, &storage);

        cart.add("p1", 2)?;
        let line = cart.add("p1", 3)?;

        assert_eq!(line.quantity, 5);
        assert_eq!(cart.load().len(), 1);

        Ok(())
    }

    #[test]
    fn add_copies_catalog_details() -> TestResult {
        let catalog = catalog()?;
        let storage = MemoryStorage::new();
        let cart = CartStore::new(&catalog, &storage);

        let line = cart.add("p2", 1)?;

        assert_eq!(line.name, "Sneakers");
        assert_eq!(line.price, 1100);
        assert_eq!(line.description, "Sneakers description");
        assert_eq!(cart.lines(), vec![line]);

        Ok(())
    }

    #[test]
    fn add_coerces_bad_quantities() -> TestResult {
        let catalog = catalog()?;
        let storage = MemoryStorage::new();
        let cart = CartStore::new(&catalog, &storage);

        assert_eq!(cart.add("p1", 0)?.quantity, 1);
        assert_eq!(cart.add("p1", -5)?.quantity, 2);

        Ok(())
    }

    #[test]
    fn add_unknown_product_uses_placeholder() -> TestResult {
        let catalog = catalog()?;
        let storage = MemoryStorage::new();
        let cart = CartStore::new(&catalog, &storage);

        let line = cart.add("missing", 1)?;

        assert_eq!(line.name, "Product missing");
        assert_eq!(line.image, PLACEHOLDER_THUMBNAIL);
        assert!(line.price >= PLACEHOLDER_MIN_PRICE);

        Ok(())
    }

    #[test]
    fn remove_missing_is_noop() -> TestResult {
        let catalog = catalog()?;
        let storage = MemoryStorage::new();
        let cart = CartStore::new(&catalog, &storage);

        assert!(!cart.remove("p1")?);
        assert!(storage.is_empty());

        cart.add("p1", 1)?;

        assert!(cart.remove("p1")?);
        assert!(cart.load().is_empty());

        Ok(())
    }

    #[test]
    fn set_quantity_zero_removes_and_total_tracks_lines() -> TestResult {
        let catalog = catalog()?;
        let storage = MemoryStorage::new();
        let cart = CartStore::new(&catalog, &storage);

        cart.add("p1", 2)?;
        cart.add("p2", 1)?;

        assert_eq!(cart.total(), 1459 * 2 + 1100);
        assert_eq!(cart.count(), 3);

        assert!(cart.set_quantity("p1", 0)?);

        assert!(!cart.load().contains("p1"));
        assert_eq!(cart.total(), 1100);
        assert!(!cart.set_quantity("p1", 3)?);

        Ok(())
    }

    #[test]
    fn malformed_storage_reads_as_empty() -> TestResult {
        let catalog = catalog()?;
        let storage = MemoryStorage::new();
        storage.set_item(CART_KEY, "[1, 2, 3")?;

        let cart = CartStore::new(&catalog, &storage);

        assert!(cart.load().is_empty());

        cart.add("p1", 1)?;

        assert_eq!(cart.count(), 1);

        Ok(())
    }

    #[test]
    fn custom_key_is_used() -> TestResult {
        let catalog = catalog()?;
        let storage = MemoryStorage::new();
        let cart = CartStore::with_key(&catalog, &storage, "other_cart");

        cart.add("p1", 1)?;

        assert!(storage.get_item("other_cart")?.is_some());
        assert!(storage.get_item(CART_KEY)?.is_none());

        Ok(())
    }

    #[test]
    fn clear_empties_the_cart() -> TestResult {
        let catalog = catalog()?;
        let storage = MemoryStorage::new();
        let cart = CartStore::new(&catalog, &storage);

        cart.add("p1", 1)?;
        cart.clear()?;

        assert_eq!(cart.count(), 0);

        Ok(())
    }

    #[test]
    fn negative_stored_line_keeps_the_rest_of_the_cart() -> TestResult {
        let catalog = catalog()?;
        let storage = MemoryStorage::new();
        storage.set_item(
            CART_KEY,
            r#"{"p2":{"id":"p2","name":"Sneakers","price":1100,"quantity":2},
                "x":{"id":"x","name":"Odd","price":10,"quantity":-3}}"#,
        )?;

        let cart = CartStore::new(&catalog, &storage);

        cart.add("p1", 1)?;

        let stored = cart.load();

        assert_eq!(stored.get("p2").map(|line| line.quantity), Some(2));
        assert_eq!(stored.get("p1").map(|line| line.quantity), Some(1));
        assert!(!stored.contains("x"));

        Ok(())
    }

    #[test]
    fn unreadable_storage_is_not_overwritten() -> TestResult {
        let catalog = catalog()?;
        let dir = tempfile::tempdir()?;
        let blocked = dir.path().join(format!("{CART_KEY}.json"));
        std::fs::create_dir(&blocked)?;

        let storage = DirectoryStorage::new(dir.path());
        let cart = CartStore::new(&catalog, &storage);

        assert!(cart.load().is_empty());
        assert!(cart.add("p1", 1).is_err());
        assert!(cart.remove("p1").is_err());
        assert!(blocked.is_dir());

        Ok(())
    }
}
