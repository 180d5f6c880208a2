//! Storefront
//!
//! [`Storefront`] ties a catalog to a storage handle and builds what the
//! storefront pages show: product cards, listings, the product page and the
//! header badges.

use thiserror::Error;

use crate::{
    cart::{CartLine, CartStore},
    catalog::{Catalog, FilterCriteria, RELATED_LIMIT},
    prices,
    products::Product,
    ratings::StarRating,
    storage::{Storage, StorageError, StorageKeys},
    wishlist::{Wishlist, WishlistStore},
};

/// Errors raised by storefront actions.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// The product is known and out of stock
    #[error("Product {0} is out of stock")]
    OutOfStock(String),

    /// Persisting the change failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A product as shown on a listing card.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard<'a> {
    /// The product
    pub product: &'a Product,

    /// Whole-percent discount, when marked down
    pub discount: Option<u32>,

    /// Star rating
    pub stars: StarRating,

    /// Whether the product is in the wishlist
    pub in_wishlist: bool,

    /// Stock availability label
    pub stock_label: String,
}

impl<'a> ProductCard<'a> {
    /// Build the card for `product`.
    pub fn new(product: &'a Product, wishlist: &Wishlist) -> Self {
        Self {
            product,
            discount: prices::discount_points(product.price, product.original_price),
            stars: StarRating::from_rating(product.rating),
            in_wishlist: wishlist.contains(&product.id),
            stock_label: product.stock_label(),
        }
    }
}

/// A filtered product listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<'a> {
    /// Matching products, in sort order
    pub cards: Vec<ProductCard<'a>>,

    /// Results line, e.g. `12 Products Found`
    pub count_label: String,
}

impl Listing<'_> {
    /// Number of results.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// The product page.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetails<'a> {
    /// The product
    pub card: ProductCard<'a>,

    /// Related products
    pub related: Vec<ProductCard<'a>>,
}

/// Header badge counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Badges {
    /// Units in the cart
    pub cart: u64,

    /// Products in the wishlist
    pub wishlist: usize,
}

/// The storefront over one catalog and one storage handle.
#[derive(Debug)]
pub struct Storefront<'a, S: Storage> {
    catalog: &'a Catalog,
    storage: &'a S,
    keys: StorageKeys,
}

impl<'a, S: Storage> Storefront<'a, S> {
    /// Create a storefront using the default storage keys.
    pub fn new(catalog: &'a Catalog, storage: &'a S) -> Self {
        Self::with_keys(catalog, storage, StorageKeys::default())
    }

    /// Create a storefront persisting under `keys`.
    pub fn with_keys(catalog: &'a Catalog, storage: &'a S, keys: StorageKeys) -> Self {
        Self {
            catalog,
            storage,
            keys,
        }
    }

    /// The catalog.
    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// The cart store.
    pub fn cart(&self) -> CartStore<'a, S> {
        CartStore::with_key(self.catalog, self.storage, self.keys.cart.clone())
    }

    /// The wishlist store.
    pub fn wishlist(&self) -> WishlistStore<'a, S> {
        WishlistStore::with_key(self.catalog, self.storage, self.keys.wishlist.clone())
    }

    /// Cards for `products`, marking wishlist membership.
    pub fn cards(&self, products: impl IntoIterator<Item = &'a Product>) -> Vec<ProductCard<'a>> {
        let wishlist = self.wishlist().load();

        products
            .into_iter()
            .map(|product| ProductCard::new(product, &wishlist))
            .collect()
    }

    /// The products page for `criteria`.
    pub fn listing(&self, criteria: &FilterCriteria) -> Listing<'a> {
        let cards = self.cards(self.catalog.filter(criteria));
        let count_label = format!("{} Products Found", cards.len());

        Listing { cards, count_label }
    }

    /// The product page for `id`, or `None` when the catalog does not know it.
    pub fn product_details(&self, id: &str) -> Option<ProductDetails<'a>> {
        let product = self.catalog.get_by_id(id)?;
        let wishlist = self.wishlist().load();

        let related = self
            .catalog
            .related(id, RELATED_LIMIT)
            .into_iter()
            .map(|product| ProductCard::new(product, &wishlist))
            .collect();

        Some(ProductDetails {
            card: ProductCard::new(product, &wishlist),
            related,
        })
    }

    /// Add to the cart from a product page, refusing out-of-stock products.
    ///
    /// Ids the catalog does not know go through the placeholder policy.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::OutOfStock`] for known out-of-stock
    /// products, or a storage error if the cart cannot be written.
    pub fn add_to_cart_checked(
        &self,
        id: &str,
        quantity: i64,
    ) -> Result<CartLine, StorefrontError> {
        if let Some(product) = self.catalog.get_by_id(id)
            && !product.in_stock
        {
            tracing::info!(product_id = id, "refused out of stock product");

            return Err(StorefrontError::OutOfStock(id.to_string()));
        }

        Ok(self.cart().add(id, quantity)?)
    }

    /// Add one of a wishlist product to the cart, using the saved snapshot.
    ///
    /// The product stays in the wishlist. Returns `None` when `id` is not in
    /// the wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be written.
    pub fn move_to_cart(&self, id: &str) -> Result<Option<CartLine>, StorefrontError> {
        let Some(snapshot) = self.wishlist().get(id) else {
            return Ok(None);
        };

        Ok(Some(self.cart().add_product(&snapshot, 1)?))
    }

    /// Header badge counts.
    pub fn badges(&self) -> Badges {
        Badges {
            cart: self.cart().count(),
            wishlist: self.wishlist().len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{products::tests::product, storage::MemoryStorage};

    use super::*;

    fn catalog() -> Result<Catalog, crate::catalog::CatalogError> {
        let mut blazer = product("1", "Blazer", "women", 1459);
        blazer.original_price = Some(8999);
        blazer.rating = 4.5;

        let mut sold_out = product("2", "Scarf", "women", 400);
        sold_out.in_stock = false;
        sold_out.stock_count = 0;

        let mut watch = product("3", "Watch", "accessories", 2100);
        watch.trending = true;

        Catalog::new([blazer, sold_out, watch])
    }

    #[test]
    fn cards_carry_discount_stars_and_wishlist_flag() -> TestResult {
        let catalog = catalog()?;
        let storage = MemoryStorage::new();
        let storefront = Storefront::new(&catalog, &storage);

        storefront.wishlist().add("1")?;

        let listing = storefront.listing(&FilterCriteria::default());
        let blazer = listing.cards.iter().find(|card| card.product.id == "1");

        assert_eq!(blazer.and_then(|card| card.discount), Some(84));
        assert_eq!(blazer.map(|card| card.stars.to_text()), Some("★★★★½".to_string()));
        assert_eq!(blazer.map(|card| card.in_wishlist), Some(true));

        Ok(())
    }

    #[test]
    fn listing_counts_results() -> TestResult {
        let catalog = catalog()?;
        let storage = MemoryStorage::new();
        let storefront = Storefront::new(&catalog, &storage);

        let listing = storefront.listing(&FilterCriteria::default().category("women"));

        assert_eq!(listing.len(), 2);
        assert_eq!(listing.count_label, "2 Products Found");

        let empty = storefront.listing(&FilterCriteria::default().search("nothing matches"));

        assert!(empty.is_empty());
        assert_eq!(empty.count_label, "0 Products Found");

        Ok(())
    }

    #[test]
    fn product_details_includes_related() -> TestResult {
        let catalog = catalog()?;
        let storage = MemoryStorage::new();
        let storefront = Storefront::new(&catalog, &storage);

        let details = storefront.product_details("1").ok_or("product 1 missing")?;
        let related: Vec<&str> = details
            .related
            .iter()
            .map(|card| card.product.id.as_str())
            .collect();

        assert_eq!(details.card.stock_label, "In Stock (5)");
        assert_eq!(related, ["2", "3"]);
        assert!(storefront.product_details("999").is_none());

        Ok(())
    }

    #[test]
    fn out_of_stock_products_are_refused() -> TestResult {
        let catalog = catalog()?;
        let storage = MemoryStorage::new();
        let storefront = Storefront::new(&catalog, &storage);

        assert!(matches!(
            storefront.add_to_cart_checked("2", 1),
            Err(StorefrontError::OutOfStock(id)) if id == "2"
        ));
        assert_eq!(storefront.cart().count(), 0);

        storefront.add_to_cart_checked("1", 2)?;
        storefront.add_to_cart_checked("unknown", 1)?;

        assert_eq!(storefront.badges().cart, 3);

        Ok(())
    }

    #[test]
    fn move_to_cart_uses_the_snapshot() -> TestResult {
        let catalog = catalog()?;
        let storage = MemoryStorage::new();
        let storefront = Storefront::new(&catalog, &storage);

        storefront.wishlist().add("3")?;

        let mut repriced = storefront.wishlist().list();
        for item in &mut repriced {
            item.price = 999;
        }
        crate::storage::save_json(&storage, crate::storage::WISHLIST_KEY, &repriced)?;

        let line = storefront.move_to_cart("3")?.ok_or("not moved")?;

        assert_eq!(line.price, 999);
        assert_eq!(line.quantity, 1);
        assert!(storefront.wishlist().contains("3"));
        assert!(storefront.move_to_cart("1")?.is_none());

        Ok(())
    }

    #[test]
    fn badges_track_both_stores() -> TestResult {
        let catalog = catalog()?;
        let storage = MemoryStorage::new();
        let storefront = Storefront::new(&catalog, &storage);

        assert_eq!(storefront.badges(), Badges::default());

        storefront.cart().add("1", 2)?;
        storefront.cart().add("3", 1)?;
        storefront.wishlist().add("2")?;

        assert_eq!(
            storefront.badges(),
            Badges {
                cart: 3,
                wishlist: 1
            }
        );

        Ok(())
    }

    #[test]
    fn custom_keys_are_respected() -> TestResult {
        let catalog = catalog()?;
        let storage = MemoryStorage::new();
        let keys = StorageKeys {
            cart: "c".to_string(),
            wishlist: "w".to_string(),
        };
        let storefront = Storefront::with_keys(&catalog, &storage, keys);

        storefront.cart().add("1", 1)?;
        storefront.wishlist().add("1")?;

        assert!(storage.get_item("c")?.is_some());
        assert!(storage.get_item("w")?.is_some());
        assert_eq!(storage.len(), 2);

        Ok(())
    }

    #[test]
    fn move_to_cart_fills_in_a_missing_description() -> TestResult {
        let mut bare = product("9", "Cap", "accessories", 300);
        bare.description = String::new();

        let catalog = Catalog::new([bare])?;
        let storage = MemoryStorage::new();
        let storefront = Storefront::new(&catalog, &storage);

        storefront.wishlist().add("9")?;

        let line = storefront.move_to_cart("9")?.ok_or("cap not saved")?;

        assert_eq!(line.description, crate::fallback::PLACEHOLDER_DESCRIPTION);

        Ok(())
    }
}
