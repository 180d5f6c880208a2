//! Cart
//!
//! A cart maps product ids to line items. [`Cart`] is the in-memory value
//! and enforces the quantity invariant; [`CartStore`] persists it.

use std::collections::BTreeMap;

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{fallback::PLACEHOLDER_DESCRIPTION, prices, products::Product};

pub mod quantity;
mod store;

pub use store::CartStore;

/// A cart line: one product and how many of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product id
    pub id: String,

    /// Product name at the time it was added
    pub name: String,

    /// Unit price at the time it was added
    pub price: u64,

    /// Units, always at least one once the line is in a cart
    #[serde(deserialize_with = "deserialize_quantity")]
    pub quantity: u32,

    /// Image URL
    #[serde(default)]
    pub image: String,

    /// Product description
    #[serde(default)]
    pub description: String,
}

impl CartLine {
    /// A new line copying the product's display fields.
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            quantity: quantity.max(1),
            image: product.image.clone(),
            description: if product.description.is_empty() {
                PLACEHOLDER_DESCRIPTION.to_string()
            } else {
                product.description.clone()
            },
        }
    }

    /// Price times quantity.
    pub fn subtotal(&self) -> u64 {
        self.price.saturating_mul(u64::from(self.quantity))
    }
}

/// Stored quantities may be zero or negative; those read as zero and the
/// line is dropped when the cart is loaded.
fn deserialize_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let quantity = i64::deserialize(deserializer)?;

    Ok(u32::try_from(quantity.max(0)).unwrap_or(u32::MAX))
}

/// Cart contents keyed by product id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: BTreeMap<String, CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line for `id`.
    pub fn get(&self, id: &str) -> Option<&CartLine> {
        self.lines.get(id)
    }

    /// Whether the cart holds `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.lines.contains_key(id)
    }

    /// Lines ordered by product id.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.values()
    }

    /// Add `quantity` to an existing line. Returns `None` if there is no line.
    pub fn increase(&mut self, id: &str, quantity: u32) -> Option<&CartLine> {
        let line = self.lines.get_mut(id)?;
        line.quantity = line.quantity.saturating_add(quantity.max(1));

        Some(line)
    }

    /// Add a line, merging into an existing line for the same product.
    ///
    /// A quantity below one counts as one.
    pub fn insert(&mut self, mut line: CartLine) -> &CartLine {
        line.quantity = line.quantity.max(1);
        let quantity = line.quantity;

        self.lines
            .entry(line.id.clone())
            .and_modify(|existing| existing.quantity = existing.quantity.saturating_add(quantity))
            .or_insert(line)
    }

    /// Remove the line for `id`.
    pub fn remove(&mut self, id: &str) -> Option<CartLine> {
        self.lines.remove(id)
    }

    /// Overwrite a line's quantity; zero or less removes the line.
    ///
    /// Returns `false` when there is no line for `id`.
    pub fn set_quantity(&mut self, id: &str, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.lines.remove(id).is_some();
        }

        match self.lines.get_mut(id) {
            Some(line) => {
                line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
                true
            }
            None => false,
        }
    }

    /// Sum of price times quantity over all lines.
    pub fn total(&self) -> u64 {
        self.iter()
            .fold(0, |total: u64, line| total.saturating_add(line.subtotal()))
    }

    /// Cart total as money.
    pub fn total_money(&self) -> Money<'static, Currency> {
        prices::money(self.total())
    }

    /// Sum of quantities over all lines, as shown on the cart badge.
    pub fn count(&self) -> u64 {
        self.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Drop lines without a positive quantity. Returns how many were dropped.
    pub(crate) fn discard_empty_lines(&mut self) -> usize {
        let before = self.lines.len();
        self.lines.retain(|_, line| line.quantity > 0);
        before - self.lines.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::products::tests::product;

    use super::*;

    fn line(id: &str, price: u64, quantity: u32) -> CartLine {
        CartLine::from_product(&product(id, "Item", "x", price), quantity)
    }

    #[test]
    fn insert_merges_quantities() {
        let mut cart = Cart::new();

        cart.insert(line("p1", 100, 2));
        cart.insert(line("p1", 100, 3));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("p1").map(|line| line.quantity), Some(5));
    }

    #[test]
    fn increase_only_touches_existing_lines() {
        let mut cart = Cart::new();

        assert!(cart.increase("p1", 1).is_none());

        cart.insert(line("p1", 100, 1));

        assert_eq!(cart.increase("p1", 4).map(|line| line.quantity), Some(5));
    }

    #[test]
    fn set_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        cart.insert(line("p1", 100, 2));

        assert!(cart.set_quantity("p1", 0));
        assert!(!cart.contains("p1"));
    }

    #[test]
    fn set_quantity_negative_removes_line() {
        let mut cart = Cart::new();
        cart.insert(line("p1", 100, 2));

        assert!(cart.set_quantity("p1", -3));
        assert!(cart.is_empty());
    }

    #[test]
    fn set_quantity_missing_line_is_noop() {
        let mut cart = Cart::new();

        assert!(!cart.set_quantity("p1", 4));
        assert!(cart.is_empty());
    }

    #[test]
    fn set_quantity_overwrites() {
        let mut cart = Cart::new();
        cart.insert(line("p1", 100, 2));

        cart.set_quantity("p1", 7);

        assert_eq!(cart.get("p1").map(|line| line.quantity), Some(7));
    }

    #[test]
    fn total_and_count() {
        let mut cart = Cart::new();
        cart.insert(line("p1", 100, 2));
        cart.insert(line("p2", 250, 3));

        assert_eq!(cart.total(), 950);
        assert_eq!(cart.count(), 5);
        assert_eq!(cart.total_money(), prices::money(950));
    }

    #[test]
    fn from_product_never_builds_an_empty_line() {
        assert_eq!(line("p1", 100, 0).quantity, 1);
    }

    #[test]
    fn serializes_as_object_keyed_by_id() -> testresult::TestResult {
        let mut cart = Cart::new();
        cart.insert(line("p1", 100, 2));

        let json = serde_json::to_value(&cart)?;

        assert_eq!(json["p1"]["quantity"], 2);
        assert_eq!(json["p1"]["id"], "p1");

        Ok(())
    }

    #[test]
    fn discard_empty_lines_drops_zero_quantities() -> testresult::TestResult {
        let mut cart: Cart = serde_json::from_str(
            r#"{"a":{"id":"a","name":"A","price":1,"quantity":0,"image":"","description":""},
                "b":{"id":"b","name":"B","price":1,"quantity":1,"image":"","description":""}}"#,
        )?;

        assert_eq!(cart.discard_empty_lines(), 1);
        assert!(cart.contains("b"));

        Ok(())
    }

    #[test]
    fn negative_stored_quantity_drops_only_that_line() -> testresult::TestResult {
        let mut cart: Cart = serde_json::from_str(
            r#"{"5":{"id":"5","name":"Dress","price":920,"quantity":2,"image":"","description":""},
                "7":{"id":"7","name":"Bag","price":500,"quantity":-3,"image":"","description":""}}"#,
        )?;

        assert_eq!(cart.discard_empty_lines(), 1);
        assert_eq!(cart.get("5").map(|line| line.quantity), Some(2));
        assert!(!cart.contains("7"));

        Ok(())
    }

    #[test]
    fn insert_never_stores_an_empty_line() {
        let mut cart = Cart::new();

        let stored = cart.insert(CartLine {
            quantity: 0,
            ..line("p1", 100, 1)
        });

        assert_eq!(stored.quantity, 1);
        assert_eq!(cart.count(), 1);
        assert_eq!(cart.total(), 100);
    }

    #[test]
    fn from_product_fills_in_a_missing_description() {
        let mut scarf = product("p1", "Scarf", "women", 400);
        scarf.description = String::new();

        let line = CartLine::from_product(&scarf, 1);

        assert_eq!(line.description, PLACEHOLDER_DESCRIPTION);
    }
}
