//! Cart and wishlist behaviour over the built-in catalog.

use testresult::TestResult;
use trendora::prelude::*;

#[test]
fn repeat_adds_merge_and_zero_quantity_removes() -> TestResult {
    let catalog = builtin_catalog()?;
    let storage = MemoryStorage::new();
    let cart = CartStore::new(&catalog, &storage);

    cart.add("1", 2)?;
    cart.add("1", 3)?;
    cart.add("10", 1)?;

    let stored = cart.load();

    assert_eq!(stored.len(), 2);
    assert_eq!(stored.get("1").map(|line| line.quantity), Some(5));
    assert_eq!(cart.total(), 1459 * 5 + 700);

    cart.set_quantity("1", 0)?;

    assert!(!cart.load().contains("1"));
    assert_eq!(cart.total(), 700);
    assert_eq!(cart.count(), 1);

    Ok(())
}

#[test]
fn total_matches_sum_over_lines() -> TestResult {
    let catalog = builtin_catalog()?;
    let storage = MemoryStorage::new();
    let cart = CartStore::new(&catalog, &storage);

    for (id, quantity) in [("3", 1), ("9", 4), ("14", 2), ("missing", 3)] {
        cart.add(id, quantity)?;
    }

    let expected: u64 = cart
        .lines()
        .iter()
        .map(|line| line.price * u64::from(line.quantity))
        .sum();

    assert_eq!(cart.total(), expected);
    assert_eq!(cart.count(), 10);

    Ok(())
}

#[test]
fn wishlist_add_twice_keeps_one_entry() -> TestResult {
    let catalog = builtin_catalog()?;
    let storage = MemoryStorage::new();
    let wishlist = WishlistStore::new(&catalog, &storage);

    assert!(wishlist.add("1")?);
    assert!(!wishlist.add("1")?);
    assert_eq!(wishlist.len(), 1);

    Ok(())
}

#[test]
fn wishlist_toggle_round_trips_to_empty() -> TestResult {
    let catalog = builtin_catalog()?;
    let storage = MemoryStorage::new();
    let wishlist = WishlistStore::new(&catalog, &storage);

    assert!(wishlist.toggle("1")?);
    assert_eq!(wishlist.ids(), ["1"]);
    assert!(!wishlist.toggle("1")?);
    assert!(wishlist.is_empty());

    Ok(())
}

#[test]
fn wishlist_snapshots_the_catalog_product() -> TestResult {
    let catalog = builtin_catalog()?;
    let storage = MemoryStorage::new();
    let wishlist = WishlistStore::new(&catalog, &storage);

    wishlist.add("10")?;

    assert_eq!(wishlist.get("10").as_ref(), catalog.get_by_id("10"));

    Ok(())
}

#[test]
fn storefront_moves_wishlist_items_into_the_cart() -> TestResult {
    let catalog = builtin_catalog()?;
    let storage = MemoryStorage::new();
    let storefront = Storefront::new(&catalog, &storage);

    storefront.wishlist().add("8")?;
    storefront.move_to_cart("8")?;
    storefront.move_to_cart("8")?;

    let cart = storefront.cart().load();

    assert_eq!(cart.get("8").map(|line| line.quantity), Some(2));
    assert_eq!(
        storefront.badges(),
        Badges {
            cart: 2,
            wishlist: 1
        }
    );

    Ok(())
}

#[test]
fn product_page_for_unknown_id_is_missing() -> TestResult {
    let catalog = builtin_catalog()?;
    let storage = MemoryStorage::new();
    let storefront = Storefront::new(&catalog, &storage);

    assert!(storefront.product_details("nonexistent").is_none());

    let blazer = storefront.product_details("1").ok_or("blazer missing")?;

    assert_eq!(blazer.card.discount, Some(84));
    assert_eq!(blazer.related.len(), 4);
    assert!(blazer.related.iter().all(|card| card.product.id != "1"));

    Ok(())
}
