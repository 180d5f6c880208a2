//! Prices
//!
//! Catalog prices are whole rupees. These helpers lift them into
//! [`Money`] for display and compute card discounts.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{
    Money,
    iso::{self, Currency},
};

/// Storefront currency.
pub const CURRENCY: &Currency = iso::INR;

/// Lift a whole-rupee amount into [`Money`].
pub fn money(amount: u64) -> Money<'static, Currency> {
    Money::from_major(i64::try_from(amount).unwrap_or(i64::MAX), CURRENCY)
}

/// Format a whole-rupee amount for display.
pub fn format_price(amount: u64) -> String {
    money(amount).to_string()
}

/// Fractional discount of `price` against `original_price`.
///
/// Returns `None` when there is no original price or the product is not
/// actually cheaper than it.
pub fn discount(price: u64, original_price: Option<u64>) -> Option<Percentage> {
    let original = original_price.filter(|original| *original > price)?;

    let saved = Decimal::from_u64(original.saturating_sub(price))?;
    let original = Decimal::from_u64(original)?;

    Some(Percentage::from(saved / original))
}

/// Discount rounded to whole percent points, as printed on the card badge.
pub fn discount_points(price: u64, original_price: Option<u64>) -> Option<u32> {
    let percentage = discount(price, original_price)?;

    // `Percentage` is a fraction (e.g. 0.25), so multiply by 100 for points.
    let points = ((percentage * Decimal::ONE) * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()?;

    (points > 0).then_some(points)
}
