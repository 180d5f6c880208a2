//! Terminal rendering
//!
//! Tables for the command line, written to any [`io::Write`].

use std::{io, ops::Range};

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::Cart,
    catalog::CategoryCount,
    prices::format_price,
    storefront::{Listing, ProductCard, ProductDetails},
    suggestions::Suggestion,
    wishlist::Wishlist,
};

/// Errors from rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    numeric: Range<usize>,
) -> Result<(), RenderError> {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(numeric), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}

fn card_record(card: &ProductCard<'_>) -> [String; 7] {
    let product = card.product;

    [
        product.id.clone(),
        product.name.clone(),
        product.category.clone(),
        format_price(product.price),
        card.discount.map(|points| format!("-{points}%")).unwrap_or_default(),
        format!("{} {:.1}", card.stars.to_text(), product.rating),
        if card.in_wishlist { "♥" } else { "" }.to_string(),
    ]
}

fn push_card_header(builder: &mut Builder) {
    builder.push_record(["ID", "Name", "Category", "Price", "Off", "Rating", "♥"]);
}

/// Write a product listing followed by its results line.
///
/// # Errors
///
/// Returns a [`RenderError`] if the output cannot be written.
pub fn write_listing(mut out: impl io::Write, listing: &Listing<'_>) -> Result<(), RenderError> {
    if !listing.is_empty() {
        let mut builder = Builder::default();

        push_card_header(&mut builder);

        for card in &listing.cards {
            builder.push_record(card_record(card));
        }

        write_table(&mut out, builder, 3..5)?;
    }

    writeln!(out, "{}", listing.count_label)?;

    Ok(())
}

/// Write the product page: details, then related products.
///
/// # Errors
///
/// Returns a [`RenderError`] if the output cannot be written.
pub fn write_product_details(
    mut out: impl io::Write,
    details: &ProductDetails<'_>,
) -> Result<(), RenderError> {
    let card = &details.card;
    let product = card.product;

    writeln!(out, "{}", product.name)?;
    writeln!(out, "{} ({} reviews)", card.stars.to_text(), product.reviews)?;

    match (card.discount, product.original_price) {
        (Some(points), Some(original)) => writeln!(
            out,
            "{} was {} (-{points}%)",
            format_price(product.price),
            format_price(original)
        )?,
        _ => writeln!(out, "{}", format_price(product.price))?,
    }

    writeln!(out, "{}", card.stock_label)?;

    if !product.description.is_empty() {
        writeln!(out, "\n{}", product.description)?;
    }

    for (label, values) in [("Sizes", &product.sizes), ("Colors", &product.colors)] {
        if !values.is_empty() {
            writeln!(out, "{label}: {}", values.join(", "))?;
        }
    }

    if card.in_wishlist {
        writeln!(out, "♥ In your wishlist")?;
    }

    if !details.related.is_empty() {
        let mut builder = Builder::default();

        push_card_header(&mut builder);

        for related in &details.related {
            builder.push_record(card_record(related));
        }

        writeln!(out, "\nYou may also like")?;
        write_table(&mut out, builder, 3..5)?;
    }

    Ok(())
}

/// Write the cart lines and total.
///
/// # Errors
///
/// Returns a [`RenderError`] if the output cannot be written.
pub fn write_cart(mut out: impl io::Write, cart: &Cart) -> Result<(), RenderError> {
    if cart.is_empty() {
        writeln!(out, "Your cart is empty")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["ID", "Item", "Qty", "Price", "Subtotal"]);

    for line in cart.iter() {
        builder.push_record([
            line.id.clone(),
            line.name.clone(),
            line.quantity.to_string(),
            format_price(line.price),
            format_price(line.subtotal()),
        ]);
    }

    write_table(&mut out, builder, 2..5)?;

    writeln!(out, "Items: {}", cart.count())?;
    writeln!(out, "Total: {}", cart.total_money())?;

    Ok(())
}

/// Write the saved products.
///
/// # Errors
///
/// Returns a [`RenderError`] if the output cannot be written.
pub fn write_wishlist(mut out: impl io::Write, wishlist: &Wishlist) -> Result<(), RenderError> {
    if wishlist.is_empty() {
        writeln!(out, "Your wishlist is empty")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["ID", "Name", "Price", "Stock"]);

    for item in wishlist.iter() {
        builder.push_record([
            item.id.clone(),
            item.name.clone(),
            format_price(item.price),
            item.stock_label(),
        ]);
    }

    write_table(&mut out, builder, 2..3)?;

    writeln!(out, "{} saved", wishlist.len())?;

    Ok(())
}

/// Write category names with product counts.
///
/// # Errors
///
/// Returns a [`RenderError`] if the output cannot be written.
pub fn write_categories(
    mut out: impl io::Write,
    categories: &[CategoryCount],
) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["Category", "Products"]);

    for category in categories {
        builder.push_record([category.name.clone(), category.count.to_string()]);
    }

    write_table(&mut out, builder, 1..2)
}

/// Write one suggestion per line, matches wrapped in brackets.
///
/// # Errors
///
/// Returns a [`RenderError`] if the output cannot be written.
pub fn write_suggestions(
    mut out: impl io::Write,
    suggestions: &[Suggestion],
) -> Result<(), RenderError> {
    for suggestion in suggestions {
        writeln!(out, "{}", suggestion.marked("[", "]"))?;
    }

    Ok(())
}
