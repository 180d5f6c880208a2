//! Trendora CLI

use std::{
    io::{self, Write},
    process::ExitCode,
};

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use trendora::{
    cart::quantity::{DEFAULT_MAX_QUANTITY, DEFAULT_MIN_QUANTITY, clamp_quantity, parse_quantity},
    catalog::{DEFAULT_LIMIT, FilterCriteria, PriceRange, SortKey},
    config::Config,
    fixtures::FixtureError,
    observability::{ObservabilityError, init_logging},
    prices::format_price,
    render::{self, RenderError},
    storage::{Storage, StorageError},
    storefront::{Listing, Storefront, StorefrontError},
    suggestions::suggest,
};

#[derive(Debug, Parser)]
#[command(name = "trendora", about = "Trendora storefront", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the catalog
    Products(ProductsCommand),

    /// List categories with product counts
    Categories,

    /// Suggest search terms
    Suggest {
        /// Partial search text
        query: String,
    },

    /// Manage the cart
    Cart(CartCommand),

    /// Manage the wishlist
    Wishlist(WishlistCommand),
}

#[derive(Debug, Args)]
struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// List products matching filters
    List(ListArgs),

    /// Show the product page
    Show {
        /// Product id
        id: String,
    },

    /// Search names, descriptions, tags and categories
    Search {
        /// Search text
        query: String,
    },

    /// Featured products
    Featured {
        /// Maximum number of products
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
    },

    /// Trending products
    Trending {
        /// Maximum number of products
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
    },
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Only this category
    #[arg(long)]
    category: Option<String>,

    /// Price preset (0-4000, 4000-8000, 8000-16000, 16000+)
    #[arg(long, conflicts_with_all = ["min_price", "max_price"])]
    price: Option<String>,

    /// Lowest price
    #[arg(long)]
    min_price: Option<u64>,

    /// Highest price
    #[arg(long)]
    max_price: Option<u64>,

    /// Lowest rating
    #[arg(long, default_value_t = 0.0)]
    min_rating: f32,

    /// Hide out of stock products
    #[arg(long)]
    in_stock: bool,

    /// Search text
    #[arg(long, default_value = "")]
    search: String,

    /// Sort order (name, price-low, price-high, rating, newest, popular)
    #[arg(long, default_value = "name")]
    sort: SortKey,
}

impl ListArgs {
    fn criteria(self) -> FilterCriteria {
        let defaults = PriceRange::default();
        let mut criteria = FilterCriteria::default()
            .price_range(PriceRange::new(
                self.min_price.unwrap_or(defaults.min),
                self.max_price.unwrap_or(defaults.max),
            ))
            .min_rating(self.min_rating)
            .search(self.search)
            .sort_by(self.sort);

        if let Some(category) = self.category {
            criteria = criteria.category(category);
        }

        if let Some(preset) = self.price {
            criteria = criteria.price_preset(&preset);
        }

        if self.in_stock {
            criteria = criteria.in_stock_only();
        }

        criteria
    }
}

#[derive(Debug, Args)]
struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Add a product
    Add {
        /// Product id
        id: String,

        /// Quantity, as typed into the product page
        #[arg(short, long, default_value = "1", allow_hyphen_values = true)]
        quantity: String,
    },

    /// Remove a product
    Remove {
        /// Product id
        id: String,
    },

    /// Set a product's quantity; zero or less removes it
    Set {
        /// Product id
        id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Show the cart
    Show,

    /// Empty the cart
    Clear,
}

#[derive(Debug, Args)]
struct WishlistCommand {
    #[command(subcommand)]
    command: WishlistSubcommand,
}

#[derive(Debug, Subcommand)]
enum WishlistSubcommand {
    /// Save a product
    Add {
        /// Product id
        id: String,
    },

    /// Forget a product
    Remove {
        /// Product id
        id: String,
    },

    /// Save or forget a product
    Toggle {
        /// Product id
        id: String,
    },

    /// Show saved products
    Show,

    /// Add a saved product to the cart
    Move {
        /// Product id
        id: String,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Storefront(#[from] StorefrontError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Observability(#[from] ObservabilityError),

    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),

    #[error("Product {0} not found")]
    NotFound(String),
}

fn main() -> ExitCode {
    _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            #[expect(
                clippy::print_stderr,
                reason = "errors are reported on stderr whether or not logging is enabled"
            )]
            {
                eprintln!("{error}");
            }

            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    init_logging(&cli.config.logging)?;

    let catalog = cli.config.load_catalog()?;
    let storage = cli.config.storage();
    let storefront = Storefront::new(&catalog, &storage);

    tracing::debug!(
        products = catalog.len(),
        data_dir = %cli.config.data_dir.display(),
        "storefront ready"
    );

    let mut out = io::stdout().lock();

    match cli.command {
        Commands::Products(ProductsCommand { command }) => {
            run_products(&storefront, command, &mut out)
        }
        Commands::Categories => {
            render::write_categories(&mut out, &catalog.get_categories())?;

            if let Some(range) = catalog.get_price_range() {
                writeln!(
                    out,
                    "Prices: {} - {}",
                    format_price(range.min),
                    format_price(range.max)
                )?;
            }

            Ok(())
        }
        Commands::Suggest { query } => Ok(render::write_suggestions(&mut out, &suggest(&query))?),
        Commands::Cart(CartCommand { command }) => run_cart(&storefront, command, &mut out),
        Commands::Wishlist(WishlistCommand { command }) => {
            run_wishlist(&storefront, command, &mut out)
        }
    }
}

fn run_products<S: Storage>(
    storefront: &Storefront<'_, S>,
    command: ProductsSubcommand,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let catalog = storefront.catalog();

    match command {
        ProductsSubcommand::List(args) => {
            render::write_listing(out, &storefront.listing(&args.criteria()))?;
        }
        ProductsSubcommand::Show { id } => {
            let details = storefront
                .product_details(&id)
                .ok_or(CliError::NotFound(id))?;

            render::write_product_details(out, &details)?;
        }
        ProductsSubcommand::Search { query } => {
            let cards = storefront.cards(catalog.search(&query));
            let count_label = format!("{} Products Found", cards.len());

            render::write_listing(out, &Listing { cards, count_label })?;
        }
        ProductsSubcommand::Featured { limit } => {
            let cards = storefront.cards(catalog.get_featured(limit));
            let count_label = format!("{} Featured", cards.len());

            render::write_listing(out, &Listing { cards, count_label })?;
        }
        ProductsSubcommand::Trending { limit } => {
            let cards = storefront.cards(catalog.get_trending(limit));
            let count_label = format!("{} Trending", cards.len());

            render::write_listing(out, &Listing { cards, count_label })?;
        }
    }

    Ok(())
}

fn run_cart<S: Storage>(
    storefront: &Storefront<'_, S>,
    command: CartSubcommand,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let cart = storefront.cart();

    match command {
        CartSubcommand::Add { id, quantity } => {
            let quantity = clamp_quantity(
                i64::from(parse_quantity(&quantity)),
                DEFAULT_MIN_QUANTITY,
                DEFAULT_MAX_QUANTITY,
            );
            let line = storefront.add_to_cart_checked(&id, i64::from(quantity))?;

            writeln!(out, "Added {quantity} x {} ({} in cart)", line.name, line.quantity)?;
        }
        CartSubcommand::Remove { id } => {
            if cart.remove(&id)? {
                writeln!(out, "Removed {id}")?;
            } else {
                writeln!(out, "{id} is not in the cart")?;
            }
        }
        CartSubcommand::Set { id, quantity } => {
            if !cart.set_quantity(&id, quantity)? {
                writeln!(out, "{id} is not in the cart")?;
            } else if quantity <= 0 {
                writeln!(out, "Removed {id}")?;
            } else {
                writeln!(out, "{id} quantity set to {quantity}")?;
            }
        }
        CartSubcommand::Show => render::write_cart(out, &cart.load())?,
        CartSubcommand::Clear => {
            cart.clear()?;

            writeln!(out, "Cart cleared")?;
        }
    }

    Ok(())
}

fn run_wishlist<S: Storage>(
    storefront: &Storefront<'_, S>,
    command: WishlistSubcommand,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let wishlist = storefront.wishlist();

    match command {
        WishlistSubcommand::Add { id } => {
            if wishlist.add(&id)? {
                writeln!(out, "Saved {id}")?;
            } else {
                writeln!(out, "{id} is already saved")?;
            }
        }
        WishlistSubcommand::Remove { id } => {
            if wishlist.remove(&id)? {
                writeln!(out, "Forgot {id}")?;
            } else {
                writeln!(out, "{id} is not saved")?;
            }
        }
        WishlistSubcommand::Toggle { id } => {
            if wishlist.toggle(&id)? {
                writeln!(out, "Saved {id}")?;
            } else {
                writeln!(out, "Forgot {id}")?;
            }
        }
        WishlistSubcommand::Show => render::write_wishlist(out, &wishlist.load())?,
        WishlistSubcommand::Move { id } => match storefront.move_to_cart(&id)? {
            Some(line) => writeln!(out, "Added {} to the cart", line.name)?,
            None => writeln!(out, "{id} is not saved")?,
        },
    }

    Ok(())
}
