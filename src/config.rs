//! Command line configuration

use std::path::PathBuf;

use clap::Args;

use crate::{
    catalog::Catalog,
    fixtures::{self, Fixture, FixtureError},
    storage::DirectoryStorage,
};

/// Default directory holding the cart and wishlist files.
pub const DEFAULT_DATA_DIR: &str = ".trendora";

/// Default catalog fixture name.
pub const DEFAULT_CATALOG: &str = "trendora";

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, global = true, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Storefront settings shared by every command.
#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Directory holding the cart and wishlist
    #[arg(long, global = true, env = "TRENDORA_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Fixture directory to load the catalog from; the built-in catalog is used when unset
    #[arg(long, global = true, env = "TRENDORA_FIXTURES")]
    pub fixtures: Option<PathBuf>,

    /// Catalog fixture name within the fixture directory
    #[arg(long, global = true, env = "TRENDORA_CATALOG", default_value = DEFAULT_CATALOG)]
    pub catalog: String,

    /// Logging settings
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load the configured catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the fixture cannot be read or parsed.
    pub fn load_catalog(&self) -> Result<Catalog, FixtureError> {
        match &self.fixtures {
            Some(base_path) => Fixture::with_base_path(base_path).load_catalog(&self.catalog),
            None => fixtures::builtin_catalog(),
        }
    }

    /// Storage under the data directory.
    pub fn storage(&self) -> DirectoryStorage {
        DirectoryStorage::new(&self.data_dir)
    }
}
