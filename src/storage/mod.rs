//! Storage
//!
//! A synchronous string key/value store in the shape of browser local
//! storage. Stores keep one JSON document per key and go through
//! [`load_json`] and [`save_json`] so that reads are fail-soft and writes
//! are checked.

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

mod directory;
mod memory;

pub use directory::DirectoryStorage;
pub use memory::MemoryStorage;

/// Default key holding the cart.
pub const CART_KEY: &str = "trendora_cart";

/// Default key holding the wishlist.
pub const WISHLIST_KEY: &str = "trendora_wishlist_items";

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error in a file-backed store
    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialized to JSON
    #[error("Failed to serialize stored value: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The key cannot be used by this backend
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// Key/value storage.
///
/// Methods take `&self` so several stores can share one handle; backends use
/// interior mutability.
pub trait Storage {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Storage keys used by the cart and wishlist stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    /// Cart key
    pub cart: String,

    /// Wishlist key
    pub wishlist: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            cart: CART_KEY.to_string(),
            wishlist: WISHLIST_KEY.to_string(),
        }
    }
}

/// Load and decode the JSON document under `key`.
///
/// Missing keys, unreadable storage and malformed JSON all yield
/// `T::default()`; the latter two are logged.
pub fn load_json<T>(storage: &impl Storage, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    read_json(storage, key).unwrap_or_else(|error| {
        tracing::warn!(key, %error, "storage read failed, treating as empty");
        T::default()
    })
}

/// Like [`load_json`], but a backend that cannot be read is an error.
///
/// Used before a write so that data which could not be read is never
/// overwritten. Missing keys and malformed JSON still yield `T::default()`.
///
/// # Errors
///
/// Returns an error if the backend cannot be read.
pub fn read_json<T>(storage: &impl Storage, key: &str) -> Result<T, StorageError>
where
    T: DeserializeOwned + Default,
{
    let Some(raw) = storage.get_item(key)? else {
        return Ok(T::default());
    };

    Ok(serde_json::from_str(&raw).unwrap_or_else(|error| {
        tracing::warn!(key, %error, "malformed stored JSON, treating as empty");
        T::default()
    }))
}

/// Encode `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn save_json<T>(storage: &impl Storage, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)?;

    storage.set_item(key, &raw)
}
