//! Error types for menu loading.

use crate::model::ItemId;
use rust_decimal::Decimal;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the menu.
///
/// Every variant is fatal at startup: the system refuses to serve with a
/// missing, malformed or empty menu.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The menu source could not be read.
    #[error("Cannot read menu {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The menu source is not a valid JSON list of items.
    #[error("Malformed menu: {0}")]
    Parse(#[from] serde_json::Error),

    /// The menu contains no items.
    #[error("Menu has no items")]
    Empty,

    /// An item has an empty name and could never be selected.
    #[error("Menu item at position {position} has an empty name")]
    EmptyName { position: usize },

    /// Two items share the same name.
    #[error("Duplicate menu item: {0}")]
    DuplicateItem(ItemId),

    /// An item has a negative price.
    #[error("Invalid price {price} for menu item {item}")]
    InvalidPrice { item: ItemId, price: Decimal },
}
