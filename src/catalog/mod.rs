//! # Menu Catalog
//!
//! The immutable, ordered list of dishes every order is built from.
//!
//! A [`Catalog`] is loaded once at startup and shared (behind an `Arc`) by the
//! engine and anyone rendering orders. It has no mutation operations, so it is
//! safe to read from any task without locking.
//!
//! ## Source format
//!
//! The on-disk menu is a JSON array of records:
//!
//! ```json
//! [
//!   { "name": "Dumplings", "chinese_name": "饺子", "price": 6.5, "image_url": "/static/dumplings.jpg" },
//!   { "name": "Tea", "price": "1.10" }
//! ]
//! ```
//!
//! `price` may be a JSON number or a string; either way it is read as an exact
//! decimal. Unknown fields are ignored.
//!
//! ## Ordering
//!
//! Item order matches source order. Every [`Order`](crate::model::Order) lays its
//! lines out in this order, so an item's position in the catalog is also its
//! line index in every order.

pub mod error;

pub use error::*;

use crate::model::{ItemId, MenuItem};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// One record of the menu source.
#[derive(Debug, Deserialize)]
struct MenuRecord {
    name: String,
    price: Decimal,
    #[serde(default)]
    chinese_name: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
}

impl From<MenuRecord> for MenuItem {
    fn from(record: MenuRecord) -> Self {
        MenuItem {
            id: ItemId(record.name.clone()),
            display_name: record.name,
            price: record.price,
            chinese_name: record.chinese_name.filter(|s| !s.is_empty()),
            image_url: record.image_url.filter(|s| !s.is_empty()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<MenuItem>,
    index: HashMap<ItemId, usize>,
}

impl Catalog {
    /// Builds a catalog from items in display order.
    ///
    /// # Errors
    /// - [`CatalogError::Empty`] if `items` is empty
    /// - [`CatalogError::EmptyName`] if an item has an empty id
    /// - [`CatalogError::DuplicateItem`] if two items share an id
    /// - [`CatalogError::InvalidPrice`] if a price is negative
    pub fn new(items: Vec<MenuItem>) -> Result<Self, CatalogError> {
        if items.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut index = HashMap::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            if item.id.as_str().is_empty() {
                return Err(CatalogError::EmptyName { position });
            }
            if item.price < Decimal::ZERO {
                return Err(CatalogError::InvalidPrice {
                    item: item.id.clone(),
                    price: item.price,
                });
            }
            if index.insert(item.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateItem(item.id.clone()));
            }
        }

        Ok(Self { items, index })
    }

    /// Parses a catalog from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<MenuRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    /// Parses a catalog from any reader yielding JSON.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let records: Vec<MenuRecord> = serde_json::from_reader(reader)?;
        Self::from_records(records)
    }

    /// Loads a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading menu");
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&json)?;
        info!(path = %path.display(), items = catalog.len(), "Menu loaded");
        Ok(catalog)
    }

    fn from_records(records: Vec<MenuRecord>) -> Result<Self, CatalogError> {
        Self::new(records.into_iter().map(MenuItem::from).collect())
    }

    /// Items in source order.
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn get(&self, id: &ItemId) -> Option<&MenuItem> {
        self.index_of(id).map(|i| &self.items[i])
    }

    /// Position of an item, which is also its line index in every order.
    pub fn index_of(&self, id: &ItemId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Looks up an item by the raw key a caller submitted.
    pub(crate) fn index_of_key(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
