//! A dish that can be ordered.
//!
//! Menu items are created once when the [`Catalog`](crate::catalog::Catalog) is
//! loaded and never change afterwards. The item's `name` doubles as its stable
//! key ([`ItemId`]), which is also the form-field name callers use when they
//! submit quantities.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::Display;

/// Type-safe identifier for menu items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub id: ItemId,
    pub display_name: String,
    pub price: Decimal,
    /// Secondary display name shown next to the primary one.
    pub chinese_name: Option<String>,
    pub image_url: Option<String>,
}

impl MenuItem {
    /// Creates a new MenuItem whose id and display name are both `name`.
    ///
    /// # Arguments
    /// * `name` - Dish name, used as the stable key
    /// * `price` - Unit price
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        let name = name.into();
        Self {
            id: ItemId(name.clone()),
            display_name: name,
            price,
            chinese_name: None,
            image_url: None,
        }
    }

    pub fn with_chinese_name(mut self, chinese_name: impl Into<String>) -> Self {
        self.chinese_name = Some(chinese_name.into());
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}
