//! An order: one quantity per menu item plus the rounded total.
//!
//! Orders come in two flavours, distinguished by [`OrderOwner`]:
//! - a diner's own order ([`OrderOwner::User`]),
//! - the aggregate "Total" order ([`OrderOwner::Total`]) whose quantities are the
//!   sum of every diner's quantities.
//!
//! Lines are kept in catalog order, one per item, so line `i` of any order always
//! refers to item `i` of the [`Catalog`]. Orders handed out by the
//! engine are snapshots: mutating them never affects engine state.

use crate::catalog::Catalog;
use crate::model::{round_money, ItemId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::Display;

/// Type-safe identifier for diners.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who an [`Order`] belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrderOwner {
    /// The aggregate order, displayed as `"Total"`.
    Total,
    User(UserId),
}

impl Display for OrderOwner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderOwner::Total => f.write_str("Total"),
            OrderOwner::User(id) => write!(f, "{id}"),
        }
    }
}

impl Serialize for OrderOwner {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineSelection {
    pub item_id: ItemId,
    pub quantity: u64,
}

/// Which lines a snapshot should keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineFilter {
    #[default]
    All,
    /// Only lines with a quantity above zero.
    NonZero,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub owner: OrderOwner,
    lines: Vec<LineSelection>,
    pub total: Decimal,
}

impl Order {
    /// Creates an order with a zero quantity for every catalog item.
    pub fn blank(owner: OrderOwner, catalog: &Catalog) -> Self {
        Self {
            owner,
            lines: catalog
                .items()
                .iter()
                .map(|item| LineSelection {
                    item_id: item.id.clone(),
                    quantity: 0,
                })
                .collect(),
            total: Decimal::ZERO,
        }
    }

    pub fn lines(&self) -> &[LineSelection] {
        &self.lines
    }

    pub fn quantity_of(&self, item_id: &ItemId) -> Option<u64> {
        self.lines
            .iter()
            .find(|line| &line.item_id == item_id)
            .map(|line| line.quantity)
    }

    /// Sum of all quantities.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|line| line.quantity == 0)
    }

    /// Returns a copy keeping only the lines selected by `filter`.
    ///
    /// The total is carried over unchanged; a filtered copy is a view for
    /// display and must not be fed back into the engine.
    pub fn filtered(&self, filter: LineFilter) -> Order {
        match filter {
            LineFilter::All => self.clone(),
            LineFilter::NonZero => Order {
                owner: self.owner.clone(),
                lines: self
                    .lines
                    .iter()
                    .filter(|line| line.quantity > 0)
                    .cloned()
                    .collect(),
                total: self.total,
            },
        }
    }

    pub(crate) fn quantity_at(&self, index: usize) -> u64 {
        self.lines.get(index).map_or(0, |line| line.quantity)
    }

    pub(crate) fn set_quantity_at(&mut self, index: usize, quantity: u64) {
        if let Some(line) = self.lines.get_mut(index) {
            line.quantity = quantity;
        }
    }

    /// Sum of `quantity * price` over all lines, rounded once at the end.
    ///
    /// `None` if the sum does not fit in a [`Decimal`].
    pub(crate) fn checked_total(&self, catalog: &Catalog) -> Option<Decimal> {
        self.lines
            .iter()
            .zip(catalog.items())
            .try_fold(Decimal::ZERO, |sum, (line, item)| {
                Decimal::from(line.quantity)
                    .checked_mul(item.price)
                    .and_then(|amount| sum.checked_add(amount))
            })
            .map(round_money)
    }

    pub(crate) fn clear(&mut self) {
        for line in &mut self.lines {
            line.quantity = 0;
        }
        self.total = Decimal::ZERO;
    }
}

/// One-line summary listing only the non-zero lines.
impl Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (total {:.2})", self.owner, self.total)?;
        for line in self.lines.iter().filter(|line| line.quantity > 0) {
            write!(f, ", {}: {}", line.item_id, line.quantity)?;
        }
        Ok(())
    }
}
