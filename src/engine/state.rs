//! # Aggregation State
//!
//! The data the engine guards: the aggregate "Total" order and one order per
//! diner. Everything here is synchronous and lock-free; the
//! [`OrderEngine`](super::OrderEngine) wraps an [`AggregationState`] in a single
//! reader-writer lock and calls these methods inside its critical sections.
//!
//! ## The aggregate invariant
//!
//! For every item `i`:
//!
//! ```text
//! aggregate.quantity[i] == Σ users[u].quantity[i]
//! aggregate.total       == Σ users[u].total
//! ```
//!
//! The aggregate is never re-summed. Each update adjusts it by the difference
//! between a diner's new and old values, so the invariant holds only if every
//! such delta is applied exactly once, together with the diner's own change.

use super::quantity::{parse_quantity, QuantityRejected};
use super::EngineError;
use crate::catalog::Catalog;
use crate::model::{Order, OrderOwner, UserId};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;

/// Outcome of [`AggregationState::ensure_user`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnsuredUser {
    pub order: Order,
    /// `true` if this call created the order.
    pub created: bool,
}

/// A submitted value that was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedField {
    pub key: String,
    /// `None` when the key is not a menu item.
    pub reason: Option<QuantityRejected>,
}

/// What an update changed. Skipped fields are reported back so the caller can
/// log them after the lock is released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedUpdate {
    pub order: Order,
    pub old_total: Decimal,
    pub changed_lines: usize,
    pub skipped: Vec<SkippedField>,
}

#[derive(Debug, Clone)]
pub struct AggregationState {
    catalog: Arc<Catalog>,
    aggregate: Order,
    users: HashMap<UserId, Order>,
}

impl AggregationState {
    /// Empty state: aggregate with every quantity at zero, no diners.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let aggregate = Order::blank(OrderOwner::Total, &catalog);
        Self {
            catalog,
            aggregate,
            users: HashMap::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn aggregate(&self) -> &Order {
        &self.aggregate
    }

    pub fn user(&self, user_id: &UserId) -> Option<&Order> {
        self.users.get(user_id)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Creates a blank order for `user_id` unless one already exists.
    pub fn ensure_user(&mut self, user_id: &UserId) -> Result<EnsuredUser, EngineError> {
        if user_id.is_empty() {
            return Err(EngineError::EmptyUserId);
        }

        let mut created = false;
        let order = self.users.entry(user_id.clone()).or_insert_with(|| {
            created = true;
            Order::blank(OrderOwner::User(user_id.clone()), &self.catalog)
        });

        Ok(EnsuredUser {
            order: order.clone(),
            created,
        })
    }

    /// Applies a diner's proposed quantities and moves the aggregate by the same
    /// amounts.
    ///
    /// Keys that are not catalog items, values that are not non-negative
    /// integers and values whose amount would overflow the diner's or the
    /// aggregate total are skipped; the rest of the update still applies. The
    /// state is left untouched if `user_id` has no order.
    pub fn update_user<I, K, V>(
        &mut self,
        user_id: &UserId,
        proposed: I,
    ) -> Result<AppliedUpdate, EngineError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let user = self
            .users
            .get_mut(user_id)
            .ok_or_else(|| EngineError::UnknownUser(user_id.clone()))?;

        // Changes are staged on a copy and committed only once every total is
        // known to fit.
        let old_total = user.total;
        let other_users_total = self.aggregate.total - old_total;
        let mut next = user.clone();
        let mut new_total = old_total;
        let mut changed_lines = 0;
        let mut skipped = Vec::new();

        for (key, raw) in proposed {
            let (key, raw) = (key.as_ref(), raw.as_ref());
            let Some(index) = self.catalog.index_of_key(key) else {
                skipped.push(SkippedField {
                    key: key.to_string(),
                    reason: None,
                });
                continue;
            };

            let quantity = match parse_quantity(raw) {
                Ok(quantity) => quantity,
                Err(reason) => {
                    skipped.push(SkippedField {
                        key: key.to_string(),
                        reason: Some(reason),
                    });
                    continue;
                }
            };

            let current = next.quantity_at(index);
            if quantity == current {
                continue;
            }
            next.set_quantity_at(index, quantity);
            let total = next
                .checked_total(&self.catalog)
                .filter(|total| other_users_total.checked_add(*total).is_some());
            match total {
                Some(total) => {
                    new_total = total;
                    changed_lines += 1;
                }
                None => {
                    next.set_quantity_at(index, current);
                    skipped.push(SkippedField {
                        key: key.to_string(),
                        reason: Some(QuantityRejected::OutOfRange(raw.to_string())),
                    });
                }
            }
        }

        for index in 0..next.lines().len() {
            let (current, quantity) = (user.quantity_at(index), next.quantity_at(index));
            if quantity != current {
                // aggregate >= current always holds, so this never underflows.
                let aggregate = self.aggregate.quantity_at(index);
                self.aggregate
                    .set_quantity_at(index, aggregate - current + quantity);
            }
        }
        next.total = new_total;
        self.aggregate.total = other_users_total + new_total;
        *user = next;

        Ok(AppliedUpdate {
            order: user.clone(),
            old_total,
            changed_lines,
            skipped,
        })
    }

    /// Drops every diner's order and zeroes the aggregate.
    pub fn reset(&mut self) {
        self.users.clear();
        self.aggregate.clear();
    }

    /// Copies the aggregate and every diner's order, diners sorted by id.
    pub fn snapshot(&self) -> StateSnapshot {
        let mut entries: Vec<(&UserId, &Order)> = self.users.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        StateSnapshot {
            aggregate: self.aggregate.clone(),
            users: entries.into_iter().map(|(_, order)| order.clone()).collect(),
        }
    }
}

/// A point-in-time copy of the whole state, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateSnapshot {
    pub aggregate: Order,
    pub users: Vec<Order>,
}

impl StateSnapshot {
    /// Checks the aggregate against a full re-sum of the diners' orders.
    pub fn is_consistent(&self) -> bool {
        let quantities_match = self.aggregate.lines().iter().enumerate().all(|(i, line)| {
            let sum: u64 = self.users.iter().map(|order| order.quantity_at(i)).sum();
            line.quantity == sum
        });
        let total: Decimal = self.users.iter().map(|order| order.total).sum();
        quantities_match && self.aggregate.total == total
    }
}

impl Display for StateSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.aggregate)?;
        for order in &self.users {
            write!(f, "; {order}")?;
        }
        Ok(())
    }
}
