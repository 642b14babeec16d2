//! # Order Aggregation Engine
//!
//! The single source of truth for every order in the process.
//!
//! ## Locking discipline
//!
//! One [`tokio::sync::RwLock`] guards the whole [`AggregationState`]: the
//! aggregate and every diner's order. A write to any diner's order is also a
//! write to the aggregate, so both sit under the same lock.
//!
//! | Operation | Lock |
//! |-----------|------|
//! | [`ensure_user`](OrderEngine::ensure_user) | exclusive |
//! | [`update_user_selections`](OrderEngine::update_user_selections) | exclusive |
//! | [`reset`](OrderEngine::reset) | exclusive |
//! | [`read_aggregate`](OrderEngine::read_aggregate) | shared |
//! | [`user_order`](OrderEngine::user_order) | shared |
//! | [`snapshot`](OrderEngine::snapshot) | shared |
//!
//! Critical sections are short and synchronous: the only `.await` is the lock
//! acquisition itself. Nothing is logged, rendered or read from disk while the
//! lock is held; callers get owned snapshots and work on those.
//!
//! ## Ordering
//!
//! Writers serialize on the lock, so every reader observes a prefix of
//! completed writes and never a half-applied update. No order is promised
//! between two concurrent writers beyond mutual exclusion.

pub mod error;
pub mod quantity;
pub mod state;

pub use error::*;
pub use quantity::*;
pub use state::*;

use crate::catalog::Catalog;
use crate::model::{LineFilter, Order, UserId};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, enabled, info, warn, Level};

/// Owns all order state and the lock that guards it.
///
/// Construct one per process and share it behind an `Arc`.
#[derive(Debug)]
pub struct OrderEngine {
    catalog: Arc<Catalog>,
    state: RwLock<AggregationState>,
}

impl OrderEngine {
    /// Creates an engine with an all-zero aggregate and no diners.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let state = AggregationState::new(Arc::clone(&catalog));
        Self {
            catalog,
            state: RwLock::new(state),
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Returns the diner's order, creating a blank one on first contact.
    ///
    /// Check and insert happen under one exclusive lock, so two concurrent
    /// calls for the same id produce exactly one order.
    ///
    /// # Errors
    /// [`EngineError::EmptyUserId`] if `user_id` is empty.
    pub async fn ensure_user(&self, user_id: &UserId) -> Result<Order, EngineError> {
        let (ensured, dump) = {
            let mut state = self.state.write().await;
            let ensured = state.ensure_user(user_id)?;
            let dump = ensured.created.then(|| state_dump(&state)).flatten();
            (ensured, dump)
        };

        if ensured.created {
            info!(user = %user_id, "User created");
        } else {
            debug!(user = %user_id, "User already exists");
        }
        log_state(dump, Some(&ensured.order));
        Ok(ensured.order)
    }

    /// Applies submitted quantities to a diner's order and moves the aggregate
    /// by the same deltas.
    ///
    /// `proposed` maps item ids to raw text. Unknown items, values that are
    /// not non-negative integers and values whose amount would not fit in a
    /// total are skipped; the rest of the update applies. `proposed` is fully
    /// drained before the lock is taken.
    ///
    /// # Errors
    /// [`EngineError::UnknownUser`] if the diner has no order. Nothing is
    /// changed in that case.
    pub async fn update_user_selections<I, K, V>(
        &self,
        user_id: &UserId,
        proposed: I,
    ) -> Result<Order, EngineError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let proposed: Vec<(K, V)> = proposed.into_iter().collect();
        let (applied, dump) = {
            let mut state = self.state.write().await;
            let applied = state.update_user(user_id, proposed)?;
            (applied, state_dump(&state))
        };

        for field in &applied.skipped {
            match &field.reason {
                Some(reason) => {
                    warn!(user = %user_id, item = %field.key, %reason, "Ignoring quantity")
                }
                None => debug!(user = %user_id, item = %field.key, "Ignoring unknown menu item"),
            }
        }
        info!(
            user = %user_id,
            changed = applied.changed_lines,
            skipped = applied.skipped.len(),
            old_total = %applied.old_total,
            new_total = %applied.order.total,
            "Selections updated"
        );
        log_state(dump, Some(&applied.order));
        Ok(applied.order)
    }

    /// Copy of the aggregate "Total" order.
    pub async fn read_aggregate(&self, filter: LineFilter) -> Order {
        let aggregate = self.state.read().await.aggregate().filtered(filter);
        debug!(total = %aggregate.total, ?filter, "Aggregate read");
        aggregate
    }

    /// Copy of one diner's order.
    ///
    /// # Errors
    /// [`EngineError::UnknownUser`] if the diner has no order.
    pub async fn user_order(&self, user_id: &UserId) -> Result<Order, EngineError> {
        let order = self.state.read().await.user(user_id).cloned();
        debug!(user = %user_id, found = order.is_some(), "User order read");
        order.ok_or_else(|| EngineError::UnknownUser(user_id.clone()))
    }

    /// Copy of the aggregate and every diner's order.
    pub async fn snapshot(&self) -> StateSnapshot {
        self.state.read().await.snapshot()
    }

    pub async fn user_count(&self) -> usize {
        self.state.read().await.user_count()
    }

    /// Drops every diner's order and zeroes the aggregate. There is no undo.
    pub async fn reset(&self) {
        let (dropped, dump) = {
            let mut state = self.state.write().await;
            let dropped = state.user_count();
            state.reset();
            (dropped, state_dump(&state))
        };
        info!(dropped_users = dropped, "State reset");
        log_state(dump, None);
    }
}

/// What a write logs at debug level. Only the aggregate is copied under the
/// lock; the changed diner's order is already an owned result.
#[derive(Debug)]
struct StateDump {
    aggregate: Order,
    users: usize,
}

/// Copies the aggregate for the debug dump, only when debug output is enabled.
fn state_dump(state: &AggregationState) -> Option<StateDump> {
    enabled!(Level::DEBUG).then(|| StateDump {
        aggregate: state.aggregate().clone(),
        users: state.user_count(),
    })
}

fn log_state(dump: Option<StateDump>, changed: Option<&Order>) {
    let Some(dump) = dump else {
        return;
    };
    match changed {
        Some(order) => {
            debug!(users = dump.users, aggregate = %dump.aggregate, user = %order, "State")
        }
        None => debug!(users = dump.users, aggregate = %dump.aggregate, "State"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ItemId, MenuItem};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn engine() -> OrderEngine {
        let catalog = Catalog::new(vec![
            MenuItem::new("Dumplings", Decimal::from_str("6.50").unwrap()),
            MenuItem::new("Tea", Decimal::from_str("1.10").unwrap()),
        ])
        .unwrap();
        OrderEngine::new(Arc::new(catalog))
    }

    #[tokio::test]
    async fn test_snapshots_are_detached_from_engine_state() {
        let engine = engine();
        let alice = UserId::from("alice");
        engine.ensure_user(&alice).await.unwrap();
        engine
            .update_user_selections(&alice, [("Tea", "2")])
            .await
            .unwrap();

        let mut aggregate = engine.read_aggregate(LineFilter::All).await;
        aggregate.total = Decimal::ONE_HUNDRED;

        let fresh = engine.read_aggregate(LineFilter::All).await;
        assert_eq!(fresh.total, Decimal::from_str("2.20").unwrap());
    }

    #[tokio::test]
    async fn test_user_order_for_unknown_user_fails() {
        let engine = engine();
        let err = engine.user_order(&UserId::from("ghost")).await.unwrap_err();
        assert_eq!(err, EngineError::UnknownUser(UserId::from("ghost")));
    }

    #[tokio::test]
    async fn test_read_aggregate_non_zero_filter() {
        let engine = engine();
        let bob = UserId::from("bob");
        engine.ensure_user(&bob).await.unwrap();
        engine
            .update_user_selections(&bob, [("Dumplings", "1")])
            .await
            .unwrap();

        let view = engine.read_aggregate(LineFilter::NonZero).await;
        assert_eq!(view.lines().len(), 1);
        assert_eq!(view.quantity_of(&ItemId::from("Dumplings")), Some(1));
        assert_eq!(engine.read_aggregate(LineFilter::All).await.lines().len(), 2);
    }

    #[tokio::test]
    async fn test_reset_then_ensure_starts_fresh() {
        let engine = engine();
        let bob = UserId::from("bob");
        engine.ensure_user(&bob).await.unwrap();
        engine
            .update_user_selections(&bob, [("Tea", "3")])
            .await
            .unwrap();

        engine.reset().await;

        assert_eq!(engine.user_count().await, 0);
        let aggregate = engine.read_aggregate(LineFilter::All).await;
        assert!(aggregate.is_empty());
        assert_eq!(aggregate.total, Decimal::ZERO);
        assert!(engine.ensure_user(&bob).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_selections_are_drained_before_the_lock_is_taken() {
        let engine = engine();
        let alice = UserId::from("alice");
        engine.ensure_user(&alice).await.unwrap();

        let fields = [("Tea", "1"), ("Dumplings", "2")].into_iter().map(|field| {
            assert!(engine.state.try_write().is_ok(), "lock held while reading input");
            field
        });
        let order = engine.update_user_selections(&alice, fields).await.unwrap();

        assert_eq!(order.total, Decimal::from_str("14.10").unwrap());
    }

    #[tokio::test]
    async fn test_overflowing_quantity_leaves_engine_usable() {
        let catalog = Catalog::new(vec![
            MenuItem::new("Tea", Decimal::from_str("1.10").unwrap()),
            MenuItem::new("Gold", Decimal::from_str("100000000000000000000").unwrap()),
        ])
        .unwrap();
        let engine = Arc::new(OrderEngine::new(Arc::new(catalog)));
        let alice = UserId::from("alice");
        engine.ensure_user(&alice).await.unwrap();

        let task = {
            let engine = Arc::clone(&engine);
            let alice = alice.clone();
            tokio::spawn(async move {
                engine
                    .update_user_selections(&alice, [("Tea", "1"), ("Gold", "4294967295")])
                    .await
            })
        };
        let order = task.await.expect("update task panicked").unwrap();

        assert_eq!(order.quantity_of(&ItemId::from("Gold")), Some(0));
        assert_eq!(order.total, Decimal::from_str("1.10").unwrap());
        let snapshot = engine.snapshot().await;
        assert!(snapshot.is_consistent());
        assert_eq!(snapshot.aggregate.total, Decimal::from_str("1.10").unwrap());
    }

    #[test]
    fn test_state_dump_copies_only_the_aggregate() {
        let mut state = AggregationState::new(engine().catalog().clone());
        for name in ["alice", "bob"] {
            state.ensure_user(&UserId::from(name)).unwrap();
        }

        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_test_writer()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let dump = state_dump(&state).expect("debug is enabled");
            assert_eq!(&dump.aggregate, state.aggregate());
            assert_eq!(dump.users, 2);
            log_state(Some(dump), state.user(&UserId::from("alice")));
        });
    }
}
