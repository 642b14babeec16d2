//! # Order Service
//!
//! The contract between the engine and whatever presents it (web handlers,
//! a CLI, tests). Presentation code depends on [`OrderService`] rather than on
//! [`OrderEngine`] directly, so it can be exercised against
//! [`MockOrderService`](crate::clients::mock::MockOrderService).
use crate::engine::{EngineError, OrderEngine};
use crate::model::{LineFilter, Order, UserId};
use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, instrument};

/// Submitted form fields: item id to raw quantity text.
pub type RawSelections = HashMap<String, String>;

/// Errors surfaced through [`OrderService`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServiceError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The service could not be reached or did not answer.
    #[error("Order service unavailable: {0}")]
    Unavailable(String),
}

/// Operations the presentation layer may perform.
///
/// All returned orders are snapshots owned by the caller.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Returns the diner's order, creating it on first contact.
    async fn ensure_user(&self, user_id: &UserId) -> Result<Order, ServiceError>;

    /// Applies submitted quantities for an existing diner.
    async fn update_selections(
        &self,
        user_id: &UserId,
        raw: &RawSelections,
    ) -> Result<Order, ServiceError>;

    /// Returns an existing diner's order.
    async fn user_order(&self, user_id: &UserId) -> Result<Order, ServiceError>;

    /// Returns the aggregate "Total" order.
    async fn read_aggregate(&self, filter: LineFilter) -> Result<Order, ServiceError>;

    /// Clears every order.
    async fn reset(&self) -> Result<(), ServiceError>;
}

#[async_trait]
impl OrderService for OrderEngine {
    #[instrument(skip(self))]
    async fn ensure_user(&self, user_id: &UserId) -> Result<Order, ServiceError> {
        debug!("Sending request");
        Ok(OrderEngine::ensure_user(self, user_id).await?)
    }

    #[instrument(skip(self, raw), fields(fields = raw.len()))]
    async fn update_selections(
        &self,
        user_id: &UserId,
        raw: &RawSelections,
    ) -> Result<Order, ServiceError> {
        debug!("Sending request");
        Ok(self.update_user_selections(user_id, raw.iter()).await?)
    }

    #[instrument(skip(self))]
    async fn user_order(&self, user_id: &UserId) -> Result<Order, ServiceError> {
        debug!("Sending request");
        Ok(OrderEngine::user_order(self, user_id).await?)
    }

    #[instrument(skip(self))]
    async fn read_aggregate(&self, filter: LineFilter) -> Result<Order, ServiceError> {
        debug!("Sending request");
        Ok(OrderEngine::read_aggregate(self, filter).await)
    }

    #[instrument(skip(self))]
    async fn reset(&self) -> Result<(), ServiceError> {
        debug!("Sending request");
        OrderEngine::reset(self).await;
        Ok(())
    }
}
