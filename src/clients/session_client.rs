//! # Session Client
//!
//! One diner's conversation with the [`OrderService`]: the id the diner picked
//! (normally kept in a cookie by the web layer) plus the mapping from service
//! results to what the diner should see next.
//!
//! An unknown or missing user always leads back to user creation; any other
//! failure becomes a generic [`View::Failure`].
use crate::clients::{OrderService, RawSelections, ServiceError};
use crate::engine::EngineError;
use crate::model::{LineFilter, Order, UserId};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// What the presentation layer should render next.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// Ask the diner to pick a name.
    CreateUser,
    /// The diner's own order.
    Order(Order),
    /// The aggregate order, non-zero lines only.
    Totals(Order),
    /// Something went wrong; the message is safe to show.
    Failure(String),
}

pub struct SessionClient<S: OrderService> {
    service: Arc<S>,
    user: Option<UserId>,
}

impl<S: OrderService> SessionClient<S> {
    /// A session with no diner identified yet.
    pub fn new(service: Arc<S>) -> Self {
        Self {
            service,
            user: None,
        }
    }

    /// Resumes a session for a diner id the caller already holds.
    pub fn resume(service: Arc<S>, user: UserId) -> Self {
        Self {
            service,
            user: Some(user),
        }
    }

    pub fn user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }

    /// The landing view: the diner's order, or user creation.
    #[instrument(skip(self), fields(user = ?self.user))]
    pub async fn home(&self) -> View {
        let Some(user) = &self.user else {
            return View::CreateUser;
        };
        match self.service.user_order(user).await {
            Ok(order) => View::Order(order),
            Err(e) => failure_view(e),
        }
    }

    /// Identifies the diner as `name`, creating their order if needed.
    #[instrument(skip(self))]
    pub async fn create_user(&mut self, name: &str) -> View {
        let user = UserId::from(name);
        match self.service.ensure_user(&user).await {
            Ok(order) => {
                info!(user = %user, "Session started");
                self.user = Some(user);
                View::Order(order)
            }
            Err(e) => failure_view(e),
        }
    }

    /// Submits quantities for the current diner.
    #[instrument(skip(self, raw), fields(user = ?self.user))]
    pub async fn submit(&self, raw: &RawSelections) -> View {
        let Some(user) = &self.user else {
            return View::CreateUser;
        };
        match self.service.update_selections(user, raw).await {
            Ok(order) => View::Order(order),
            Err(e) => failure_view(e),
        }
    }

    /// The aggregate order, non-zero lines only.
    #[instrument(skip(self))]
    pub async fn totals(&self) -> View {
        match self.service.read_aggregate(LineFilter::NonZero).await {
            Ok(order) => View::Totals(order),
            Err(e) => failure_view(e),
        }
    }

    /// Forgets the diner id. Their order stays in the engine.
    pub fn logout(&mut self) -> View {
        if let Some(user) = self.user.take() {
            info!(user = %user, "Session ended");
        }
        View::CreateUser
    }

    /// Clears every order. Every diner, this one included, has to pick a
    /// name again.
    #[instrument(skip(self))]
    pub async fn reset(&self) -> View {
        match self.service.reset().await {
            Ok(()) => View::CreateUser,
            Err(e) => failure_view(e),
        }
    }
}

fn failure_view(error: ServiceError) -> View {
    match error {
        ServiceError::Engine(EngineError::UnknownUser(user)) => {
            info!(user = %user, "Unknown user, asking for a name");
            View::CreateUser
        }
        other => {
            warn!(error = %other, "Request failed");
            View::Failure(other.to_string())
        }
    }
}
