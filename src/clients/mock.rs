//! # Mock Order Service
//!
//! `MockOrderService` implements [`OrderService`] entirely in memory from a queue
//! of expectations. Use it to test presentation logic (such as
//! [`SessionClient`](crate::clients::SessionClient)) deterministically, without an
//! engine and without reasoning about engine state.
//!
//! | Feature | MockOrderService | OrderEngine |
//! |---------|------------------|-------------|
//! | **State** | None (scripted answers) | Real orders and aggregate |
//! | **Error Injection** | Easy (`return_err`) | Needs specific state |
//! | **Use Case** | Logic *around* the service | The engine itself |
//!
//! Expectations are consumed in order. A call that does not match the next
//! expectation panics, and [`MockOrderService::verify`] panics if any are left.
//!
//! ```rust
//! use group_order::clients::mock::MockOrderService;
//! use group_order::clients::{OrderService, ServiceError};
//! use group_order::engine::EngineError;
//! use group_order::model::UserId;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockOrderService::new();
//!     mock.expect_user_order(UserId::from("ghost"))
//!         .return_err(EngineError::UnknownUser(UserId::from("ghost")).into());
//!
//!     let result = mock.user_order(&UserId::from("ghost")).await;
//!     assert!(matches!(result, Err(ServiceError::Engine(_))));
//!     mock.verify();
//! }
//! ```

use crate::clients::{OrderService, RawSelections, ServiceError};
use crate::model::{LineFilter, Order, UserId};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

/// The call an expectation answers.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpectedCall {
    EnsureUser(UserId),
    UpdateSelections(UserId),
    UserOrder(UserId),
    ReadAggregate(LineFilter),
    Reset,
}

#[derive(Debug)]
enum Response {
    Order(Result<Order, ServiceError>),
    Unit(Result<(), ServiceError>),
}

#[derive(Debug)]
struct Expectation {
    call: ExpectedCall,
    response: Response,
}

type Expectations = Arc<Mutex<VecDeque<Expectation>>>;

/// Scripted [`OrderService`] for tests.
#[derive(Debug, Default, Clone)]
pub struct MockOrderService {
    expectations: Expectations,
    received: Arc<Mutex<Vec<(ExpectedCall, Option<RawSelections>)>>>,
}

impl MockOrderService {
    /// Creates a mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects an `ensure_user` call for `user_id`.
    pub fn expect_ensure_user(&self, user_id: UserId) -> OrderExpectationBuilder {
        self.order_builder(ExpectedCall::EnsureUser(user_id))
    }

    /// Expects an `update_selections` call for `user_id`.
    pub fn expect_update_selections(&self, user_id: UserId) -> OrderExpectationBuilder {
        self.order_builder(ExpectedCall::UpdateSelections(user_id))
    }

    /// Expects a `user_order` call for `user_id`.
    pub fn expect_user_order(&self, user_id: UserId) -> OrderExpectationBuilder {
        self.order_builder(ExpectedCall::UserOrder(user_id))
    }

    /// Expects a `read_aggregate` call with `filter`.
    pub fn expect_read_aggregate(&self, filter: LineFilter) -> OrderExpectationBuilder {
        self.order_builder(ExpectedCall::ReadAggregate(filter))
    }

    /// Expects a `reset` call that succeeds.
    pub fn expect_reset(&self) {
        lock(&self.expectations).push_back(Expectation {
            call: ExpectedCall::Reset,
            response: Response::Unit(Ok(())),
        });
    }

    /// Selections passed to every `update_selections` call so far, in order.
    pub fn submitted(&self) -> Vec<RawSelections> {
        lock(&self.received)
            .iter()
            .filter_map(|(_, raw)| raw.clone())
            .collect()
    }

    /// Panics unless every expectation was consumed.
    pub fn verify(&self) {
        let remaining = lock(&self.expectations);
        if !remaining.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining: {:?}",
                remaining.len(),
                remaining.iter().map(|e| &e.call).collect::<Vec<_>>()
            );
        }
    }

    fn order_builder(&self, call: ExpectedCall) -> OrderExpectationBuilder {
        OrderExpectationBuilder {
            call,
            expectations: self.expectations.clone(),
        }
    }

    fn next(&self, call: ExpectedCall, raw: Option<RawSelections>) -> Response {
        lock(&self.received).push((call.clone(), raw));
        let expectation = lock(&self.expectations).pop_front();
        match expectation {
            Some(expectation) if expectation.call == call => expectation.response,
            Some(expectation) => {
                panic!("Unexpected call {call:?}, expected {:?}", expectation.call)
            }
            None => panic!("Unexpected call {call:?}, no expectations left"),
        }
    }

    fn next_order(
        &self,
        call: ExpectedCall,
        raw: Option<RawSelections>,
    ) -> Result<Order, ServiceError> {
        match self.next(call, raw) {
            Response::Order(response) => response,
            Response::Unit(_) => panic!("Expectation mismatch: wanted an order response"),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Builder for expectations answered with an [`Order`].
pub struct OrderExpectationBuilder {
    call: ExpectedCall,
    expectations: Expectations,
}

impl OrderExpectationBuilder {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, order: Order) {
        self.push(Ok(order));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: ServiceError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Order, ServiceError>) {
        lock(&self.expectations).push_back(Expectation {
            call: self.call,
            response: Response::Order(response),
        });
    }
}

#[async_trait]
impl OrderService for MockOrderService {
    async fn ensure_user(&self, user_id: &UserId) -> Result<Order, ServiceError> {
        self.next_order(ExpectedCall::EnsureUser(user_id.clone()), None)
    }

    async fn update_selections(
        &self,
        user_id: &UserId,
        raw: &RawSelections,
    ) -> Result<Order, ServiceError> {
        self.next_order(
            ExpectedCall::UpdateSelections(user_id.clone()),
            Some(raw.clone()),
        )
    }

    async fn user_order(&self, user_id: &UserId) -> Result<Order, ServiceError> {
        self.next_order(ExpectedCall::UserOrder(user_id.clone()), None)
    }

    async fn read_aggregate(&self, filter: LineFilter) -> Result<Order, ServiceError> {
        self.next_order(ExpectedCall::ReadAggregate(filter), None)
    }

    async fn reset(&self) -> Result<(), ServiceError> {
        match self.next(ExpectedCall::Reset, None) {
            Response::Unit(response) => response,
            Response::Order(_) => panic!("Expectation mismatch: wanted a unit response"),
        }
    }
}
