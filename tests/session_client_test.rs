//! Session behaviour tested against scripted service answers.

use group_order::catalog::Catalog;
use group_order::clients::mock::MockOrderService;
use group_order::clients::{RawSelections, ServiceError, SessionClient, View};
use group_order::engine::EngineError;
use group_order::model::{LineFilter, MenuItem, Order, OrderOwner, UserId};
use rust_decimal::Decimal;
use std::sync::Arc;

fn blank(owner: OrderOwner) -> Order {
    let catalog = Catalog::new(vec![
        MenuItem::new("Dumplings", Decimal::new(650, 2)),
        MenuItem::new("Tea", Decimal::new(110, 2)),
    ])
    .unwrap();
    Order::blank(owner, &catalog)
}

fn user_order(name: &str) -> Order {
    blank(OrderOwner::User(UserId::from(name)))
}

#[tokio::test]
async fn test_home_without_user_asks_for_a_name() {
    let mock = Arc::new(MockOrderService::new());
    let session = SessionClient::new(mock.clone());

    assert_eq!(session.home().await, View::CreateUser);
    mock.verify();
}

#[tokio::test]
async fn test_create_user_then_home_shows_the_order() {
    let mock = Arc::new(MockOrderService::new());
    let alice = UserId::from("alice");
    mock.expect_ensure_user(alice.clone())
        .return_ok(user_order("alice"));
    mock.expect_user_order(alice.clone())
        .return_ok(user_order("alice"));

    let mut session = SessionClient::new(mock.clone());
    assert_eq!(
        session.create_user("alice").await,
        View::Order(user_order("alice"))
    );
    assert_eq!(session.user(), Some(&alice));
    assert_eq!(session.home().await, View::Order(user_order("alice")));
    mock.verify();
}

#[tokio::test]
async fn test_submit_passes_raw_fields_through() {
    let mock = Arc::new(MockOrderService::new());
    let bob = UserId::from("bob");
    mock.expect_update_selections(bob.clone())
        .return_ok(user_order("bob"));

    let session = SessionClient::resume(mock.clone(), bob);
    let raw: RawSelections = [
        ("Tea".to_string(), "2".to_string()),
        ("Dumplings".to_string(), "-1".to_string()),
    ]
    .into();

    assert_eq!(session.submit(&raw).await, View::Order(user_order("bob")));
    assert_eq!(mock.submitted(), vec![raw]);
    mock.verify();
}

#[tokio::test]
async fn test_submit_without_user_never_reaches_the_service() {
    let mock = Arc::new(MockOrderService::new());
    let session = SessionClient::new(mock.clone());

    let raw: RawSelections = [("Tea".to_string(), "1".to_string())].into();
    assert_eq!(session.submit(&raw).await, View::CreateUser);
    assert!(mock.submitted().is_empty());
    mock.verify();
}

#[tokio::test]
async fn test_unknown_user_is_sent_to_user_creation() {
    let mock = Arc::new(MockOrderService::new());
    let ghost = UserId::from("ghost");
    mock.expect_update_selections(ghost.clone())
        .return_err(EngineError::UnknownUser(ghost.clone()).into());
    mock.expect_user_order(ghost.clone())
        .return_err(EngineError::UnknownUser(ghost.clone()).into());

    let session = SessionClient::resume(mock.clone(), ghost);
    assert_eq!(
        session.submit(&RawSelections::new()).await,
        View::CreateUser
    );
    assert_eq!(session.home().await, View::CreateUser);
    mock.verify();
}

#[tokio::test]
async fn test_other_errors_become_failures() {
    let mock = Arc::new(MockOrderService::new());
    mock.expect_ensure_user(UserId::from(""))
        .return_err(EngineError::EmptyUserId.into());
    mock.expect_read_aggregate(LineFilter::NonZero)
        .return_err(ServiceError::Unavailable("connection refused".to_string()));

    let mut session = SessionClient::new(mock.clone());
    assert_eq!(
        session.create_user("").await,
        View::Failure("User id must not be empty".to_string())
    );
    assert!(session.user().is_none());
    assert_eq!(
        session.totals().await,
        View::Failure("Order service unavailable: connection refused".to_string())
    );
    mock.verify();
}

#[tokio::test]
async fn test_totals_ask_for_non_zero_lines() {
    let mock = Arc::new(MockOrderService::new());
    mock.expect_read_aggregate(LineFilter::NonZero)
        .return_ok(blank(OrderOwner::Total).filtered(LineFilter::NonZero));

    let session = SessionClient::new(mock.clone());
    match session.totals().await {
        View::Totals(order) => {
            assert_eq!(order.owner, OrderOwner::Total);
            assert!(order.lines().is_empty());
        }
        other => panic!("Expected totals, got {other:?}"),
    }
    mock.verify();
}

#[tokio::test]
async fn test_logout_and_reset() {
    let mock = Arc::new(MockOrderService::new());
    mock.expect_reset();

    let mut session = SessionClient::resume(mock.clone(), UserId::from("carol"));
    assert_eq!(session.logout(), View::CreateUser);
    assert!(session.user().is_none());

    assert_eq!(session.reset().await, View::CreateUser);
    mock.verify();
}
