//! # Group Order
//!
//! > **One shared "Total" order, kept live while many diners pick dishes at once.**
//!
//! Every diner owns an order with one line per menu item. A distinguished
//! aggregate order holds, for every item, the sum of all diners' quantities and
//! the sum of their totals. Diners may update concurrently; the aggregate is
//! never observed half-updated.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### One lock, owned snapshots
//! All order state lives in one [`OrderEngine`](engine::OrderEngine) behind a
//! single reader-writer lock. Every operation takes the lock, does a short
//! synchronous piece of work and hands back owned copies. Nothing outside the
//! engine can hold a reference into shared state.
//!
//! ### Incremental aggregate
//! An update moves the aggregate by the same per-line deltas as the diner's
//! order, and moves the aggregate total by the difference between the diner's
//! new and old totals. Reading the aggregate never has to walk every diner.
//!
//! ### Exact money
//! Prices and totals are [`rust_decimal::Decimal`], rounded once per order to
//! two places, half away from zero.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Data ([`model`], [`catalog`])
//! - **Role**: Menu items, orders and the immutable menu they are built from.
//! - **Key items**: [`Catalog`](catalog::Catalog), [`Order`](model::Order), [`UserId`](model::UserId).
//!
//! ### 2. The Engine ([`engine`])
//! - **Role**: The aggregation state, its invariants, and the lock around it.
//! - **Key items**: [`OrderEngine`](engine::OrderEngine), [`AggregationState`](engine::AggregationState).
//!
//! ### 3. The Interface ([`clients`])
//! - **Role**: An async trait presentation code programs against, plus a per-diner session.
//! - **Key items**: [`OrderService`](clients::OrderService), [`SessionClient`](clients::SessionClient),
//!   [`MockOrderService`](clients::mock::MockOrderService).
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! - **Role**: Configuration, tracing setup, startup and shutdown.
//! - **Key items**: [`Config`](lifecycle::Config), [`OrderSystem`](lifecycle::OrderSystem).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo against ./menu.json with 8 simulated diners
//! RUST_LOG=info cargo run
//!
//! # Another menu, more diners
//! MENU_PATH=/srv/menu.json DEMO_DINERS=32 cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod catalog;
pub mod clients;
pub mod engine;
pub mod lifecycle;
pub mod model;
