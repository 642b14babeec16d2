//! # System Lifecycle & Orchestration
//!
//! Starting, wiring and stopping the order system.
//!
//! **Key Responsibilities:**
//! 1. **Configuration** - Read [`Config`] from the environment
//! 2. **Observability Setup** - Install the tracing subscriber ([`setup_tracing`])
//! 3. **Startup** - Load the menu once and fail fast if it is unusable
//! 4. **Wiring** - Hand out [`SessionClient`](crate::clients::SessionClient)s that share one engine
//! 5. **Shutdown** - Log the final state
//!
//! ## The OrderSystem Pattern
//!
//! ```rust,no_run
//! use group_order::lifecycle::{setup_tracing, Config, OrderSystem};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! setup_tracing(&config.log_filter);
//!
//! let system = OrderSystem::start(&config)?;
//! let mut session = system.session();
//! session.create_user("alice").await;
//!
//! system.shutdown().await;
//! # Ok(())
//! # }
//! ```
//!
//! There are no background tasks to join: the engine
//! is a plain value behind an `Arc`, and shutting down means dropping it.

pub mod config;
pub mod order_system;
pub mod tracing;

pub use self::config::*;
pub use self::order_system::*;
pub use self::tracing::*;
