//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing_subscriber::fmt` subscriber.
//! `RUST_LOG` wins when set; otherwise the configured filter applies.
//!
//! ```bash
//! # Writes and session events
//! RUST_LOG=info cargo run
//!
//! # Reads plus a full state dump after every write
//! RUST_LOG=debug cargo run
//!
//! # Only the engine
//! RUST_LOG=group_order::engine=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` a diner's visit looks like:
//!
//! ```text
//! INFO create_user{name="alice"}: User created user=alice
//! INFO create_user{name="alice"}: Session started user=alice
//! INFO submit{user=Some(UserId("alice"))}: Selections updated user=alice changed=2 skipped=0 old_total=0.00 new_total=14.20
//! ```
//!
//! Quantities that were rejected show up at `warn` with the reason:
//!
//! ```text
//! WARN submit{..}: Ignoring quantity user=alice item=Tea reason=negative quantity: -1
//! ```
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Later calls are no-ops, so tests may call
/// this freely.
pub fn setup_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
