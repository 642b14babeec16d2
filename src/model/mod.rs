//! Pure data structures shared by the catalog, the engine and its callers.
//!
//! Nothing in here knows about locks or tasks: these are the values that the
//! [`OrderEngine`](crate::engine::OrderEngine) owns and hands out as snapshots.

pub mod menu;
pub mod money;
pub mod order;

pub use menu::*;
pub use money::*;
pub use order::*;
