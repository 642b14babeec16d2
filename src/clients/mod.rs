//! Async interface to the engine for presentation code.

pub mod mock;
pub mod order_service;
pub mod session_client;

pub use order_service::*;
pub use session_client::*;
