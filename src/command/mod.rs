//! Command execution for the printer bridge
//!
//! This module handles:
//! - Dispatching host operations to their handlers
//! - Encoding print requests and writing them to the open link
//! - Logging the outcome of each operation

mod executor;
pub mod handlers;

pub use executor::CommandExecutor;
pub use handlers::HandlerContext;
