//! Printer connection management
//!
//! This module handles:
//! - Holding at most one open printer link
//! - Tearing down the previous link before opening a new one
//! - Bounded connect attempts
//! - Writing and flushing encoded print jobs

mod manager;

pub use manager::{ConnectionManager, ConnectionStatus};
