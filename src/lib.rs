//! Bluetooth SPP thermal printer bridge
//!
//! Exposes paired-device discovery, a single printer connection and three
//! ESC/POS print operations to a host application over a message-passing
//! bridge.

pub mod auth;
pub mod bridge;
pub mod command;
pub mod config;
pub mod connection;
pub mod error;
pub mod protocol;
pub mod transport;

pub use bridge::{Bridge, BridgeMessage};
pub use config::Config;
pub use error::{PrinterError, PrinterResult};
