//! Handlers for the bridge operations

mod device;
mod link;
mod print;

pub use device::{handle_get_paired_devices, handle_is_available};
pub use link::{handle_connect, handle_disconnect, handle_is_connected};
pub use print::{handle_print_raw, handle_print_receipt, handle_print_text};

/// Context passed to command handlers
#[derive(Debug, Clone)]
pub struct HandlerContext {
    /// Title printed when a receipt request has none
    pub default_receipt_title: String,
}
