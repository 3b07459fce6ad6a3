//! ESC/POS command set and print templates
//!
//! This crate turns print requests into the byte streams understood by
//! ESC/POS thermal printers. It performs no I/O: every function returns the
//! bytes and the caller decides where they go (an RFCOMM socket, a TCP
//! printer port, a file).

pub mod codec;
pub mod command;

mod builder;
mod template;

pub use builder::{Alignment, CutMode, EscPosBuilder};
pub use codec::EscPosError;
pub use template::{encode_raw, encode_receipt, encode_styled_text, PrintRequest};

/// Paper layout parameters
pub mod layout {
    /// Characters per line on 58mm paper
    pub const PAPER_WIDTH_58MM: usize = 32;

    /// Characters per line on 80mm paper
    pub const PAPER_WIDTH_80MM: usize = 48;

    /// Separator width used by the fixed receipt template
    pub const RECEIPT_SEPARATOR_WIDTH: usize = PAPER_WIDTH_58MM;

    /// Lines fed after a styled text line
    pub const TEXT_FEED_LINES: u8 = 3;

    /// Lines fed after a receipt, before the cut
    pub const RECEIPT_FEED_LINES: u8 = 5;
}
