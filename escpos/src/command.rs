//! Raw ESC/POS command bytes
//!
//! Fixed sequences are exposed as constants; parameterised sequences are
//! small functions returning the full byte array.

/// Escape
pub const ESC: u8 = 0x1B;

/// Group separator
pub const GS: u8 = 0x1D;

/// Line feed
pub const LF: u8 = 0x0A;

/// ESC @ - initialize printer
pub const INIT: &[u8] = &[ESC, 0x40];

/// ESC a 0
pub const ALIGN_LEFT: &[u8] = &[ESC, 0x61, 0x00];

/// ESC a 1
pub const ALIGN_CENTER: &[u8] = &[ESC, 0x61, 0x01];

/// ESC a 2
pub const ALIGN_RIGHT: &[u8] = &[ESC, 0x61, 0x02];

/// ESC E 1
pub const BOLD_ON: &[u8] = &[ESC, 0x45, 0x01];

/// ESC E 0
pub const BOLD_OFF: &[u8] = &[ESC, 0x45, 0x00];

/// ESC - 1
pub const UNDERLINE_ON: &[u8] = &[ESC, 0x2D, 0x01];

/// ESC - 0
pub const UNDERLINE_OFF: &[u8] = &[ESC, 0x2D, 0x00];

/// GS ! 0x11 - double width and height
pub const DOUBLE_SIZE: &[u8] = &[GS, 0x21, 0x11];

/// GS ! 0x10
pub const DOUBLE_WIDTH: &[u8] = &[GS, 0x21, 0x10];

/// GS ! 0x01
pub const DOUBLE_HEIGHT: &[u8] = &[GS, 0x21, 0x01];

/// GS ! 0x00
pub const NORMAL_SIZE: &[u8] = &[GS, 0x21, 0x00];

/// GS V 66 0 - feed to the cutter and cut fully
pub const CUT_FULL: &[u8] = &[GS, 0x56, 0x42, 0x00];

/// GS V 66 3 - feed three lines and cut leaving a hinge
pub const CUT_PARTIAL: &[u8] = &[GS, 0x56, 0x42, 0x03];

/// ESC a n with n = 1 when centered, 0 otherwise
pub fn align(centered: bool) -> [u8; 3] {
    [ESC, 0x61, centered as u8]
}

/// ESC E n with n = 1 when bold, 0 otherwise
pub fn emphasis(on: bool) -> [u8; 3] {
    [ESC, 0x45, on as u8]
}

/// ESC d n - print and feed n lines
pub fn feed(lines: u8) -> [u8; 3] {
    [ESC, 0x64, lines]
}

/// QR code commands (GS ( k, function 165 onwards)
pub mod qr {
    use super::GS;

    /// Largest payload a QR symbol holds (version 40, numeric mode)
    pub const MAX_DATA_LEN: usize = 7089;

    /// Function 165: select model 2
    pub const MODEL_2: &[u8] = &[GS, 0x28, 0x6B, 0x04, 0x00, 0x31, 0x41, 0x32, 0x00];

    /// Function 169: error correction level M
    pub const ERROR_CORRECTION_M: &[u8] = &[GS, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x45, 0x33];

    /// Function 181: print the stored symbol
    pub const PRINT: &[u8] = &[GS, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x51, 0x30];

    /// Function 167: module size in dots (1-16)
    pub fn module_size(size: u8) -> [u8; 8] {
        [GS, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x43, size.clamp(1, 16)]
    }

    /// Function 180 header: store `data_len` bytes of symbol data
    ///
    /// The parameter length counts the three function bytes that follow
    /// pL/pH, so the stored payload is `data_len` bytes.
    /// Lengths above [`MAX_DATA_LEN`] are capped; callers must not store
    /// more bytes than that.
    pub fn store_header(data_len: usize) -> [u8; 8] {
        let len = data_len.min(MAX_DATA_LEN) + 3;
        let p_l = (len & 0xFF) as u8;
        let p_h = ((len >> 8) & 0xFF) as u8;
        [GS, 0x28, 0x6B, p_l, p_h, 0x31, 0x50, 0x30]
    }
}
