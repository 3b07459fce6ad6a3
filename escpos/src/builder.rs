//! ESC/POS document builder
//!
//! Provides a fluent API for composing arbitrary print data. The fixed
//! templates in this crate are built on top of it; hosts that need a
//! different layout build their own document and send it as raw bytes.

use crate::codec;
use crate::command::{self, qr};
use crate::layout::PAPER_WIDTH_58MM;
use bytes::{BufMut, Bytes, BytesMut};

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    fn command(self) -> &'static [u8] {
        match self {
            Alignment::Left => command::ALIGN_LEFT,
            Alignment::Center => command::ALIGN_CENTER,
            Alignment::Right => command::ALIGN_RIGHT,
        }
    }
}

/// Paper cut style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutMode {
    Full,
    Partial,
}

/// ESC/POS document builder
///
/// Text is written as UTF-8. Nothing is emitted implicitly: call
/// [`init`](Self::init) first if the printer should be reset.
#[derive(Debug, Clone)]
pub struct EscPosBuilder {
    buf: BytesMut,
    width: usize,
}

impl EscPosBuilder {
    /// Create a builder for the given paper width in characters
    ///
    /// Common widths:
    /// - 58mm paper: 32 characters
    /// - 80mm paper: 48 characters
    pub fn new(width: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(1024),
            width,
        }
    }

    /// Get the configured paper width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of bytes emitted so far
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    // === Printer Control ===

    /// Reset the printer (ESC @)
    pub fn init(&mut self) -> &mut Self {
        self.raw(command::INIT)
    }

    /// Write raw bytes directly
    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.put_slice(bytes);
        self
    }

    // === Text Output ===

    pub fn text(&mut self, s: &str) -> &mut Self {
        self.raw(s.as_bytes())
    }

    /// Write text followed by a line terminator
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.text(s);
        self.buf.put_u8(command::LF);
        self
    }

    /// Print and feed `lines` lines (ESC d n)
    pub fn feed(&mut self, lines: u8) -> &mut Self {
        self.raw(&command::feed(lines))
    }

    // === Alignment ===

    pub fn align(&mut self, alignment: Alignment) -> &mut Self {
        self.raw(alignment.command())
    }

    pub fn left(&mut self) -> &mut Self {
        self.align(Alignment::Left)
    }

    pub fn center(&mut self) -> &mut Self {
        self.align(Alignment::Center)
    }

    pub fn right(&mut self) -> &mut Self {
        self.align(Alignment::Right)
    }

    // === Text Style ===

    pub fn bold(&mut self, on: bool) -> &mut Self {
        self.raw(&command::emphasis(on))
    }

    pub fn underline(&mut self, on: bool) -> &mut Self {
        self.raw(if on {
            command::UNDERLINE_ON
        } else {
            command::UNDERLINE_OFF
        })
    }

    /// Double width and height
    pub fn double_size(&mut self) -> &mut Self {
        self.raw(command::DOUBLE_SIZE)
    }

    pub fn double_width(&mut self) -> &mut Self {
        self.raw(command::DOUBLE_WIDTH)
    }

    pub fn double_height(&mut self) -> &mut Self {
        self.raw(command::DOUBLE_HEIGHT)
    }

    /// Back to normal character size
    pub fn normal_size(&mut self) -> &mut Self {
        self.raw(command::NORMAL_SIZE)
    }

    // === Layout Helpers ===

    /// Print a full-width line of `ch`
    pub fn separator(&mut self, ch: char) -> &mut Self {
        let sep: String = std::iter::repeat(ch).take(self.width).collect();
        self.line(&sep)
    }

    /// Print left and right text on the same line
    ///
    /// The gap is filled with `fill`. When both sides do not fit, they are
    /// separated by a single space and the printer wraps the rest.
    pub fn left_right(&mut self, left: &str, right: &str, fill: char) -> &mut Self {
        let used = left.chars().count() + right.chars().count();
        let gap = if used < self.width {
            std::iter::repeat(fill).take(self.width - used).collect()
        } else {
            String::from(" ")
        };
        self.line(&format!("{left}{gap}{right}"))
    }

    // === QR Code ===

    /// Print a QR code (model 2, error correction M)
    ///
    /// Size: 1-16 (module size in dots). Data beyond
    /// [`qr::MAX_DATA_LEN`] bytes is dropped.
    pub fn qr_code(&mut self, data: &str, size: u8) -> &mut Self {
        let bytes = data.as_bytes();
        let data_bytes = &bytes[..bytes.len().min(qr::MAX_DATA_LEN)];
        self.raw(qr::MODEL_2)
            .raw(&qr::module_size(size))
            .raw(qr::ERROR_CORRECTION_M)
            .raw(&qr::store_header(data_bytes.len()))
            .raw(data_bytes)
            .raw(qr::PRINT)
    }

    // === Paper Control ===

    pub fn cut(&mut self, mode: CutMode) -> &mut Self {
        self.raw(match mode {
            CutMode::Full => command::CUT_FULL,
            CutMode::Partial => command::CUT_PARTIAL,
        })
    }

    // === Build ===

    /// Finish the document
    pub fn build(self) -> Bytes {
        self.buf.freeze()
    }

    /// Current document as transport-encoded text, ready for a raw print
    pub fn to_base64(&self) -> String {
        codec::encode(&self.buf)
    }
}

impl Default for EscPosBuilder {
    fn default() -> Self {
        Self::new(PAPER_WIDTH_58MM)
    }
}
