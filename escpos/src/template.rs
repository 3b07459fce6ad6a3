//! Fixed print templates
//!
//! Each template is a predetermined sequence of commands. There is no
//! reflow or wrapping: text is emitted exactly as given.

use crate::builder::{CutMode, EscPosBuilder};
use crate::codec::{self, EscPosError};
use crate::layout::{RECEIPT_FEED_LINES, RECEIPT_SEPARATOR_WIDTH, TEXT_FEED_LINES};
use bytes::Bytes;

/// A print request in one of the three supported shapes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintRequest {
    /// Caller-supplied bytes, passed through unchanged
    RawBytes { data: Bytes },
    /// A single styled line
    StyledText {
        text: String,
        bold: bool,
        centered: bool,
        cut_after: bool,
    },
    /// Title/subtitle/body/footer receipt
    Receipt {
        title: String,
        subtitle: String,
        body: String,
        footer: String,
    },
}

impl PrintRequest {
    /// Encode this request into the byte stream sent to the printer
    pub fn encode(&self) -> Bytes {
        match self {
            PrintRequest::RawBytes { data } => data.clone(),
            PrintRequest::StyledText {
                text,
                bold,
                centered,
                cut_after,
            } => encode_styled_text(text, *bold, *centered, *cut_after),
            PrintRequest::Receipt {
                title,
                subtitle,
                body,
                footer,
            } => encode_receipt(title, subtitle, body, footer),
        }
    }
}

/// Decode a transport-encoded raw payload; the bytes are not altered
pub fn encode_raw(encoded: &str) -> Result<Bytes, EscPosError> {
    codec::decode(encoded)
}

/// Encode a single line of text with alignment and emphasis
///
/// Emphasis is always switched off after the line so that it never carries
/// over into the next job.
pub fn encode_styled_text(text: &str, bold: bool, centered: bool, cut: bool) -> Bytes {
    let mut b = EscPosBuilder::default();
    b.init();
    if centered {
        b.center();
    } else {
        b.left();
    }
    b.bold(bold).line(text).bold(false).feed(TEXT_FEED_LINES);
    if cut {
        b.cut(CutMode::Full);
    }
    b.build()
}

/// Encode the fixed receipt template
///
/// An empty subtitle is left out entirely. `body` is copied verbatim, so it
/// should carry its own line terminators.
pub fn encode_receipt(title: &str, subtitle: &str, body: &str, footer: &str) -> Bytes {
    let mut b = EscPosBuilder::new(RECEIPT_SEPARATOR_WIDTH);
    b.init().center().double_size().line(title).normal_size();
    if !subtitle.is_empty() {
        b.line(subtitle);
    }
    b.separator('=')
        .left()
        .text(body)
        .separator('=')
        .center()
        .bold(true)
        .line(footer)
        .bold(false)
        .feed(RECEIPT_FEED_LINES)
        .cut(CutMode::Full);
    b.build()
}
