//! Transport encoding for raw print payloads
//!
//! Hosts hand raw ESC/POS data across the bridge as standard base64:
//! ```text
//! host bytes -> base64 text -> bridge -> decoded bytes -> printer
//! ```
//!
//! Decoding is tolerant of the line breaks some host encoders insert every
//! 76 characters, but rejects anything that is not base64.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use thiserror::Error;

/// Errors that can occur while preparing print data
#[derive(Error, Debug)]
pub enum EscPosError {
    #[error("Invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// Encode raw bytes for transport across the bridge
pub fn encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decode a transport-encoded payload back into raw bytes
pub fn decode(encoded: &str) -> Result<Bytes, EscPosError> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let data = STANDARD.decode(compact.as_bytes())?;
    Ok(Bytes::from(data))
}
