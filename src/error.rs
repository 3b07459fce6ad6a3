//! Error taxonomy for bridge operations
//!
//! Every failure is terminal for the call that produced it; the host decides
//! whether to retry.

use thiserror::Error;

/// Errors returned by printer bridge operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrinterError {
    #[error("Bluetooth not available")]
    Unavailable,

    #[error("Bluetooth permission required")]
    PermissionDenied,

    #[error("Invalid device address: {0}")]
    InvalidAddress(String),

    #[error("Connection failed: {0}")]
    ConnectFailed(String),

    #[error("Not connected")]
    NotConnected,

    #[error("Invalid print data: {0}")]
    DecodeError(String),

    #[error("Print error: {0}")]
    WriteFailed(String),

    #[error("Close error: {0}")]
    CloseFailed(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl PrinterError {
    /// Stable code reported to the host alongside the message
    pub fn code(&self) -> &'static str {
        match self {
            PrinterError::Unavailable => "UNAVAILABLE",
            PrinterError::PermissionDenied => "PERMISSION_DENIED",
            PrinterError::InvalidAddress(_) => "INVALID_ADDRESS",
            PrinterError::ConnectFailed(_) => "CONNECT_FAILED",
            PrinterError::NotConnected => "NOT_CONNECTED",
            PrinterError::DecodeError(_) => "DECODE_ERROR",
            PrinterError::WriteFailed(_) => "WRITE_FAILED",
            PrinterError::CloseFailed(_) => "CLOSE_FAILED",
            PrinterError::InvalidRequest(_) => "INVALID_REQUEST",
        }
    }
}

impl From<spp_escpos::EscPosError> for PrinterError {
    fn from(err: spp_escpos::EscPosError) -> Self {
        PrinterError::DecodeError(err.to_string())
    }
}

/// Result type for bridge operations
pub type PrinterResult<T> = Result<T, PrinterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct() {
        let errors = [
            PrinterError::Unavailable,
            PrinterError::PermissionDenied,
            PrinterError::InvalidAddress("x".into()),
            PrinterError::ConnectFailed("x".into()),
            PrinterError::NotConnected,
            PrinterError::DecodeError("x".into()),
            PrinterError::WriteFailed("x".into()),
            PrinterError::CloseFailed("x".into()),
            PrinterError::InvalidRequest("x".into()),
        ];
        let mut codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_decode_error_conversion() {
        let err = spp_escpos::codec::decode("%%").unwrap_err();
        let err: PrinterError = err.into();
        assert_eq!(err.code(), "DECODE_ERROR");
    }
}
