//! Bridge wire protocol
//!
//! The host exchanges one JSON object per line:
//! ```text
//! -> {"type":"call","id":7,"method":"printText","params":{"text":"Hi","bold":true}}
//! <- {"type":"resolve","id":7,"result":{"success":true}}
//! <- {"type":"reject","id":8,"code":"NOT_CONNECTED","message":"Not connected"}
//! <- {"type":"permissionRequest","alias":"bluetooth"}
//! -> {"type":"permissionResult","granted":true}
//! ```

use crate::error::{PrinterError, PrinterResult};
use crate::transport::DeviceRef;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Permission alias reported to the host
pub const BLUETOOTH_PERMISSION: &str = "bluetooth";

/// A message from the host
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Inbound {
    Call {
        id: u64,
        method: String,
        #[serde(default)]
        params: Value,
    },
    PermissionResult {
        granted: bool,
    },
}

/// A message to the host
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Outbound {
    Resolve { id: u64, result: Response },
    Reject { id: u64, code: String, message: String },
    PermissionRequest { alias: String },
}

impl Outbound {
    pub fn reject(id: u64, error: &PrinterError) -> Self {
        Outbound::Reject {
            id,
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConnectParams {
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawParams {
    pub data: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TextParams {
    pub text: String,
    pub bold: bool,
    pub center: bool,
    pub cut: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReceiptParams {
    pub title: Option<String>,
    pub subtitle: String,
    pub content: String,
    pub footer: String,
}

/// A boundary operation with its parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    IsAvailable,
    GetPairedDevices,
    Connect(ConnectParams),
    Disconnect,
    IsConnected,
    PrintRaw(RawParams),
    PrintText(TextParams),
    PrintReceipt(ReceiptParams),
}

impl Request {
    /// Parse a host call into a request
    pub fn parse(method: &str, params: Value) -> PrinterResult<Self> {
        let request = match method {
            "isAvailable" => Request::IsAvailable,
            "getPairedDevices" => Request::GetPairedDevices,
            "connect" => Request::Connect(params_from(params)?),
            "disconnect" => Request::Disconnect,
            "isConnected" => Request::IsConnected,
            "printRaw" => Request::PrintRaw(params_from(params)?),
            "printText" => Request::PrintText(params_from(params)?),
            "printReceipt" => Request::PrintReceipt(params_from(params)?),
            other => {
                return Err(PrinterError::InvalidRequest(format!(
                    "unknown method {other}"
                )))
            }
        };
        Ok(request)
    }

    /// Host-facing operation name
    pub fn method(&self) -> &'static str {
        match self {
            Request::IsAvailable => "isAvailable",
            Request::GetPairedDevices => "getPairedDevices",
            Request::Connect(_) => "connect",
            Request::Disconnect => "disconnect",
            Request::IsConnected => "isConnected",
            Request::PrintRaw(_) => "printRaw",
            Request::PrintText(_) => "printText",
            Request::PrintReceipt(_) => "printReceipt",
        }
    }
}

fn params_from<T: DeserializeOwned + Default>(params: Value) -> PrinterResult<T> {
    if params.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(params).map_err(|e| PrinterError::InvalidRequest(e.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairedDevice {
    pub name: String,
    pub address: String,
}

impl From<DeviceRef> for PairedDevice {
    fn from(device: DeviceRef) -> Self {
        Self {
            name: device.name.unwrap_or_else(|| crate::transport::adapter::UNKNOWN_DEVICE_NAME.into()),
            address: device.address,
        }
    }
}

/// Result payload of a successful operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Availability {
        available: bool,
        enabled: bool,
    },
    Devices {
        devices: Vec<PairedDevice>,
    },
    Connected {
        connected: bool,
        name: Option<String>,
    },
    Disconnected {
        disconnected: bool,
    },
    Status {
        connected: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        address: Option<String>,
    },
    Printed {
        success: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        bytes: Option<usize>,
    },
}
