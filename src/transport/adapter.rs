//! Bluetooth adapter queries: radio availability and paired printers

use crate::error::{PrinterError, PrinterResult};
use async_trait::async_trait;
use bluer::{Adapter, Address, ErrorKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Name reported for paired devices that do not expose one
pub const UNKNOWN_DEVICE_NAME: &str = "Unknown";

/// Snapshot of a paired device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRef {
    pub name: Option<String>,
    pub address: String,
}

impl DeviceRef {
    pub fn new(name: Option<String>, address: impl Into<String>) -> Self {
        Self {
            name,
            address: address.into(),
        }
    }
}

/// Radio presence and power state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Availability {
    pub available: bool,
    pub enabled: bool,
}

/// Access to the local Bluetooth adapter
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BluetoothAdapter: Send + Sync {
    /// Whether a radio exists and is powered
    async fn availability(&self) -> Availability;

    /// Devices bonded with this host
    async fn paired_devices(&self) -> PrinterResult<Vec<DeviceRef>>;

    /// Display name of a known device, if any
    async fn device_name(&self, address: &str) -> Option<String>;
}

/// Adapter backed by BlueZ over D-Bus
#[derive(Debug, Default)]
pub struct BluezAdapter;

impl BluezAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Get the default Bluetooth adapter
    async fn default_adapter() -> bluer::Result<Adapter> {
        let session = bluer::Session::new().await?;
        session.default_adapter().await
    }
}

/// Map a BlueZ failure onto the bridge taxonomy
fn classify(err: bluer::Error) -> PrinterError {
    match err.kind {
        ErrorKind::NotAuthorized | ErrorKind::NotPermitted => PrinterError::PermissionDenied,
        _ => {
            debug!(error = %err, "[BT] adapter error");
            PrinterError::Unavailable
        }
    }
}

#[async_trait]
impl BluetoothAdapter for BluezAdapter {
    async fn availability(&self) -> Availability {
        match Self::default_adapter().await {
            Ok(adapter) => Availability {
                available: true,
                enabled: adapter.is_powered().await.unwrap_or(false),
            },
            Err(e) => {
                warn!(error = %e, "[BT] no adapter");
                Availability::default()
            }
        }
    }

    async fn paired_devices(&self) -> PrinterResult<Vec<DeviceRef>> {
        let adapter = Self::default_adapter().await.map_err(classify)?;
        let mut devices = Vec::new();

        for addr in adapter.device_addresses().await.map_err(classify)? {
            let device = adapter.device(addr).map_err(classify)?;
            if !device.is_paired().await.map_err(classify)? {
                continue;
            }
            let name = device
                .name()
                .await
                .ok()
                .flatten()
                .unwrap_or_else(|| UNKNOWN_DEVICE_NAME.to_string());
            devices.push(DeviceRef::new(Some(name), addr.to_string()));
        }

        debug!("[BT] {} paired devices", devices.len());
        Ok(devices)
    }

    async fn device_name(&self, address: &str) -> Option<String> {
        let addr: Address = address.parse().ok()?;
        let adapter = Self::default_adapter().await.ok()?;
        adapter.device(addr).ok()?.name().await.ok().flatten()
    }
}

/// Adapter reporting a fixed device list, for the TCP simulation transport
#[derive(Debug, Clone)]
pub struct SimulatedAdapter {
    devices: Vec<DeviceRef>,
}

impl SimulatedAdapter {
    pub fn new(devices: Vec<DeviceRef>) -> Self {
        Self { devices }
    }
}

#[async_trait]
impl BluetoothAdapter for SimulatedAdapter {
    async fn availability(&self) -> Availability {
        Availability {
            available: true,
            enabled: true,
        }
    }

    async fn paired_devices(&self) -> PrinterResult<Vec<DeviceRef>> {
        Ok(self.devices.clone())
    }

    async fn device_name(&self, address: &str) -> Option<String> {
        self.devices
            .iter()
            .find(|d| d.address.eq_ignore_ascii_case(address))
            .and_then(|d| d.name.clone())
    }
}
