//! Single-slot printer connection manager

use crate::error::{PrinterError, PrinterResult};
use crate::transport::{Availability, BluetoothAdapter, DeviceRef, TransportConnector, TransportStream};
use bluer::Address;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Snapshot of the connection slot
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConnectionStatus {
    pub connected: bool,
    pub device: Option<DeviceRef>,
}

/// An open link and the device it was opened against
struct Connection {
    sink: Box<dyn TransportStream>,
    device: DeviceRef,
}

/// Owns at most one printer connection
///
/// Opening a connection always tears down the previous one first, so there
/// is never more than one live sink.
pub struct ConnectionManager {
    adapter: Box<dyn BluetoothAdapter>,
    connector: Box<dyn TransportConnector>,
    connect_timeout: Duration,
    active: Option<Connection>,
}

impl ConnectionManager {
    pub fn new(
        adapter: Box<dyn BluetoothAdapter>,
        connector: Box<dyn TransportConnector>,
        connect_timeout: Duration,
    ) -> Self {
        Self {
            adapter,
            connector,
            connect_timeout,
            active: None,
        }
    }

    /// Radio presence and power state
    pub async fn availability(&self) -> Availability {
        self.adapter.availability().await
    }

    /// Devices bonded with this host
    pub async fn list_paired(&self) -> PrinterResult<Vec<DeviceRef>> {
        self.adapter.paired_devices().await
    }

    /// Open a connection to `address`, replacing any existing one
    pub async fn connect(&mut self, address: &str) -> PrinterResult<DeviceRef> {
        if address.parse::<Address>().is_err() {
            return Err(PrinterError::InvalidAddress(address.to_string()));
        }

        if let Err(e) = self.disconnect().await {
            warn!("Discarding previous connection: {}", e);
        }

        info!(
            "Connecting to {} via {} (timeout {:?})",
            address,
            self.connector.name(),
            self.connect_timeout
        );
        let sink = match timeout(self.connect_timeout, self.connector.connect(address)).await {
            Ok(Ok(sink)) => sink,
            Ok(Err(e)) => return Err(PrinterError::ConnectFailed(e.to_string())),
            Err(_) => {
                return Err(PrinterError::ConnectFailed(format!(
                    "timed out after {:?}",
                    self.connect_timeout
                )))
            }
        };

        let name = match timeout(self.connect_timeout, self.adapter.device_name(address)).await {
            Ok(name) => name,
            Err(_) => {
                warn!("Name lookup for {} timed out", address);
                None
            }
        };
        let device = DeviceRef::new(name, address);
        info!("Connected to {:?} ({})", device.name, device.address);

        self.active = Some(Connection {
            sink,
            device: device.clone(),
        });
        Ok(device)
    }

    /// Close the connection if one is open
    ///
    /// The slot is cleared even when closing the socket fails.
    pub async fn disconnect(&mut self) -> PrinterResult<()> {
        let Some(mut conn) = self.active.take() else {
            debug!("Disconnect with no open connection");
            return Ok(());
        };

        info!("Disconnecting from {}", conn.device.address);
        conn.sink
            .close()
            .await
            .map_err(|e| PrinterError::CloseFailed(e.to_string()))
    }

    pub fn status(&self) -> ConnectionStatus {
        match &self.active {
            Some(conn) => ConnectionStatus {
                connected: true,
                device: Some(conn.device.clone()),
            },
            None => ConnectionStatus::default(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.active.is_some()
    }

    /// Write `data` to the open connection and flush it
    ///
    /// Bytes already delivered before a failure are not rolled back.
    pub async fn write(&mut self, data: &[u8]) -> PrinterResult<usize> {
        let conn = self.active.as_mut().ok_or(PrinterError::NotConnected)?;

        conn.sink
            .write_all(data)
            .await
            .map_err(|e| PrinterError::WriteFailed(e.to_string()))?;
        conn.sink
            .flush()
            .await
            .map_err(|e| PrinterError::WriteFailed(e.to_string()))?;

        debug!("Wrote {} bytes to {}", data.len(), conn.device.address);
        Ok(data.len())
    }
}
