//! Adapter queries: isAvailable, getPairedDevices

use crate::connection::ConnectionManager;
use crate::error::PrinterResult;
use crate::protocol::{PairedDevice, Response};
use tracing::info;

/// Handle isAvailable
pub async fn handle_is_available(manager: &ConnectionManager) -> Response {
    let availability = manager.availability().await;
    Response::Availability {
        available: availability.available,
        enabled: availability.enabled,
    }
}

/// Handle getPairedDevices
pub async fn handle_get_paired_devices(manager: &ConnectionManager) -> PrinterResult<Response> {
    let devices = manager.list_paired().await?;
    info!("  [getPairedDevices] {} devices", devices.len());
    Ok(Response::Devices {
        devices: devices.into_iter().map(PairedDevice::from).collect(),
    })
}
