//! Connection lifecycle: connect, disconnect, isConnected

use crate::connection::ConnectionManager;
use crate::error::{PrinterError, PrinterResult};
use crate::protocol::{ConnectParams, Response};

/// Handle connect
pub async fn handle_connect(
    manager: &mut ConnectionManager,
    params: &ConnectParams,
) -> PrinterResult<Response> {
    let address = params
        .address
        .as_deref()
        .ok_or_else(|| PrinterError::InvalidAddress("address required".into()))?;

    let device = manager.connect(address).await?;
    Ok(Response::Connected {
        connected: true,
        name: device.name,
    })
}

/// Handle disconnect
pub async fn handle_disconnect(manager: &mut ConnectionManager) -> PrinterResult<Response> {
    manager.disconnect().await?;
    Ok(Response::Disconnected { disconnected: true })
}

/// Handle isConnected
pub fn handle_is_connected(manager: &ConnectionManager) -> Response {
    let status = manager.status();
    let (name, address) = match status.device {
        Some(device) => (device.name, Some(device.address)),
        None => (None, None),
    };
    Response::Status {
        connected: status.connected,
        name,
        address,
    }
}
