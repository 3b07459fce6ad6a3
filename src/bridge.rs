//! Host bridge task
//!
//! The bridge owns the command executor and the permission gate. Hosts talk
//! to it purely by message passing: calls and permission decisions go in,
//! resolutions, rejections and permission prompts come out. Calls are
//! processed one at a time in arrival order.

use crate::auth::{Admission, PermissionGate};
use crate::command::CommandExecutor;
use crate::error::PrinterError;
use crate::protocol::{Inbound, Outbound, Request, BLUETOOTH_PERMISSION};
use anyhow::{anyhow, Result};
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// Messages accepted by the bridge task
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeMessage {
    /// Invoke an operation
    Call { id: u64, method: String, params: Value },
    /// The host's answer to a permission prompt
    PermissionResult { granted: bool },
    /// A host line carrying an `id` that is not a well-formed message
    Invalid { id: u64, reason: String },
    /// Close the printer link and stop
    Shutdown,
}

impl BridgeMessage {
    /// Decode one line of host input
    ///
    /// Lines that fail to decode but still carry a numeric `id` become
    /// [`BridgeMessage::Invalid`] so the caller gets a rejection. Anything
    /// else is an error.
    pub fn from_line(line: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(line)?;
        let id = value.get("id").and_then(Value::as_u64);
        match serde_json::from_value::<Inbound>(value) {
            Ok(inbound) => Ok(inbound.into()),
            Err(e) => match id {
                Some(id) => Ok(BridgeMessage::Invalid {
                    id,
                    reason: e.to_string(),
                }),
                None => Err(e.into()),
            },
        }
    }
}

impl From<Inbound> for BridgeMessage {
    fn from(inbound: Inbound) -> Self {
        match inbound {
            Inbound::Call { id, method, params } => BridgeMessage::Call { id, method, params },
            Inbound::PermissionResult { granted } => BridgeMessage::PermissionResult { granted },
        }
    }
}

/// Handle to a running bridge task
pub struct Bridge {
    inbound_tx: mpsc::Sender<BridgeMessage>,
    event_rx: mpsc::Receiver<Outbound>,
}

impl Bridge {
    /// Spawn the bridge task
    pub fn new(executor: CommandExecutor, gate: PermissionGate) -> Self {
        let (inbound_tx, inbound_rx) = mpsc::channel::<BridgeMessage>(32);
        let (event_tx, event_rx) = mpsc::channel::<Outbound>(32);

        tokio::spawn(async move {
            bridge_loop(executor, gate, inbound_rx, event_tx).await;
        });

        Self {
            inbound_tx,
            event_rx,
        }
    }

    /// Send a message to the bridge
    pub async fn send(&self, message: BridgeMessage) -> Result<()> {
        self.inbound_tx
            .send(message)
            .await
            .map_err(|_| anyhow!("Bridge closed"))
    }

    /// Receive the next message for the host
    pub async fn recv(&mut self) -> Option<Outbound> {
        self.event_rx.recv().await
    }

    /// Get a clone of the sender for inbound messages
    pub fn get_sender(&self) -> mpsc::Sender<BridgeMessage> {
        self.inbound_tx.clone()
    }
}

async fn bridge_loop(
    mut executor: CommandExecutor,
    mut gate: PermissionGate,
    mut inbound_rx: mpsc::Receiver<BridgeMessage>,
    event_tx: mpsc::Sender<Outbound>,
) {
    while let Some(message) = inbound_rx.recv().await {
        match message {
            BridgeMessage::Call { id, method, params } => {
                let request = match Request::parse(&method, params) {
                    Ok(request) => request,
                    Err(e) => {
                        emit(&event_tx, Outbound::reject(id, &e)).await;
                        continue;
                    }
                };

                match gate.admit(id, &request) {
                    Admission::Proceed => run(&mut executor, id, &request, &event_tx).await,
                    Admission::AskHost => {
                        emit(
                            &event_tx,
                            Outbound::PermissionRequest {
                                alias: BLUETOOTH_PERMISSION.into(),
                            },
                        )
                        .await
                    }
                    Admission::Queued => debug!("Call {} queued behind permission prompt", id),
                }
            }
            BridgeMessage::PermissionResult { granted } => {
                for call in gate.resolve(granted) {
                    if granted {
                        run(&mut executor, call.id, &call.request, &event_tx).await;
                    } else {
                        emit(
                            &event_tx,
                            Outbound::reject(call.id, &PrinterError::PermissionDenied),
                        )
                        .await;
                    }
                }
            }
            BridgeMessage::Invalid { id, reason } => {
                emit(
                    &event_tx,
                    Outbound::reject(id, &PrinterError::InvalidRequest(reason)),
                )
                .await
            }
            BridgeMessage::Shutdown => break,
        }
    }

    info!("Bridge stopping");
    // calls still waiting on a permission answer never get one
    if gate.pending_count() > 0 {
        for call in gate.resolve(false) {
            emit(
                &event_tx,
                Outbound::reject(call.id, &PrinterError::PermissionDenied),
            )
            .await;
        }
    }
    executor.shutdown().await;
}

async fn run(
    executor: &mut CommandExecutor,
    id: u64,
    request: &Request,
    event_tx: &mpsc::Sender<Outbound>,
) {
    let outbound = match executor.execute(request).await {
        Ok(result) => Outbound::Resolve { id, result },
        Err(e) => Outbound::reject(id, &e),
    };
    emit(event_tx, outbound).await;
}

async fn emit(event_tx: &mpsc::Sender<Outbound>, outbound: Outbound) {
    if event_tx.send(outbound).await.is_err() {
        error!("Host event channel closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::HandlerContext;
    use crate::connection::ConnectionManager;
    use crate::protocol::Response;
    use crate::transport::adapter::MockBluetoothAdapter;
    use crate::transport::memory::MemoryConnector;
    use crate::transport::{BluetoothAdapter, DeviceRef, SimulatedAdapter};
    use serde_json::json;
    use std::time::Duration;

    const PRINTER: &str = "66:22:B3:0D:11:9A";

    fn bridge(connector: &MemoryConnector, require_authorization: bool) -> Bridge {
        let adapter = SimulatedAdapter::new(vec![DeviceRef::new(Some("PT-210".into()), PRINTER)]);
        bridge_with(Box::new(adapter), connector, require_authorization)
    }

    fn bridge_with(
        adapter: Box<dyn BluetoothAdapter>,
        connector: &MemoryConnector,
        require_authorization: bool,
    ) -> Bridge {
        let manager =
            ConnectionManager::new(adapter, Box::new(connector.clone()), Duration::from_secs(1));
        let executor = CommandExecutor::new(
            manager,
            HandlerContext {
                default_receipt_title: "RenKredit".into(),
            },
        );
        Bridge::new(executor, PermissionGate::new(require_authorization))
    }

    fn call(id: u64, method: &str, params: Value) -> BridgeMessage {
        BridgeMessage::Call {
            id,
            method: method.into(),
            params,
        }
    }

    #[tokio::test]
    async fn test_call_resolves() {
        let mut bridge = bridge(&MemoryConnector::new(), false);
        bridge
            .send(call(1, "connect", json!({ "address": PRINTER })))
            .await
            .unwrap();

        assert_eq!(
            bridge.recv().await.unwrap(),
            Outbound::Resolve {
                id: 1,
                result: Response::Connected {
                    connected: true,
                    name: Some("PT-210".into())
                }
            }
        );
    }

    #[tokio::test]
    async fn test_unknown_method_rejected() {
        let mut bridge = bridge(&MemoryConnector::new(), false);
        bridge.send(call(4, "openDrawer", Value::Null)).await.unwrap();

        let Some(Outbound::Reject { id, code, .. }) = bridge.recv().await else {
            panic!("expected rejection");
        };
        assert_eq!(id, 4);
        assert_eq!(code, "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_permission_prompt_then_resume() {
        let connector = MemoryConnector::new();
        let mut bridge = bridge(&connector, true);

        bridge.send(call(1, "getPairedDevices", Value::Null)).await.unwrap();
        bridge
            .send(call(2, "connect", json!({ "address": PRINTER })))
            .await
            .unwrap();
        bridge.send(call(3, "isConnected", Value::Null)).await.unwrap();

        assert_eq!(
            bridge.recv().await.unwrap(),
            Outbound::PermissionRequest {
                alias: "bluetooth".into()
            }
        );
        // ungated calls are not held back
        assert_eq!(
            bridge.recv().await.unwrap(),
            Outbound::Resolve {
                id: 3,
                result: Response::Status {
                    connected: false,
                    name: None,
                    address: None
                }
            }
        );
        assert_eq!(connector.link_count(), 0);

        bridge
            .send(BridgeMessage::PermissionResult { granted: true })
            .await
            .unwrap();

        let Some(Outbound::Resolve { id, result }) = bridge.recv().await else {
            panic!("expected resolution");
        };
        assert_eq!(id, 1);
        assert!(matches!(result, Response::Devices { ref devices } if devices.len() == 1));

        let Some(Outbound::Resolve { id, .. }) = bridge.recv().await else {
            panic!("expected resolution");
        };
        assert_eq!(id, 2);
        assert_eq!(connector.open_links(), vec![PRINTER.to_string()]);
    }

    #[tokio::test]
    async fn test_permission_denied_rejects_parked_calls() {
        let connector = MemoryConnector::new();
        let mut bridge = bridge(&connector, true);

        bridge
            .send(call(1, "connect", json!({ "address": PRINTER })))
            .await
            .unwrap();
        assert!(matches!(
            bridge.recv().await,
            Some(Outbound::PermissionRequest { .. })
        ));

        bridge
            .send(BridgeMessage::PermissionResult { granted: false })
            .await
            .unwrap();
        assert_eq!(
            bridge.recv().await.unwrap(),
            Outbound::reject(1, &PrinterError::PermissionDenied)
        );
        assert_eq!(connector.link_count(), 0);
    }

    #[tokio::test]
    async fn test_shutdown_closes_link() {
        let connector = MemoryConnector::new();
        let mut bridge = bridge(&connector, false);

        bridge
            .send(call(1, "connect", json!({ "address": PRINTER })))
            .await
            .unwrap();
        bridge.recv().await.unwrap();

        bridge.send(BridgeMessage::Shutdown).await.unwrap();
        assert!(bridge.recv().await.is_none());
        assert!(connector.open_links().is_empty());
    }

    #[tokio::test]
    async fn test_shutdown_rejects_parked_calls() {
        let connector = MemoryConnector::new();
        let mut bridge = bridge(&connector, true);

        bridge
            .send(call(1, "connect", json!({ "address": PRINTER })))
            .await
            .unwrap();
        bridge.send(call(2, "getPairedDevices", Value::Null)).await.unwrap();
        assert!(matches!(
            bridge.recv().await,
            Some(Outbound::PermissionRequest { .. })
        ));

        bridge.send(BridgeMessage::Shutdown).await.unwrap();
        assert_eq!(
            bridge.recv().await.unwrap(),
            Outbound::reject(1, &PrinterError::PermissionDenied)
        );
        assert_eq!(
            bridge.recv().await.unwrap(),
            Outbound::reject(2, &PrinterError::PermissionDenied)
        );
        assert!(bridge.recv().await.is_none());
        assert_eq!(connector.link_count(), 0);
    }

    #[tokio::test]
    async fn test_adapter_unavailable_rejected() {
        let mut adapter = MockBluetoothAdapter::new();
        adapter
            .expect_paired_devices()
            .returning(|| Err(PrinterError::Unavailable));
        let mut bridge = bridge_with(Box::new(adapter), &MemoryConnector::new(), false);

        bridge.send(call(7, "getPairedDevices", Value::Null)).await.unwrap();

        let Some(Outbound::Reject { id, code, .. }) = bridge.recv().await else {
            panic!("expected rejection");
        };
        assert_eq!(id, 7);
        assert_eq!(code, "UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_call_without_method_rejected() {
        let mut bridge = bridge(&MemoryConnector::new(), false);

        let message = BridgeMessage::from_line(r#"{"type":"call","id":5,"params":{}}"#).unwrap();
        assert!(matches!(message, BridgeMessage::Invalid { id: 5, .. }));
        bridge.send(message).await.unwrap();

        let Some(Outbound::Reject { id, code, .. }) = bridge.recv().await else {
            panic!("expected rejection");
        };
        assert_eq!(id, 5);
        assert_eq!(code, "INVALID_REQUEST");
    }

    #[test]
    fn test_from_line() {
        assert_eq!(
            BridgeMessage::from_line(r#"{"type":"permissionResult","granted":false}"#).unwrap(),
            BridgeMessage::PermissionResult { granted: false }
        );
        assert_eq!(
            BridgeMessage::from_line(r#"{"type":"call","id":2,"method":"isConnected"}"#).unwrap(),
            call(2, "isConnected", Value::Null)
        );
        // nothing to answer without an id
        assert!(BridgeMessage::from_line(r#"{"type":"call","method":"connect"}"#).is_err());
        assert!(BridgeMessage::from_line("not json").is_err());
    }

    #[test]
    fn test_inbound_conversion() {
        let message: BridgeMessage = Inbound::PermissionResult { granted: true }.into();
        assert_eq!(message, BridgeMessage::PermissionResult { granted: true });
    }
}
