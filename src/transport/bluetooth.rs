//! Selects the adapter and connector pair for the configured transport mode

use crate::config::{TransportConfig, TransportMode};
use crate::transport::adapter::{BluetoothAdapter, BluezAdapter, SimulatedAdapter};
use crate::transport::rfcomm::{RfcommConfig, RfcommConnector};
use crate::transport::tcp::TcpConnector;
use crate::transport::traits::TransportConnector;
use tracing::info;

/// Adapter and connector for one transport mode
pub struct BluetoothStack {
    pub adapter: Box<dyn BluetoothAdapter>,
    pub connector: Box<dyn TransportConnector>,
}

impl BluetoothStack {
    /// Build the stack described by `config`
    pub fn from_config(config: &TransportConfig) -> Self {
        let stack = match config.mode {
            TransportMode::Rfcomm => Self {
                adapter: Box::new(BluezAdapter::new()),
                connector: Box::new(RfcommConnector::new(RfcommConfig {
                    channel: config.channel,
                })),
            },
            TransportMode::TcpSimulation => Self {
                adapter: Box::new(SimulatedAdapter::new(config.simulated_devices.clone())),
                connector: Box::new(TcpConnector::new(config.tcp_address.clone())),
            },
        };
        info!("[Transport] Using {}", stack.connector.name());
        stack
    }
}
