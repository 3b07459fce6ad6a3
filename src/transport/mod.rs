//! Printer transports
//!
//! - `adapter`: radio availability and paired-device listing
//! - `rfcomm`: Bluetooth SPP links through BlueZ
//! - `tcp`: TCP stand-in for development without a radio

pub mod adapter;
pub mod bluetooth;
pub mod rfcomm;
pub mod tcp;
pub mod traits;

#[cfg(test)]
pub mod memory;

pub use adapter::{Availability, BluetoothAdapter, BluezAdapter, DeviceRef, SimulatedAdapter};
pub use bluetooth::BluetoothStack;
pub use rfcomm::{RfcommConfig, RfcommConnector, RfcommTransportStream, SPP_UUID};
pub use tcp::{TcpConnector, TcpTransportStream};
pub use traits::{TransportConnector, TransportStream};
