//! Transport trait abstraction for pluggable printer links

use anyhow::Result;
use async_trait::async_trait;
use tokio::io::AsyncWrite;

/// A write-only byte stream to a printer
#[async_trait]
pub trait TransportStream: AsyncWrite + Send + Sync + Unpin + 'static {
    /// Close the transport gracefully
    async fn close(&mut self) -> Result<()>;
}

/// Factory for creating printer connections
#[async_trait]
pub trait TransportConnector: Send + Sync {
    /// Open a stream to the device at `address`
    async fn connect(&self, address: &str) -> Result<Box<dyn TransportStream>>;

    /// Human-readable name for this transport
    fn name(&self) -> &'static str;
}
