//! RFCOMM transport implementation for Bluetooth SPP printers

use crate::transport::traits::{TransportConnector, TransportStream};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use bluer::rfcomm::{Profile, Role, SocketAddr as RfcommAddr, Stream as RfcommStream};
use bluer::{Address, Uuid};
use futures::StreamExt;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::AsyncWrite;
use tracing::{debug, info};

/// Serial Port Profile service class UUID
pub const SPP_UUID: Uuid = Uuid::from_u128(0x0000_1101_0000_1000_8000_0080_5F9B_34FB);

/// RFCOMM stream wrapper implementing TransportStream
pub struct RfcommTransportStream {
    inner: RfcommStream,
    peer_addr: Address,
}

impl RfcommTransportStream {
    pub fn new(stream: RfcommStream, peer_addr: Address) -> Self {
        Self {
            inner: stream,
            peer_addr,
        }
    }

    /// Get the peer Bluetooth address
    pub fn peer_address(&self) -> Address {
        self.peer_addr
    }
}

impl AsyncWrite for RfcommTransportStream {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.inner).poll_write(cx, buf)
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_flush(cx)
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_shutdown(cx)
    }
}

#[async_trait]
impl TransportStream for RfcommTransportStream {
    async fn close(&mut self) -> Result<()> {
        tokio::io::AsyncWriteExt::shutdown(&mut self.inner).await?;
        debug!("[BT] Closed link to {}", self.peer_addr);
        Ok(())
    }
}

/// Configuration for RFCOMM connector
#[derive(Debug, Clone, Default)]
pub struct RfcommConfig {
    /// Fixed RFCOMM channel; when unset the SPP service is resolved by UUID
    pub channel: Option<u8>,
}

/// RFCOMM connector for SPP printers
pub struct RfcommConnector {
    config: RfcommConfig,
}

impl RfcommConnector {
    pub fn new(config: RfcommConfig) -> Self {
        Self { config }
    }

    /// Create connector bound to a fixed channel
    pub fn with_channel(channel: u8) -> Self {
        Self::new(RfcommConfig {
            channel: Some(channel),
        })
    }

    /// Connect through a BlueZ client profile so the SPP channel is looked up via SDP
    async fn connect_spp(&self, target: Address) -> Result<RfcommStream> {
        let session = bluer::Session::new().await?;
        let adapter = session.default_adapter().await?;
        let device = adapter.device(target)?;

        let profile = Profile {
            uuid: SPP_UUID,
            role: Some(Role::Client),
            require_authentication: Some(false),
            require_authorization: Some(false),
            auto_connect: Some(false),
            ..Default::default()
        };
        let mut handle = session.register_profile(profile).await?;

        let connect = device.connect_profile(&SPP_UUID);
        tokio::pin!(connect);

        // BlueZ hands the socket to the profile, possibly before ConnectProfile returns
        let request = tokio::select! {
            req = handle.next() => req,
            res = &mut connect => {
                res?;
                None
            }
        };
        let request = match request {
            Some(req) => req,
            None => handle
                .next()
                .await
                .ok_or_else(|| anyhow!("SPP profile closed before connection"))?,
        };

        Ok(request.accept()?)
    }
}

#[async_trait]
impl TransportConnector for RfcommConnector {
    async fn connect(&self, address: &str) -> Result<Box<dyn TransportStream>> {
        let target: Address = address
            .parse()
            .map_err(|e| anyhow!("invalid address {}: {}", address, e))?;

        let stream = match self.config.channel {
            Some(channel) => {
                info!("[BT] Connecting to {} channel {}", target, channel);
                RfcommStream::connect(RfcommAddr::new(target, channel))
                    .await
                    .map_err(|e| anyhow!("RFCOMM connect failed: {}", e))?
            }
            None => {
                info!("[BT] Connecting to {} via SPP", target);
                self.connect_spp(target).await?
            }
        };

        info!("[BT] Connected to {}", target);
        Ok(Box::new(RfcommTransportStream::new(stream, target)))
    }

    fn name(&self) -> &'static str {
        "Bluetooth"
    }
}
