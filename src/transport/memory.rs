//! In-memory transport for tests

use crate::transport::traits::{TransportConnector, TransportStream};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tokio::io::AsyncWrite;

/// What one connection saw
#[derive(Debug, Default)]
pub struct LinkLog {
    pub address: String,
    pub written: Vec<u8>,
    pub flushes: usize,
    pub closed: bool,
}

/// Knobs and history shared between a test and its connector
#[derive(Debug, Default)]
pub struct MemoryState {
    pub links: Vec<Arc<Mutex<LinkLog>>>,
    pub fail_connect: bool,
    pub fail_writes: bool,
    pub fail_close: bool,
    pub hang_connect: bool,
}

pub struct MemoryStream {
    log: Arc<Mutex<LinkLog>>,
    state: Arc<Mutex<MemoryState>>,
}

impl AsyncWrite for MemoryStream {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        if self.state.lock().unwrap().fail_writes {
            return Poll::Ready(Err(io::Error::new(io::ErrorKind::BrokenPipe, "link lost")));
        }
        self.log.lock().unwrap().written.extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        self.log.lock().unwrap().flushes += 1;
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

#[async_trait]
impl TransportStream for MemoryStream {
    async fn close(&mut self) -> Result<()> {
        self.log.lock().unwrap().closed = true;
        if self.state.lock().unwrap().fail_close {
            return Err(anyhow!("socket close failed"));
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MemoryConnector {
    pub state: Arc<Mutex<MemoryState>>,
}

impl MemoryConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn link(&self, index: usize) -> Arc<Mutex<LinkLog>> {
        self.state.lock().unwrap().links[index].clone()
    }

    pub fn link_count(&self) -> usize {
        self.state.lock().unwrap().links.len()
    }

    pub fn open_links(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .links
            .iter()
            .map(|l| l.lock().unwrap())
            .filter(|l| !l.closed)
            .map(|l| l.address.clone())
            .collect()
    }

    pub fn total_written(&self) -> usize {
        self.state
            .lock()
            .unwrap()
            .links
            .iter()
            .map(|l| l.lock().unwrap().written.len())
            .sum()
    }
}

#[async_trait]
impl TransportConnector for MemoryConnector {
    async fn connect(&self, address: &str) -> Result<Box<dyn TransportStream>> {
        let (fail, hang) = {
            let state = self.state.lock().unwrap();
            (state.fail_connect, state.hang_connect)
        };
        if hang {
            std::future::pending::<()>().await;
        }
        if fail {
            return Err(anyhow!("host is down"));
        }

        let log = Arc::new(Mutex::new(LinkLog {
            address: address.to_string(),
            ..Default::default()
        }));
        self.state.lock().unwrap().links.push(log.clone());
        Ok(Box::new(MemoryStream {
            log,
            state: self.state.clone(),
        }))
    }

    fn name(&self) -> &'static str {
        "Memory"
    }
}
