//! Command executor - dispatches bridge operations to their handlers

use super::handlers::{self, HandlerContext};
use crate::connection::ConnectionManager;
use crate::error::PrinterResult;
use crate::protocol::{Request, Response};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Executes bridge operations against the owned connection manager
pub struct CommandExecutor {
    manager: ConnectionManager,
    ctx: HandlerContext,
}

impl CommandExecutor {
    pub fn new(manager: ConnectionManager, ctx: HandlerContext) -> Self {
        Self { manager, ctx }
    }

    /// Read access to the connection manager
    pub fn manager(&self) -> &ConnectionManager {
        &self.manager
    }

    /// Execute one operation and return its result payload
    pub async fn execute(&mut self, request: &Request) -> PrinterResult<Response> {
        let started = Instant::now();
        info!("Executing {}", request.method());

        let manager = &mut self.manager;
        let result = match request {
            Request::IsAvailable => Ok(handlers::handle_is_available(manager).await),
            Request::GetPairedDevices => handlers::handle_get_paired_devices(manager).await,
            Request::Connect(params) => handlers::handle_connect(manager, params).await,
            Request::Disconnect => handlers::handle_disconnect(manager).await,
            Request::IsConnected => Ok(handlers::handle_is_connected(manager)),
            Request::PrintRaw(params) => handlers::handle_print_raw(manager, params).await,
            Request::PrintText(params) => handlers::handle_print_text(manager, params).await,
            Request::PrintReceipt(params) => {
                handlers::handle_print_receipt(&self.ctx, manager, params).await
            }
        };

        match &result {
            Ok(_) => debug!("  {} completed in {:?}", request.method(), started.elapsed()),
            Err(e) => warn!("  {} failed: {}", request.method(), e),
        }
        result
    }

    /// Release the printer link
    pub async fn shutdown(&mut self) {
        if let Err(e) = self.manager.disconnect().await {
            warn!("Close on shutdown failed: {}", e);
        }
    }
}
