//! Runtime Bluetooth permission gate
//!
//! Discovery and connect need a host-granted capability. Until the host
//! answers, such calls are parked here together with their original request
//! and handed back when the decision arrives.

use crate::protocol::Request;
use tracing::info;

/// Host authorization state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    Granted,
    /// Not granted yet; the host must be asked
    Prompt,
}

/// A call waiting for the host's permission decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCall {
    pub id: u64,
    pub request: Request,
}

/// Outcome of submitting a call to the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Run it now
    Proceed,
    /// Parked; the host must be asked for permission
    AskHost,
    /// Parked behind a request that is already with the host
    Queued,
}

/// Parks permission-gated calls until the host decides
#[derive(Debug)]
pub struct PermissionGate {
    state: PermissionState,
    pending: Vec<PendingCall>,
}

impl PermissionGate {
    pub fn new(require_authorization: bool) -> Self {
        Self {
            state: if require_authorization {
                PermissionState::Prompt
            } else {
                PermissionState::Granted
            },
            pending: Vec::new(),
        }
    }

    pub fn state(&self) -> PermissionState {
        self.state
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Whether an operation touches the radio and so needs the grant
    pub fn is_gated(request: &Request) -> bool {
        matches!(request, Request::GetPairedDevices | Request::Connect(_))
    }

    /// Admit a call or park it until the host answers
    pub fn admit(&mut self, id: u64, request: &Request) -> Admission {
        if self.state == PermissionState::Granted || !Self::is_gated(request) {
            return Admission::Proceed;
        }

        let first = self.pending.is_empty();
        self.pending.push(PendingCall {
            id,
            request: request.clone(),
        });
        info!("Call {} ({}) waiting for permission", id, request.method());

        if first {
            Admission::AskHost
        } else {
            Admission::Queued
        }
    }

    /// Apply the host's decision and release every parked call
    ///
    /// A denial leaves the gate in `Prompt`, so the next gated call asks again.
    pub fn resolve(&mut self, granted: bool) -> Vec<PendingCall> {
        if granted {
            self.state = PermissionState::Granted;
        }
        info!(
            "Permission {}; releasing {} calls",
            if granted { "granted" } else { "denied" },
            self.pending.len()
        );
        std::mem::take(&mut self.pending)
    }
}
