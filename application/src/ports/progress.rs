//! Progress notification port
//!
//! Defines the interface for reporting progress while a lead is handed to
//! a [`LeadGateway`](super::lead_gateway::LeadGateway).

use crate::ports::lead_gateway::LeadKind;

/// Callback for progress updates during lead delivery
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain log line, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called right before the gateway is invoked
    fn on_send_start(&self, kind: LeadKind, channel: &str);

    /// Called when the gateway call returns
    fn on_send_complete(&self, kind: LeadKind, success: bool);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_send_start(&self, _kind: LeadKind, _channel: &str) {}
    fn on_send_complete(&self, _kind: LeadKind, _success: bool) {}
}
