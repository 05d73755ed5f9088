//! Realtime channel: outbound advisory telemetry and inbound outcome events

pub mod events;
pub mod memory;

pub use events::{ExitReason, TelemetryEvent};
pub use memory::InMemoryChannel;

use crate::session::controller::PaymentSessionController;
use crate::session::types::PaymentOutcomeEvent;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::warn;

/// Outbound side of the realtime channel.
///
/// `emit` is best-effort telemetry: it must not block, and a dropped event
/// must never affect control flow.
pub trait RealtimeChannel: Send + Sync {
    fn emit(&self, event: TelemetryEvent);
}

/// Pump `payment_status_update` deliveries into the controller until the
/// channel closes. Abort the returned handle on screen unmount; the
/// controller's own closed latch covers events already in flight.
pub fn spawn_outcome_listener(
    controller: Arc<PaymentSessionController>,
    mut outcomes: broadcast::Receiver<PaymentOutcomeEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match outcomes.recv().await {
                Ok(event) => controller.on_outcome(event).await,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "outcome listener lagged behind the channel");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}
