use crate::channel::events::TelemetryEvent;
use crate::channel::RealtimeChannel;
use crate::session::types::PaymentOutcomeEvent;
use tokio::sync::broadcast;
use tracing::debug;

const DEFAULT_CHANNEL_CAPACITY: usize = 100;

/// In-process realtime channel over tokio broadcast queues.
///
/// Serves two roles: the transport seam where a real socket client plugs in,
/// and a complete implementation for tests and local runs. Outbound
/// telemetry and inbound outcome events ride separate queues; neither side
/// blocks or errors into the payment flow.
pub struct InMemoryChannel {
    telemetry_tx: broadcast::Sender<TelemetryEvent>,
    outcome_tx: broadcast::Sender<PaymentOutcomeEvent>,
}

impl InMemoryChannel {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (telemetry_tx, _) = broadcast::channel(capacity);
        let (outcome_tx, _) = broadcast::channel(capacity);
        Self {
            telemetry_tx,
            outcome_tx,
        }
    }

    /// Subscribe to `payment_status_update` deliveries. Subscribe before the
    /// first publish; broadcast queues do not replay.
    pub fn subscribe_outcomes(&self) -> broadcast::Receiver<PaymentOutcomeEvent> {
        self.outcome_tx.subscribe()
    }

    /// Deliver an outcome event to every subscriber, returning how many
    /// received it. The server side of the channel in tests.
    pub fn publish_outcome(&self, event: PaymentOutcomeEvent) -> usize {
        self.outcome_tx.send(event).unwrap_or(0)
    }

    /// Observe outbound telemetry (tests, diagnostics).
    pub fn subscribe_telemetry(&self) -> broadcast::Receiver<TelemetryEvent> {
        self.telemetry_tx.subscribe()
    }
}

impl Default for InMemoryChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl RealtimeChannel for InMemoryChannel {
    fn emit(&self, event: TelemetryEvent) {
        // No subscribers is the normal fire-and-forget case.
        if self.telemetry_tx.send(event).is_err() {
            debug!("telemetry event dropped: no subscribers");
        }
    }
}
