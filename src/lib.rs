//! Payment session control for savings-scheme installments
//!
//! One user-initiated payment attempt runs through a multi-step handshake:
//! a gateway checkout session opened in an embedded web renderer, a realtime
//! channel that delivers the single authoritative outcome, and a dependent
//! persistence chain (payment record, investment update, transaction audit
//! record) that must execute in order, exactly once. This crate owns that
//! flow; rendering, navigation chrome, and the backend itself stay with the
//! embedding application behind the [`host::ScreenHost`],
//! [`backend::BackendApi`], and [`channel::RealtimeChannel`] seams.

pub mod backend;
pub mod channel;
pub mod config;
pub mod error;
pub mod host;
pub mod session;
pub mod webview;

pub use backend::{BackendApi, HttpBackend};
pub use channel::{spawn_outcome_listener, ExitReason, InMemoryChannel, RealtimeChannel, TelemetryEvent};
pub use config::{AppConfig, BackendConfig};
pub use error::{SessionError, SessionResult};
pub use host::{Navigation, ScreenHost};
pub use session::{
    AttemptState, GatewaySession, OutcomeStatus, OutcomeSummary, PaymentOutcomeEvent,
    PaymentRequest, PaymentSessionController,
};
