//! Outbound telemetry events
//!
//! These are advisory: fire-and-forget observability signals the backend may
//! use for monitoring. Dropping one must never affect the payment flow.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde_json::{json, Value as JsonValue};

/// Why the user left the payment flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    WebviewClosed,
    UserCancelled,
}

impl ExitReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExitReason::WebviewClosed => "webview_closed",
            ExitReason::UserCancelled => "user_cancelled",
        }
    }
}

/// Events the client publishes on the realtime channel.
#[derive(Debug, Clone)]
pub enum TelemetryEvent {
    PaymentInitiated {
        amount: BigDecimal,
        user_id: i64,
        timestamp: DateTime<Utc>,
    },
    PaymentInitiationFailed {
        error: String,
        timestamp: DateTime<Utc>,
    },
    /// Gateway success observed through the renderer's navigation URL.
    PaymentCompleted { timestamp: DateTime<Utc> },
    /// Gateway failure observed through the renderer's navigation URL.
    PaymentFailed { timestamp: DateTime<Utc> },
    PaymentFlowExited {
        status: ExitReason,
        timestamp: DateTime<Utc>,
    },
    PaymentError {
        error: String,
        code: Option<i64>,
        timestamp: DateTime<Utc>,
    },
}

impl TelemetryEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TelemetryEvent::PaymentInitiated { .. } => "payment_initiated",
            TelemetryEvent::PaymentInitiationFailed { .. } => "payment_initiation_failed",
            TelemetryEvent::PaymentCompleted { .. } => "payment_completed",
            TelemetryEvent::PaymentFailed { .. } => "payment_failed",
            TelemetryEvent::PaymentFlowExited { .. } => "payment_flow_exited",
            TelemetryEvent::PaymentError { .. } => "payment_error",
        }
    }

    pub fn payload(&self) -> JsonValue {
        match self {
            TelemetryEvent::PaymentInitiated {
                amount,
                user_id,
                timestamp,
            } => json!({
                "amount": amount.to_string(),
                "userId": user_id,
                "timestamp": timestamp.to_rfc3339(),
            }),
            TelemetryEvent::PaymentInitiationFailed { error, timestamp } => json!({
                "error": error,
                "timestamp": timestamp.to_rfc3339(),
            }),
            TelemetryEvent::PaymentCompleted { timestamp } => json!({
                "status": "success",
                "timestamp": timestamp.to_rfc3339(),
            }),
            TelemetryEvent::PaymentFailed { timestamp } => json!({
                "status": "failure",
                "timestamp": timestamp.to_rfc3339(),
            }),
            TelemetryEvent::PaymentFlowExited { status, timestamp } => json!({
                "status": status.as_str(),
                "timestamp": timestamp.to_rfc3339(),
            }),
            TelemetryEvent::PaymentError {
                error,
                code,
                timestamp,
            } => json!({
                "error": error,
                "code": code,
                "timestamp": timestamp.to_rfc3339(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_match_the_channel_contract() {
        let now = Utc::now();
        assert_eq!(
            TelemetryEvent::PaymentInitiated {
                amount: BigDecimal::from(100),
                user_id: 1,
                timestamp: now
            }
            .name(),
            "payment_initiated"
        );
        assert_eq!(
            TelemetryEvent::PaymentFlowExited {
                status: ExitReason::UserCancelled,
                timestamp: now
            }
            .name(),
            "payment_flow_exited"
        );
    }

    #[test]
    fn exit_payload_carries_the_reason() {
        let payload = TelemetryEvent::PaymentFlowExited {
            status: ExitReason::WebviewClosed,
            timestamp: Utc::now(),
        }
        .payload();
        assert_eq!(payload["status"], "webview_closed");
        assert!(payload["timestamp"].is_string());
    }

    #[test]
    fn error_payload_carries_code_and_message() {
        let payload = TelemetryEvent::PaymentError {
            error: "net::ERR_CONNECTION_RESET".to_string(),
            code: Some(-6),
            timestamp: Utc::now(),
        }
        .payload();
        assert_eq!(payload["error"], "net::ERR_CONNECTION_RESET");
        assert_eq!(payload["code"], -6);
    }
}
