//! Payment session controller
//!
//! Drives one payment attempt from gateway-session initiation through the
//! terminal write chain, exactly once. The controller owns nothing durable:
//! it captures the attempt's [`PaymentRequest`] at construction, reconciles
//! the single authoritative outcome, and issues the dependent backend writes
//! Payment -> Investment -> Transaction in that order. Collaborators arrive
//! as injected handles; there is no module-level state.

use crate::backend::api::BackendApi;
use crate::backend::types::{InvestmentUpdate, PaymentRecord, TransactionRecord};
use crate::channel::events::{ExitReason, TelemetryEvent};
use crate::channel::RealtimeChannel;
use crate::error::{SessionError, SessionResult};
use crate::host::{Navigation, ScreenHost};
use crate::session::state::AttemptState;
use crate::session::types::{
    GatewayPaymentResponse, GatewaySession, OutcomeStatus, OutcomeSummary, PaymentOutcomeEvent,
    PaymentRequest,
};
use crate::webview::{self, NavigationSignal};
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

const INITIATION_ALERT: &str = "Failed to initiate payment. Please try again.";
const PROCESSING_ALERT: &str = "An error occurred while processing the transaction.";
const FAILURE_FALLBACK: &str = "Payment could not be completed";

pub struct PaymentSessionController {
    request: PaymentRequest,
    backend: Arc<dyn BackendApi>,
    channel: Arc<dyn RealtimeChannel>,
    host: Arc<dyn ScreenHost>,
    state: RwLock<AttemptState>,
    closed: AtomicBool,
}

impl PaymentSessionController {
    /// One controller per attempt: the guard and state machine start fresh
    /// and are never shared across attempts.
    pub fn new(
        request: PaymentRequest,
        backend: Arc<dyn BackendApi>,
        channel: Arc<dyn RealtimeChannel>,
        host: Arc<dyn ScreenHost>,
    ) -> Self {
        Self {
            request,
            backend,
            channel,
            host,
            state: RwLock::new(AttemptState::Idle),
            closed: AtomicBool::new(false),
        }
    }

    pub fn request(&self) -> &PaymentRequest {
        &self.request
    }

    pub async fn state(&self) -> AttemptState {
        *self.state.read().await
    }

    /// Request a gateway checkout session.
    ///
    /// Emits advisory `payment_initiated` telemetry before the HTTP call.
    /// On failure the attempt stays retryable: telemetry and a blocking
    /// alert go out, and a fresh `initiate` may follow. May be called again
    /// before an outcome lands; each call yields an independent session and
    /// never touches the duplicate-processing guard.
    pub async fn initiate(&self) -> SessionResult<GatewaySession> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(SessionError::AttemptClosed);
        }
        self.request.validate()?;

        {
            let mut state = self.state.write().await;
            if !state.accepts_initiate() {
                return Err(SessionError::Validation {
                    message: "an outcome for this attempt has already been processed".to_string(),
                    field: None,
                });
            }
            *state = AttemptState::Initiated;
        }

        self.channel.emit(TelemetryEvent::PaymentInitiated {
            amount: self.request.amount.clone(),
            user_id: self.request.user_id,
            timestamp: Utc::now(),
        });

        match self.backend.initiate_session(&self.request).await {
            Ok(session) => {
                info!(
                    user_id = self.request.user_id,
                    "gateway session established"
                );
                self.transition(AttemptState::Initiated, AttemptState::AwaitingOutcome)
                    .await;
                Ok(session)
            }
            Err(err) => {
                warn!(error = %err, "gateway session initiation failed");
                self.channel.emit(TelemetryEvent::PaymentInitiationFailed {
                    error: err.to_string(),
                    timestamp: Utc::now(),
                });
                self.host.alert("Payment Error", INITIATION_ALERT);
                self.transition(AttemptState::Initiated, AttemptState::Idle)
                    .await;
                Err(err)
            }
        }
    }

    /// Apply an outcome event delivered over the realtime channel.
    ///
    /// The first terminal event claims the attempt and runs the write chain;
    /// every later delivery is swallowed. Non-terminal statuses (`pending`,
    /// unrecognized) leave the attempt waiting for a later terminal event.
    pub async fn on_outcome(&self, event: PaymentOutcomeEvent) {
        if self.closed.load(Ordering::SeqCst) {
            debug!("outcome after shutdown ignored");
            return;
        }

        if !event.status.is_terminal() {
            info!(
                status = ?event.status,
                order_id = ?event.order_id,
                "non-terminal outcome, attempt keeps waiting"
            );
            return;
        }

        if !self.claim().await {
            debug!(order_id = ?event.order_id, "duplicate outcome swallowed");
            return;
        }

        self.resolve_terminal(event).await;
    }

    /// Secondary outcome signal: a navigation URL change from the embedded
    /// renderer. Success/failure redirects synthesize an outcome event and
    /// run through the same guarded resolution as a realtime event, so the
    /// two paths can never double-process an attempt.
    pub async fn on_navigation(&self, url: &str) {
        if self.closed.load(Ordering::SeqCst) {
            debug!("navigation after shutdown ignored");
            return;
        }
        match webview::classify_navigation(url) {
            Some(NavigationSignal::Success {
                payment_id,
                amount,
                txn_id,
            }) => {
                info!(payment_id = %payment_id, "gateway redirect reported success");
                self.channel.emit(TelemetryEvent::PaymentCompleted {
                    timestamp: Utc::now(),
                });
                self.on_outcome(PaymentOutcomeEvent {
                    status: OutcomeStatus::Success,
                    order_id: Some(payment_id),
                    message: None,
                    payment_response: Some(GatewayPaymentResponse {
                        amount,
                        txn_id,
                        ..Default::default()
                    }),
                })
                .await;
            }
            Some(NavigationSignal::Failure) => {
                info!("gateway redirect reported failure");
                self.channel.emit(TelemetryEvent::PaymentFailed {
                    timestamp: Utc::now(),
                });
                self.on_outcome(PaymentOutcomeEvent {
                    status: OutcomeStatus::Failure,
                    order_id: None,
                    message: None,
                    payment_response: None,
                })
                .await;
            }
            None => {}
        }
    }

    /// Renderer-level load errors are observability signals only; a later
    /// outcome event (or the user) decides where the flow goes.
    pub fn on_renderer_error(&self, description: &str, code: Option<i64>) {
        warn!(code = ?code, error = %description, "embedded renderer error");
        self.channel.emit(TelemetryEvent::PaymentError {
            error: description.to_string(),
            code,
            timestamp: Utc::now(),
        });
    }

    /// Close the attempt on screen teardown. Later callbacks become no-ops;
    /// any in-flight request is bounded by the HTTP client timeout and its
    /// result is discarded.
    pub fn shutdown(&self, reason: ExitReason) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        info!(reason = reason.as_str(), "payment flow exited");
        self.channel.emit(TelemetryEvent::PaymentFlowExited {
            status: reason,
            timestamp: Utc::now(),
        });
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Claim the attempt for outcome processing. Flips the state before any
    /// awaited work so a re-entrant delivery cannot double-process.
    async fn claim(&self) -> bool {
        let mut state = self.state.write().await;
        if !state.accepts_outcome() {
            return false;
        }
        *state = AttemptState::Processing;
        true
    }

    async fn transition(&self, from: AttemptState, to: AttemptState) {
        let mut state = self.state.write().await;
        // A concurrent outcome claim outranks the initiation path.
        if *state == from {
            *state = to;
        }
    }

    async fn resolve_terminal(&self, event: PaymentOutcomeEvent) {
        let summary = OutcomeSummary::from_event(&event);
        let mut payment_id: Option<i64> = None;

        match event.status {
            OutcomeStatus::Success => {
                payment_id = self.run_success_writes(&event).await;
                self.host
                    .navigate(Navigation::PaymentSuccess(summary.clone()));
            }
            OutcomeStatus::Failure => {
                let message = event.message.clone().unwrap_or_else(|| {
                    FAILURE_FALLBACK.to_string()
                });
                self.host.alert("Payment Failed", &message);
                self.host
                    .navigate(Navigation::PaymentFailure(summary.clone()));
            }
            // resolve_terminal is only reached with terminal statuses
            OutcomeStatus::Pending | OutcomeStatus::Unknown => {}
        }

        // The audit record is unconditional: one attempt, one transaction
        // write, whatever happened above.
        let record = self.transaction_record(&event, payment_id.unwrap_or(0));
        if let Err(err) = self.backend.record_transaction(&record).await {
            error!(error = %err, "transaction record failed");
            self.host.alert("Error", PROCESSING_ALERT);
        }

        let mut state = self.state.write().await;
        *state = AttemptState::Terminal;
        info!(
            txn_id = ?summary.txn_id,
            order_id = ?summary.order_id,
            status = ?event.status,
            "attempt resolved"
        );
    }

    /// Payment then Investment, strictly in that order. Each failure is
    /// caught individually so neither blocks what follows.
    async fn run_success_writes(&self, event: &PaymentOutcomeEvent) -> Option<i64> {
        let mut payment_id = None;
        match self.backend.record_payment(&self.payment_record(event)).await {
            Ok(receipt) => {
                payment_id = receipt.payment_id;
                info!(payment_id = ?payment_id, "payment recorded");
            }
            Err(err) => {
                error!(error = %err, "payment record failed");
                self.host.alert("Error", &err.user_message());
            }
        }

        let investment_result = match self.request.investment_id.as_deref() {
            Some(id) => {
                self.backend
                    .update_investment(id, &self.investment_update(event))
                    .await
            }
            None => Err(SessionError::Validation {
                message: "no investment id in attempt context".to_string(),
                field: Some("investmentId".to_string()),
            }),
        };
        if let Err(err) = investment_result {
            error!(error = %err, "investment update failed");
            self.host.alert("Error", &err.user_message());
        }

        payment_id
    }

    fn payment_record(&self, event: &PaymentOutcomeEvent) -> PaymentRecord {
        let response = event.payment_response.as_ref();
        PaymentRecord {
            investment_id: self.request.investment_id.clone(),
            payment_amount: response.and_then(|r| r.amount.clone()),
            user_id: self.request.user_id,
            payment_method: response.and_then(|r| r.payment_method_type.clone()),
            scheme_id: self.request.scheme_id.clone(),
            transaction_id: response.and_then(|r| r.txn_id.clone()),
            order_id: event.order_id.clone(),
        }
    }

    fn investment_update(&self, event: &PaymentOutcomeEvent) -> InvestmentUpdate {
        let response = event.payment_response.as_ref();
        InvestmentUpdate {
            user_id: self.request.user_id,
            scheme_id: self.request.scheme_id.clone(),
            chit_id: self.request.chit_id.clone(),
            account_name: self
                .request
                .account_name
                .clone()
                .or_else(|| self.request.user_name.clone()),
            account_no: self.request.account_no.clone(),
            payment_status: "PAID".to_string(),
            payment_amount: response.and_then(|r| r.amount.clone()),
        }
    }

    fn transaction_record(&self, event: &PaymentOutcomeEvent, payment_id: i64) -> TransactionRecord {
        let response = event.payment_response.as_ref();
        TransactionRecord {
            user_id: self.request.user_id,
            investment_id: self.request.investment_id.clone(),
            scheme_id: self.request.scheme_id.clone(),
            chit_id: self.request.chit_id.clone(),
            installment: Some(1),
            account_number: self.request.account_no.clone(),
            payment_id,
            order_id: event.order_id.clone(),
            amount: response.and_then(|r| r.amount.clone()),
            currency: response.and_then(|r| r.currency.clone()),
            payment_method: response
                .and_then(|r| r.txn_detail.as_ref())
                .and_then(|d| d.txn_flow_type.clone()),
            signature: "000".to_string(),
            payment_status: response
                .and_then(|r| r.payment_gateway_response.as_ref())
                .and_then(|g| g.resp_code.clone())
                .unwrap_or_else(|| "Canceled".to_string()),
            payment_date: response.and_then(|r| r.date_created.clone()),
            status: response.and_then(|r| r.status.clone()),
            gateway_transaction_id: response.and_then(|r| r.txn_id.clone()),
            gateway_response: serde_json::to_string(event).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::types::{GatewayResponseDetail, TxnDetail};
    use bigdecimal::BigDecimal;

    fn request() -> PaymentRequest {
        PaymentRequest {
            user_id: 1,
            amount: BigDecimal::from(5000),
            investment_id: Some("INV1".to_string()),
            scheme_id: Some("S1".to_string()),
            chit_id: Some("C1".to_string()),
            account_name: None,
            account_no: Some("0001112223".to_string()),
            user_email: Some("user@example.com".to_string()),
            user_mobile: Some("+919812345678".to_string()),
            user_name: Some("Test User".to_string()),
        }
    }

    fn controller(request: PaymentRequest) -> PaymentSessionController {
        use crate::channel::InMemoryChannel;

        struct NullBackend;

        #[async_trait::async_trait]
        impl BackendApi for NullBackend {
            async fn initiate_session(
                &self,
                _request: &PaymentRequest,
            ) -> SessionResult<GatewaySession> {
                Ok(GatewaySession {
                    payment_url: "https://gateway.example.com/pay".to_string(),
                })
            }
            async fn record_payment(
                &self,
                _record: &PaymentRecord,
            ) -> SessionResult<crate::backend::types::PaymentReceipt> {
                Ok(crate::backend::types::PaymentReceipt { payment_id: None })
            }
            async fn update_investment(
                &self,
                _investment_id: &str,
                _update: &InvestmentUpdate,
            ) -> SessionResult<()> {
                Ok(())
            }
            async fn record_transaction(
                &self,
                _record: &TransactionRecord,
            ) -> SessionResult<()> {
                Ok(())
            }
        }

        struct NullHost;

        impl ScreenHost for NullHost {
            fn alert(&self, _title: &str, _message: &str) {}
            fn navigate(&self, _target: Navigation) {}
        }

        PaymentSessionController::new(
            request,
            Arc::new(NullBackend),
            Arc::new(InMemoryChannel::new()),
            Arc::new(NullHost),
        )
    }

    fn success_event() -> PaymentOutcomeEvent {
        PaymentOutcomeEvent {
            status: OutcomeStatus::Success,
            order_id: Some("O1".to_string()),
            message: None,
            payment_response: Some(GatewayPaymentResponse {
                amount: Some(BigDecimal::from(5000)),
                txn_id: Some("T1".to_string()),
                payment_method_type: Some("UPI".to_string()),
                currency: Some("INR".to_string()),
                date_created: Some("2026-02-12T00:00:00Z".to_string()),
                status: Some("CHARGED".to_string()),
                payment_gateway_response: Some(GatewayResponseDetail {
                    resp_code: Some("SUCCESS".to_string()),
                }),
                txn_detail: Some(TxnDetail {
                    txn_flow_type: Some("NETBANKING".to_string()),
                }),
            }),
        }
    }

    #[test]
    fn payment_record_draws_from_request_and_event() {
        let controller = controller(request());
        let record = controller.payment_record(&success_event());
        assert_eq!(record.investment_id.as_deref(), Some("INV1"));
        assert_eq!(record.transaction_id.as_deref(), Some("T1"));
        assert_eq!(record.payment_method.as_deref(), Some("UPI"));
        assert_eq!(record.order_id.as_deref(), Some("O1"));
        assert_eq!(record.user_id, 1);
    }

    #[test]
    fn investment_update_falls_back_to_user_name_for_account_name() {
        let controller = controller(request());
        let update = controller.investment_update(&success_event());
        assert_eq!(update.payment_status, "PAID");
        assert_eq!(update.account_name.as_deref(), Some("Test User"));
        assert_eq!(update.chit_id.as_deref(), Some("C1"));
    }

    #[test]
    fn transaction_record_serializes_the_full_event() {
        let controller = controller(request());
        let event = success_event();
        let record = controller.transaction_record(&event, 42);
        assert_eq!(record.payment_id, 42);
        assert_eq!(record.signature, "000");
        assert_eq!(record.payment_status, "SUCCESS");
        assert_eq!(record.payment_method.as_deref(), Some("NETBANKING"));
        assert_eq!(record.gateway_transaction_id.as_deref(), Some("T1"));
        let embedded: serde_json::Value =
            serde_json::from_str(&record.gateway_response).expect("embedded event should parse");
        assert_eq!(embedded["orderId"], "O1");
    }

    #[test]
    fn transaction_status_degrades_to_canceled_without_gateway_detail() {
        let controller = controller(request());
        let event = PaymentOutcomeEvent {
            status: OutcomeStatus::Failure,
            order_id: None,
            message: Some("Insufficient funds".to_string()),
            payment_response: None,
        };
        let record = controller.transaction_record(&event, 0);
        assert_eq!(record.payment_status, "Canceled");
        assert_eq!(record.payment_id, 0);
    }

    #[tokio::test]
    async fn initiate_after_shutdown_is_rejected() {
        let controller = controller(request());
        controller.shutdown(ExitReason::UserCancelled);
        let result = controller.initiate().await;
        assert!(matches!(result, Err(SessionError::AttemptClosed)));
    }

    #[tokio::test]
    async fn pending_outcome_leaves_the_attempt_claimable() {
        let controller = controller(request());
        controller
            .on_outcome(PaymentOutcomeEvent {
                status: OutcomeStatus::Pending,
                order_id: None,
                message: None,
                payment_response: None,
            })
            .await;
        assert_eq!(controller.state().await, AttemptState::Idle);
        controller.on_outcome(success_event()).await;
        assert_eq!(controller.state().await, AttemptState::Terminal);
    }
}
