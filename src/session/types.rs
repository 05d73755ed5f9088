use crate::error::{SessionError, SessionResult};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Context for one payment attempt, constructed once from screen parameters
/// and immutable for the life of the attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub user_id: i64,
    pub amount: BigDecimal,
    pub investment_id: Option<String>,
    pub scheme_id: Option<String>,
    pub chit_id: Option<String>,
    pub account_name: Option<String>,
    pub account_no: Option<String>,
    pub user_email: Option<String>,
    pub user_mobile: Option<String>,
    pub user_name: Option<String>,
}

impl PaymentRequest {
    pub fn validate(&self) -> SessionResult<()> {
        if self.amount <= BigDecimal::from(0) {
            return Err(SessionError::Validation {
                message: "amount must be greater than zero".to_string(),
                field: Some("amount".to_string()),
            });
        }
        Ok(())
    }
}

/// A backend-issued checkout session with the external payment processor.
/// The URL is handed to the embedded web renderer (or opened externally).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewaySession {
    pub payment_url: String,
}

/// Terminal (or not-yet-terminal) status reported by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    Failure,
    Pending,
    #[serde(other)]
    Unknown,
}

impl OutcomeStatus {
    /// Only success and failure resolve an attempt; anything else leaves it
    /// waiting for a later event.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OutcomeStatus::Success | OutcomeStatus::Failure)
    }
}

/// The backend's report of a payment attempt's result, delivered over the
/// realtime channel as a `payment_status_update` event. Delivered exactly
/// once by contract, but the controller defends against duplicates anyway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOutcomeEvent {
    pub status: OutcomeStatus,
    #[serde(rename = "orderId", default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(
        rename = "paymentResponse",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub payment_response: Option<GatewayPaymentResponse>,
}

/// Gateway-side detail attached to an outcome event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayPaymentResponse {
    #[serde(default)]
    pub amount: Option<BigDecimal>,
    #[serde(default)]
    pub txn_id: Option<String>,
    #[serde(default)]
    pub payment_method_type: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub date_created: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub payment_gateway_response: Option<GatewayResponseDetail>,
    #[serde(default)]
    pub txn_detail: Option<TxnDetail>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayResponseDetail {
    #[serde(default)]
    pub resp_code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TxnDetail {
    #[serde(default)]
    pub txn_flow_type: Option<String>,
}

/// Correlation fields carried into the terminal success/failure view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutcomeSummary {
    pub txn_id: Option<String>,
    pub amount: Option<BigDecimal>,
    pub order_id: Option<String>,
}

impl OutcomeSummary {
    pub fn from_event(event: &PaymentOutcomeEvent) -> Self {
        let response = event.payment_response.as_ref();
        Self {
            txn_id: response.and_then(|r| r.txn_id.clone()),
            amount: response.and_then(|r| r.amount.clone()),
            order_id: event.order_id.clone(),
        }
    }
}
