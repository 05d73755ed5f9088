use crate::backend::types::{InvestmentUpdate, PaymentRecord, PaymentReceipt, TransactionRecord};
use crate::error::SessionResult;
use crate::session::types::{GatewaySession, PaymentRequest};
use async_trait::async_trait;

/// The backend HTTP API as consumed by the payment session controller.
///
/// One gateway-session call plus the three dependent writes of the
/// persistence chain. Implementations must not retry on their own: retry
/// policy belongs to the caller (re-invoking `initiate`) or to backend
/// reconciliation, never to the transport.
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// `POST /initiate`: starts a gateway checkout session. Form-encoded;
    /// absent fields are omitted from the body entirely.
    async fn initiate_session(&self, request: &PaymentRequest) -> SessionResult<GatewaySession>;

    /// `POST /payment`: records a successful payment.
    async fn record_payment(&self, record: &PaymentRecord) -> SessionResult<PaymentReceipt>;

    /// `PUT /investments/{id}`: marks the investment installment paid.
    async fn update_investment(
        &self,
        investment_id: &str,
        update: &InvestmentUpdate,
    ) -> SessionResult<()>;

    /// `POST /transactions`: writes the audit record.
    async fn record_transaction(&self, record: &TransactionRecord) -> SessionResult<()>;
}
