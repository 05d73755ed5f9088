pub mod controller;
pub mod state;
pub mod types;

pub use controller::PaymentSessionController;
pub use state::AttemptState;
pub use types::{
    GatewayPaymentResponse, GatewayResponseDetail, GatewaySession, OutcomeStatus, OutcomeSummary,
    PaymentOutcomeEvent, PaymentRequest, TxnDetail,
};
