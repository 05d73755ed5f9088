//! Unified error handling for the payment session flow
//!
//! Every fallible operation in the crate returns [`SessionError`]. The type
//! carries enough structure to drive the two consumers that matter: the
//! blocking alert dialog shown to the user (`user_message`) and the
//! retry-or-give-up decision of the screen host (`is_retryable`).

use thiserror::Error;

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("Network error calling {endpoint}: {message}")]
    Network { endpoint: String, message: String },

    #[error("Backend error on {endpoint}: HTTP {status}: {message}")]
    Backend {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("Invalid response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Payment attempt is closed")]
    AttemptClosed,
}

impl SessionError {
    pub fn is_retryable(&self) -> bool {
        match self {
            SessionError::Validation { .. } => false,
            SessionError::Network { .. } => true,
            SessionError::Backend { status, .. } => *status == 429 || *status >= 500,
            SessionError::Decode { .. } => false,
            SessionError::Configuration { .. } => false,
            SessionError::AttemptClosed => false,
        }
    }

    /// Human-readable text for the blocking alert dialog.
    pub fn user_message(&self) -> String {
        match self {
            SessionError::Validation { message, .. } => message.clone(),
            SessionError::Network { .. } => {
                "Payment service is temporarily unavailable. Please try again".to_string()
            }
            SessionError::Backend { .. } => {
                "An error occurred while processing the transaction.".to_string()
            }
            SessionError::Decode { .. } => {
                "Received an unexpected response from the payment service".to_string()
            }
            SessionError::Configuration { message } => message.clone(),
            SessionError::AttemptClosed => "This payment attempt has ended".to_string(),
        }
    }
}
