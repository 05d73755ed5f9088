//! Embedded renderer navigation signals
//!
//! The hosted checkout page reports progress only through URL changes, so
//! the outcome has to be sniffed from the navigation target: a URL
//! containing `success` or `failure` is the gateway's redirect back to us.
//! This is a heuristic secondary signal; the controller feeds it through the
//! same guarded resolution path as an authoritative realtime event.

use bigdecimal::BigDecimal;
use std::str::FromStr;
use tracing::warn;
use url::Url;
use uuid::Uuid;

/// What a gateway redirect URL says about the attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationSignal {
    Success {
        payment_id: String,
        amount: Option<BigDecimal>,
        txn_id: Option<String>,
    },
    Failure,
}

/// Classify a renderer navigation URL. Returns `None` for ordinary
/// in-checkout navigation that signals nothing.
pub fn classify_navigation(raw_url: &str) -> Option<NavigationSignal> {
    let lowered = raw_url.to_lowercase();
    if lowered.contains("success") {
        let fields = QueryFields::extract(raw_url);
        Some(NavigationSignal::Success {
            payment_id: fields.payment_id.unwrap_or_else(fallback_payment_id),
            amount: fields.amount,
            txn_id: fields.txn_id,
        })
    } else if lowered.contains("failure") {
        Some(NavigationSignal::Failure)
    } else {
        None
    }
}

/// Correlation id used when the gateway redirect carries no `paymentId`.
pub fn fallback_payment_id() -> String {
    format!("PAY{}", Uuid::new_v4().simple())
}

#[derive(Default)]
struct QueryFields {
    payment_id: Option<String>,
    amount: Option<BigDecimal>,
    txn_id: Option<String>,
}

impl QueryFields {
    fn extract(raw_url: &str) -> Self {
        let parsed = match Url::parse(raw_url) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "unparseable gateway navigation URL");
                return Self::default();
            }
        };

        let mut fields = Self::default();
        for (key, value) in parsed.query_pairs() {
            match key.as_ref() {
                "paymentId" => fields.payment_id = Some(value.into_owned()),
                "amount" => fields.amount = BigDecimal::from_str(&value).ok(),
                "txn_id" => fields.txn_id = Some(value.into_owned()),
                _ => {}
            }
        }
        fields
    }
}
