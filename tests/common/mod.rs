//! Shared collaborator mocks for scenario tests

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chitpay::backend::{
    BackendApi, InvestmentUpdate, PaymentRecord, PaymentReceipt, TransactionRecord,
};
use chitpay::host::{Navigation, ScreenHost};
use chitpay::session::{GatewaySession, PaymentRequest};
use chitpay::{SessionError, SessionResult};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Backend mock that records every call with a global sequence number, so
/// tests can assert strict write-chain ordering, and whose sub-calls can be
/// made to fail individually.
#[derive(Default)]
pub struct MockBackend {
    seq: AtomicUsize,
    pub initiations: Mutex<Vec<(PaymentRequest, usize)>>,
    pub payments: Mutex<Vec<(PaymentRecord, usize)>>,
    pub investments: Mutex<Vec<(String, InvestmentUpdate, usize)>>,
    pub transactions: Mutex<Vec<(TransactionRecord, usize)>>,
    pub fail_initiate: AtomicBool,
    pub fail_payment: AtomicBool,
    pub fail_investment: AtomicBool,
    pub fail_transaction: AtomicBool,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_seq(&self) -> usize {
        self.seq.fetch_add(1, Ordering::SeqCst)
    }

    fn unavailable(endpoint: &str) -> SessionError {
        SessionError::Backend {
            endpoint: endpoint.to_string(),
            status: 503,
            message: "service unavailable".to_string(),
        }
    }

    pub fn payment_count(&self) -> usize {
        self.payments.lock().unwrap().len()
    }

    pub fn investment_count(&self) -> usize {
        self.investments.lock().unwrap().len()
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.lock().unwrap().len()
    }
}

#[async_trait]
impl BackendApi for MockBackend {
    async fn initiate_session(&self, request: &PaymentRequest) -> SessionResult<GatewaySession> {
        let seq = self.next_seq();
        if self.fail_initiate.load(Ordering::SeqCst) {
            return Err(Self::unavailable("/initiate"));
        }
        self.initiations.lock().unwrap().push((request.clone(), seq));
        Ok(GatewaySession {
            payment_url: format!("https://gateway.example.com/checkout/{}", seq),
        })
    }

    async fn record_payment(&self, record: &PaymentRecord) -> SessionResult<PaymentReceipt> {
        let seq = self.next_seq();
        if self.fail_payment.load(Ordering::SeqCst) {
            return Err(Self::unavailable("/payment"));
        }
        self.payments.lock().unwrap().push((record.clone(), seq));
        Ok(PaymentReceipt {
            payment_id: Some(77),
        })
    }

    async fn update_investment(
        &self,
        investment_id: &str,
        update: &InvestmentUpdate,
    ) -> SessionResult<()> {
        let seq = self.next_seq();
        if self.fail_investment.load(Ordering::SeqCst) {
            return Err(Self::unavailable("/investments"));
        }
        self.investments
            .lock()
            .unwrap()
            .push((investment_id.to_string(), update.clone(), seq));
        Ok(())
    }

    async fn record_transaction(&self, record: &TransactionRecord) -> SessionResult<()> {
        let seq = self.next_seq();
        if self.fail_transaction.load(Ordering::SeqCst) {
            return Err(Self::unavailable("/transactions"));
        }
        self.transactions.lock().unwrap().push((record.clone(), seq));
        Ok(())
    }
}

/// Screen host mock recording alerts and navigations in arrival order.
#[derive(Default)]
pub struct RecordingHost {
    pub alerts: Mutex<Vec<(String, String)>>,
    pub navigations: Mutex<Vec<Navigation>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alert_count(&self) -> usize {
        self.alerts.lock().unwrap().len()
    }

    pub fn navigation_count(&self) -> usize {
        self.navigations.lock().unwrap().len()
    }
}

impl ScreenHost for RecordingHost {
    fn alert(&self, title: &str, message: &str) {
        self.alerts
            .lock()
            .unwrap()
            .push((title.to_string(), message.to_string()));
    }

    fn navigate(&self, target: Navigation) {
        self.navigations.lock().unwrap().push(target);
    }
}

/// Install the test tracing subscriber once per binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// The attempt context used across scenarios.
pub fn sample_request() -> PaymentRequest {
    PaymentRequest {
        user_id: 1,
        amount: BigDecimal::from(5000),
        investment_id: Some("INV1".to_string()),
        scheme_id: Some("S1".to_string()),
        chit_id: Some("C1".to_string()),
        account_name: Some("Test User".to_string()),
        account_no: Some("0001112223".to_string()),
        user_email: Some("user@example.com".to_string()),
        user_mobile: Some("+919812345678".to_string()),
        user_name: Some("Test User".to_string()),
    }
}
