pub mod api;
pub mod http;
pub mod types;

pub use api::BackendApi;
pub use http::{encode_form, HttpBackend};
pub use types::{InvestmentUpdate, PaymentRecord, PaymentReceipt, TransactionRecord};
