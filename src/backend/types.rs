//! Wire payloads for the backend write chain
//!
//! Field names follow the backend's camelCase contract verbatim, including
//! the historical lowercase `gatewayresponse` key on transaction records.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// `POST /payment`: records a successful payment.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentRecord {
    #[serde(rename = "investmentId", skip_serializing_if = "Option::is_none")]
    pub investment_id: Option<String>,
    #[serde(rename = "paymentAmount", skip_serializing_if = "Option::is_none")]
    pub payment_amount: Option<BigDecimal>,
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(rename = "paymentMethod", skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(rename = "schemeId", skip_serializing_if = "Option::is_none")]
    pub scheme_id: Option<String>,
    #[serde(rename = "transactionId", skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(rename = "orderId", skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
}

/// Receipt for a recorded payment. `payment_id` feeds the transaction
/// record; it degrades to `0` there when the payment write failed.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentReceipt {
    #[serde(rename = "paymentId", default)]
    pub payment_id: Option<i64>,
}

/// `PUT /investments/{id}`: marks the installment paid.
#[derive(Debug, Clone, Serialize)]
pub struct InvestmentUpdate {
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(rename = "schemeId", skip_serializing_if = "Option::is_none")]
    pub scheme_id: Option<String>,
    #[serde(rename = "chitId", skip_serializing_if = "Option::is_none")]
    pub chit_id: Option<String>,
    #[serde(rename = "accountName", skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    #[serde(rename = "accountNo", skip_serializing_if = "Option::is_none")]
    pub account_no: Option<String>,
    #[serde(rename = "paymentStatus")]
    pub payment_status: String,
    #[serde(rename = "paymentAmount", skip_serializing_if = "Option::is_none")]
    pub payment_amount: Option<BigDecimal>,
}

/// `POST /transactions`: the unconditional audit record, written exactly
/// once per attempt after the success/failure branch resolves.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionRecord {
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(rename = "investmentId", skip_serializing_if = "Option::is_none")]
    pub investment_id: Option<String>,
    #[serde(rename = "schemeId", skip_serializing_if = "Option::is_none")]
    pub scheme_id: Option<String>,
    #[serde(rename = "chitId", skip_serializing_if = "Option::is_none")]
    pub chit_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installment: Option<u32>,
    #[serde(rename = "accountNumber", skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(rename = "paymentId")]
    pub payment_id: i64,
    #[serde(rename = "orderId", skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<BigDecimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(rename = "paymentMethod", skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    pub signature: String,
    #[serde(rename = "paymentStatus")]
    pub payment_status: String,
    #[serde(rename = "paymentDate", skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(
        rename = "gatewayTransactionId",
        skip_serializing_if = "Option::is_none"
    )]
    pub gateway_transaction_id: Option<String>,
    #[serde(rename = "gatewayresponse")]
    pub gateway_response: String,
}
