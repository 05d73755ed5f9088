use crate::backend::api::BackendApi;
use crate::backend::types::{InvestmentUpdate, PaymentRecord, PaymentReceipt, TransactionRecord};
use crate::config::BackendConfig;
use crate::error::{SessionError, SessionResult};
use crate::session::types::{GatewaySession, PaymentRequest};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::info;
use url::form_urlencoded;

/// reqwest-backed implementation of [`BackendApi`].
///
/// The client timeout is the only request-level cancellation mechanism; no
/// call here retries on its own.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> SessionResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SessionError::Configuration {
                message: format!("failed to initialize HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &impl serde::Serialize,
    ) -> SessionResult<T> {
        let response = self
            .client
            .request(method, self.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(|e| SessionError::Network {
                endpoint: path.to_string(),
                message: e.to_string(),
            })?;
        Self::decode(path, response).await
    }

    async fn send_form<T: DeserializeOwned>(&self, path: &str, body: String) -> SessionResult<T> {
        let response = self
            .client
            .post(self.endpoint(path))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .map_err(|e| SessionError::Network {
                endpoint: path.to_string(),
                message: e.to_string(),
            })?;
        Self::decode(path, response).await
    }

    async fn decode<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> SessionResult<T> {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(SessionError::Backend {
                endpoint: path.to_string(),
                status: status.as_u16(),
                message: text,
            });
        }
        serde_json::from_str::<T>(&text).map_err(|e| SessionError::Decode {
            endpoint: path.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn initiate_session(&self, request: &PaymentRequest) -> SessionResult<GatewaySession> {
        let body = encode_form(&initiate_form_fields(request));
        let raw: InitiateResponse = self.send_form("/initiate", body).await?;
        let session = GatewaySession {
            payment_url: raw.session.payment_links.web,
        };
        info!(user_id = request.user_id, "gateway session initiated");
        Ok(session)
    }

    async fn record_payment(&self, record: &PaymentRecord) -> SessionResult<PaymentReceipt> {
        let receipt: PaymentReceipt = self.send_json(Method::POST, "/payment", record).await?;
        info!(
            user_id = record.user_id,
            payment_id = ?receipt.payment_id,
            "payment recorded"
        );
        Ok(receipt)
    }

    async fn update_investment(
        &self,
        investment_id: &str,
        update: &InvestmentUpdate,
    ) -> SessionResult<()> {
        let path = format!("/investments/{}", investment_id);
        let _ignored: serde_json::Value = self.send_json(Method::PUT, &path, update).await?;
        info!(investment_id, "investment marked paid");
        Ok(())
    }

    async fn record_transaction(&self, record: &TransactionRecord) -> SessionResult<()> {
        let _ignored: serde_json::Value = self
            .send_json(Method::POST, "/transactions", record)
            .await?;
        info!(
            user_id = record.user_id,
            payment_id = record.payment_id,
            "transaction recorded"
        );
        Ok(())
    }
}

/// Form fields for `/initiate`, in the backend's expected key order.
/// `None` values are dropped here rather than sent as empty strings.
fn initiate_form_fields(request: &PaymentRequest) -> Vec<(&'static str, Option<String>)> {
    vec![
        ("userId", Some(request.user_id.to_string())),
        ("amount", Some(request.amount.to_string())),
        ("investmentId", request.investment_id.clone()),
        ("schemeId", request.scheme_id.clone()),
        ("userEmail", request.user_email.clone()),
        ("userMobile", request.user_mobile.clone()),
        ("userName", request.user_name.clone()),
    ]
}

/// Percent-encode present pairs into an `application/x-www-form-urlencoded`
/// body, omitting absent ones.
pub fn encode_form(pairs: &[(&str, Option<String>)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        if let Some(value) = value {
            serializer.append_pair(key, value);
        }
    }
    serializer.finish()
}

#[derive(Debug, Deserialize)]
struct InitiateResponse {
    session: InitiateSession,
}

#[derive(Debug, Deserialize)]
struct InitiateSession {
    payment_links: PaymentLinks,
}

#[derive(Debug, Deserialize)]
struct PaymentLinks {
    web: String,
}
