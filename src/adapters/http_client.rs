use crate::adapters::wire::{EnvelopeDefinition, ErrorDetails};
use crate::domain::model::{Envelope, EnvelopeSummary};
use crate::domain::ports::{ConfigProvider, EnvelopeApi};
use crate::utils::error::{EsignError, Result};
use crate::utils::validation::{validate_required_field, validate_url};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Envelope API backed by the remote service's REST endpoint.
pub struct HttpEnvelopeApi {
    client: Client,
    base_path: String,
    access_token: String,
    account_id: String,
}

impl HttpEnvelopeApi {
    pub fn new(
        base_path: impl Into<String>,
        access_token: impl Into<String>,
        account_id: impl Into<String>,
    ) -> Result<Self> {
        Self::with_timeout(
            base_path,
            access_token,
            account_id,
            Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        )
    }

    pub fn with_timeout(
        base_path: impl Into<String>,
        access_token: impl Into<String>,
        account_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let base_path = base_path.into();
        validate_url("base_path", &base_path)?;
        if timeout.is_zero() {
            // reqwest treats a zero timeout as already elapsed
            return Err(EsignError::InvalidConfigValueError {
                field: "timeout_seconds".to_string(),
                value: "0".to_string(),
                reason: "Value must be at least 1".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("esign-envelope/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_path: base_path.trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            account_id: account_id.into(),
        })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let access_token = *validate_required_field("access_token", &config.access_token())?;
        let account_id = *validate_required_field("account_id", &config.account_id())?;

        Self::with_timeout(
            config.base_path(),
            access_token,
            account_id,
            Duration::from_secs(config.timeout_seconds()),
        )
    }

    pub fn envelopes_url(&self) -> String {
        format!("{}/v2.1/accounts/{}/envelopes", self.base_path, self.account_id)
    }
}

#[async_trait]
impl EnvelopeApi for HttpEnvelopeApi {
    async fn create_envelope(&self, envelope: &Envelope) -> Result<EnvelopeSummary> {
        let definition = EnvelopeDefinition::from(envelope);
        let url = self.envelopes_url();

        tracing::debug!("Making API request to: {}", url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&definition)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if status.is_success() {
            let summary: EnvelopeSummary = response.json().await?;
            return Ok(summary);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Failed to read error response body: {}", e);
                format!("<error body unreadable: {}>", e)
            }
        };
        let (error_code, message) = match serde_json::from_str::<ErrorDetails>(&body) {
            Ok(details) => (details.error_code, details.message.unwrap_or(body)),
            Err(_) => (None, body),
        };

        tracing::warn!(
            status = status.as_u16(),
            error_code = error_code.as_deref().unwrap_or("-"),
            "Envelope creation rejected"
        );

        Err(EsignError::RemoteError {
            status: status.as_u16(),
            error_code,
            message,
        })
    }
}
