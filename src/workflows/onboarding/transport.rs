use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Relative endpoint of the business-creation POST.
pub const CREATE_BUSINESS_PATH: &str = "submit_business_info/submit_business_info.php";

/// Server-issued identifier returned by the creation call. Kept as the raw
/// JSON value; it is never parsed or interpreted, only echoed back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessKey(pub Value);

impl fmt::Display for BusinessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(raw) => write!(f, "{raw}"),
            other => write!(f, "{other}"),
        }
    }
}

/// Response shape shared by every backend write endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("backend request failed: {0}")]
    Request(String),
    #[error("backend returned a malformed payload: {0}")]
    Malformed(String),
}

/// Write-side port to the intake backend. Implementations only move JSON;
/// success/identifier interpretation stays with the submission plan.
#[async_trait]
pub trait IntakeGateway: Send + Sync {
    async fn create_business(&self, payload: &Value) -> Result<BackendEnvelope, TransportError>;
    async fn submit_section(
        &self,
        path: &'static str,
        payload: &Value,
    ) -> Result<BackendEnvelope, TransportError>;
}

/// Thin reqwest wrapper for the production backend.
#[derive(Debug, Clone)]
pub struct HttpIntakeClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpIntakeClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|err| TransportError::Request(err.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn post_envelope(
        &self,
        path: &str,
        payload: &Value,
    ) -> Result<BackendEnvelope, TransportError> {
        let response = self
            .http
            .post(self.endpoint(path))
            .json(payload)
            .send()
            .await
            .map_err(|err| TransportError::Request(err.to_string()))?;

        response
            .json::<BackendEnvelope>()
            .await
            .map_err(|err| TransportError::Malformed(err.to_string()))
    }
}

#[async_trait]
impl IntakeGateway for HttpIntakeClient {
    async fn create_business(&self, payload: &Value) -> Result<BackendEnvelope, TransportError> {
        self.post_envelope(CREATE_BUSINESS_PATH, payload).await
    }

    async fn submit_section(
        &self,
        path: &'static str,
        payload: &Value,
    ) -> Result<BackendEnvelope, TransportError> {
        self.post_envelope(path, payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slashes() {
        let client = HttpIntakeClient::new("http://localhost/onboarding/").expect("client");
        assert_eq!(
            client.endpoint(CREATE_BUSINESS_PATH),
            "http://localhost/onboarding/submit_business_info/submit_business_info.php"
        );
    }

    #[test]
    fn envelope_defaults_fail_closed() {
        let envelope: BackendEnvelope = serde_json::from_str("{}").expect("parse");
        assert!(!envelope.success);
        assert!(envelope.id.is_none());
    }

    #[test]
    fn business_key_displays_strings_bare() {
        assert_eq!(BusinessKey(Value::String("42".into())).to_string(), "42");
        assert_eq!(BusinessKey(Value::from(42)).to_string(), "42");
    }
}
