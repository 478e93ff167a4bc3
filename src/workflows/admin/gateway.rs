use async_trait::async_trait;
use serde::Deserialize;

use super::domain::{BusinessDetail, BusinessId, BusinessSummary, LoginRequest};

pub const LIST_BUSINESSES_PATH: &str = "submit_business_info/get_business_info.php";
pub const BUSINESS_DETAIL_PATH: &str = "submit_business_info/get_full_business_info.php";
pub const LOGIN_PATH: &str = "admin_login/login.php";
pub const SESSION_PATH: &str = "admin_login/check_session.php";

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("backend request failed: {0}")]
    Request(String),
    #[error("backend returned a malformed payload: {0}")]
    Malformed(String),
    #[error("{0}")]
    Rejected(String),
}

/// Read-side port to the business directory.
#[async_trait]
pub trait DirectoryGateway: Send + Sync {
    async fn list_businesses(&self) -> Result<Vec<BusinessSummary>, GatewayError>;
    async fn fetch_business(
        &self,
        id: &BusinessId,
    ) -> Result<Option<BusinessDetail>, GatewayError>;
}

/// Port to the backend session gate.
#[async_trait]
pub trait SessionGateway: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<(), GatewayError>;
    async fn check_session(&self) -> Result<bool, GatewayError>;
}

#[derive(Debug, Deserialize)]
struct LoginEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SessionEnvelope {
    #[serde(rename = "loggedIn", default)]
    logged_in: bool,
}

/// Reqwest client over the admin endpoints. The cookie store carries the
/// backend's PHP session between the login call and later reads.
#[derive(Debug, Clone)]
pub struct HttpAdminClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAdminClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|err| GatewayError::Request(err.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl DirectoryGateway for HttpAdminClient {
    async fn list_businesses(&self) -> Result<Vec<BusinessSummary>, GatewayError> {
        self.http
            .get(self.endpoint(LIST_BUSINESSES_PATH))
            .send()
            .await
            .map_err(|err| GatewayError::Request(err.to_string()))?
            .json()
            .await
            .map_err(|err| GatewayError::Malformed(err.to_string()))
    }

    async fn fetch_business(
        &self,
        id: &BusinessId,
    ) -> Result<Option<BusinessDetail>, GatewayError> {
        self.http
            .get(self.endpoint(BUSINESS_DETAIL_PATH))
            .query(&[("id", id.0.as_str())])
            .send()
            .await
            .map_err(|err| GatewayError::Request(err.to_string()))?
            .json()
            .await
            .map_err(|err| GatewayError::Malformed(err.to_string()))
    }
}

#[async_trait]
impl SessionGateway for HttpAdminClient {
    async fn login(&self, request: &LoginRequest) -> Result<(), GatewayError> {
        let envelope: LoginEnvelope = self
            .http
            .post(self.endpoint(LOGIN_PATH))
            .json(request)
            .send()
            .await
            .map_err(|err| GatewayError::Request(err.to_string()))?
            .json()
            .await
            .map_err(|err| GatewayError::Malformed(err.to_string()))?;

        if envelope.success {
            Ok(())
        } else {
            Err(GatewayError::Rejected(
                envelope.error.unwrap_or_else(|| "Invalid login.".to_string()),
            ))
        }
    }

    async fn check_session(&self) -> Result<bool, GatewayError> {
        let envelope: SessionEnvelope = self
            .http
            .get(self.endpoint(SESSION_PATH))
            .send()
            .await
            .map_err(|err| GatewayError::Request(err.to_string()))?
            .json()
            .await
            .map_err(|err| GatewayError::Malformed(err.to_string()))?;
        Ok(envelope.logged_in)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_envelope_defaults_to_logged_out() {
        let envelope: SessionEnvelope = serde_json::from_str("{}").expect("parse");
        assert!(!envelope.logged_in);
        let envelope: SessionEnvelope =
            serde_json::from_str(r#"{"loggedIn": true}"#).expect("parse");
        assert!(envelope.logged_in);
    }

    #[test]
    fn endpoint_joins_base_and_path() {
        let client = HttpAdminClient::new("http://localhost/onboarding").expect("client");
        assert_eq!(
            client.endpoint(SESSION_PATH),
            "http://localhost/onboarding/admin_login/check_session.php"
        );
    }
}
