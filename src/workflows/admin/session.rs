use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use super::domain::LoginRequest;
use super::gateway::{GatewayError, SessionGateway};

static LOGIN_EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles"));

const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Enter a valid email.")]
    InvalidEmail,
    #[error("Password must be at least 6 characters.")]
    PasswordTooShort,
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Boundary guard in front of the admin panel: credentials are checked
/// locally before any backend call, and data routes consult the backend
/// session probe.
pub struct SessionGate<S> {
    gateway: Arc<S>,
}

impl<S: SessionGateway> SessionGate<S> {
    pub fn new(gateway: Arc<S>) -> Self {
        Self { gateway }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<(), LoginError> {
        if !LOGIN_EMAIL_PATTERN.is_match(&request.email) {
            return Err(LoginError::InvalidEmail);
        }
        if request.password.len() < MIN_PASSWORD_LENGTH {
            return Err(LoginError::PasswordTooShort);
        }
        self.gateway.login(request).await?;
        Ok(())
    }

    /// A failed probe counts as logged out, never as an error.
    pub async fn is_authenticated(&self) -> bool {
        match self.gateway.check_session().await {
            Ok(logged_in) => logged_in,
            Err(err) => {
                warn!(%err, "session probe failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingGateway {
        login_calls: AtomicUsize,
    }

    #[async_trait]
    impl SessionGateway for CountingGateway {
        async fn login(&self, _request: &LoginRequest) -> Result<(), GatewayError> {
            self.login_calls.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }

        async fn check_session(&self) -> Result<bool, GatewayError> {
            Ok(true)
        }
    }

    fn request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn malformed_credentials_never_reach_the_backend() {
        let gateway = Arc::new(CountingGateway::default());
        let gate = SessionGate::new(gateway.clone());

        let err = gate
            .login(&request("not-an-email", "secret1"))
            .await
            .expect_err("rejected");
        assert!(matches!(err, LoginError::InvalidEmail));

        let err = gate
            .login(&request("staff@agency.test", "short"))
            .await
            .expect_err("rejected");
        assert!(matches!(err, LoginError::PasswordTooShort));

        assert_eq!(gateway.login_calls.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn valid_credentials_are_forwarded() {
        let gateway = Arc::new(CountingGateway::default());
        let gate = SessionGate::new(gateway.clone());
        gate.login(&request("staff@agency.test", "secret1"))
            .await
            .expect("accepted");
        assert_eq!(gateway.login_calls.load(Ordering::Relaxed), 1);
    }
}
