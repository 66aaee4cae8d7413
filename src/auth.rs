//! Credential-to-token exchange.

use colored::Colorize;
use tracing::debug;

use crate::api::{AccessToken, GamingApi};
use crate::error::{ClaimbotError, Result};

/// Exchange credentials for a session token.
///
/// Failure is soft: the error is reported here in the console and handed
/// back as a value so the orchestrator can skip the account instead of
/// aborting the batch. A transport-level failure (no response body at all)
/// is reported the same way, using the transport error's message.
pub async fn login(api: &dyn GamingApi, email: &str, password: &str) -> Result<AccessToken> {
    match api.login(email, password).await {
        Ok(token) => {
            debug!("Login succeeded for {email}");
            Ok(token)
        }
        Err(err) => {
            println!("{} {}", "Error in login:".red(), err);
            Err(ClaimbotError::auth(email, err.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Task;
    use crate::testing::MockGamingApi;

    #[tokio::test]
    async fn test_login_returns_token() {
        let api = MockGamingApi::new().with_token("T1");
        let token = login(&api, "a@x.com", "pw1").await.unwrap();
        assert_eq!(token.as_str(), "T1");
    }

    /// Test that a rejected login surfaces as a soft auth failure.
    #[tokio::test]
    async fn test_rejected_login_is_auth_error() {
        let api = MockGamingApi::new().with_login_failure("Invalid credentials");
        let err = login(&api, "a@x.com", "bad").await.unwrap_err();
        assert_eq!(err, ClaimbotError::auth("a@x.com", "Invalid credentials"));
        assert!(err.is_recoverable());
    }

    /// Test that a login failure never reaches the task endpoints.
    #[tokio::test]
    async fn test_failed_login_makes_no_task_calls() {
        let api = MockGamingApi::new()
            .with_login_failure("nope")
            .with_tasks(vec![Task::new(1, false, false)]);
        let _ = login(&api, "a@x.com", "bad").await;
        assert_eq!(api.task_endpoint_calls(), 0);
    }
}
