//! HTTP client for the Param Gaming task endpoints.
//!
//! This module provides the [`ApiClient`], a thin reqwest-based adapter
//! around the platform's `/api/v1/user/` endpoints, together with the wire
//! types and the [`GamingApi`] trait the rest of the crate is written
//! against.
//!
//! # Architecture
//!
//! Every endpoint is a single POST round trip. A 2xx response yields the
//! parsed JSON body; anything else becomes an [`ApiError`] carrying the
//! server-supplied `message` field when one is present. There are no
//! retries and no timeout beyond the underlying client default.
//!
//! The [`GamingApi`] trait exists so the task processor and orchestrator
//! can be exercised against [`crate::testing::MockGamingApi`] without a
//! network.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

// =============================================================================
// Access Token
// =============================================================================

/// Opaque session token returned by the login endpoint.
///
/// Presented verbatim in the `Authorization` header on subsequent calls.
/// The token is bound to one account's processing pass and is never
/// persisted or refreshed. `Debug` output redacts the value.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a raw token string.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw token value, for use as an `Authorization` header.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

// =============================================================================
// Wire Types
// =============================================================================

/// A task as reported by the `getUserTasks` endpoint.
///
/// The server owns all task state; this is a transient read-only snapshot.
/// Unknown fields in the payload are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Server-assigned task identifier.
    pub task_id: u64,
    /// Whether the task has been executed.
    #[serde(default)]
    pub task_completed: bool,
    /// Whether the reward has been collected.
    #[serde(default)]
    pub task_claimed: bool,
}

impl Task {
    /// Construct a task snapshot, mainly useful in tests.
    #[must_use]
    pub fn new(task_id: u64, task_completed: bool, task_claimed: bool) -> Self {
        Self {
            task_id,
            task_completed,
            task_claimed,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LoginUser {
    token: String,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    user: LoginUser,
}

#[derive(Debug, Deserialize)]
struct TaskListResponse {
    #[serde(default)]
    data: Vec<Task>,
}

// =============================================================================
// API Errors
// =============================================================================

/// Errors surfaced by the gaming platform API.
///
/// [`ApiError::Api`] carries the server-supplied message when the response
/// body contained one; transport-level failures (refused connections,
/// timeouts, aborted reads) become [`ApiError::Transport`] so callers
/// always have a printable message even when no response body exists.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Non-2xx response from the server.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request never produced a response.
    #[error("{message}")]
    Transport { message: String },

    /// A 2xx response whose body did not match the expected shape.
    #[error("Invalid API response: {message}")]
    InvalidResponse { message: String },
}

impl ApiError {
    /// Build an error from a non-2xx status and response body.
    ///
    /// The server reports failures as `{"message": "..."}`; that message is
    /// extracted when present, otherwise the raw body (or the bare status)
    /// is used.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    format!("HTTP {status}")
                } else {
                    trimmed.to_string()
                }
            });

        Self::Api { status, message }
    }

    /// Check whether this failure happened before any response arrived.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::InvalidResponse {
                message: err.to_string(),
            }
        } else {
            Self::Transport {
                message: err.to_string(),
            }
        }
    }
}

// =============================================================================
// GamingApi Trait
// =============================================================================

/// The four platform endpoints, abstracted for testability.
///
/// # Example
///
/// ```rust,ignore
/// use claimbot::api::GamingApi;
///
/// async fn pending_count(api: &dyn GamingApi, token: &AccessToken) -> usize {
///     api.fetch_tasks(token).await.map(|t| t.len()).unwrap_or(0)
/// }
/// ```
#[async_trait]
pub trait GamingApi: Send + Sync {
    /// Exchange credentials for a session token.
    async fn login(&self, email: &str, password: &str) -> Result<AccessToken, ApiError>;

    /// Fetch the authenticated user's task list.
    async fn fetch_tasks(&self, token: &AccessToken) -> Result<Vec<Task>, ApiError>;

    /// Mark a task as executed on the server.
    async fn execute_task(&self, token: &AccessToken, task_id: u64) -> Result<(), ApiError>;

    /// Collect the reward for a task.
    async fn claim_task_rewards(&self, token: &AccessToken, task_id: u64) -> Result<(), ApiError>;
}

// =============================================================================
// ApiClient
// =============================================================================

/// Reqwest-backed [`GamingApi`] implementation.
///
/// # Example
///
/// ```rust,ignore
/// use claimbot::api::ApiClient;
///
/// let client = ApiClient::new().with_base_url("https://staging.example.com/api/v1/user");
/// let token = client.login("a@x.com", "pw").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Default API base URL.
    pub const DEFAULT_BASE_URL: &'static str = "https://paramgaming.com/api/v1/user";

    /// Create a client against the production base URL.
    #[must_use]
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set a custom API base URL (staging environments, local stubs).
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// The base URL requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue one POST round trip and surface the response on 2xx.
    async fn post(
        &self,
        endpoint: &str,
        token: Option<&AccessToken>,
        body: Option<serde_json::Value>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("POST {url}");

        let mut request = self.http.post(&url);
        if let Some(token) = token {
            // The platform expects the raw token, not a Bearer scheme.
            request = request.header(reqwest::header::AUTHORIZATION, token.as_str());
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_response(status.as_u16(), &body))
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GamingApi for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<AccessToken, ApiError> {
        let body = serde_json::json!({
            "email": email,
            "password": password,
        });
        let response = self.post("login", None, Some(body)).await?;
        let parsed: LoginResponse = response.json().await?;
        Ok(AccessToken::new(parsed.user.token))
    }

    async fn fetch_tasks(&self, token: &AccessToken) -> Result<Vec<Task>, ApiError> {
        let response = self.post("getUserTasks", Some(token), None).await?;
        let parsed: TaskListResponse = response.json().await?;
        Ok(parsed.data)
    }

    async fn execute_task(&self, token: &AccessToken, task_id: u64) -> Result<(), ApiError> {
        let body = serde_json::json!({ "taskId": task_id });
        self.post("executeTask", Some(token), Some(body)).await?;
        Ok(())
    }

    async fn claim_task_rewards(&self, token: &AccessToken, task_id: u64) -> Result<(), ApiError> {
        let body = serde_json::json!({ "taskId": task_id });
        self.post("claimTaskRewards", Some(token), Some(body)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test server message extraction from an error body.
    #[test]
    fn test_from_response_extracts_message() {
        let error = ApiError::from_response(401, r#"{"message": "Invalid credentials"}"#);
        assert_eq!(
            error,
            ApiError::Api {
                status: 401,
                message: "Invalid credentials".to_string(),
            }
        );
        assert_eq!(error.to_string(), "Invalid credentials");
    }

    /// Test fallback to the raw body when there is no message field.
    #[test]
    fn test_from_response_non_json_body() {
        let error = ApiError::from_response(502, "Bad Gateway");
        assert_eq!(
            error,
            ApiError::Api {
                status: 502,
                message: "Bad Gateway".to_string(),
            }
        );
    }

    /// Test fallback to the bare status for an empty body.
    #[test]
    fn test_from_response_empty_body() {
        let error = ApiError::from_response(500, "   ");
        assert_eq!(error.to_string(), "HTTP 500");
    }

    #[test]
    fn test_from_response_json_without_message_field() {
        let error = ApiError::from_response(400, r#"{"error": "nope"}"#);
        assert_eq!(error.to_string(), r#"{"error": "nope"}"#);
    }

    #[test]
    fn test_transport_classification() {
        let transport = ApiError::Transport {
            message: "connection refused".to_string(),
        };
        assert!(transport.is_transport());
        assert!(!ApiError::from_response(500, "").is_transport());
    }

    /// Test camelCase deserialization of the task wire shape.
    #[test]
    fn test_task_deserialization() {
        let task: Task = serde_json::from_str(
            r#"{"taskId": 7, "taskCompleted": false, "taskClaimed": true, "taskName": "daily"}"#,
        )
        .unwrap();
        assert_eq!(task, Task::new(7, false, true));
    }

    /// Test that missing flags default to false.
    #[test]
    fn test_task_deserialization_missing_flags() {
        let task: Task = serde_json::from_str(r#"{"taskId": 3}"#).unwrap();
        assert_eq!(task, Task::new(3, false, false));
    }

    #[test]
    fn test_task_list_response_missing_data() {
        let parsed: TaskListResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.data.is_empty());
    }

    #[test]
    fn test_login_response_shape() {
        let parsed: LoginResponse =
            serde_json::from_str(r#"{"user": {"token": "T1", "email": "a@x.com"}}"#).unwrap();
        assert_eq!(parsed.user.token, "T1");
    }

    /// Test that tokens never leak through Debug output.
    #[test]
    fn test_access_token_debug_redaction() {
        let token = AccessToken::new("very-secret");
        let rendered = format!("{token:?}");
        assert!(!rendered.contains("very-secret"));
        assert_eq!(token.as_str(), "very-secret");
    }

    #[test]
    fn test_client_base_url_override() {
        let client = ApiClient::new().with_base_url("http://localhost:8080/api/");
        assert_eq!(client.base_url(), "http://localhost:8080/api");

        let default_client = ApiClient::default();
        assert_eq!(default_client.base_url(), ApiClient::DEFAULT_BASE_URL);
    }

    /// Test that ApiClient can be used as a trait object.
    #[test]
    fn test_client_as_trait_object() {
        let client: Box<dyn GamingApi> = Box::new(ApiClient::new());
        let _ = client;
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ApiClient>();
    }
}
