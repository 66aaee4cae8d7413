//! Mock implementation of the gaming API.
//!
//! A controllable test double for [`GamingApi`], enabling deterministic
//! unit tests. Behavior is configured through a builder, and every endpoint
//! call is recorded in order for assertions.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{AccessToken, ApiError, GamingApi, Task};

/// One recorded endpoint invocation, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    Login { email: String },
    FetchTasks,
    ExecuteTask { task_id: u64 },
    ClaimTaskRewards { task_id: u64 },
}

impl ApiCall {
    /// Check if this call hit one of the three token-authenticated
    /// task endpoints.
    #[must_use]
    pub fn is_task_endpoint(&self) -> bool {
        !matches!(self, Self::Login { .. })
    }
}

/// Mock implementation of [`GamingApi`].
///
/// # Example
///
/// ```rust,ignore
/// let api = MockGamingApi::new()
///     .with_tasks(vec![Task::new(1, false, false)])
///     .failing_clear(1);
///
/// let report = process_tasks(&api, &token).await;
/// assert!(api.calls().contains(&ApiCall::ClaimTaskRewards { task_id: 1 }));
/// ```
#[derive(Debug)]
pub struct MockGamingApi {
    token: String,
    login_error: Option<String>,
    rejected_emails: HashSet<String>,
    tasks: Vec<Task>,
    fetch_error: Option<String>,
    failing_clears: HashSet<u64>,
    failing_claims: HashSet<u64>,
    calls: Mutex<Vec<ApiCall>>,
}

impl Default for MockGamingApi {
    fn default() -> Self {
        Self {
            token: "mock-token".to_string(),
            login_error: None,
            rejected_emails: HashSet::new(),
            tasks: Vec::new(),
            fetch_error: None,
            failing_clears: HashSet::new(),
            failing_claims: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl MockGamingApi {
    /// Create a mock where every call succeeds and the task list is empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the token returned by successful logins.
    #[must_use]
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = token.to_string();
        self
    }

    /// Make every login fail with the given server message.
    #[must_use]
    pub fn with_login_failure(mut self, message: &str) -> Self {
        self.login_error = Some(message.to_string());
        self
    }

    /// Make login fail for one specific email only.
    #[must_use]
    pub fn rejecting_email(mut self, email: &str) -> Self {
        self.rejected_emails.insert(email.to_string());
        self
    }

    /// Set the task list returned by `getUserTasks`.
    #[must_use]
    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }

    /// Make the task-list fetch fail with the given message.
    #[must_use]
    pub fn with_fetch_failure(mut self, message: &str) -> Self {
        self.fetch_error = Some(message.to_string());
        self
    }

    /// Make `executeTask` fail for the given task id.
    #[must_use]
    pub fn failing_clear(mut self, task_id: u64) -> Self {
        self.failing_clears.insert(task_id);
        self
    }

    /// Make `claimTaskRewards` fail for the given task id.
    #[must_use]
    pub fn failing_claim(mut self, task_id: u64) -> Self {
        self.failing_claims.insert(task_id);
        self
    }

    /// Every endpoint call recorded so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    /// Number of calls that hit the task endpoints.
    #[must_use]
    pub fn task_endpoint_calls(&self) -> usize {
        self.calls().iter().filter(|c| c.is_task_endpoint()).count()
    }

    fn record(&self, call: ApiCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn rejection(message: &str) -> ApiError {
        ApiError::Api {
            status: 401,
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl GamingApi for MockGamingApi {
    async fn login(&self, email: &str, _password: &str) -> Result<AccessToken, ApiError> {
        self.record(ApiCall::Login {
            email: email.to_string(),
        });

        if let Some(message) = &self.login_error {
            return Err(Self::rejection(message));
        }
        if self.rejected_emails.contains(email) {
            return Err(Self::rejection("Invalid credentials"));
        }
        Ok(AccessToken::new(self.token.clone()))
    }

    async fn fetch_tasks(&self, _token: &AccessToken) -> Result<Vec<Task>, ApiError> {
        self.record(ApiCall::FetchTasks);

        match &self.fetch_error {
            Some(message) => Err(ApiError::Api {
                status: 500,
                message: message.clone(),
            }),
            None => Ok(self.tasks.clone()),
        }
    }

    async fn execute_task(&self, _token: &AccessToken, task_id: u64) -> Result<(), ApiError> {
        self.record(ApiCall::ExecuteTask { task_id });

        if self.failing_clears.contains(&task_id) {
            return Err(ApiError::Api {
                status: 400,
                message: format!("task {task_id} cannot be executed"),
            });
        }
        Ok(())
    }

    async fn claim_task_rewards(&self, _token: &AccessToken, task_id: u64) -> Result<(), ApiError> {
        self.record(ApiCall::ClaimTaskRewards { task_id });

        if self.failing_claims.contains(&task_id) {
            return Err(ApiError::Api {
                status: 400,
                message: format!("no reward to claim for task {task_id}"),
            });
        }
        Ok(())
    }
}
