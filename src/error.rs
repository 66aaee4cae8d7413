//! Custom error types for claimbot.
//!
//! Both error kinds here are recovered where they occur: the batch logs
//! them and moves on to the next task or account. They exist as values so
//! the orchestrator inspects outcomes explicitly instead of relying on
//! caught-and-swallowed exceptions.

use thiserror::Error;

/// Main error type for claimbot operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClaimbotError {
    /// Login was rejected, or the login request failed in transit.
    #[error("Login failed for {email}: {message}")]
    Auth { email: String, message: String },

    /// One of the task endpoints failed.
    #[error("Task API call '{endpoint}' failed: {message}")]
    TaskApi { endpoint: String, message: String },
}

impl ClaimbotError {
    // =========================================================================
    // Constructor helpers
    // =========================================================================

    /// Create an auth error.
    pub fn auth(email: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Auth {
            email: email.into(),
            message: message.into(),
        }
    }

    /// Create a task API error.
    pub fn task_api(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TaskApi {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    // =========================================================================
    // Classification helpers
    // =========================================================================

    /// The underlying failure message, without the variant framing.
    ///
    /// User-facing log lines add their own prefix, so they print this
    /// rather than the full `Display` form.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Auth { message, .. } | Self::TaskApi { message, .. } => message,
        }
    }

    /// Check if the batch should continue past this error.
    ///
    /// Every failure of these kinds is recoverable: the next task or
    /// account is always attempted.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Auth { .. } | Self::TaskApi { .. })
    }
}

/// Type alias for claimbot results.
pub type Result<T> = std::result::Result<T, ClaimbotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClaimbotError::auth("a@x.com", "Invalid credentials");
        assert_eq!(
            err.to_string(),
            "Login failed for a@x.com: Invalid credentials"
        );

        let err = ClaimbotError::task_api("executeTask", "task already cleared");
        assert_eq!(
            err.to_string(),
            "Task API call 'executeTask' failed: task already cleared"
        );
    }

    #[test]
    fn test_message_strips_framing() {
        let err = ClaimbotError::auth("a@x.com", "Invalid credentials");
        assert_eq!(err.message(), "Invalid credentials");

        let err = ClaimbotError::task_api("claimTaskRewards", "nothing to claim");
        assert_eq!(err.message(), "nothing to claim");
    }

    #[test]
    fn test_is_recoverable() {
        assert!(ClaimbotError::auth("a@x.com", "rejected").is_recoverable());
        assert!(ClaimbotError::task_api("getUserTasks", "boom").is_recoverable());
    }

    #[test]
    fn test_constructor_helpers() {
        let err = ClaimbotError::task_api("executeTask", "denied");
        if let ClaimbotError::TaskApi { endpoint, message } = err {
            assert_eq!(endpoint, "executeTask");
            assert_eq!(message, "denied");
        } else {
            panic!("Wrong error variant");
        }
    }
}
