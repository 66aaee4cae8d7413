//! Claimbot - multi-account task automation for the Param Gaming platform.
//!
//! Logs into each configured account, fetches its task list, and clears and
//! claims rewards for every task that is neither completed nor claimed.
//! Accounts are processed strictly sequentially, and every failure is
//! recovered at the point of occurrence so one bad account or task never
//! aborts the rest of the batch.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`accounts`] - Credential discovery from environment slots
//! - [`api`] - HTTP client for the gaming platform endpoints
//! - [`auth`] - Credential-to-token exchange
//! - [`batch`] - Sequential per-account orchestration
//! - [`error`] - Custom error types and handling
//! - [`progress`] - Terminal spinner shown during the task fetch
//! - [`tasks`] - Per-account task filtering and clear/claim driving
//! - [`testing`] - Testing infrastructure (mock API)
//!
//! # Example
//!
//! ```rust,ignore
//! use claimbot::accounts;
//! use claimbot::api::ApiClient;
//! use claimbot::batch;
//!
//! let credentials = accounts::discover();
//! let client = ApiClient::new();
//! let outcomes = batch::process_accounts(&client, &credentials).await;
//! batch::print_summary(&outcomes);
//! ```

pub mod accounts;
pub mod api;
pub mod auth;
pub mod batch;
pub mod error;
pub mod progress;
pub mod tasks;
pub mod testing;

// Re-export commonly used types
pub use error::{ClaimbotError, Result};

pub use accounts::{Credential, MAX_ACCOUNT_SLOTS};
pub use api::{AccessToken, ApiClient, ApiError, GamingApi, Task};
pub use batch::AccountOutcome;
pub use tasks::{filter_pending, StepResult, TaskOutcome, TaskReport};

// Re-export testing types for convenience
pub use testing::{ApiCall, MockGamingApi};
