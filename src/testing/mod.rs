//! Testing infrastructure.
//!
//! Provides a controllable [`MockGamingApi`] so task processing and batch
//! orchestration can be exercised deterministically without a network.

pub mod mocks;

pub use mocks::{ApiCall, MockGamingApi};
