//! Per-account task processing.
//!
//! Fetches the authenticated user's task list, filters it down to tasks
//! that are neither completed nor claimed, and drives a clear + claim pair
//! for each one, strictly in order. Clear and claim are independent
//! best-effort steps: a failed clear never blocks the claim attempt, and a
//! failed task never blocks the tasks after it.
//!
//! Nothing here propagates an error to the caller. Every failure is logged
//! where it happens and recorded in the returned [`TaskReport`], which the
//! orchestrator inspects to decide how the run went. Partial completion is
//! the expected steady state, not an error.

use colored::Colorize;
use tracing::debug;

use crate::api::{AccessToken, GamingApi, Task};
use crate::error::ClaimbotError;
use crate::progress::Spinner;

// =============================================================================
// Outcome Types
// =============================================================================

/// Result of one clear or claim step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult {
    /// The endpoint accepted the call.
    Done,
    /// The endpoint rejected the call or the request failed in transit.
    Failed(ClaimbotError),
}

impl StepResult {
    /// Check if the step succeeded.
    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    fn from_api(endpoint: &str, result: Result<(), crate::api::ApiError>) -> Self {
        match result {
            Ok(()) => Self::Done,
            Err(err) => Self::Failed(ClaimbotError::task_api(endpoint, err.to_string())),
        }
    }
}

/// Clear + claim outcome for a single task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutcome {
    pub task_id: u64,
    pub cleared: StepResult,
    pub claimed: StepResult,
}

impl TaskOutcome {
    /// Check if both steps succeeded.
    #[must_use]
    pub fn fully_processed(&self) -> bool {
        self.cleared.is_done() && self.claimed.is_done()
    }
}

/// Everything that happened while processing one account's tasks.
#[derive(Debug, Clone, Default)]
pub struct TaskReport {
    /// Set when the task list could not be fetched; no tasks were
    /// processed in that case.
    pub fetch_error: Option<ClaimbotError>,
    /// Ids targeted for clear + claim, in source order.
    pub pending: Vec<u64>,
    /// One entry per pending id, in the same order.
    pub outcomes: Vec<TaskOutcome>,
}

impl TaskReport {
    /// Number of tasks whose clear step succeeded.
    #[must_use]
    pub fn cleared_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.cleared.is_done()).count()
    }

    /// Number of tasks whose claim step succeeded.
    #[must_use]
    pub fn claimed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.claimed.is_done()).count()
    }

    /// Number of failed steps across the whole report.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        let step_failures = self
            .outcomes
            .iter()
            .map(|o| usize::from(!o.cleared.is_done()) + usize::from(!o.claimed.is_done()))
            .sum::<usize>();
        step_failures + usize::from(self.fetch_error.is_some())
    }
}

// =============================================================================
// Filtering
// =============================================================================

/// Select the ids of tasks that are neither completed nor claimed.
///
/// Order is preserved from the source list. The flags are not re-checked
/// after this point; a task that completes server-side between fetch and
/// clear is still driven through both steps.
#[must_use]
pub fn filter_pending(tasks: &[Task]) -> Vec<u64> {
    tasks
        .iter()
        .filter(|task| !task.task_completed && !task.task_claimed)
        .map(|task| task.task_id)
        .collect()
}

// =============================================================================
// Processing
// =============================================================================

/// Fetch, filter, and clear + claim one account's tasks.
pub async fn process_tasks(api: &dyn GamingApi, token: &AccessToken) -> TaskReport {
    let fetched = {
        let _spinner = Spinner::start("Fetching tasks...");
        api.fetch_tasks(token).await
    };

    let tasks = match fetched {
        Ok(tasks) => tasks,
        Err(err) => {
            let err = ClaimbotError::task_api("getUserTasks", err.to_string());
            println!("{} {}", "Error fetching tasks:".red(), err.message());
            return TaskReport {
                fetch_error: Some(err),
                ..TaskReport::default()
            };
        }
    };
    println!("{}", "Tasks fetched successfully.".green());

    let pending = filter_pending(&tasks);
    debug!("{} of {} task(s) pending", pending.len(), tasks.len());

    let rendered = if pending.is_empty() {
        "0".to_string()
    } else {
        pending
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    println!("{} {}", "Incomplete task IDs:".cyan(), rendered);

    let mut outcomes = Vec::with_capacity(pending.len());
    for &task_id in &pending {
        outcomes.push(clear_and_claim(api, token, task_id).await);
    }

    println!("{}", "All tasks processed successfully.".green());

    TaskReport {
        fetch_error: None,
        pending,
        outcomes,
    }
}

/// Drive the clear + claim pair for one task.
///
/// The steps are independent: the claim is attempted whatever the clear
/// returned, since the task was selected once at fetch time.
async fn clear_and_claim(api: &dyn GamingApi, token: &AccessToken, task_id: u64) -> TaskOutcome {
    let cleared = StepResult::from_api("executeTask", api.execute_task(token, task_id).await);
    match &cleared {
        StepResult::Done => {
            println!("{} {task_id}", "Clear task success for task ID:".green());
        }
        StepResult::Failed(err) => {
            println!(
                "{} {}",
                format!("Error clearing task {task_id}:").red(),
                err.message()
            );
        }
    }

    let claimed = StepResult::from_api(
        "claimTaskRewards",
        api.claim_task_rewards(token, task_id).await,
    );
    match &claimed {
        StepResult::Done => {
            println!("{} {task_id}", "Claim task success for task ID:".green());
        }
        StepResult::Failed(err) => {
            println!(
                "{} {}",
                format!("Error claiming task rewards for task ID {task_id}:").red(),
                err.message()
            );
        }
    }

    TaskOutcome {
        task_id,
        cleared,
        claimed,
    }
}
