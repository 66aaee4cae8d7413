//! Sequential per-account orchestration.
//!
//! Each discovered account is authenticated and processed in order. Every
//! failure below this layer arrives as a value, and the loop continues
//! regardless of outcome, so one account can never prevent the accounts
//! after it from being attempted.

use colored::Colorize;
use tracing::debug;

use crate::accounts::Credential;
use crate::api::GamingApi;
use crate::auth;
use crate::tasks::{self, TaskReport};

/// What happened to one account.
#[derive(Debug, Clone)]
pub enum AccountOutcome {
    /// Login succeeded and the account's tasks were driven to a report.
    Processed { email: String, report: TaskReport },
    /// No token was obtained; the task endpoints were never called.
    LoginFailed { email: String },
}

impl AccountOutcome {
    /// The account this outcome belongs to.
    #[must_use]
    pub fn email(&self) -> &str {
        match self {
            Self::Processed { email, .. } | Self::LoginFailed { email } => email,
        }
    }

    /// Check if the account got as far as task processing.
    #[must_use]
    pub fn logged_in(&self) -> bool {
        matches!(self, Self::Processed { .. })
    }
}

/// Authenticate and process every account, strictly in order.
pub async fn process_accounts(
    api: &dyn GamingApi,
    accounts: &[Credential],
) -> Vec<AccountOutcome> {
    let mut outcomes = Vec::with_capacity(accounts.len());

    for credential in accounts {
        println!("Processing tasks for account: {}", credential.email);

        let outcome = match auth::login(api, &credential.email, credential.password()).await {
            Ok(token) => {
                let report = tasks::process_tasks(api, &token).await;
                debug!(
                    "Account {} done: {} cleared, {} claimed, {} failure(s)",
                    credential.email,
                    report.cleared_count(),
                    report.claimed_count(),
                    report.failure_count()
                );
                AccountOutcome::Processed {
                    email: credential.email.clone(),
                    report,
                }
            }
            Err(_) => {
                println!(
                    "{}",
                    format!(
                        "Login failed for account {}. Unable to retrieve access token.",
                        credential.email
                    )
                    .red()
                );
                AccountOutcome::LoginFailed {
                    email: credential.email.clone(),
                }
            }
        };

        outcomes.push(outcome);
    }

    outcomes
}

/// Print the end-of-run summary block.
pub fn print_summary(outcomes: &[AccountOutcome]) {
    let logged_in = outcomes.iter().filter(|o| o.logged_in()).count();
    let login_failures = outcomes.len() - logged_in;

    let mut cleared = 0;
    let mut claimed = 0;
    let mut failures = 0;
    for outcome in outcomes {
        if let AccountOutcome::Processed { report, .. } = outcome {
            cleared += report.cleared_count();
            claimed += report.claimed_count();
            failures += report.failure_count();
        }
    }

    println!();
    println!("{}", "Run summary".bold());
    println!(
        "  Accounts: {} processed, {} login failure(s)",
        logged_in, login_failures
    );
    println!("  Tasks:    {} cleared, {} claimed", cleared, claimed);
    if failures > 0 || login_failures > 0 {
        println!(
            "  {}",
            format!("{} call(s) failed; see log above", failures + login_failures).yellow()
        );
    } else {
        println!("  {}", "All calls succeeded".green());
    }
}
