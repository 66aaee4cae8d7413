//! Credential discovery from environment slots.
//!
//! Accounts are configured as dense, 1-indexed pairs of
//! `ACCOUNT_<n>_EMAIL` / `ACCOUNT_<n>_PASSWORD` variables. Discovery scans
//! the slots in order and stops at the first slot missing either value, so
//! a gap terminates the list even if later slots are set. The scan is
//! bounded at [`MAX_ACCOUNT_SLOTS`] and runs once at startup; the resulting
//! list is read-only for the rest of the run.

use tracing::debug;

/// Upper bound on the slot scan.
pub const MAX_ACCOUNT_SLOTS: usize = 64;

/// One email/password pair for a single account.
///
/// `Debug` output redacts the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    /// Login email, also used as the account's display name in output.
    pub email: String,
    password: String,
}

impl Credential {
    /// Create a credential pair.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// The account password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// The email with the local part masked, for display in listings.
    #[must_use]
    pub fn masked_email(&self) -> String {
        match self.email.split_once('@') {
            Some((local, domain)) => {
                if let Some(first) = local.chars().next() {
                    format!("{first}***@{domain}")
                } else {
                    format!("***@{domain}")
                }
            }
            None => "***".to_string(),
        }
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Discover configured accounts from the process environment.
#[must_use]
pub fn discover() -> Vec<Credential> {
    discover_with(|key| std::env::var(key).ok())
}

/// Discover accounts through an injected variable lookup.
///
/// Tests use this to exercise discovery without touching process-global
/// environment state.
pub fn discover_with(lookup: impl Fn(&str) -> Option<String>) -> Vec<Credential> {
    let mut accounts = Vec::new();

    for slot in 1..=MAX_ACCOUNT_SLOTS {
        let email = non_blank(lookup(&format!("ACCOUNT_{slot}_EMAIL")));
        let password = non_blank(lookup(&format!("ACCOUNT_{slot}_PASSWORD")));

        match (email, password) {
            (Some(email), Some(password)) => accounts.push(Credential::new(email, password)),
            _ => break,
        }
    }

    debug!("Discovered {} account(s)", accounts.len());
    accounts
}

/// A blank value counts as missing and terminates discovery.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn discover_in(pairs: &[(&str, &str)]) -> Vec<Credential> {
        let env = env_from(pairs);
        discover_with(|key| env.get(key).cloned())
    }

    #[test]
    fn test_discovers_contiguous_slots_in_order() {
        let accounts = discover_in(&[
            ("ACCOUNT_1_EMAIL", "a@x.com"),
            ("ACCOUNT_1_PASSWORD", "pw1"),
            ("ACCOUNT_2_EMAIL", "b@x.com"),
            ("ACCOUNT_2_PASSWORD", "pw2"),
        ]);
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].email, "a@x.com");
        assert_eq!(accounts[0].password(), "pw1");
        assert_eq!(accounts[1].email, "b@x.com");
    }

    /// Test that a gap terminates discovery even when later slots exist.
    #[test]
    fn test_gap_terminates_discovery() {
        let accounts = discover_in(&[
            ("ACCOUNT_1_EMAIL", "a@x.com"),
            ("ACCOUNT_1_PASSWORD", "pw1"),
            ("ACCOUNT_3_EMAIL", "c@x.com"),
            ("ACCOUNT_3_PASSWORD", "pw3"),
        ]);
        assert_eq!(accounts.len(), 1);
    }

    /// Test that a slot missing only its password is a gap.
    #[test]
    fn test_missing_password_is_a_gap() {
        let accounts = discover_in(&[
            ("ACCOUNT_1_EMAIL", "a@x.com"),
            ("ACCOUNT_1_PASSWORD", "pw1"),
            ("ACCOUNT_2_EMAIL", "b@x.com"),
        ]);
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].email, "a@x.com");
    }

    #[test]
    fn test_blank_value_is_a_gap() {
        let accounts = discover_in(&[
            ("ACCOUNT_1_EMAIL", "a@x.com"),
            ("ACCOUNT_1_PASSWORD", "  "),
        ]);
        assert!(accounts.is_empty());
    }

    #[test]
    fn test_empty_environment() {
        let accounts = discover_in(&[]);
        assert!(accounts.is_empty());
    }

    /// Test that the scan is bounded at MAX_ACCOUNT_SLOTS.
    #[test]
    fn test_scan_is_bounded() {
        let mut pairs = Vec::new();
        for slot in 1..=MAX_ACCOUNT_SLOTS + 8 {
            pairs.push((format!("ACCOUNT_{slot}_EMAIL"), format!("u{slot}@x.com")));
            pairs.push((format!("ACCOUNT_{slot}_PASSWORD"), format!("pw{slot}")));
        }
        let env: HashMap<String, String> = pairs.into_iter().collect();
        let accounts = discover_with(|key| env.get(key).cloned());
        assert_eq!(accounts.len(), MAX_ACCOUNT_SLOTS);
    }

    #[test]
    fn test_debug_redacts_password() {
        let credential = Credential::new("a@x.com", "hunter2");
        let rendered = format!("{credential:?}");
        assert!(rendered.contains("a@x.com"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_masked_email() {
        assert_eq!(
            Credential::new("alice@x.com", "pw").masked_email(),
            "a***@x.com"
        );
        assert_eq!(Credential::new("@x.com", "pw").masked_email(), "***@x.com");
        assert_eq!(Credential::new("not-an-email", "pw").masked_email(), "***");
    }
}
