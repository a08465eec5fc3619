//! Assertion probe
//!
//! Two check modes. Soft checks record and log a failure, then let the
//! scenario continue; they suit advisory probes such as exact font-family
//! strings, which can legitimately vary with font-loading timing. Strict
//! checks abort the scenario with [`HarnessError::AssertionFailed`], which
//! makes the runner capture failure evidence before teardown.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use crate::error::{HarnessError, HarnessResult};

/// Outcome of a single check, recorded in scenario order.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub description: String,
    pub pass: bool,
    pub actual: String,
}

/// Counts over all recorded checks.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProbeSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

/// Records check outcomes for one scenario.
#[derive(Clone, Default)]
pub struct Probe {
    checks: Arc<Mutex<Vec<CheckResult>>>,
}

impl Probe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Soft check: log and record, never abort. Returns whether it passed.
    pub fn check<T: fmt::Debug>(
        &self,
        description: &str,
        actual: T,
        predicate: impl FnOnce(&T) -> bool,
    ) -> bool {
        let pass = predicate(&actual);
        let actual = format!("{actual:?}");
        if pass {
            tracing::info!(check = description, %actual, "check passed");
        } else {
            tracing::warn!(check = description, %actual, "check FAILED (soft)");
        }
        self.checks.lock().push(CheckResult {
            description: description.to_string(),
            pass,
            actual,
        });
        pass
    }

    /// Strict check: a failure aborts the scenario.
    pub fn require<T: fmt::Debug>(
        &self,
        description: &str,
        actual: T,
        predicate: impl FnOnce(&T) -> bool,
    ) -> HarnessResult<()> {
        if self.check(description, &actual, |v| predicate(*v)) {
            Ok(())
        } else {
            Err(HarnessError::AssertionFailed {
                description: description.to_string(),
                actual: format!("{actual:?}"),
            })
        }
    }

    /// All results recorded so far, in order.
    pub fn results(&self) -> Vec<CheckResult> {
        self.checks.lock().clone()
    }

    pub fn summary(&self) -> ProbeSummary {
        let checks = self.checks.lock();
        let passed = checks.iter().filter(|c| c.pass).count();
        ProbeSummary {
            total: checks.len(),
            passed,
            failed: checks.len() - passed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soft_check_records_and_continues() {
        let probe = Probe::new();
        assert!(probe.check("passes", 3usize, |n| *n == 3));
        assert!(!probe.check("fails", 3usize, |n| *n == 4));

        let results = probe.results();
        assert_eq!(results.len(), 2);
        assert!(results[0].pass);
        assert!(!results[1].pass);
        assert_eq!(results[1].actual, "3");
    }

    #[test]
    fn test_strict_check_errors_on_failure() {
        let probe = Probe::new();
        assert!(probe.require("ok", "abc", |s| s.contains('b')).is_ok());

        let err = probe.require("bad", "abc", |s| s.contains('z')).unwrap_err();
        match err {
            HarnessError::AssertionFailed {
                description,
                actual,
            } => {
                assert_eq!(description, "bad");
                assert_eq!(actual, "\"abc\"");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_summary_counts() {
        let probe = Probe::new();
        probe.check("a", 1, |_| true);
        probe.check("b", 1, |_| false);
        let _ = probe.require("c", 1, |_| false);

        let summary = probe.summary();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 2);
    }
}
