//! Check results and audit runs.
//!
//! Every check, generic or custom, reports through the same [`CheckResult`]
//! shape so the reporting pipeline is uniform regardless of rule kind. A run
//! is write-once: results are appended in execution order and never mutated
//! afterwards.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome classification for a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    /// The check ran and found no violations
    Pass,
    /// The check ran and found violating data
    Fail,
    /// The check ran and found risk signals that are not policy violations
    Warning,
    /// The check itself could not be executed
    Error,
}

impl CheckStatus {
    /// Returns true for PASS.
    pub fn is_pass(&self) -> bool {
        matches!(self, CheckStatus::Pass)
    }

    /// Returns true for the statuses that should fail a batch run (FAIL and
    /// ERROR; warnings are surfaced but do not gate).
    pub fn is_blocking(&self) -> bool {
        matches!(self, CheckStatus::Fail | CheckStatus::Error)
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CheckStatus::Pass => "PASS",
            CheckStatus::Fail => "FAIL",
            CheckStatus::Warning => "WARNING",
            CheckStatus::Error => "ERROR",
        };
        f.write_str(s)
    }
}

/// The write-once record of one executed check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Outcome classification
    pub status: CheckStatus,

    /// Stable identity of the check, unique within one audit run
    pub check_name: String,

    /// Human-readable summary of the outcome
    pub message: String,

    /// Cardinality of the violating set; absent on PASS
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_count: Option<u64>,

    /// Auxiliary metrics (e.g. how many risky transactions still completed)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, i64>,
}

impl CheckResult {
    /// Creates a PASS result.
    pub fn pass(check_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Pass,
            check_name: check_name.into(),
            message: message.into(),
            failed_count: None,
            details: BTreeMap::new(),
        }
    }

    /// Creates a FAIL result with the violation count.
    pub fn fail(
        check_name: impl Into<String>,
        message: impl Into<String>,
        failed_count: u64,
    ) -> Self {
        Self {
            status: CheckStatus::Fail,
            check_name: check_name.into(),
            message: message.into(),
            failed_count: Some(failed_count),
            details: BTreeMap::new(),
        }
    }

    /// Creates a WARNING result with the match count.
    pub fn warning(
        check_name: impl Into<String>,
        message: impl Into<String>,
        failed_count: u64,
    ) -> Self {
        Self {
            status: CheckStatus::Warning,
            check_name: check_name.into(),
            message: message.into(),
            failed_count: Some(failed_count),
            details: BTreeMap::new(),
        }
    }

    /// Creates an ERROR result for a check that could not be executed.
    pub fn error(check_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Error,
            check_name: check_name.into(),
            message: message.into(),
            failed_count: None,
            details: BTreeMap::new(),
        }
    }

    /// Attaches an auxiliary metric.
    pub fn with_detail(mut self, key: impl Into<String>, value: i64) -> Self {
        self.details.insert(key.into(), value);
        self
    }
}

/// Aggregate counts derived from an audit run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSummary {
    /// Total checks executed
    pub total: usize,
    /// Checks with PASS status
    pub passed: usize,
    /// Checks with FAIL status
    pub failed: usize,
    /// Checks with WARNING status
    pub warnings: usize,
    /// Checks with ERROR status
    pub errors: usize,
}

/// An ordered sequence of check results from one audit invocation.
///
/// Created fresh per run and handed to the reporting collaborator once the
/// run completes; never persisted back into the audited dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRun {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Results in execution order (the catalog's declared order)
    pub results: Vec<CheckResult>,
}

impl AuditRun {
    /// Creates an empty run stamped with the given start time.
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            results: Vec::new(),
        }
    }

    /// Appends a result, preserving execution order.
    pub fn push(&mut self, result: CheckResult) {
        self.results.push(result);
    }

    /// Derives the aggregate counts.
    pub fn summary(&self) -> AuditSummary {
        let mut summary = AuditSummary {
            total: self.results.len(),
            ..AuditSummary::default()
        };
        for result in &self.results {
            match result.status {
                CheckStatus::Pass => summary.passed += 1,
                CheckStatus::Fail => summary.failed += 1,
                CheckStatus::Warning => summary.warnings += 1,
                CheckStatus::Error => summary.errors += 1,
            }
        }
        summary
    }

    /// Returns true if any check FAILed or ERRORed.
    pub fn has_blocking_failures(&self) -> bool {
        self.results.iter().any(|r| r.status.is_blocking())
    }
}
