//! Custom check extension point.
//!
//! Checks that cannot be expressed as a catalog rule (format validators,
//! risk policies) implement [`CustomCheck`] and register with the
//! orchestrator. They report through the same `CheckResult` shape as the
//! generic executor, so the reporting pipeline does not distinguish rule
//! kinds.

use async_trait::async_trait;
use bankdq_core::CheckResult;

use crate::{CheckError, Dataset};

/// A hand-written validation predicate.
#[async_trait]
pub trait CustomCheck: Send + Sync {
    /// Stable check name, unique within one audit run.
    fn name(&self) -> &str;

    /// Executes the check against the dataset.
    ///
    /// Data violations are a successful execution (FAIL or WARNING result);
    /// an `Err` means the check itself could not run and becomes an
    /// ERROR-status result upstream.
    async fn run(&self, dataset: &dyn Dataset) -> Result<CheckResult, CheckError>;
}
