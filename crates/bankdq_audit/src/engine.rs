//! Audit orchestrator.
//!
//! Drives the rule catalog and the registered custom checks over one dataset
//! handle, collecting an ordered `AuditRun`. The contract is strict
//! isolation: once the run is underway, no single check's failure can abort
//! it — execution errors and timeouts become ERROR-status results and the
//! remaining checks still run. Only the initial connectivity probe can fail
//! the run as a whole.

use std::time::Duration;

use chrono::Utc;
use tokio::time::timeout;
use tracing::{info, warn};

use bankdq_core::{AuditRun, CheckResult, RuleCatalog, TableRegistry};

use crate::{
    AuditError, CheckError, CustomCheck, DailyTotalStrongAuthCheck, Dataset, DocumentFormatCheck,
    HighValueStrongAuthCheck, UntrustedDeviceCheck, executor,
};

/// Tunable execution options for an audit.
#[derive(Debug, Clone)]
pub struct AuditOptions {
    /// Maximum wall-clock time for a single check; an expired check reports
    /// ERROR, not FAIL.
    pub check_timeout: Duration,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            check_timeout: Duration::from_secs(30),
        }
    }
}

/// The audit orchestrator.
///
/// # Example
///
/// ```rust
/// use bankdq_audit::Auditor;
///
/// let auditor = Auditor::new();
/// // auditor.run(&dataset).await? yields an ordered AuditRun
/// ```
pub struct Auditor {
    catalog: RuleCatalog,
    registry: TableRegistry,
    custom_checks: Vec<Box<dyn CustomCheck>>,
    options: AuditOptions,
}

impl Auditor {
    /// Creates an auditor with the banking catalog, the banking schema
    /// registry, and the standard custom checks (document format plus the
    /// three risk checks).
    pub fn new() -> Self {
        Self {
            catalog: RuleCatalog::banking(),
            registry: TableRegistry::banking(),
            custom_checks: vec![
                Box::new(DocumentFormatCheck::new()),
                Box::new(HighValueStrongAuthCheck::new()),
                Box::new(UntrustedDeviceCheck::new()),
                Box::new(DailyTotalStrongAuthCheck::new()),
            ],
            options: AuditOptions::default(),
        }
    }

    /// Creates an auditor with no rules and no custom checks.
    pub fn empty() -> Self {
        Self {
            catalog: RuleCatalog::new(),
            registry: TableRegistry::banking(),
            custom_checks: Vec::new(),
            options: AuditOptions::default(),
        }
    }

    /// Replaces the rule catalog.
    pub fn with_catalog(mut self, catalog: RuleCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Replaces the table registry rules are validated against.
    pub fn with_registry(mut self, registry: TableRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replaces the execution options.
    pub fn with_options(mut self, options: AuditOptions) -> Self {
        self.options = options;
        self
    }

    /// Registers an additional custom check, appended after the existing
    /// ones. This is the extension point for new hand-written rules.
    pub fn register_check(mut self, check: Box<dyn CustomCheck>) -> Self {
        self.custom_checks.push(check);
        self
    }

    /// Runs the full audit against the dataset.
    ///
    /// Checks run sequentially in catalog order, then registered custom
    /// checks in registration order; the report order is therefore stable
    /// across runs regardless of data content.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Connection`] when the dataset handle cannot be
    /// acquired at all. No partial report exists in that case.
    pub async fn run(&self, dataset: &dyn Dataset) -> Result<AuditRun, AuditError> {
        dataset.ping().await.map_err(AuditError::Connection)?;

        let mut run = AuditRun::new(Utc::now());
        info!(rules = self.catalog.len(), custom = self.custom_checks.len(), "audit started");

        for rule in self.catalog.rules() {
            let name = rule.check_name();
            let result = self
                .guarded(&name, executor::run_rule(rule, &self.registry, dataset))
                .await;
            run.push(result);
        }

        for check in &self.custom_checks {
            let name = check.name().to_string();
            let result = self.guarded(&name, check.run(dataset)).await;
            run.push(result);
        }

        let summary = run.summary();
        info!(
            total = summary.total,
            passed = summary.passed,
            failed = summary.failed,
            warnings = summary.warnings,
            errors = summary.errors,
            "audit complete"
        );
        Ok(run)
    }

    /// Applies the per-check timeout and converts execution failures into
    /// ERROR-status results, keeping the run alive.
    async fn guarded<F>(&self, name: &str, check: F) -> CheckResult
    where
        F: Future<Output = Result<CheckResult, CheckError>>,
    {
        match timeout(self.options.check_timeout, check).await {
            Ok(Ok(result)) => result,
            Ok(Err(err)) => {
                warn!(check = name, error = %err, "check execution failed");
                CheckResult::error(name, format!("check execution failed: {err}"))
            }
            Err(_) => {
                warn!(check = name, "check timed out");
                CheckResult::error(
                    name,
                    format!("check timed out after {:?}", self.options.check_timeout),
                )
            }
        }
    }
}

impl Default for Auditor {
    fn default() -> Self {
        Self::new()
    }
}
