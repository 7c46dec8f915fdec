//! Error types for the audit engine.

use thiserror::Error;

use crate::DatasetError;
use bankdq_core::CatalogError;

/// Failure of a single check's execution.
///
/// Never aborts the run: the orchestrator converts it into an ERROR-status
/// result and continues with the remaining checks.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The rule references identifiers unknown to the schema
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The underlying query could not be executed
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// Run-level failure.
///
/// Only reachable before any individual check has started; once the run is
/// underway, per-check problems stay per-check.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The dataset handle could not be acquired at all
    #[error("cannot reach the audited dataset: {0}")]
    Connection(DatasetError),
}
