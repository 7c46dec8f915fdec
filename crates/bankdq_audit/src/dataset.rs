//! Read-only dataset handle.
//!
//! The engine's only I/O seam. Checks describe what they need as SQL and the
//! handle executes it; nothing in this trait can write, so the audited
//! dataset stays untouched by construction.

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by a dataset handle.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset session cannot be established or has been lost
    #[error("connection failure: {0}")]
    Connection(String),

    /// A query could not be executed
    #[error("query execution failed: {0}")]
    Query(String),
}

/// Result type for dataset operations.
pub type DatasetResult<T> = Result<T, DatasetError>;

/// A read-only handle onto the audited relational dataset.
///
/// Implementations execute the given queries verbatim. The engine only hands
/// over SQL built from identifiers vetted against the
/// [`TableRegistry`](bankdq_core::TableRegistry), so implementations do not
/// need to sanitize anything themselves.
#[async_trait]
pub trait Dataset: Send + Sync {
    /// Probes connectivity. Called once before any check runs; a failure
    /// here is fatal to the whole audit.
    async fn ping(&self) -> DatasetResult<()>;

    /// Executes a query returning a single count.
    async fn fetch_count(&self, sql: &str) -> DatasetResult<i64>;

    /// Executes a query returning one text column.
    async fn fetch_text_column(&self, sql: &str) -> DatasetResult<Vec<String>>;

    /// Executes a query returning two text columns per row.
    async fn fetch_text_pairs(&self, sql: &str) -> DatasetResult<Vec<(String, String)>>;
}
