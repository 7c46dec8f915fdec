//! # Banking Data-Quality Audit Engine
//!
//! The validation engine for the banking data-quality auditor. This crate
//! turns the declarative rule catalog from `bankdq_core` into executed checks
//! against a read-only dataset handle, and adds the hand-written checks the
//! catalog cannot express:
//!
//! - Generic checks (not-null, uniqueness, foreign-key integrity) via the
//!   check executor
//! - Document-number format validation
//! - Risk-based compliance checks (strong authentication on high-value and
//!   high-aggregate transactions, untrusted-device usage)
//!
//! ## Example
//!
//! ```rust,no_run
//! use bankdq_audit::{Auditor, PgConfig, PgDataset};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let dataset = PgDataset::connect(&PgConfig::from_env()).await?;
//! let auditor = Auditor::new();
//!
//! let run = auditor.run(&dataset).await?;
//! let summary = run.summary();
//! println!("{} checks, {} passed", summary.total, summary.passed);
//! # Ok(())
//! # }
//! ```

mod custom;
mod dataset;
mod engine;
mod error;
mod executor;
mod format;
mod postgres;
mod risk;

pub use custom::*;
pub use dataset::*;
pub use engine::*;
pub use error::*;
pub use executor::*;
pub use format::*;
pub use postgres::*;
pub use risk::*;
