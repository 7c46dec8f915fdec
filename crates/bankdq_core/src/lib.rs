//! # Banking Data-Quality Core
//!
//! Core types for the banking data-quality auditor.
//!
//! This crate provides the building blocks shared by the audit engine and the
//! CLI: the declarative rule catalog, the registry of audited tables, and the
//! result types an audit run produces.
//!
//! ## Key Concepts
//!
//! - **Rule**: a single declarative data-quality rule (not-null, uniqueness,
//!   foreign-key integrity)
//! - **RuleCatalog**: the ordered set of rules an audit evaluates; adding a
//!   rule is a data change, never a code change
//! - **TableRegistry**: the fixed relational schema of the audited database,
//!   used to vet every identifier a rule references
//! - **CheckResult / AuditRun**: the write-once record of one check and of a
//!   whole audit
//!
//! ## Example
//!
//! ```rust
//! use bankdq_core::{RuleCatalog, TableRegistry};
//!
//! let registry = TableRegistry::banking();
//! let catalog = RuleCatalog::banking();
//!
//! // Every identifier the catalog references must be known to the schema.
//! catalog.validate(&registry).expect("catalog is self-consistent");
//! ```

pub mod catalog;
pub mod result;
pub mod schema;

pub use catalog::*;
pub use result::*;
pub use schema::*;
