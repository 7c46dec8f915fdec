//! Declarative rule catalog.
//!
//! The catalog is pure configuration: three data tables (not-null columns,
//! unique columns, foreign-key specs) expanded into an ordered list of tagged
//! `Rule` values. The executor dispatches on the variant; adding a rule is a
//! data change here, never a code change in the engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::TableRegistry;

/// Columns that must never be NULL, per table.
const NOT_NULL_RULES: &[(&str, &[&str])] = &[
    (
        "customers",
        &["full_name", "date_of_birth", "gender", "phone_number", "email", "status", "password_hash"],
    ),
    (
        "customeridentitydocuments",
        &["customer_id", "document_number", "document_type", "nationality"],
    ),
    ("biometricdata", &["customer_id", "biometric_type", "template_hash"]),
    (
        "accounts",
        &["customer_id", "account_number", "account_type", "balance", "currency", "status"],
    ),
    ("devices", &["device_identifier", "device_type", "status"]),
    (
        "customerdevicelinks",
        &["customer_id", "device_id", "trust_status", "is_active_session"],
    ),
    (
        "transactionlimits",
        &["customer_id", "limit_type", "limit_amount", "currency"],
    ),
    (
        "dailylimittrackers",
        &[
            "customer_id",
            "transaction_type_group",
            "total_daily_amount",
            "running_total_amount",
            "tracking_date",
        ],
    ),
    (
        "transactions",
        &["source_account_id", "device_id", "transaction_type", "amount", "status"],
    ),
    ("authlogs", &["customer_id", "device_id", "auth_method", "result"]),
    ("risktags", &["customer_id", "tag_type"]),
];

/// Columns whose values must be unique, per table.
const UNIQUE_RULES: &[(&str, &[&str])] = &[
    ("customers", &["phone_number", "email"]),
    ("customeridentitydocuments", &["document_number"]),
    ("biometricdata", &["customer_id"]),
    ("accounts", &["account_number"]),
    ("devices", &["device_identifier"]),
];

/// Foreign-key integrity specs: (table, fk_column, parent_table, pk_column).
const FOREIGN_KEY_RULES: &[(&str, &str, &str, &str)] = &[
    ("customeridentitydocuments", "customer_id", "customers", "customer_id"),
    ("biometricdata", "customer_id", "customers", "customer_id"),
    ("accounts", "customer_id", "customers", "customer_id"),
    ("transactions", "source_account_id", "accounts", "account_id"),
    ("authlogs", "customer_id", "customers", "customer_id"),
];

/// A single declarative data-quality rule.
///
/// Rules are tagged values, not query strings: the executor maps each variant
/// to one fixed query shape after validating every identifier against the
/// [`TableRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Rule {
    /// The column must contain no NULL values.
    NotNull {
        /// Audited table
        table: String,
        /// Column that must be populated
        column: String,
    },

    /// The column must contain no duplicate values.
    Unique {
        /// Audited table
        table: String,
        /// Column whose values must be distinct
        column: String,
    },

    /// Every non-NULL foreign key must reference an existing parent row.
    ForeignKey {
        /// Child table
        table: String,
        /// Foreign-key column in the child table
        fk_column: String,
        /// Referenced parent table
        parent_table: String,
        /// Primary-key column in the parent table
        pk_column: String,
    },
}

impl Rule {
    /// Stable check name, unique within a catalog.
    ///
    /// Names follow the `check_{kind}_{table}_{column}` convention and are
    /// the identity used for reporting and for diffing runs over time, so
    /// they must not change once a rule is in production.
    pub fn check_name(&self) -> String {
        match self {
            Rule::NotNull { table, column } => format!("check_null_{table}_{column}"),
            Rule::Unique { table, column } => format!("check_unique_{table}_{column}"),
            Rule::ForeignKey { table, fk_column, .. } => format!("check_fk_{table}_{fk_column}"),
        }
    }

    /// Validates every identifier this rule references against the registry.
    pub fn validate(&self, registry: &TableRegistry) -> Result<(), CatalogError> {
        match self {
            Rule::NotNull { table, column } | Rule::Unique { table, column } => {
                require_column(registry, table, column)
            }
            Rule::ForeignKey {
                table,
                fk_column,
                parent_table,
                pk_column,
            } => {
                require_column(registry, table, fk_column)?;
                require_column(registry, parent_table, pk_column)
            }
        }
    }
}

fn require_column(registry: &TableRegistry, table: &str, column: &str) -> Result<(), CatalogError> {
    if !registry.has_table(table) {
        return Err(CatalogError::UnknownTable {
            table: table.to_string(),
        });
    }
    if !registry.has_column(table, column) {
        return Err(CatalogError::UnknownColumn {
            table: table.to_string(),
            column: column.to_string(),
        });
    }
    Ok(())
}

/// Errors raised when a catalog references identifiers the schema does not know.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Rule references a table outside the audited schema
    #[error("rule references unknown table '{table}'")]
    UnknownTable { table: String },

    /// Rule references a column the table does not have
    #[error("rule references unknown column '{table}.{column}'")]
    UnknownColumn { table: String, column: String },
}

/// An ordered list of rules to audit.
///
/// Order is significant: the report presents results in catalog order, and
/// that order is stable across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleCatalog {
    rules: Vec<Rule>,
}

impl RuleCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Builds the default banking catalog: all not-null rules, then all
    /// uniqueness rules, then all foreign-key rules.
    pub fn banking() -> Self {
        let mut rules = Vec::new();

        for (table, columns) in NOT_NULL_RULES {
            for column in *columns {
                rules.push(Rule::NotNull {
                    table: (*table).to_string(),
                    column: (*column).to_string(),
                });
            }
        }

        for (table, columns) in UNIQUE_RULES {
            for column in *columns {
                rules.push(Rule::Unique {
                    table: (*table).to_string(),
                    column: (*column).to_string(),
                });
            }
        }

        for (table, fk_column, parent_table, pk_column) in FOREIGN_KEY_RULES {
            rules.push(Rule::ForeignKey {
                table: (*table).to_string(),
                fk_column: (*fk_column).to_string(),
                parent_table: (*parent_table).to_string(),
                pk_column: (*pk_column).to_string(),
            });
        }

        Self { rules }
    }

    /// Appends a rule to the catalog.
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Iterates over the rules in declared order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Returns the number of rules in the catalog.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the catalog holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Validates every rule against the registry.
    ///
    /// Run once at load time; a catalog that references an unknown table or
    /// column is a configuration bug, not a data-quality finding.
    pub fn validate(&self, registry: &TableRegistry) -> Result<(), CatalogError> {
        for rule in &self.rules {
            rule.validate(registry)?;
        }
        Ok(())
    }
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::banking()
    }
}

impl FromIterator<Rule> for RuleCatalog {
    fn from_iter<T: IntoIterator<Item = Rule>>(iter: T) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
