//! Registry of the audited relational schema.
//!
//! The auditor only ever reads from a fixed set of tables. This module keeps
//! that schema as data so rule identifiers can be checked against it before
//! any SQL is built, which is what keeps the generic executor free of
//! string-injection concerns.

use std::collections::BTreeMap;

/// The audited banking schema: table name to column list.
///
/// Table and column names are stored lowercase, matching how Postgres folds
/// unquoted identifiers.
const BANKING_TABLES: &[(&str, &[&str])] = &[
    (
        "customers",
        &[
            "customer_id",
            "full_name",
            "date_of_birth",
            "gender",
            "address",
            "phone_number",
            "email",
            "status",
            "password_hash",
            "pin_hash",
        ],
    ),
    (
        "customeridentitydocuments",
        &[
            "document_id",
            "customer_id",
            "document_number",
            "document_type",
            "nationality",
            "issue_date",
            "expiry_date",
            "issue_place",
        ],
    ),
    (
        "biometricdata",
        &["biometric_id", "customer_id", "biometric_type", "template_hash"],
    ),
    (
        "accounts",
        &[
            "account_id",
            "customer_id",
            "account_number",
            "account_type",
            "balance",
            "currency",
            "status",
            "card_number_masked",
            "card_expiry_date",
            "card_status",
        ],
    ),
    (
        "devices",
        &[
            "device_id",
            "device_identifier",
            "device_name",
            "device_type",
            "device_os",
            "last_login_at",
            "status",
        ],
    ),
    (
        "customerdevicelinks",
        &["link_id", "customer_id", "device_id", "trust_status", "is_active_session"],
    ),
    (
        "transactionlimits",
        &["limit_id", "customer_id", "limit_type", "limit_amount", "currency"],
    ),
    (
        "dailylimittrackers",
        &[
            "tracker_id",
            "customer_id",
            "transaction_type_group",
            "total_daily_amount",
            "running_total_amount",
            "tracking_date",
        ],
    ),
    (
        "transactions",
        &[
            "transaction_id",
            "source_account_id",
            "destination_account_id",
            "device_id",
            "transaction_type",
            "amount",
            "status",
            "regulation_category",
            "created_at",
        ],
    ),
    (
        "authlogs",
        &[
            "log_id",
            "customer_id",
            "device_id",
            "transaction_id",
            "auth_method",
            "result",
            "created_at",
        ],
    ),
    ("risktags", &["risk_tag_id", "customer_id", "tag_type"]),
];

/// The set of tables the auditor is allowed to reference.
///
/// A `TableRegistry` is the source of truth for identifier validation: a rule
/// that names a table or column not present here is rejected before any query
/// is issued.
#[derive(Debug, Clone)]
pub struct TableRegistry {
    tables: BTreeMap<&'static str, &'static [&'static str]>,
}

impl TableRegistry {
    /// Builds the registry for the audited banking schema.
    pub fn banking() -> Self {
        Self {
            tables: BANKING_TABLES.iter().copied().collect(),
        }
    }

    /// Returns true if the table is part of the audited schema.
    pub fn has_table(&self, table: &str) -> bool {
        self.tables.contains_key(table)
    }

    /// Returns true if the column exists in the given table.
    pub fn has_column(&self, table: &str, column: &str) -> bool {
        self.tables
            .get(table)
            .is_some_and(|columns| columns.contains(&column))
    }

    /// Iterates over the known table names, in lexical order.
    pub fn table_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tables.keys().copied()
    }

    /// Returns the number of known tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns true if the registry holds no tables.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl Default for TableRegistry {
    fn default() -> Self {
        Self::banking()
    }
}
