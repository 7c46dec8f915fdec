//! Generic check executor.
//!
//! Maps each rule variant to one fixed query shape, runs it against the
//! dataset handle, and classifies the count into a verdict. Identifiers are
//! validated against the table registry before any SQL is built; a rule that
//! references an unknown table or column never reaches the database.

use bankdq_core::{CheckResult, Rule, TableRegistry};

use crate::{CheckError, Dataset};

/// Executes one catalog rule and returns its classified result.
///
/// Errors (unknown identifiers, query failures) are returned to the caller;
/// the orchestrator converts them into ERROR-status results so the run
/// continues with the remaining rules.
pub async fn run_rule(
    rule: &Rule,
    registry: &TableRegistry,
    dataset: &dyn Dataset,
) -> Result<CheckResult, CheckError> {
    rule.validate(registry)?;
    let name = rule.check_name();

    match rule {
        Rule::NotNull { table, column } => {
            let count = dataset.fetch_count(&null_count_sql(table, column)).await?;
            Ok(if count == 0 {
                CheckResult::pass(name, format!("[{table}.{column}] No NULL values found."))
            } else {
                CheckResult::fail(
                    name,
                    format!("[{table}.{column}] Found {count} NULL values."),
                    count as u64,
                )
            })
        }

        Rule::Unique { table, column } => {
            // Counts groups of duplicated values, not duplicated rows: a
            // value occurring three times is one violation, not three.
            let groups = dataset
                .fetch_count(&duplicate_groups_sql(table, column))
                .await?;
            Ok(if groups == 0 {
                CheckResult::pass(name, format!("[{table}.{column}] All values are unique."))
            } else {
                CheckResult::fail(
                    name,
                    format!("[{table}.{column}] Found {groups} groups of duplicate values."),
                    groups as u64,
                )
            })
        }

        Rule::ForeignKey {
            table,
            fk_column,
            parent_table,
            pk_column,
        } => {
            let orphans = dataset
                .fetch_count(&orphan_count_sql(table, fk_column, parent_table, pk_column))
                .await?;
            Ok(if orphans == 0 {
                CheckResult::pass(
                    name,
                    format!("FK Integrity OK: [{table}.{fk_column}] -> [{parent_table}.{pk_column}]."),
                )
            } else {
                CheckResult::fail(
                    name,
                    format!("FK Violation: Found {orphans} orphaned records in [{table}]."),
                    orphans as u64,
                )
            })
        }
    }
}

fn null_count_sql(table: &str, column: &str) -> String {
    format!("SELECT COUNT(*) FROM {table} WHERE {column} IS NULL")
}

fn duplicate_groups_sql(table: &str, column: &str) -> String {
    format!(
        "SELECT COUNT(*) FROM (SELECT {column} FROM {table} \
         GROUP BY {column} HAVING COUNT(*) > 1) AS duplicates"
    )
}

/// Rows with a NULL foreign key are exempt: an absent reference is not an
/// orphan, only a dangling one is.
fn orphan_count_sql(table: &str, fk_column: &str, parent_table: &str, pk_column: &str) -> String {
    format!(
        "SELECT COUNT(child.{fk_column}) FROM {table} child \
         LEFT JOIN {parent_table} parent ON child.{fk_column} = parent.{pk_column} \
         WHERE child.{fk_column} IS NOT NULL AND parent.{pk_column} IS NULL"
    )
}
