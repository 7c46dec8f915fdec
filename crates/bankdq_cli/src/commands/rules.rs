use anyhow::{Context, Result};
use bankdq_core::{Rule, RuleCatalog, TableRegistry};

use crate::output;

pub fn execute(format: &str) -> Result<()> {
    let catalog = RuleCatalog::banking();
    let registry = TableRegistry::banking();

    catalog
        .validate(&registry)
        .context("Rule catalog references identifiers unknown to the schema")?;

    match format {
        "json" => {
            let rendered = serde_json::to_string_pretty(&catalog)
                .context("Failed to render catalog as JSON")?;
            println!("{rendered}");
        }
        _ => {
            output::print_info(&format!("{} rules in the catalog", catalog.len()));
            for rule in catalog.rules() {
                println!("{:<50} {}", rule.check_name(), describe(rule));
            }
        }
    }

    Ok(())
}

fn describe(rule: &Rule) -> String {
    match rule {
        Rule::NotNull { table, column } => format!("{table}.{column} must not be NULL"),
        Rule::Unique { table, column } => format!("{table}.{column} must be unique"),
        Rule::ForeignKey {
            table,
            fk_column,
            parent_table,
            pk_column,
        } => format!("{table}.{fk_column} must reference {parent_table}.{pk_column}"),
    }
}
