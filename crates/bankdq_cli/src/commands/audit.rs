use std::path::Path;

use anyhow::{Context, Result};
use bankdq_audit::{Auditor, PgConfig, PgDataset};
use tracing::info;

use crate::output;

pub async fn execute(format: &str, log_dir: Option<&str>) -> Result<()> {
    let config = PgConfig::from_env();
    info!(host = %config.host, port = config.port, dbname = %config.dbname, "starting audit");

    output::print_info(&format!(
        "Auditing {}:{}/{}",
        config.host, config.port, config.dbname
    ));

    let dataset = PgDataset::connect(&config).await.context(
        "Failed to connect to the banking database. Check that:\n\
         1. The database is running and accessible\n\
         2. The BANKING_DB_* environment variables are set correctly",
    )?;

    let auditor = Auditor::new();
    let run = auditor
        .run(&dataset)
        .await
        .context("Audit aborted before any check could run")?;

    match format {
        "json" => output::print_json_report(&run),
        _ => output::print_summary_table(&run),
    }

    if let Some(dir) = log_dir {
        let path = output::write_log_file(&run, Path::new(dir))?;
        output::print_info(&format!("Detailed audit log saved to: {}", path.display()));
    }

    if run.has_blocking_failures() {
        std::process::exit(1);
    }

    Ok(())
}
