use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bankdq_core::{AuditRun, CheckResult, CheckStatus};
use colored::*;
use serde_json::json;

const TABLE_WIDTH: usize = 100;
const MESSAGE_WIDTH: usize = 30;

/// Prints the condensed audit summary table, failures first.
pub fn print_summary_table(run: &AuditRun) {
    println!("\n{}", "=".repeat(TABLE_WIDTH));
    println!("{:^TABLE_WIDTH$}", "AUDIT SUMMARY TABLE");
    println!("{}", "=".repeat(TABLE_WIDTH));

    println!("| {:<8} | {:<50} | {:<MESSAGE_WIDTH$} |", "STATUS", "CHECK NAME", "MESSAGE");
    println!("{}", "-".repeat(TABLE_WIDTH));

    for result in ordered_for_display(run) {
        let message = truncate_message(&result.message);
        println!(
            "| {:<8} | {:<50} | {:<MESSAGE_WIDTH$} |",
            colored_status(result.status),
            result.check_name,
            message
        );
    }

    let summary = run.summary();
    let not_passed = summary.total - summary.passed;
    println!("{}", "=".repeat(TABLE_WIDTH));
    println!(
        "AUDIT COMPLETE: {} checks PASSED, {} checks FAILED/WARNING.",
        summary.passed, not_passed
    );
    println!("{}", "=".repeat(TABLE_WIDTH));
}

/// Prints the full run as JSON.
pub fn print_json_report(run: &AuditRun) {
    let summary = run.summary();
    let output = json!({
        "started_at": run.started_at,
        "summary": summary,
        "results": run.results,
    });

    match serde_json::to_string_pretty(&output) {
        Ok(rendered) => println!("{rendered}"),
        Err(err) => eprintln!("failed to render JSON report: {err}"),
    }
}

/// Writes the durable audit log file and returns its path.
///
/// The file carries full detail for failed/warning/error checks and an
/// abbreviated confirmation for passed ones, under an aggregate header.
pub fn write_log_file(run: &AuditRun, log_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let timestamp = run.started_at.format("%Y%m%d_%H%M%S");
    let path = log_dir.join(format!("audit_log_{timestamp}.txt"));

    let contents = render_log_file(run);
    fs::write(&path, contents)
        .with_context(|| format!("Failed to write audit log {}", path.display()))?;

    Ok(path)
}

fn render_log_file(run: &AuditRun) -> String {
    let summary = run.summary();
    let not_passed = summary.total - summary.passed;
    let rule = "=".repeat(80);
    let separator = "-".repeat(40);

    let (passed, flagged): (Vec<&CheckResult>, Vec<&CheckResult>) = run
        .results
        .iter()
        .partition(|r| r.status == CheckStatus::Pass);

    let mut out = String::new();
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "DATA QUALITY AUDIT LOG - {}", run.started_at);
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out);
    let _ = writeln!(out, "--- AUDIT SUMMARY ---");
    let _ = writeln!(out, "Total Checks Executed: {}", summary.total);
    let _ = writeln!(out, "Passed: {}", summary.passed);
    let _ = writeln!(out, "Failed/Warnings: {not_passed}");
    let _ = writeln!(out);
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out);

    if !flagged.is_empty() {
        let _ = writeln!(out, "--- FAILED / WARNING CHECKS ---");
        for result in &flagged {
            let _ = writeln!(out, "Check Name: {}", result.check_name);
            let _ = writeln!(out, "Status:     {}", result.status);
            let _ = writeln!(out, "Message:    {}", result.message);
            if let Some(count) = result.failed_count {
                let _ = writeln!(out, "Violations: {count}");
            }
            for (key, value) in &result.details {
                let _ = writeln!(out, "Detail:     {key} = {value}");
            }
            let _ = writeln!(out, "{separator}");
        }
        let _ = writeln!(out);
    }

    if !passed.is_empty() {
        let _ = writeln!(out, "--- PASSED CHECKS ---");
        for result in &passed {
            let _ = writeln!(out, "Check Name: {}", result.check_name);
            let _ = writeln!(out, "Status:     {}", result.status);
            let _ = writeln!(out, "Message:    {}", result.message);
            let _ = writeln!(out, "{separator}");
        }
    }

    out
}

/// Failures, warnings and errors sort before passes; within each group the
/// catalog order is preserved.
fn ordered_for_display(run: &AuditRun) -> Vec<&CheckResult> {
    let mut results: Vec<&CheckResult> = run.results.iter().collect();
    results.sort_by_key(|r| r.status == CheckStatus::Pass);
    results
}

fn truncate_message(message: &str) -> String {
    if message.chars().count() > MESSAGE_WIDTH - 2 {
        let head: String = message.chars().take(MESSAGE_WIDTH - 5).collect();
        format!("{head}...")
    } else {
        message.to_string()
    }
}

fn colored_status(status: CheckStatus) -> ColoredString {
    let text = format!("{status:<8}");
    match status {
        CheckStatus::Pass => text.green(),
        CheckStatus::Fail => text.red().bold(),
        CheckStatus::Warning => text.yellow(),
        CheckStatus::Error => text.red(),
    }
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

#[allow(dead_code)]
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn sample_run() -> AuditRun {
        let mut run = AuditRun::new(Utc.with_ymd_and_hms(2024, 3, 1, 0, 5, 0).unwrap());
        run.push(CheckResult::pass(
            "check_null_customers_email",
            "[customers.email] No NULL values found.",
        ));
        run.push(CheckResult::fail(
            "check_unique_customers_email",
            "[customers.email] Found 2 groups of duplicate values.",
            2,
        ));
        run.push(
            CheckResult::warning(
                "risk_untrusted_device_transactions",
                "[Risk] Found 3 txns from unverified devices (1 successful).",
                3,
            )
            .with_detail("successful_from_untrusted", 1),
        );
        run
    }

    #[test]
    fn test_flagged_checks_sort_before_passes() {
        let run = sample_run();
        let ordered = ordered_for_display(&run);
        let names: Vec<&str> = ordered.iter().map(|r| r.check_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "check_unique_customers_email",
                "risk_untrusted_device_transactions",
                "check_null_customers_email",
            ]
        );
    }

    #[test]
    fn test_truncate_message() {
        assert_eq!(truncate_message("short"), "short");
        let long = "[customers.email] Found 2 groups of duplicate values.";
        let truncated = truncate_message(long);
        assert_eq!(truncated.chars().count(), 28);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_log_file_sections() {
        let run = sample_run();
        let rendered = render_log_file(&run);

        assert!(rendered.contains("DATA QUALITY AUDIT LOG - 2024-03-01 00:05:00 UTC"));
        assert!(rendered.contains("Total Checks Executed: 3"));
        assert!(rendered.contains("Passed: 1"));
        assert!(rendered.contains("Failed/Warnings: 2"));
        assert!(rendered.contains("--- FAILED / WARNING CHECKS ---"));
        assert!(rendered.contains("Violations: 2"));
        assert!(rendered.contains("Detail:     successful_from_untrusted = 1"));
        assert!(rendered.contains("--- PASSED CHECKS ---"));

        // Flagged detail precedes the passed section.
        let flagged_at = rendered.find("FAILED / WARNING").unwrap();
        let passed_at = rendered.find("PASSED CHECKS").unwrap();
        assert!(flagged_at < passed_at);
    }

    #[test]
    fn test_write_log_file_names_by_run_timestamp() {
        let run = sample_run();
        let dir = tempfile::tempdir().unwrap();

        let path = write_log_file(&run, dir.path()).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "audit_log_20240301_000500.txt"
        );
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("AUDIT SUMMARY"));
    }
}
