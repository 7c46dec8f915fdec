//! End-to-end engine behavior: ordering, isolation, idempotence, timeouts,
//! and run-level failure semantics.

mod common;

use std::time::Duration;

use bankdq_audit::{AuditError, AuditOptions, Auditor};
use bankdq_core::{CheckStatus, Rule, RuleCatalog};
use common::FakeDataset;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn report_order_follows_catalog_order() {
    let auditor = Auditor::new();
    let dataset = FakeDataset::clean();

    let run = auditor.run(&dataset).await.unwrap();

    let expected: Vec<String> = RuleCatalog::banking()
        .rules()
        .map(|r| r.check_name())
        .chain(
            [
                "check_document_format",
                "risk_high_value_txn_strong_auth",
                "risk_untrusted_device_transactions",
                "risk_daily_total_over_20m_auth",
            ]
            .into_iter()
            .map(String::from),
        )
        .collect();
    let actual: Vec<String> = run.results.iter().map(|r| r.check_name.clone()).collect();

    assert_eq!(actual, expected);
    assert_eq!(actual[0], "check_null_customers_full_name");
}

#[tokio::test]
async fn malformed_rule_yields_exactly_one_error_and_spares_the_rest() {
    let catalog: RuleCatalog = [
        Rule::NotNull {
            table: "customers".into(),
            column: "email".into(),
        },
        Rule::NotNull {
            table: "customers".into(),
            column: "shoe_size".into(), // not a column of the schema
        },
        Rule::Unique {
            table: "devices".into(),
            column: "device_identifier".into(),
        },
    ]
    .into_iter()
    .collect();

    let auditor = Auditor::empty().with_catalog(catalog);
    let dataset = FakeDataset::clean();

    let run = auditor.run(&dataset).await.unwrap();
    let statuses: Vec<CheckStatus> = run.results.iter().map(|r| r.status).collect();

    assert_eq!(
        statuses,
        vec![CheckStatus::Pass, CheckStatus::Error, CheckStatus::Pass]
    );
    let error = &run.results[1];
    assert_eq!(error.check_name, "check_null_customers_shoe_size");
    assert!(error.message.contains("unknown column"));
    assert_eq!(run.summary().errors, 1);
}

#[tokio::test]
async fn query_failure_is_isolated_to_its_check() {
    let auditor = Auditor::new();
    // Break exactly one rule's query; all other checks still evaluate.
    let dataset = FakeDataset::clean()
        .failing_on("accounts WHERE balance IS NULL", "relation lock timeout");

    let run = auditor.run(&dataset).await.unwrap();
    let summary = run.summary();

    assert_eq!(summary.errors, 1);
    assert_eq!(summary.passed, summary.total - 1);

    let error = run
        .results
        .iter()
        .find(|r| r.status == CheckStatus::Error)
        .unwrap();
    assert_eq!(error.check_name, "check_null_accounts_balance");
    assert!(error.message.contains("relation lock timeout"));
}

#[tokio::test]
async fn audit_is_idempotent_over_unchanged_data() {
    let auditor = Auditor::new();
    let dataset = FakeDataset::clean()
        .with_count("customers WHERE email IS NULL", 2)
        .with_texts("trust_status = 'unverified'", &["completed", "failed"])
        .with_pairs("FROM customeridentitydocuments", &[("CCCD", "bad")]);

    let first = auditor.run(&dataset).await.unwrap();
    let second = auditor.run(&dataset).await.unwrap();

    // Identical content for every check: status, message, counts, details.
    assert_eq!(first.results, second.results);
}

#[tokio::test(start_paused = true)]
async fn slow_check_times_out_as_error_not_fail() {
    let catalog: RuleCatalog = [Rule::NotNull {
        table: "customers".into(),
        column: "email".into(),
    }]
    .into_iter()
    .collect();

    let auditor = Auditor::empty().with_catalog(catalog).with_options(AuditOptions {
        check_timeout: Duration::from_secs(5),
    });
    let dataset = FakeDataset::clean().with_delay(Duration::from_secs(60));

    let run = auditor.run(&dataset).await.unwrap();

    assert_eq!(run.results.len(), 1);
    assert_eq!(run.results[0].status, CheckStatus::Error);
    assert!(run.results[0].message.contains("timed out"));
}

#[tokio::test]
async fn unreachable_dataset_fails_the_whole_run() {
    let auditor = Auditor::new();
    let dataset = FakeDataset::clean().unreachable("connection refused");

    let err = auditor.run(&dataset).await.unwrap_err();
    match err {
        AuditError::Connection(inner) => {
            assert!(inner.to_string().contains("connection refused"));
        }
    }
}

#[tokio::test]
async fn warnings_do_not_block_the_run_outcome() {
    let auditor = Auditor::new();
    let dataset =
        FakeDataset::clean().with_texts("trust_status = 'unverified'", &["completed"]);

    let run = auditor.run(&dataset).await.unwrap();
    let summary = run.summary();

    assert_eq!(summary.warnings, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.errors, 0);
    assert!(!run.has_blocking_failures());
}
