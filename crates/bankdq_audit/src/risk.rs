//! Risk-based compliance checks.
//!
//! Three checks encoding regulatory policy over joined and time-windowed
//! data. All of them are read-only and deterministic: repeated execution
//! against unchanged data yields identical results.

use async_trait::async_trait;
use bankdq_core::CheckResult;

use crate::{CheckError, CustomCheck, Dataset};

/// Per-transaction amount above which strong authentication is mandatory.
pub const HIGH_VALUE_THRESHOLD_VND: i64 = 10_000_000;

/// Daily per-customer cumulative total above which at least one strong
/// authentication that day is mandatory.
pub const DAILY_TOTAL_THRESHOLD_VND: i64 = 20_000_000;

/// Authentication methods considered sufficient for high-value approval.
pub const STRONG_AUTH_METHODS: [&str; 3] = ["sms_otp", "soft_otp", "biometric_faceid"];

/// Renders the allow-list as a SQL IN-list.
fn strong_auth_in_list() -> String {
    let quoted: Vec<String> = STRONG_AUTH_METHODS
        .iter()
        .map(|m| format!("'{m}'"))
        .collect();
    format!("({})", quoted.join(", "))
}

/// Completed transactions above the high-value threshold must carry at least
/// one successful strong-auth event.
pub struct HighValueStrongAuthCheck;

impl HighValueStrongAuthCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HighValueStrongAuthCheck {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CustomCheck for HighValueStrongAuthCheck {
    fn name(&self) -> &str {
        "risk_high_value_txn_strong_auth"
    }

    async fn run(&self, dataset: &dyn Dataset) -> Result<CheckResult, CheckError> {
        let sql = format!(
            "WITH high_value_txns AS ( \
                 SELECT transaction_id FROM transactions \
                 WHERE amount > {threshold} AND status = 'completed' \
             ), \
             strongly_authed_txns AS ( \
                 SELECT DISTINCT transaction_id FROM authlogs \
                 WHERE result = 'success' AND auth_method IN {methods} \
             ) \
             SELECT COUNT(hvt.transaction_id) FROM high_value_txns hvt \
             LEFT JOIN strongly_authed_txns sa ON hvt.transaction_id = sa.transaction_id \
             WHERE sa.transaction_id IS NULL",
            threshold = HIGH_VALUE_THRESHOLD_VND,
            methods = strong_auth_in_list(),
        );
        let count = dataset.fetch_count(&sql).await?;

        Ok(if count == 0 {
            CheckResult::pass(
                self.name(),
                "[Risk] High-value transactions (>10M VND) comply with strong auth.",
            )
        } else {
            CheckResult::fail(
                self.name(),
                format!("[Risk] Found {count} high-value transactions lacking strong auth."),
                count as u64,
            )
        })
    }
}

/// Transactions initiated from a device whose trust link to the account
/// owner is unverified.
///
/// A risk signal, not a policy violation: any match yields WARNING, never
/// FAIL. The count of matches that nonetheless completed is reported as the
/// `successful_from_untrusted` detail metric.
pub struct UntrustedDeviceCheck;

impl UntrustedDeviceCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UntrustedDeviceCheck {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CustomCheck for UntrustedDeviceCheck {
    fn name(&self) -> &str {
        "risk_untrusted_device_transactions"
    }

    async fn run(&self, dataset: &dyn Dataset) -> Result<CheckResult, CheckError> {
        let statuses = dataset
            .fetch_text_column(
                "SELECT t.status FROM transactions t \
                 JOIN accounts a ON t.source_account_id = a.account_id \
                 JOIN customerdevicelinks cdl \
                   ON t.device_id = cdl.device_id AND a.customer_id = cdl.customer_id \
                 WHERE cdl.trust_status = 'unverified'",
            )
            .await?;

        let total = statuses.len() as u64;
        if total == 0 {
            return Ok(CheckResult::pass(
                self.name(),
                "[Risk] No transactions found from unverified devices.",
            ));
        }

        let successful = statuses.iter().filter(|s| s.as_str() == "completed").count() as i64;
        Ok(CheckResult::warning(
            self.name(),
            format!("[Risk] Found {total} txns from unverified devices ({successful} successful)."),
            total,
        )
        .with_detail("successful_from_untrusted", successful))
    }
}

/// Customer/day groups of completed transactions summing above the daily
/// threshold must have at least one strong-auth success that day.
///
/// The unit of comparison is the (customer, calendar day) pair, with the day
/// taken from the transaction's creation timestamp truncated to a date.
pub struct DailyTotalStrongAuthCheck;

impl DailyTotalStrongAuthCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DailyTotalStrongAuthCheck {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CustomCheck for DailyTotalStrongAuthCheck {
    fn name(&self) -> &str {
        "risk_daily_total_over_20m_auth"
    }

    async fn run(&self, dataset: &dyn Dataset) -> Result<CheckResult, CheckError> {
        let sql = format!(
            "WITH daily_totals AS ( \
                 SELECT a.customer_id, t.created_at::date AS transaction_date \
                 FROM transactions t \
                 JOIN accounts a ON t.source_account_id = a.account_id \
                 WHERE t.status = 'completed' \
                 GROUP BY 1, 2 \
                 HAVING SUM(t.amount) > {threshold} \
             ), \
             daily_strong_auths AS ( \
                 SELECT DISTINCT a.customer_id, t.created_at::date AS transaction_date \
                 FROM transactions t \
                 JOIN accounts a ON t.source_account_id = a.account_id \
                 JOIN authlogs al ON t.transaction_id = al.transaction_id \
                 WHERE t.status = 'completed' \
                   AND al.result = 'success' \
                   AND al.auth_method IN {methods} \
             ) \
             SELECT COUNT(dt.customer_id) FROM daily_totals dt \
             LEFT JOIN daily_strong_auths dsa \
               ON dt.customer_id = dsa.customer_id \
              AND dt.transaction_date = dsa.transaction_date \
             WHERE dsa.customer_id IS NULL",
            threshold = DAILY_TOTAL_THRESHOLD_VND,
            methods = strong_auth_in_list(),
        );
        let count = dataset.fetch_count(&sql).await?;

        Ok(if count == 0 {
            CheckResult::pass(
                self.name(),
                "[Risk] Daily totals >20M VND comply with strong auth.",
            )
        } else {
            CheckResult::fail(
                self.name(),
                format!(
                    "[Risk] Found {count} customer/day instances violating the >20M daily total rule."
                ),
                count as u64,
            )
        })
    }
}
