//! Document-number format validation.

use std::sync::LazyLock;

use async_trait::async_trait;
use bankdq_core::CheckResult;
use regex::Regex;

use crate::{CheckError, CustomCheck, Dataset};

/// Citizen identity card numbers: exactly twelve digits.
static CCCD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{12}$").expect("valid CCCD pattern"));

/// Passport numbers: one uppercase letter followed by seven digits.
static PASSPORT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]\d{7}$").expect("valid passport pattern"));

/// Validates identity-document numbers against the format their document
/// type mandates. Document types without a mandated format are exempt.
pub struct DocumentFormatCheck;

impl DocumentFormatCheck {
    /// Creates the check.
    pub fn new() -> Self {
        Self
    }
}

impl Default for DocumentFormatCheck {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns true when the document number is acceptable for its type.
fn document_number_is_valid(document_type: &str, document_number: &str) -> bool {
    match document_type {
        "CCCD" => CCCD_PATTERN.is_match(document_number),
        "Passport" => PASSPORT_PATTERN.is_match(document_number),
        _ => true, // unrecognized types are exempt from this rule
    }
}

#[async_trait]
impl CustomCheck for DocumentFormatCheck {
    fn name(&self) -> &str {
        "check_document_format"
    }

    async fn run(&self, dataset: &dyn Dataset) -> Result<CheckResult, CheckError> {
        let documents = dataset
            .fetch_text_pairs(
                "SELECT document_type, document_number FROM customeridentitydocuments \
                 WHERE document_number IS NOT NULL",
            )
            .await?;

        let invalid = documents
            .iter()
            .filter(|(doc_type, number)| !document_number_is_valid(doc_type, number))
            .count() as u64;

        Ok(if invalid == 0 {
            CheckResult::pass(
                self.name(),
                "[CustomerIdentityDocuments] CCCD and Passport formats are valid.",
            )
        } else {
            CheckResult::fail(
                self.name(),
                format!("[CustomerIdentityDocuments] Found {invalid} documents with invalid format."),
                invalid,
            )
        })
    }
}
