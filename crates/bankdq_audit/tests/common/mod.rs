//! Shared in-memory dataset fake for engine behavior tests.
#![allow(dead_code)] // not every test binary uses every helper

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use bankdq_audit::{Dataset, DatasetError, DatasetResult};

/// A scripted response, matched against the SQL a check issues.
enum Response {
    Count(i64),
    Texts(Vec<String>),
    Pairs(Vec<(String, String)>),
    Fail(String),
}

/// In-memory `Dataset` implementation driven by a response script.
///
/// Each entry pairs a SQL substring with a response; the first entry whose
/// substring occurs in the issued query wins. Unmatched count queries fall
/// back to zero (a clean dataset), unmatched text queries to empty results.
pub struct FakeDataset {
    script: Vec<(String, Response)>,
    ping_error: Option<String>,
    delay: Option<Duration>,
    issued: Mutex<Vec<String>>,
}

impl FakeDataset {
    /// A dataset that answers every query with "no violations".
    pub fn clean() -> Self {
        Self {
            script: Vec::new(),
            ping_error: None,
            delay: None,
            issued: Mutex::new(Vec::new()),
        }
    }

    /// Every query issued so far, in order.
    pub fn issued_queries(&self) -> Vec<String> {
        self.issued.lock().unwrap().clone()
    }

    fn record(&self, sql: &str) {
        self.issued.lock().unwrap().push(sql.to_string());
    }

    /// Scripts a count for queries containing `pattern`.
    pub fn with_count(mut self, pattern: &str, count: i64) -> Self {
        self.script.push((pattern.to_string(), Response::Count(count)));
        self
    }

    /// Scripts a text column for queries containing `pattern`.
    pub fn with_texts(mut self, pattern: &str, texts: &[&str]) -> Self {
        let texts = texts.iter().map(|s| s.to_string()).collect();
        self.script.push((pattern.to_string(), Response::Texts(texts)));
        self
    }

    /// Scripts text pairs for queries containing `pattern`.
    pub fn with_pairs(mut self, pattern: &str, pairs: &[(&str, &str)]) -> Self {
        let pairs = pairs
            .iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect();
        self.script.push((pattern.to_string(), Response::Pairs(pairs)));
        self
    }

    /// Scripts a query failure for queries containing `pattern`.
    pub fn failing_on(mut self, pattern: &str, message: &str) -> Self {
        self.script
            .push((pattern.to_string(), Response::Fail(message.to_string())));
        self
    }

    /// Makes the connectivity probe fail.
    pub fn unreachable(mut self, message: &str) -> Self {
        self.ping_error = Some(message.to_string());
        self
    }

    /// Delays every query by the given duration.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn lookup(&self, sql: &str) -> Option<&Response> {
        self.script
            .iter()
            .find(|(pattern, _)| sql.contains(pattern.as_str()))
            .map(|(_, response)| response)
    }

    async fn simulate_latency(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl Dataset for FakeDataset {
    async fn ping(&self) -> DatasetResult<()> {
        match &self.ping_error {
            Some(message) => Err(DatasetError::Connection(message.clone())),
            None => Ok(()),
        }
    }

    async fn fetch_count(&self, sql: &str) -> DatasetResult<i64> {
        self.record(sql);
        self.simulate_latency().await;
        match self.lookup(sql) {
            Some(Response::Count(count)) => Ok(*count),
            Some(Response::Fail(message)) => Err(DatasetError::Query(message.clone())),
            _ => Ok(0),
        }
    }

    async fn fetch_text_column(&self, sql: &str) -> DatasetResult<Vec<String>> {
        self.record(sql);
        self.simulate_latency().await;
        match self.lookup(sql) {
            Some(Response::Texts(texts)) => Ok(texts.clone()),
            Some(Response::Fail(message)) => Err(DatasetError::Query(message.clone())),
            _ => Ok(Vec::new()),
        }
    }

    async fn fetch_text_pairs(&self, sql: &str) -> DatasetResult<Vec<(String, String)>> {
        self.record(sql);
        self.simulate_latency().await;
        match self.lookup(sql) {
            Some(Response::Pairs(pairs)) => Ok(pairs.clone()),
            Some(Response::Fail(message)) => Err(DatasetError::Query(message.clone())),
            _ => Ok(Vec::new()),
        }
    }
}
