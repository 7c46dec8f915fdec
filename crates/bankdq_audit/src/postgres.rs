//! Postgres implementation of the dataset handle.

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{PgPool, Row};
use tracing::debug;

use crate::{Dataset, DatasetError, DatasetResult};

/// Connection parameters for the audited banking database.
///
/// Supplied via environment, with the same variables and defaults the batch
/// deployment uses.
#[derive(Debug, Clone)]
pub struct PgConfig {
    /// Database host
    pub host: String,
    /// Database port
    pub port: u16,
    /// Database name
    pub dbname: String,
    /// Database user
    pub user: String,
    /// Database password
    pub password: String,
}

impl PgConfig {
    /// Reads the configuration from `BANKING_DB_*` environment variables,
    /// falling back to the local development defaults.
    pub fn from_env() -> Self {
        Self {
            host: env_or("BANKING_DB_HOST", "localhost"),
            port: std::env::var("BANKING_DB_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5432),
            dbname: env_or("BANKING_DB_NAME", "banking_db"),
            user: env_or("BANKING_DB_USER", "db_user"),
            password: env_or("BANKING_DB_PASSWORD", "db_password"),
        }
    }

    fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.dbname)
            .username(&self.user)
            .password(&self.password)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// A read-only Postgres session shared by all checks in a run.
#[derive(Debug, Clone)]
pub struct PgDataset {
    pool: PgPool,
}

impl PgDataset {
    /// Connects a small pool to the audited database.
    ///
    /// The pool is sized for one sequential audit, not a service workload.
    pub async fn connect(config: &PgConfig) -> DatasetResult<Self> {
        debug!(host = %config.host, port = config.port, dbname = %config.dbname, "connecting to banking database");
        let pool = PgPoolOptions::new()
            .max_connections(4)
            .connect_with(config.connect_options())
            .await
            .map_err(|e| DatasetError::Connection(e.to_string()))?;
        Ok(Self { pool })
    }

    /// Wraps an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Dataset for PgDataset {
    async fn ping(&self) -> DatasetResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| DatasetError::Connection(e.to_string()))
    }

    async fn fetch_count(&self, sql: &str) -> DatasetResult<i64> {
        sqlx::query_scalar::<_, i64>(sql)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DatasetError::Query(e.to_string()))
    }

    async fn fetch_text_column(&self, sql: &str) -> DatasetResult<Vec<String>> {
        let rows = sqlx::query(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DatasetError::Query(e.to_string()))?;
        rows.iter()
            .map(|row| row.try_get::<String, _>(0))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DatasetError::Query(e.to_string()))
    }

    async fn fetch_text_pairs(&self, sql: &str) -> DatasetResult<Vec<(String, String)>> {
        let rows = sqlx::query(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DatasetError::Query(e.to_string()))?;
        rows.iter()
            .map(|row| {
                let first = row.try_get::<String, _>(0)?;
                let second = row.try_get::<String, _>(1)?;
                Ok((first, second))
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(|e| DatasetError::Query(e.to_string()))
    }
}
