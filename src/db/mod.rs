pub mod config;
pub mod operations;

mod health_monitor;

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

use crate::db::config::{DbConfig, DbConfigError, SqliteConfig};
use crate::db::health_monitor::{HealthCheckResult, HealthCheckSnapshot, HealthTracker};

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS learners (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL DEFAULT '',
    email TEXT NOT NULL DEFAULT '',
    interests TEXT NOT NULL DEFAULT '',
    skills TEXT NOT NULL DEFAULT '',
    scores TEXT NOT NULL DEFAULT '',
    parent_email TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS focus_events (
    id TEXT PRIMARY KEY,
    subject_id TEXT NOT NULL,
    status TEXT NOT NULL,
    received_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_focus_events_subject
    ON focus_events (subject_id, received_at DESC);
"#;

/// Append-only persistence sink for telemetry events and learner records.
/// Writers (the ingestion task, registration handlers) issue independent
/// per-row inserts, so no cross-writer coordination is needed.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
    health: Arc<RwLock<HealthTracker>>,
    health_check: config::HealthCheckConfig,
}

impl Database {
    pub async fn from_env() -> Result<Arc<Self>, DbInitError> {
        let config = DbConfig::from_env()?;
        Self::connect(&config).await
    }

    pub async fn connect(config: &DbConfig) -> Result<Arc<Self>, DbInitError> {
        let pool = Self::build_pool(&config.url, &config.sqlite).await?;

        let db = Arc::new(Self {
            pool,
            health: Arc::new(RwLock::new(HealthTracker::new(config.health_check.clone()))),
            health_check: config.health_check.clone(),
        });

        db.bootstrap_schema().await?;
        db.start_health_monitor();

        info!(url = %config.url, "database connected");
        Ok(db)
    }

    /// In-memory database for tests; no health-monitor task. In-memory
    /// sqlite is per-connection, so the pool is capped at one connection.
    pub async fn connect_ephemeral() -> Result<Self, DbInitError> {
        let sqlite = SqliteConfig::default();
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(DbInitError::Sqlx)?
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Memory)
            .busy_timeout(sqlite.busy_timeout)
            .foreign_keys(sqlite.foreign_keys);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(DbInitError::Sqlx)?;

        let health_check = config::HealthCheckConfig::default();
        let db = Self {
            pool,
            health: Arc::new(RwLock::new(HealthTracker::new(health_check.clone()))),
            health_check,
        };
        db.bootstrap_schema().await?;
        Ok(db)
    }

    async fn build_pool(url: &str, sqlite: &SqliteConfig) -> Result<SqlitePool, DbInitError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(DbInitError::Sqlx)?
            .create_if_missing(true)
            .journal_mode(sqlite.journal_mode.as_sqlx())
            .busy_timeout(sqlite.busy_timeout)
            .foreign_keys(sqlite.foreign_keys);

        SqlitePoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await
            .map_err(DbInitError::Sqlx)
    }

    async fn bootstrap_schema(&self) -> Result<(), DbInitError> {
        for statement in SCHEMA_SQL.split(';') {
            let statement = statement.trim();
            if statement.is_empty() {
                continue;
            }
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(DbInitError::Sqlx)?;
        }
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn health_status(&self) -> HealthCheckSnapshot {
        let tracker = self.health.read().await;
        tracker.snapshot()
    }
}

impl Database {
    fn start_health_monitor(self: &Arc<Self>) {
        let db = Arc::clone(self);
        tokio::spawn(async move {
            db.health_monitor_loop().await;
        });
    }

    async fn health_monitor_loop(self: Arc<Self>) {
        let interval = self.health_check.interval;

        loop {
            let start = tokio::time::Instant::now();
            let result = self.check_health().await;
            {
                let mut tracker = self.health.write().await;
                tracker.process(result);
            }

            let elapsed = start.elapsed();
            if elapsed < interval {
                tokio::time::sleep(interval - elapsed).await;
            }
        }
    }

    async fn check_health(&self) -> HealthCheckResult {
        let timeout = self.health_check.timeout;
        let pool = self.pool.clone();

        let started = std::time::Instant::now();
        let result = tokio::time::timeout(timeout, sqlx::query("SELECT 1").execute(&pool)).await;

        match result {
            Ok(Ok(_)) => HealthCheckResult::healthy(started.elapsed()),
            Ok(Err(err)) => HealthCheckResult::unhealthy(err.to_string()),
            Err(_) => HealthCheckResult::unhealthy("timeout".to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum DbInitError {
    #[error(transparent)]
    Config(#[from] DbConfigError),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connect_bootstraps_schema_on_a_fresh_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guidance.db");

        let config = DbConfig {
            url: format!("sqlite://{}", path.display()),
            sqlite: SqliteConfig::default(),
            health_check: config::HealthCheckConfig::default(),
        };

        let db = Database::connect(&config).await.unwrap();

        sqlx::query("SELECT COUNT(*) FROM focus_events")
            .fetch_one(db.pool())
            .await
            .unwrap();
        sqlx::query("SELECT COUNT(*) FROM learners")
            .fetch_one(db.pool())
            .await
            .unwrap();
    }
}
