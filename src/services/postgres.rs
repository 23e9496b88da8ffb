use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

/// PostgreSQL client for the jobs each user has saved
///
/// Saved ids back the "saved only" filter; the listings themselves live in
/// the hosted backend.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client and run pending migrations
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Save a job for a user
    ///
    /// Saving an already saved job is a no-op. Returns whether a row was added.
    pub async fn save_job(&self, user_id: &str, job_id: &str) -> Result<bool, PostgresError> {
        let query = r#"
            INSERT INTO saved_jobs (id, user_id, job_id, saved_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (user_id, job_id) DO NOTHING
        "#;

        let result = sqlx::query(query)
            .bind(uuid::Uuid::new_v4())
            .bind(user_id)
            .bind(job_id)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Saved job {} for user {}", job_id, user_id);

        Ok(result.rows_affected() > 0)
    }

    /// Remove a saved job. Returns whether anything was removed.
    pub async fn unsave_job(&self, user_id: &str, job_id: &str) -> Result<bool, PostgresError> {
        let query = r#"
            DELETE FROM saved_jobs
            WHERE user_id = $1 AND job_id = $2
        "#;

        let result = sqlx::query(query)
            .bind(user_id)
            .bind(job_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Ids of every job the user has saved, most recent first
    pub async fn get_saved_job_ids(&self, user_id: &str) -> Result<Vec<String>, PostgresError> {
        let query = r#"
            SELECT job_id
            FROM saved_jobs
            WHERE user_id = $1
            ORDER BY saved_at DESC
        "#;

        let rows = sqlx::query(query).bind(user_id).fetch_all(&self.pool).await?;

        let saved_ids: Vec<String> = rows.iter().map(|row| row.get("job_id")).collect();

        tracing::debug!("User {} has saved {} jobs", user_id, saved_ids.len());

        Ok(saved_ids)
    }

    /// Saved job ids as a set, ready for the saved-only filter
    pub async fn saved_job_set(&self, user_id: &str) -> Result<HashSet<String>, PostgresError> {
        Ok(self.get_saved_job_ids(user_id).await?.into_iter().collect())
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
