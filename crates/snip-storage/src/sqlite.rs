use async_trait::async_trait;
use jiff::Timestamp;
use snip_core::repository::{ReadRepository, Repository, Result, UrlRecord};
use snip_core::{ShortCode, StorageError};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;
use typed_builder::TypedBuilder;

const SCHEMA: &str = include_str!("../ddl/sqlite/short_urls.sql");

/// Connection settings for [`SqliteRepository::connect_with`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct SqliteSettings {
    /// Database URL, e.g. `sqlite://database.db` or `sqlite::memory:`.
    #[builder(setter(into))]
    url: String,
    #[builder(default = 5)]
    max_connections: u32,
    /// How long a writer waits for a competing write lock before failing.
    #[builder(default = Duration::from_secs(5))]
    busy_timeout: Duration,
    #[builder(default = Duration::from_secs(10))]
    acquire_timeout: Duration,
}

/// SQLite implementation of the repository contract.
///
/// Both uniqueness constraints live in the schema: `short_code` is the
/// primary key and `original_url` carries a `UNIQUE` constraint. Inserts
/// never check before writing; the engine decides which insert wins and the
/// loser gets a conflict error.
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Creates a repository from an existing SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a repository by opening a new pool with default settings.
    pub async fn connect(database_url: &str) -> Result<Self> {
        Self::connect_with(SqliteSettings::builder().url(database_url).build()).await
    }

    /// Creates a repository by opening a new pool.
    ///
    /// The database file is created if missing and put in WAL mode so
    /// readers do not block the single writer.
    pub async fn connect_with(settings: SqliteSettings) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&settings.url)
            .map_err(map_sqlx_error)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(settings.busy_timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout)
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;

        debug!(url = %settings.url, "opened sqlite pool");
        Ok(Self::new(pool))
    }

    /// Creates the `short_urls` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn parse_created_at(seconds: i64) -> Result<Timestamp> {
    Timestamp::from_second(seconds).map_err(|e| {
        StorageError::InvalidData(format!("invalid created_at timestamp '{}': {e}", seconds))
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::Configuration(_) => StorageError::Operation(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl ReadRepository for SqliteRepository {
    async fn get(&self, code: &ShortCode) -> Result<Option<UrlRecord>> {
        let row = sqlx::query(
            r#"
            SELECT original_url, created_at
            FROM short_urls
            WHERE short_code = ?
            LIMIT 1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let original_url: String = row.try_get("original_url").map_err(map_sqlx_error)?;
        let created_at: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;

        Ok(Some(UrlRecord {
            original_url,
            created_at: parse_created_at(created_at)?,
        }))
    }

    async fn find_code(&self, original_url: &str) -> Result<Option<ShortCode>> {
        let code: Option<String> = sqlx::query_scalar(
            r#"
            SELECT short_code
            FROM short_urls
            WHERE original_url = ?
            LIMIT 1
            "#,
        )
        .bind(original_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(code.map(ShortCode::new_unchecked))
    }

    async fn exists(&self, code: &ShortCode) -> Result<bool> {
        let exists = sqlx::query(
            r#"
            SELECT 1
            FROM short_urls
            WHERE short_code = ?
            LIMIT 1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .is_some();

        Ok(exists)
    }
}

#[async_trait]
impl Repository for SqliteRepository {
    async fn insert(&self, code: &ShortCode, record: UrlRecord) -> Result<()> {
        // A clash on original_url is swallowed by the upsert clause and shows
        // up as zero affected rows; a clash on the primary key still errors.
        let result = sqlx::query(
            r#"
            INSERT INTO short_urls (short_code, original_url, created_at)
            VALUES (?, ?, ?)
            ON CONFLICT(original_url) DO NOTHING
            "#,
        )
        .bind(code.as_str())
        .bind(record.original_url.as_str())
        .bind(record.created_at.as_second())
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => {
                Err(StorageError::UrlConflict(record.original_url))
            }
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => Err(StorageError::CodeConflict(code.to_string())),
            Err(err) => Err(map_sqlx_error(err)),
        }
    }
}
