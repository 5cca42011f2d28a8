//! SQLite-backed employee store.
//!
//! # Responsibilities
//! - Build the connection pool (WAL, busy timeout, create-if-missing)
//! - Provision the `employee` table via embedded migrations
//! - Translate each CRUD intent into parameterized statements

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;

use crate::config::DatabaseConfig;
use crate::store::model::next_update_stamp;
use crate::store::{Employee, EmployeePayload, EmployeeStore, Page, StoreError, StoreResult};

/// Open a connection pool for the configured database.
///
/// In-memory databases live only as long as their connection, so they are
/// pinned to a single connection that is never recycled.
pub async fn connect(config: &DatabaseConfig) -> StoreResult<SqlitePool> {
    let in_memory = config.url.contains(":memory:") || config.url.contains("mode=memory");

    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .journal_mode(if in_memory {
            SqliteJournalMode::Memory
        } else {
            SqliteJournalMode::Wal
        })
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_millis(config.busy_timeout_ms))
        .foreign_keys(true);

    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
    } else {
        SqlitePoolOptions::new().max_connections(config.max_connections)
    };

    let pool = pool_options.connect_with(options).await?;

    tracing::info!(
        url = %config.url,
        in_memory,
        busy_timeout_ms = config.busy_timeout_ms,
        "Database connection established"
    );

    Ok(pool)
}

/// Apply embedded schema migrations.
pub async fn migrate(pool: &SqlitePool) -> StoreResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

/// Employee store over a shared SQLite pool.
#[derive(Clone)]
pub struct SqliteEmployeeStore {
    pool: SqlitePool,
}

impl SqliteEmployeeStore {
    /// Wrap an existing pool. The schema must already be present.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect and provision in one step.
    pub async fn open(config: &DatabaseConfig) -> StoreResult<Self> {
        let pool = connect(config).await?;
        migrate(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl EmployeeStore for SqliteEmployeeStore {
    async fn create(&self, payload: EmployeePayload) -> StoreResult<Employee> {
        let now = Utc::now();

        let created = sqlx::query_as::<_, Employee>(
            "INSERT INTO employee (id, name, designation, salary, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?) \
             RETURNING id, name, designation, salary, created_at, updated_at",
        )
        .bind(payload.requested_id())
        .bind(payload.name)
        .bind(payload.designation)
        .bind(payload.salary)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(employee_id = created.id, "Employee inserted");
        Ok(created)
    }

    async fn read_one(&self, id: i64) -> StoreResult<Employee> {
        sqlx::query_as::<_, Employee>(
            "SELECT id, name, designation, salary, created_at, updated_at FROM employee WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound(id))
    }

    async fn read_page(&self, page: Page) -> StoreResult<Vec<Employee>> {
        // SQLite reads a negative LIMIT as "unbounded"
        if page.is_empty_window() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, Employee>(
            "SELECT id, name, designation, salary, created_at, updated_at FROM employee \
             ORDER BY id ASC LIMIT ? OFFSET ?",
        )
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn update(&self, id: i64, patch: EmployeePayload) -> StoreResult<Employee> {
        let stored = self.read_one(id).await?;
        let merged = patch.merge_onto(&stored, next_update_stamp(stored.updated_at));

        let result = sqlx::query(
            "UPDATE employee SET name = ?, designation = ?, salary = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&merged.name)
        .bind(&merged.designation)
        .bind(merged.salary)
        .bind(merged.updated_at)
        .bind(id)
        .execute(&self.pool)
        .await?;

        // Removed between the read and the write
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }

        tracing::debug!(employee_id = id, "Employee updated");
        Ok(merged)
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        self.read_one(id).await?;

        let result = sqlx::query("DELETE FROM employee WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }

        tracing::debug!(employee_id = id, "Employee deleted");
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
