//! Employee persistence subsystem.
//!
//! # Data Flow
//! ```text
//! EmployeeApi (bounded wrapper)
//!     → EmployeeStore trait (create / read_one / read_page / update / delete)
//!     → sqlite.rs (one parameterized statement per intent)
//!     → SQLite pool (checkout per call, returned on completion)
//! ```
//!
//! # Design Decisions
//! - The store owns no concurrency and no cache; the backend serializes writes
//! - The pool handle is injected at construction, never global
//! - Constraint violations come from the table definition, not from Rust code
//! - An empty page is a valid result, not an error

pub mod model;
pub mod sqlite;

use async_trait::async_trait;
use thiserror::Error;

pub use model::{Employee, EmployeePayload, Page};
pub use sqlite::SqliteEmployeeStore;

/// Errors raised by the persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No row matches the requested identifier.
    #[error("employee {0} not found")]
    NotFound(i64),

    /// A table constraint rejected the write (required field, duplicate id).
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// Any other backend failure (connectivity, decoding, I/O).
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    /// Schema provisioning failed.
    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        let violation = match &err {
            sqlx::Error::Database(db_err) if is_constraint_violation(&**db_err) => {
                Some(db_err.message().to_string())
            }
            _ => None,
        };

        match violation {
            Some(message) => StoreError::Constraint(message),
            None => StoreError::Database(err),
        }
    }
}

fn is_constraint_violation(db_err: &dyn sqlx::error::DatabaseError) -> bool {
    use sqlx::error::ErrorKind;

    match db_err.kind() {
        ErrorKind::UniqueViolation
        | ErrorKind::NotNullViolation
        | ErrorKind::CheckViolation
        | ErrorKind::ForeignKeyViolation => true,
        // Extended result codes in the SQLITE_CONSTRAINT family share primary code 19
        _ => db_err
            .code()
            .and_then(|code| code.parse::<i32>().ok())
            .is_some_and(|code| code & 0xff == 19),
    }
}

impl StoreError {
    /// Short label used for metrics and log fields.
    pub fn label(&self) -> &'static str {
        match self {
            StoreError::NotFound(_) => "not_found",
            StoreError::Constraint(_) => "constraint",
            StoreError::Database(_) | StoreError::Migration(_) => "error",
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Row-level CRUD over employee records.
///
/// Implementations must be cheap to share behind an `Arc`; every call may run
/// on its own task.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Insert a record. A zero id lets the backend assign one.
    async fn create(&self, payload: EmployeePayload) -> StoreResult<Employee>;

    /// Fetch a single record by id.
    async fn read_one(&self, id: i64) -> StoreResult<Employee>;

    /// Fetch records ordered by id ascending.
    async fn read_page(&self, page: Page) -> StoreResult<Vec<Employee>>;

    /// Merge `patch` onto the stored record and persist the result.
    async fn update(&self, id: i64, patch: EmployeePayload) -> StoreResult<Employee>;

    /// Permanently remove a record.
    async fn delete(&self, id: i64) -> StoreResult<()>;

    /// Round-trip to the backend without touching any row.
    async fn ping(&self) -> StoreResult<()>;
}
