//! Bounded operation layer between HTTP handlers and the store.
//!
//! # Data Flow
//! ```text
//! handler (parsed id / decoded payload)
//!     → EmployeeApi::{create, read, read_list, update, delete}
//!     → Deadline::race(store call on its own task)
//!     → value | store error (unchanged) | per-operation timeout error
//! ```
//!
//! # Design Decisions
//! - The store handle is injected, so tests can swap in doubles
//! - Backend errors are passed through, never retried or reclassified
//! - Read and list share one timeout error

pub mod employees;
pub mod error;

pub use employees::EmployeeApi;
pub use error::{ApiError, ApiResult, OperationKind};
