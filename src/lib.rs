//! Employee Service Library
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http (router, middleware, handlers)
//!                          │
//!                          ▼
//!                     api (EmployeeApi)
//!                          │  every call raced against a Deadline
//!                          ▼
//!                     resilience::timeouts
//!                          │
//!                          ▼
//!                     store (EmployeeStore → SQLite)
//!
//!     Cross-cutting: config, observability, lifecycle
//! ```

pub mod api;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod store;

pub use api::{ApiError, EmployeeApi};
pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use store::{Employee, EmployeePayload, EmployeeStore, SqliteEmployeeStore};
