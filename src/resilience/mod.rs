//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! EmployeeApi call:
//!     → timeouts.rs (spawn store call, race one-slot channel against timer)
//!     → Completed / TimedOut / Lost
//!     → api.rs maps the outcome to a typed result
//! ```
//!
//! # Design Decisions
//! - Every store call has a deadline; no call is retried
//! - Timeout errors are distinct per operation kind
//! - Cancellation on timeout is a policy choice, defaulting to abort

pub mod timeouts;

pub use timeouts::{Deadline, Outcome, TimeoutPolicy};
