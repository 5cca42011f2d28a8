//! Errors surfaced by the bounded operation layer.

use std::fmt;

use thiserror::Error;

use crate::store::StoreError;

/// The kind of store operation a timeout belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Create,
    Read,
    Update,
    Delete,
}

impl OperationKind {
    fn verb(&self) -> &'static str {
        match self {
            OperationKind::Create => "creating",
            OperationKind::Read => "reading",
            OperationKind::Update => "updating",
            OperationKind::Delete => "deleting",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// Error returned by [`EmployeeApi`](crate::api::EmployeeApi) calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The store call did not report within the deadline.
    #[error("timeout occurred while {0} employee")]
    Timeout(OperationKind),

    /// The store task ended without reporting a result.
    #[error("no result received before timeout")]
    NoResult,

    /// The store reported an error; passed through unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Store(StoreError::NotFound(_)))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout(_))
    }

    /// Outcome label for metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            ApiError::Timeout(_) => "timeout",
            ApiError::NoResult => "lost",
            ApiError::Store(err) => err.label(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
