//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and URLs
//! - Validate value ranges (timeouts > 0, page sizes >= 1)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: '{value}' is not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("database.url: '{0}' is not a sqlite URL")]
    InvalidDatabaseUrl(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("timeouts.request_secs ({request_secs}s) must exceed timeouts.operation_ms ({operation_ms}ms)")]
    RequestShorterThanOperation { request_secs: u64, operation_ms: u64 },

    #[error("{0} must be at least 1")]
    BelowOne(&'static str),
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if !config.database.url.starts_with("sqlite:") || config.database.url.len() <= "sqlite:".len() {
        errors.push(ValidationError::InvalidDatabaseUrl(config.database.url.clone()));
    }
    if config.database.max_connections == 0 {
        errors.push(ValidationError::Zero("database.max_connections"));
    }

    let timeouts = &config.timeouts;
    if timeouts.operation_ms == 0 {
        errors.push(ValidationError::Zero("timeouts.operation_ms"));
    }
    if timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    } else if timeouts.request_secs.saturating_mul(1000) <= timeouts.operation_ms {
        errors.push(ValidationError::RequestShorterThanOperation {
            request_secs: timeouts.request_secs,
            operation_ms: timeouts.operation_ms,
        });
    }

    if config.pagination.default_page < 1 {
        errors.push(ValidationError::BelowOne("pagination.default_page"));
    }
    if config.pagination.default_limit < 1 {
        errors.push(ValidationError::BelowOne("pagination.default_limit"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::Zero("security.max_body_size"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
