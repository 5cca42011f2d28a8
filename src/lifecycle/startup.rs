//! Startup orchestration.
//!
//! # Responsibilities
//! - Open the store and apply migrations
//! - Build the bounded API over the store
//! - Bind the listener and construct the HTTP server
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently
//! - Listener binds last (traffic only when ready)

use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::api::EmployeeApi;
use crate::config::ServiceConfig;
use crate::http::HttpServer;
use crate::store::{SqliteEmployeeStore, StoreError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to open store: {0}")]
    Store(#[from] StoreError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Everything needed to start serving.
pub struct Service {
    pub listener: TcpListener,
    pub server: HttpServer,
    pub store: SqliteEmployeeStore,
}

/// Bring up the store, API and listener in order.
pub async fn bootstrap(config: ServiceConfig) -> Result<Service, StartupError> {
    let store = SqliteEmployeeStore::open(&config.database).await?;
    tracing::info!(url = %config.database.url, "Store ready");

    let api = EmployeeApi::from_config(Arc::new(store.clone()), &config.timeouts);

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.listener.bind_address.clone(),
            source,
        })?;

    let server = HttpServer::new(config, api);
    Ok(Service {
        listener,
        server,
        store,
    })
}
