//! Shared utilities for integration and load testing.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use employee_service::api::EmployeeApi;
use employee_service::config::ServiceConfig;
use employee_service::http::HttpServer;
use employee_service::lifecycle::{bootstrap, Shutdown};
use employee_service::store::{Employee, EmployeePayload, EmployeeStore, Page, StoreResult};

/// A running service bound to an ephemeral port.
pub struct TestService {
    pub base_url: String,
    pub shutdown: Shutdown,
    handle: JoinHandle<Result<(), std::io::Error>>,
    _dir: Option<TempDir>,
}

impl TestService {
    /// Stop accepting and wait for in-flight requests to drain.
    pub async fn stop(self) {
        self.shutdown.trigger();
        let _ = self.handle.await;
    }
}

/// Start the full stack over a fresh SQLite file.
pub async fn spawn_service(tweak: impl FnOnce(&mut ServiceConfig)) -> TestService {
    let dir = tempfile::tempdir().unwrap();
    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.database.url = format!("sqlite://{}", dir.path().join("employees.db").display());
    tweak(&mut config);

    let service = bootstrap(config).await.unwrap();
    let addr = service.listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let handle = tokio::spawn(service.server.run(service.listener, shutdown.subscribe()));

    TestService {
        base_url: format!("http://{}", addr),
        shutdown,
        handle,
        _dir: Some(dir),
    }
}

/// Serve an arbitrary store through the real router and middleware.
pub async fn spawn_with_store(store: Arc<dyn EmployeeStore>, config: ServiceConfig) -> TestService {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let api = EmployeeApi::from_config(store, &config.timeouts);
    let server = HttpServer::new(config, api);

    let shutdown = Shutdown::new();
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    TestService {
        base_url: format!("http://{}", addr),
        shutdown,
        handle,
        _dir: None,
    }
}

/// Store whose every call takes `delay` and counts the writes it completes.
pub struct SlowStore {
    pub delay: Duration,
    pub writes: AtomicUsize,
}

impl SlowStore {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            writes: AtomicUsize::new(0),
        }
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    async fn respond(&self, write: bool) -> StoreResult<Employee> {
        tokio::time::sleep(self.delay).await;
        if write {
            self.writes.fetch_add(1, Ordering::SeqCst);
        }
        let now = Utc::now();
        Ok(Employee {
            id: 1,
            name: "Slow".into(),
            designation: "Sloth".into(),
            salary: 1.0,
            created_at: now,
            updated_at: now,
        })
    }
}

#[async_trait]
impl EmployeeStore for SlowStore {
    async fn create(&self, _payload: EmployeePayload) -> StoreResult<Employee> {
        self.respond(true).await
    }

    async fn read_one(&self, _id: i64) -> StoreResult<Employee> {
        self.respond(false).await
    }

    async fn read_page(&self, _page: Page) -> StoreResult<Vec<Employee>> {
        self.respond(false).await.map(|e| vec![e])
    }

    async fn update(&self, _id: i64, _patch: EmployeePayload) -> StoreResult<Employee> {
        self.respond(true).await
    }

    async fn delete(&self, _id: i64) -> StoreResult<()> {
        self.respond(true).await.map(|_| ())
    }

    async fn ping(&self) -> StoreResult<()> {
        self.respond(false).await.map(|_| ())
    }
}
