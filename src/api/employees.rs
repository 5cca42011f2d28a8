//! Employee operations with a uniform execution ceiling.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::api::error::{ApiError, ApiResult, OperationKind};
use crate::config::TimeoutConfig;
use crate::observability::metrics;
use crate::resilience::{Deadline, Outcome};
use crate::store::{Employee, EmployeePayload, EmployeeStore, Page, StoreResult};

/// Wraps every store call in a [`Deadline`].
#[derive(Clone)]
pub struct EmployeeApi {
    store: Arc<dyn EmployeeStore>,
    deadline: Deadline,
}

impl EmployeeApi {
    pub fn new(store: Arc<dyn EmployeeStore>, deadline: Deadline) -> Self {
        Self { store, deadline }
    }

    pub fn from_config(store: Arc<dyn EmployeeStore>, config: &TimeoutConfig) -> Self {
        let deadline = Deadline::new(Duration::from_millis(config.operation_ms), config.on_timeout);
        Self::new(store, deadline)
    }

    pub async fn create(&self, payload: EmployeePayload) -> ApiResult<Employee> {
        let store = Arc::clone(&self.store);
        self.bounded(OperationKind::Create, "create", None, async move {
            store.create(payload).await
        })
        .await
    }

    pub async fn read(&self, id: i64) -> ApiResult<Employee> {
        let store = Arc::clone(&self.store);
        self.bounded(OperationKind::Read, "read", Some(id), async move {
            store.read_one(id).await
        })
        .await
    }

    pub async fn read_list(&self, page: Page) -> ApiResult<Vec<Employee>> {
        let store = Arc::clone(&self.store);
        self.bounded(OperationKind::Read, "read_list", None, async move {
            store.read_page(page).await
        })
        .await
    }

    pub async fn update(&self, id: i64, patch: EmployeePayload) -> ApiResult<Employee> {
        let store = Arc::clone(&self.store);
        self.bounded(OperationKind::Update, "update", Some(id), async move {
            store.update(id, patch).await
        })
        .await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let store = Arc::clone(&self.store);
        self.bounded(OperationKind::Delete, "delete", Some(id), async move {
            store.delete(id).await
        })
        .await
    }

    /// Backend liveness under the same ceiling as reads.
    pub async fn health(&self) -> ApiResult<()> {
        let store = Arc::clone(&self.store);
        self.bounded(OperationKind::Read, "health", None, async move { store.ping().await })
            .await
    }

    async fn bounded<T, F>(
        &self,
        kind: OperationKind,
        operation: &'static str,
        employee_id: Option<i64>,
        work: F,
    ) -> ApiResult<T>
    where
        F: Future<Output = StoreResult<T>> + Send + 'static,
        T: Send + 'static,
    {
        let start = Instant::now();

        let result = match self.deadline.race(work).await {
            Outcome::Completed(Ok(value)) => Ok(value),
            Outcome::Completed(Err(err)) => Err(ApiError::Store(err)),
            Outcome::TimedOut => Err(ApiError::Timeout(kind)),
            Outcome::Lost => Err(ApiError::NoResult),
        };

        let elapsed_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => {
                metrics::record_operation(operation, "ok", start);
                tracing::debug!(operation, ?employee_id, elapsed_ms, "Operation completed");
            }
            Err(err) => {
                metrics::record_operation(operation, err.outcome(), start);
                if err.is_timeout() || matches!(err, ApiError::NoResult) {
                    tracing::warn!(
                        operation,
                        ?employee_id,
                        elapsed_ms,
                        policy = ?self.deadline.policy(),
                        error = %err,
                        "Operation did not complete"
                    );
                } else {
                    tracing::debug!(operation, ?employee_id, elapsed_ms, error = %err, "Operation failed");
                }
            }
        }

        result
    }
}
