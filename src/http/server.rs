//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, limits, request ID)
//! - Bind server to listener
//! - Stop accepting on shutdown and drain in-flight requests

use std::time::Duration;

use axum::{
    body::Body,
    http::{HeaderName, Request},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::api::EmployeeApi;
use crate::config::{PaginationConfig, ServiceConfig};
use crate::http::handlers;
use crate::http::request::{request_id_of, RequestUuid, X_REQUEST_ID};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub api: EmployeeApi,
    pub pagination: PaginationConfig,
}

/// HTTP server for the employee API.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig, api: EmployeeApi) -> Self {
        let state = AppState {
            api,
            pagination: config.pagination.clone(),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let request_id = HeaderName::from_static(X_REQUEST_ID);

        Router::new()
            .route("/employees", post(handlers::create_employee))
            .route(
                "/employees/{id}",
                get(handlers::read_employee)
                    .put(handlers::update_employee)
                    .delete(handlers::delete_employee),
            )
            .route("/employeeList", get(handlers::list_employees))
            .route("/health", get(handlers::health))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id_of(request),
                )
            }))
            .layer(PropagateRequestIdLayer::new(request_id.clone()))
            .layer(SetRequestIdLayer::new(request_id, RequestUuid))
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            operation_timeout_ms = self.config.timeouts.operation_ms,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::store::{Employee, SqliteEmployeeStore};
    use axum::http::StatusCode;
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn app() -> Router {
        app_with(ServiceConfig::default()).await
    }

    async fn app_with(config: ServiceConfig) -> Router {
        let store = SqliteEmployeeStore::open(&DatabaseConfig {
            url: "sqlite::memory:".into(),
            ..Default::default()
        })
        .await
        .unwrap();
        let api = EmployeeApi::from_config(Arc::new(store), &config.timeouts);
        HttpServer::new(config, api).router()
    }

    fn request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn create_then_read() {
        let app = app().await;

        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/employees",
                r#"{"name":"Dan","designation":"Software Developer","salary":23456}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(response.headers().contains_key(X_REQUEST_ID));
        let created: Employee = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(created.id, 1);

        let response = app.oneshot(request("GET", "/employees/1", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let read: Employee = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(read, created);
    }

    #[tokio::test]
    async fn bad_inputs_are_rejected() {
        let app = app().await;

        let response = app.clone().oneshot(request("GET", "/employees/abc", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Invalid employee ID");

        let response = app
            .clone()
            .oneshot(request("POST", "/employees", "{not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app.oneshot(request("PUT", "/employees/x", "{}")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_employee_is_404() {
        let app = app().await;

        for method in ["GET", "DELETE"] {
            let response = app.clone().oneshot(request(method, "/employees/99", "")).await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            assert_eq!(body_text(response).await, "Employee not found");
        }

        let response = app
            .oneshot(request("PUT", "/employees/99", r#"{"salary":1}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_reports_success_message() {
        let app = app().await;
        app.clone()
            .oneshot(request("POST", "/employees", r#"{"name":"Ann","designation":"QA","salary":1}"#))
            .await
            .unwrap();

        let response = app.oneshot(request("DELETE", "/employees/1", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["message"], "Employee deleted successfully");
    }

    #[tokio::test]
    async fn empty_list_is_an_empty_array() {
        let app = app().await;
        let response = app
            .oneshot(request("GET", "/employeeList?page=3&limit=junk", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "[]");
    }

    #[tokio::test]
    async fn repeated_list_params_use_the_first_value() {
        let app = app().await;
        for name in ["A", "B", "C"] {
            let body = format!(r#"{{"name":"{name}","designation":"QA","salary":1}}"#);
            app.clone().oneshot(request("POST", "/employees", &body)).await.unwrap();
        }

        let response = app
            .clone()
            .oneshot(request("GET", "/employeeList?page=2&page=1&limit=1&limit=5", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let listed: Vec<Employee> = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(listed.iter().map(|e| e.id).collect::<Vec<_>>(), vec![2]);
    }

    #[tokio::test]
    async fn null_fields_in_update_keep_stored_values() {
        let app = app().await;
        app.clone()
            .oneshot(request("POST", "/employees", r#"{"name":"Ann","designation":"QA","salary":7}"#))
            .await
            .unwrap();

        let response = app
            .oneshot(request("PUT", "/employees/1", r#"{"name":null,"salary":null}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let updated: Employee = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(updated.name, "Ann");
        assert_eq!(updated.salary, 7.0);
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let mut config = ServiceConfig::default();
        config.security.max_body_size = 64;
        let app = app_with(config).await;

        let body = format!(
            r#"{{"name":"{}","designation":"QA","salary":1}}"#,
            "x".repeat(128)
        );
        let mut oversized = request("POST", "/employees", &body);
        oversized.headers_mut().insert(
            axum::http::header::CONTENT_LENGTH,
            axum::http::HeaderValue::from(body.len()),
        );

        let response = app.clone().oneshot(oversized).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let response = app.oneshot(request("GET", "/employeeList", "")).await.unwrap();
        assert_eq!(body_text(response).await, "[]");
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = app().await.oneshot(request("GET", "/health", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
