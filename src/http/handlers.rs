//! Route handlers for the employee endpoints.
//!
//! Each handler parses its inputs, makes exactly one call on
//! [`EmployeeApi`](crate::api::EmployeeApi) and maps the result to a status.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::http::request::{decode_json, parse_employee_id, ListParams};
use crate::http::response::{bad_request, DELETED_MESSAGE, INVALID_ID_MESSAGE};
use crate::http::server::AppState;
use crate::store::EmployeePayload;

/// `POST /employees`
pub async fn create_employee(State(state): State<AppState>, body: Bytes) -> Response {
    let payload: EmployeePayload = match decode_json(&body) {
        Ok(payload) => payload,
        Err(err) => return bad_request(err.to_string()),
    };

    match state.api.create(payload).await {
        Ok(employee) => {
            tracing::info!(employee_id = employee.id, "Employee created");
            (StatusCode::CREATED, Json(employee)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

/// `GET /employees/{id}`
pub async fn read_employee(State(state): State<AppState>, Path(raw_id): Path<String>) -> Response {
    let Some(id) = parse_employee_id(&raw_id) else {
        return bad_request(INVALID_ID_MESSAGE);
    };

    match state.api.read(id).await {
        Ok(employee) => Json(employee).into_response(),
        Err(err) => err.into_response(),
    }
}

/// `GET /employeeList?page=&limit=`
pub async fn list_employees(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let page = ListParams::from_pairs(&pairs).to_page(&state.pagination);

    match state.api.read_list(page).await {
        Ok(employees) => Json(employees).into_response(),
        Err(err) => err.into_response(),
    }
}

/// `PUT /employees/{id}`
pub async fn update_employee(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Response {
    let Some(id) = parse_employee_id(&raw_id) else {
        return bad_request(INVALID_ID_MESSAGE);
    };
    let patch: EmployeePayload = match decode_json(&body) {
        Ok(patch) => patch,
        Err(err) => return bad_request(err.to_string()),
    };

    match state.api.update(id, patch).await {
        Ok(employee) => {
            tracing::info!(employee_id = id, "Employee updated");
            Json(employee).into_response()
        }
        Err(err) => err.into_response(),
    }
}

/// `DELETE /employees/{id}`
pub async fn delete_employee(State(state): State<AppState>, Path(raw_id): Path<String>) -> Response {
    let Some(id) = parse_employee_id(&raw_id) else {
        return bad_request(INVALID_ID_MESSAGE);
    };

    match state.api.delete(id).await {
        Ok(()) => {
            tracing::info!(employee_id = id, "Employee deleted");
            Json(json!({ "message": DELETED_MESSAGE })).into_response()
        }
        Err(err) => err.into_response(),
    }
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Response {
    match state.api.health().await {
        Ok(()) => Json(json!({ "status": "ok" })).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable", "error": err.to_string() })),
            )
                .into_response()
        }
    }
}
