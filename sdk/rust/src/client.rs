use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Http(err) => err.status(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub designation: String,
    pub salary: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewEmployee {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub designation: String,
    pub salary: f64,
}

impl NewEmployee {
    pub fn new(name: &str, designation: &str, salary: f64) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            designation: designation.to_string(),
            salary,
        }
    }
}

/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmployeePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
}

#[derive(Deserialize)]
struct Message {
    message: String,
}

pub struct EmployeeClient {
    client: Client,
    base_url: String,
}

impl EmployeeClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn create(&self, employee: &NewEmployee) -> Result<Employee, ClientError> {
        self.send(self.client.post(format!("{}/employees", self.base_url)).json(employee))
            .await
    }

    pub async fn get(&self, id: i64) -> Result<Employee, ClientError> {
        self.send(self.client.get(format!("{}/employees/{}", self.base_url, id)))
            .await
    }

    pub async fn list(&self, page: i64, limit: i64) -> Result<Vec<Employee>, ClientError> {
        self.send(
            self.client
                .get(format!("{}/employeeList", self.base_url))
                .query(&[("page", page), ("limit", limit)]),
        )
        .await
    }

    pub async fn update(&self, id: i64, patch: &EmployeePatch) -> Result<Employee, ClientError> {
        self.send(
            self.client
                .put(format!("{}/employees/{}", self.base_url, id))
                .json(patch),
        )
        .await
    }

    /// Returns the service's confirmation message.
    pub async fn delete(&self, id: i64) -> Result<String, ClientError> {
        let msg: Message = self
            .send(self.client.delete(format!("{}/employees/{}", self.base_url, id)))
            .await?;
        Ok(msg.message)
    }

    pub async fn health(&self) -> Result<serde_json::Value, ClientError> {
        self.send(self.client.get(format!("{}/health", self.base_url)))
            .await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }
        Ok(resp.json().await?)
    }
}
