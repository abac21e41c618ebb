//! Stateless HTTP request builder and response parser for the task API.
//!
//! # Design
//! `TaskClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip, keeping the core
//! deterministic and free of I/O dependencies.
//!
//! Mutations accept any 2xx status: the API only promises "success" for
//! create, update and delete, not a specific code or body.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTask, HealthStatus, Task, TaskId, TaskList, UpdateTask};

const TASKS_PATH: &str = "/v1/tasks";
const HEALTH_PATH: &str = "/v1/health";

/// Synchronous, stateless client for the task API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskClient {
    base_url: String,
}

impl TaskClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_tasks(&self) -> HttpRequest {
        self.without_body(HttpMethod::Get, self.collection_url())
    }

    pub fn build_get_task(&self, id: TaskId) -> HttpRequest {
        self.without_body(HttpMethod::Get, self.item_url(id))
    }

    pub fn build_create_task(&self, input: &CreateTask) -> Result<HttpRequest, ApiError> {
        self.with_json_body(HttpMethod::Post, self.collection_url(), input)
    }

    pub fn build_update_task(&self, id: TaskId, input: &UpdateTask) -> Result<HttpRequest, ApiError> {
        self.with_json_body(HttpMethod::Put, self.item_url(id), input)
    }

    pub fn build_delete_task(&self, id: TaskId) -> HttpRequest {
        self.without_body(HttpMethod::Delete, self.item_url(id))
    }

    pub fn build_health(&self) -> HttpRequest {
        self.without_body(HttpMethod::Get, format!("{}{HEALTH_PATH}", self.base_url))
    }

    pub fn parse_list_tasks(&self, response: HttpResponse) -> Result<Vec<Task>, ApiError> {
        check_success(&response)?;
        let list: TaskList = decode(&response.body)?;
        Ok(list.tasks)
    }

    pub fn parse_get_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        check_success(&response)?;
        decode(&response.body)
    }

    /// Returns the created task when the server echoes it back, `None` when
    /// the success response carries no body.
    pub fn parse_create_task(&self, response: HttpResponse) -> Result<Option<Task>, ApiError> {
        check_success(&response)?;
        if response.body.trim().is_empty() {
            return Ok(None);
        }
        decode(&response.body).map(Some)
    }

    pub fn parse_update_task(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_success(&response)
    }

    pub fn parse_delete_task(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_success(&response)
    }

    pub fn parse_health(&self, response: HttpResponse) -> Result<HealthStatus, ApiError> {
        check_success(&response)?;
        decode(&response.body)
    }

    fn collection_url(&self) -> String {
        format!("{}{TASKS_PATH}", self.base_url)
    }

    fn item_url(&self, id: TaskId) -> String {
        format!("{}{TASKS_PATH}/{id}", self.base_url)
    }

    fn without_body(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            path,
            headers: Vec::new(),
            body: None,
        }
    }

    fn with_json_body<T: Serialize>(
        &self,
        method: HttpMethod,
        path: String,
        input: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_success(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
