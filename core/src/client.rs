//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only the API base URL and carries no mutable state
//! between calls. Each endpoint is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! A `Transport` executes the round-trip in between, keeping this half
//! deterministic and free of I/O.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    CreateTodo, DataEnvelope, PageEnvelope, PageQuery, StatusFilter, Todo, TodoId, TodoPage,
    UpdateTodo,
};

/// Path under the server root where the todo resource lives.
pub const API_PATH: &str = "/api/todos";

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    /// `base_url` is the full resource URL, e.g. `http://host/api/todos`.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Client for a server root; appends [`API_PATH`].
    pub fn for_server(server_url: &str) -> Self {
        Self::new(&format!("{}{API_PATH}", server_url.trim_end_matches('/')))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_todos(&self, status: Option<StatusFilter>) -> HttpRequest {
        let mut req = self.request(HttpMethod::Get, String::new());
        if let Some(status) = status {
            req.query.push(("status".to_string(), status.to_string()));
        }
        req
    }

    pub fn build_todo_stats(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/stats".to_string())
    }

    pub fn build_paginated_todos(&self, query: PageQuery) -> HttpRequest {
        let mut req = self.request(HttpMethod::Get, "/paginated".to_string());
        req.query.push(("page".to_string(), query.page.to_string()));
        req.query.push(("limit".to_string(), query.limit.to_string()));
        if let Some(status) = query.status {
            req.query.push(("status".to_string(), status.to_string()));
        }
        req
    }

    pub fn build_get_todo(&self, id: TodoId) -> HttpRequest {
        self.request(HttpMethod::Get, format!("/{id}"))
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, String::new(), input)
    }

    pub fn build_update_todo(
        &self,
        id: TodoId,
        input: &UpdateTodo,
    ) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Put, format!("/{id}"), input)
    }

    pub fn build_delete_todo(&self, id: TodoId) -> HttpRequest {
        self.request(HttpMethod::Delete, format!("/{id}"))
    }

    pub fn build_toggle_todo(&self, id: TodoId) -> HttpRequest {
        self.request(HttpMethod::Patch, format!("/{id}/toggle"))
    }

    pub fn build_test_connection(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/test".to_string())
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        parse_data(response)
    }

    pub fn parse_todo_stats(&self, response: HttpResponse) -> Result<serde_json::Value, ApiError> {
        parse_body(response)
    }

    pub fn parse_paginated_todos(&self, response: HttpResponse) -> Result<TodoPage, ApiError> {
        let envelope: PageEnvelope = parse_body(response)?;
        Ok(TodoPage {
            todos: envelope.data,
            pagination: envelope.pagination,
        })
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_data(response)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_data(response)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_data(response)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_toggle_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_data(response)
    }

    pub fn parse_test_connection(
        &self,
        response: HttpResponse,
    ) -> Result<serde_json::Value, ApiError> {
        parse_body(response)
    }

    fn request(&self, method: HttpMethod, suffix: String) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}{suffix}", self.base_url),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    fn json_request<T: Serialize>(
        &self,
        method: HttpMethod,
        suffix: String,
        input: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let mut req = self.request(method, suffix);
        req.headers
            .push(("content-type".to_string(), "application/json".to_string()));
        req.body = Some(body);
        Ok(req)
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
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

fn parse_body<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

fn parse_data<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    parse_body::<DataEnvelope<T>>(response).map(|envelope| envelope.data)
}
