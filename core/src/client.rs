//! HTTP request builder and response parser for the todo service.
//!
//! # Design
//! `TodoClient` holds the `base_url` and, in the authenticated variant, the
//! bearer token to attach. It never performs I/O: each operation is split
//! into a `build_*` method that produces an `HttpRequest` and a `parse_*`
//! method that consumes an `HttpResponse`. The caller executes the round-trip
//! in between.

use std::collections::HashSet;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ApiError, AuthError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, Created, Credentials, LoginResponse, Todo, TodoId, UpdateTitle};

/// Characters escaped when an id is placed into a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Synchronous client for the todo service.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
    token: Option<String>,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.set_token(Some(token.to_string()));
        self
    }

    /// Replace the bearer token sent with collection requests. `None`
    /// switches back to unauthenticated requests.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/todos".to_string(), None)
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        let body = to_json(input)?;
        Ok(self.request(HttpMethod::Post, "/todos".to_string(), Some(body)))
    }

    pub fn build_toggle_todo(&self, id: &TodoId) -> HttpRequest {
        self.request(HttpMethod::Post, format!("{}/toggle", item_path(id)), None)
    }

    pub fn build_update_title(&self, id: &TodoId, input: &UpdateTitle) -> Result<HttpRequest, ApiError> {
        let body = to_json(input)?;
        Ok(self.request(HttpMethod::Put, item_path(id), Some(body)))
    }

    pub fn build_delete_todo(&self, id: &TodoId) -> HttpRequest {
        self.request(HttpMethod::Delete, item_path(id), None)
    }

    pub fn build_login(&self, input: &Credentials) -> Result<HttpRequest, ApiError> {
        let body = to_json(input)?;
        Ok(self.public_request(HttpMethod::Post, "/api/login", body))
    }

    pub fn build_register(&self, input: &Credentials) -> Result<HttpRequest, ApiError> {
        let body = to_json(input)?;
        Ok(self.public_request(HttpMethod::Post, "/api/register", body))
    }

    /// Parse a list response. Besides well-formed JSON, every id must be
    /// unique within the collection. A `null` body is an empty collection.
    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response)?;
        let todos: Option<Vec<Todo>> = from_json(&response.body)?;
        let todos = todos.unwrap_or_default();
        let mut seen = HashSet::with_capacity(todos.len());
        for todo in &todos {
            if !seen.insert(&todo.id) {
                return Err(ApiError::Data(format!("duplicate id {}", todo.id)));
            }
        }
        Ok(todos)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Created, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_toggle_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_update_title(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)?;
        Ok(())
    }

    pub fn parse_login(&self, response: HttpResponse) -> Result<String, ApiError> {
        check_status(&response)?;
        let LoginResponse { token } = from_json(&response.body)?;
        if token.is_empty() {
            return Err(ApiError::Data("empty token".to_string()));
        }
        Ok(token)
    }

    pub fn parse_register(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)?;
        Ok(())
    }

    fn request(&self, method: HttpMethod, path: String, body: Option<String>) -> HttpRequest {
        let mut headers = Vec::new();
        if let Some(token) = &self.token {
            headers.push(("authorization".to_string(), format!("Bearer {token}")));
        }
        if body.is_some() {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers,
            body,
        }
    }

    /// Requests that never carry the bearer token.
    fn public_request(&self, method: HttpMethod, path: &str, body: String) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        }
    }
}

fn item_path(id: &TodoId) -> String {
    let segment = id.to_string();
    format!("/todos/{}", utf8_percent_encode(&segment, PATH_SEGMENT))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn from_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Data(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    match response.status {
        401 | 403 => Err(AuthError::Rejected.into()),
        404 => Err(ApiError::NotFound),
        status => Err(ApiError::Server {
            status,
            body: response.body.clone(),
        }),
    }
}
