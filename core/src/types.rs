//! Wire DTOs for the todo collection service.
//!
//! # Design
//! These types mirror the server's JSON schema but are defined independently
//! of the mock-server crate; integration tests catch any schema drift. Ids are
//! opaque: the service may hand out strings (UUIDs) or integers, and the
//! client only ever echoes them back in a path segment.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Server-assigned identifier of a todo item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TodoId {
    Number(i64),
    Text(String),
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodoId::Number(n) => write!(f, "{n}"),
            TodoId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for TodoId {
    fn from(s: &str) -> Self {
        TodoId::Text(s.to_string())
    }
}

impl From<i64> for TodoId {
    fn from(n: i64) -> Self {
        TodoId::Number(n)
    }
}

/// A single todo item as returned by the service. Extra fields sent by the
/// server (such as the owning username) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub done: bool,
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub done: bool,
}

impl CreateTodo {
    /// A new, not yet done item. The title is trimmed and must not be blank.
    pub fn new(title: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            title: normalize_title(title)?,
            done: false,
        })
    }
}

/// Body of a successful create. Servers answer with either the new item or
/// the whole collection; the client refreshes afterwards in both cases.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Created {
    Item(Todo),
    Collection(Vec<Todo>),
}

/// Request payload for renaming a todo. The done flag is never sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTitle {
    pub title: String,
}

impl UpdateTitle {
    pub fn new(title: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            title: normalize_title(title)?,
        })
    }
}

/// Body of both `/api/login` and `/api/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Trim a title, rejecting titles that are empty once trimmed.
pub fn normalize_title(title: &str) -> Result<String, ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}
