//! Client core for the todo list service.
//!
//! # Overview
//! Mirrors a remote todo collection locally, renders it through a filter and
//! turns user actions into remote mutations followed by a full refresh. The
//! core never touches the network itself (host-does-IO pattern): requests are
//! built as plain data and executed by a host-provided [`Transport`].
//!
//! # Design
//! - `TodoClient` builds `HttpRequest`s and parses `HttpResponse`s; it holds
//!   only the base URL and the optional bearer token.
//! - `TodoApp` owns `ClientState` (items + filter) and sequences every
//!   mutation with its refresh through `&mut self`.
//! - `render` is a pure projection of state into a `ListView`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod app;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod filter;
pub mod http;
pub mod state;
pub mod types;
pub mod view;

pub use app::TodoApp;
pub use client::TodoClient;
pub use config::{AuthMode, ClientConfig};
pub use credentials::{CredentialStore, MemoryCredentialStore};
pub use error::{ApiError, AuthError, ValidationError};
pub use filter::Filter;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use state::ClientState;
pub use types::{CreateTodo, Created, Credentials, Todo, TodoId, UpdateTitle};
pub use view::{render, ListView, Notice, NoticeKind, ToggleLabel, TodoRow};
