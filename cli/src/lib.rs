//! Terminal front-end for the todo list client.
//!
//! Hosts `todo_core::TodoApp`: executes its requests with ureq, keeps the
//! bearer token in a file and maps typed commands onto the core operations.

pub mod args;
pub mod command;
pub mod display;
pub mod session;
pub mod token_file;
pub mod transport;

pub use args::Args;
pub use session::Session;
pub use token_file::FileCredentialStore;
pub use transport::UreqTransport;
