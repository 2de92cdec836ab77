//! The todo list client: local state synchronized with the remote collection.
//!
//! # Design
//! `TodoApp` owns the client state, the request builder, a [`Transport`] and
//! a [`CredentialStore`]. Every mutation is one remote call followed, only on
//! confirmed success, by a full `refresh()` that replaces `items` wholesale.
//! All operations take `&mut self`, so a mutation and its refresh complete
//! before the next action can start and the rendered list always reflects
//! the latest confirmed action.
//!
//! Failures never poison the app: `items` is left as it was, the error is
//! returned to the caller and kept as the current [`Notice`] until the next
//! successful operation.

use tracing::{debug, warn};

use crate::client::TodoClient;
use crate::config::{AuthMode, ClientConfig};
use crate::credentials::CredentialStore;
use crate::error::{ApiError, AuthError, ValidationError};
use crate::filter::Filter;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::state::ClientState;
use crate::types::{CreateTodo, Created, Credentials, TodoId, UpdateTitle};
use crate::view::{render, ListView, Notice};

pub struct TodoApp<T, S> {
    client: TodoClient,
    transport: T,
    credentials: S,
    auth: AuthMode,
    state: ClientState,
    notice: Option<Notice>,
}

impl<T: Transport, S: CredentialStore> TodoApp<T, S> {
    pub fn new(config: &ClientConfig, transport: T, credentials: S) -> Self {
        let mut client = TodoClient::new(&config.base_url);
        if config.auth == AuthMode::Bearer {
            client.set_token(credentials.load());
        }
        Self {
            client,
            transport,
            credentials,
            auth: config.auth,
            state: ClientState::new(),
            notice: None,
        }
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn auth_mode(&self) -> AuthMode {
        self.auth
    }

    /// Whether a login is needed before collection operations can run.
    pub fn needs_login(&self) -> bool {
        self.auth == AuthMode::Bearer && self.client.token().is_none()
    }

    /// Initial load. In the authenticated variant a missing credential fails
    /// with `AuthError::MissingCredential` before anything is fetched.
    pub fn start(&mut self) -> Result<(), ApiError> {
        self.refresh()
    }

    pub fn refresh(&mut self) -> Result<(), ApiError> {
        self.require_credential()?;
        let request = self.client.build_list_todos();
        let items = self.call(request, TodoClient::parse_list_todos)?;
        debug!(count = items.len(), "collection refreshed");
        self.state.replace_items(items);
        self.notice = None;
        Ok(())
    }

    pub fn create(&mut self, title: &str) -> Result<(), ApiError> {
        let input = CreateTodo::new(title).map_err(|e| self.fail(e.into()))?;
        self.require_credential()?;
        let request = self
            .client
            .build_create_todo(&input)
            .map_err(|e| self.fail(e))?;
        match self.call(request, TodoClient::parse_create_todo)? {
            Created::Item(todo) => debug!(id = %todo.id, "todo created"),
            Created::Collection(todos) => debug!(count = todos.len(), "todo created"),
        }
        self.refresh()
    }

    /// Ask the server to flip the done flag. The local copy is not touched;
    /// the new state arrives with the following refresh.
    pub fn toggle(&mut self, id: &TodoId) -> Result<(), ApiError> {
        self.require_credential()?;
        let request = self.client.build_toggle_todo(id);
        let updated = self.call(request, TodoClient::parse_toggle_todo)?;
        debug!(id = %updated.id, done = updated.done, "todo toggled");
        self.refresh()
    }

    pub fn remove(&mut self, id: &TodoId) -> Result<(), ApiError> {
        self.require_credential()?;
        let request = self.client.build_delete_todo(id);
        self.call(request, TodoClient::parse_delete_todo)?;
        debug!(%id, "todo deleted");
        self.refresh()
    }

    /// Rename an item. Blank titles are rejected without a request, and a
    /// title identical to the current one is a no-op.
    pub fn edit(&mut self, id: &TodoId, new_title: &str) -> Result<(), ApiError> {
        let input = UpdateTitle::new(new_title).map_err(|e| self.fail(e.into()))?;
        if self.state.get(id).is_some_and(|t| t.title == input.title) {
            debug!(%id, "title unchanged, skipping update");
            return Ok(());
        }
        self.require_credential()?;
        let request = self
            .client
            .build_update_title(id, &input)
            .map_err(|e| self.fail(e))?;
        self.call(request, TodoClient::parse_update_title)?;
        debug!(%id, "todo renamed");
        self.refresh()
    }

    /// Change the view filter. Purely local; unknown values are rejected and
    /// leave the current filter in place.
    pub fn set_filter(&mut self, value: &str) -> Result<Filter, ApiError> {
        let filter: Filter = value.parse().map_err(|e: ValidationError| self.fail(e.into()))?;
        self.state.set_filter(filter);
        self.notice = None;
        Ok(filter)
    }

    pub fn render(&self) -> ListView {
        render(&self.state, self.notice.as_ref())
    }

    /// Exchange username and password for a token and keep it for later
    /// requests.
    pub fn login(&mut self, username: &str, password: &str) -> Result<(), ApiError> {
        let input = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        let request = self.client.build_login(&input).map_err(|e| self.fail(e))?;
        let token = self.call(request, TodoClient::parse_login)?;
        self.credentials.store(&token);
        self.client.set_token(Some(token));
        self.notice = Some(Notice::info(format!("logged in as {username}")));
        debug!(username, "logged in");
        Ok(())
    }

    pub fn register(&mut self, username: &str, password: &str) -> Result<(), ApiError> {
        let input = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        let request = self
            .client
            .build_register(&input)
            .map_err(|e| self.fail(e))?;
        self.call(request, TodoClient::parse_register)?;
        self.notice = Some(Notice::info(format!("registered {username}")));
        Ok(())
    }

    /// Forget the credential and the mirrored collection.
    pub fn logout(&mut self) {
        self.credentials.clear();
        self.client.set_token(None);
        self.state.clear_items();
        self.notice = None;
    }

    fn require_credential(&mut self) -> Result<(), ApiError> {
        if !self.needs_login() {
            return Ok(());
        }
        match self.credentials.load() {
            Some(token) => {
                self.client.set_token(Some(token));
                Ok(())
            }
            None => Err(self.fail(AuthError::MissingCredential.into())),
        }
    }

    /// Execute one request and parse its response, recording any failure.
    fn call<R>(
        &mut self,
        request: HttpRequest,
        parse: impl FnOnce(&TodoClient, HttpResponse) -> Result<R, ApiError>,
    ) -> Result<R, ApiError> {
        debug!(method = %request.method, path = %request.path, "sending request");
        let result = self
            .transport
            .execute(request)
            .and_then(|response| parse(&self.client, response));
        result.map_err(|err| {
            if matches!(err, ApiError::Auth(AuthError::Rejected)) && self.auth == AuthMode::Bearer {
                self.credentials.clear();
                self.client.set_token(None);
            }
            self.fail(err)
        })
    }

    fn fail(&mut self, err: ApiError) -> ApiError {
        if err.is_remote() {
            warn!(error = %err, "request failed");
        } else {
            debug!(error = %err, "operation rejected");
        }
        self.notice = Some(Notice::error(err.to_string()));
        err
    }
}
