//! Storage for the bearer token of the authenticated variant.

/// Where the client keeps its credential between runs.
///
/// Stores are best-effort: a store that cannot persist should log and carry
/// on, the user will simply be asked to log in again.
pub trait CredentialStore {
    fn load(&self) -> Option<String>;
    fn store(&mut self, token: &str);
    fn clear(&mut self);
}

/// Keeps the token for the lifetime of the process only.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    token: Option<String>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Option<String> {
        self.token.clone()
    }

    fn store(&mut self, token: &str) {
        self.token = Some(token.to_string());
    }

    fn clear(&mut self) {
        self.token = None;
    }
}

impl<S: CredentialStore + ?Sized> CredentialStore for &mut S {
    fn load(&self) -> Option<String> {
        (**self).load()
    }

    fn store(&mut self, token: &str) {
        (**self).store(token)
    }

    fn clear(&mut self) {
        (**self).clear()
    }
}
