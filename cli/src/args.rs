use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use todo_core::{AuthMode, ClientConfig};

use crate::token_file::FileCredentialStore;

/// Terminal client for a remote todo list.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Base URL of the todo service
    #[arg(long, env = "TODO_BASE_URL", default_value = todo_core::config::DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Authentication variant: `none` or `bearer`
    #[arg(long, env = "TODO_AUTH", default_value = "none")]
    pub auth: AuthMode,

    /// Per-request timeout in seconds
    #[arg(long, env = "TODO_TIMEOUT_SECS", default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,

    /// Where the bearer token is kept between runs
    #[arg(long, env = "TODO_TOKEN_FILE")]
    pub token_file: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.base_url)
            .with_auth(self.auth)
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }

    pub fn token_path(&self) -> PathBuf {
        self.token_file
            .clone()
            .unwrap_or_else(FileCredentialStore::default_path)
    }
}
