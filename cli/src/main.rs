use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use todo_cli::{Args, FileCredentialStore, Session, UreqTransport};
use todo_core::TodoApp;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = args.client_config();
    info!(base_url = %config.base_url, auth = %config.auth, "starting todo client");

    let transport = UreqTransport::new(config.timeout);
    let credentials = FileCredentialStore::new(args.token_path());
    let app = TodoApp::new(&config, transport, credentials);

    let stdin = io::stdin();
    let mut session = Session::new(app, stdin.lock(), io::stdout());
    session.run().context("terminal I/O failed")
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .init();
}
