pub mod alerts;
pub mod api;
pub mod chat;
mod commands;
pub mod config;
pub mod library;
pub mod render;

use api::ApiClient;
use config::LoggingConfig;
use tracing_subscriber::EnvFilter;

pub use commands::{Cli, CliError, Command};

pub async fn run(cli: Cli) -> Result<(), CliError> {
    let config = config::load_config(cli.config.as_deref())?;
    init_tracing(&config.logging);

    let client = ApiClient::new(config.base_url()?);
    tracing::debug!(base_url = client.base_url(), "client ready");
    commands::dispatch(cli.command, &client).await
}

/// Logs go to stderr so they never interleave with transcript output.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let _ = if logging.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
