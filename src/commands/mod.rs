pub mod alerts;
pub mod chat;
pub mod library;

use crate::alerts::AlertBucket;
use crate::api::{ApiClient, ApiError};
use crate::config::ConfigError;
use crate::library::Category;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "contrackt", version, about = "Ask questions about your contracts")]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./contrackt.toml when present)
    #[arg(long, global = true, env = "CONTRACKT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive chat session
    Chat {
        #[command(flatten)]
        scope: ScopeArgs,
    },
    /// Ask a single question and print the answer
    Ask {
        query: String,
        #[command(flatten)]
        scope: ScopeArgs,
        /// Print the answer message as JSON
        #[arg(long)]
        json: bool,
    },
    /// List documents in the library
    Documents {
        #[arg(long, default_value = "all")]
        category: Category,
    },
    /// Upload a PDF contract
    Upload {
        path: PathBuf,
        /// Defaults to `general`
        #[arg(long)]
        category: Option<Category>,
    },
    /// Show expiring contracts
    Alerts {
        /// `critical` or `reminder`; all alerts when omitted
        #[arg(long)]
        bucket: Option<AlertBucket>,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct ScopeArgs {
    /// Restrict the search to one category
    #[arg(long, default_value = "all")]
    pub category: Category,

    /// Restrict the search to these document ids (overrides --category)
    #[arg(long = "doc", value_name = "ID")]
    pub docs: Vec<i64>,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("query is empty")]
    EmptyQuery,
}

pub async fn dispatch(command: Command, client: &ApiClient) -> Result<(), CliError> {
    match command {
        Command::Chat { scope } => chat::interactive(client, &scope).await,
        Command::Ask { query, scope, json } => chat::ask(client, &query, &scope, json).await,
        Command::Documents { category } => library::list(client, category).await,
        Command::Upload { path, category } => library::upload(client, &path, category).await,
        Command::Alerts { bucket } => alerts::list(client, bucket).await,
    }
}

/// Transient notification; never part of the transcript.
pub(crate) fn toast(message: &str) {
    eprintln!("* {}", message);
}
