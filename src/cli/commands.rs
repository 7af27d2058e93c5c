//! CLI command implementations
//!
//! Each command loads the configuration, opens the database (creating the
//! tables when needed) and runs on its own tokio runtime.

use std::fs;
use std::future::Future;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability;
use crate::rest_api::{PagePolicy, TriviaHandler};
use crate::store::Store;

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// SQLite connection URL (default "sqlite://trivia.db")
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Upper bound on pooled connections (default 5)
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Listing behaviour for pages that run past the end (default "strict")
    #[serde(default)]
    pub page_policy: PagePolicy,

    #[serde(default)]
    pub http: HttpServerConfig,
}

fn default_database_url() -> String {
    "sqlite://trivia.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            max_connections: default_max_connections(),
            page_policy: PagePolicy::default(),
            http: HttpServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file.
    ///
    /// A missing file yields the defaults; an unreadable or invalid one is an error.
    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            CliError::io_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.database_url.trim().is_empty() {
            return Err(CliError::config_error("database_url must not be empty"));
        }

        if self.max_connections == 0 {
            return Err(CliError::config_error("max_connections must be > 0"));
        }

        Ok(())
    }
}

/// Main CLI entry point
///
/// Parses arguments, installs logging and dispatches to the command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();

    observability::init_logging()
        .map_err(|e| CliError::boot_failed(format!("Failed to initialise logging: {}", e)))?;

    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config, seed } => init(&config, seed),
        Command::Seed { config } => seed(&config),
        Command::Serve { config, port } => serve(&config, port),
    }
}

/// Create the database file and tables, optionally loading sample data
pub fn init(config_path: &Path, with_sample_data: bool) -> CliResult<()> {
    let config = Config::load(config_path)?;

    block_on(async {
        let store = open_store(&config).await?;
        tracing::info!(url = %config.database_url, "database initialised");

        let result = if with_sample_data {
            load_sample_data(&store).await
        } else {
            Ok(())
        };

        store.close().await;
        result
    })
}

/// Load sample data into an empty database
pub fn seed(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;

    block_on(async {
        let store = open_store(&config).await?;
        let result = load_sample_data(&store).await;
        store.close().await;
        result
    })
}

/// Start the HTTP API and serve until interrupted
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = Config::load(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    block_on(async {
        let store = open_store(&config).await?;
        let handler = TriviaHandler::new(store.clone(), config.page_policy);
        let server = HttpServer::with_config(config.http.clone(), handler);

        tracing::info!(
            addr = %server.socket_addr(),
            page_policy = ?config.page_policy,
            "starting trivia API"
        );

        let result = server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)));

        store.close().await;
        result
    })
}

async fn open_store(config: &Config) -> CliResult<Store> {
    let store = Store::connect(&config.database_url, config.max_connections).await?;
    store.ensure_schema().await?;
    Ok(store)
}

async fn load_sample_data(store: &Store) -> CliResult<()> {
    let mut session = store.session().await?;
    if !session.seed_sample_data().await? {
        tracing::info!("database already has categories, sample data not loaded");
    }
    Ok(())
}

fn block_on<F>(future: F) -> CliResult<()>
where
    F: Future<Output = CliResult<()>>,
{
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;
    rt.block_on(future)
}
