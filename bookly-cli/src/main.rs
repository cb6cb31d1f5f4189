//! Bookly CLI - Command-line interface for the Bookly client
//!
//! Provides sign-in/sign-out against the Bookly API with a session that
//! persists across invocations, mirroring how an app shell would embed the
//! session manager.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use bookly_core::{
    init_logging, log_operation_error, BooklyConfig, BooklyError, BooklyResult, Credentials,
    LoggingConfig,
};

use bookly_auth::{ApiClientConfig, FileKeyValueStore, HttpAuthClient, SessionManager};

#[derive(Parser)]
#[command(name = "bookly")]
#[command(about = "Command-line client for the Bookly booking service")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and persist the session
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },

    /// Sign out and remove the persisted session
    Logout,

    /// Show the currently signed-in user
    Whoami,

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Initialize default configuration
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> BooklyResult<()> {
    let cli = Cli::parse();

    // Initialize logging with unified system
    let mut logging_config = LoggingConfig::default();
    if cli.verbose {
        logging_config.level = "debug".to_string();
    }

    init_logging(&logging_config).map_err(|e| BooklyError::Config {
        message: format!("Failed to initialize logging: {}", e),
        source: Some(e),
        context: bookly_core::ErrorContext::new("cli")
            .with_operation("init_logging")
            .with_suggestion("Check logging configuration"),
    })?;

    info!("Starting Bookly CLI v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = load_config(cli.config.as_ref())?;

    // Execute command
    match cli.command {
        Commands::Login { email, password } => {
            let manager = build_session_manager(&config).await?;

            if let Some(user) = manager.current_user().await {
                println!("Already signed in as {} <{}>", user.name, user.email);
                println!("Run 'bookly logout' first to switch accounts.");
                return Ok(());
            }

            manager
                .sign_in(&Credentials::new(email, password))
                .await
                .map_err(|e| {
                    log_operation_error!("login", e);
                    e
                })?;

            let user = manager.current_user().await.ok_or_else(|| {
                BooklyError::Internal {
                    message: "Sign-in succeeded but no session is present".to_string(),
                    source: None,
                    context: bookly_core::ErrorContext::new("cli").with_operation("login"),
                }
            })?;

            println!("Signed in as {} <{}>", user.name, user.email);
        }

        Commands::Logout => {
            let manager = build_session_manager(&config).await?;

            if manager.current_user().await.is_none() {
                println!("Not signed in.");
                return Ok(());
            }

            manager.sign_out().await.map_err(|e| {
                log_operation_error!("logout", e);
                e
            })?;

            println!("Signed out.");
        }

        Commands::Whoami => {
            let manager = build_session_manager(&config).await?;

            match manager.current_user().await {
                Some(user) => {
                    println!("{} <{}>", user.name, user.email);
                    if let Some(avatar_url) = user.avatar_url {
                        println!("Avatar: {}", avatar_url);
                    }
                }
                None => println!("Not signed in."),
            }
        }

        Commands::Config { show, init } => {
            if init {
                let path = config_write_path(cli.config.as_ref())?;
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent).map_err(BooklyError::Io)?;
                }
                config.save_to_file(&path)?;
                println!("Configuration written to {}", path.display());
            }

            if show || !init {
                let content = toml::to_string_pretty(&config).map_err(|e| BooklyError::Config {
                    message: format!("Failed to render config: {}", e),
                    source: Some(Box::new(e)),
                    context: bookly_core::ErrorContext::new("cli").with_operation("show_config"),
                })?;
                println!("{}", content);
            }
        }
    }

    Ok(())
}

/// Load configuration from the given path, the default location, or defaults
fn load_config(path: Option<&PathBuf>) -> BooklyResult<BooklyConfig> {
    let config = if let Some(path) = path {
        BooklyConfig::from_file(path)?
    } else {
        let default_path = default_config_path()?;
        if default_path.exists() {
            BooklyConfig::from_file(&default_path)?
        } else {
            BooklyConfig::default()
        }
    };

    config.validate()?;
    Ok(config)
}

/// Where `config --init` writes: the explicit `--config` path when given,
/// otherwise the default location `load_config` reads from
fn config_write_path(explicit: Option<&PathBuf>) -> BooklyResult<PathBuf> {
    match explicit {
        Some(path) => Ok(path.clone()),
        None => default_config_path(),
    }
}

fn default_config_path() -> BooklyResult<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| BooklyError::Config {
        message: "Could not determine configuration directory".to_string(),
        source: None,
        context: bookly_core::ErrorContext::new("cli")
            .with_operation("default_config_path")
            .with_suggestion("Pass --config with an explicit path"),
    })?;

    Ok(base.join("bookly").join("config.toml"))
}

/// Resolve a configured directory, expanding a leading "~"
fn resolve_dir(dir: &str) -> PathBuf {
    if let Some(rest) = dir.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    Path::new(dir).to_path_buf()
}

/// Construct the session manager from configuration and hydrate it
///
/// The manager must exist before any command touches session state; commands
/// receive it explicitly rather than looking it up ambiently.
async fn build_session_manager(config: &BooklyConfig) -> BooklyResult<SessionManager> {
    let api = HttpAuthClient::new(ApiClientConfig::from_core(&config.api))?;
    let store = FileKeyValueStore::new(resolve_dir(&config.storage.data_dir))?;

    let manager = SessionManager::new(
        Arc::new(api),
        Arc::new(store),
        &config.storage.namespace,
    );

    manager.hydrate().await?;

    Ok(manager)
}
