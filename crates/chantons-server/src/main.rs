use anyhow::{Context, Result};
use chantons_acquire::{CatalogueConfig, SessionClient};
use chantons_server::{build_router, AppState, CatalogueService};
use clap::{Parser, Subcommand};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "chantons")]
#[command(about = "Church-song catalogue search and lyrics API")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long, global = true)]
    utc: bool,

    /// Catalogue site root
    #[arg(
        long,
        global = true,
        env = "CHANTONS_BASE_URL",
        default_value = chantons_acquire::config::DEFAULT_BASE_URL
    )]
    base_url: String,

    /// User-Agent sent to the catalogue
    #[arg(
        long,
        global = true,
        env = "CHANTONS_USER_AGENT",
        default_value = chantons_acquire::config::DEFAULT_USER_AGENT
    )]
    user_agent: String,

    /// Deadline for each catalogue request, in seconds
    #[arg(
        long,
        global = true,
        env = "CHANTONS_TIMEOUT_SECS",
        default_value_t = chantons_acquire::config::DEFAULT_TIMEOUT_SECS
    )]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the JSON API
    Serve {
        /// Address to listen on
        #[arg(short, long, env = "CHANTONS_BIND", default_value = "127.0.0.1:3000")]
        bind: String,
    },

    /// Search the catalogue by title and print the results as JSON
    Search {
        /// Title fragment
        query: String,
    },

    /// Fetch one song and print its segmented lyrics as JSON
    Show {
        /// Catalogue identifier (as returned by `search`)
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Map log level, suppressing noisy HTML-parsing crates at debug/trace
    let level = match cli.log_level {
        LogLevel::Error => "error",
        LogLevel::Warn  => "warn",
        LogLevel::Info  => "info",
        LogLevel::Debug => "debug,selectors=warn,html5ever=warn",
        LogLevel::Trace => "trace,selectors=warn,html5ever=warn",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamp format: 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    if cli.utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format.to_string()))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
            .init();
    }

    let config = CatalogueConfig {
        base_url: cli.base_url,
        user_agent: cli.user_agent,
        timeout: Duration::from_secs(cli.timeout_secs),
    };
    let session = SessionClient::connect(config).context("Failed to build catalogue session")?;
    let catalogue = CatalogueService::new(session);

    match cli.command {
        Commands::Serve { bind } => {
            let app = build_router(AppState::new(catalogue));
            let listener = tokio::net::TcpListener::bind(&bind)
                .await
                .with_context(|| format!("Failed to bind {bind}"))?;
            tracing::info!(bind = %bind, "Catalogue API listening");

            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
        }
        Commands::Search { query } => {
            tracing::info!(query = %query, "Searching catalogue");
            let results = catalogue.search_songs(Some(&query)).await?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Commands::Show { id } => {
            tracing::info!(id = %id, "Fetching song");
            let song = catalogue.get_song(&id).await?;
            println!("{}", serde_json::to_string_pretty(&song)?);
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "Could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
