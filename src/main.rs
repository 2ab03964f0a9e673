//! hangman-ledger service binary
//!
//! Loads configuration, starts the service with its health and metrics
//! server, and stops it on SIGINT or SIGTERM.

use anyhow::{Context, Result};
use clap::Parser;
use hangman_ledger::config::{validate_config, AppConfig};
use hangman_ledger::service::{AppState, HealthCheck, HealthStatus};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

/// Scoring and ranking service for Hangman games
#[derive(Parser)]
#[command(name = "hangman-ledger", version)]
struct Args {
    /// Configuration file (TOML); the environment is used when absent
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Check service health once and exit with its status
    #[arg(long)]
    health_check: bool,

    /// Validate the configuration and exit
    #[arg(long)]
    dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Shorthand for `--log-level debug`
    #[arg(short, long)]
    debug: bool,

    /// Port of the health and metrics server
    #[arg(long, value_name = "PORT")]
    health_port: Option<u16>,

    /// Wrong guesses allowed for games started without a difficulty
    #[arg(long, value_name = "COUNT")]
    wrong_guesses_allowed: Option<u32>,
}

impl Args {
    fn load_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::from_env()?,
        };

        if let Some(level) = &self.log_level {
            config.service.log_level = level.clone();
        }
        if self.debug {
            config.service.log_level = "debug".to_string();
        }
        if let Some(port) = self.health_port {
            config.service.health_port = port;
        }
        if let Some(allowed) = self.wrong_guesses_allowed {
            config.game.wrong_guesses_allowed = allowed;
        }

        validate_config(&config)?;
        Ok(config)
    }
}

fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| level.into());
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to initialize logging")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }
}

async fn health_check(config: AppConfig) -> Result<ExitCode> {
    let health = HealthCheck::check(Arc::new(AppState::new(config)?)).await?;
    println!(
        "{}: {} users, {} active games, {} completed games",
        health.status,
        health.stats.users,
        health.stats.active_games,
        health.stats.completed_games
    );
    Ok(match health.status {
        HealthStatus::Healthy => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

async fn serve(config: AppConfig) -> Result<()> {
    let shutdown_timeout = config.shutdown_timeout();
    let app_state = Arc::new(AppState::new(config)?);
    app_state.start().await?;

    info!("hangman-ledger is running");
    shutdown_signal().await;

    match tokio::time::timeout(shutdown_timeout, app_state.stop()).await {
        Ok(result) => result?,
        Err(_) => warn!("Shutdown timed out after {:?}", shutdown_timeout),
    }
    info!("hangman-ledger stopped");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("{:#}", e);
        return ExitCode::FAILURE;
    }

    info!(
        service = %config.service.name,
        health = %format!("{}:{}", config.service.health_host, config.service.health_port),
        wrong_guesses_allowed = config.game.wrong_guesses_allowed,
        min_word_length = config.game.min_target_word_length,
        "Loaded configuration"
    );

    let result = if args.health_check {
        health_check(config).await
    } else if args.dry_run {
        Ok(ExitCode::SUCCESS)
    } else {
        serve(config).await.map(|_| ExitCode::SUCCESS)
    };

    result.unwrap_or_else(|e| {
        error!("{:#}", e);
        ExitCode::FAILURE
    })
}
