//! Main application state and service coordination
//!
//! This module contains the production AppState that wires the game store,
//! score calculator, metrics and the health server together and manages
//! their lifecycle.

use crate::config::AppConfig;
use crate::metrics::health::HealthServerConfig;
use crate::metrics::{HealthServer, MetricsCollector};
use crate::scoring::ScoreCalculator;
use crate::service::hangman::HangmanService;
use crate::storage::{GameStore, InMemoryGameStore};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Service-level errors
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Service initialization error: {message}")]
    Initialization { message: String },

    #[error("Background task error: {message}")]
    BackgroundTask { message: String },
}

/// Main application state containing all service components
pub struct AppState {
    /// Application configuration
    config: AppConfig,

    /// Game operations
    hangman: Arc<HangmanService>,

    /// Prometheus metrics
    metrics_collector: Arc<MetricsCollector>,

    /// Health server, present while the service runs
    health_server: Mutex<Option<Arc<HealthServer>>>,

    /// Background task handles
    background_tasks: Mutex<Vec<JoinHandle<()>>>,

    /// Service status
    is_running: RwLock<bool>,

    started_at: Instant,
}

impl AppState {
    /// Initialize the application with an in-memory game store
    pub fn new(config: AppConfig) -> Result<Self, ServiceError> {
        Self::with_store(config, Arc::new(InMemoryGameStore::new()))
    }

    /// Initialize the application on top of the given game store
    pub fn with_store(config: AppConfig, store: Arc<dyn GameStore>) -> Result<Self, ServiceError> {
        info!("Initializing hangman-ledger service");

        crate::config::validate_config(&config).map_err(|e| ServiceError::Configuration {
            message: e.to_string(),
        })?;

        let metrics_collector =
            Arc::new(
                MetricsCollector::new().map_err(|e| ServiceError::Initialization {
                    message: format!("Failed to create metrics collector: {}", e),
                })?,
            );

        let calculator = ScoreCalculator::new(config.game_config());
        let hangman = Arc::new(HangmanService::new(
            store,
            calculator,
            metrics_collector.clone(),
            config.game.high_scores_limit,
        ));

        info!(
            "Configuration: service={}, wrong_guesses_allowed={}, min_word_length={}",
            config.service.name,
            config.game.wrong_guesses_allowed,
            config.game.min_target_word_length
        );

        Ok(Self {
            config,
            hangman,
            metrics_collector,
            health_server: Mutex::new(None),
            background_tasks: Mutex::new(Vec::new()),
            is_running: RwLock::new(false),
            started_at: Instant::now(),
        })
    }

    /// Start the health server and background tasks
    pub async fn start(self: &Arc<Self>) -> Result<(), ServiceError> {
        {
            let mut running = self.is_running.write().await;
            if *running {
                warn!("Service already running");
                return Ok(());
            }
            *running = true;
        }

        let server_config = HealthServerConfig {
            host: self.config.service.health_host.clone(),
            port: self.config.service.health_port,
        };
        let server = Arc::new(
            HealthServer::new(server_config, self.metrics_collector.clone())
                .with_app_state(self.clone()),
        );
        *self.health_server.lock().await = Some(server.clone());

        let mut tasks = self.background_tasks.lock().await;
        tasks.push(tokio::spawn(async move {
            if let Err(e) = server.start().await {
                error!("Health server failed: {}", e);
            }
        }));

        let state = self.clone();
        tasks.push(tokio::spawn(async move {
            state.uptime_task().await;
        }));

        info!("Service started");
        Ok(())
    }

    /// Stop the health server and background tasks
    pub async fn stop(&self) -> Result<(), ServiceError> {
        info!("Stopping service...");
        *self.is_running.write().await = false;

        if let Some(server) = self.health_server.lock().await.take() {
            server
                .stop()
                .await
                .map_err(|e| ServiceError::BackgroundTask {
                    message: e.to_string(),
                })?;
        }

        for task in self.background_tasks.lock().await.drain(..) {
            task.abort();
        }

        info!("Service stopped");
        Ok(())
    }

    /// Keep the uptime gauge current while the service runs
    async fn uptime_task(&self) {
        let mut interval = tokio::time::interval(Duration::from_secs(5));
        while self.is_running().await {
            interval.tick().await;
            self.metrics_collector.update_uptime(self.uptime());
        }
    }

    pub async fn is_running(&self) -> bool {
        *self.is_running.read().await
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn hangman(&self) -> Arc<HangmanService> {
        self.hangman.clone()
    }

    pub fn metrics_collector(&self) -> Arc<MetricsCollector> {
        self.metrics_collector.clone()
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}
