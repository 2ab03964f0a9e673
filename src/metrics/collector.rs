//! Metrics collection using Prometheus
//!
//! This module provides metrics collection for the hangman-ledger service
//! using Prometheus metrics.

use crate::types::{GameStatus, GuessOutcome};
use anyhow::Result;
use prometheus::{
    Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, IntGaugeVec,
    Opts, Registry,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Main metrics collector for the hangman service
#[derive(Clone)]
pub struct MetricsCollector {
    /// Prometheus registry
    registry: Arc<Registry>,

    /// Service-level metrics
    service_metrics: ServiceMetrics,

    /// Game lifecycle metrics
    game_metrics: GameMetrics,

    /// Guess metrics
    guess_metrics: GuessMetrics,

    /// User counter metrics
    user_metrics: UserMetrics,

    /// Performance metrics
    performance_metrics: PerformanceMetrics,
}

/// Service-level metrics
#[derive(Clone)]
pub struct ServiceMetrics {
    /// Service uptime in seconds
    pub uptime_seconds: IntGauge,

    /// Health check status (0=unhealthy, 1=degraded, 2=healthy)
    pub health_status: IntGauge,

    /// Component health status
    pub component_health: IntGaugeVec,
}

/// Game lifecycle metrics
#[derive(Clone)]
pub struct GameMetrics {
    /// Games created, by wrong-guess allowance
    pub games_created_total: IntCounterVec,

    /// Games completed, by outcome
    pub games_completed_total: IntCounterVec,

    /// Games cancelled before completion
    pub games_cancelled_total: IntCounter,

    /// Games currently in progress
    pub active_games: IntGauge,

    /// Distribution of final scores
    pub final_score: Histogram,
}

/// Guess metrics
#[derive(Clone)]
pub struct GuessMetrics {
    /// Accepted guesses, by outcome
    pub guesses_total: IntCounterVec,

    /// Rejected guesses, by reason
    pub guesses_rejected_total: IntCounterVec,
}

/// User counter metrics
#[derive(Clone)]
pub struct UserMetrics {
    /// Registered users
    pub users_total: IntGauge,

    /// Game results applied to user counters
    pub results_applied_total: IntCounter,

    /// Completions skipped because they were already applied
    pub duplicate_results_total: IntCounter,
}

/// Performance metrics
#[derive(Clone)]
pub struct PerformanceMetrics {
    /// Service operation durations
    pub operation_duration: HistogramVec,
}

impl MetricsCollector {
    /// Create a new metrics collector with default registry
    pub fn new() -> Result<Self> {
        let registry = Arc::new(Registry::new());
        Self::with_registry(registry)
    }

    /// Create a new metrics collector with custom registry
    pub fn with_registry(registry: Arc<Registry>) -> Result<Self> {
        let service_metrics = ServiceMetrics::new(&registry)?;
        let game_metrics = GameMetrics::new(&registry)?;
        let guess_metrics = GuessMetrics::new(&registry)?;
        let user_metrics = UserMetrics::new(&registry)?;
        let performance_metrics = PerformanceMetrics::new(&registry)?;

        Ok(Self {
            registry,
            service_metrics,
            game_metrics,
            guess_metrics,
            user_metrics,
            performance_metrics,
        })
    }

    /// Get the Prometheus registry
    pub fn registry(&self) -> Arc<Registry> {
        self.registry.clone()
    }

    pub fn service(&self) -> &ServiceMetrics {
        &self.service_metrics
    }

    pub fn game(&self) -> &GameMetrics {
        &self.game_metrics
    }

    pub fn guess(&self) -> &GuessMetrics {
        &self.guess_metrics
    }

    pub fn user(&self) -> &UserMetrics {
        &self.user_metrics
    }

    pub fn performance(&self) -> &PerformanceMetrics {
        &self.performance_metrics
    }

    /// Record a user being registered
    pub fn record_user_created(&self) {
        self.user_metrics.users_total.inc();
    }

    /// Record a game being created
    pub fn record_game_created(&self, wrong_guesses_allowed: u32) {
        let allowance = wrong_guesses_allowed.to_string();
        self.game_metrics
            .games_created_total
            .with_label_values(&[allowance.as_str()])
            .inc();
        self.game_metrics.active_games.inc();
    }

    /// Record an accepted guess
    pub fn record_guess(&self, outcome: GuessOutcome) {
        let outcome_str = match outcome {
            GuessOutcome::Correct => "correct",
            GuessOutcome::Wrong => "wrong",
        };

        self.guess_metrics
            .guesses_total
            .with_label_values(&[outcome_str])
            .inc();
    }

    /// Record a rejected guess
    pub fn record_guess_rejected(&self, reason: &str) {
        self.guess_metrics
            .guesses_rejected_total
            .with_label_values(&[reason])
            .inc();
    }

    /// Record a game reaching a terminal state
    pub fn record_game_completed(&self, status: GameStatus, final_score: u32, applied: bool) {
        if !applied {
            self.user_metrics.duplicate_results_total.inc();
            return;
        }

        let outcome = match status {
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
            GameStatus::InProgress => "in_progress",
        };

        self.game_metrics
            .games_completed_total
            .with_label_values(&[outcome])
            .inc();
        self.game_metrics.active_games.dec();
        self.game_metrics.final_score.observe(f64::from(final_score));
        self.user_metrics.results_applied_total.inc();
    }

    /// Record an in-progress game being cancelled
    pub fn record_game_cancelled(&self) {
        self.game_metrics.games_cancelled_total.inc();
        self.game_metrics.active_games.dec();
    }

    /// Record service operation duration
    pub fn record_operation(&self, operation: &str, duration: Duration) {
        self.performance_metrics
            .operation_duration
            .with_label_values(&[operation])
            .observe(duration.as_secs_f64());
    }

    /// Update health status
    pub fn update_health_status(&self, status: u8) {
        self.service_metrics.health_status.set(status as i64);
    }

    /// Update component health
    pub fn update_component_health(&self, component: &str, healthy: bool) {
        let status = if healthy { 1 } else { 0 };
        self.service_metrics
            .component_health
            .with_label_values(&[component])
            .set(status);
    }

    /// Update service uptime
    pub fn update_uptime(&self, uptime: Duration) {
        self.service_metrics
            .uptime_seconds
            .set(uptime.as_secs() as i64);
    }

    /// Create a timer for measuring operation duration
    pub fn start_timer(&self) -> MetricsTimer {
        MetricsTimer::new()
    }
}

/// Timer for measuring operation durations
pub struct MetricsTimer {
    start: Instant,
}

impl MetricsTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get the elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and return the duration
    pub fn stop(self) -> Duration {
        self.elapsed()
    }
}

impl ServiceMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let uptime_seconds =
            IntGauge::new("hangman_ledger_uptime_seconds", "Service uptime in seconds")?;
        registry.register(Box::new(uptime_seconds.clone()))?;

        let health_status = IntGauge::new(
            "hangman_ledger_health_status",
            "Health status (0=unhealthy, 1=degraded, 2=healthy)",
        )?;
        registry.register(Box::new(health_status.clone()))?;

        let component_health = IntGaugeVec::new(
            Opts::new("hangman_ledger_component_health", "Component health status"),
            &["component"],
        )?;
        registry.register(Box::new(component_health.clone()))?;

        Ok(Self {
            uptime_seconds,
            health_status,
            component_health,
        })
    }
}

impl GameMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let games_created_total = IntCounterVec::new(
            Opts::new("hangman_ledger_games_created_total", "Total games created"),
            &["wrong_guesses_allowed"],
        )?;
        registry.register(Box::new(games_created_total.clone()))?;

        let games_completed_total = IntCounterVec::new(
            Opts::new(
                "hangman_ledger_games_completed_total",
                "Total games completed",
            ),
            &["outcome"],
        )?;
        registry.register(Box::new(games_completed_total.clone()))?;

        let games_cancelled_total = IntCounter::new(
            "hangman_ledger_games_cancelled_total",
            "Total games cancelled",
        )?;
        registry.register(Box::new(games_cancelled_total.clone()))?;

        let active_games =
            IntGauge::new("hangman_ledger_active_games", "Games currently in progress")?;
        registry.register(Box::new(active_games.clone()))?;

        let final_score = Histogram::with_opts(
            HistogramOpts::new("hangman_ledger_final_score", "Final score distribution")
                .buckets(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]),
        )?;
        registry.register(Box::new(final_score.clone()))?;

        Ok(Self {
            games_created_total,
            games_completed_total,
            games_cancelled_total,
            active_games,
            final_score,
        })
    }
}

impl GuessMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let guesses_total = IntCounterVec::new(
            Opts::new("hangman_ledger_guesses_total", "Total accepted guesses"),
            &["outcome"],
        )?;
        registry.register(Box::new(guesses_total.clone()))?;

        let guesses_rejected_total = IntCounterVec::new(
            Opts::new(
                "hangman_ledger_guesses_rejected_total",
                "Total rejected guesses",
            ),
            &["reason"],
        )?;
        registry.register(Box::new(guesses_rejected_total.clone()))?;

        Ok(Self {
            guesses_total,
            guesses_rejected_total,
        })
    }
}

impl UserMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let users_total = IntGauge::new("hangman_ledger_users_total", "Registered users")?;
        registry.register(Box::new(users_total.clone()))?;

        let results_applied_total = IntCounter::new(
            "hangman_ledger_results_applied_total",
            "Game results applied to user counters",
        )?;
        registry.register(Box::new(results_applied_total.clone()))?;

        let duplicate_results_total = IntCounter::new(
            "hangman_ledger_duplicate_results_total",
            "Game completions skipped as already applied",
        )?;
        registry.register(Box::new(duplicate_results_total.clone()))?;

        Ok(Self {
            users_total,
            results_applied_total,
            duplicate_results_total,
        })
    }
}

impl PerformanceMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let operation_duration = HistogramVec::new(
            HistogramOpts::new(
                "hangman_ledger_operation_duration_seconds",
                "Service operation duration",
            )
            .buckets(vec![0.00001, 0.0001, 0.001, 0.005, 0.01, 0.05, 0.1]),
            &["operation"],
        )?;
        registry.register(Box::new(operation_duration.clone()))?;

        Ok(Self { operation_duration })
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new().expect("Failed to create default metrics collector")
    }
}
