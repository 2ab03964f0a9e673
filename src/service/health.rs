//! Health check endpoints and monitoring
//!
//! This module provides health check functionality for the hangman-ledger
//! service, including readiness and liveness probes.

use crate::service::app::AppState;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error};

/// Health check status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    /// Gauge value exported to Prometheus
    pub fn as_gauge(&self) -> u8 {
        match self {
            HealthStatus::Healthy => 2,
            HealthStatus::Degraded => 1,
            HealthStatus::Unhealthy => 0,
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Healthy => write!(f, "✅ healthy"),
            HealthStatus::Degraded => write!(f, "⚠️  degraded"),
            HealthStatus::Unhealthy => write!(f, "❌ unhealthy"),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheck {
    /// Overall service status
    pub status: HealthStatus,
    /// Service name
    pub service: String,
    /// Service version
    pub version: String,
    /// Current timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Detailed component checks
    pub checks: Vec<ComponentCheck>,
    /// Service statistics
    pub stats: ServiceStats,
}

/// Individual component health check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentCheck {
    /// Component name
    pub name: String,
    /// Component status
    pub status: HealthStatus,
    /// Optional error message if unhealthy
    pub message: Option<String>,
    /// Check duration in milliseconds
    pub duration_ms: u64,
}

/// Service statistics for health reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStats {
    /// Registered users
    pub users: usize,
    /// Games currently in progress
    pub active_games: usize,
    /// Games with a recorded score
    pub completed_games: usize,
    /// Mean remaining allowance over in-progress games
    pub average_wrong_guesses_remaining: Option<f64>,
    /// Service uptime information
    pub uptime_info: String,
}

impl HealthCheck {
    /// Perform a comprehensive health check of the service
    pub async fn check(app_state: Arc<AppState>) -> Result<Self> {
        let mut checks = Vec::new();
        let mut overall_status = HealthStatus::Healthy;

        let service_check = Self::check_service_running(&app_state).await;
        if service_check.status != HealthStatus::Healthy {
            overall_status = HealthStatus::Unhealthy;
        }
        checks.push(service_check);

        let store_check = Self::check_game_store(&app_state);
        if store_check.status == HealthStatus::Unhealthy {
            overall_status = HealthStatus::Unhealthy;
        } else if store_check.status == HealthStatus::Degraded
            && overall_status == HealthStatus::Healthy
        {
            overall_status = HealthStatus::Degraded;
        }
        checks.push(store_check);

        let collector = app_state.metrics_collector();
        collector.update_health_status(overall_status.as_gauge());
        for check in &checks {
            collector.update_component_health(&check.name, check.status == HealthStatus::Healthy);
        }

        let stats = Self::gather_service_stats(&app_state);

        Ok(HealthCheck {
            status: overall_status,
            service: app_state.config().service.name.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now(),
            checks,
            stats,
        })
    }

    /// Simple liveness check - just verify service is running
    pub async fn liveness_check(app_state: Arc<AppState>) -> Result<HealthStatus> {
        if app_state.is_running().await {
            Ok(HealthStatus::Healthy)
        } else {
            Ok(HealthStatus::Unhealthy)
        }
    }

    /// Readiness check - verify service can handle requests
    pub async fn readiness_check(app_state: Arc<AppState>) -> Result<HealthStatus> {
        if !app_state.is_running().await {
            return Ok(HealthStatus::Unhealthy);
        }

        Ok(Self::check_game_store(&app_state).status)
    }

    async fn check_service_running(app_state: &AppState) -> ComponentCheck {
        let start = std::time::Instant::now();

        let (status, message) = if app_state.is_running().await {
            (HealthStatus::Healthy, None)
        } else {
            (
                HealthStatus::Unhealthy,
                Some("Service is not running".to_string()),
            )
        };

        ComponentCheck {
            name: "service_running".to_string(),
            status,
            message,
            duration_ms: start.elapsed().as_millis() as u64,
        }
    }

    /// The store is healthy if it can answer a stats query
    fn check_game_store(app_state: &AppState) -> ComponentCheck {
        let start = std::time::Instant::now();

        let (status, message) = match app_state.hangman().stats() {
            Ok(_) => (HealthStatus::Healthy, None),
            Err(e) => {
                error!("Game store check failed: {}", e);
                (
                    HealthStatus::Unhealthy,
                    Some(format!("Game store unavailable: {}", e)),
                )
            }
        };

        ComponentCheck {
            name: "game_store".to_string(),
            status,
            message,
            duration_ms: start.elapsed().as_millis() as u64,
        }
    }

    fn gather_service_stats(app_state: &AppState) -> ServiceStats {
        let uptime_info = format!("Up {}s", app_state.uptime().as_secs());

        match app_state.hangman().stats() {
            Ok(stats) => ServiceStats {
                users: stats.users,
                active_games: stats.active_games,
                completed_games: stats.completed_games,
                average_wrong_guesses_remaining: stats.average_wrong_guesses_remaining,
                uptime_info,
            },
            Err(e) => {
                debug!("Failed to get game stats for health check: {}", e);
                ServiceStats {
                    users: 0,
                    active_games: 0,
                    completed_games: 0,
                    average_wrong_guesses_remaining: None,
                    uptime_info,
                }
            }
        }
    }
}

impl HealthCheck {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| anyhow::anyhow!("Failed to serialize health check: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[tokio::test]
    async fn test_check_reports_stopped_service_unhealthy() {
        let state = Arc::new(AppState::new(AppConfig::default()).unwrap());
        state.hangman().create_user("alice", None).unwrap();

        let health = HealthCheck::check(state.clone()).await.unwrap();
        assert_eq!(health.status, HealthStatus::Unhealthy);
        assert_eq!(health.stats.users, 1);
        assert_eq!(health.checks.len(), 2);
        assert!(health.to_json().unwrap().contains("game_store"));

        assert_eq!(
            HealthCheck::liveness_check(state).await.unwrap(),
            HealthStatus::Unhealthy
        );
    }

    #[test]
    fn test_status_gauge_values() {
        assert_eq!(HealthStatus::Healthy.as_gauge(), 2);
        assert_eq!(HealthStatus::Degraded.as_gauge(), 1);
        assert_eq!(HealthStatus::Unhealthy.as_gauge(), 0);
    }
}
