//! Metrics and monitoring for the hangman-ledger service
//!
//! This module provides Prometheus metrics collection and the HTTP server
//! exposing health probes and metrics.

pub mod collector;
pub mod health;

pub use collector::{
    GameMetrics, GuessMetrics, MetricsCollector, MetricsTimer, PerformanceMetrics,
    ServiceMetrics, UserMetrics,
};
pub use health::{render_metrics, HealthServer, HealthServerConfig};
