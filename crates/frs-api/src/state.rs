//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers via
//! the `State` extractor. Holds the selected Rule Source behind the port
//! trait; handlers never learn which backend is serving them.

use std::sync::Arc;

use frs_core::RuleSource;

/// Server configuration assembled from the environment in `main`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

/// Cheaply cloneable application state.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn RuleSource>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(source: Arc<dyn RuleSource>) -> Self {
        Self {
            source,
            config: AppConfig::default(),
        }
    }

    pub fn with_config(source: Arc<dyn RuleSource>, config: AppConfig) -> Self {
        Self { source, config }
    }
}
