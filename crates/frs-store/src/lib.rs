//! # frs-store — Rule Source Backends
//!
//! Two interchangeable implementations of the [`frs_core::RuleSource`]
//! contract:
//!
//! - [`fixture::FixtureRuleSource`] — in-memory, seedable, suitable for
//!   development and testing. Its version counter is owned by the
//!   data-load path ([`fixture::FixtureRuleSource::load`]); reads never
//!   write it.
//! - [`sql::SqlRuleSource`] — PostgreSQL via SQLx with embedded
//!   migrations. The version counter is the `regulation_versions` table,
//!   appended to by out-of-band data loading.
//!
//! Backend selection happens once at process start from the environment
//! ([`connect_from_env`]); nothing downstream branches on backend identity.

pub mod fixture;
pub mod sql;

use std::sync::Arc;

use frs_core::RuleSource;
use thiserror::Error;

/// Failures while selecting or connecting a backend at startup.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend selection is inconsistent (e.g. `DB_MODE=db` without a
    /// `DATABASE_URL`).
    #[error("store configuration error: {0}")]
    Config(String),

    /// Connecting or migrating the relational store failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Running embedded migrations failed.
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Which backend serves the Rule Source contract for this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Fixture,
    Sql,
}

impl BackendKind {
    /// Read the backend selection from `DB_MODE`.
    ///
    /// `db` selects the relational store; anything else (including an
    /// absent variable) selects the seeded fixture store.
    pub fn from_env() -> Self {
        match std::env::var("DB_MODE") {
            Ok(mode) if mode.eq_ignore_ascii_case("db") => Self::Sql,
            _ => Self::Fixture,
        }
    }
}

/// Connect the configured backend and hand it back behind the port trait.
///
/// With `DB_MODE=db`, `DATABASE_URL` must be set; the pool is connected and
/// embedded migrations run before the source is returned. Otherwise the
/// seeded fixture store is served.
pub async fn connect_from_env() -> Result<Arc<dyn RuleSource>, StoreError> {
    match BackendKind::from_env() {
        BackendKind::Sql => {
            let url = std::env::var("DATABASE_URL").map_err(|_| {
                StoreError::Config("DB_MODE=db requires DATABASE_URL to be set".to_string())
            })?;
            let source = sql::SqlRuleSource::connect(&url).await?;
            tracing::info!("Rule source: PostgreSQL");
            Ok(Arc::new(source))
        }
        BackendKind::Fixture => {
            tracing::warn!(
                "DB_MODE is not 'db' — serving seeded fixture data. \
                 Regulation changes will not survive restarts."
            );
            Ok(Arc::new(fixture::FixtureRuleSource::seeded()))
        }
    }
}
