//! # PostgreSQL Rule Source
//!
//! SQLx-backed implementation of the Rule Source contract. All queries are
//! plain reads; the regulation data and the `regulation_versions` counter
//! are written exclusively by out-of-band data loading.
//!
//! Restriction references and species scopes live in side tables and are
//! batch-fetched with `= ANY($1)` after the restriction page is read, so a
//! zone query costs a fixed three statements regardless of row count.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};

use frs_core::model::{
    ClosedRange, Quotas, RuleFacts, SizeLimits, Species, VersionStamp, Zone, ZoneRestriction,
};
use frs_core::source::{RuleSource, SourceError};

use crate::StoreError;

/// Rule source backed by PostgreSQL.
#[derive(Clone)]
pub struct SqlRuleSource {
    pool: PgPool,
}

impl SqlRuleSource {
    /// Connect a pool and run embedded migrations.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(20)
            .min_connections(2)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;
        tracing::info!("Connected to PostgreSQL");

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");

        Ok(Self { pool })
    }

    /// Wrap an existing pool (tests, pooled deployments).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn unavailable(e: sqlx::Error) -> SourceError {
    tracing::warn!(error = %e, "rule source query failed");
    SourceError::Unavailable(e.to_string())
}

#[derive(sqlx::FromRow)]
struct RuleRow {
    size_min_cm: Option<i32>,
    size_max_cm: Option<i32>,
    daily_limit: Option<i32>,
    seasonal_limit: Option<i32>,
    season_window_start: Option<NaiveDate>,
    season_window_end: Option<NaiveDate>,
}

impl RuleRow {
    fn size_limits(&self) -> Option<SizeLimits> {
        if self.size_min_cm.is_some() || self.size_max_cm.is_some() {
            Some(SizeLimits {
                min_cm: self.size_min_cm,
                max_cm: self.size_max_cm,
            })
        } else {
            None
        }
    }

    fn quotas(&self) -> Option<Quotas> {
        if self.daily_limit.is_some()
            || self.seasonal_limit.is_some()
            || self.season_window_start.is_some()
            || self.season_window_end.is_some()
        {
            Some(Quotas {
                daily_limit: self.daily_limit,
                seasonal_limit: self.seasonal_limit,
                season_window_start: self.season_window_start,
                season_window_end: self.season_window_end,
            })
        } else {
            None
        }
    }
}

#[derive(sqlx::FromRow)]
struct RestrictionRow {
    id: i64,
    code: String,
    category: String,
    title: String,
    details: String,
    effective_from: Option<NaiveDate>,
    effective_to: Option<NaiveDate>,
}

#[async_trait]
impl RuleSource for SqlRuleSource {
    async fn species_by_code(&self, code: &str) -> Result<Option<Species>, SourceError> {
        let row = sqlx::query_as::<_, (String, String)>(
            "SELECT code, common_name FROM species WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(unavailable)?;
        Ok(row.map(|(code, common_name)| Species { code, common_name }))
    }

    async fn zone_by_code(&self, code: &str) -> Result<Option<Zone>, SourceError> {
        let row = sqlx::query_scalar::<_, String>("SELECT code FROM zones WHERE code = $1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(unavailable)?;
        Ok(row.map(|code| Zone { code }))
    }

    async fn all_species_codes(&self) -> Result<Vec<String>, SourceError> {
        sqlx::query_scalar::<_, String>("SELECT code FROM species ORDER BY code")
            .fetch_all(&self.pool)
            .await
            .map_err(unavailable)
    }

    async fn rule_facts(
        &self,
        species_code: &str,
        zone_code: &str,
        _on_date: NaiveDate,
    ) -> Result<Option<RuleFacts>, SourceError> {
        let rule = sqlx::query_as::<_, RuleRow>(
            "SELECT size_min_cm, size_max_cm, daily_limit, seasonal_limit,
                    season_window_start, season_window_end
             FROM species_zone_rules
             WHERE species_code = $1 AND zone_code = $2
             LIMIT 1",
        )
        .bind(species_code)
        .bind(zone_code)
        .fetch_optional(&self.pool)
        .await
        .map_err(unavailable)?;

        let closed_seasons: Vec<ClosedRange> = sqlx::query_as::<_, (NaiveDate, NaiveDate)>(
            "SELECT closed_from, closed_to
             FROM species_zone_closed_seasons
             WHERE species_code = $1 AND zone_code = $2
             ORDER BY closed_from",
        )
        .bind(species_code)
        .bind(zone_code)
        .fetch_all(&self.pool)
        .await
        .map_err(unavailable)?
        .into_iter()
        .map(|(from, to)| ClosedRange { from, to })
        .collect();

        if rule.is_none() && closed_seasons.is_empty() {
            return Ok(None);
        }

        let (size_limits, quotas) = match &rule {
            Some(row) => (row.size_limits(), row.quotas()),
            None => (None, None),
        };
        Ok(Some(RuleFacts {
            size_limits,
            quotas,
            closed_seasons,
        }))
    }

    async fn zone_restrictions(
        &self,
        zone_code: &str,
        on_date: NaiveDate,
    ) -> Result<Vec<ZoneRestriction>, SourceError> {
        let rows = sqlx::query_as::<_, RestrictionRow>(
            "SELECT id, code, category, title, details, effective_from, effective_to
             FROM zone_restrictions
             WHERE zone_code = $1
               AND (effective_from IS NULL OR effective_from <= $2)
               AND (effective_to IS NULL OR effective_to >= $2)
             ORDER BY id",
        )
        .bind(zone_code)
        .bind(on_date)
        .fetch_all(&self.pool)
        .await
        .map_err(unavailable)?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();

        let mut references: HashMap<i64, Vec<String>> = HashMap::new();
        for (rid, url) in sqlx::query_as::<_, (i64, String)>(
            "SELECT restriction_id, url
             FROM zone_restriction_references
             WHERE restriction_id = ANY($1)
             ORDER BY restriction_id, url",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(unavailable)?
        {
            references.entry(rid).or_default().push(url);
        }

        let mut scopes: HashMap<i64, Vec<String>> = HashMap::new();
        for (rid, species_code) in sqlx::query_as::<_, (i64, String)>(
            "SELECT restriction_id, species_code
             FROM zone_restriction_species
             WHERE restriction_id = ANY($1)
             ORDER BY restriction_id, species_code",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(unavailable)?
        {
            scopes.entry(rid).or_default().push(species_code);
        }

        Ok(rows
            .into_iter()
            .map(|row| ZoneRestriction {
                code: row.code,
                category: row.category,
                title: row.title,
                details: row.details,
                effective_from: row.effective_from,
                effective_to: row.effective_to,
                references: references.remove(&row.id).unwrap_or_default(),
                species_codes: scopes.remove(&row.id).filter(|s| !s.is_empty()),
            })
            .collect())
    }

    async fn current_version(&self) -> Result<VersionStamp, SourceError> {
        let row = sqlx::query_as::<_, (i64, DateTime<Utc>)>(
            "SELECT id, created_at FROM regulation_versions ORDER BY id DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(unavailable)?;

        // An unseeded database is version 0: valid, just empty.
        Ok(row
            .map(|(id, created_at)| VersionStamp {
                id,
                updated_at: created_at,
            })
            .unwrap_or(VersionStamp {
                id: 0,
                updated_at: DateTime::<Utc>::UNIX_EPOCH,
            }))
    }
}
