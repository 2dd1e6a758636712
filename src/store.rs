use crate::errors::{AppError, ResultExt};
use crate::models::{Company, Signal};
use crate::qscore::{GradeOverrides, WeightOverrides};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// How far back the signal store looks when assembling a company's
/// signal list. Matches the rolling window used by recency scoring.
pub const SIGNAL_LOOKBACK_DAYS: i32 = 90;

pub struct CompanyStore {
    pool: PgPool,
}

impl CompanyStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a company by its internal id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            SELECT
                id, name, domain, website_url, website, linkedin_url,
                COALESCE(locations, '{}') as locations,
                uae_presence,
                COALESCE(uae_locations, '{}') as uae_locations
            FROM sales.companies
            WHERE id = $1
            LIMIT 1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(company)
    }

    /// Find a company by name, case-insensitively.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            SELECT
                id, name, domain, website_url, website, linkedin_url,
                COALESCE(locations, '{}') as locations,
                uae_presence,
                COALESCE(uae_locations, '{}') as uae_locations
            FROM sales.companies
            WHERE LOWER(name) = LOWER($1)
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Database error in find_by_name for '{}': {:?}", name, e);
            AppError::DatabaseError(e)
        })?;

        Ok(company)
    }
}

pub struct SignalStore {
    pool: PgPool,
}

impl SignalStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Business signals for a company over the trailing 90 days, newest
    /// first. Matches by company id or by name (case-insensitively), since
    /// scraped signals sometimes arrive before the company row is linked.
    /// Date-unknown signals sort last and are kept so the summarizer can
    /// count them.
    pub async fn company_signals(
        &self,
        company_id: Uuid,
        company_name: Option<&str>,
    ) -> Result<Vec<Signal>, AppError> {
        let signals = sqlx::query_as::<_, Signal>(
            r#"
            SELECT
                signal_type,
                COALESCE(signal_text, '') as signal_text,
                signal_date,
                confidence_score::float8 as confidence_score,
                source
            FROM sales.business_signals
            WHERE (company_id = $1 OR ($2::text IS NOT NULL AND LOWER(company_name) = LOWER($2)))
              AND (signal_date IS NULL OR signal_date >= CURRENT_DATE - $3::int)
            ORDER BY signal_date DESC NULLS LAST
            "#,
        )
        .bind(company_id)
        .bind(company_name)
        .bind(SIGNAL_LOOKBACK_DAYS)
        .fetch_all(&self.pool)
        .await
        .context("querying business signals")?;

        tracing::debug!(
            "Loaded {} signal(s) for company {}",
            signals.len(),
            company_id
        );
        Ok(signals)
    }
}

/// Q-Score overrides loaded from the settings table. Both halves are
/// partial: any key a tenant has not configured falls back to the
/// documented default at scoring time.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScoringOverrides {
    #[serde(default)]
    pub weights: WeightOverrides,
    #[serde(default)]
    pub grades: GradeOverrides,
}

pub struct SettingsStore {
    pool: PgPool,
}

impl SettingsStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load Q-Score weight/grade overrides from `sales.scoring_settings`.
    ///
    /// Infallible by contract: an absent table, absent row or unparseable
    /// value degrades to the documented defaults with a warning. A broken
    /// settings source must never fail a scoring request.
    pub async fn scoring_overrides(&self) -> ScoringOverrides {
        let rows: Vec<(String, serde_json::Value)> = match sqlx::query_as(
            r#"
            SELECT key, value
            FROM sales.scoring_settings
            WHERE key IN ('qscore.weights', 'qscore.grades')
            "#,
        )
        .fetch_all(&self.pool)
        .await
        {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!("Scoring settings unavailable, using defaults: {}", e);
                return ScoringOverrides::default();
            }
        };

        let mut overrides = ScoringOverrides::default();
        for (key, value) in rows {
            match key.as_str() {
                "qscore.weights" => match serde_json::from_value(value) {
                    Ok(weights) => overrides.weights = weights,
                    Err(e) => {
                        tracing::warn!("Ignoring malformed qscore.weights setting: {}", e);
                    }
                },
                "qscore.grades" => match serde_json::from_value(value) {
                    Ok(grades) => overrides.grades = grades,
                    Err(e) => {
                        tracing::warn!("Ignoring malformed qscore.grades setting: {}", e);
                    }
                },
                _ => {}
            }
        }

        overrides
    }
}
