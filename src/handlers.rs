use crate::errors::AppError;
use crate::lead_scoring;
use crate::models::*;
use crate::qscore::{self, QScoreConfig};
use crate::signals;
use crate::store::{CompanyStore, ScoringOverrides, SettingsStore, SignalStore};
use crate::validation::sanitize_contact;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use moka::future::Cache;
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: PgPool,
    /// Per-company signal list cache (checksum-validated JSON).
    /// Key: "signals:{company_id}", Value: serialized ValidatedCacheEntry.
    pub signal_cache: Cache<String, String>,
    /// Scoring-settings override cache (checksum-validated JSON).
    /// Key: "scoring_overrides", Value: serialized ValidatedCacheEntry.
    pub settings_cache: Cache<String, String>,
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "rust-leadscore-api",
            "version": "0.1.0"
        })),
    )
}

/// POST /api/v1/leads/score
///
/// Scores a single contact. Always returns the score, category and factor
/// breakdown, even under the qualification threshold - single-lead callers
/// want to see why a lead scored low.
pub async fn score_lead(
    Json(payload): Json<ScoreLeadRequest>,
) -> Result<Json<ScoreLeadResponse>, AppError> {
    tracing::info!(
        "POST /leads/score - title: {:?}, company_size: {}",
        payload.contact.title,
        payload.company_size
    );

    let contact = sanitize_contact(&payload.contact);
    let score = lead_scoring::score_lead(&contact, payload.company_size);

    Ok(Json(ScoreLeadResponse {
        contact,
        score,
        category_label: score.category.label(),
    }))
}

/// POST /api/v1/leads/rank
///
/// Scores a batch of contacts, drops everything under the 70-point
/// qualification threshold and returns the rest sorted best-first.
pub async fn rank_leads(
    Json(payload): Json<RankLeadsRequest>,
) -> Result<Json<RankLeadsResponse>, AppError> {
    tracing::info!(
        "POST /leads/rank - {} lead(s), company_size: {}",
        payload.leads.len(),
        payload.company_size
    );

    let total_received = payload.leads.len();
    let sanitized: Vec<Contact> = payload.leads.iter().map(sanitize_contact).collect();
    let qualified = lead_scoring::filter_and_rank(&sanitized, payload.company_size);
    let excluded_count = total_received - qualified.len();

    tracing::info!(
        "Ranked {} lead(s): {} qualified, {} excluded",
        total_received,
        qualified.len(),
        excluded_count
    );

    Ok(Json(RankLeadsResponse {
        qualified,
        excluded_count,
        total_received,
    }))
}

/// POST /api/v1/companies/qscore
///
/// Computes a Q-Score over an inline company + signals payload. No lookups:
/// this is the pure-function surface, used by batch jobs and tests.
pub async fn qscore_inline(
    Json(payload): Json<QScoreRequest>,
) -> Result<Json<qscore::QScore>, AppError> {
    let config = QScoreConfig {
        weights_overrides: payload.weights.unwrap_or_default(),
        grade_overrides: payload.grades.unwrap_or_default(),
    };

    let score = qscore::compute_q_score(&payload.company, &payload.signals, &config);

    tracing::info!(
        "Inline Q-Score: {} ({}) for company {:?}",
        score.value,
        score.rating,
        payload.company.name
    );
    Ok(Json(score))
}

/// GET /api/v1/companies/:id/qscore
///
/// Q-Score for a stored company: signals come from the signal store,
/// weight/grade overrides from the settings store, both cache-backed.
pub async fn company_qscore(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<CompanyQScoreResponse>, AppError> {
    tracing::info!("GET /companies/{}/qscore", id);

    let company = CompanyStore::new(state.db.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company with id {} not found", id)))?;

    stored_company_qscore(&state, company).await
}

/// Query parameters for the by-name Q-Score lookup.
#[derive(Debug, Deserialize)]
pub struct CompanyLookupParams {
    pub name: Option<String>,
}

/// GET /api/v1/companies/qscore?name=...
///
/// Same as the by-id endpoint, but the company is resolved by name
/// (case-insensitively) - what outreach tooling has before an id exists.
pub async fn company_qscore_by_name(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CompanyLookupParams>,
) -> Result<Json<CompanyQScoreResponse>, AppError> {
    let name = params
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing 'name' parameter".to_string()))?;

    tracing::info!("GET /companies/qscore - name: {}", name);

    let company = CompanyStore::new(state.db.clone())
        .find_by_name(name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company '{}' not found", name)))?;

    stored_company_qscore(&state, company).await
}

/// Shared scoring flow for a company already loaded from the store.
async fn stored_company_qscore(
    state: &Arc<AppState>,
    company: Company,
) -> Result<Json<CompanyQScoreResponse>, AppError> {
    let id = company
        .id
        .ok_or_else(|| AppError::InternalError("Stored company is missing an id".to_string()))?;

    let signals = cached_company_signals(state, id, company.name.as_deref()).await?;
    let overrides = cached_scoring_overrides(state).await;

    let config = QScoreConfig {
        weights_overrides: overrides.weights,
        grade_overrides: overrides.grades,
    };
    let score = qscore::compute_q_score(&company, &signals, &config);

    tracing::info!(
        "Q-Score for {}: {} ({}) over {} signal(s)",
        id,
        score.value,
        score.rating,
        signals.len()
    );

    Ok(Json(CompanyQScoreResponse {
        company_id: id,
        company_name: company.name,
        signal_count: signals.len(),
        qscore: score,
    }))
}

/// GET /api/v1/companies/:id/signals/summary
///
/// Hiring-signal urgency summary for a stored company.
pub async fn company_signal_summary(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<CompanySignalSummaryResponse>, AppError> {
    tracing::info!("GET /companies/{}/signals/summary", id);

    let company = CompanyStore::new(state.db.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company with id {} not found", id)))?;

    let signal_list = cached_company_signals(&state, id, company.name.as_deref()).await?;
    let summary = signals::summarize(&signal_list);

    tracing::info!("Signal summary for {}: {:?}", id, summary.tier);

    Ok(Json(CompanySignalSummaryResponse {
        company_id: id,
        company_name: company.name,
        summary,
    }))
}

/// Loads a company's signals through the checksum-validated cache.
async fn cached_company_signals(
    state: &Arc<AppState>,
    company_id: Uuid,
    company_name: Option<&str>,
) -> Result<Vec<Signal>, AppError> {
    let cache_key = format!("signals:{}", company_id);

    if let Some(cached) = state.signal_cache.get(&cache_key).await {
        if let Some(valid_data) =
            crate::cache_validator::ValidatedCacheEntry::deserialize_and_validate(&cached)
        {
            if let Ok(signals) = serde_json::from_str::<Vec<Signal>>(&valid_data) {
                tracing::debug!("Signal cache HIT (validated) for {}", company_id);
                return Ok(signals);
            }
        } else {
            tracing::warn!(
                "Signal cache validation failed for {}, refetching from store",
                company_id
            );
        }
    }

    tracing::debug!("Signal cache MISS for {}", company_id);
    let signals = SignalStore::new(state.db.clone())
        .company_signals(company_id, company_name)
        .await?;

    if let Ok(json_str) = serde_json::to_string(&signals) {
        let entry = crate::cache_validator::ValidatedCacheEntry::new(json_str);
        state.signal_cache.insert(cache_key, entry.serialize()).await;
    }

    Ok(signals)
}

/// Loads Q-Score overrides through the checksum-validated cache.
/// Infallible: the settings store degrades to defaults on its own.
async fn cached_scoring_overrides(state: &Arc<AppState>) -> ScoringOverrides {
    let cache_key = "scoring_overrides".to_string();

    if let Some(cached) = state.settings_cache.get(&cache_key).await {
        if let Some(valid_data) =
            crate::cache_validator::ValidatedCacheEntry::deserialize_and_validate(&cached)
        {
            if let Ok(overrides) = serde_json::from_str::<ScoringOverrides>(&valid_data) {
                tracing::debug!("Settings cache HIT (validated)");
                return overrides;
            }
        } else {
            tracing::warn!("Settings cache validation failed, refetching from store");
        }
    }

    tracing::debug!("Settings cache MISS");
    let overrides = SettingsStore::new(state.db.clone()).scoring_overrides().await;

    if let Ok(json_str) = serde_json::to_string(&overrides) {
        let entry = crate::cache_validator::ValidatedCacheEntry::new(json_str);
        state
            .settings_cache
            .insert(cache_key, entry.serialize())
            .await;
    }

    overrides
}
