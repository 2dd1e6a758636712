/// Company Quality Score (Q-Score)
///
/// A weighted 0-100 composite over five company-level factors: web domain
/// presence, LinkedIn presence, active business signals, UAE regional
/// presence, and signal recency (with a bonus for very fresh signals).
///
/// Weights and grade thresholds are injected by the caller and merged
/// per-key with the documented defaults, so a tenant or experiment can
/// override a single weight without restating the rest.
use crate::models::{Company, Signal};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Signals older than this play no part in the recency factor.
pub const RECENCY_WINDOW_DAYS: i64 = 90;

/// Signals within this window earn the recency bonus.
pub const FRESH_WINDOW_DAYS: i64 = 30;

/// Location markers that count as UAE presence when scanning free-text
/// office locations.
pub const UAE_MARKERS: &[&str] = &[
    "uae",
    "united arab emirates",
    "dubai",
    "abu dhabi",
    "sharjah",
    "ajman",
    "ras al khaimah",
    "fujairah",
    "umm al quwain",
];

// ============ Configuration ============

/// Points contributed by each factor when present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QScoreWeights {
    pub domain: u32,
    pub linkedin: u32,
    pub signals: u32,
    pub regional: u32,
    pub recency: u32,
    pub recency_bonus: u32,
}

impl Default for QScoreWeights {
    fn default() -> Self {
        Self {
            domain: 25,
            linkedin: 20,
            signals: 20,
            regional: 25,
            recency: 10,
            recency_bonus: 5,
        }
    }
}

/// Partial weight override; any `None` falls back to the default for that
/// key.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WeightOverrides {
    pub domain: Option<u32>,
    pub linkedin: Option<u32>,
    pub signals: Option<u32>,
    pub regional: Option<u32>,
    pub recency: Option<u32>,
    pub recency_bonus: Option<u32>,
}

impl QScoreWeights {
    /// Merges a partial override onto the defaults, key by key.
    pub fn with_overrides(overrides: &WeightOverrides) -> Self {
        let defaults = Self::default();
        Self {
            domain: overrides.domain.unwrap_or(defaults.domain),
            linkedin: overrides.linkedin.unwrap_or(defaults.linkedin),
            signals: overrides.signals.unwrap_or(defaults.signals),
            regional: overrides.regional.unwrap_or(defaults.regional),
            recency: overrides.recency.unwrap_or(defaults.recency),
            recency_bonus: overrides.recency_bonus.unwrap_or(defaults.recency_bonus),
        }
    }
}

/// Minimum values for each letter grade; anything under `c` is a D.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeThresholds {
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

impl Default for GradeThresholds {
    fn default() -> Self {
        Self { a: 80, b: 60, c: 40 }
    }
}

/// Partial grade-threshold override with per-key fallback.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GradeOverrides {
    pub a: Option<u32>,
    pub b: Option<u32>,
    pub c: Option<u32>,
}

impl GradeThresholds {
    pub fn with_overrides(overrides: &GradeOverrides) -> Self {
        let defaults = Self::default();
        Self {
            a: overrides.a.unwrap_or(defaults.a),
            b: overrides.b.unwrap_or(defaults.b),
            c: overrides.c.unwrap_or(defaults.c),
        }
    }

    /// Letter grade for a score value.
    pub fn grade(&self, value: u32) -> &'static str {
        if value >= self.a {
            "A"
        } else if value >= self.b {
            "B"
        } else if value >= self.c {
            "C"
        } else {
            "D"
        }
    }
}

/// Full Q-Score configuration as injected by the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct QScoreConfig {
    pub weights_overrides: WeightOverrides,
    pub grade_overrides: GradeOverrides,
}

// ============ Result ============

/// Points actually awarded per factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QScoreBreakdown {
    pub domain: u32,
    pub linkedin: u32,
    pub signals: u32,
    pub regional: u32,
    pub recency: u32,
    pub recency_bonus: u32,
}

/// Q-Score result: value in [0, 100], letter grade, per-factor breakdown
/// and the weights that were in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QScore {
    pub value: u32,
    pub rating: &'static str,
    pub breakdown: QScoreBreakdown,
    pub weights_used: QScoreWeights,
}

// ============ Factor predicates ============

fn has_domain(company: &Company) -> bool {
    [&company.domain, &company.website_url, &company.website]
        .iter()
        .any(|field| field.as_deref().is_some_and(|v| !v.trim().is_empty()))
}

fn has_linkedin(company: &Company) -> bool {
    company
        .linkedin_url
        .as_deref()
        .is_some_and(|v| !v.trim().is_empty())
}

fn has_regional_presence(company: &Company) -> bool {
    if company.uae_presence == Some(true) {
        return true;
    }
    if company.uae_locations.iter().any(|l| !l.trim().is_empty()) {
        return true;
    }
    company.locations.iter().any(|location| {
        let location = location.to_lowercase();
        UAE_MARKERS.iter().any(|marker| location.contains(marker))
    })
}

/// Days since the newest dated signal, if any signal carries a date.
/// Date-unknown and future-dated signals are skipped rather than treated
/// as fresh.
fn newest_signal_age(signals: &[Signal], today: NaiveDate) -> Option<i64> {
    signals
        .iter()
        .filter_map(|s| s.signal_date)
        .map(|date| (today - date).num_days())
        .filter(|days| *days >= 0)
        .min()
}

// ============ Scoring ============

/// Computes the Q-Score with `today` taken from the wall clock.
pub fn compute_q_score(company: &Company, signals: &[Signal], config: &QScoreConfig) -> QScore {
    compute_q_score_at(company, signals, config, Utc::now().date_naive())
}

/// Computes the Q-Score against an explicit reference date.
///
/// Pure: identical inputs always produce identical output, which is what
/// makes the function safe to call from any concurrency context and
/// trivial to test.
pub fn compute_q_score_at(
    company: &Company,
    signals: &[Signal],
    config: &QScoreConfig,
    today: NaiveDate,
) -> QScore {
    let weights = QScoreWeights::with_overrides(&config.weights_overrides);
    let grades = GradeThresholds::with_overrides(&config.grade_overrides);

    let age = newest_signal_age(signals, today);

    let breakdown = QScoreBreakdown {
        domain: if has_domain(company) { weights.domain } else { 0 },
        linkedin: if has_linkedin(company) {
            weights.linkedin
        } else {
            0
        },
        signals: if signals.is_empty() { 0 } else { weights.signals },
        regional: if has_regional_presence(company) {
            weights.regional
        } else {
            0
        },
        recency: match age {
            Some(days) if (0..=RECENCY_WINDOW_DAYS).contains(&days) => weights.recency,
            _ => 0,
        },
        recency_bonus: match age {
            Some(days) if (0..=FRESH_WINDOW_DAYS).contains(&days) => weights.recency_bonus,
            _ => 0,
        },
    };

    // Saturating: absurd configured weights clamp instead of overflowing.
    let sum = breakdown
        .domain
        .saturating_add(breakdown.linkedin)
        .saturating_add(breakdown.signals)
        .saturating_add(breakdown.regional)
        .saturating_add(breakdown.recency)
        .saturating_add(breakdown.recency_bonus);
    let value = sum.min(100);

    QScore {
        value,
        rating: grades.grade(value),
        breakdown,
        weights_used: weights,
    }
}
