/// Hiring-signal summarization
///
/// Classifies a company's recent business signals into an outreach urgency
/// tier and renders a recommendation for the sales caller. Tier assignment
/// is ordered rule evaluation - first matching tier wins, no backtracking:
/// expansion > active hiring > business growth > moderate activity > none.
///
/// Signals with no usable date count toward totals but are excluded from
/// every recency window and day-delta computation, so a scraper that loses
/// a timestamp can never inflate urgency or corrupt the message text.
use crate::models::Signal;
use chrono::{NaiveDate, Utc};
use serde::Serialize;

/// Outreach urgency, most to least urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UrgencyTier {
    Expansion,
    ActiveHiring,
    BusinessGrowth,
    Moderate,
    None,
}

/// Signal types that indicate business growth (tier 4 check).
pub const GROWTH_SIGNAL_TYPES: &[&str] = &[
    "investment",
    "partnership",
    "project_award",
    "award",
    "funding",
];

/// Job postings required within the window for the active-hiring tier.
const ACTIVE_HIRING_MIN_POSTINGS: usize = 5;

/// "Recent" for tiering purposes: a rolling 30-day window ending today.
const RECENT_WINDOW_DAYS: i64 = 30;

/// Floor for the expansion action window, in days.
const MIN_ACTION_WINDOW_DAYS: i64 = 5;

/// Counts and day deltas computed over the signal list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SignalMetrics {
    pub total_signals: usize,
    pub job_postings: usize,
    pub signals_last_30d: usize,
    /// Days since the newest dated signal; `None` when no signal has a
    /// usable date.
    pub days_since_latest: Option<i64>,
    /// Signals whose date was missing or unparseable.
    pub undated_signals: usize,
}

/// Result of summarizing a company's signals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalSummary {
    pub tier: UrgencyTier,
    pub details: Vec<String>,
    pub recommendation: String,
    pub metrics: SignalMetrics,
}

fn is_expansion(signal: &Signal) -> bool {
    signal.signal_type.to_lowercase().contains("expansion")
}

fn is_job_posting(signal: &Signal) -> bool {
    let t = signal.signal_type.to_lowercase();
    t.contains("job_posting") || t.contains("hiring")
}

fn is_growth(signal: &Signal) -> bool {
    let t = signal.signal_type.to_lowercase();
    GROWTH_SIGNAL_TYPES.iter().any(|g| t.contains(g))
}

fn days_ago(signal: &Signal, today: NaiveDate) -> Option<i64> {
    signal.signal_date.map(|date| (today - date).num_days())
}

/// True when the signal is dated within the trailing `window` days.
fn within_window(signal: &Signal, today: NaiveDate, window: i64) -> bool {
    days_ago(signal, today).is_some_and(|days| (0..=window).contains(&days))
}

fn compute_metrics(signals: &[Signal], today: NaiveDate) -> SignalMetrics {
    SignalMetrics {
        total_signals: signals.len(),
        job_postings: signals.iter().filter(|s| is_job_posting(s)).count(),
        signals_last_30d: signals
            .iter()
            .filter(|s| within_window(s, today, RECENT_WINDOW_DAYS))
            .count(),
        days_since_latest: signals
            .iter()
            .filter_map(|s| days_ago(s, today))
            .filter(|days| *days >= 0)
            .min(),
        undated_signals: signals.iter().filter(|s| s.signal_date.is_none()).count(),
    }
}

/// Summarizes signals with `today` taken from the wall clock.
pub fn summarize(signals: &[Signal]) -> SignalSummary {
    summarize_at(signals, Utc::now().date_naive())
}

/// Summarizes signals against an explicit reference date.
pub fn summarize_at(signals: &[Signal], today: NaiveDate) -> SignalSummary {
    let metrics = compute_metrics(signals, today);

    // Tier 1: nothing observed at all.
    if signals.is_empty() {
        return SignalSummary {
            tier: UrgencyTier::None,
            details: vec!["No business signals on record.".to_string()],
            recommendation: "Low priority: company is not actively hiring or expanding. \
                             Revisit next quarter."
                .to_string(),
            metrics,
        };
    }

    // Tier 2: expansion news trumps everything else.
    let expansions: Vec<&Signal> = signals.iter().filter(|s| is_expansion(s)).collect();
    if !expansions.is_empty() {
        return expansion_summary(&expansions, metrics, today);
    }

    // Tier 3: sustained job-posting volume with at least one fresh posting.
    let fresh_posting = signals
        .iter()
        .any(|s| is_job_posting(s) && within_window(s, today, RECENT_WINDOW_DAYS));
    if metrics.job_postings >= ACTIVE_HIRING_MIN_POSTINGS && fresh_posting {
        return SignalSummary {
            tier: UrgencyTier::ActiveHiring,
            details: vec![format!(
                "{} job postings observed, {} signal(s) in the last 30 days.",
                metrics.job_postings, metrics.signals_last_30d
            )],
            recommendation: format!(
                "High priority: actively hiring at volume ({} postings). Reach out \
                 while headcount is growing and onboarding pain is fresh.",
                metrics.job_postings
            ),
            metrics,
        };
    }

    // Tier 4: funding, partnerships, awards - growth without direct hiring.
    let growth: Vec<&Signal> = signals.iter().filter(|s| is_growth(s)).collect();
    if !growth.is_empty() {
        let types: Vec<String> = growth
            .iter()
            .map(|s| s.signal_type.clone())
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect();
        return SignalSummary {
            tier: UrgencyTier::BusinessGrowth,
            details: vec![format!("Growth signals on record: {}.", types.join(", "))],
            recommendation: format!(
                "Medium priority: business growth detected ({}). Hiring typically \
                 follows within one or two quarters; open a relationship now.",
                types.join(", ")
            ),
            metrics,
        };
    }

    // Tier 5: something happened, but nothing urgent.
    let recommendation = match metrics.days_since_latest {
        Some(days) => format!(
            "Moderate priority: last signal {} day(s) ago. Keep on the nurture \
             list and monitor for fresh activity.",
            days
        ),
        None => "Moderate priority: signals on record but none carry a usable \
                 date. Keep on the nurture list."
            .to_string(),
    };
    SignalSummary {
        tier: UrgencyTier::Moderate,
        details: vec![format!(
            "{} signal(s) on record, {} in the last 30 days.",
            metrics.total_signals, metrics.signals_last_30d
        )],
        recommendation,
        metrics,
    }
}

/// Builds the EXPANSION-tier summary.
///
/// The action window shrinks as the news ages: `max(30 - days_ago, 5)`
/// days. When every expansion signal is date-unknown the full 30-day
/// window is assumed and the wording avoids day math.
fn expansion_summary(
    expansions: &[&Signal],
    metrics: SignalMetrics,
    today: NaiveDate,
) -> SignalSummary {
    let newest_age = expansions
        .iter()
        .filter_map(|s| days_ago(s, today))
        .filter(|days| *days >= 0)
        .min();

    let details: Vec<String> = expansions
        .iter()
        .map(|s| {
            if s.signal_text.is_empty() {
                s.signal_type.clone()
            } else {
                s.signal_text.clone()
            }
        })
        .collect();

    let recommendation = match newest_age {
        Some(days) => {
            let action_window = (30 - days).max(MIN_ACTION_WINDOW_DAYS);
            format!(
                "Urgent: expansion announced {} day(s) ago. New offices mean new \
                 hires and new HR workload; contact within the next {} day(s).",
                days, action_window
            )
        }
        None => "Urgent: expansion news detected (date unknown). New offices mean \
                 new hires and new HR workload; contact within the next 30 days."
            .to_string(),
    };

    SignalSummary {
        tier: UrgencyTier::Expansion,
        details,
        recommendation,
        metrics,
    }
}
