use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ============ Scoring Input Models ============

/// Verification status reported for a contact email address.
///
/// Values come from the upstream email-verification pipeline; anything we
/// have never checked arrives as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailStatus {
    /// Mailbox confirmed deliverable. `valid` is accepted as a legacy alias.
    #[serde(alias = "valid")]
    Verified,
    /// Address inferred from the company's known email pattern.
    Pattern,
    /// Domain accepts all recipients, deliverability unconfirmed.
    AcceptAll,
    /// Never checked.
    Unknown,
    /// Checked and bounced.
    Invalid,
}

/// A sales contact as submitted by the caller.
///
/// Every field is optional; scoring degrades to neutral defaults instead of
/// rejecting sparse records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub name: Option<String>,
    /// Free-text job title, e.g. "HR Operations Manager".
    pub title: Option<String>,
    /// Coarse department bucket assigned upstream (e.g. "hr", "finance").
    pub role_bucket: Option<String>,
    pub email: Option<String>,
    pub email_status: Option<EmailStatus>,
    pub linkedin_url: Option<String>,
    pub phone: Option<String>,
}

/// Company record used by the Q-Score engine and as context for seniority
/// scoring.
///
/// `domain`, `website_url` and `website` are alternate spellings from the
/// merged data sources; presence of any one of them counts as web presence.
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct Company {
    pub id: Option<Uuid>,
    pub name: Option<String>,
    pub domain: Option<String>,
    pub website_url: Option<String>,
    pub website: Option<String>,
    pub linkedin_url: Option<String>,
    /// Office locations as free text, e.g. "Dubai, UAE".
    #[serde(default)]
    pub locations: Vec<String>,
    pub uae_presence: Option<bool>,
    #[serde(default)]
    pub uae_locations: Vec<String>,
}

/// A timestamped business event observed for a company (job posting,
/// expansion news, funding round, ...).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Signal {
    pub signal_type: String,
    #[serde(default)]
    pub signal_text: String,
    /// Event date. Scraped sources occasionally deliver garbage here, so an
    /// unparseable date deserializes to `None` (date-unknown) instead of
    /// failing the whole payload.
    #[serde(default, deserialize_with = "lenient_date::deserialize")]
    pub signal_date: Option<NaiveDate>,
    pub confidence_score: Option<f64>,
    pub source: Option<String>,
}

/// Tolerant date parsing for `Signal::signal_date`.
///
/// Accepts a missing field, `null`, or an ISO `YYYY-MM-DD` string (a full
/// RFC 3339 timestamp is truncated to its date part). Anything else is
/// logged and mapped to `None` so downstream recency math skips the signal.
mod lenient_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.and_then(|s| {
            let date_part = s.split('T').next().unwrap_or(&s);
            match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    tracing::warn!("Unparseable signal_date '{}', treating as unknown", s);
                    None
                }
            }
        }))
    }
}

/// Employee-count bucket used by the seniority lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeBucket {
    /// 5000+ employees.
    Enterprise,
    /// 500-4999 employees.
    MidMarket,
    /// Under 500 employees.
    Small,
}

impl SizeBucket {
    pub fn from_employee_count(count: u32) -> Self {
        if count >= 5000 {
            SizeBucket::Enterprise
        } else if count >= 500 {
            SizeBucket::MidMarket
        } else {
            SizeBucket::Small
        }
    }
}

// ============ Scoring Output Models ============

/// Quality band assigned to a lead's total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadCategory {
    TopLead,
    GoodLead,
    LowQuality,
}

impl LeadCategory {
    /// Display label used in API responses and outreach tooling.
    pub fn label(&self) -> &'static str {
        match self {
            LeadCategory::TopLead => "Top Lead",
            LeadCategory::GoodLead => "Good Lead",
            LeadCategory::LowQuality => "Low Quality",
        }
    }
}

/// Per-factor points behind a lead score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadScoreBreakdown {
    pub role_relevance: u32,
    pub seniority: u32,
    pub email_quality: u32,
    pub linkedin_presence: u32,
    pub completeness: u32,
}

/// Composite lead score in [0, 100] with its factor breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadScore {
    pub total: u32,
    pub category: LeadCategory,
    pub breakdown: LeadScoreBreakdown,
}

/// A contact paired with its score, as returned by ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredLead {
    pub contact: Contact,
    pub score: LeadScore,
}

// ============ API Request/Response Models ============

/// POST /api/v1/leads/score request body.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreLeadRequest {
    pub contact: Contact,
    /// Employee count of the target company.
    pub company_size: u32,
}

/// POST /api/v1/leads/score response body.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreLeadResponse {
    /// The contact after input sanitization (invalid email/phone dropped).
    pub contact: Contact,
    pub score: LeadScore,
    pub category_label: &'static str,
}

/// POST /api/v1/leads/rank request body.
#[derive(Debug, Clone, Deserialize)]
pub struct RankLeadsRequest {
    pub leads: Vec<Contact>,
    pub company_size: u32,
}

/// POST /api/v1/leads/rank response body.
///
/// Leads under the qualification threshold are dropped entirely; only the
/// excluded count is reported back.
#[derive(Debug, Clone, Serialize)]
pub struct RankLeadsResponse {
    pub qualified: Vec<ScoredLead>,
    pub excluded_count: usize,
    pub total_received: usize,
}

/// POST /api/v1/companies/qscore request body (inline scoring, no lookup).
#[derive(Debug, Clone, Deserialize)]
pub struct QScoreRequest {
    pub company: Company,
    #[serde(default)]
    pub signals: Vec<Signal>,
    #[serde(default)]
    pub weights: Option<crate::qscore::WeightOverrides>,
    #[serde(default)]
    pub grades: Option<crate::qscore::GradeOverrides>,
}

/// GET /api/v1/companies/:id/qscore response body.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyQScoreResponse {
    pub company_id: Uuid,
    pub company_name: Option<String>,
    pub signal_count: usize,
    pub qscore: crate::qscore::QScore,
}

/// GET /api/v1/companies/:id/signals/summary response body.
#[derive(Debug, Clone, Serialize)]
pub struct CompanySignalSummaryResponse {
    pub company_id: Uuid,
    pub company_name: Option<String>,
    pub summary: crate::signals::SignalSummary,
}
