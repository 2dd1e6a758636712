/// Lead scoring and ranking
///
/// Composite 0-100 score over five factors:
/// 1. Role relevance (0-40) - ordered keyword-rule classification of the title
/// 2. Seniority fit (0-25) - title tier crossed with company-size bucket
/// 3. Email quality (5-15) - verification status lookup
/// 4. LinkedIn presence (0 or 7)
/// 5. Data completeness (0-10)
///
/// All functions here are pure; ranking policy (threshold 70, descending
/// sort) lives in `filter_and_rank`.
use crate::models::{
    Contact, LeadCategory, LeadScore, LeadScoreBreakdown, ScoredLead, SizeBucket,
};
use regex::Regex;

/// Minimum total for a lead to survive `filter_and_rank`.
pub const QUALIFICATION_THRESHOLD: u32 = 70;

/// Totals at or above this are "Top Lead".
pub const TOP_LEAD_THRESHOLD: u32 = 85;

// ============ Role Relevance ============

/// Classification buckets for role relevance, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleCategory {
    /// Sales and business-development titles. Hard exclusion: evaluated
    /// first so "HR Sales Executive" still scores zero.
    SalesExcluded,
    /// Onboarding, payroll and HR-operations roles - the product's daily
    /// users.
    PeopleOperations,
    /// General HR management (managers, generalists, HRBPs).
    HrManagement,
    /// Anything else identifiably HR.
    GeneralHr,
    /// Recruitment and talent acquisition.
    Recruitment,
}

/// One entry of the ordered role-classification rule table.
///
/// A rule matches when any keyword is a substring of the lowercased title,
/// any token matches as a whitespace-delimited word, or the contact's role
/// bucket equals `bucket`. First matching rule wins.
#[derive(Debug, Clone, Copy)]
pub struct RoleRule {
    pub category: RoleCategory,
    pub points: u32,
    pub keywords: &'static [&'static str],
    pub tokens: &'static [&'static str],
    pub bucket: Option<&'static str>,
}

/// Ordered rule table for role relevance. Exported so tests can enumerate
/// and validate every rule independently.
pub const ROLE_RULES: &[RoleRule] = &[
    RoleRule {
        category: RoleCategory::SalesExcluded,
        points: 0,
        keywords: &[
            "sales",
            "business development",
            "account executive",
            "account manager",
            "revenue",
        ],
        tokens: &["bdr", "sdr"],
        bucket: None,
    },
    RoleRule {
        category: RoleCategory::PeopleOperations,
        points: 40,
        keywords: &[
            "onboarding",
            "payroll",
            "people operations",
            "hr operations",
            "hr admin",
            "personnel administration",
        ],
        tokens: &[],
        bucket: None,
    },
    RoleRule {
        category: RoleCategory::HrManagement,
        points: 35,
        keywords: &[
            "hr manager",
            "human resources manager",
            "hr generalist",
            "hr business partner",
            "hrbp",
            "people manager",
            "head of people",
            "chief people officer",
        ],
        tokens: &[],
        bucket: None,
    },
    RoleRule {
        category: RoleCategory::GeneralHr,
        points: 20,
        keywords: &["human resources"],
        tokens: &["hr"],
        bucket: Some("hr"),
    },
    RoleRule {
        category: RoleCategory::Recruitment,
        points: 10,
        keywords: &["recruit", "talent acquisition", "sourcing", "headhunt"],
        tokens: &[],
        bucket: None,
    },
];

impl RoleRule {
    /// Tests this rule against a lowercased title and optional role bucket.
    pub fn matches(&self, title_lower: &str, role_bucket: Option<&str>) -> bool {
        if self.keywords.iter().any(|kw| title_lower.contains(kw)) {
            return true;
        }
        if !self.tokens.is_empty() {
            // Pad so " hr " matches at the start/end of the title too.
            let padded = format!(" {} ", title_lower);
            if self
                .tokens
                .iter()
                .any(|tok| padded.contains(&format!(" {} ", tok)))
            {
                return true;
            }
        }
        if let (Some(rule_bucket), Some(contact_bucket)) = (self.bucket, role_bucket) {
            if contact_bucket.eq_ignore_ascii_case(rule_bucket) {
                return true;
            }
        }
        false
    }
}

/// Maps a free-text job title to role-relevance points (0/10/20/35/40).
///
/// Evaluates `ROLE_RULES` top to bottom, first match wins. A missing or
/// blank title scores 0 regardless of the role bucket.
pub fn classify_role(title: Option<&str>, role_bucket: Option<&str>) -> u32 {
    let title = match title {
        Some(t) if !t.trim().is_empty() => t.to_lowercase(),
        _ => return 0,
    };

    for rule in ROLE_RULES {
        if rule.matches(&title, role_bucket) {
            return rule.points;
        }
    }

    0
}

// ============ Seniority ============

/// Seniority tier detected from a job title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeniorityTier {
    Executive,
    Director,
    Manager,
    Specialist,
    Unclassified,
}

/// Detects the seniority tier of a title via regex classes, checked from
/// most to least senior so "Managing Director" lands on Executive.
pub fn detect_seniority(title: &str) -> SeniorityTier {
    let title = title.to_lowercase();

    let executive = Regex::new(
        r"\b(chief|ceo|cfo|coo|cto|chro|president|founder|owner|managing director|vice president|vp)\b",
    )
    .unwrap();
    if executive.is_match(&title) {
        return SeniorityTier::Executive;
    }

    let director = Regex::new(r"\b(director|head of)\b").unwrap();
    if director.is_match(&title) {
        return SeniorityTier::Director;
    }

    let manager = Regex::new(r"\b(manager|lead|supervisor)\b").unwrap();
    if manager.is_match(&title) {
        return SeniorityTier::Manager;
    }

    let specialist = Regex::new(r"\b(specialist|coordinator|officer|analyst|executive)\b").unwrap();
    if specialist.is_match(&title) {
        return SeniorityTier::Specialist;
    }

    SeniorityTier::Unclassified
}

/// Scores seniority fit (0-25) for a title at a company of the given size.
///
/// Very senior titles are penalized at large companies (they delegate HR
/// tooling decisions) and rewarded at small ones, where everyone is
/// operational. A missing title scores the neutral 15.
pub fn score_seniority(title: Option<&str>, company_size: u32) -> u32 {
    let title = match title {
        Some(t) if !t.trim().is_empty() => t,
        _ => return 15,
    };

    let tier = detect_seniority(title);
    let bucket = SizeBucket::from_employee_count(company_size);

    match bucket {
        // Small companies are assumed fully operational at every level.
        SizeBucket::Small => 25,
        SizeBucket::MidMarket => match tier {
            SeniorityTier::Manager | SeniorityTier::Specialist => 25,
            SeniorityTier::Director => 10,
            SeniorityTier::Executive => 0,
            SeniorityTier::Unclassified => 20,
        },
        SizeBucket::Enterprise => match tier {
            SeniorityTier::Manager | SeniorityTier::Specialist => 25,
            SeniorityTier::Director => 5,
            SeniorityTier::Executive => 0,
            SeniorityTier::Unclassified => 15,
        },
    }
}

// ============ Auxiliary Scorers ============

/// Email quality points by verification status (5-15).
pub fn score_email_quality(contact: &Contact) -> u32 {
    use crate::models::EmailStatus::*;
    match contact.email_status {
        Some(Verified) => 15,
        Some(Pattern) => 10,
        Some(AcceptAll) => 8,
        // Unknown, Invalid or never checked all get the floor value.
        _ => 5,
    }
}

/// LinkedIn presence: 7 points for a plausible linkedin.com profile URL.
pub fn score_linkedin_presence(contact: &Contact) -> u32 {
    match contact.linkedin_url.as_deref() {
        Some(url) if url.len() >= 10 && url.to_lowercase().contains("linkedin.com") => 7,
        _ => 0,
    }
}

/// Data completeness: fixed increments per populated field (max 10).
pub fn score_completeness(contact: &Contact) -> u32 {
    let mut points = 0;
    if contact.email.as_deref().is_some_and(|e| !e.is_empty()) {
        points += 3;
    }
    if contact
        .linkedin_url
        .as_deref()
        .is_some_and(|u| !u.is_empty())
    {
        points += 3;
    }
    if contact.title.as_deref().is_some_and(|t| !t.is_empty()) {
        points += 2;
    }
    if contact.phone.as_deref().is_some_and(|p| !p.is_empty()) {
        points += 2;
    }
    points
}

// ============ Aggregation ============

impl LeadCategory {
    /// Category band for a total score.
    pub fn from_total(total: u32) -> Self {
        if total >= TOP_LEAD_THRESHOLD {
            LeadCategory::TopLead
        } else if total >= QUALIFICATION_THRESHOLD {
            LeadCategory::GoodLead
        } else {
            LeadCategory::LowQuality
        }
    }
}

/// Scores a single contact against a company of the given size.
///
/// The total is the plain sum of the five factors; factor maxima
/// (40+25+15+7+10) keep it inside [0, 100] by construction.
pub fn score_lead(contact: &Contact, company_size: u32) -> LeadScore {
    let breakdown = LeadScoreBreakdown {
        role_relevance: classify_role(contact.title.as_deref(), contact.role_bucket.as_deref()),
        seniority: score_seniority(contact.title.as_deref(), company_size),
        email_quality: score_email_quality(contact),
        linkedin_presence: score_linkedin_presence(contact),
        completeness: score_completeness(contact),
    };

    let total = breakdown.role_relevance
        + breakdown.seniority
        + breakdown.email_quality
        + breakdown.linkedin_presence
        + breakdown.completeness;

    LeadScore {
        total,
        category: LeadCategory::from_total(total),
        breakdown,
    }
}

/// Scores a batch of leads, drops everything under
/// `QUALIFICATION_THRESHOLD` and sorts the rest by score, best first.
///
/// Callers never see sub-threshold scores. The sort is stable, so equal
/// scores keep their input order.
pub fn filter_and_rank(leads: &[Contact], company_size: u32) -> Vec<ScoredLead> {
    let mut scored: Vec<ScoredLead> = leads
        .iter()
        .map(|contact| ScoredLead {
            contact: contact.clone(),
            score: score_lead(contact, company_size),
        })
        .filter(|lead| lead.score.total >= QUALIFICATION_THRESHOLD)
        .collect();

    scored.sort_by(|a, b| b.score.total.cmp(&a.score.total));
    scored
}
