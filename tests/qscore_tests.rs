/// Unit tests for the company Q-Score engine
/// Covers factor presence, weight/grade override merging, the recency
/// windows and the purity (idempotence) of the scoring function.
use chrono::{Duration, NaiveDate};
use rust_leadscore_api::models::{Company, Signal};
use rust_leadscore_api::qscore::{
    compute_q_score_at, GradeOverrides, GradeThresholds, QScoreConfig, QScoreWeights,
    WeightOverrides,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 4).unwrap()
}

fn signal(signal_type: &str, days_ago: Option<i64>) -> Signal {
    Signal {
        signal_type: signal_type.to_string(),
        signal_text: String::new(),
        signal_date: days_ago.map(|d| today() - Duration::days(d)),
        confidence_score: None,
        source: None,
    }
}

#[cfg(test)]
mod factor_tests {
    use super::*;

    #[test]
    fn test_domain_only_scores_25_grade_d() {
        let company = Company {
            domain: Some("x.com".to_string()),
            ..Company::default()
        };

        let score = compute_q_score_at(&company, &[], &QScoreConfig::default(), today());
        assert_eq!(score.value, 25);
        assert_eq!(score.rating, "D");
        assert_eq!(score.breakdown.domain, 25);
        assert_eq!(score.breakdown.linkedin, 0);
        assert_eq!(score.breakdown.signals, 0);
        assert_eq!(score.breakdown.regional, 0);
        assert_eq!(score.breakdown.recency, 0);
        assert_eq!(score.breakdown.recency_bonus, 0);
    }

    #[test]
    fn test_any_website_field_counts_as_domain() {
        for company in [
            Company {
                website_url: Some("https://x.ae".to_string()),
                ..Company::default()
            },
            Company {
                website: Some("x.ae".to_string()),
                ..Company::default()
            },
        ] {
            let score = compute_q_score_at(&company, &[], &QScoreConfig::default(), today());
            assert_eq!(score.breakdown.domain, 25);
        }

        // Whitespace-only fields do not count.
        let blank = Company {
            domain: Some("   ".to_string()),
            ..Company::default()
        };
        let score = compute_q_score_at(&blank, &[], &QScoreConfig::default(), today());
        assert_eq!(score.breakdown.domain, 0);
    }

    #[test]
    fn test_regional_presence_variants() {
        let flagged = Company {
            uae_presence: Some(true),
            ..Company::default()
        };
        let listed = Company {
            uae_locations: vec!["JLT, Dubai".to_string()],
            ..Company::default()
        };
        let scanned = Company {
            locations: vec!["Dubai Internet City".to_string()],
            ..Company::default()
        };
        let abroad = Company {
            locations: vec!["London, UK".to_string(), "Riyadh, KSA".to_string()],
            ..Company::default()
        };

        let cfg = QScoreConfig::default();
        assert_eq!(compute_q_score_at(&flagged, &[], &cfg, today()).breakdown.regional, 25);
        assert_eq!(compute_q_score_at(&listed, &[], &cfg, today()).breakdown.regional, 25);
        assert_eq!(compute_q_score_at(&scanned, &[], &cfg, today()).breakdown.regional, 25);
        assert_eq!(compute_q_score_at(&abroad, &[], &cfg, today()).breakdown.regional, 0);
    }

    #[test]
    fn test_recency_windows() {
        let cfg = QScoreConfig::default();
        let company = Company::default();

        // Fresh signal: presence + recency + bonus.
        let fresh = [signal("job_posting", Some(10))];
        let score = compute_q_score_at(&company, &fresh, &cfg, today());
        assert_eq!(score.breakdown.signals, 20);
        assert_eq!(score.breakdown.recency, 10);
        assert_eq!(score.breakdown.recency_bonus, 5);

        // Inside 90 days but past the 30-day bonus window.
        let aging = [signal("job_posting", Some(60))];
        let score = compute_q_score_at(&company, &aging, &cfg, today());
        assert_eq!(score.breakdown.recency, 10);
        assert_eq!(score.breakdown.recency_bonus, 0);

        // Stale: presence points only.
        let stale = [signal("job_posting", Some(120))];
        let score = compute_q_score_at(&company, &stale, &cfg, today());
        assert_eq!(score.breakdown.signals, 20);
        assert_eq!(score.breakdown.recency, 0);
        assert_eq!(score.breakdown.recency_bonus, 0);
    }

    #[test]
    fn test_undated_signals_count_but_earn_no_recency() {
        let cfg = QScoreConfig::default();
        let undated = [signal("job_posting", None)];
        let score = compute_q_score_at(&Company::default(), &undated, &cfg, today());
        assert_eq!(score.breakdown.signals, 20);
        assert_eq!(score.breakdown.recency, 0);
        assert_eq!(score.breakdown.recency_bonus, 0);
    }

    #[test]
    fn test_future_dated_signal_does_not_mask_recency() {
        let cfg = QScoreConfig::default();
        // Clock-skewed future date next to a genuinely fresh signal: the
        // fresh one still earns recency and the bonus.
        let mixed = [signal("job_posting", Some(-2)), signal("job_posting", Some(10))];
        let score = compute_q_score_at(&Company::default(), &mixed, &cfg, today());
        assert_eq!(score.breakdown.recency, 10);
        assert_eq!(score.breakdown.recency_bonus, 5);

        // Only a future-dated signal: presence points, no recency.
        let skewed = [signal("job_posting", Some(-2))];
        let score = compute_q_score_at(&Company::default(), &skewed, &cfg, today());
        assert_eq!(score.breakdown.signals, 20);
        assert_eq!(score.breakdown.recency, 0);
        assert_eq!(score.breakdown.recency_bonus, 0);
    }

    #[test]
    fn test_full_house_caps_at_100() {
        let company = Company {
            domain: Some("acme.ae".to_string()),
            linkedin_url: Some("https://linkedin.com/company/acme".to_string()),
            uae_presence: Some(true),
            ..Company::default()
        };
        let fresh = [signal("expansion_news", Some(3))];

        // Raw sum would be 25+20+20+25+10+5 = 105.
        let score = compute_q_score_at(&company, &fresh, &QScoreConfig::default(), today());
        assert_eq!(score.value, 100);
        assert_eq!(score.rating, "A");
    }
}

#[cfg(test)]
mod override_tests {
    use super::*;

    #[test]
    fn test_weight_override_merges_per_key() {
        let overrides = WeightOverrides {
            domain: Some(40),
            ..WeightOverrides::default()
        };
        let merged = QScoreWeights::with_overrides(&overrides);
        assert_eq!(merged.domain, 40);
        // Every unset key keeps its default.
        assert_eq!(merged.linkedin, 20);
        assert_eq!(merged.signals, 20);
        assert_eq!(merged.regional, 25);
        assert_eq!(merged.recency, 10);
        assert_eq!(merged.recency_bonus, 5);
    }

    #[test]
    fn test_grade_override_merges_per_key() {
        let overrides = GradeOverrides {
            a: Some(90),
            ..GradeOverrides::default()
        };
        let merged = GradeThresholds::with_overrides(&overrides);
        assert_eq!(merged.a, 90);
        assert_eq!(merged.b, 60);
        assert_eq!(merged.c, 40);

        assert_eq!(merged.grade(95), "A");
        assert_eq!(merged.grade(85), "B");
        assert_eq!(merged.grade(45), "C");
        assert_eq!(merged.grade(10), "D");
    }

    #[test]
    fn test_overrides_change_score_and_rating() {
        let company = Company {
            domain: Some("acme.ae".to_string()),
            linkedin_url: Some("https://linkedin.com/company/acme".to_string()),
            ..Company::default()
        };

        let config = QScoreConfig {
            weights_overrides: WeightOverrides {
                domain: Some(50),
                linkedin: Some(30),
                ..WeightOverrides::default()
            },
            grade_overrides: GradeOverrides {
                a: Some(75),
                ..GradeOverrides::default()
            },
        };

        let score = compute_q_score_at(&company, &[], &config, today());
        assert_eq!(score.value, 80);
        assert_eq!(score.rating, "A");
        assert_eq!(score.weights_used.domain, 50);
        assert_eq!(score.weights_used.linkedin, 30);
    }

    #[test]
    fn test_default_grade_boundaries() {
        let grades = GradeThresholds::default();
        assert_eq!(grades.grade(80), "A");
        assert_eq!(grades.grade(79), "B");
        assert_eq!(grades.grade(60), "B");
        assert_eq!(grades.grade(59), "C");
        assert_eq!(grades.grade(40), "C");
        assert_eq!(grades.grade(39), "D");
        assert_eq!(grades.grade(0), "D");
    }
}

#[cfg(test)]
mod purity_tests {
    use super::*;

    #[test]
    fn test_identical_inputs_identical_outputs() {
        let company = Company {
            domain: Some("acme.ae".to_string()),
            locations: vec!["Abu Dhabi".to_string()],
            ..Company::default()
        };
        let signals = [signal("funding", Some(12)), signal("job_posting", None)];
        let config = QScoreConfig::default();

        let first = compute_q_score_at(&company, &signals, &config, today());
        let second = compute_q_score_at(&company, &signals, &config, today());
        assert_eq!(first, second);
    }
}
