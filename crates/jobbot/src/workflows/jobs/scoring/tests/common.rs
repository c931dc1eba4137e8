use chrono::{DateTime, TimeZone, Utc};

use crate::workflows::jobs::domain::JobPosting;
use crate::workflows::jobs::scoring::{
    ActionThresholds, RecencyMode, RoleKeywords, ScoreWeights, ScoringConfig,
    ScoringConfigDocument, ScoringEngine, UnknownSalaryPolicy,
};

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 16, 9, 30, 0)
        .single()
        .expect("valid clock")
}

pub(super) fn document() -> ScoringConfigDocument {
    ScoringConfigDocument {
        skill_keywords: vec![
            "python".to_string(),
            "sql".to_string(),
            "ml".to_string(),
            "forecasting".to_string(),
        ],
        reject_keywords: vec!["internship".to_string()],
        roles: vec![
            RoleKeywords::new("data_scientist", ["data scientist", "forecasting"]),
            RoleKeywords::new("data_analyst", ["analyst", "dashboard"]),
        ],
        noise_keywords: vec![
            "telecaller".to_string(),
            "bpo".to_string(),
            "commission".to_string(),
        ],
        noise_multiplier: 20,
        min_salary_lpa: 24.0,
        max_posting_age_days: 30,
        weights: ScoreWeights {
            skill_weight: 0.6,
            salary_weight: 0.4,
        },
        target_salary_lpa: 30.0,
        unknown_salary: UnknownSalaryPolicy::Neutral,
        salary_currency: "INR".to_string(),
        recency: RecencyMode::Bucketed,
        thresholds: ActionThresholds::default(),
        alert_threshold: 80,
    }
}

pub(super) fn engine_with(document: ScoringConfigDocument) -> ScoringEngine {
    ScoringEngine::new(ScoringConfig::try_from(document).expect("valid test config"))
}

pub(super) fn engine() -> ScoringEngine {
    engine_with(document())
}

pub(super) fn data_scientist_posting() -> JobPosting {
    JobPosting {
        title: Some("Data Scientist".to_string()),
        company: Some("Acme Analytics".to_string()),
        location: Some("Bengaluru".to_string()),
        description: Some("Python, SQL, ML, forecasting".to_string()),
        salary_text: Some("32 LPA".to_string()),
        apply_link: Some("https://careers.acme.example/jobs/42".to_string()),
        posted_at: Some("2025-10-14T08:00:00Z".to_string()),
        ..JobPosting::default()
    }
}

pub(super) fn titled(title: &str, description: &str) -> JobPosting {
    JobPosting {
        title: Some(title.to_string()),
        description: Some(description.to_string()),
        posted_at: Some("2025-10-15".to_string()),
        ..JobPosting::default()
    }
}
