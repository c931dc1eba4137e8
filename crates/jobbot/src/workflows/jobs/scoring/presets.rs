use std::fmt;
use std::str::FromStr;

use super::config::{
    ActionThresholds, RecencyMode, RoleKeywords, ScoreWeights, ScoringConfig,
    ScoringConfigDocument, ScoringConfigError, UnknownSalaryPolicy,
};

/// Named search modes. Each is only a different [`ScoringConfig`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScoringProfile {
    /// Data-science skills across several role families.
    #[default]
    Hybrid,
    /// Analytics leadership roles; hands-on ML roles are rejected.
    Manager,
    /// Wide net with a plain age cutoff and a stricter outreach bar.
    Radar,
}

impl ScoringProfile {
    pub const ALL: [ScoringProfile; 3] = [Self::Hybrid, Self::Manager, Self::Radar];

    pub fn name(&self) -> &'static str {
        match self {
            ScoringProfile::Hybrid => "hybrid",
            ScoringProfile::Manager => "manager",
            ScoringProfile::Radar => "radar",
        }
    }

    pub fn config(&self) -> Result<ScoringConfig, ScoringConfigError> {
        ScoringConfig::try_from(self.document())
    }

    pub fn document(&self) -> ScoringConfigDocument {
        match self {
            ScoringProfile::Hybrid => hybrid(),
            ScoringProfile::Manager => manager(),
            ScoringProfile::Radar => radar(),
        }
    }
}

impl fmt::Display for ScoringProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScoringProfile {
    type Err = UnknownProfile;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "hybrid" => Ok(Self::Hybrid),
            "manager" => Ok(Self::Manager),
            "radar" => Ok(Self::Radar),
            _ => Err(UnknownProfile(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scoring profile '{0}' (expected hybrid, manager or radar)")]
pub struct UnknownProfile(pub String);

fn words(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn common_noise() -> Vec<String> {
    words(&[
        "internship",
        "unpaid",
        "telecaller",
        "bpo",
        "commission only",
        "field sales",
        "work from home data entry",
    ])
}

fn hybrid() -> ScoringConfigDocument {
    ScoringConfigDocument {
        skill_keywords: words(&[
            "python",
            "sql",
            "power bi",
            "powerbi",
            "pandas",
            "numpy",
            "scikit-learn",
            "prophet",
            "arima",
            "streamlit",
            "aws",
            "gcp",
            "etl",
            "forecasting",
            "nlp",
            "shap",
        ]),
        reject_keywords: Vec::new(),
        roles: vec![
            RoleKeywords::new(
                "data_scientist",
                ["data scientist", "ml engineer", "machine learning", "deep learning"],
            ),
            RoleKeywords::new(
                "data_engineer",
                ["spark", "airflow", "etl", "pipeline", "databricks"],
            ),
            RoleKeywords::new(
                "analytics_engineer",
                ["analytics engineer", "dbt", "data modeling"],
            ),
            RoleKeywords::new(
                "data_analyst",
                ["power bi", "tableau", "excel", "dashboard", "analyst"],
            ),
            RoleKeywords::new("ml_engineer", ["mlops", "docker", "kubernetes", "tensorflow"]),
            RoleKeywords::new("nlp_engineer", ["nlp", "bert", "transformer", "text"]),
        ],
        noise_keywords: common_noise(),
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

fn manager() -> ScoringConfigDocument {
    ScoringConfigDocument {
        skill_keywords: words(&[
            "sql",
            "power bi",
            "tableau",
            "stakeholder",
            "kpi",
            "dashboard",
            "team",
            "strategy",
            "forecasting",
            "python",
        ]),
        reject_keywords: words(&[
            "machine learning",
            "deep learning",
            "data engineer",
            "software engineer",
            "internship",
        ]),
        roles: vec![RoleKeywords::new(
            "analytics_manager",
            [
                "analytics manager",
                "manager",
                "head of analytics",
                "analytics lead",
                "director",
            ],
        )],
        noise_keywords: common_noise(),
        noise_multiplier: 20,
        min_salary_lpa: 30.0,
        max_posting_age_days: 21,
        weights: ScoreWeights {
            skill_weight: 0.5,
            salary_weight: 0.5,
        },
        target_salary_lpa: 40.0,
        unknown_salary: UnknownSalaryPolicy::Neutral,
        salary_currency: "INR".to_string(),
        recency: RecencyMode::Bucketed,
        thresholds: ActionThresholds {
            apply_threshold: 80,
            outreach_threshold: 70,
            noise_veto_threshold: 60,
        },
        alert_threshold: 80,
    }
}

fn radar() -> ScoringConfigDocument {
    ScoringConfigDocument {
        skill_keywords: words(&[
            "python",
            "sql",
            "power bi",
            "tableau",
            "excel",
            "statistics",
            "forecasting",
            "dashboard",
        ]),
        reject_keywords: words(&["internship", "fresher"]),
        roles: vec![RoleKeywords::new(
            "target_role",
            ["data", "analytics", "analyst", "scientist", "insights"],
        )],
        noise_keywords: common_noise(),
        noise_multiplier: 25,
        min_salary_lpa: 18.0,
        max_posting_age_days: 14,
        weights: ScoreWeights {
            skill_weight: 0.7,
            salary_weight: 0.3,
        },
        target_salary_lpa: 30.0,
        unknown_salary: UnknownSalaryPolicy::Neutral,
        salary_currency: "INR".to_string(),
        recency: RecencyMode::CutoffOnly,
        thresholds: ActionThresholds {
            apply_threshold: 80,
            outreach_threshold: 75,
            noise_veto_threshold: 60,
        },
        alert_threshold: 80,
    }
}
