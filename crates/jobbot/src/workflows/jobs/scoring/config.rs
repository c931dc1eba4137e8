use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::recency::UNKNOWN_AGE_DAYS;
use super::text::normalize_keyword;
use crate::workflows::jobs::domain::RoleCategory;

const WEIGHT_EPSILON: f64 = 1e-6;

/// Relative contribution of the skill and salary sub-scores. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub skill_weight: f64,
    pub salary_weight: f64,
}

/// How a posting without a usable salary is scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownSalaryPolicy {
    /// Unknown salary scores the neutral midpoint.
    #[default]
    Neutral,
    Penalize,
}

/// Whether posting age feeds a bucketed score or only the age cutoff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecencyMode {
    #[default]
    Bucketed,
    CutoffOnly,
}

/// Score and noise boundaries consumed by the action decider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionThresholds {
    pub apply_threshold: u8,
    pub outreach_threshold: u8,
    pub noise_veto_threshold: u8,
}

impl Default for ActionThresholds {
    fn default() -> Self {
        Self {
            apply_threshold: 80,
            outreach_threshold: 70,
            noise_veto_threshold: 60,
        }
    }
}

/// Named keyword set describing one target role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleKeywords {
    pub name: String,
    pub keywords: Vec<String>,
}

impl RoleKeywords {
    pub fn new<I, S>(name: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    pub(crate) fn category(&self) -> RoleCategory {
        RoleCategory::Target(self.name.clone())
    }
}

/// Serialized form of a scoring configuration; validated into [`ScoringConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfigDocument {
    pub skill_keywords: Vec<String>,
    #[serde(default)]
    pub reject_keywords: Vec<String>,
    pub roles: Vec<RoleKeywords>,
    #[serde(default)]
    pub noise_keywords: Vec<String>,
    #[serde(default = "default_noise_multiplier")]
    pub noise_multiplier: u32,
    #[serde(default)]
    pub min_salary_lpa: f64,
    pub max_posting_age_days: i64,
    pub weights: ScoreWeights,
    pub target_salary_lpa: f64,
    #[serde(default)]
    pub unknown_salary: UnknownSalaryPolicy,
    #[serde(default = "default_salary_currency")]
    pub salary_currency: String,
    #[serde(default)]
    pub recency: RecencyMode,
    #[serde(default)]
    pub thresholds: ActionThresholds,
    #[serde(default = "default_alert_threshold")]
    pub alert_threshold: u8,
}

fn default_noise_multiplier() -> u32 {
    20
}

fn default_salary_currency() -> String {
    "INR".to_string()
}

fn default_alert_threshold() -> u8 {
    80
}

/// Validated, read-only configuration for one scoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScoringConfigDocument", into = "ScoringConfigDocument")]
pub struct ScoringConfig {
    skill_keywords: Vec<String>,
    reject_keywords: Vec<String>,
    roles: Vec<RoleKeywords>,
    noise_keywords: Vec<String>,
    noise_multiplier: u32,
    min_salary_lpa: f64,
    max_posting_age_days: i64,
    weights: ScoreWeights,
    target_salary_lpa: f64,
    unknown_salary: UnknownSalaryPolicy,
    salary_currency: String,
    recency: RecencyMode,
    thresholds: ActionThresholds,
    alert_threshold: u8,
}

impl ScoringConfig {
    pub fn skill_keywords(&self) -> &[String] {
        &self.skill_keywords
    }

    pub fn reject_keywords(&self) -> &[String] {
        &self.reject_keywords
    }

    pub fn roles(&self) -> &[RoleKeywords] {
        &self.roles
    }

    pub fn noise_keywords(&self) -> &[String] {
        &self.noise_keywords
    }

    pub fn noise_multiplier(&self) -> u32 {
        self.noise_multiplier
    }

    pub fn min_salary_lpa(&self) -> f64 {
        self.min_salary_lpa
    }

    pub fn max_posting_age_days(&self) -> i64 {
        self.max_posting_age_days
    }

    pub fn weights(&self) -> ScoreWeights {
        self.weights
    }

    pub fn target_salary_lpa(&self) -> f64 {
        self.target_salary_lpa
    }

    pub fn unknown_salary(&self) -> UnknownSalaryPolicy {
        self.unknown_salary
    }

    pub fn salary_currency(&self) -> &str {
        &self.salary_currency
    }

    pub fn recency(&self) -> RecencyMode {
        self.recency
    }

    pub fn thresholds(&self) -> ActionThresholds {
        self.thresholds
    }

    pub fn alert_threshold(&self) -> u8 {
        self.alert_threshold
    }
}

impl TryFrom<ScoringConfigDocument> for ScoringConfig {
    type Error = ScoringConfigError;

    fn try_from(document: ScoringConfigDocument) -> Result<Self, Self::Error> {
        let skill_keywords = keyword_set("skill_keywords", document.skill_keywords)?;
        if skill_keywords.is_empty() {
            return Err(ScoringConfigError::EmptySkillKeywords);
        }

        let reject_keywords = keyword_set("reject_keywords", document.reject_keywords)?;
        let noise_keywords = keyword_set("noise_keywords", document.noise_keywords)?;
        let roles = role_set(document.roles)?;

        let ScoreWeights {
            skill_weight,
            salary_weight,
        } = document.weights;
        let weights_in_range = [skill_weight, salary_weight]
            .iter()
            .all(|weight| weight.is_finite() && (0.0..=1.0).contains(weight));
        if !weights_in_range {
            return Err(ScoringConfigError::WeightOutOfRange {
                skill: skill_weight,
                salary: salary_weight,
            });
        }
        let sum = skill_weight + salary_weight;
        if (sum - 1.0).abs() > WEIGHT_EPSILON {
            return Err(ScoringConfigError::WeightsDoNotSumToOne {
                skill: skill_weight,
                salary: salary_weight,
                sum,
            });
        }

        if !(document.target_salary_lpa.is_finite() && document.target_salary_lpa > 0.0) {
            return Err(ScoringConfigError::NonPositiveTargetSalary(
                document.target_salary_lpa,
            ));
        }
        if !(document.min_salary_lpa.is_finite() && document.min_salary_lpa >= 0.0) {
            return Err(ScoringConfigError::NegativeMinimumSalary(
                document.min_salary_lpa,
            ));
        }

        if !(0..UNKNOWN_AGE_DAYS).contains(&document.max_posting_age_days) {
            return Err(ScoringConfigError::InvalidMaxPostingAge {
                value: document.max_posting_age_days,
                limit: UNKNOWN_AGE_DAYS,
            });
        }

        let thresholds = document.thresholds;
        if thresholds.apply_threshold > 100
            || thresholds.noise_veto_threshold > 100
            || thresholds.outreach_threshold > thresholds.apply_threshold
        {
            return Err(ScoringConfigError::InvalidThresholds(thresholds));
        }
        if document.alert_threshold > 100 {
            return Err(ScoringConfigError::InvalidAlertThreshold(
                document.alert_threshold,
            ));
        }

        let salary_currency = document.salary_currency.trim().to_ascii_uppercase();
        if salary_currency.is_empty() {
            return Err(ScoringConfigError::BlankCurrency);
        }

        Ok(Self {
            skill_keywords,
            reject_keywords,
            roles,
            noise_keywords,
            noise_multiplier: document.noise_multiplier,
            min_salary_lpa: document.min_salary_lpa,
            max_posting_age_days: document.max_posting_age_days,
            weights: document.weights,
            target_salary_lpa: document.target_salary_lpa,
            unknown_salary: document.unknown_salary,
            salary_currency,
            recency: document.recency,
            thresholds,
            alert_threshold: document.alert_threshold,
        })
    }
}

impl From<ScoringConfig> for ScoringConfigDocument {
    fn from(config: ScoringConfig) -> Self {
        Self {
            skill_keywords: config.skill_keywords,
            reject_keywords: config.reject_keywords,
            roles: config.roles,
            noise_keywords: config.noise_keywords,
            noise_multiplier: config.noise_multiplier,
            min_salary_lpa: config.min_salary_lpa,
            max_posting_age_days: config.max_posting_age_days,
            weights: config.weights,
            target_salary_lpa: config.target_salary_lpa,
            unknown_salary: config.unknown_salary,
            salary_currency: config.salary_currency,
            recency: config.recency,
            thresholds: config.thresholds,
            alert_threshold: config.alert_threshold,
        }
    }
}

/// Raised when a scoring configuration cannot be used safely.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringConfigError {
    #[error("skill_keywords must contain at least one keyword")]
    EmptySkillKeywords,
    #[error("{field} contains a blank keyword")]
    BlankKeyword { field: &'static str },
    #[error("at least one role category is required")]
    NoRoleCategories,
    #[error("role category '{0}' has no keywords")]
    EmptyRoleCategory(String),
    #[error("role category name '{0}' is blank, reserved, or duplicated")]
    InvalidRoleName(String),
    #[error("score weights must lie within [0, 1] (skill {skill}, salary {salary})")]
    WeightOutOfRange { skill: f64, salary: f64 },
    #[error("score weights must sum to 1.0 (skill {skill} + salary {salary} = {sum})")]
    WeightsDoNotSumToOne { skill: f64, salary: f64, sum: f64 },
    #[error("target_salary_lpa must be positive, got {0}")]
    NonPositiveTargetSalary(f64),
    #[error("min_salary_lpa must be zero or positive, got {0}")]
    NegativeMinimumSalary(f64),
    #[error("max_posting_age_days must be within 0..{limit}, got {value}")]
    InvalidMaxPostingAge { value: i64, limit: i64 },
    #[error("thresholds must satisfy outreach <= apply <= 100 and noise veto <= 100: {0:?}")]
    InvalidThresholds(ActionThresholds),
    #[error("alert_threshold must be at most 100, got {0}")]
    InvalidAlertThreshold(u8),
    #[error("salary_currency must not be blank")]
    BlankCurrency,
}

fn keyword_set(
    field: &'static str,
    keywords: Vec<String>,
) -> Result<Vec<String>, ScoringConfigError> {
    let mut seen = HashSet::new();
    let mut ordered = Vec::with_capacity(keywords.len());
    for keyword in keywords {
        let normalized = normalize_keyword(&keyword);
        if normalized.is_empty() {
            return Err(ScoringConfigError::BlankKeyword { field });
        }
        if seen.insert(normalized.clone()) {
            ordered.push(normalized);
        }
    }
    Ok(ordered)
}

fn role_set(roles: Vec<RoleKeywords>) -> Result<Vec<RoleKeywords>, ScoringConfigError> {
    if roles.is_empty() {
        return Err(ScoringConfigError::NoRoleCategories);
    }

    let mut names = HashSet::new();
    let mut validated = Vec::with_capacity(roles.len());
    for role in roles {
        let name = role.name.trim().to_string();
        if name.is_empty()
            || name.eq_ignore_ascii_case(RoleCategory::REJECT_LABEL)
            || !names.insert(name.clone())
        {
            return Err(ScoringConfigError::InvalidRoleName(role.name));
        }

        let keywords = keyword_set("roles", role.keywords)?;
        if keywords.is_empty() {
            return Err(ScoringConfigError::EmptyRoleCategory(name));
        }
        validated.push(RoleKeywords { name, keywords });
    }
    Ok(validated)
}
