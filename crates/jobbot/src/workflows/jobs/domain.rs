use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::scoring::text::normalize_fields;

/// One job advertisement as handed over by a job source. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobPosting {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub salary_text: Option<String>,
    pub salary_max: Option<f64>,
    pub salary_currency: Option<String>,
    pub apply_link: Option<String>,
    pub posted_at: Option<String>,
}

impl JobPosting {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    pub fn company(&self) -> &str {
        self.company.as_deref().unwrap_or_default()
    }

    pub fn location(&self) -> &str {
        self.location.as_deref().unwrap_or_default()
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    pub fn apply_link(&self) -> &str {
        self.apply_link.as_deref().unwrap_or_default()
    }

    /// Lower-cased title, company, location and description used by every keyword check.
    pub fn searchable_text(&self) -> String {
        normalize_fields([
            self.title.as_deref(),
            self.company.as_deref(),
            self.location.as_deref(),
            self.description.as_deref(),
        ])
    }
}

/// Role bucket assigned by the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoleCategory {
    Target(String),
    Reject,
}

impl RoleCategory {
    pub const REJECT_LABEL: &'static str = "reject";

    pub fn label(&self) -> &str {
        match self {
            RoleCategory::Target(name) => name,
            RoleCategory::Reject => Self::REJECT_LABEL,
        }
    }

    pub fn is_reject(&self) -> bool {
        matches!(self, RoleCategory::Reject)
    }
}

impl fmt::Display for RoleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for RoleCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for RoleCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.eq_ignore_ascii_case(Self::REJECT_LABEL) {
            Ok(RoleCategory::Reject)
        } else {
            Ok(RoleCategory::Target(raw))
        }
    }
}

/// Whether the apply link looks like it points at the employer's own careers page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationState {
    CareerPageConfirmed,
    NeedsVerification,
}

impl VerificationState {
    pub fn label(&self) -> &'static str {
        match self {
            VerificationState::CareerPageConfirmed => "career_page_confirmed",
            VerificationState::NeedsVerification => "needs_verification",
        }
    }
}

/// Next step suggested for a scored posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedAction {
    Apply,
    RecruiterOutreach,
    Ignore,
}

impl RecommendedAction {
    pub fn label(&self) -> &'static str {
        match self {
            RecommendedAction::Apply => "apply",
            RecommendedAction::RecruiterOutreach => "recruiter_outreach",
            RecommendedAction::Ignore => "ignore",
        }
    }
}

/// Engine output for a single posting. Built once; re-scoring yields a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredJob {
    /// Position of the posting in the batch it was fetched with.
    pub fetch_index: usize,
    #[serde(flatten)]
    pub posting: JobPosting,
    pub salary_normalized: f64,
    pub skill_score: u8,
    pub matched_skills: Vec<String>,
    pub salary_score: u8,
    pub age_days: i64,
    pub recency_score: u8,
    pub noise_score: u8,
    pub composite_score: u8,
    pub role_category: RoleCategory,
    pub verification_state: VerificationState,
    pub recommended_action: RecommendedAction,
    /// Passed the role, recency and salary filters. Independent of `recommended_action`.
    pub qualifies: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn searchable_text_skips_missing_fields() {
        let posting = JobPosting {
            title: Some("Senior  Data Scientist".to_string()),
            description: Some("Python\nSQL".to_string()),
            ..JobPosting::default()
        };

        assert_eq!(posting.searchable_text(), "senior data scientist python sql");
        assert_eq!(JobPosting::default().searchable_text(), "");
    }

    #[test]
    fn role_category_round_trips_through_labels() {
        let target: RoleCategory = serde_json::from_str("\"data_analyst\"").expect("target");
        assert_eq!(target, RoleCategory::Target("data_analyst".to_string()));

        let reject: RoleCategory = serde_json::from_str("\"reject\"").expect("reject");
        assert!(reject.is_reject());
        assert_eq!(
            serde_json::to_string(&RoleCategory::Reject).expect("serialize"),
            "\"reject\""
        );
    }

    #[test]
    fn posting_deserializes_with_missing_fields() {
        let posting: JobPosting =
            serde_json::from_str(r#"{"title": "Analyst", "salary_max": 2400000}"#)
                .expect("partial posting");

        assert_eq!(posting.title(), "Analyst");
        assert_eq!(posting.company(), "");
        assert_eq!(posting.salary_max, Some(2_400_000.0));
        assert!(posting.posted_at.is_none());
    }
}
