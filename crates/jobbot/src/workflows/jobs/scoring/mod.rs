//! Deterministic scoring of job postings against a [`ScoringConfig`].
//!
//! Every sub-score is a pure function of the normalized posting text and the configuration,
//! so a posting always scores the same way for the same config and clock.

mod batch;
pub mod classify;
pub mod composite;
pub mod config;
pub mod noise;
pub mod policy;
pub mod presets;
pub mod recency;
pub mod salary;
pub mod skills;
pub(crate) mod text;

#[cfg(test)]
mod tests;

pub use batch::BatchOutcome;
pub use config::{
    ActionThresholds, RecencyMode, RoleKeywords, ScoreWeights, ScoringConfig,
    ScoringConfigDocument, ScoringConfigError, UnknownSalaryPolicy,
};
pub use presets::{ScoringProfile, UnknownProfile};
pub use salary::{parse_salary, salary_from_amount};
pub use text::normalize_fields;

use chrono::{DateTime, Utc};

use super::domain::{JobPosting, ScoredJob};

/// Stateless engine applying one read-only configuration to postings.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Scores a single posting outside of a batch.
    pub fn score(&self, posting: &JobPosting, now: DateTime<Utc>) -> ScoredJob {
        self.score_indexed(0, posting, now)
    }

    /// Scores postings in parallel and ranks them by composite score, ties in fetch order.
    pub fn score_batch(&self, postings: Vec<JobPosting>, now: DateTime<Utc>) -> BatchOutcome {
        batch::score_batch(self, postings, now)
    }

    pub(crate) fn score_indexed(
        &self,
        fetch_index: usize,
        posting: &JobPosting,
        now: DateTime<Utc>,
    ) -> ScoredJob {
        let config = &self.config;
        let text = posting.searchable_text();

        let salary_normalized = salary::resolve_salary(posting, config.salary_currency());
        let skill_match = skills::match_skills(&text, config.skill_keywords());
        let salary_score = composite::salary_score(
            salary_normalized,
            config.target_salary_lpa(),
            config.unknown_salary(),
        );
        let age_days = recency::posting_age_days(posting.posted_at.as_deref(), now);
        let recency_score = recency::recency_score(age_days, config.recency());
        let noise_hits = noise::noise_hits(&text, config.noise_keywords());
        let noise_score = noise::noise_score(noise_hits, config.noise_multiplier());

        let composite_score =
            composite::composite_score(skill_match.score, salary_score, config.weights());
        let role_category =
            classify::classify_role(&text, config.reject_keywords(), config.roles());
        let verification_state = policy::verification_state(posting.apply_link.as_deref());
        let recommended_action = policy::decide_action(
            composite_score,
            noise_score,
            verification_state,
            &config.thresholds(),
        );

        let qualifies = !role_category.is_reject()
            && recency::within_max_age(age_days, config.max_posting_age_days())
            && self.meets_salary_floor(salary_normalized);

        tracing::debug!(
            fetch_index,
            title = posting.title(),
            composite_score,
            role = %role_category,
            action = recommended_action.label(),
            qualifies,
            "scored posting"
        );

        ScoredJob {
            fetch_index,
            posting: posting.clone(),
            salary_normalized,
            skill_score: skill_match.score,
            matched_skills: skill_match.matched,
            salary_score,
            age_days,
            recency_score,
            noise_score,
            composite_score,
            role_category,
            verification_state,
            recommended_action,
            qualifies,
        }
    }

    /// Unknown salary passes the floor unless the config penalizes it.
    fn meets_salary_floor(&self, salary_normalized: f64) -> bool {
        if salary_normalized > 0.0 {
            return salary_normalized >= self.config.min_salary_lpa();
        }
        match self.config.unknown_salary() {
            UnknownSalaryPolicy::Neutral => true,
            UnknownSalaryPolicy::Penalize => self.config.min_salary_lpa() <= 0.0,
        }
    }
}
