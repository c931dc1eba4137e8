use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{LeadId, LeadRecord, LeadStatus};
use super::repository::{LeadAlert, LeadNotifier, LeadRepository, NotifierError, RepositoryError};
use crate::workflows::jobs::domain::{JobPosting, ScoredJob};
use crate::workflows::jobs::scoring::{BatchOutcome, ScoringConfig, ScoringEngine};

/// Service composing the scoring engine with the lead log and alert channel.
pub struct LeadService<R, N> {
    engine: Arc<ScoringEngine>,
    repository: Arc<R>,
    notifier: Arc<N>,
}

static LEAD_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_lead_id() -> LeadId {
    let id = LEAD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    LeadId(format!("lead-{id:06}"))
}

/// Result of asking for a high-match alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AlertOutcome {
    Sent { message: String },
    BelowThreshold { score: u8, threshold: u8 },
}

impl<R, N> LeadService<R, N>
where
    R: LeadRepository + 'static,
    N: LeadNotifier + 'static,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>, config: ScoringConfig) -> Self {
        Self {
            engine: Arc::new(ScoringEngine::new(config)),
            repository,
            notifier,
        }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Score and rank a fetched batch.
    pub fn rank(&self, postings: Vec<JobPosting>, now: DateTime<Utc>) -> BatchOutcome {
        self.engine.score_batch(postings, now)
    }

    pub fn score(&self, posting: &JobPosting, now: DateTime<Utc>) -> ScoredJob {
        self.engine.score(posting, now)
    }

    /// Record a scored posting in the lead log.
    pub fn log_lead(
        &self,
        job: ScoredJob,
        source: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<LeadRecord, LeadServiceError> {
        let record = LeadRecord::new(next_lead_id(), job, source.into(), now);
        let stored = self.repository.insert(record)?;
        tracing::info!(
            lead_id = %stored.lead_id.0,
            score = stored.job.composite_score,
            "lead logged"
        );
        Ok(stored)
    }

    /// Send a high-match alert when the lead clears the configured alert threshold.
    pub fn alert(&self, lead_id: &LeadId) -> Result<AlertOutcome, LeadServiceError> {
        let mut record = self
            .repository
            .fetch(lead_id)?
            .ok_or(RepositoryError::NotFound)?;

        let score = record.job.composite_score;
        let threshold = self.engine.config().alert_threshold();
        if score < threshold {
            tracing::debug!(
                lead_id = %lead_id.0,
                score,
                threshold,
                "alert skipped below threshold"
            );
            return Ok(AlertOutcome::BelowThreshold { score, threshold });
        }

        let message = alert_message(&record.job);
        self.notifier.notify(LeadAlert {
            lead_id: lead_id.clone(),
            message: message.clone(),
        })?;

        record.status = LeadStatus::Alerted;
        self.repository.update(record)?;

        Ok(AlertOutcome::Sent { message })
    }

    pub fn get(&self, lead_id: &LeadId) -> Result<LeadRecord, LeadServiceError> {
        let record = self
            .repository
            .fetch(lead_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn recent(&self, limit: usize) -> Result<Vec<LeadRecord>, LeadServiceError> {
        Ok(self.repository.recent(limit)?)
    }
}

pub fn alert_message(job: &ScoredJob) -> String {
    format!(
        "High-match job: {} at {} - Score {}",
        job.posting.title(),
        job.posting.company(),
        job.composite_score
    )
}

#[derive(Debug, thiserror::Error)]
pub enum LeadServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notifier(#[from] NotifierError),
}
