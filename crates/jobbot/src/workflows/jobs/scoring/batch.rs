use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ScoringEngine;
use crate::workflows::jobs::domain::{JobPosting, ScoredJob};

/// Ranked result of one scoring run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchOutcome {
    /// Every scored posting, highest composite first.
    pub jobs: Vec<ScoredJob>,
    /// Postings that could not be scored and were left out.
    pub skipped: usize,
}

impl BatchOutcome {
    pub fn leads(&self) -> impl Iterator<Item = &ScoredJob> {
        self.jobs.iter().filter(|job| job.qualifies)
    }

    pub fn lead_count(&self) -> usize {
        self.leads().count()
    }

    pub fn summary(&self) -> String {
        match self.lead_count() {
            1 => "1 lead found".to_string(),
            count => format!("{count} leads found"),
        }
    }
}

pub(super) fn score_batch(
    engine: &ScoringEngine,
    postings: Vec<JobPosting>,
    now: DateTime<Utc>,
) -> BatchOutcome {
    let total = postings.len();
    let workers = thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
        .clamp(1, total.max(1));
    let chunk_size = total.div_ceil(workers).max(1);
    let indexed: Vec<(usize, JobPosting)> = postings.into_iter().enumerate().collect();

    let mut jobs = thread::scope(|scope| {
        let handles: Vec<_> = indexed
            .chunks(chunk_size)
            .map(|chunk| scope.spawn(move || score_chunk(engine, chunk, now)))
            .collect();

        let mut jobs = Vec::with_capacity(total);
        for handle in handles {
            match handle.join() {
                Ok(scored) => jobs.extend(scored),
                Err(_) => tracing::error!("scoring worker terminated unexpectedly"),
            }
        }
        jobs
    });

    rank(&mut jobs);
    let skipped = total - jobs.len();

    let outcome = BatchOutcome { jobs, skipped };
    tracing::info!(
        postings = total,
        leads = outcome.lead_count(),
        skipped = outcome.skipped,
        "scored job batch"
    );
    outcome
}

fn score_chunk(
    engine: &ScoringEngine,
    chunk: &[(usize, JobPosting)],
    now: DateTime<Utc>,
) -> Vec<ScoredJob> {
    chunk
        .iter()
        .filter_map(|(index, posting)| {
            panic::catch_unwind(AssertUnwindSafe(|| {
                engine.score_indexed(*index, posting, now)
            }))
            .map_err(|_| {
                tracing::warn!(fetch_index = index, "skipping posting that failed to score");
            })
            .ok()
        })
        .collect()
}

/// Composite descending; equal scores keep fetch order.
pub(crate) fn rank(jobs: &mut [ScoredJob]) {
    jobs.sort_by(|left, right| {
        right
            .composite_score
            .cmp(&left.composite_score)
            .then(left.fetch_index.cmp(&right.fetch_index))
    });
}
