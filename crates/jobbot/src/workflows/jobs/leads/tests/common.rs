use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::jobs::domain::JobPosting;
use crate::workflows::jobs::leads::domain::{LeadId, LeadRecord};
use crate::workflows::jobs::leads::repository::{
    LeadAlert, LeadNotifier, LeadRepository, NotifierError, RepositoryError,
};
use crate::workflows::jobs::leads::{jobs_router, LeadService};
use crate::workflows::jobs::scoring::{
    ActionThresholds, RecencyMode, RoleKeywords, ScoreWeights, ScoringConfig,
    ScoringConfigDocument, UnknownSalaryPolicy,
};

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 16, 9, 30, 0)
        .single()
        .expect("valid clock")
}

pub(super) fn scoring_config() -> ScoringConfig {
    let document = ScoringConfigDocument {
        skill_keywords: vec![
            "python".to_string(),
            "sql".to_string(),
            "forecasting".to_string(),
            "power bi".to_string(),
        ],
        reject_keywords: vec!["internship".to_string()],
        roles: vec![
            RoleKeywords::new("data_scientist", ["data scientist", "forecasting"]),
            RoleKeywords::new("data_analyst", ["analyst", "dashboard"]),
        ],
        noise_keywords: vec!["telecaller".to_string(), "bpo".to_string()],
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
    };
    ScoringConfig::try_from(document).expect("valid test config")
}

/// Scores 100: every skill present, salary above target, careers-page link.
pub(super) fn strong_posting() -> JobPosting {
    JobPosting {
        title: Some("Data Scientist".to_string()),
        company: Some("Acme Analytics".to_string()),
        location: Some("Bengaluru".to_string()),
        description: Some(
            "Python, SQL, Power BI and forecasting. Write to talent@acme.example".to_string(),
        ),
        salary_text: Some("32 LPA".to_string()),
        apply_link: Some("https://careers.acme.example/jobs/42".to_string()),
        posted_at: Some("2025-10-14T08:00:00Z".to_string()),
        ..JobPosting::default()
    }
}

/// No skills and no salary: composite 20 under the neutral policy.
pub(super) fn weak_posting() -> JobPosting {
    JobPosting {
        title: Some("Operations Associate".to_string()),
        company: Some("Globex".to_string()),
        description: Some("Coordinate vendor schedules".to_string()),
        posted_at: Some("2025-10-15".to_string()),
        ..JobPosting::default()
    }
}

pub(super) fn build_service() -> (
    LeadService<MemoryRepository, MemoryNotifier>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifier>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service = LeadService::new(repository.clone(), notifier.clone(), scoring_config());
    (service, repository, notifier)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<Vec<LeadRecord>>>,
}

impl LeadRepository for MemoryRepository {
    fn insert(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.iter().any(|stored| stored.lead_id == record.lead_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn update(&self, record: LeadRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard.iter_mut().find(|stored| stored.lead_id == record.lead_id) {
            Some(stored) => {
                *stored = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|stored| &stored.lead_id == id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<LeadRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().rev().take(limit).cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    alerts: Arc<Mutex<Vec<LeadAlert>>>,
}

impl MemoryNotifier {
    pub(super) fn alerts(&self) -> Vec<LeadAlert> {
        self.alerts.lock().expect("notifier mutex poisoned").clone()
    }
}

impl LeadNotifier for MemoryNotifier {
    fn notify(&self, alert: LeadAlert) -> Result<(), NotifierError> {
        self.alerts
            .lock()
            .expect("notifier mutex poisoned")
            .push(alert);
        Ok(())
    }
}

pub(super) struct SilentNotifier;

impl LeadNotifier for SilentNotifier {
    fn notify(&self, _alert: LeadAlert) -> Result<(), NotifierError> {
        Err(NotifierError::NotConfigured)
    }
}

pub(super) struct UnavailableRepository;

impl LeadRepository for UnavailableRepository {
    fn insert(&self, _record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("sheet offline".to_string()))
    }

    fn update(&self, _record: LeadRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("sheet offline".to_string()))
    }

    fn fetch(&self, _id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("sheet offline".to_string()))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<LeadRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("sheet offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(
    service: LeadService<MemoryRepository, MemoryNotifier>,
) -> axum::Router {
    jobs_router(Arc::new(service))
}
