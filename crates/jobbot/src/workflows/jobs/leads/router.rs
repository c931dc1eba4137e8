use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::LeadId;
use super::repository::{LeadNotifier, LeadRepository, RepositoryError};
use super::service::{LeadService, LeadServiceError};
use crate::workflows::intake::JsearchResponse;
use crate::workflows::jobs::domain::{JobPosting, ScoredJob};
use crate::workflows::jobs::scoring::BatchOutcome;

const DEFAULT_LEAD_SOURCE: &str = "api";

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreRequest {
    #[serde(default)]
    postings: Vec<JobPosting>,
    #[serde(default)]
    now: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreResponse {
    summary: String,
    lead_count: usize,
    skipped: usize,
    jobs: Vec<ScoredJob>,
}

impl From<BatchOutcome> for ScoreResponse {
    fn from(outcome: BatchOutcome) -> Self {
        Self {
            summary: outcome.summary(),
            lead_count: outcome.lead_count(),
            skipped: outcome.skipped,
            jobs: outcome.jobs,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct LogLeadRequest {
    posting: JobPosting,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    now: Option<DateTime<Utc>>,
}

/// HTTP endpoints for scoring batches and working with logged leads.
pub fn jobs_router<R, N>(service: Arc<LeadService<R, N>>) -> Router
where
    R: LeadRepository + 'static,
    N: LeadNotifier + 'static,
{
    Router::new()
        .route("/api/v1/jobs/score", post(score_handler::<R, N>))
        .route(
            "/api/v1/jobs/import/jsearch",
            post(jsearch_handler::<R, N>),
        )
        .route("/api/v1/leads", post(log_lead_handler::<R, N>))
        .route("/api/v1/leads/:lead_id", get(lead_handler::<R, N>))
        .route("/api/v1/leads/:lead_id/alert", post(alert_handler::<R, N>))
        .with_state(service)
}

pub(crate) async fn score_handler<R, N>(
    State(service): State<Arc<LeadService<R, N>>>,
    Json(request): Json<ScoreRequest>,
) -> Response
where
    R: LeadRepository + 'static,
    N: LeadNotifier + 'static,
{
    let now = request.now.unwrap_or_else(Utc::now);
    rank_response(service, request.postings, now).await
}

pub(crate) async fn jsearch_handler<R, N>(
    State(service): State<Arc<LeadService<R, N>>>,
    Json(payload): Json<JsearchResponse>,
) -> Response
where
    R: LeadRepository + 'static,
    N: LeadNotifier + 'static,
{
    rank_response(service, payload.into_postings(), Utc::now()).await
}

/// Batch scoring fans out over worker threads, so it runs off the async executor.
async fn rank_response<R, N>(
    service: Arc<LeadService<R, N>>,
    postings: Vec<JobPosting>,
    now: DateTime<Utc>,
) -> Response
where
    R: LeadRepository + 'static,
    N: LeadNotifier + 'static,
{
    match tokio::task::spawn_blocking(move || service.rank(postings, now)).await {
        Ok(outcome) => (StatusCode::OK, Json(ScoreResponse::from(outcome))).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "scoring task failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "scoring task failed")
        }
    }
}

pub(crate) async fn log_lead_handler<R, N>(
    State(service): State<Arc<LeadService<R, N>>>,
    Json(request): Json<LogLeadRequest>,
) -> Response
where
    R: LeadRepository + 'static,
    N: LeadNotifier + 'static,
{
    let now = request.now.unwrap_or_else(Utc::now);
    let job = service.score(&request.posting, now);
    let source = request
        .source
        .filter(|source| !source.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LEAD_SOURCE.to_string());

    match service.log_lead(job, source, now) {
        Ok(record) => (StatusCode::CREATED, Json(record.view())).into_response(),
        Err(LeadServiceError::Repository(RepositoryError::Conflict)) => {
            error_response(StatusCode::CONFLICT, "lead already exists")
        }
        Err(other) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &other.to_string()),
    }
}

pub(crate) async fn lead_handler<R, N>(
    State(service): State<Arc<LeadService<R, N>>>,
    Path(lead_id): Path<String>,
) -> Response
where
    R: LeadRepository + 'static,
    N: LeadNotifier + 'static,
{
    let id = LeadId(lead_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, Json(record.view())).into_response(),
        Err(LeadServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "lead_id": id.0,
                "error": "lead not found",
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(other) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &other.to_string()),
    }
}

pub(crate) async fn alert_handler<R, N>(
    State(service): State<Arc<LeadService<R, N>>>,
    Path(lead_id): Path<String>,
) -> Response
where
    R: LeadRepository + 'static,
    N: LeadNotifier + 'static,
{
    match service.alert(&LeadId(lead_id)) {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(LeadServiceError::Repository(RepositoryError::NotFound)) => {
            error_response(StatusCode::NOT_FOUND, "lead not found")
        }
        Err(LeadServiceError::Notifier(error)) => {
            error_response(StatusCode::BAD_GATEWAY, &error.to_string())
        }
        Err(other) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &other.to_string()),
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
