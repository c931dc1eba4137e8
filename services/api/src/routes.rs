use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use jobbot::workflows::jobs::leads::{jobs_router, LeadNotifier, LeadRepository, LeadService};
use jobbot::workflows::jobs::scoring::{ScoringConfigError, ScoringProfile};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub(crate) struct ProfileSummary {
    pub(crate) name: &'static str,
    pub(crate) skill_keywords: usize,
    pub(crate) roles: Vec<String>,
    pub(crate) target_salary_lpa: f64,
    pub(crate) min_salary_lpa: f64,
    pub(crate) max_posting_age_days: i64,
    pub(crate) apply_threshold: u8,
    pub(crate) outreach_threshold: u8,
}

impl ProfileSummary {
    pub(crate) fn describe(profile: ScoringProfile) -> Result<Self, ScoringConfigError> {
        let config = profile.config()?;
        let thresholds = config.thresholds();
        Ok(Self {
            name: profile.name(),
            skill_keywords: config.skill_keywords().len(),
            roles: config.roles().iter().map(|role| role.name.clone()).collect(),
            target_salary_lpa: config.target_salary_lpa(),
            min_salary_lpa: config.min_salary_lpa(),
            max_posting_age_days: config.max_posting_age_days(),
            apply_threshold: thresholds.apply_threshold,
            outreach_threshold: thresholds.outreach_threshold,
        })
    }
}

pub(crate) fn with_job_routes<R, N>(service: Arc<LeadService<R, N>>) -> axum::Router
where
    R: LeadRepository + 'static,
    N: LeadNotifier + 'static,
{
    jobs_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/profiles", axum::routing::get(profiles_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn profiles_endpoint() -> impl IntoResponse {
    let summaries: Result<Vec<_>, _> = ScoringProfile::ALL
        .into_iter()
        .map(ProfileSummary::describe)
        .collect();

    match summaries {
        Ok(summaries) => (StatusCode::OK, Json(json!({ "profiles": summaries }))),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": err.to_string() })),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{InMemoryLeadNotifier, InMemoryLeadRepository};
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn router() -> axum::Router {
        let config = ScoringProfile::Hybrid.config().expect("hybrid preset");
        let service = Arc::new(LeadService::new(
            Arc::new(InMemoryLeadRepository::default()),
            Arc::new(InMemoryLeadNotifier::default()),
            config,
        ));
        with_job_routes(service)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json payload")
    }

    #[tokio::test]
    async fn health_route_reports_ok() {
        let response = router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn profiles_route_lists_every_preset() {
        let response = router()
            .oneshot(Request::get("/api/v1/profiles").body(Body::empty()).unwrap())
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = body_json(response).await;
        let names: Vec<&str> = payload["profiles"]
            .as_array()
            .expect("profile list")
            .iter()
            .filter_map(|profile| profile["name"].as_str())
            .collect();
        assert_eq!(names, vec!["hybrid", "manager", "radar"]);
        assert_eq!(payload["profiles"][2]["outreach_threshold"], 75);
    }

    #[tokio::test]
    async fn score_route_is_mounted() {
        let response = router()
            .oneshot(
                Request::post("/api/v1/jobs/score")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"postings": []}"#))
                    .unwrap(),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["summary"], "0 leads found");
    }

    #[tokio::test]
    async fn alert_route_reaches_the_notifier() {
        let notifier = Arc::new(InMemoryLeadNotifier::default());
        let service = Arc::new(LeadService::new(
            Arc::new(InMemoryLeadRepository::default()),
            notifier.clone(),
            ScoringProfile::Hybrid.config().expect("hybrid preset"),
        ));
        let router = with_job_routes(service);
        let posting = json!({
            "title": "Senior Data Scientist",
            "company": "Acme Analytics",
            "description": "Machine learning and deep learning with Python, SQL, pandas, numpy, scikit-learn, forecasting, NLP, AWS, Streamlit, SHAP, ETL, Power BI, prophet, arima, gcp",
            "salary_text": "35 LPA",
            "apply_link": "https://careers.acme.example/ds-7",
            "posted_at": "2025-10-15T06:00:00Z"
        });

        let logged = router
            .clone()
            .oneshot(
                Request::post("/api/v1/leads")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({ "posting": posting, "now": "2025-10-16T09:30:00Z" }).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .expect("route executes");
        assert_eq!(logged.status(), StatusCode::CREATED);
        let lead_id = body_json(logged).await["lead_id"]
            .as_str()
            .expect("lead id")
            .to_string();

        let alerted = router
            .oneshot(
                Request::post(format!("/api/v1/leads/{lead_id}/alert"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");
        assert_eq!(alerted.status(), StatusCode::OK);

        let alerts = notifier.alerts();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].lead_id.0, lead_id);
        assert!(alerts[0]
            .message
            .starts_with("High-match job: Senior Data Scientist at Acme Analytics - Score"));
    }
}
