//! Import, score, log and alert a lead through the public HTTP router.

mod common {
    use std::sync::{Arc, Mutex};

    use jobbot::workflows::jobs::leads::{
        LeadAlert, LeadId, LeadNotifier, LeadRecord, LeadRepository, NotifierError,
        RepositoryError,
    };

    #[derive(Default)]
    pub(super) struct SheetLog {
        rows: Mutex<Vec<LeadRecord>>,
    }

    impl LeadRepository for SheetLog {
        fn insert(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
            let mut rows = self.rows.lock().expect("sheet mutex poisoned");
            rows.push(record.clone());
            Ok(record)
        }

        fn update(&self, record: LeadRecord) -> Result<(), RepositoryError> {
            let mut rows = self.rows.lock().expect("sheet mutex poisoned");
            let row = rows
                .iter_mut()
                .find(|row| row.lead_id == record.lead_id)
                .ok_or(RepositoryError::NotFound)?;
            *row = record;
            Ok(())
        }

        fn fetch(&self, id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
            let rows = self.rows.lock().expect("sheet mutex poisoned");
            Ok(rows.iter().find(|row| &row.lead_id == id).cloned())
        }

        fn recent(&self, limit: usize) -> Result<Vec<LeadRecord>, RepositoryError> {
            let rows = self.rows.lock().expect("sheet mutex poisoned");
            Ok(rows.iter().rev().take(limit).cloned().collect())
        }
    }

    #[derive(Default)]
    pub(super) struct Outbox {
        pub(super) sent: Mutex<Vec<LeadAlert>>,
    }

    impl LeadNotifier for Outbox {
        fn notify(&self, alert: LeadAlert) -> Result<(), NotifierError> {
            self.sent.lock().expect("outbox mutex poisoned").push(alert);
            Ok(())
        }
    }

    pub(super) fn shared() -> (Arc<SheetLog>, Arc<Outbox>) {
        (Arc::new(SheetLog::default()), Arc::new(Outbox::default()))
    }
}

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use serde_json::{json, Value};
use tower::ServiceExt;

use jobbot::workflows::jobs::leads::{jobs_router, write_sheet, LeadRepository, LeadService};
use jobbot::workflows::jobs::scoring::ScoringProfile;

async fn read_json(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).expect("serialize body")))
        .expect("request builds")
}

fn strong_posting() -> Value {
    json!({
        "title": "Senior Data Scientist",
        "company": "Acme Analytics",
        "location": "Bengaluru",
        "description": "Machine learning and deep learning with Python, SQL, pandas, numpy, scikit-learn, forecasting, NLP, AWS, Streamlit, SHAP, ETL, Power BI, prophet, arima, gcp. Reach us at hiring@acme.example",
        "salary_text": "35 LPA",
        "apply_link": "https://careers.acme.example/ds-7",
        "posted_at": "2025-10-15T06:00:00Z"
    })
}

#[tokio::test]
async fn lead_lifecycle_through_router() {
    let (sheet, outbox) = common::shared();
    let config = ScoringProfile::Hybrid.config().expect("hybrid preset");
    let service = Arc::new(LeadService::new(sheet.clone(), outbox.clone(), config));
    let router = jobs_router(service);

    let scored = router
        .clone()
        .oneshot(post_json(
            "/api/v1/jobs/score",
            &json!({ "postings": [strong_posting()], "now": "2025-10-16T09:30:00Z" }),
        ))
        .await
        .expect("score route executes");
    assert_eq!(scored.status(), StatusCode::OK);
    let scored = read_json(scored).await;
    assert_eq!(scored["summary"], "1 lead found");
    assert_eq!(scored["jobs"][0]["role_category"], "data_scientist");
    assert_eq!(scored["jobs"][0]["recommended_action"], "apply");

    let logged = router
        .clone()
        .oneshot(post_json(
            "/api/v1/leads",
            &json!({
                "posting": strong_posting(),
                "source": "jsearch",
                "now": "2025-10-16T09:30:00Z"
            }),
        ))
        .await
        .expect("log route executes");
    assert_eq!(logged.status(), StatusCode::CREATED);
    let logged = read_json(logged).await;
    let lead_id = logged["lead_id"].as_str().expect("lead id").to_string();

    let alerted = router
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/leads/{lead_id}/alert"),
            &json!({}),
        ))
        .await
        .expect("alert route executes");
    assert_eq!(alerted.status(), StatusCode::OK);
    let alerted = read_json(alerted).await;
    assert_eq!(alerted["outcome"], "sent");
    let message = alerted["message"].as_str().expect("message");
    assert!(message.starts_with("High-match job: Senior Data Scientist at Acme Analytics - Score"));

    let fetched = router
        .clone()
        .oneshot(
            Request::get(format!("/api/v1/leads/{lead_id}"))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("lead route executes");
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(read_json(fetched).await["status"], "alerted");

    let missing = router
        .oneshot(
            Request::get("/api/v1/leads/lead-unknown")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("lead route executes");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    assert_eq!(outbox.sent.lock().expect("outbox mutex poisoned").len(), 1);

    let records = sheet.recent(10).expect("recent leads");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].notes, "hiring@acme.example");

    let mut exported = Vec::new();
    write_sheet(&mut exported, &records).expect("export succeeds");
    let exported = String::from_utf8(exported).expect("utf8 sheet");
    assert!(exported.lines().nth(1).is_some_and(|row| row.ends_with(",alerted")));
}
