use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryLeadNotifier, InMemoryLeadRepository};
use crate::routes::with_job_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use jobbot::config::AppConfig;
use jobbot::error::AppError;
use jobbot::telemetry;
use jobbot::workflows::jobs::leads::LeadService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;
    let scoring = config.scoring.resolve()?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryLeadRepository::default());
    let notifier = Arc::new(InMemoryLeadNotifier::default());
    let lead_service = Arc::new(LeadService::new(repository, notifier, scoring));

    let app = with_job_routes(lead_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        profile = %config.scoring.profile,
        %addr,
        "job scoring service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
