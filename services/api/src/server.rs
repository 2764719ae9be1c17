use crate::cli::ServeArgs;
use crate::infra::{AppState, AssistanceServices};
use crate::routes::with_operational_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use fas_core::assistance::{assistance_router, EligibilityEngine};
use fas_core::config::AppConfig;
use fas_core::error::AppError;
use fas_core::telemetry;
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

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let engine = EligibilityEngine::new(config.evaluation.clock());
    let services = AssistanceServices::in_memory(engine);

    let app = with_operational_routes(assistance_router(
        services.applicants,
        services.schemes,
        services.applications,
    ))
    .layer(Extension(app_state))
    .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        reference_date = ?config.evaluation.reference_date,
        "assistance scheme api ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
