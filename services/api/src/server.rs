use crate::cli::ServeArgs;
use crate::infra::{
    evaluation_config_from, AppState, InMemoryAdmissionsRepository, InMemoryAuditSink,
};
use crate::routes::with_admission_routes;
use admission_ai::config::AppConfig;
use admission_ai::error::AppError;
use admission_ai::telemetry;
use admission_ai::workflows::admissions::applications::AdmissionsService;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
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

    let repository = Arc::new(InMemoryAdmissionsRepository::with_programme_catalogue());
    let audit = Arc::new(InMemoryAuditSink::default());
    let admissions_service = Arc::new(AdmissionsService::new(
        repository,
        audit,
        evaluation_config_from(&config),
    ));

    let app = with_admission_routes(admissions_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "admissions service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
