use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryProfileStore, UnconfiguredFinder, UnconfiguredRecognizer};
use crate::routes::with_advisor_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use purchase_advisor::advisor::PurchaseAdvisor;
use purchase_advisor::config::AppConfig;
use purchase_advisor::error::AppError;
use purchase_advisor::telemetry;
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

    let profiles = Arc::new(InMemoryProfileStore::default());
    let recognizer = Arc::new(UnconfiguredRecognizer);
    let advisor = Arc::new(
        PurchaseAdvisor::new(profiles, recognizer, config.decision.decision_config())
            .with_alternative_finder(Arc::new(UnconfiguredFinder)),
    );

    let app = with_advisor_routes(advisor)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        strategy = config.decision.strategy.label(),
        %addr,
        "purchase advisor ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
