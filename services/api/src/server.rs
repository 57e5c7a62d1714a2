use crate::cli::ServeArgs;
use crate::infra::{build_resolver, builtin_rule_sets, AppState};
use crate::routes::with_handling_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use case_handling::config::AppConfig;
use case_handling::error::AppError;
use case_handling::telemetry;
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

    let resolver = Arc::new(build_resolver(&config.resolver, builtin_rule_sets(None)));
    let jurisdictions: Vec<&str> = resolver
        .jurisdictions()
        .iter()
        .map(|(department, _)| department)
        .collect();
    info!(
        national = %resolver.national_rule_set(),
        ?jurisdictions,
        "case handling rule sets configured"
    );

    let app = with_handling_routes(resolver)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "case handling service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
