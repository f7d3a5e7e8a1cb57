use crate::cli::ServeArgs;
use crate::infra::{seeded_store, AppState};
use crate::routes::with_company_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use hireboard::company::{CompanyServices, FsDocumentStore};
use hireboard::config::AppConfig;
use hireboard::error::AppError;
use hireboard::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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
    if let Some(root) = args.document_root.take() {
        config.storage.document_root = root;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let documents = Arc::new(FsDocumentStore::new(config.storage.document_root.clone()));
    let services = Arc::new(CompanyServices::new(Arc::new(seeded_store()), documents));

    let app = with_company_routes(services)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        document_root = %config.storage.document_root.display(),
        "hiring desk api ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
