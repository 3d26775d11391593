use crate::cli::ServeArgs;
use crate::infra::{sample_metrics, AppState, InMemoryDealScoreRepository};
use crate::routes::with_core_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

use dealscope::config::AppConfig;
use dealscope::error::AppError;
use dealscope::scoring::{DealService, MetricsCatalog, ScoringEngine};
use dealscope::telemetry;

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

    let repository = Arc::new(InMemoryDealScoreRepository::default());
    let deal_service = Arc::new(DealService::new(ScoringEngine::standard(), repository));

    let metrics = match &config.seed.metrics_csv {
        Some(path) => {
            let catalog = MetricsCatalog::from_path(path)?;
            info!(path = %path.display(), zips = catalog.len(), "metrics csv loaded");
            catalog.into_records()
        }
        None => sample_metrics(),
    };
    let summary = deal_service.refresh(&metrics)?;
    info!(
        zips = summary.zips,
        scores = summary.scores_written,
        "deal scores seeded"
    );

    let app = with_core_routes(deal_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "deal scoring service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
