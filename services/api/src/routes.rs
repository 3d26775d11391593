use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

use dealscope::scoring::{deal_router, DealScoreRepository, DealService};
use dealscope::underwriting::underwrite_router;

pub(crate) fn with_core_routes<R>(service: Arc<DealService<R>>) -> axum::Router
where
    R: DealScoreRepository + 'static,
{
    deal_router(service)
        .merge(underwrite_router())
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{sample_metrics, InMemoryDealScoreRepository};
    use axum::body::Body;
    use axum::http::Request;
    use dealscope::scoring::ScoringEngine;
    use tower::ServiceExt;

    fn seeded_router() -> axum::Router {
        let repository = Arc::new(InMemoryDealScoreRepository::default());
        let service = Arc::new(DealService::new(ScoringEngine::standard(), repository));
        service
            .refresh(&sample_metrics())
            .expect("sample metrics refresh");
        with_core_routes(service)
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn deals_endpoint_lists_seeded_sample_zips() {
        let response = seeded_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/deals?scenario=S2&limit=3")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("handler responds");
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(body["count"], 3);
        let deals = body["deals"].as_array().expect("deals array");
        let scores: Vec<u64> = deals
            .iter()
            .map(|deal| deal["score"].as_u64().expect("numeric score"))
            .collect();
        let mut sorted = scores.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(scores, sorted, "listing arrives ranked");
    }

    #[tokio::test]
    async fn underwrite_endpoint_is_mounted() {
        let payload = json!({
            "purchase_price": 200_000.0,
            "monthly_rent": 1_800.0,
            "loan_term_years": 30,
            "after_repair_value": 230_000.0
        });
        let response = seeded_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/underwrite")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("handler responds");
        assert_eq!(response.status(), StatusCode::OK);
    }
}
