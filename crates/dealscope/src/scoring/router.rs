use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{DealScore, ZipMetrics};
use super::repository::DealScoreRepository;
use super::service::{DealFilter, DealService, DealServiceError};
use super::weights::Scenario;
use super::ScoringError;

/// Router builder exposing the deals listing and the single-record scoring
/// endpoint. Pagination, sorting direction, and auth belong to the caller.
pub fn deal_router<R>(service: Arc<DealService<R>>) -> Router
where
    R: DealScoreRepository + 'static,
{
    Router::new()
        .route("/api/v1/deals", get(deals_handler::<R>))
        .route("/api/v1/score", post(score_handler::<R>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub struct DealsQuery {
    /// Scenario name; the listing defaults to the balanced profile.
    pub scenario: Option<String>,
    pub state: Option<String>,
    pub min_score: Option<u8>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct DealsResponse {
    pub scenario: Scenario,
    pub count: usize,
    pub deals: Vec<DealScore>,
}

pub(crate) async fn deals_handler<R>(
    State(service): State<Arc<DealService<R>>>,
    Query(query): Query<DealsQuery>,
) -> Response
where
    R: DealScoreRepository + 'static,
{
    let scenario = match query.scenario.as_deref() {
        Some(raw) => match Scenario::parse(raw) {
            Ok(scenario) => scenario,
            Err(error) => return bad_request(&error),
        },
        None => Scenario::S2,
    };

    let filter = DealFilter {
        state: query.state,
        min_score: query.min_score,
        limit: query.limit,
    };

    match service.ranked(scenario, &filter) {
        Ok(deals) => {
            let body = DealsResponse {
                scenario,
                count: deals.len(),
                deals,
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(error) => service_error(error),
    }
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub scenario: String,
    pub metrics: ZipMetrics,
}

pub(crate) async fn score_handler<R>(
    State(service): State<Arc<DealService<R>>>,
    axum::Json(request): axum::Json<ScoreRequest>,
) -> Response
where
    R: DealScoreRepository + 'static,
{
    let scenario = match Scenario::parse(&request.scenario) {
        Ok(scenario) => scenario,
        Err(error) => return bad_request(&error),
    };

    match service.score(&request.metrics, scenario) {
        Ok(score) => (StatusCode::OK, axum::Json(score)).into_response(),
        Err(DealServiceError::Scoring(error)) => bad_request(&error),
        Err(error) => service_error(error),
    }
}

fn bad_request(error: &ScoringError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
}

fn service_error(error: DealServiceError) -> Response {
    match error {
        DealServiceError::Scoring(error) => bad_request(&error),
        DealServiceError::Repository(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
