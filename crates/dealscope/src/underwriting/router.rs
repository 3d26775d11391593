use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::calculator::underwrite;
use super::domain::UnderwritingInput;

/// Router builder for the calculator endpoint. The computation is pure and
/// stateless, so the router carries no state.
pub fn underwrite_router() -> Router {
    Router::new().route("/api/v1/underwrite", post(underwrite_handler))
}

pub(crate) async fn underwrite_handler(
    axum::Json(input): axum::Json<UnderwritingInput>,
) -> Response {
    match underwrite(&input) {
        Ok(output) => (StatusCode::OK, axum::Json(output)).into_response(),
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
    }
}
