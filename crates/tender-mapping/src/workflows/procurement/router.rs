use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::{error, warn};

use super::domain::ProcurementError;
use super::engine::ProcurementEngine;
use super::views::{work_type_catalogue, CalculateRequest, ProcurementResultView};

/// Router exposing the timeline calculation and the work-type catalogue.
pub fn procurement_router(engine: Arc<ProcurementEngine>) -> Router {
    Router::new()
        .route("/api/tender-mapping/calculate", post(calculate_handler))
        .route("/api/tender-mapping/work-types", get(work_types_handler))
        .with_state(engine)
}

pub(crate) async fn calculate_handler(
    State(engine): State<Arc<ProcurementEngine>>,
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "calculation request rejected");
            let payload = json!({
                "error": rejection.body_text(),
            });
            return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
        }
    };

    let result = request
        .into_input()
        .map_err(ProcurementError::from)
        .and_then(|input| engine.calculate(&input));

    match result {
        Ok(result) => {
            let view = ProcurementResultView::from(&result);
            (StatusCode::OK, Json(view)).into_response()
        }
        Err(err) if err.is_client_error() => {
            warn!(error = %err, "calculation input rejected");
            let payload = json!({
                "error": err.to_string(),
            });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        Err(err) => {
            error!(error = %err, "calculation failed");
            let payload = json!({
                "error": err.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn work_types_handler() -> Json<Vec<super::views::WorkTypeView>> {
    Json(work_type_catalogue())
}
