use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::warn;

use super::domain::{MappingRule, Selections};
use super::repository::RuleRepository;
use super::service::{MatchingServiceError, TenderMatchingService};

/// Router exposing tender-type matching and rule management.
pub fn matching_router<R>(service: Arc<TenderMatchingService<R>>) -> Router
where
    R: RuleRepository + 'static,
{
    Router::new()
        .route("/api/tender-mapping/map", post(map_handler::<R>))
        .route("/api/tender-mapping/rules", post(add_rule_handler::<R>))
        .route("/api/tender-mapping/categories", get(categories_handler::<R>))
        .with_state(service)
}

pub(crate) async fn map_handler<R>(
    State(service): State<Arc<TenderMatchingService<R>>>,
    payload: Result<Json<BTreeMap<String, Value>>, JsonRejection>,
) -> Response
where
    R: RuleRepository + 'static,
{
    match payload {
        Ok(Json(body)) => {
            let result = service.map(&string_selections(body));
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(rejection) => bad_request(rejection),
    }
}

pub(crate) async fn add_rule_handler<R>(
    State(service): State<Arc<TenderMatchingService<R>>>,
    payload: Result<Json<MappingRule>, JsonRejection>,
) -> Response
where
    R: RuleRepository + 'static,
{
    let Json(rule) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return bad_request(rejection),
    };

    match service.add_rule(rule) {
        Ok(()) => {
            let payload = json!({
                "success": true,
                "message": "mapping rule saved",
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(MatchingServiceError::InvalidRule(reason)) => {
            let payload = json!({
                "error": format!("invalid mapping rule: {reason}"),
            });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn categories_handler<R>(
    State(service): State<Arc<TenderMatchingService<R>>>,
) -> Response
where
    R: RuleRepository + 'static,
{
    match service.categories() {
        Ok(categories) => (StatusCode::OK, Json(categories)).into_response(),
        Err(err) => {
            let payload = json!({
                "error": err.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

/// Keeps string-valued entries; any other value can never equal a rule condition.
fn string_selections(body: BTreeMap<String, Value>) -> Selections {
    body.into_iter()
        .filter_map(|(category, value)| match value {
            Value::String(value) => Some((category, value)),
            _ => None,
        })
        .collect()
}

fn bad_request(rejection: JsonRejection) -> Response {
    warn!(error = %rejection.body_text(), "matching request rejected");
    let payload = json!({
        "error": rejection.body_text(),
    });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}
