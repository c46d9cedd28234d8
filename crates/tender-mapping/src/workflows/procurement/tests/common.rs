use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::procurement::{
    procurement_router, ProcurementEngine, ProcurementInput, ProcurementResult, WorkType,
};

pub(super) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub(super) fn engine() -> ProcurementEngine {
    ProcurementEngine::reference().expect("reference policy is valid")
}

pub(super) fn calculate(work_type: WorkType, budget: f64, months: u32) -> ProcurementResult {
    let input = ProcurementInput::new(
        work_type,
        budget,
        date(2025, 3, 1),
        months,
        Vec::<NaiveDate>::new(),
    )
    .expect("valid input");
    engine().calculate(&input).expect("calculation succeeds")
}

pub(super) fn router() -> Router {
    procurement_router(Arc::new(engine()))
}

pub(super) fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
