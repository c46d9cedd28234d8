use super::common::*;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::workflows::matching::matching_router;

#[tokio::test]
async fn map_route_returns_match_with_attribute_list() {
    let (service, _) = memory_service();
    let response = matching_router(service)
        .oneshot(json_request(
            "/api/tender-mapping/map",
            serde_json::to_value(education_selections()).expect("selections serialize"),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["matched_tender_type"]["name"],
        "IT equipment supply tender"
    );
    assert_eq!(payload["confidence_score"], 1.0);
    let attributes = payload["matched_tender_type"]["attributes"]
        .as_array()
        .expect("attribute list");
    assert!(attributes
        .iter()
        .all(|attribute| attribute["name"].is_string() && attribute["value"].is_string()));
}

#[tokio::test]
async fn map_route_rejects_non_object_bodies() {
    let (service, _) = memory_service();
    let response = matching_router(service)
        .oneshot(json_request("/api/tender-mapping/map", json!(["Budget"])))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn map_route_treats_non_string_values_as_unmatched() {
    let (service, _) = memory_service();
    let response = matching_router(service)
        .oneshot(json_request(
            "/api/tender-mapping/map",
            json!({
                "Government entity": "Ministry of Education",
                "Products and services": "IT equipment",
                "Budget": 5,
                "Duration": null,
                "Supplier classification": ["Accredited suppliers"],
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["matched_tender_type"]["name"],
        "IT equipment supply tender"
    );
    assert_eq!(payload["confidence_score"], 0.4);
}

#[tokio::test]
async fn rules_route_persists_new_rule() {
    let (service, repository) = memory_service();
    let response = matching_router(service)
        .oneshot(json_request(
            "/api/tender-mapping/rules",
            json!({
                "conditions": { "Payment terms": "Advance payment" },
                "matched_tender_type": "Prepaid supply tender",
                "attributes": { "Supply period": "15 days" },
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["success"], true);
    assert_eq!(repository.stored().len(), 6);
}

#[tokio::test]
async fn rules_route_rejects_invalid_rule() {
    let (service, _) = memory_service();
    let response = matching_router(service)
        .oneshot(json_request(
            "/api/tender-mapping/rules",
            json!({ "conditions": {}, "matched_tender_type": "Empty tender" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rules_route_reports_persistence_failure() {
    let response = matching_router(read_only_service())
        .oneshot(json_request(
            "/api/tender-mapping/rules",
            json!({
                "conditions": { "Budget": "< 500,000" },
                "matched_tender_type": "Small supply tender",
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert!(payload["error"].as_str().is_some_and(|error| error.contains("disk offline")));
}

#[tokio::test]
async fn categories_route_lists_options() {
    let (service, _) = memory_service();
    let response = matching_router(service)
        .oneshot(
            Request::get("/api/tender-mapping/categories")
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload[0]["category"], "Budget");
    assert_eq!(payload[0]["options"].as_array().map(Vec::len), Some(2));
}
