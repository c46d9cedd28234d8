use super::common::*;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn calculate_route_returns_flat_result() {
    let response = router()
        .oneshot(json_request(
            "/api/tender-mapping/calculate",
            json!({
                "work_type": "general work",
                "budget": 600000,
                "start_date": "2025-03-01",
                "project_duration": 12,
                "holidays": ["2025-05-01", "2025-05-02"],
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["procurement_type"], "General Competition");
    assert_eq!(payload["announcement_period"], 15);
    assert_eq!(payload["final_guarantee"], "not required");
    assert_eq!(payload["file_structure"], "one envelope");
    assert_eq!(payload["total_duration"], 68);

    let stages = payload["stages"].as_array().expect("stages array");
    assert_eq!(stages.len(), 8);
    assert_eq!(stages[0]["start_date"], "2025-03-01");
    assert_eq!(stages[0]["is_working_days"], false);
    assert_eq!(stages[1]["notes"], "");
}

#[tokio::test]
async fn calculate_route_lists_missing_fields() {
    let response = router()
        .oneshot(json_request(
            "/api/tender-mapping/calculate",
            json!({ "work_type": "general work" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    let message = payload["error"].as_str().expect("error message");
    assert!(message.contains("budget, start_date, project_duration"), "{message}");
}

#[tokio::test]
async fn calculate_route_rejects_malformed_dates() {
    let response = router()
        .oneshot(json_request(
            "/api/tender-mapping/calculate",
            json!({
                "work_type": "general work",
                "budget": 1000,
                "start_date": "01/03/2025",
                "project_duration": 3,
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .is_some_and(|message| message.contains("start_date")));
}

#[tokio::test]
async fn calculate_route_rejects_unknown_work_type_and_text_budget() {
    for body in [
        json!({
            "work_type": "space exploration",
            "budget": 1000,
            "start_date": "2025-03-01",
            "project_duration": 3,
        }),
        json!({
            "work_type": "general work",
            "budget": "a lot",
            "start_date": "2025-03-01",
            "project_duration": 3,
        }),
    ] {
        let response = router()
            .oneshot(json_request("/api/tender-mapping/calculate", body))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn work_types_route_lists_catalogue() {
    let response = router()
        .oneshot(
            Request::get("/api/tender-mapping/work-types")
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let entries = payload.as_array().expect("array");
    assert_eq!(entries.len(), 12);
    assert_eq!(entries[3]["id"], "consulting_services");
    assert!(entries[3]["arabic_name"].is_string());
}
