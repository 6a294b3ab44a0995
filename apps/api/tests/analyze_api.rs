//! Integration tests for the stateless analysis and spectrum endpoints.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{build_test_app, expect_json, get, post_json};
use moodmeter_api::errors::ServiceError;
use moodmeter_api::spectrum::{energy_to_color, hsl_to_hex};

#[tokio::test]
async fn health_check_returns_ok() {
    let app = build_test_app();
    let json = expect_json(get(&app.router, "/health").await, StatusCode::OK).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "moodmeter-api");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn analyze_returns_color_for_energy() {
    let app = build_test_app();
    app.analyzer.push_energy(0.72);

    let response = post_json(
        &app.router,
        "/api/v1/analyze",
        json!({ "text": "  Can't sit still today.  " }),
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;

    let expected = energy_to_color(0.72);
    assert_eq!(json["energy"], 0.72);
    assert_eq!(json["level"], "elevated");
    assert_eq!(json["color"], serde_json::to_value(expected).unwrap());
    assert_eq!(json["hex"], hsl_to_hex(expected));
    assert_eq!(json["alternatives"].as_array().unwrap().len(), 5);
    assert_eq!(json["alternatives"][2], serde_json::to_value(expected).unwrap());
    assert_eq!(app.analyzer.seen(), vec!["Can't sit still today.".to_string()]);
}

#[tokio::test]
async fn analyze_blank_text_is_rejected_without_calling_analyzer() {
    let app = build_test_app();
    let response = post_json(&app.router, "/api/v1/analyze", json!({ "text": " \n " })).await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;

    assert_eq!(json["error"]["code"], "INVALID_INPUT");
    assert_eq!(json["error"]["message"], "Please write something first.");
    assert!(app.analyzer.seen().is_empty());
}

#[tokio::test]
async fn analyze_malformed_body_gets_error_envelope() {
    let app = build_test_app();
    for body in [json!({}), json!({ "text": 42 })] {
        let response = post_json(&app.router, "/api/v1/analyze", body).await;
        let json = expect_json(response, StatusCode::BAD_REQUEST).await;
        assert_eq!(json["error"]["code"], "INVALID_INPUT");
        assert_eq!(json["error"]["message"], "Invalid request body.");
    }
    assert!(app.analyzer.seen().is_empty());
}

#[tokio::test]
async fn analyze_rate_limit_carries_retry_after() {
    let app = build_test_app();
    app.analyzer.push_error(ServiceError::RateLimited {
        retry_after: Some(12),
    });

    let response = post_json(&app.router, "/api/v1/analyze", json!({ "text": "hello" })).await;
    let json = expect_json(response, StatusCode::TOO_MANY_REQUESTS).await;

    assert_eq!(json["error"]["code"], "RATE_LIMITED");
    assert_eq!(
        json["error"]["message"],
        "Taking a breather. Try again in a moment."
    );
    assert_eq!(json["error"]["retry_after"], 12);
}

#[tokio::test]
async fn analyze_ai_unavailable_maps_to_503() {
    let app = build_test_app();
    app.analyzer.push_error(ServiceError::AiUnavailable);

    let response = post_json(&app.router, "/api/v1/analyze", json!({ "text": "hello" })).await;
    let json = expect_json(response, StatusCode::SERVICE_UNAVAILABLE).await;
    assert_eq!(json["error"]["code"], "AI_UNAVAILABLE");
    assert!(json["error"].get("retry_after").is_none());
}

#[tokio::test]
async fn spectrum_has_eleven_stops_and_css() {
    let app = build_test_app();
    let json = expect_json(get(&app.router, "/api/v1/spectrum").await, StatusCode::OK).await;

    let stops = json["stops"].as_array().unwrap();
    assert_eq!(stops.len(), 11);
    assert_eq!(stops[0]["position"], 0);
    assert_eq!(stops[10]["position"], 100);
    assert_eq!(stops[0]["hex"], hsl_to_hex(energy_to_color(0.0)));
    assert!(json["css"]
        .as_str()
        .unwrap()
        .starts_with("linear-gradient(to right, "));
}
