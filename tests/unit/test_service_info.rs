use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use gps_tracker_api::application::services::location_service::LocationService;
use gps_tracker_api::config::TrackerApiConfig;
use gps_tracker_api::presentation::server::router;
use gps_tracker_api::session::session::HttpSessionClientFactory;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn get_json(uri: &str) -> (StatusCode, Value) {
    let factory = HttpSessionClientFactory::new(Arc::new(TrackerApiConfig {
        base_url: "http://127.0.0.1:9/".to_string(),
        timeout: 1,
    }));
    let app = router(Arc::new(LocationService::new(factory)));

    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get_json("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"status": "healthy", "service": "GPS OBD2 Tracker API"})
    );
}

#[tokio::test]
async fn test_root_metadata() {
    let (status, body) = get_json("/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "GPS OBD2 Tracker API");
    assert_eq!(body["version"], "1.0.0");
    assert!(body["endpoints"]["GET /health"].is_string());
    assert!(body["endpoints"]["POST /get-device-location"].is_string());
    assert!(body["example_usage"]["POST"]
        .as_str()
        .unwrap()
        .contains("9176502935"));
}
