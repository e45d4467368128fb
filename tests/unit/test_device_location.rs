/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use std::sync::Arc;

use assert_json_diff::assert_json_include;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use gps_tracker_api::application::services::location_service::LocationService;
use gps_tracker_api::config::TrackerApiConfig;
use gps_tracker_api::presentation::server::router;
use gps_tracker_api::session::session::HttpSessionClientFactory;
use gps_tracker_api::utils::logger::setup_logger;
use mockito::{Matcher, Mock, Server, ServerGuard};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app(server: &ServerGuard) -> Router {
    let config = TrackerApiConfig {
        base_url: format!("{}/", server.url()),
        timeout: 5,
    };
    let factory = HttpSessionClientFactory::new(Arc::new(config));
    router(Arc::new(LocationService::new(factory)))
}

async fn mock_login(server: &mut ServerGuard) -> Mock {
    server
        .mock("POST", "/api/session")
        .match_body(Matcher::Json(json!({"deviceId": "9176502935", "password": "123456"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true, "token": "tok-1"}"#)
        .create_async()
        .await
}

async fn mock_tracking(server: &mut ServerGuard, body: &str) -> Mock {
    server
        .mock("GET", "/api/tracking")
        .match_query(Matcher::UrlEncoded("deviceId".into(), "9176502935".into()))
        .match_header("X-Session-Token", "tok-1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(content_type: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri("/get-device-location");
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn test_get_returns_normalized_location() {
    setup_logger();
    let mut server = Server::new_async().await;
    let login = mock_login(&mut server).await;
    let tracking = mock_tracking(&mut server, r#"{"lat": 1.23, "lng": 4.56, "speed": 0}"#).await;

    let (status, body) = send(
        app(&server),
        get("/get-device-location?id=9176502935&password=123456"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["device_id"], "9176502935");
    assert_eq!(body["location"]["latitude"], 1.23);
    assert_eq!(body["location"]["longitude"], 4.56);
    assert_eq!(body["location"]["speed"], 0.0);
    assert!(body["location"]["course"].is_null());
    assert!(body["location"]["iccid"].is_null());
    assert_eq!(body["location"].as_object().unwrap().len(), 14);

    login.assert_async().await;
    tracking.assert_async().await;
}

#[tokio::test]
async fn test_post_json_with_full_telemetry() {
    setup_logger();
    let mut server = Server::new_async().await;
    let _login = mock_login(&mut server).await;
    let _tracking = mock_tracking(
        &mut server,
        r#"{
            "lat": "22.5431", "lng": "114.0579", "speed": "35.5", "course": 90,
            "isGPS": 1, "isStop": 0, "battery": 76, "batteryStatus": "Normal",
            "positionTime": "2024-05-01 10:22:31", "status": "Moving",
            "deviceName": "Van 7", "serialNumber": "SN-001",
            "VIN": "1HGCM82633A004352", "ICCID": "8986001234567890123"
        }"#,
    )
    .await;

    let (status, body) = send(
        app(&server),
        post(
            Some("application/json"),
            r#"{"id": "9176502935", "password": "123456"}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_json_include!(
        actual: body,
        expected: json!({
            "success": true,
            "device_id": "9176502935",
            "location": {
                "latitude": 22.5431,
                "longitude": 114.0579,
                "speed": 35.5,
                "course": 90.0,
                "is_gps": true,
                "is_stop": false,
                "battery": 76.0,
                "battery_status": "Normal",
                "position_time": "2024-05-01 10:22:31",
                "status": "Moving",
                "device_name": "Van 7",
                "serial_number": "SN-001",
                "vin": "1HGCM82633A004352",
                "iccid": "8986001234567890123"
            }
        })
    );
}

#[tokio::test]
async fn test_post_form_body() {
    let mut server = Server::new_async().await;
    let login = mock_login(&mut server).await;
    let _tracking = mock_tracking(&mut server, r#"{"lat": 1.0}"#).await;

    let (status, body) = send(
        app(&server),
        post(
            Some("application/x-www-form-urlencoded"),
            "id=9176502935&password=123456",
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location"]["latitude"], 1.0);
    login.assert_async().await;
}

#[tokio::test]
async fn test_post_empty_body_is_bad_request() {
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/api/session")
        .expect(0)
        .create_async()
        .await;

    let (status, body) = send(app(&server), post(None, "")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "error": "Missing required parameters",
            "message": "Both id and password parameters are required"
        })
    );
    login.assert_async().await;
}

#[tokio::test]
async fn test_get_with_empty_id_is_bad_request() {
    let server = Server::new_async().await;

    let (status, body) = send(app(&server), get("/get-device-location?id=&password=123456")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required parameters");
}

#[tokio::test]
async fn test_login_failure_is_internal_error() {
    setup_logger();
    let mut server = Server::new_async().await;
    let _login = server
        .mock("POST", "/api/session")
        .with_status(500)
        .with_body("login service exploded")
        .create_async()
        .await;
    let tracking = server
        .mock("GET", "/api/tracking")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let (status, body) = send(
        app(&server),
        get("/get-device-location?id=9176502935&password=123456"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("login service exploded"));
    assert!(body["error"].is_string());
    tracking.assert_async().await;
}

#[tokio::test]
async fn test_rejected_credentials_are_internal_error() {
    let mut server = Server::new_async().await;
    let _login = server
        .mock("POST", "/api/session")
        .with_status(401)
        .create_async()
        .await;

    let (status, body) = send(
        app(&server),
        get("/get-device-location?id=9176502935&password=wrong"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "bad credentials");
}

#[tokio::test]
async fn test_fetch_failure_is_internal_error() {
    let mut server = Server::new_async().await;
    let _login = mock_login(&mut server).await;
    let _tracking = server
        .mock("GET", "/api/tracking")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("tracking offline")
        .create_async()
        .await;

    let (status, body) = send(
        app(&server),
        get("/get-device-location?id=9176502935&password=123456"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["message"].as_str().unwrap().contains("tracking offline"));
}

#[tokio::test]
async fn test_repeated_requests_log_in_each_time() {
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/api/session")
        .with_status(200)
        .with_body(r#"{"token": "tok-1"}"#)
        .expect(2)
        .create_async()
        .await;
    let _tracking = mock_tracking(&mut server, r#"{"lat": 1.23, "lng": 4.56}"#).await;

    let app = app(&server);
    let (_, first) = send(
        app.clone(),
        get("/get-device-location?id=9176502935&password=123456"),
    )
    .await;
    let (_, second) = send(app, get("/get-device-location?id=9176502935&password=123456")).await;

    assert_eq!(first, second);
    login.assert_async().await;
}
