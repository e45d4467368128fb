//! HTTP request handlers for the location API.
//!
//! Handles GET/POST /get-device-location, GET /health and GET /.

use std::any::Any;

use axum::{
    extract::{rejection::QueryRejection, FromRequest, Multipart, Query, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info_span, warn, Instrument};
use uuid::Uuid;

use crate::application::models::location::DeviceSnapshot;
use crate::application::models::retrieval::{FailureKind, RetrievalResult};
use crate::constants::{
    INTERNAL_SERVER_ERROR, MISSING_PARAMETERS_ERROR, SERVICE_NAME, SERVICE_VERSION,
};
use crate::presentation::serialization::string_from_value;
use crate::presentation::server::AppState;
use crate::session::interface::SessionClientFactory;

/// Device credentials as sent by the caller, before validation.
#[derive(Debug, Default, Clone)]
pub struct LocationParams {
    pub id: Option<String>,
    pub password: Option<String>,
}

impl LocationParams {
    /// Reads `id` and `password` from a JSON object. Anything that is not an
    /// object yields no values.
    fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };
        Self {
            id: object.get("id").and_then(string_from_value),
            password: object.get("password").and_then(string_from_value),
        }
    }

    /// Reads `id` and `password` from decoded key/value pairs. A repeated
    /// key keeps its first value.
    fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "id" if params.id.is_none() => params.id = Some(value),
                "password" if params.password.is_none() => params.password = Some(value),
                _ => {}
            }
        }
        params
    }

    /// Field by field, values present here win over `fallback`.
    fn or(self, fallback: LocationParams) -> Self {
        Self {
            id: self.id.filter(|v| !v.is_empty()).or(fallback.id),
            password: self.password.filter(|v| !v.is_empty()).or(fallback.password),
        }
    }
}

/// Response body for a successful lookup.
#[derive(Debug, Serialize, Deserialize)]
pub struct LocationResponse {
    pub success: bool,
    pub device_id: String,
    pub location: DeviceSnapshot,
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

/// GET /get-device-location?id=..&password=..
pub async fn get_device_location<F: SessionClientFactory + 'static>(
    State(state): State<AppState<F>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let params = match query {
        Ok(Query(pairs)) => LocationParams::from_pairs(pairs),
        Err(rejection) => {
            warn!("Ignoring unreadable query string: {}", rejection);
            LocationParams::default()
        }
    };
    locate(state, params).await
}

/// POST /get-device-location
///
/// Accepts a JSON body (`application/json` or any `+json` type), a
/// url-encoded form or a multipart form. JSON values are read first and form
/// values only fill what JSON left out.
pub async fn post_device_location<F: SessionClientFactory + 'static>(
    State(state): State<AppState<F>>,
    request: Request,
) -> Response {
    let params = read_post_params(request).await;
    locate(state, params).await
}

async fn read_post_params(request: Request) -> LocationParams {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase();
    let media_type = content_type.split(';').next().unwrap_or("").trim();

    let mut from_json = LocationParams::default();
    let mut from_form = LocationParams::default();

    if is_json_media_type(media_type) {
        match Json::<Value>::from_request(request, &()).await {
            Ok(Json(value)) => from_json = LocationParams::from_json(&value),
            Err(rejection) => warn!("Ignoring unreadable JSON body: {}", rejection),
        }
    } else if media_type == "application/x-www-form-urlencoded" {
        match Form::<Vec<(String, String)>>::from_request(request, &()).await {
            Ok(Form(pairs)) => from_form = LocationParams::from_pairs(pairs),
            Err(rejection) => warn!("Ignoring unreadable form body: {}", rejection),
        }
    } else if media_type == "multipart/form-data" {
        match Multipart::from_request(request, &()).await {
            Ok(multipart) => from_form = read_multipart(multipart).await,
            Err(rejection) => warn!("Ignoring unreadable multipart body: {}", rejection),
        }
    }

    from_json.or(from_form)
}

fn is_json_media_type(media_type: &str) -> bool {
    media_type == "application/json"
        || (media_type.starts_with("application/") && media_type.ends_with("+json"))
}

/// Collects the text fields of a multipart form. File parts are skipped.
async fn read_multipart(mut multipart: Multipart) -> LocationParams {
    let mut pairs = Vec::new();
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.file_name().is_some() {
                    continue;
                }
                let Some(name) = field.name().map(str::to_string) else {
                    continue;
                };
                match field.text().await {
                    Ok(value) => pairs.push((name, value)),
                    Err(e) => {
                        warn!("Ignoring unreadable multipart field {}: {}", name, e);
                        break;
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!("Stopped reading multipart body: {}", e);
                break;
            }
        }
    }
    LocationParams::from_pairs(pairs)
}

async fn locate<F: SessionClientFactory + 'static>(
    state: AppState<F>,
    params: LocationParams,
) -> Response {
    let request_id = Uuid::new_v4();
    let span = info_span!("get_device_location", %request_id);

    let result = state
        .service
        .retrieve(params.id.as_deref(), params.password.as_deref())
        .instrument(span)
        .await;

    render_result(params.id.unwrap_or_default(), result)
}

/// Maps a retrieval outcome onto its HTTP status and JSON body.
pub fn render_result(device_id: String, result: RetrievalResult) -> Response {
    match result {
        RetrievalResult::Success(location) => (
            StatusCode::OK,
            Json(LocationResponse {
                success: true,
                device_id,
                location,
            }),
        )
            .into_response(),
        RetrievalResult::Failure(FailureKind::InvalidInput, message) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: MISSING_PARAMETERS_ERROR.to_string(),
                message,
            }),
        )
            .into_response(),
        RetrievalResult::Failure(FailureKind::UpstreamError, message) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: message.clone(),
                message,
            }),
        )
            .into_response(),
    }
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}

/// GET /
pub async fn root() -> Json<Value> {
    Json(json!({
        "service": SERVICE_NAME,
        "version": SERVICE_VERSION,
        "endpoints": {
            "GET /get-device-location": "Get device location (parameters: id, password)",
            "POST /get-device-location": "Get device location (JSON body: {id, password})",
            "GET /health": "Health check",
            "GET /": "This information"
        },
        "example_usage": {
            "GET": "/get-device-location?id=9176502935&password=123456",
            "POST": "/get-device-location with JSON body {\"id\": \"9176502935\", \"password\": \"123456\"}"
        }
    }))
}

/// Turns a handler panic into the generic 500 body.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown error".to_string()
    };
    error!("Error getting device location: {}", message);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: INTERNAL_SERVER_ERROR.to_string(),
            message,
        }),
    )
        .into_response()
}
