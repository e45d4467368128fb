/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use crate::application::models::location::RawDeviceResponse;
use crate::config::TrackerApiConfig;
use crate::constants::{LOGIN_ENDPOINT, SESSION_TOKEN_HEADER_KEY, TRACKING_ENDPOINT};
use crate::error::{AppError, AuthError, FetchError};
use crate::session::auth::{LoginRequest, LoginResponse};
use crate::session::interface::{SessionClient, SessionClientFactory, TrackerSession};
use crate::transport::http_client::TrackerHttpClient;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Session client speaking JSON over HTTP to the tracking backend.
#[derive(Debug)]
pub struct HttpSessionClient {
    client: TrackerHttpClient,
}

impl HttpSessionClient {
    pub fn new(config: &TrackerApiConfig) -> Result<Self, AppError> {
        let client =
            TrackerHttpClient::new(&config.base_url, Duration::from_secs(config.timeout))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl SessionClient for HttpSessionClient {
    #[instrument(skip(self, password))]
    async fn login(&self, device_id: &str, password: &str) -> Result<TrackerSession, AuthError> {
        debug!("Logging in device: {}", device_id);

        let request = LoginRequest {
            device_id,
            password,
        };
        let (response, header_token): (LoginResponse, Option<String>) = self
            .client
            .post(LOGIN_ENDPOINT, &request, SESSION_TOKEN_HEADER_KEY)
            .await?;

        if response.success == Some(false) {
            let message = response
                .message
                .unwrap_or_else(|| "login rejected".to_string());
            warn!("Login rejected for device {}: {}", device_id, message);
            return Err(AuthError::Rejected(message));
        }

        let token = response
            .token
            .filter(|t| !t.is_empty())
            .or_else(|| header_token.filter(|t| !t.is_empty()))
            .ok_or(AuthError::MissingToken)?;

        debug!("Login successful");
        Ok(TrackerSession {
            device_id: device_id.to_string(),
            token,
        })
    }

    #[instrument(skip(self, session), fields(device_id = %session.device_id))]
    async fn fetch_tracking(&self, session: &TrackerSession) -> Result<RawDeviceResponse, FetchError> {
        let raw: RawDeviceResponse = self
            .client
            .get(
                TRACKING_ENDPOINT,
                &[("deviceId", session.device_id.as_str())],
                &[(SESSION_TOKEN_HEADER_KEY, session.token.as_str())],
            )
            .await?;
        debug!("Tracking fetched: {:?}", raw);
        Ok(raw)
    }
}

/// Hands out one [`HttpSessionClient`] per retrieval, all bound to the same
/// backend endpoint.
#[derive(Debug, Clone)]
pub struct HttpSessionClientFactory {
    config: Arc<TrackerApiConfig>,
}

impl HttpSessionClientFactory {
    pub fn new(config: Arc<TrackerApiConfig>) -> Self {
        Self { config }
    }
}

impl SessionClientFactory for HttpSessionClientFactory {
    type Client = HttpSessionClient;

    fn create(&self) -> Result<HttpSessionClient, AppError> {
        HttpSessionClient::new(&self.config)
    }
}
