use crate::error::AppError;
use reqwest::{header, Client, Response, StatusCode, Url};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Represents the HTTP client for talking to the tracking backend.
#[derive(Debug)]
pub struct TrackerHttpClient {
    client: Client,
    base_url: String,
}

impl TrackerHttpClient {
    /// Creates a new instance of the TrackerHttpClient.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the tracking backend. A trailing slash is ignored.
    /// * `timeout` - Timeout applied to every request sent through this client.
    ///
    /// # Returns
    ///
    /// A Result containing the TrackerHttpClient instance or an error.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, AppError> {
        let raw = format!("{}{}", self.base_url, endpoint);
        let parsed = if params.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, params)
        };
        parsed.map_err(|e| AppError::InvalidUrl(format!("{raw}: {e}")))
    }

    /// Sends a GET request with query parameters and extra headers.
    #[instrument(skip(self, headers))]
    pub async fn get<T: DeserializeOwned + Debug>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> Result<T, AppError> {
        let url = self.url(endpoint, params)?;
        debug!("Sending GET request to {}", url);

        let mut request = self.client.get(url);
        for (key, value) in headers {
            request = request.header(*key, *value);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Failed to send GET request: {:?}", e);
                return Err(e.into());
            }
        };

        Self::handle_response(response).await
    }

    /// Sends a JSON POST request and returns the decoded body together with
    /// the value of `capture_header` when the response carries it.
    #[instrument(skip(self, body))]
    pub async fn post<T: DeserializeOwned + Debug, B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
        capture_header: &str,
    ) -> Result<(T, Option<String>), AppError> {
        let url = self.url(endpoint, &[])?;
        debug!("Sending POST request to {}", url);

        let response = match self.client.post(url).json(body).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Failed to send POST request: {:?}", e);
                return Err(e.into());
            }
        };

        let captured = Self::extract_header(&response, capture_header);
        let body = Self::handle_response(response).await?;
        Ok((body, captured))
    }

    async fn handle_response<T: DeserializeOwned + Debug>(response: Response) -> Result<T, AppError> {
        let status = response.status();
        let body_text = response.text().await?;

        debug!("Response Status: {}", status);
        debug!("Response Body: {}", body_text);

        if status.is_success() {
            let body: T = serde_json::from_str(&body_text)?;
            Ok(body)
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            error!("API request unauthorized. Status: {}", status);
            Err(AppError::Unauthorized)
        } else {
            error!(
                "API request failed. Status: {}, Body: {}",
                status, body_text
            );
            Err(AppError::Api {
                status,
                body: body_text,
            })
        }
    }

    fn extract_header(response: &Response, header_name: &str) -> Option<String> {
        let value = response
            .headers()
            .get(header_name)
            .and_then(|h| h.to_str().ok())
            .map(String::from);
        if value.is_none() {
            debug!("Header {} not found in response", header_name);
        }
        value
    }
}
