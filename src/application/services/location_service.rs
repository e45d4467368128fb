use std::error::Error;

use tracing::{debug, error, info, instrument};

use crate::{
    application::models::{location::DeviceSnapshot, retrieval::RetrievalResult},
    constants::MISSING_PARAMETERS_MESSAGE,
    session::interface::{Credentials, SessionClient, SessionClientFactory},
};

type UpstreamFailure = Box<dyn Error + Send + Sync>;

/// Drives one location lookup: validate, log in, fetch, normalize.
///
/// Every call builds its own session client through the factory, so nothing
/// is shared between calls and no session survives the call that opened it.
pub struct LocationService<F: SessionClientFactory> {
    factory: F,
}

impl<F: SessionClientFactory> LocationService<F> {
    pub fn new(factory: F) -> Self {
        Self { factory }
    }

    /// Retrieves the current location of a device.
    ///
    /// Absent and empty credentials are both `InvalidInput` and never reach
    /// the backend. Any error raised while creating the client, logging in or
    /// fetching becomes `UpstreamError` carrying the error text. A single
    /// attempt is made.
    #[instrument(skip(self, password))]
    pub async fn retrieve(&self, device_id: Option<&str>, password: Option<&str>) -> RetrievalResult {
        let Some(credentials) = Credentials::from_parts(device_id, password) else {
            debug!("Missing id or password, backend not contacted");
            return RetrievalResult::invalid_input(MISSING_PARAMETERS_MESSAGE);
        };

        match self.fetch_snapshot(&credentials).await {
            Ok(snapshot) => RetrievalResult::Success(snapshot),
            Err(e) => {
                error!("Error getting location for {}: {}", credentials.device_id, e);
                RetrievalResult::upstream(e.to_string())
            }
        }
    }

    async fn fetch_snapshot(&self, credentials: &Credentials) -> Result<DeviceSnapshot, UpstreamFailure> {
        let client = self.factory.create()?;

        let session = client
            .login(&credentials.device_id, &credentials.password)
            .await?;
        info!("Device {} authenticated", session.device_id);

        let raw = client.fetch_tracking(&session).await?;
        debug!("Tracking received for {}", session.device_id);

        Ok(DeviceSnapshot::from(raw))
    }
}
