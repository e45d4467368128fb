use crate::application::models::location::RawDeviceResponse;
use crate::error::{AppError, AuthError, FetchError};
use std::fmt;

/// Device id and password for one retrieval. Never outlives the request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub device_id: String,
    pub password: String,
}

impl Credentials {
    /// Returns `None` when either part is absent or empty. No other format
    /// checks are made: both values are opaque to this service.
    pub fn from_parts(device_id: Option<&str>, password: Option<&str>) -> Option<Self> {
        match (device_id, password) {
            (Some(id), Some(pw)) if !id.is_empty() && !pw.is_empty() => Some(Self {
                device_id: id.to_string(),
                password: pw.to_string(),
            }),
            _ => None,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("device_id", &self.device_id)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl fmt::Display for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"device_id\":\"{}\",\"password\":\"[REDACTED]\"}}",
            self.device_id
        )
    }
}

/// Authenticated handle returned by a successful login.
#[derive(Clone, PartialEq, Eq)]
pub struct TrackerSession {
    pub device_id: String,
    pub token: String,
}

impl fmt::Debug for TrackerSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackerSession")
            .field("device_id", &self.device_id)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Connection to the remote tracking backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SessionClient: Send + Sync {
    async fn login(&self, device_id: &str, password: &str) -> Result<TrackerSession, AuthError>;
    async fn fetch_tracking(&self, session: &TrackerSession) -> Result<RawDeviceResponse, FetchError>;
}

/// Builds a fresh, unshared session client for every retrieval.
pub trait SessionClientFactory: Send + Sync {
    type Client: SessionClient + 'static;

    fn create(&self) -> Result<Self::Client, AppError>;
}

/// Factory handing out [`MockSessionClient`]s built by a closure, counting
/// how many clients were requested.
#[cfg(test)]
pub(crate) struct MockFactory {
    build: Box<dyn Fn() -> MockSessionClient + Send + Sync>,
    created: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl MockFactory {
    pub(crate) fn new(build: impl Fn() -> MockSessionClient + Send + Sync + 'static) -> Self {
        Self {
            build: Box::new(build),
            created: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub(crate) fn created(&self) -> usize {
        self.created.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
impl SessionClientFactory for MockFactory {
    type Client = MockSessionClient;

    fn create(&self) -> Result<MockSessionClient, AppError> {
        self.created.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok((self.build)())
    }
}
