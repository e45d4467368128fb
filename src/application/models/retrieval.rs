use crate::application::models::location::DeviceSnapshot;

/// Why a retrieval did not produce a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The caller left out the device id or the password.
    InvalidInput,
    /// Login, fetch, or anything else beyond input validation went wrong.
    UpstreamError,
}

/// Outcome of one location retrieval.
#[derive(Debug, Clone, PartialEq)]
pub enum RetrievalResult {
    Success(DeviceSnapshot),
    Failure(FailureKind, String),
}

impl RetrievalResult {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        RetrievalResult::Failure(FailureKind::InvalidInput, message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        RetrievalResult::Failure(FailureKind::UpstreamError, message.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RetrievalResult::Success(_))
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            RetrievalResult::Success(_) => None,
            RetrievalResult::Failure(kind, _) => Some(*kind),
        }
    }
}
