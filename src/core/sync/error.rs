use thiserror::Error;

/// Stable failure classes for the discover/import operations. `Display` is
/// the caller-facing classification; the attached string is an internal
/// diagnostic meant for logs, not responses.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A gateway connection could not be established. Retryable once the
    /// gateway is back.
    #[error("gateway unavailable")]
    GatewayUnavailable(String),

    /// The remote agent listing call errored.
    #[error("gateway agent listing failed")]
    GatewayListFailed(String),

    /// The gateway answered with something that is not a sequence of agent
    /// descriptors.
    #[error("gateway returned a malformed response")]
    GatewayMalformedResponse(String),

    /// Caller input failed validation. Never retried; the diagnostic here
    /// describes the caller's own input and may be returned to them.
    #[error("invalid import request")]
    InvalidRequest(String),

    /// Storage error; any open transaction was rolled back.
    #[error("catalog persistence failure")]
    PersistenceFailure(String),

    #[error("internal error")]
    Unknown(String),
}

impl SyncError {
    pub fn detail(&self) -> &str {
        match self {
            SyncError::GatewayUnavailable(d)
            | SyncError::GatewayListFailed(d)
            | SyncError::GatewayMalformedResponse(d)
            | SyncError::InvalidRequest(d)
            | SyncError::PersistenceFailure(d)
            | SyncError::Unknown(d) => d,
        }
    }
}
