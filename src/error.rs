//! Error taxonomy for the core service.

/// Result type for core operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Rejected before any state change: bad travel mode, missing coordinates,
    /// missing required fields.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("invalid credentials")]
    Unauthorized,

    /// Collaborator datastore or external service failure. Surfaced with a
    /// generic message; no partial state is left behind.
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ServiceError::NotFound("record".to_string()),
            other => ServiceError::Unavailable(other.to_string()),
        }
    }
}
