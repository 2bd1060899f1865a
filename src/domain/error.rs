//! Classified failure taxonomy for remote API calls
//!
//! Every failure observed by the transport layer is mapped into one of the
//! variants below before it reaches application code. The classification
//! drives two independent retry policies: the transport's own bounded retry
//! loop and the search coordinator's coarser per-query retry.

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ApiError {
    #[error("request timed out")]
    Timeout,

    #[error("network unavailable: {reason}")]
    NetworkUnavailable { reason: String },

    #[error("server error {status}: {message}")]
    ServerTransient { status: u16, message: String },

    #[error("invalid input rejected by server: {message}")]
    InvalidInput { message: String },

    #[error("client error {status}: {message}")]
    Client { status: u16, message: String },

    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },
}

impl ApiError {
    pub fn network(reason: impl Into<String>) -> Self {
        Self::NetworkUnavailable {
            reason: reason.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }

    /// Whether the transport layer may resend the identical request.
    ///
    /// Only timeouts, connectivity failures and transient 5xx responses
    /// qualify; everything else propagates immediately.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout | Self::NetworkUnavailable { .. } | Self::ServerTransient { .. }
        )
    }

    /// HTTP status attached to this failure, when one exists.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ServerTransient { status, .. } | Self::Client { status, .. } => Some(*status),
            Self::InvalidInput { .. } => Some(500),
            _ => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryability_per_class() {
        assert!(ApiError::Timeout.is_retryable());
        assert!(ApiError::network("connection refused").is_retryable());
        assert!(
            ApiError::ServerTransient {
                status: 500,
                message: "boom".into()
            }
            .is_retryable()
        );

        assert!(
            !ApiError::InvalidInput {
                message: "Failed to convert value of type".into()
            }
            .is_retryable()
        );
        assert!(
            !ApiError::Client {
                status: 404,
                message: "not found".into()
            }
            .is_retryable()
        );
        assert!(!ApiError::malformed("unexpected body").is_retryable());
    }
}
