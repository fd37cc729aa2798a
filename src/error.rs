use searchgeom::ViewportError;
use thiserror::Error;

use crate::wire::CombinationMode;

/// Failures reported by a [`SpatialStore`](crate::store::SpatialStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not answer. Retrying is the caller's call.
    #[error("spatial store unavailable: {0}")]
    Unavailable(String),
    /// The store's data could not be interpreted as geometry or records.
    #[error("malformed store data: {0}")]
    Dataset(String),
}

/// Why a query did not produce a result.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    InvalidViewport(#[from] ViewportError),
    #[error("plant combination mode {0:?} is not supported")]
    UnsupportedCombination(CombinationMode),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl QueryError {
    /// The request itself was bad; map to a 4xx at an HTTP boundary.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidViewport(_) | Self::UnsupportedCombination(_))
    }

    /// Only store failures may succeed on a later attempt.
    pub fn is_retryable(&self) -> bool { matches!(self, Self::Store(_)) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use searchgeom::Viewport;

    #[test]
    fn viewport_errors_are_client_errors() {
        let err: QueryError = Viewport::new(0.0, 1.0, 1.0, 0.0).validate().unwrap_err().into();
        assert!(err.is_client_error());
        assert!(!err.is_retryable());
    }

    #[test]
    fn store_errors_are_retryable() {
        let err: QueryError = StoreError::Unavailable("connection reset".into()).into();
        assert!(!err.is_client_error());
        assert!(err.is_retryable());
        assert_eq!(err.to_string(), "spatial store unavailable: connection reset");
    }
}
