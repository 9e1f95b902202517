use thiserror::Error;

/// Everything that can make a card request fail.
///
/// A failed request never produces a partial card: each phase of the pipeline returns one
/// of these and later phases are skipped.
#[derive(Debug, Error)]
pub enum CardError {
    /// A required parameter is missing or a parameter is malformed. Raised before any network call.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The login could not be resolved, or the upstream query reported errors.
    #[error("not found: {0}")]
    NotFound(String),

    /// No commits could be classified, so there is no distribution to show.
    #[error("no commits found to build a distribution from")]
    AggregationEmpty,

    /// The upstream API could not be reached, timed out, or answered with something unusable.
    #[error("upstream request failed: {0}")]
    TransientUpstreamFailure(ohno::AppError),
}

impl CardError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    pub(crate) fn upstream(error: impl Into<ohno::AppError>) -> Self {
        Self::TransientUpstreamFailure(error.into())
    }

    /// A short, stable name for the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "InvalidRequest",
            Self::NotFound(_) => "NotFound",
            Self::AggregationEmpty => "AggregationEmpty",
            Self::TransientUpstreamFailure(_) => "TransientUpstreamFailure",
        }
    }
}
