//! Error types for the RadioTAG client

/// Result type alias for RadioTAG operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when using the RadioTAG client
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request failed at the network level
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A custom transport implementation failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// Service returned an error status
    #[error("Service returned error status {status}")]
    ErrorResponse {
        /// HTTP status code of the response
        status: u16,
        /// Response body, passed through unchanged
        body: String,
    },

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Discovery response carried no `WWW-Authenticate` header
    #[error("{}", crate::definition::HEADER_NOT_FOUND)]
    MissingChallengeHeader,

    /// Challenge header present but unparsable
    #[error("Malformed challenge: {0}")]
    MalformedChallenge(String),

    /// Challenge header has no `uri` attribute
    #[error("Challenge has no \"uri\" attribute")]
    MissingUri,

    /// Feed body unparsable or missing required fields
    #[error("Malformed feed: {0}")]
    MalformedFeed(String),

    /// Tag response feed contained no entries
    #[error("Response feed contains no entries")]
    EmptyResponse,

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Create a malformed-challenge error
    pub fn malformed_challenge(msg: impl Into<String>) -> Self {
        Self::MalformedChallenge(msg.into())
    }

    /// Create a malformed-feed error
    pub fn malformed_feed(msg: impl Into<String>) -> Self {
        Self::MalformedFeed(msg.into())
    }
}
