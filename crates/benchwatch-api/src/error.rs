use thiserror::Error;

/// Top-level error type for the `benchwatch-api` crate.
///
/// Covers transport failures and protocol failures (unacknowledged
/// responses, undecodable bodies). `benchwatch-core` maps these into its
/// own error type and decides what is worth surfacing versus logging.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Failed to construct the underlying HTTP client.
    #[error("HTTP client error: {0}")]
    Http(String),

    // ── Protocol ────────────────────────────────────────────────────
    /// The server answered but did not acknowledge the request.
    #[error("Request not acknowledged by {endpoint}")]
    Unacknowledged { endpoint: &'static str },

    /// Unexpected HTTP status code.
    #[error("HTTP {status} from {endpoint}")]
    Status { status: u16, endpoint: &'static str },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error where the next poll
    /// cycle is likely to succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if the server was reachable but rejected or botched
    /// the request at the protocol level.
    pub fn is_protocol(&self) -> bool {
        matches!(
            self,
            Self::Unacknowledged { .. } | Self::Status { .. } | Self::Deserialization { .. }
        )
    }
}
