// ── Core error types ──
//
// Unified error type for the synchronization layer. Wire-level errors
// from `benchwatch-api` are translated here so consumers never have to
// match on transport details.

use thiserror::Error;

/// Errors surfaced by dashboard actions.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connectivity ────────────────────────────────────────────────
    #[error("cannot reach workbench server: {reason}")]
    ConnectionFailed { reason: String },

    #[error("request timed out")]
    Timeout,

    // ── Server-side failures ────────────────────────────────────────
    /// The server answered but refused or botched the request. The
    /// status is absent when the failure was an unacknowledged envelope
    /// rather than an HTTP error.
    #[error("server error: {message}")]
    Server {
        message: String,
        status: Option<u16>,
    },

    // ── Local failures ──────────────────────────────────────────────
    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// True when retrying at the next poll tick could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::ConnectionFailed { .. } | Self::Timeout => true,
            Self::Server { status, .. } => status.is_none_or(|s| s >= 500),
            Self::Config { .. } | Self::Internal(_) => false,
        }
    }
}

impl From<benchwatch_api::Error> for CoreError {
    fn from(err: benchwatch_api::Error) -> Self {
        use benchwatch_api::Error as Api;

        match err {
            Api::Transport(e) => {
                if e.is_timeout() {
                    Self::Timeout
                } else if e.is_connect() {
                    Self::ConnectionFailed {
                        reason: e.to_string(),
                    }
                } else {
                    Self::Server {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            Api::InvalidUrl(e) => Self::Config {
                message: format!("invalid URL: {e}"),
            },
            Api::Http(message) => Self::Config { message },
            Api::Unacknowledged { endpoint } => Self::Server {
                message: format!("request not acknowledged by {endpoint}"),
                status: None,
            },
            Api::Status { status, endpoint } => Self::Server {
                message: format!("HTTP {status} from {endpoint}"),
                status: Some(status),
            },
            Api::Deserialization { message, .. } => {
                Self::Internal(format!("malformed response: {message}"))
            }
        }
    }
}
