use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Top-level error type for the `fortiswitch-api` crate.
///
/// Covers every failure mode of one telemetry operation: configuration,
/// login, transport, the authenticated GET, and reshaping of the vendor
/// payload. The CLI maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Configuration ───────────────────────────────────────────────
    /// Invalid flag or value supplied by the caller.
    #[error("Invalid configuration: {message}")]
    Configuration { message: String },

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Authentication ──────────────────────────────────────────────
    /// Login rejected by the switch.
    #[error("Authentication failed: {message}")]
    Authentication { message: String, status: Option<u16> },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Request timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    // ── Request ─────────────────────────────────────────────────────
    /// Authenticated GET answered with a non-2xx status.
    #[error("Request to {url} failed (HTTP {status}): {reason}")]
    Request {
        status: u16,
        reason: String,
        url: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// Expected key absent (or of the wrong type) in the vendor JSON.
    #[error("Unexpected response shape from {endpoint}: missing or invalid '{key}'")]
    ResponseShape { endpoint: String, key: String },

    /// Response body was not JSON, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

/// Coarse error classes, used as the `type` field of error logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Authentication,
    Transport,
    Request,
    ResponseShape,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Configuration => "ConfigurationError",
            Self::Authentication => "AuthenticationError",
            Self::Transport => "TransportError",
            Self::Request => "RequestError",
            Self::ResponseShape => "ResponseShapeError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration { .. } | Self::InvalidUrl(_) => ErrorKind::Configuration,
            Self::Authentication { .. } => ErrorKind::Authentication,
            Self::Transport(_) | Self::Timeout { .. } => ErrorKind::Transport,
            Self::Request { .. } => ErrorKind::Request,
            Self::ResponseShape { .. } | Self::Deserialization { .. } => ErrorKind::ResponseShape,
        }
    }

    /// Returns `true` if the switch rejected the credentials.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` for network-level failures (DNS, refused, timeout).
    ///
    /// The client never retries; an external scheduler is expected to
    /// re-invoke the operation.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } => true,
            _ => false,
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. } => *status,
            Self::Request { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub(crate) fn shape(endpoint: &str, key: impl Into<String>) -> Self {
        Self::ResponseShape {
            endpoint: endpoint.to_owned(),
            key: key.into(),
        }
    }
}
