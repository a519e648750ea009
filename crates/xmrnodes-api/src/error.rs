use thiserror::Error;

/// Top-level error type for the `xmrnodes-api` crate.
///
/// Covers transport, envelope decoding, and server-reported failures.
/// "Not logged in" on a session-gated resource is deliberately *not* an
/// error: it surfaces as [`Normalized::AuthRequired`](crate::Normalized).
/// `xmrnodes-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login rejected (wrong credentials, unknown user).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The `X-Prober-Api-Key` header was missing or did not match a prober.
    #[error("Prober API key rejected: {message}")]
    ProberKeyRejected { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or HTTP client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── API ─────────────────────────────────────────────────────────
    /// The server answered with a non-success status or an `"error"` envelope.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// Body was not JSON, or a payload did not match the expected shape.
    /// Carries the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` for credential problems (login or prober key).
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            Self::Authentication { .. } | Self::ProberKeyRejected { .. }
        )
    }

    /// Returns `true` if this is a transient error worth retrying.
    ///
    /// The client itself never retries; this is a hint for callers.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn server_errors_are_transient() {
        let err = Error::Api {
            status: 503,
            message: "maintenance".into(),
        };
        assert!(err.is_transient());
        assert!(!err.is_not_found());
    }

    #[test]
    fn unprocessable_is_neither_transient_nor_auth() {
        let err = Error::Api {
            status: 422,
            message: "Invalid node id".into(),
        };
        assert!(!err.is_transient());
        assert!(!err.is_auth());
        assert_eq!(err.to_string(), "API error (HTTP 422): Invalid node id");
    }

    #[test]
    fn prober_key_rejection_is_auth() {
        let err = Error::ProberKeyRejected {
            message: "No API key match".into(),
        };
        assert!(err.is_auth());
    }
}
