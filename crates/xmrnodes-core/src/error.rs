// ── Core error types ──
//
// User-facing errors from xmrnodes-core. Consumers see what went wrong in
// monitor terms; HTTP details survive only as an optional status code.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to monitor at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to monitor timed out")]
    Timeout,

    // ── Authentication errors ────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    /// A session-gated resource was requested without a valid session.
    #[error("Login required")]
    LoginRequired,

    #[error("Prober API key rejected: {message}")]
    ProberKeyRejected { message: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    /// The server refused the request (4xx other than 401/404, or an
    /// `"error"` envelope).
    #[error("Rejected by monitor: {message}")]
    Rejected { message: String },

    #[error("API error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    #[error("Unexpected response from monitor: {message}")]
    UnexpectedResponse { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Wrong or missing credentials of any kind.
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationFailed { .. } | Self::LoginRequired | Self::ProberKeyRejected { .. }
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<xmrnodes_api::Error> for CoreError {
    fn from(err: xmrnodes_api::Error) -> Self {
        use xmrnodes_api::Error as Api;

        match err {
            Api::Authentication { message } => CoreError::AuthenticationFailed { message },
            Api::ProberKeyRejected { message } => CoreError::ProberKeyRejected { message },
            Api::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.origin().ascii_serialization())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            Api::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            Api::Tls(reason) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {reason}"),
            },
            Api::Api { status: 401, message } => CoreError::AuthenticationFailed { message },
            Api::Api { status: 404, message } => CoreError::NotFound {
                entity_type: "Resource".into(),
                identifier: message,
            },
            Api::Api { status, message } if status < 500 => CoreError::Rejected { message },
            Api::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            Api::Deserialization { message, body: _ } => {
                CoreError::UnexpectedResponse { message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_become_rejections() {
        let err: CoreError = xmrnodes_api::Error::Api {
            status: 200,
            message: "Invalid port number".into(),
        }
        .into();
        assert!(matches!(err, CoreError::Rejected { ref message } if message == "Invalid port number"));
    }

    #[test]
    fn server_errors_keep_status() {
        let err: CoreError = xmrnodes_api::Error::Api {
            status: 502,
            message: "Bad Gateway".into(),
        }
        .into();
        assert!(matches!(err, CoreError::Api { status: Some(502), .. }));
    }

    #[test]
    fn prober_key_rejection_is_auth() {
        let err: CoreError = xmrnodes_api::Error::ProberKeyRejected {
            message: "No API key match".into(),
        }
        .into();
        assert!(err.is_auth());
    }
}
