//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use xmrnodes_config::ConfigError;
use xmrnodes_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Failed to load data from {url}")]
    #[diagnostic(
        code(xmrnodes::connection_failed),
        help(
            "Check that the monitor is running and reachable.\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(xmrnodes::timeout),
        help("Increase the timeout with --timeout or check the monitor's responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Login required")]
    #[diagnostic(
        code(xmrnodes::login_required),
        help(
            "This resource needs an admin session.\n\
             Run: xmrnodes auth login"
        )
    )]
    LoginRequired,

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(xmrnodes::auth_failed),
        help("Verify your username and password, or run: xmrnodes config set-password")
    )]
    AuthFailed { message: String },

    #[error("Prober API key rejected: {message}")]
    #[diagnostic(
        code(xmrnodes::prober_key),
        help(
            "Pass a valid key with --api-key, set XMRNODES_API_KEY,\n\
             or run: xmrnodes config set-password --api-key"
        )
    )]
    ProberKeyRejected { message: String },

    #[error("No {what} configured for profile '{profile}'")]
    #[diagnostic(
        code(xmrnodes::no_credentials),
        help("Configure them with: xmrnodes config init")
    )]
    NoCredentials { what: String, profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(xmrnodes::not_found),
        help("Run: xmrnodes {list_command} to see what exists")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(xmrnodes::rejected))]
    Rejected { message: String },

    #[error("API error{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    #[diagnostic(code(xmrnodes::api_error))]
    ApiError {
        status: Option<u16>,
        message: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(xmrnodes::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(xmrnodes::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: xmrnodes config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No monitor configured")]
    #[diagnostic(
        code(xmrnodes::no_config),
        help(
            "Create a profile with: xmrnodes config init\n\
             or pass --server. Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("{message}")]
    #[diagnostic(code(xmrnodes::config))]
    Config { message: String },

    #[error("Keyring error: {0}")]
    #[diagnostic(
        code(xmrnodes::keyring),
        help("Store the secret in the config file or an environment variable instead.")
    )]
    Keyring(String),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(xmrnodes::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(xmrnodes::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::LoginRequired
            | Self::AuthFailed { .. }
            | Self::ProberKeyRejected { .. }
            | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::Timeout => Self::Timeout,
            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },
            CoreError::LoginRequired => Self::LoginRequired,
            CoreError::ProberKeyRejected { message } => Self::ProberKeyRejected { message },
            CoreError::NotFound {
                entity_type,
                identifier,
            } => Self::NotFound {
                list_command: format!("{}s list", entity_type.to_lowercase()),
                resource_type: entity_type,
                identifier,
            },
            CoreError::Rejected { message } => Self::Rejected { message },
            CoreError::Api { message, status } => Self::ApiError { status, message },
            CoreError::UnexpectedResponse { message } => Self::ApiError {
                status: None,
                message,
            },
            CoreError::Config { message } => Self::Config { message },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::NoCredentials { what, profile } => Self::NoCredentials { what, profile },
            ConfigError::Keyring(e) => Self::Keyring(e.to_string()),
            ConfigError::Io(e) => Self::Io(e),
            other => Self::Config {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_required_maps_to_login_hint() {
        let err = CliError::from(CoreError::LoginRequired);
        assert_eq!(err.exit_code(), exit_code::AUTH);
        assert_eq!(err.to_string(), "Login required");
    }

    #[test]
    fn not_found_suggests_list_command() {
        let err = CliError::from(CoreError::NotFound {
            entity_type: "Node".into(),
            identifier: "7".into(),
        });
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
        assert!(
            matches!(err, CliError::NotFound { ref list_command, .. } if list_command == "nodes list")
        );
    }

    #[test]
    fn api_error_shows_status_when_known() {
        let with = CliError::from(CoreError::Api {
            message: "Internal Server Error".into(),
            status: Some(500),
        });
        let without = CliError::ApiError {
            status: None,
            message: "bad body".into(),
        };
        assert_eq!(with.to_string(), "API error (HTTP 500): Internal Server Error");
        assert_eq!(without.to_string(), "API error: bad body");
        assert_eq!(with.exit_code(), exit_code::GENERAL);
    }
}
