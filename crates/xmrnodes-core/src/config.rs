// ── Runtime connection configuration ──
//
// How to reach a monitor and which credentials to present. Built by the
// CLI (from profiles and flags) and handed to `Monitor`; nothing here
// touches disk.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;
use xmrnodes_api::query::DEFAULT_ROWS_PER_PAGE;
use xmrnodes_api::{TlsMode, TransportConfig};

/// Admin credentials for session-gated resources.
#[derive(Debug, Clone)]
pub enum AuthCredentials {
    /// Existing session cookie value (from a previous `auth login`).
    Session(SecretString),
    /// Username and password; a session is obtained on demand.
    Credentials {
        username: String,
        password: SecretString,
    },
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store. Public monitors have real certificates.
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-hosted monitor with a self-signed cert).
    DangerAcceptInvalid,
}

/// Configuration for talking to one monitor server.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Monitor root URL (e.g. `https://xmr.ditatompel.com`).
    pub url: Url,
    /// Admin credentials, if any.
    pub auth: Option<AuthCredentials>,
    /// Prober API key for the job endpoints, if any.
    pub prober_key: Option<SecretString>,
    pub tls: TlsVerification,
    pub timeout: Duration,
    /// Default page size for listings.
    pub rows_per_page: u32,
}

impl MonitorConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            auth: None,
            prober_key: None,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }

    /// Transport settings for the API clients. A configured session is
    /// seeded into the cookie jar.
    pub(crate) fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        let transport = TransportConfig {
            tls,
            timeout: self.timeout,
            cookie_jar: None,
        }
        .with_cookie_jar();

        match &self.auth {
            Some(AuthCredentials::Session(token)) => transport.with_session(&self.url, token),
            _ => transport,
        }
    }
}
