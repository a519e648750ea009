//! Shared configuration for xmrnodes tools.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `xmrnodes_core::MonitorConfig`. The CLI layers its
//! flag overrides on top of this.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use thiserror::Error;
use tracing::debug;

use xmrnodes_core::{AuthCredentials, MonitorConfig, TlsVerification};

/// Keyring service name; entries are keyed `{profile}/{slot}`.
pub const KEYRING_SERVICE: &str = "xmrnodes";

/// Prefix for environment overrides (`XMRNODES_DEFAULT_PROFILE`,
/// `XMRNODES_PROFILES__HOME__SERVER`, ...).
pub const ENV_PREFIX: &str = "XMRNODES_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no {what} configured for profile '{profile}'")]
    NoCredentials { what: String, profile: String },

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named monitor profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_rows_per_page")]
    pub rows_per_page: u32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
            rows_per_page: default_rows_per_page(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_rows_per_page() -> u32 {
    xmrnodes_core::TableQuery::default().rows_per_page()
}

/// A named monitor profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Monitor root URL (e.g. "https://xmr.ditatompel.com").
    pub server: String,

    /// Admin username for session-gated resources.
    pub username: Option<String>,

    /// Admin password (plaintext -- prefer keyring).
    pub password: Option<String>,

    /// Saved session cookie value (plaintext -- prefer keyring).
    pub session: Option<String>,

    /// Prober API key (plaintext -- prefer keyring or env var).
    pub api_key: Option<String>,

    /// Environment variable name containing the prober API key.
    pub api_key_env: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Override listing page size.
    pub rows_per_page: Option<u32>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "xmrnodes", "xmrnodes").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("xmrnodes");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading / saving ─────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file (missing file means defaults) + environment.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    Ok(figment.extract()?)
}

/// Load config, returning a default if it can't be read.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(cfg)?)?;
    Ok(())
}

// ── Keyring ─────────────────────────────────────────────────────────

/// Which secret of a profile a keyring entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum SecretSlot {
    Password,
    Session,
    ApiKey,
}

fn keyring_entry(profile_name: &str, slot: SecretSlot) -> Result<keyring::Entry, ConfigError> {
    Ok(keyring::Entry::new(
        KEYRING_SERVICE,
        &format!("{profile_name}/{slot}"),
    )?)
}

fn keyring_get(profile_name: &str, slot: SecretSlot) -> Option<SecretString> {
    let entry = keyring_entry(profile_name, slot).ok()?;
    entry.get_password().ok().map(SecretString::from)
}

/// Store a secret for `profile_name` in the system keyring.
pub fn store_secret(profile_name: &str, slot: SecretSlot, value: &str) -> Result<(), ConfigError> {
    keyring_entry(profile_name, slot)?.set_password(value)?;
    Ok(())
}

/// Remove a stored secret. A missing entry is not an error.
pub fn delete_secret(profile_name: &str, slot: SecretSlot) -> Result<(), ConfigError> {
    match keyring_entry(profile_name, slot)?.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

// ── Credential resolution (without CLI flags) ───────────────────────

fn env_secret(name: &str) -> Option<SecretString> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .map(SecretString::from)
}

/// Prober API key: `api_key_env` → `XMRNODES_API_KEY` → keyring → plaintext.
pub fn resolve_prober_key(
    profile: &Profile,
    profile_name: &str,
) -> Result<SecretString, ConfigError> {
    profile
        .api_key_env
        .as_deref()
        .and_then(env_secret)
        .or_else(|| env_secret("XMRNODES_API_KEY"))
        .or_else(|| keyring_get(profile_name, SecretSlot::ApiKey))
        .or_else(|| profile.api_key.clone().map(SecretString::from))
        .ok_or_else(|| ConfigError::NoCredentials {
            what: "prober API key".into(),
            profile: profile_name.into(),
        })
}

/// Saved session: `XMRNODES_SESSION` → keyring → plaintext.
pub fn resolve_session(profile: &Profile, profile_name: &str) -> Option<SecretString> {
    env_secret("XMRNODES_SESSION")
        .or_else(|| keyring_get(profile_name, SecretSlot::Session))
        .or_else(|| profile.session.clone().map(SecretString::from))
}

/// Admin username + password. The password resolves
/// `XMRNODES_PASSWORD` → keyring → plaintext.
pub fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
) -> Result<(String, SecretString), ConfigError> {
    let no_credentials = || ConfigError::NoCredentials {
        what: "admin credentials".into(),
        profile: profile_name.into(),
    };

    let username = profile
        .username
        .clone()
        .or_else(|| std::env::var("XMRNODES_USERNAME").ok())
        .ok_or_else(no_credentials)?;

    let password = env_secret("XMRNODES_PASSWORD")
        .or_else(|| keyring_get(profile_name, SecretSlot::Password))
        .or_else(|| profile.password.clone().map(SecretString::from))
        .ok_or_else(no_credentials)?;

    Ok((username, password))
}

/// Admin auth for a profile: a saved session wins over credentials;
/// `None` when neither is configured (public endpoints only).
pub fn resolve_auth(profile: &Profile, profile_name: &str) -> Option<AuthCredentials> {
    if let Some(token) = resolve_session(profile, profile_name) {
        return Some(AuthCredentials::Session(token));
    }
    resolve_credentials(profile, profile_name)
        .ok()
        .map(|(username, password)| AuthCredentials::Credentials { username, password })
}

/// Parse and validate a profile's server URL.
pub fn parse_server(raw: &str) -> Result<url::Url, ConfigError> {
    let url: url::Url = raw.parse().map_err(|_| ConfigError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {raw}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "server".into(),
            reason: format!("expected an http(s) URL, got '{raw}'"),
        });
    }
    Ok(url)
}

/// Build a `MonitorConfig` from a profile -- no CLI flag overrides.
pub fn profile_to_monitor_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<MonitorConfig, ConfigError> {
    let url = parse_server(&profile.server)?;

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    Ok(MonitorConfig {
        auth: resolve_auth(profile, profile_name),
        prober_key: resolve_prober_key(profile, profile_name).ok(),
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        rows_per_page: profile
            .rows_per_page
            .unwrap_or(defaults.rows_per_page)
            .max(1),
        url,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    fn profile(server: &str) -> Profile {
        Profile {
            server: server.into(),
            ..Profile::default()
        }
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert_eq!(cfg.defaults.output, "table");
        assert_eq!(cfg.defaults.rows_per_page, 10);
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.default_profile = Some("home".into());
        cfg.profiles.insert(
            "home".into(),
            Profile {
                username: Some("admin".into()),
                rows_per_page: Some(50),
                ..profile("https://xmr.example.com")
            },
        );
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        let home = &loaded.profiles["home"];
        assert_eq!(loaded.default_profile.as_deref(), Some("home"));
        assert_eq!(home.server, "https://xmr.example.com");
        assert_eq!(home.username.as_deref(), Some("admin"));
        assert_eq!(home.rows_per_page, Some(50));
    }

    #[test]
    fn hand_written_toml_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_profile = "lab"

[defaults]
output = "json"
timeout = 5

[profiles.lab]
server = "http://10.0.0.2:18090"
insecure = true
"#,
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.defaults.output, "json");
        assert_eq!(cfg.defaults.timeout, 5);
        assert_eq!(cfg.defaults.color, "auto");
        assert_eq!(cfg.profiles["lab"].insecure, Some(true));
    }

    #[test]
    fn profile_maps_tls_timeout_and_page_size() {
        let defaults = Defaults::default();

        let mut lab = profile("https://monitor.lan");
        lab.insecure = Some(true);
        lab.timeout = Some(5);
        lab.rows_per_page = Some(0);
        let cfg = profile_to_monitor_config(&lab, "xmrnodes-test-lab", &defaults).unwrap();
        assert_eq!(cfg.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert_eq!(cfg.rows_per_page, 1);

        let mut pinned = profile("https://monitor.lan");
        pinned.ca_cert = Some(PathBuf::from("/etc/ssl/monitor.pem"));
        let cfg = profile_to_monitor_config(&pinned, "xmrnodes-test-pinned", &defaults).unwrap();
        assert_eq!(
            cfg.tls,
            TlsVerification::CustomCa(PathBuf::from("/etc/ssl/monitor.pem"))
        );
        assert_eq!(cfg.timeout, Duration::from_secs(30));
    }

    #[test]
    fn invalid_server_is_rejected() {
        let defaults = Defaults::default();
        for bad in ["not a url", "ftp://example.com"] {
            let err = profile_to_monitor_config(&profile(bad), "x", &defaults).unwrap_err();
            assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "server"));
        }
    }

    #[test]
    fn plaintext_credentials_resolve() {
        let p = Profile {
            username: Some("admin".into()),
            password: Some("hunter2".into()),
            api_key: Some("0f8fad5b-d9cb-469f-a165-70867728950e".into()),
            ..profile("https://xmr.example.com")
        };
        let name = "xmrnodes-test-plaintext";

        let (user, pass) = resolve_credentials(&p, name).unwrap();
        assert_eq!(user, "admin");
        assert_eq!(pass.expose_secret(), "hunter2");
        assert_eq!(
            resolve_prober_key(&p, name).unwrap().expose_secret(),
            "0f8fad5b-d9cb-469f-a165-70867728950e"
        );
    }

    #[test]
    fn saved_session_wins_over_credentials() {
        let p = Profile {
            username: Some("admin".into()),
            password: Some("hunter2".into()),
            session: Some("auth_1_1700000000".into()),
            ..profile("https://xmr.example.com")
        };

        match resolve_auth(&p, "xmrnodes-test-session") {
            Some(AuthCredentials::Session(token)) => {
                assert_eq!(token.expose_secret(), "auth_1_1700000000");
            }
            other => panic!("expected session auth, got {other:?}"),
        }
    }

    #[test]
    fn keyring_slots_are_kebab_case() {
        assert_eq!(SecretSlot::ApiKey.to_string(), "api-key");
        assert_eq!("session".parse::<SecretSlot>().ok(), Some(SecretSlot::Session));
    }
}
