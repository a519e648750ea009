//! Flag overrides layered over the shared config crate.
//!
//! `xmrnodes-config` turns a profile into a `MonitorConfig`; this module
//! picks the profile and applies `--server`, `--api-key`, `--insecure` and
//! `--timeout` on top.

use std::time::Duration;

use secrecy::SecretString;

use xmrnodes_core::{MonitorConfig, TlsVerification};

pub use xmrnodes_config::{
    Config, Profile, SecretSlot, config_path, delete_secret, load_config_or_default, save_config,
    store_secret,
};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Comma-separated profile names for "not found" diagnostics.
pub fn available_profiles(config: &Config) -> String {
    if config.profiles.is_empty() {
        "(none)".into()
    } else {
        config.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// Build the `MonitorConfig` for this invocation.
///
/// With a matching profile, flags override its values. Without one,
/// `--server` alone is enough for the public endpoints.
pub fn build_monitor_config(global: &GlobalOpts) -> Result<MonitorConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(&cfg),
            });
        }
        None => {
            let server = global.server.clone().ok_or_else(|| CliError::NoConfig {
                path: config_path().display().to_string(),
            })?;
            Profile {
                server,
                ..Profile::default()
            }
        }
    };

    let mut config =
        xmrnodes_config::profile_to_monitor_config(&profile, &profile_name, &cfg.defaults)?;
    apply_overrides(&mut config, global)?;
    Ok(config)
}

fn apply_overrides(config: &mut MonitorConfig, global: &GlobalOpts) -> Result<(), CliError> {
    if let Some(ref server) = global.server {
        config.url = xmrnodes_config::parse_server(server)?;
    }
    if let Some(ref key) = global.api_key {
        config.prober_key = Some(SecretString::from(key.clone()));
    }
    if global.insecure {
        config.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        config.timeout = Duration::from_secs(secs);
    }
    Ok(())
}
