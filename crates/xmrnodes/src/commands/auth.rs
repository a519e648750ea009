//! Admin session command handlers.

use dialoguer::Input;
use secrecy::{ExposeSecret, SecretString};
use tracing::warn;
use xmrnodes_core::{AuthCredentials, Monitor};

use crate::cli::{AuthArgs, AuthCommand, GlobalOpts};
use crate::config::{self, SecretSlot};
use crate::error::CliError;

use super::util;

fn profile_name(global: &GlobalOpts) -> String {
    config::active_profile_name(global, &config::load_config_or_default())
}

/// Username and password from the profile, or prompted for.
fn credentials(
    monitor: &Monitor,
    username: Option<String>,
) -> Result<(String, SecretString), CliError> {
    let configured = match &monitor.config().auth {
        Some(AuthCredentials::Credentials { username, password }) => {
            Some((username.clone(), password.clone()))
        }
        _ => None,
    };

    match (username, configured) {
        (None, Some(creds)) => Ok(creds),
        (Some(user), Some((configured_user, password))) if user == configured_user => {
            Ok((user, password))
        }
        (username, _) => {
            let username = match username {
                Some(u) => u,
                None => Input::new()
                    .with_prompt("Username")
                    .interact_text()
                    .map_err(util::prompt_err)?,
            };
            let password = rpassword::prompt_password("Password: ").map_err(util::prompt_err)?;
            if username.is_empty() || password.is_empty() {
                return Err(CliError::Validation {
                    field: "credentials".into(),
                    reason: "username and password cannot be empty".into(),
                });
            }
            Ok((username, SecretString::from(password)))
        }
    }
}

pub async fn handle(monitor: &Monitor, args: AuthArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        AuthCommand::Login { username, no_save } => {
            let (username, password) = credentials(monitor, username)?;
            let token = monitor.login_with(&username, &password).await?;

            if !no_save {
                let profile = profile_name(global);
                match config::store_secret(&profile, SecretSlot::Session, token.expose_secret()) {
                    Ok(()) => util::notice(
                        &format!("✓ Session stored in system keyring for profile '{profile}'"),
                        global.quiet,
                    ),
                    Err(e) => warn!(error = %e, "could not store session; set XMRNODES_SESSION to reuse it"),
                }
            }
            util::notice(&format!("✓ Logged in as {username}"), global.quiet);
            Ok(())
        }

        AuthCommand::Logout => {
            let message = monitor.logout().await?;
            let profile = profile_name(global);
            if let Err(e) = config::delete_secret(&profile, SecretSlot::Session) {
                warn!(error = %e, "could not remove stored session");
            }
            util::notice(&format!("✓ {message}"), global.quiet);
            Ok(())
        }
    }
}
