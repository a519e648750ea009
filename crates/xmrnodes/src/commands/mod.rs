//! Command dispatch: bridges CLI args -> `Monitor` calls -> output formatting.

pub mod auth;
pub mod config_cmd;
pub mod countries;
pub mod crons;
pub mod fees;
pub mod job;
pub mod logs;
pub mod nodes;
pub mod probers;
pub mod util;

use xmrnodes_core::Monitor;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a monitor-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, monitor: &Monitor, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Nodes(args) => nodes::handle(monitor, args, global).await,
        Command::Logs(args) => logs::handle(monitor, args, global).await,
        Command::Countries => countries::handle(monitor, global).await,
        Command::Fees => fees::handle(monitor, global).await,
        Command::Crons(args) => crons::handle(monitor, args, global).await,
        Command::Probers(args) => probers::handle(monitor, args, global).await,
        Command::Auth(args) => auth::handle(monitor, args, global).await,
        Command::Job(args) => job::handle(monitor, args, global).await,
        // Handled before a monitor is built.
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
