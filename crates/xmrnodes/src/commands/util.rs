//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::path::Path;

use xmrnodes_core::{CoreError, Normalized, PagedTable, SortDirection};

use crate::cli::{ListArgs, SortDir};
use crate::error::CliError;

/// Copy `--page`, `--limit` and `--sort/--dir` onto a table.
///
/// The page is set last: sorting and filtering return the table to page 1.
pub fn apply_list_args(table: &PagedTable, args: &ListArgs) {
    if let Some(limit) = args.limit {
        table.set_rows_per_page(limit);
    }
    if let Some(ref field) = args.sort {
        let direction = match args.dir {
            SortDir::Asc => SortDirection::Asc,
            SortDir::Desc => SortDirection::Desc,
        };
        table.set_sort(field, direction);
    }
}

pub fn apply_page(table: &PagedTable, args: &ListArgs) {
    table.set_page(args.page);
}

/// Unwrap a session-gated result, turning `AuthRequired` into a login hint.
pub fn require_session<T>(result: Normalized<T>) -> Result<T, CliError> {
    result
        .into_data()
        .ok_or_else(|| CoreError::LoginRequired.into())
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(prompt_err)
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Print a status line on stderr unless quiet.
pub fn notice(message: &str, quiet: bool) {
    if !quiet {
        eprintln!("{message}");
    }
}
