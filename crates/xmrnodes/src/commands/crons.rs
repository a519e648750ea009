//! Cron job command handler.

use std::fmt::Write as _;

use tabled::Tabled;
use xmrnodes_core::format::{format_float, time_since};
use xmrnodes_core::{CronJob, Monitor};

use crate::cli::{CronsArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct CronRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Every")]
    every: String,
    #[tabled(rename = "Last Run")]
    last_run: String,
    #[tabled(rename = "Next Run")]
    next_run: String,
    #[tabled(rename = "Took")]
    took: String,
    #[tabled(rename = "State")]
    state: String,
}

impl CronRow {
    fn new(c: &CronJob, color: bool) -> Self {
        let state = match (c.is_enabled(), c.is_running()) {
            (false, _) => output::dim("disabled", color),
            (true, true) => output::paint("running", true, color),
            (true, false) => "idle".into(),
        };
        Self {
            id: c.id,
            title: c.title.clone(),
            every: interval(c.run_every),
            last_run: time_since(c.last_run),
            next_run: time_since(c.next_run),
            took: format!("{}s", format_float(c.run_time)),
            state,
        }
    }
}

/// `90` → `"1m30s"`, `3600` → `"1h"`.
fn interval(secs: u64) -> String {
    let (h, m, s) = (secs / 3600, secs % 3600 / 60, secs % 60);
    let mut out = String::new();
    for (value, unit) in [(h, "h"), (m, "m"), (s, "s")] {
        if value > 0 {
            let _ = write!(out, "{value}{unit}");
        }
    }
    if out.is_empty() { "0s".into() } else { out }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(monitor: &Monitor, args: CronsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    let table = monitor.table();
    util::apply_list_args(&table, &args.list);
    util::apply_page(&table, &args.list);

    let pb = output::spinner("Fetching cron jobs...", global);
    let result = monitor.crons(&table).await;
    pb.finish_and_clear();
    let page = util::require_session(result?)?;

    let out = output::render_list(
        &global.output,
        &page.items,
        |c| CronRow::new(c, color),
        |c| c.slug.clone(),
    );
    output::print_output(&out, global.quiet);
    output::print_page_footer(&table, "cron jobs", global);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_drops_zero_units() {
        assert_eq!(interval(0), "0s");
        assert_eq!(interval(90), "1m30s");
        assert_eq!(interval(3600), "1h");
        assert_eq!(interval(86_400 + 5), "24h5s");
    }
}
