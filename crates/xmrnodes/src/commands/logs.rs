//! Probe log command handler.

use tabled::Tabled;
use xmrnodes_core::format::{format_float, time_since};
use xmrnodes_core::{LogFilter, Monitor, ProbeLog};

use crate::cli::{GlobalOpts, LogsArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct LogRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Node")]
    node_id: u64,
    #[tabled(rename = "Prober")]
    prober_id: u64,
    #[tabled(rename = "Result")]
    result: String,
    #[tabled(rename = "Height")]
    height: u64,
    #[tabled(rename = "Runtime")]
    runtime: String,
    #[tabled(rename = "Checked")]
    checked: String,
}

impl LogRow {
    fn new(l: &ProbeLog, color: bool) -> Self {
        let result = if l.is_ok() {
            output::paint("ok", true, color)
        } else if l.failed_reason.is_empty() {
            output::paint("failed", false, color)
        } else {
            output::paint(&l.failed_reason, false, color)
        };
        Self {
            id: l.id,
            node_id: l.node_id,
            prober_id: l.prober_id,
            result,
            height: l.height,
            runtime: format!("{}s", format_float(l.fetch_runtime)),
            checked: time_since(l.date_checked),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(monitor: &Monitor, args: LogsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    let filter = LogFilter {
        node_id: args.node,
        ok: match (args.ok, args.failed) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        },
        failed_reason: args.reason,
    };

    let table = monitor.table();
    util::apply_list_args(&table, &args.list);
    table.update(|q| filter.apply(q));
    util::apply_page(&table, &args.list);

    let pb = output::spinner("Fetching probe logs...", global);
    let page = monitor.probe_logs(&table).await;
    pb.finish_and_clear();
    let page = page?;

    let out = output::render_list(
        &global.output,
        &page.items,
        |l| LogRow::new(l, color),
        |l| l.id.to_string(),
    );
    output::print_output(&out, global.quiet);
    output::print_page_footer(&table, "logs", global);
    Ok(())
}
