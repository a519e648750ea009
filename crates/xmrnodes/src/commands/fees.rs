//! Fee estimate command handler.

use tabled::Tabled;
use xmrnodes_core::{Monitor, NetFee};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct FeeRow {
    #[tabled(rename = "Network")]
    nettype: String,
    #[tabled(rename = "Fee (atomic/byte)")]
    fee: u64,
    #[tabled(rename = "Nodes")]
    nodes: u64,
}

pub async fn handle(monitor: &Monitor, global: &GlobalOpts) -> Result<(), CliError> {
    let fees = monitor.fees().await?;
    let out = output::render_list(
        &global.output,
        &fees,
        |f: &NetFee| FeeRow {
            nettype: f.nettype.clone(),
            fee: f.estimate_fee,
            nodes: f.node_count,
        },
        |f| format!("{} {}", f.nettype, f.estimate_fee),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
