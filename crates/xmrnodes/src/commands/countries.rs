//! Country summary command handler.

use tabled::Tabled;
use xmrnodes_core::{CountryCount, Monitor};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct CountryRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Nodes")]
    nodes: u64,
}

impl From<&CountryCount> for CountryRow {
    fn from(c: &CountryCount) -> Self {
        Self {
            code: if c.cc.is_empty() {
                "UNKNOWN".into()
            } else {
                c.cc.clone()
            },
            name: c.name.clone(),
            nodes: c.total_nodes,
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(monitor: &Monitor, global: &GlobalOpts) -> Result<(), CliError> {
    let countries = monitor.countries().await?;
    let out = output::render_list(&global.output, &countries, |c| CountryRow::from(c), |c| {
        c.cc.clone()
    });
    output::print_output(&out, global.quiet);
    Ok(())
}
