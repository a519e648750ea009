//! Prober job command handlers.

use xmrnodes_core::{JobFilter, Monitor, ProbeReport};

use crate::cli::{GlobalOpts, JobArgs, JobCommand};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(monitor: &Monitor, args: JobArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        JobCommand::Request { tor, i2p, ipv6 } => {
            let filter = JobFilter {
                accept_tor: tor,
                accept_i2p: i2p,
                accept_ipv6: ipv6,
            };
            match monitor.request_job(filter).await? {
                Some(node) => {
                    let out = output::render_single(
                        &global.output,
                        &node,
                        |n| {
                            format!(
                                "Node {} {}://{}:{} ({})",
                                n.id,
                                n.protocol,
                                xmrnodes_core::format::format_hostname(&n.hostname),
                                n.port,
                                n.nettype
                            )
                        },
                        |n| n.id.to_string(),
                    );
                    output::print_output(&out, global.quiet);
                }
                None => util::notice("No node is due for probing", global.quiet),
            }
            Ok(())
        }

        JobCommand::Submit { from_file } => {
            let report: ProbeReport = util::read_json_file(&from_file)?;
            let message = monitor.submit_report(&report).await?;
            util::notice(&format!("✓ {message}"), global.quiet);
            Ok(())
        }
    }
}
