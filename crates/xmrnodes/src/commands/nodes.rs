//! Remote node command handlers.

use std::fmt::Write as _;

use tabled::Tabled;
use xmrnodes_core::format::{
    curl_get_info, format_bytes, format_float, format_hashes, format_hostname, time_since,
};
use xmrnodes_core::{Monitor, Nettype, NewNode, NodeFilter, NodeProtocol, RemoteNode};

use crate::cli::{
    GlobalOpts, NettypeArg, NodesArgs, NodesCommand, NodesListArgs, ProtocolArg, RpcProtocol,
};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct NodeRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Host")]
    host: String,
    #[tabled(rename = "Net")]
    nettype: String,
    #[tabled(rename = "Height")]
    height: u64,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Uptime")]
    uptime: String,
    #[tabled(rename = "Country")]
    cc: String,
    #[tabled(rename = "Checks")]
    checks: String,
    #[tabled(rename = "Last Checked")]
    last_checked: String,
}

impl NodeRow {
    fn new(n: &RemoteNode, color: bool) -> Self {
        Self {
            id: n.id,
            host: format!(
                "{}://{}:{}",
                n.protocol,
                format_hostname(&n.hostname),
                n.port
            ),
            nettype: n.nettype.clone(),
            height: n.height,
            status: status_label(n, color),
            uptime: format!("{}%", format_float(n.uptime)),
            cc: if n.cc.is_empty() { "-".into() } else { n.cc.clone() },
            checks: check_history(n, color),
            last_checked: time_since(n.last_checked),
        }
    }
}

fn status_label(n: &RemoteNode, color: bool) -> String {
    if n.is_available {
        output::paint("online", true, color)
    } else {
        output::paint("offline", false, color)
    }
}

/// One glyph per recent probe, oldest first: ● ok, ○ failed, · not yet probed.
fn check_history(n: &RemoteNode, color: bool) -> String {
    n.check_statuses()
        .iter()
        .map(|s| match s {
            1 => output::paint("●", true, color),
            0 => output::paint("○", false, color),
            _ => output::dim("·", color),
        })
        .collect()
}

fn detail(n: &RemoteNode, color: bool) -> String {
    let mut out = String::new();
    let mut line = |label: &str, value: String| {
        let _ = writeln!(out, "{label:<14} {value}");
    };

    line("ID", n.id.to_string());
    line("Host", format_hostname(&n.hostname));
    line("Port", n.port.to_string());
    line("Protocol", n.protocol.clone());
    line("Network", n.nettype.clone());
    line("Status", status_label(n, color));
    line("Checks", check_history(n, color));
    line("Uptime", format!("{}%", format_float(n.uptime)));
    line("Height", n.height.to_string());
    line("Version", n.version.clone());
    line("Difficulty", n.difficulty.to_string());
    line("Hash rate", format_hashes(network_hashrate(n.difficulty)));
    line("Database", format_bytes(n.database_size, 2));
    line("Fee estimate", n.estimate_fee.to_string());
    line("CORS", if n.cors { "yes" } else { "no" }.into());
    if !n.is_onion() {
        line("Addresses", n.ip_addresses().join(", "));
        line(
            "Location",
            [n.city.as_str(), n.country_name.as_str()]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        );
        line("ASN", format!("AS{} {}", n.asn, n.asn_name));
    }
    line("First seen", time_since(n.date_entered));
    line("Last checked", time_since(n.last_checked));

    out.trim_end().to_owned()
}

/// Monero targets one block every two minutes.
const BLOCK_TIME_SECS: f64 = 120.0;

#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn network_hashrate(difficulty: u64) -> f64 {
    difficulty as f64 / BLOCK_TIME_SECS
}

// ── Filters ─────────────────────────────────────────────────────────

fn node_filter(args: &NodesListArgs) -> NodeFilter {
    NodeFilter {
        host: args.host.clone(),
        nettype: args.nettype.map(|n| match n {
            NettypeArg::Mainnet => Nettype::Mainnet,
            NettypeArg::Stagenet => Nettype::Stagenet,
            NettypeArg::Testnet => Nettype::Testnet,
        }),
        protocol: args.protocol.map(|p| match p {
            ProtocolArg::Http => NodeProtocol::Http,
            ProtocolArg::Https => NodeProtocol::Https,
            ProtocolArg::Tor => NodeProtocol::Tor,
            ProtocolArg::I2p => NodeProtocol::I2p,
        }),
        cc: args.cc.clone(),
        online: match (args.online, args.offline) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        },
        cors: args.cors,
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(monitor: &Monitor, args: NodesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    match args.command {
        NodesCommand::List(list) => {
            let table = monitor.table();
            util::apply_list_args(&table, &list.list);
            let filter = node_filter(&list);
            table.update(|q| filter.apply(q));
            util::apply_page(&table, &list.list);

            let pb = output::spinner("Fetching nodes...", global);
            let page = if list.datatable {
                monitor.nodes_datatable(&table).await
            } else {
                monitor.nodes(&table).await
            };
            pb.finish_and_clear();
            let page = page?;

            let out = output::render_list(
                &global.output,
                &page.items,
                |n| NodeRow::new(n, color),
                |n| n.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            output::print_page_footer(&table, "nodes", global);
            Ok(())
        }

        NodesCommand::Get { id } => {
            let node = monitor.node(id).await?;
            let out = output::render_single(
                &global.output,
                &node,
                |n| detail(n, color),
                |n| n.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        NodesCommand::Add {
            protocol,
            hostname,
            port,
        } => {
            let node = NewNode {
                protocol: match protocol {
                    RpcProtocol::Http => "http",
                    RpcProtocol::Https => "https",
                }
                .into(),
                hostname,
                port,
            };
            let message = monitor.add_node(&node).await?;
            util::notice(&format!("✓ {message}"), global.quiet);
            Ok(())
        }

        NodesCommand::Curl { id } => {
            let node = monitor.node(id).await?;
            output::print_output(&curl_get_info(&node), global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> RemoteNode {
        RemoteNode {
            id: 3,
            hostname: "2001:db8::7".into(),
            port: 18089,
            protocol: "https".into(),
            nettype: "mainnet".into(),
            is_available: true,
            uptime: 99.5,
            last_check_statuses: serde_json::json!([1, 0, 2, 1, 1]),
            ..RemoteNode::default()
        }
    }

    #[test]
    fn row_brackets_ipv6_hosts() {
        let row = NodeRow::new(&node(), false);
        assert_eq!(row.host, "https://[2001:db8::7]:18089");
        assert_eq!(row.status, "online");
        assert_eq!(row.uptime, "99.5%");
        assert_eq!(row.cc, "-");
    }

    #[test]
    fn hashrate_is_difficulty_over_block_time() {
        assert_eq!(format_hashes(network_hashrate(360_000_000_000)), "3.00 GH");
    }

    #[test]
    fn history_has_one_glyph_per_check() {
        assert_eq!(check_history(&node(), false), "●○·●●");
    }

    #[test]
    fn online_and_offline_flags_map_to_status_filter() {
        use clap::Parser;

        use crate::cli::{Cli, Command};

        let cli = Cli::parse_from(["xmrnodes", "nodes", "list", "--offline", "--cc", "de"]);
        let Command::Nodes(NodesArgs {
            command: NodesCommand::List(list),
        }) = cli.command
        else {
            panic!("expected nodes list");
        };
        let filter = node_filter(&list);
        assert_eq!(filter.online, Some(false));
        assert_eq!(filter.cc.as_deref(), Some("de"));
    }
}
