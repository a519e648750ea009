// ── Typed listing filters ──
//
// Node and probe-log listings take free-form `key=value` filters. These
// builders produce the keys and value spellings the server understands
// and append them to a `TableQuery` in a fixed order.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use xmrnodes_api::TableQuery;

/// Monero network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Nettype {
    Mainnet,
    Stagenet,
    Testnet,
}

/// Transport a node is reached over. `Http`/`Https` exclude Tor and I2P nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum NodeProtocol {
    Http,
    Https,
    Tor,
    I2p,
}

/// Filters for the node listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeFilter {
    /// Substring of the hostname or any resolved address.
    pub host: Option<String>,
    pub nettype: Option<Nettype>,
    pub protocol: Option<NodeProtocol>,
    /// Two-letter country code, or `UNKNOWN` for nodes without geo data.
    pub cc: Option<String>,
    /// `true` online only, `false` offline only.
    pub online: Option<bool>,
    /// CORS-capable nodes only.
    pub cors: bool,
}

impl NodeFilter {
    pub fn apply(&self, query: &mut TableQuery) {
        if let Some(host) = self.host.as_deref().filter(|h| !h.is_empty()) {
            query.add_filter("host", host);
        }
        if let Some(nettype) = self.nettype {
            query.add_filter("nettype", nettype.to_string());
        }
        if let Some(protocol) = self.protocol {
            query.add_filter("protocol", protocol.to_string());
        }
        if let Some(cc) = self.cc.as_deref().filter(|c| !c.is_empty()) {
            query.add_filter("cc", cc.to_ascii_uppercase());
        }
        if let Some(online) = self.online {
            query.add_filter("status", if online { "1" } else { "0" });
        }
        if self.cors {
            query.add_filter("cors", "on");
        }
    }
}

/// Filters for the probe-log listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogFilter {
    pub node_id: Option<u64>,
    /// `true` successful probes only, `false` failures only.
    pub ok: Option<bool>,
    /// Substring of the failure reason.
    pub failed_reason: Option<String>,
}

impl LogFilter {
    pub fn apply(&self, query: &mut TableQuery) {
        if let Some(node_id) = self.node_id {
            query.add_filter("node_id", node_id.to_string());
        }
        if let Some(ok) = self.ok {
            query.add_filter("status", if ok { "1" } else { "0" });
        }
        if let Some(reason) = self.failed_reason.as_deref().filter(|r| !r.is_empty()) {
            query.add_filter("failed_reason", reason);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use xmrnodes_api::SortKeys;

    use super::*;

    #[test]
    fn node_filter_emits_server_spellings_in_order() {
        let filter = NodeFilter {
            host: Some("example".into()),
            nettype: Some(Nettype::Stagenet),
            protocol: Some(NodeProtocol::Tor),
            cc: Some("de".into()),
            online: Some(true),
            cors: true,
        };
        let mut query = TableQuery::default();
        filter.apply(&mut query);

        assert_eq!(
            query.encode(SortKeys::SortByDirection),
            "page=1&limit=10&host=example&nettype=stagenet&protocol=tor&cc=DE&status=1&cors=on"
        );
    }

    #[test]
    fn empty_filters_add_nothing() {
        let mut query = TableQuery::default();
        NodeFilter::default().apply(&mut query);
        LogFilter {
            failed_reason: Some(String::new()),
            ..LogFilter::default()
        }
        .apply(&mut query);
        assert!(query.filters().is_empty());
    }

    #[test]
    fn log_filter_encodes_status_as_integer() {
        let mut query = TableQuery::default();
        LogFilter {
            node_id: Some(12),
            ok: Some(false),
            failed_reason: None,
        }
        .apply(&mut query);

        assert_eq!(
            query.encode(SortKeys::SortByDirection),
            "page=1&limit=10&node_id=12&status=0"
        );
    }

    #[test]
    fn protocol_parses_case_insensitively() {
        assert_eq!("I2P".parse::<NodeProtocol>().ok(), Some(NodeProtocol::I2p));
        assert_eq!(NodeProtocol::I2p.to_string(), "i2p");
    }
}
