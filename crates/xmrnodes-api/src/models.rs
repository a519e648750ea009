// Wire models
//
// Read-only projections of what the monitor server returns. Fields default
// liberally: the server omits zero values in places (`omitempty`) and older
// deployments lack newer columns.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

// ── Remote node ──────────────────────────────────────────────────────

/// A monitored Monero remote node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteNode {
    pub id: u64,
    pub hostname: String,
    pub ip: String,
    pub port: u16,
    pub protocol: String,
    pub is_tor: bool,
    pub is_i2p: bool,
    pub is_available: bool,
    pub nettype: String,
    pub height: u64,
    pub adjusted_time: u64,
    pub database_size: u64,
    pub difficulty: u64,
    pub version: String,
    pub status: String,
    pub uptime: f64,
    pub estimate_fee: u64,
    pub asn: u64,
    pub asn_name: String,
    pub cc: String,
    pub country_name: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub date_entered: i64,
    pub last_checked: i64,
    /// JSON array of the last five probe outcomes (0 failed, 1 ok, 2 unknown).
    pub last_check_statuses: Value,
    pub cors: bool,
    pub ipv6_only: bool,
    /// Comma-separated list of resolved addresses.
    pub ip_addresses: String,
    pub is_archived: i64,
}

impl RemoteNode {
    /// Resolved addresses, split out of the comma-separated field.
    pub fn ip_addresses(&self) -> Vec<&str> {
        self.ip_addresses
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// The last five check outcomes. Anything that is not an array of five
    /// small integers reads as "unknown" (2) in every slot.
    pub fn check_statuses(&self) -> [u8; 5] {
        const UNKNOWN: [u8; 5] = [2; 5];

        // Some deployments return the column as a JSON-encoded string.
        let parsed = match &self.last_check_statuses {
            Value::String(raw) => serde_json::from_str::<[u8; 5]>(raw).ok(),
            other => serde_json::from_value::<[u8; 5]>(other.clone()).ok(),
        };
        parsed.unwrap_or(UNKNOWN)
    }

    pub fn is_onion(&self) -> bool {
        self.is_tor || self.is_i2p
    }
}

// ── Probe log ────────────────────────────────────────────────────────

/// One probe attempt against a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeLog {
    pub id: u64,
    pub node_id: u64,
    pub prober_id: u64,
    /// 1 available, 0 failed.
    pub status: i64,
    pub height: u64,
    pub adjusted_time: u64,
    pub database_size: u64,
    pub difficulty: u64,
    pub estimate_fee: u64,
    pub date_checked: i64,
    pub failed_reason: String,
    /// Seconds.
    pub fetch_runtime: f64,
}

impl ProbeLog {
    pub fn is_ok(&self) -> bool {
        self.status == 1
    }
}

// ── Aggregates ───────────────────────────────────────────────────────

/// Node count for one country (`GET /api/v1/countries`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountryCount {
    pub total_nodes: u64,
    pub cc: String,
    pub name: String,
}

/// Majority fee estimate for one network (`GET /api/v1/fees`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetFee {
    pub nettype: String,
    pub estimate_fee: u64,
    pub node_count: u64,
}

// ── Admin ────────────────────────────────────────────────────────────

/// A scheduled server task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CronJob {
    pub id: u64,
    pub title: String,
    pub slug: String,
    pub description: String,
    /// Seconds between runs.
    pub run_every: u64,
    pub last_run: i64,
    pub next_run: i64,
    /// Duration of the last run, seconds.
    pub run_time: f64,
    /// 1 while running.
    pub cron_state: i64,
    pub is_enabled: i64,
}

impl CronJob {
    pub fn is_enabled(&self) -> bool {
        self.is_enabled == 1
    }

    pub fn is_running(&self) -> bool {
        self.cron_state == 1
    }
}

/// A registered prober machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prober {
    pub id: u64,
    pub name: String,
    pub api_key: Uuid,
    #[serde(default)]
    pub last_submit_ts: i64,
}

// ── Request bodies ───────────────────────────────────────────────────

/// Form body for `POST /api/v1/nodes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNode {
    pub protocol: String,
    pub hostname: String,
    pub port: u16,
}

/// Query for `GET /api/v1/job`: which kinds of nodes this prober can reach.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobFilter {
    pub accept_tor: bool,
    pub accept_i2p: bool,
    pub accept_ipv6: bool,
}

impl JobFilter {
    /// Query pairs in the server's `0`/`1` integer form.
    pub fn query_pairs(self) -> [(&'static str, &'static str); 3] {
        let flag = |b: bool| if b { "1" } else { "0" };
        [
            ("accept_tor", flag(self.accept_tor)),
            ("accept_i2p", flag(self.accept_i2p)),
            ("accept_ipv6", flag(self.accept_ipv6)),
        ]
    }
}

/// Body for `POST /api/v1/job`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProbeReport {
    /// Seconds the probe took.
    pub took_time: f64,
    /// Failure reason, empty on success.
    pub message: String,
    pub node_info: RemoteNode,
}

/// Body for prober create/edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ProberName<'a> {
    pub name: &'a str,
}

/// Body for `POST /auth/login`.
#[derive(Serialize)]
pub(crate) struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn node_decodes_with_missing_fields() {
        let node: RemoteNode = serde_json::from_value(json!({
            "id": 12,
            "hostname": "node.example.com",
            "port": 18081,
            "protocol": "https",
            "is_available": true,
            "ip_addresses": "1.2.3.4, 5.6.7.8,",
        }))
        .unwrap();

        assert_eq!(node.id, 12);
        assert!(!node.is_tor);
        assert_eq!(node.ip_addresses(), vec!["1.2.3.4", "5.6.7.8"]);
        assert_eq!(node.check_statuses(), [2; 5]);
    }

    #[test]
    fn check_statuses_parse_array_and_string() {
        let mut node = RemoteNode {
            last_check_statuses: json!([1, 1, 0, 1, 2]),
            ..RemoteNode::default()
        };
        assert_eq!(node.check_statuses(), [1, 1, 0, 1, 2]);

        node.last_check_statuses = json!("[0,0,0,1,1]");
        assert_eq!(node.check_statuses(), [0, 0, 0, 1, 1]);

        node.last_check_statuses = json!([1, 1]);
        assert_eq!(node.check_statuses(), [2; 5]);
    }

    #[test]
    fn job_filter_encodes_flags_as_integers() {
        let filter = JobFilter {
            accept_tor: true,
            ..JobFilter::default()
        };
        assert_eq!(
            filter.query_pairs(),
            [("accept_tor", "1"), ("accept_i2p", "0"), ("accept_ipv6", "0")]
        );
    }
}
