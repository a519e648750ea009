//! Human-readable formatting for node data: sizes, hashrates, hostnames,
//! relative times.

use std::net::Ipv6Addr;

use chrono::{DateTime, TimeDelta, Utc};
use xmrnodes_api::models::RemoteNode;

const BYTE_UNITS: [&str; 9] = [
    "Bytes", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB", "ZiB", "YiB",
];

/// Format a byte count with binary units, rounded to `decimals` places
/// (negative clamps to 0) with trailing zeros dropped.
///
/// `format_bytes(1536, 1)` is `"1.5 KiB"`, `format_bytes(1024, 2)` is `"1 KiB"`.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
pub fn format_bytes(bytes: u64, decimals: i32) -> String {
    if bytes == 0 {
        return "0 Bytes".into();
    }

    let precision = decimals.max(0) as usize;
    let value = bytes as f64;
    let unit = ((value.ln() / 1024_f64.ln()).floor() as usize).min(BYTE_UNITS.len() - 1);
    let scaled = value / 1024_f64.powi(unit as i32);

    format!("{} {}", trim_to(scaled, precision), BYTE_UNITS[unit])
}

/// Format a hashrate (H/s) the way mining UIs do: sub-kilo magnitudes as
/// integers, KH/MH/GH with two decimals.
pub fn format_hashes(h: f64) -> String {
    match h {
        h if h < 1e-12 => "0 H".into(),
        h if h < 1e-9 => format!("{:.0} pH", trim_to(h * 1e12, 0)),
        h if h < 1e-6 => format!("{:.0} nH", trim_to(h * 1e9, 0)),
        h if h < 1e-3 => format!("{:.0} μH", trim_to(h * 1e6, 0)),
        h if h < 1.0 => format!("{:.0} mH", trim_to(h * 1e3, 0)),
        h if h < 1e3 => format!("{h:.0} H"),
        h if h < 1e6 => format!("{:.2} KH", trim_to(h * 1e-3, 2)),
        h if h < 1e9 => format!("{:.2} MH", trim_to(h * 1e-6, 2)),
        h => format!("{:.2} GH", trim_to(h * 1e-9, 2)),
    }
}

/// Wrap IPv6 literals in brackets so they can sit in a URL authority.
/// Domain names, IPv4 literals and already-bracketed hosts pass through.
pub fn format_hostname(host: &str) -> String {
    if host.parse::<Ipv6Addr>().is_ok() {
        format!("[{host}]")
    } else {
        host.to_owned()
    }
}

/// Shortest decimal form of `f`, no exponent and no trailing zeros.
pub fn format_float(f: f64) -> String {
    format!("{f}")
}

/// `"42s ago"`, `"3h from now"`, `"2 months ago"` relative to the current time.
pub fn time_since(timestamp: i64) -> String {
    time_since_at(timestamp, Utc::now())
}

/// [`time_since`] against an explicit `now`.
pub fn time_since_at(timestamp: i64, now: DateTime<Utc>) -> String {
    let delta = TimeDelta::seconds(timestamp - now.timestamp());
    let (span, suffix) = if delta > TimeDelta::zero() {
        (delta, "from now")
    } else {
        (-delta, "ago")
    };

    if span < TimeDelta::minutes(1) {
        format!("{}s {suffix}", span.num_seconds())
    } else if span < TimeDelta::hours(1) {
        format!("{}m {suffix}", span.num_minutes())
    } else if span < TimeDelta::days(1) {
        format!("{}h {suffix}", span.num_hours())
    } else if span < TimeDelta::weeks(1) {
        format!("{}d {suffix}", span.num_days())
    } else if span < TimeDelta::days(30) {
        format!("{}w {suffix}", span.num_weeks())
    } else {
        match span.num_days() / 30 {
            1 => format!("1 month {suffix}"),
            months => format!("{months} months {suffix}"),
        }
    }
}

/// Example `curl` call against a node's `get_info` JSON-RPC method,
/// routed through the usual local SOCKS proxy for Tor and I2P nodes.
pub fn curl_get_info(node: &RemoteNode) -> String {
    const BODY: &str =
        r#"'{"jsonrpc":"2.0","id":"0","method":"get_info"}' -H 'Content-Type: application/json'"#;

    let proxy = if node.is_i2p {
        "-x socks5h://127.0.0.1:4447 "
    } else if node.is_tor {
        "-x socks5h://127.0.0.1:9050 "
    } else {
        ""
    };

    format!(
        "curl {proxy}{}://{}:{}/json_rpc -d {BODY} -sL",
        node.protocol,
        format_hostname(&node.hostname),
        node.port
    )
}

// Round to `precision` places, then let f64 Display drop trailing zeros.
fn trim_to(value: f64, precision: usize) -> f64 {
    format!("{value:.precision$}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn bytes() {
        assert_eq!(format_bytes(0, 2), "0 Bytes");
        assert_eq!(format_bytes(1536, 1), "1.5 KiB");
        assert_eq!(format_bytes(1024, 2), "1 KiB");
        assert_eq!(format_bytes(512, 2), "512 Bytes");
        assert_eq!(format_bytes(1536, -3), "2 KiB");
        assert_eq!(format_bytes(212_345_678_901, 2), "197.76 GiB");
    }

    #[test]
    fn hashes() {
        assert_eq!(format_hashes(0.0), "0 H");
        assert_eq!(format_hashes(0.5), "500 mH");
        assert_eq!(format_hashes(0.000_5), "500 μH");
        assert_eq!(format_hashes(42.0), "42 H");
        assert_eq!(format_hashes(1500.0), "1.50 KH");
        assert_eq!(format_hashes(2_345_678.0), "2.35 MH");
        assert_eq!(format_hashes(3.2e9), "3.20 GH");
    }

    #[test]
    fn hostnames() {
        assert_eq!(format_hostname("2001:db8::1"), "[2001:db8::1]");
        assert_eq!(format_hostname("node.example.com"), "node.example.com");
        assert_eq!(format_hostname("203.0.113.5"), "203.0.113.5");
        assert_eq!(format_hostname("[2001:db8::1]"), "[2001:db8::1]");
    }

    #[test]
    fn floats() {
        assert_eq!(format_float(1.50), "1.5");
        assert_eq!(format_float(20000.0), "20000");
        assert_eq!(format_float(0.125), "0.125");
    }

    #[test]
    fn relative_times() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default();
        let at = |offset: i64| time_since_at(1_700_000_000 + offset, now);

        assert_eq!(at(0), "0s ago");
        assert_eq!(at(-45), "45s ago");
        assert_eq!(at(-125), "2m ago");
        assert_eq!(at(-3 * 3600), "3h ago");
        assert_eq!(at(-2 * 86_400), "2d ago");
        assert_eq!(at(-15 * 86_400), "2w ago");
        assert_eq!(at(-31 * 86_400), "1 month ago");
        assert_eq!(at(-95 * 86_400), "3 months ago");
        assert_eq!(at(90), "1m from now");
    }

    #[test]
    fn curl_commands_pick_proxy() {
        let mut node = RemoteNode {
            hostname: "node.example.com".into(),
            protocol: "https".into(),
            port: 18089,
            ..RemoteNode::default()
        };
        assert!(
            curl_get_info(&node).starts_with("curl https://node.example.com:18089/json_rpc -d ")
        );

        node.is_tor = true;
        assert!(curl_get_info(&node).starts_with("curl -x socks5h://127.0.0.1:9050 https://"));

        node.is_i2p = true;
        assert!(curl_get_info(&node).contains("socks5h://127.0.0.1:4447"));
        assert!(curl_get_info(&node).ends_with("-sL"));
    }
}
