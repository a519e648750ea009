// xmrnodes-core: Shared layer between xmrnodes-api and the CLI.

pub mod config;
pub mod error;
pub mod filter;
pub mod format;
pub mod monitor;
pub mod pagination;
pub mod table;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{AuthCredentials, MonitorConfig, TlsVerification};
pub use error::CoreError;
pub use filter::{LogFilter, Nettype, NodeFilter, NodeProtocol};
pub use monitor::Monitor;
pub use pagination::{PageButton, PageWindow};
pub use table::PagedTable;

// Wire types consumers handle directly.
pub use xmrnodes_api::models::{
    CountryCount, CronJob, JobFilter, NetFee, NewNode, ProbeLog, ProbeReport, Prober, RemoteNode,
};
pub use xmrnodes_api::{Normalized, PagedResult, SortDirection, TableQuery};
