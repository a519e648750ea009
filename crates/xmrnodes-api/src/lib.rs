// xmrnodes-api: Async client for the Monero remote-node monitor HTTP API
//
// The paginated-read contract (query encoding, envelope normalization,
// request sequencing) lives in `query`, `envelope` and `table`; endpoint
// methods hang off `MonitorClient` and `ProberClient`.

pub mod admin;
pub mod client;
pub mod envelope;
pub mod error;
pub mod models;
pub mod nodes;
pub mod prober;
pub mod query;
pub mod resource;
pub mod table;
pub mod transport;

pub use client::MonitorClient;
pub use envelope::{Envelope, Extraction, Gate, Normalized, PagedResult, normalize};
pub use error::Error;
pub use prober::ProberClient;
pub use query::{Filter, Sort, SortDirection, SortKeys, TableQuery};
pub use resource::ResourceSpec;
pub use table::{PaginationState, RequestToken, TableState};
pub use transport::{TlsMode, TransportConfig};
