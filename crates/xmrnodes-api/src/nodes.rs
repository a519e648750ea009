// Public node endpoints
//
// Listings, node detail, aggregates, and node submission. None of these
// need a session.

use tracing::debug;

use crate::client::MonitorClient;
use crate::envelope::{Gate, Normalized, PagedResult};
use crate::error::Error;
use crate::models::{CountryCount, NetFee, NewNode, ProbeLog, RemoteNode};
use crate::resource;
use crate::table::PaginationState;

impl MonitorClient {
    /// One page of monitored nodes.
    ///
    /// `GET /api/v1/nodes` (default server sort: `last_checked desc`)
    pub async fn list_nodes<S>(&self, state: &mut S) -> Result<PagedResult<RemoteNode>, Error>
    where
        S: PaginationState + ?Sized,
    {
        public(self.load_page(&resource::NODES, state).await?)
    }

    /// Same listing through the older datatable endpoint.
    ///
    /// `GET /monero/remote-node-dt` (`sort`/`dir`, `data.total`/`data.nodes`)
    pub async fn list_nodes_datatable<S>(
        &self,
        state: &mut S,
    ) -> Result<PagedResult<RemoteNode>, Error>
    where
        S: PaginationState + ?Sized,
    {
        public(self.load_page(&resource::NODES_DATATABLE, state).await?)
    }

    /// One page of probe results.
    ///
    /// `GET /api/v1/nodes/logs` (default server sort: `id desc`)
    pub async fn list_probe_logs<S>(&self, state: &mut S) -> Result<PagedResult<ProbeLog>, Error>
    where
        S: PaginationState + ?Sized,
    {
        public(self.load_page(&resource::PROBE_LOGS, state).await?)
    }

    /// A single node, or `None` if the server has no such id.
    ///
    /// `GET /api/v1/nodes/id/{id}`
    pub async fn node(&self, id: u64) -> Result<Option<RemoteNode>, Error> {
        let url = self.url(&format!("/api/v1/nodes/id/{id}"))?;
        let node: Option<RemoteNode> = self.get_data(url).await?;
        // Unknown ids come back as a zero-valued node.
        Ok(node.filter(|n| n.id != 0))
    }

    /// Node counts per country.
    ///
    /// `GET /api/v1/countries`
    pub async fn countries(&self) -> Result<Vec<CountryCount>, Error> {
        let url = self.url("/api/v1/countries")?;
        self.get_data(url).await
    }

    /// Majority fee estimate per network.
    ///
    /// `GET /api/v1/fees`
    pub async fn fees(&self) -> Result<Vec<NetFee>, Error> {
        let url = self.url("/api/v1/fees")?;
        self.get_data(url).await
    }

    /// Submit a node for monitoring. Returns the server's message.
    ///
    /// `POST /api/v1/nodes` (form-encoded)
    pub async fn add_node(&self, node: &NewNode) -> Result<String, Error> {
        let url = self.url("/api/v1/nodes")?;
        debug!(hostname = %node.hostname, port = node.port, "POST {url}");
        let request = self.http().post(url).form(node);
        let envelope = public(self.mutate(request, Gate::Public).await?)?;
        Ok(envelope.message)
    }
}

// Public resources never yield `AuthRequired`; a server that says otherwise
// is answering with an error.
fn public<T>(result: Normalized<T>) -> Result<T, Error> {
    match result {
        Normalized::Data(data) => Ok(data),
        Normalized::AuthRequired => Err(Error::Api {
            status: 401,
            message: "Unauthorized".into(),
        }),
    }
}
