// ── Monitor facade ──
//
// One entry point for consumers: owns the API clients built from a
// `MonitorConfig`, obtains a session on demand for gated resources, and
// translates transport errors into `CoreError`.

use secrecy::SecretString;
use tracing::{debug, info};
use xmrnodes_api::models::{
    CountryCount, CronJob, JobFilter, NetFee, NewNode, ProbeLog, ProbeReport, Prober, RemoteNode,
};
use xmrnodes_api::{MonitorClient, Normalized, PagedResult, ProberClient, TableQuery};

use crate::config::{AuthCredentials, MonitorConfig};
use crate::error::CoreError;
use crate::table::PagedTable;

/// Client-side view of one remote-node monitor.
pub struct Monitor {
    config: MonitorConfig,
    client: MonitorClient,
    prober: Option<ProberClient>,
}

impl Monitor {
    /// Build the HTTP clients for `config`. No request is made.
    pub fn new(config: MonitorConfig) -> Result<Self, CoreError> {
        let transport = config.transport();
        let client = MonitorClient::new(config.url.clone(), &transport)?;
        let prober = config
            .prober_key
            .as_ref()
            .map(|key| ProberClient::from_api_key(config.url.clone(), key, &transport))
            .transpose()?;

        debug!(url = %config.url, prober = prober.is_some(), "monitor client ready");
        Ok(Self {
            config,
            client,
            prober,
        })
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Raw API client, for calls the facade does not wrap.
    pub fn client(&self) -> &MonitorClient {
        &self.client
    }

    /// A fresh table using the configured page size.
    pub fn table(&self) -> PagedTable {
        PagedTable::new(TableQuery::new(1, self.config.rows_per_page))
    }

    // ── Public listings ──────────────────────────────────────────────

    pub async fn nodes(&self, table: &PagedTable) -> Result<PagedResult<RemoteNode>, CoreError> {
        Ok(self.client.list_nodes(&mut &*table).await?)
    }

    pub async fn nodes_datatable(
        &self,
        table: &PagedTable,
    ) -> Result<PagedResult<RemoteNode>, CoreError> {
        Ok(self.client.list_nodes_datatable(&mut &*table).await?)
    }

    pub async fn probe_logs(&self, table: &PagedTable) -> Result<PagedResult<ProbeLog>, CoreError> {
        Ok(self.client.list_probe_logs(&mut &*table).await?)
    }

    pub async fn node(&self, id: u64) -> Result<RemoteNode, CoreError> {
        self.client
            .node(id)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                entity_type: "Node".into(),
                identifier: id.to_string(),
            })
    }

    pub async fn countries(&self) -> Result<Vec<CountryCount>, CoreError> {
        Ok(self.client.countries().await?)
    }

    pub async fn fees(&self) -> Result<Vec<NetFee>, CoreError> {
        Ok(self.client.fees().await?)
    }

    pub async fn add_node(&self, node: &NewNode) -> Result<String, CoreError> {
        let message = self.client.add_node(node).await?;
        info!(hostname = %node.hostname, port = node.port, "node submitted");
        Ok(message)
    }

    // ── Session ──────────────────────────────────────────────────────

    /// Log in with the configured username and password.
    ///
    /// Returns the new session token so the caller can persist it.
    pub async fn login(&self) -> Result<SecretString, CoreError> {
        match &self.config.auth {
            Some(AuthCredentials::Credentials { username, password }) => {
                self.login_with(username, password).await
            }
            Some(AuthCredentials::Session(_)) | None => Err(CoreError::Config {
                message: "no username/password configured for this monitor".into(),
            }),
        }
    }

    pub async fn login_with(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<SecretString, CoreError> {
        self.client.login(username, password).await?;
        info!(username, "logged in");
        self.client
            .session_token()
            .ok_or_else(|| CoreError::UnexpectedResponse {
                message: "login succeeded but no session cookie was set".into(),
            })
    }

    pub async fn logout(&self) -> Result<String, CoreError> {
        Ok(self.client.logout().await?)
    }

    /// Log in first when credentials are configured and no session is held.
    async fn ensure_session(&self) -> Result<(), CoreError> {
        if self.client.session_token().is_some() {
            return Ok(());
        }
        if let Some(AuthCredentials::Credentials { username, password }) = &self.config.auth {
            debug!("no session cookie; logging in with configured credentials");
            self.login_with(username, password).await?;
        }
        Ok(())
    }

    // ── Gated listings and admin ─────────────────────────────────────

    pub async fn crons(
        &self,
        table: &PagedTable,
    ) -> Result<Normalized<PagedResult<CronJob>>, CoreError> {
        self.ensure_session().await?;
        Ok(self.client.list_crons(&mut &*table).await?)
    }

    pub async fn probers(
        &self,
        table: &PagedTable,
    ) -> Result<Normalized<PagedResult<Prober>>, CoreError> {
        self.ensure_session().await?;
        Ok(self.client.list_probers(&mut &*table).await?)
    }

    pub async fn create_prober(&self, name: &str) -> Result<Normalized<Option<Prober>>, CoreError> {
        self.ensure_session().await?;
        Ok(self.client.create_prober(name).await?)
    }

    pub async fn edit_prober(&self, id: u64, name: &str) -> Result<Normalized<String>, CoreError> {
        self.ensure_session().await?;
        Ok(self.client.edit_prober(id, name).await?)
    }

    pub async fn delete_prober(&self, id: u64) -> Result<Normalized<String>, CoreError> {
        self.ensure_session().await?;
        Ok(self.client.delete_prober(id).await?)
    }

    // ── Prober jobs ──────────────────────────────────────────────────

    fn prober(&self) -> Result<&ProberClient, CoreError> {
        self.prober.as_ref().ok_or_else(|| CoreError::Config {
            message: "no prober API key configured".into(),
        })
    }

    pub async fn request_job(&self, filter: JobFilter) -> Result<Option<RemoteNode>, CoreError> {
        Ok(self.prober()?.request_job(filter).await?)
    }

    pub async fn submit_report(&self, report: &ProbeReport) -> Result<String, CoreError> {
        Ok(self.prober()?.submit_report(report).await?)
    }
}
