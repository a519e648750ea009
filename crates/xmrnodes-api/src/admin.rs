// Session and admin endpoints
//
// Login stores the `xmr-nodes-ui` cookie in the client's jar; every other
// method here is session-gated and reports a missing or expired session as
// `Normalized::AuthRequired`.

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::client::{MonitorClient, check, decode_data, execute};
use crate::envelope::{Gate, Normalized, PagedResult};
use crate::error::Error;
use crate::models::{Credentials, CronJob, Prober, ProberName};
use crate::resource;
use crate::table::PaginationState;

impl MonitorClient {
    // ── Session ──────────────────────────────────────────────────────

    /// Authenticate and store the session cookie.
    ///
    /// `POST /auth/login`
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<String, Error> {
        let url = self.url("/auth/login")?;
        debug!(username, "POST {url}");

        let body = Credentials {
            username,
            password: password.expose_secret(),
        };
        let (status, envelope) = execute(self.http().post(url).json(&body)).await?;

        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: if envelope.message.is_empty() {
                    "invalid username or password".into()
                } else {
                    envelope.message
                },
            });
        }
        check(status, &envelope)?;
        Ok(envelope.message)
    }

    /// Clear the session cookie on the server.
    ///
    /// `POST /auth/logout`
    pub async fn logout(&self) -> Result<String, Error> {
        let url = self.url("/auth/logout")?;
        debug!("POST {url}");
        let (status, envelope) = execute(self.http().post(url)).await?;
        check(status, &envelope)?;
        Ok(envelope.message)
    }

    // ── Cron jobs ────────────────────────────────────────────────────

    /// Scheduled server tasks.
    ///
    /// `GET /api/v1/crons` (bare list; the count is the list length)
    pub async fn list_crons<S>(
        &self,
        state: &mut S,
    ) -> Result<Normalized<PagedResult<CronJob>>, Error>
    where
        S: PaginationState + ?Sized,
    {
        self.load_page(&resource::CRONS, state).await
    }

    // ── Probers ──────────────────────────────────────────────────────

    /// Registered prober machines.
    ///
    /// `GET /api/v1/prober`
    pub async fn list_probers<S>(
        &self,
        state: &mut S,
    ) -> Result<Normalized<PagedResult<Prober>>, Error>
    where
        S: PaginationState + ?Sized,
    {
        self.load_page(&resource::PROBERS, state).await
    }

    /// Register a prober. The server may echo the new prober (with its
    /// generated API key) in `data`.
    ///
    /// `POST /api/v1/prober` body `{name}`
    pub async fn create_prober(&self, name: &str) -> Result<Normalized<Option<Prober>>, Error> {
        let url = self.url(resource::PROBERS.path)?;
        debug!(name, "POST {url}");
        let request = self.http().post(url).json(&ProberName { name });
        self.mutate(request, Gate::Session)
            .await?
            .try_map(|envelope| decode_data(envelope.data))
    }

    /// Rename a prober.
    ///
    /// `PATCH /api/v1/prober/{id}` body `{name}`
    pub async fn edit_prober(&self, id: u64, name: &str) -> Result<Normalized<String>, Error> {
        let url = self.url(&format!("{}/{id}", resource::PROBERS.path))?;
        debug!(id, name, "PATCH {url}");
        let request = self.http().patch(url).json(&ProberName { name });
        Ok(self
            .mutate(request, Gate::Session)
            .await?
            .map(|envelope| envelope.message))
    }

    /// Remove a prober.
    ///
    /// `DELETE /api/v1/prober/{id}`
    pub async fn delete_prober(&self, id: u64) -> Result<Normalized<String>, Error> {
        let url = self.url(&format!("{}/{id}", resource::PROBERS.path))?;
        debug!(id, "DELETE {url}");
        let request = self.http().delete(url);
        Ok(self
            .mutate(request, Gate::Session)
            .await?
            .map(|envelope| envelope.message))
    }
}
