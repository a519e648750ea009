// Prober job client
//
// A prober machine pulls a node to check from `GET /api/v1/job` and posts
// the outcome back to `POST /api/v1/job`. Both calls authenticate with the
// prober's API key in the `X-Prober-Api-Key` header.

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use url::Url;

use crate::client::{build_url, check, decode_data, execute};
use crate::envelope::Envelope;
use crate::error::Error;
use crate::models::{JobFilter, ProbeReport, RemoteNode};
use crate::transport::TransportConfig;

/// Header carrying the prober API key.
pub const PROBER_KEY_HEADER: &str = "X-Prober-Api-Key";

const JOB_PATH: &str = "/api/v1/job";

/// Client for the prober job endpoints.
pub struct ProberClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ProberClient {
    /// Build from an API key; the key is sent as a default header.
    pub fn from_api_key(
        base_url: Url,
        api_key: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut key_value =
            HeaderValue::from_str(api_key.expose_secret()).map_err(|e| {
                Error::ProberKeyRejected {
                    message: format!("invalid API key header value: {e}"),
                }
            })?;
        key_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(PROBER_KEY_HEADER, key_value);

        let http = transport.build_client_with_headers(headers)?;
        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages the key header).
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Ask for the next node to probe. `None` when the server hands out
    /// nothing.
    ///
    /// `GET /api/v1/job?accept_tor=..&accept_i2p=..&accept_ipv6=..`
    pub async fn request_job(&self, filter: JobFilter) -> Result<Option<RemoteNode>, Error> {
        let mut url = build_url(&self.base_url, JOB_PATH)?;
        url.query_pairs_mut().extend_pairs(filter.query_pairs());
        debug!("GET {url}");

        let (status, envelope) = execute(self.http.get(url)).await?;
        reject_key(status, &envelope)?;
        check(status, &envelope)?;

        let node: Option<RemoteNode> = decode_data(envelope.data)?;
        Ok(node.filter(|n| n.id != 0))
    }

    /// Report the outcome of a probe. Returns the server's message.
    ///
    /// `POST /api/v1/job`
    pub async fn submit_report(&self, report: &ProbeReport) -> Result<String, Error> {
        let url = build_url(&self.base_url, JOB_PATH)?;
        debug!(node_id = report.node_info.id, "POST {url}");

        let (status, envelope) = execute(self.http.post(url).json(report)).await?;
        reject_key(status, &envelope)?;
        check(status, &envelope)?;
        Ok(envelope.message)
    }
}

fn reject_key(status: StatusCode, envelope: &Envelope) -> Result<(), Error> {
    if status == StatusCode::UNAUTHORIZED {
        return Err(Error::ProberKeyRejected {
            message: envelope.message.clone(),
        });
    }
    Ok(())
}
