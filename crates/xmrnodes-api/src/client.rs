// Monitor HTTP client
//
// Wraps `reqwest::Client` with URL construction, envelope decoding and the
// paginated-read flow. Endpoint groups (nodes, admin) live in their own
// files as inherent methods so this module stays about transport mechanics.

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::cookie::{CookieStore, Jar};
use secrecy::SecretString;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::envelope::{Envelope, Gate, Normalized, PagedResult, normalize};
use crate::error::Error;
use crate::resource::ResourceSpec;
use crate::table::PaginationState;
use crate::transport::{SESSION_COOKIE, TransportConfig};

/// HTTP client for a remote-node monitor server.
///
/// Public reads work anonymously. Session-gated reads and admin mutations
/// rely on the `xmr-nodes-ui` cookie, set by [`login`](Self::login) or
/// seeded through [`TransportConfig::with_session`].
pub struct MonitorClient {
    http: reqwest::Client,
    base_url: Url,
    cookie_jar: Option<Arc<Jar>>,
}

impl MonitorClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// A cookie jar is added when the config has none, since admin
    /// endpoints authenticate by cookie.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let http = config.build_client()?;
        Ok(Self {
            http,
            base_url,
            cookie_jar: config.cookie_jar,
        })
    }

    /// Wrap a pre-built `reqwest::Client` (caller manages cookies).
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            cookie_jar: None,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Current value of the session cookie, if the jar holds one.
    ///
    /// Lets a caller persist the session after [`login`](Self::login).
    pub fn session_token(&self) -> Option<SecretString> {
        let jar = self.cookie_jar.as_ref()?;
        let header = jar.cookies(&self.base_url)?;
        let cookies = header.to_str().ok()?;
        cookies
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .map(|(_, value)| SecretString::from(value.to_owned()))
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{base}{path}`, tolerating a trailing slash on the base.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        build_url(&self.base_url, path)
    }

    pub(crate) fn url_with_query(&self, path: &str, query: &str) -> Result<Url, Error> {
        let mut url = self.url(path)?;
        url.set_query(Some(query));
        Ok(url)
    }

    // ── Paginated reads ──────────────────────────────────────────────

    /// Fetch the current page of `spec` as described by `state`.
    ///
    /// Takes a request token from `state`, encodes its query with the
    /// resource's sort keys, and normalizes the response. The row count is
    /// written back into `state` before this returns, unless a newer request
    /// was started on the same state in the meantime.
    ///
    /// A gated resource answered with `data: null` (HTTP 200 or 401) yields
    /// [`Normalized::AuthRequired`]. Transport failures, non-JSON bodies and
    /// other error statuses are returned as `Err`.
    pub async fn load_page<T, S>(
        &self,
        spec: &ResourceSpec,
        state: &mut S,
    ) -> Result<Normalized<PagedResult<T>>, Error>
    where
        T: DeserializeOwned,
        S: PaginationState + ?Sized,
    {
        let (token, query) = state.begin_request();
        let url = self.url_with_query(spec.path, &query.encode(spec.sort_keys))?;
        debug!(resource = spec.name, token = token.sequence(), "GET {url}");

        let (status, envelope) = execute(self.http.get(url)).await?;

        let auth_signal = spec.gate == Gate::Session
            && envelope.data.is_null()
            && (status.is_success() || status == StatusCode::UNAUTHORIZED);
        if !auth_signal {
            check(status, &envelope)?;
        }

        normalize(envelope, spec.extraction, spec.gate, state, token).try_map(decode_rows)
    }

    // ── Plain reads and mutations ────────────────────────────────────

    /// GET an endpoint and decode its `data`; `null` decodes to `T::default()`.
    pub(crate) async fn get_data<T>(&self, url: Url) -> Result<T, Error>
    where
        T: DeserializeOwned + Default,
    {
        debug!("GET {url}");
        let (status, envelope) = execute(self.http.get(url)).await?;
        check(status, &envelope)?;
        decode_data(envelope.data)
    }

    /// Send a mutating request and return the envelope on success.
    ///
    /// Mutations answer with `data: null` even when they succeed, so on
    /// gated endpoints the missing session is detected by HTTP 401 instead.
    pub(crate) async fn mutate(
        &self,
        request: reqwest::RequestBuilder,
        gate: Gate,
    ) -> Result<Normalized<Envelope>, Error> {
        let (status, envelope) = execute(request).await?;
        if gate == Gate::Session && status == StatusCode::UNAUTHORIZED {
            return Ok(Normalized::AuthRequired);
        }
        check(status, &envelope)?;
        Ok(Normalized::Data(envelope))
    }
}

// ── Shared response handling ─────────────────────────────────────────

pub(crate) fn build_url(base: &Url, path: &str) -> Result<Url, Error> {
    let full = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Ok(Url::parse(&full)?)
}

/// Send a request and decode the body as an envelope.
///
/// A body that is not JSON is a `Deserialization` error on success
/// statuses and an `Api` error otherwise (proxies answer 502 with HTML).
pub(crate) async fn execute(
    request: reqwest::RequestBuilder,
) -> Result<(StatusCode, Envelope), Error> {
    let resp = request.send().await.map_err(Error::Transport)?;
    let status = resp.status();
    let body = resp.text().await.map_err(Error::Transport)?;
    trace!(status = status.as_u16(), %body, "response");

    match serde_json::from_str::<Envelope>(&body) {
        Ok(envelope) => Ok((status, envelope)),
        Err(e) if status.is_success() => Err(Error::Deserialization {
            message: e.to_string(),
            body,
        }),
        Err(_) => Err(Error::Api {
            status: status.as_u16(),
            message: status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_owned(),
        }),
    }
}

/// Reject non-2xx statuses and explicit `"error"` envelopes.
pub(crate) fn check(status: StatusCode, envelope: &Envelope) -> Result<(), Error> {
    if status.is_success() && envelope.status != "error" {
        return Ok(());
    }
    let message = if envelope.message.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_owned()
    } else {
        envelope.message.clone()
    };
    Err(Error::Api {
        status: status.as_u16(),
        message,
    })
}

pub(crate) fn decode_data<T>(data: Value) -> Result<T, Error>
where
    T: DeserializeOwned + Default,
{
    if data.is_null() {
        return Ok(T::default());
    }
    T::deserialize(&data).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: data.to_string(),
    })
}

fn decode_rows<T: DeserializeOwned>(page: PagedResult<Value>) -> Result<PagedResult<T>, Error> {
    let items = page
        .items
        .iter()
        .map(|row| {
            T::deserialize(row).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: row.to_string(),
            })
        })
        .collect::<Result<Vec<T>, Error>>()?;
    Ok(PagedResult {
        total_rows: page.total_rows,
        items,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn build_url_joins_with_single_slash() {
        let base = Url::parse("https://xmr.example.com/").unwrap();
        assert_eq!(
            build_url(&base, "/api/v1/nodes").unwrap().as_str(),
            "https://xmr.example.com/api/v1/nodes"
        );

        let prefixed = Url::parse("https://example.com/monitor").unwrap();
        assert_eq!(
            build_url(&prefixed, "/api/v1/fees").unwrap().as_str(),
            "https://example.com/monitor/api/v1/fees"
        );
    }

    #[test]
    fn error_envelope_on_success_status_is_rejected() {
        let envelope = Envelope {
            status: "error".into(),
            message: "Invalid port number".into(),
            data: Value::Null,
        };
        let err = check(StatusCode::OK, &envelope).unwrap_err();
        assert!(matches!(err, Error::Api { status: 200, ref message } if message == "Invalid port number"));
    }

    #[test]
    fn empty_message_falls_back_to_reason_phrase() {
        let err = check(StatusCode::INTERNAL_SERVER_ERROR, &Envelope::default()).unwrap_err();
        assert_eq!(err.to_string(), "API error (HTTP 500): Internal Server Error");
    }

    #[test]
    fn null_data_decodes_to_default() {
        let fees: Vec<crate::models::NetFee> = decode_data(Value::Null).unwrap();
        assert!(fees.is_empty());
    }
}
