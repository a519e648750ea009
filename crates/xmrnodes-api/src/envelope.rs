// Response envelope and the paged-result normalizer.
//
// Every endpoint answers `{status, message, data}`. List endpoints nest the
// row count and rows inside `data` under resource-specific names; the cron
// endpoint returns the rows as a bare array. A session-gated endpoint
// answers an anonymous request with `data: null`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::table::{PaginationState, RequestToken};

/// The `{status, message, data}` wrapper.
///
/// All fields default, so a body that is JSON but not envelope-shaped still
/// decodes (to an empty envelope) instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Where a resource keeps its count and rows inside `data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    /// `data.<total>` holds the count, `data.<items>` the rows.
    Nested {
        total: &'static str,
        items: &'static str,
    },
    /// `data` itself is the row array; the count is its length.
    BareList,
}

impl Extraction {
    /// `data.total_rows` / `data.items`.
    pub const ROWS: Self = Self::Nested {
        total: "total_rows",
        items: "items",
    };

    /// `data.total` / `data.nodes`.
    pub const NODES: Self = Self::Nested {
        total: "total",
        items: "nodes",
    };

    fn extract(self, data: Value) -> PagedResult<Value> {
        match (self, data) {
            (Self::Nested { total, items }, Value::Object(mut map)) => {
                let total_rows = map.get(total).and_then(as_count).unwrap_or(0);
                let items = match map.remove(items) {
                    Some(Value::Array(rows)) => rows,
                    _ => Vec::new(),
                };
                PagedResult { total_rows, items }
            }
            (Self::BareList, Value::Array(rows)) => PagedResult {
                total_rows: u64::try_from(rows.len()).unwrap_or(u64::MAX),
                items: rows,
            },
            _ => PagedResult::default(),
        }
    }
}

// Counts come back as integers, but tolerate floats and numeric strings.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::as_conversions)]
fn as_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.trunc() as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Whether a resource requires a logged-in session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Public,
    Session,
}

/// One page of rows plus the server's total row count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResult<T> {
    pub total_rows: u64,
    pub items: Vec<T>,
}

impl<T> Default for PagedResult<T> {
    fn default() -> Self {
        Self {
            total_rows: 0,
            items: Vec::new(),
        }
    }
}

/// Outcome of a read against a possibly gated resource.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum Normalized<T> {
    Data(T),
    /// The session is missing or expired. The caller decides what to do
    /// (prompt for login, print a hint); no rows are available.
    AuthRequired,
}

impl<T> Normalized<T> {
    pub fn is_auth_required(&self) -> bool {
        matches!(self, Self::AuthRequired)
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Data(data) => Some(data),
            Self::AuthRequired => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Normalized<U> {
        match self {
            Self::Data(data) => Normalized::Data(f(data)),
            Self::AuthRequired => Normalized::AuthRequired,
        }
    }

    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<Normalized<U>, E> {
        match self {
            Self::Data(data) => f(data).map(Normalized::Data),
            Self::AuthRequired => Ok(Normalized::AuthRequired),
        }
    }
}

/// Unpack a list envelope and report its row count into `state`.
///
/// The count is written through `state` *before* the rows are returned, and
/// only when `token` is still the latest request of that state. Missing or
/// mistyped fields fall back to zero / no rows. On a session-gated resource
/// a `null` data field yields [`Normalized::AuthRequired`] and leaves the
/// state untouched.
pub fn normalize<S>(
    envelope: Envelope,
    extraction: Extraction,
    gate: Gate,
    state: &mut S,
    token: RequestToken,
) -> Normalized<PagedResult<Value>>
where
    S: PaginationState + ?Sized,
{
    if gate == Gate::Session && envelope.data.is_null() {
        return Normalized::AuthRequired;
    }

    let page = extraction.extract(envelope.data);

    if !state.report_total_rows(token, page.total_rows) {
        debug!(
            token = token.sequence(),
            total_rows = page.total_rows,
            "dropping row count from superseded request"
        );
    }

    Normalized::Data(page)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::table::TableState;

    fn envelope(body: Value) -> Envelope {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn rows_extraction_reports_count_and_returns_items() {
        let mut state = TableState::default();
        let (token, _) = state.begin_request();
        let env = envelope(json!({
            "status": "ok",
            "message": "Success",
            "data": { "total_rows": 42, "items": [{ "id": 1, "hostname": "node.example.com" }] }
        }));

        let page = normalize(env, Extraction::ROWS, Gate::Public, &mut state, token)
            .into_data()
            .unwrap();

        assert_eq!(state.total_rows(), 42);
        assert_eq!(
            page.items,
            vec![json!({ "id": 1, "hostname": "node.example.com" })]
        );
    }

    #[test]
    fn nodes_extraction_reads_total_and_nodes() {
        let mut state = TableState::default();
        let (token, _) = state.begin_request();
        let env = envelope(json!({ "data": { "total": 7, "nodes": ["a", "b"] } }));

        let page = normalize(env, Extraction::NODES, Gate::Public, &mut state, token)
            .into_data()
            .unwrap();

        assert_eq!(state.total_rows(), 7);
        assert_eq!(page.items, vec![json!("a"), json!("b")]);
    }

    #[test]
    fn null_data_on_gated_resource_requires_auth() {
        let mut state = TableState::default();
        let (token, _) = state.begin_request();
        state.report_total_rows(token, 9);
        let (token, _) = state.begin_request();

        let env = envelope(json!({ "status": "ok", "data": null }));
        let result = normalize(env, Extraction::ROWS, Gate::Session, &mut state, token);

        assert!(result.is_auth_required());
        assert_eq!(state.total_rows(), 9);
    }

    #[test]
    fn null_data_on_public_resource_is_empty() {
        let mut state = TableState::default();
        let (token, _) = state.begin_request();
        let env = envelope(json!({ "status": "ok", "data": null }));

        let page = normalize(env, Extraction::ROWS, Gate::Public, &mut state, token)
            .into_data()
            .unwrap();

        assert_eq!(page, PagedResult::default());
        assert_eq!(state.total_rows(), 0);
    }

    #[test]
    fn missing_and_mistyped_fields_default() {
        let mut state = TableState::default();
        let (token, _) = state.begin_request();
        let env = envelope(json!({ "data": { "total_rows": "oops", "items": { "not": "a list" } } }));

        let page = normalize(env, Extraction::ROWS, Gate::Public, &mut state, token)
            .into_data()
            .unwrap();

        assert_eq!(page.total_rows, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn bare_list_counts_its_length() {
        let mut state = TableState::default();
        let (token, _) = state.begin_request();
        let env = envelope(json!({ "status": "ok", "data": [{ "id": 1 }, { "id": 2 }, { "id": 3 }] }));

        let page = normalize(env, Extraction::BareList, Gate::Session, &mut state, token)
            .into_data()
            .unwrap();

        assert_eq!(state.total_rows(), 3);
        assert_eq!(page.items.len(), 3);
    }

    #[test]
    fn same_envelope_reports_same_count_into_fresh_state() {
        let body = json!({ "data": { "total_rows": 15, "items": [] } });

        let counts: Vec<u64> = (0..2)
            .map(|_| {
                let mut state = TableState::default();
                let (token, _) = state.begin_request();
                let _ = normalize(
                    envelope(body.clone()),
                    Extraction::ROWS,
                    Gate::Public,
                    &mut state,
                    token,
                );
                state.total_rows()
            })
            .collect();

        assert_eq!(counts, vec![15, 15]);
    }

    #[test]
    fn superseded_response_still_returns_rows_but_keeps_newer_count() {
        let mut state = TableState::default();
        let (old, _) = state.begin_request();
        let (new, _) = state.begin_request();

        let fresh = envelope(json!({ "data": { "total_rows": 100, "items": [1] } }));
        let stale = envelope(json!({ "data": { "total_rows": 2, "items": [2] } }));

        let _ = normalize(fresh, Extraction::ROWS, Gate::Public, &mut state, new);
        let page = normalize(stale, Extraction::ROWS, Gate::Public, &mut state, old)
            .into_data()
            .unwrap();

        assert_eq!(state.total_rows(), 100);
        assert_eq!(page.items, vec![json!(2)]);
    }

    #[test]
    fn non_envelope_json_decodes_to_defaults() {
        let env = envelope(json!({ "unexpected": true }));
        assert_eq!(env, Envelope::default());
        assert!(!env.is_ok());
    }
}
