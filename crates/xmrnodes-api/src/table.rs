// Caller-owned pagination state and request sequencing.
//
// A table may fire several requests before the first one answers (fast
// page turns, sort clicks). Each request takes a token from the state it
// belongs to; only the newest token may write the row count back.

use crate::query::TableQuery;

/// Sequence number of a request issued against a [`PaginationState`].
///
/// Tokens are strictly increasing per state; a larger token means a newer request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn new(sequence: u64) -> Self {
        Self(sequence)
    }

    pub fn sequence(self) -> u64 {
        self.0
    }
}

/// Anything that can drive a paginated fetch: hands out the current query
/// with a fresh token, and accepts the row count reported back.
pub trait PaginationState {
    /// Issue a new request token and snapshot the query to send with it.
    fn begin_request(&mut self) -> (RequestToken, TableQuery);

    /// Record the server's total row count for the request `token`.
    ///
    /// Returns `false` (and changes nothing) when `token` has been
    /// superseded by a later `begin_request`.
    fn report_total_rows(&mut self, token: RequestToken, total_rows: u64) -> bool;
}

/// Plain, single-owner table state.
///
/// See `xmrnodes_core::PagedTable` for a shared, observable variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableState {
    query: TableQuery,
    total_rows: u64,
    latest: u64,
}

impl TableState {
    pub fn new(query: TableQuery) -> Self {
        Self {
            query,
            total_rows: 0,
            latest: 0,
        }
    }

    pub fn query(&self) -> &TableQuery {
        &self.query
    }

    pub fn query_mut(&mut self) -> &mut TableQuery {
        &mut self.query
    }

    pub fn total_rows(&self) -> u64 {
        self.total_rows
    }

    /// Number of pages for the last reported row count (at least 1).
    pub fn total_pages(&self) -> u64 {
        total_pages(self.total_rows, self.query.rows_per_page())
    }

    /// Whether `token` belongs to the most recent request.
    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }
}

impl PaginationState for TableState {
    fn begin_request(&mut self) -> (RequestToken, TableQuery) {
        self.latest += 1;
        (RequestToken(self.latest), self.query.clone())
    }

    fn report_total_rows(&mut self, token: RequestToken, total_rows: u64) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.total_rows = total_rows;
        true
    }
}

/// `ceil(total_rows / rows_per_page)`, never less than one page.
pub fn total_pages(total_rows: u64, rows_per_page: u32) -> u64 {
    total_rows.div_ceil(u64::from(rows_per_page.max(1))).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_increase_per_request() {
        let mut state = TableState::default();
        let (first, _) = state.begin_request();
        let (second, _) = state.begin_request();
        assert!(second > first);
        assert!(state.is_current(second));
        assert!(!state.is_current(first));
    }

    #[test]
    fn stale_token_cannot_overwrite_count() {
        let mut state = TableState::default();
        let (slow, _) = state.begin_request();
        let (fast, _) = state.begin_request();

        assert!(state.report_total_rows(fast, 120));
        assert!(!state.report_total_rows(slow, 3));
        assert_eq!(state.total_rows(), 120);
    }

    #[test]
    fn begin_request_snapshots_query() {
        let mut state = TableState::new(TableQuery::new(4, 20));
        let (_, snapshot) = state.begin_request();
        state.query_mut().set_page(5);
        assert_eq!(snapshot.page_number(), 4);
        assert_eq!(state.query().page_number(), 5);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(42, 0), 42);
    }
}
