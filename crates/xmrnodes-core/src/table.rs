// ── Observable table state ──
//
// `TableState` from the API crate wrapped in a `watch` channel, so several
// tasks can issue requests against the same table and observers see the
// row count change. Request tokens keep a slow, superseded response from
// overwriting the count reported by a newer one.

use tokio::sync::watch;
use xmrnodes_api::{PaginationState, RequestToken, SortDirection, TableQuery, TableState};

use crate::pagination::PageWindow;

/// Shared pagination state for one listing.
///
/// All methods take `&self`; `&PagedTable` implements [`PaginationState`],
/// so overlapping requests may each hold a reference.
#[derive(Debug)]
pub struct PagedTable {
    state: watch::Sender<TableState>,
}

impl Default for PagedTable {
    fn default() -> Self {
        Self::new(TableQuery::default())
    }
}

impl PagedTable {
    pub fn new(query: TableQuery) -> Self {
        let (state, _) = watch::channel(TableState::new(query));
        Self { state }
    }

    /// Snapshot of the current query.
    pub fn query(&self) -> TableQuery {
        self.state.borrow().query().clone()
    }

    pub fn total_rows(&self) -> u64 {
        self.state.borrow().total_rows()
    }

    pub fn total_pages(&self) -> u64 {
        self.state.borrow().total_pages()
    }

    /// Page buttons for the current page and last reported count.
    pub fn page_window(&self) -> PageWindow {
        let state = self.state.borrow();
        PageWindow::new(
            u64::from(state.query().page_number()),
            state.total_pages(),
        )
    }

    /// Receive a notification whenever the query or row count changes.
    pub fn subscribe(&self) -> watch::Receiver<TableState> {
        self.state.subscribe()
    }

    // ── Query edits ──────────────────────────────────────────────────

    /// Apply an arbitrary edit to the query and notify observers.
    pub fn update(&self, edit: impl FnOnce(&mut TableQuery)) {
        self.state.send_modify(|state| edit(state.query_mut()));
    }

    pub fn set_page(&self, page_number: u32) {
        self.update(|q| q.set_page(page_number));
    }

    pub fn set_rows_per_page(&self, rows_per_page: u32) {
        self.update(|q| q.set_rows_per_page(rows_per_page));
    }

    /// Sort by `order_by`. Changing the sort returns to the first page.
    pub fn set_sort(&self, order_by: &str, direction: SortDirection) {
        self.update(|q| {
            q.set_sort(order_by, direction);
            q.set_page(1);
        });
    }

    /// Add a filter. Filtering returns to the first page.
    pub fn add_filter(&self, filter_by: &str, value: &str) {
        self.update(|q| {
            q.add_filter(filter_by, value);
            q.set_page(1);
        });
    }

    pub fn clear_filters(&self) {
        self.update(|q| {
            q.clear_filters();
            q.set_page(1);
        });
    }
}

impl PaginationState for &PagedTable {
    fn begin_request(&mut self) -> (RequestToken, TableQuery) {
        let mut issued = None;
        // A new token is bookkeeping only; observers are not woken for it.
        self.state.send_if_modified(|state| {
            issued = Some(state.begin_request());
            false
        });
        issued.unwrap_or_else(|| (RequestToken::new(0), self.query()))
    }

    fn report_total_rows(&mut self, token: RequestToken, total_rows: u64) -> bool {
        self.state
            .send_if_modified(|state| state.report_total_rows(token, total_rows))
    }
}

impl PaginationState for PagedTable {
    fn begin_request(&mut self) -> (RequestToken, TableQuery) {
        <&PagedTable as PaginationState>::begin_request(&mut &*self)
    }

    fn report_total_rows(&mut self, token: RequestToken, total_rows: u64) -> bool {
        <&PagedTable as PaginationState>::report_total_rows(&mut &*self, token, total_rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_token_wins() {
        let table = PagedTable::default();
        let mut first = &table;
        let mut second = &table;

        let (old, _) = first.begin_request();
        let (new, _) = second.begin_request();

        assert!(second.report_total_rows(new, 30));
        assert!(!first.report_total_rows(old, 1));
        assert_eq!(table.total_rows(), 30);
        assert_eq!(table.total_pages(), 3);
    }

    #[test]
    fn observers_see_count_updates() {
        let table = PagedTable::default();
        let mut rx = table.subscribe();

        let mut handle = &table;
        let (token, _) = handle.begin_request();
        assert!(!rx.has_changed().unwrap_or(true));

        handle.report_total_rows(token, 12);
        assert!(rx.has_changed().unwrap_or(false));
        assert_eq!(rx.borrow_and_update().total_rows(), 12);
    }

    #[test]
    fn sort_and_filter_reset_page() {
        let table = PagedTable::new(TableQuery::new(4, 10));
        table.set_sort("uptime", SortDirection::Asc);
        assert_eq!(table.query().page_number(), 1);

        table.set_page(3);
        table.add_filter("cc", "DE");
        assert_eq!(table.query().page_number(), 1);
        assert_eq!(table.query().filters().len(), 1);
    }

    #[test]
    fn page_window_follows_state() {
        let table = PagedTable::new(TableQuery::new(6, 10));
        let mut handle = &table;
        let (token, _) = handle.begin_request();
        handle.report_total_rows(token, 100);

        assert_eq!(table.page_window().to_string(), "1 … 4 5 [6] 7 8 … 10");
    }
}
