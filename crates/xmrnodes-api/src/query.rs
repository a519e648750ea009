// Table query state and its query-string encoding.
//
// Every paginated resource takes the same shape of request: page, page size,
// an optional sort and an ordered list of filters. Resources disagree only on
// what the sort keys are called, which is captured by `SortKeys`.

use std::fmt::Write;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use url::form_urlencoded::byte_serialize;

/// Rows per page used when nothing else is configured (the server's default).
pub const DEFAULT_ROWS_PER_PAGE: u32 = 10;

/// Sort direction for a table column.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// A requested sort: field name plus direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub order_by: String,
    pub direction: SortDirection,
}

/// A single `field=value` filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub filter_by: String,
    pub value: String,
}

/// How a resource names its sort parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKeys {
    /// `sort` / `dir` (datatable node listing).
    SortDir,
    /// `sort_by` / `sort_direction` (nodes, logs, probers).
    SortByDirection,
    /// `orderBy` / `orderDir` (cron jobs).
    OrderByDir,
}

impl SortKeys {
    pub fn field_key(self) -> &'static str {
        match self {
            Self::SortDir => "sort",
            Self::SortByDirection => "sort_by",
            Self::OrderByDir => "orderBy",
        }
    }

    pub fn direction_key(self) -> &'static str {
        match self {
            Self::SortDir => "dir",
            Self::SortByDirection => "sort_direction",
            Self::OrderByDir => "orderDir",
        }
    }
}

/// Pagination, sort and filter state of one table.
///
/// `page_number` and `rows_per_page` are never zero; setters clamp to 1.
/// Filters keep insertion order and may repeat a field -- which one wins is
/// up to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableQuery {
    page_number: u32,
    rows_per_page: u32,
    sort: Option<Sort>,
    filters: Vec<Filter>,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self::new(1, DEFAULT_ROWS_PER_PAGE)
    }
}

impl TableQuery {
    pub fn new(page_number: u32, rows_per_page: u32) -> Self {
        Self {
            page_number: page_number.max(1),
            rows_per_page: rows_per_page.max(1),
            sort: None,
            filters: Vec::new(),
        }
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn rows_per_page(&self) -> u32 {
        self.rows_per_page
    }

    pub fn sort(&self) -> Option<&Sort> {
        self.sort.as_ref()
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn set_page(&mut self, page_number: u32) {
        self.page_number = page_number.max(1);
    }

    /// Change the page size. Jumps back to the first page, since the old
    /// page number no longer points at the same rows.
    pub fn set_rows_per_page(&mut self, rows_per_page: u32) {
        self.rows_per_page = rows_per_page.max(1);
        self.page_number = 1;
    }

    pub fn set_sort(&mut self, order_by: impl Into<String>, direction: SortDirection) {
        self.sort = Some(Sort {
            order_by: order_by.into(),
            direction,
        });
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    pub fn add_filter(&mut self, filter_by: impl Into<String>, value: impl Into<String>) {
        self.filters.push(Filter {
            filter_by: filter_by.into(),
            value: value.into(),
        });
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    // ── Builder-style helpers ────────────────────────────────────────

    pub fn with_sort(mut self, order_by: impl Into<String>, direction: SortDirection) -> Self {
        self.set_sort(order_by, direction);
        self
    }

    pub fn with_filter(mut self, filter_by: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_filter(filter_by, value);
        self
    }

    /// Encode into a query string (no leading `?`). See [`encode`].
    pub fn encode(&self, keys: SortKeys) -> String {
        encode(self, keys)
    }
}

/// Encode a table query into `page=..&limit=..[&sort..][&filters..]`.
///
/// Sort field names, filter keys and filter values are form-urlencoded, so
/// a value such as `a&b=c` cannot inject extra parameters.
pub fn encode(query: &TableQuery, keys: SortKeys) -> String {
    let mut params = format!("page={}&limit={}", query.page_number, query.rows_per_page);

    if let Some(sort) = &query.sort {
        let _ = write!(
            params,
            "&{}={}&{}={}",
            keys.field_key(),
            escape(&sort.order_by),
            keys.direction_key(),
            sort.direction
        );
    }

    for filter in &query.filters {
        let _ = write!(
            params,
            "&{}={}",
            escape(&filter.filter_by),
            escape(&filter.value)
        );
    }

    params
}

fn escape(raw: &str) -> String {
    byte_serialize(raw.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn bare_query_has_page_and_limit_only() {
        let q = TableQuery::new(3, 25);
        assert_eq!(q.encode(SortKeys::SortByDirection), "page=3&limit=25");
    }

    #[test]
    fn page_and_limit_appear_exactly_once() {
        let q = TableQuery::new(2, 50)
            .with_sort("uptime", SortDirection::Asc)
            .with_filter("page", "9")
            .with_filter("nettype", "mainnet");
        let encoded = q.encode(SortKeys::SortByDirection);

        let pairs: Vec<&str> = encoded.split('&').collect();
        // A filter literally named "page" is still emitted, but after the
        // canonical pair, which is always first.
        assert_eq!(pairs[0], "page=2");
        assert_eq!(pairs[1], "limit=50");
        assert_eq!(pairs.iter().filter(|p| p.starts_with("limit=")).count(), 1);
    }

    #[test]
    fn sort_keys_follow_resource_convention() {
        let q = TableQuery::new(1, 10).with_sort("last_checked", SortDirection::Desc);

        assert_eq!(
            q.encode(SortKeys::SortByDirection),
            "page=1&limit=10&sort_by=last_checked&sort_direction=desc"
        );
        assert_eq!(
            q.encode(SortKeys::SortDir),
            "page=1&limit=10&sort=last_checked&dir=desc"
        );
        assert_eq!(
            q.encode(SortKeys::OrderByDir),
            "page=1&limit=10&orderBy=last_checked&orderDir=desc"
        );
    }

    #[test]
    fn filters_keep_input_order_and_repeats() {
        let q = TableQuery::new(1, 10)
            .with_filter("protocol", "https")
            .with_filter("cc", "DE")
            .with_filter("protocol", "http");

        assert_eq!(
            q.encode(SortKeys::SortByDirection),
            "page=1&limit=10&protocol=https&cc=DE&protocol=http"
        );
    }

    #[test]
    fn reserved_characters_are_escaped() {
        let q = TableQuery::new(1, 10)
            .with_sort("a&b", SortDirection::Asc)
            .with_filter("host", "node=1&x y");

        assert_eq!(
            q.encode(SortKeys::SortByDirection),
            "page=1&limit=10&sort_by=a%26b&sort_direction=asc&host=node%3D1%26x+y"
        );
    }

    #[test]
    fn zero_page_and_rows_clamp_to_one() {
        let mut q = TableQuery::new(0, 0);
        assert_eq!(q.page_number(), 1);
        assert_eq!(q.rows_per_page(), 1);

        q.set_page(0);
        assert_eq!(q.page_number(), 1);
    }

    #[test]
    fn changing_page_size_resets_page() {
        let mut q = TableQuery::new(7, 10);
        q.set_rows_per_page(100);
        assert_eq!(q.page_number(), 1);
        assert_eq!(q.rows_per_page(), 100);
    }

    #[test]
    fn sort_direction_parses_case_insensitively() {
        assert_eq!("ASC".parse::<SortDirection>().ok(), Some(SortDirection::Asc));
        assert_eq!(SortDirection::Desc.to_string(), "desc");
    }
}
