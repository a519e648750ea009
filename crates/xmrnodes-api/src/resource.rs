// Per-resource request/response conventions.
//
// Paginated resources differ only in path, sort-key names, where the count
// and rows sit in `data`, and whether a session is required. Each one is a
// `ResourceSpec` constant; adding a resource means adding a constant here.

use crate::envelope::{Extraction, Gate};
use crate::query::SortKeys;

/// Declarative description of one paginated resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceSpec {
    /// Short name used in logs and diagnostics.
    pub name: &'static str,
    /// Absolute path below the server root.
    pub path: &'static str,
    pub sort_keys: SortKeys,
    pub extraction: Extraction,
    pub gate: Gate,
}

/// `GET /api/v1/nodes`
pub const NODES: ResourceSpec = ResourceSpec {
    name: "nodes",
    path: "/api/v1/nodes",
    sort_keys: SortKeys::SortByDirection,
    extraction: Extraction::ROWS,
    gate: Gate::Public,
};

/// `GET /monero/remote-node-dt` -- older datatable listing of the same nodes.
pub const NODES_DATATABLE: ResourceSpec = ResourceSpec {
    name: "nodes (datatable)",
    path: "/monero/remote-node-dt",
    sort_keys: SortKeys::SortDir,
    extraction: Extraction::NODES,
    gate: Gate::Public,
};

/// `GET /api/v1/nodes/logs`
pub const PROBE_LOGS: ResourceSpec = ResourceSpec {
    name: "probe logs",
    path: "/api/v1/nodes/logs",
    sort_keys: SortKeys::SortByDirection,
    extraction: Extraction::ROWS,
    gate: Gate::Public,
};

/// `GET /api/v1/crons`
pub const CRONS: ResourceSpec = ResourceSpec {
    name: "crons",
    path: "/api/v1/crons",
    sort_keys: SortKeys::SortByDirection,
    extraction: Extraction::ROWS,
    gate: Gate::Session,
};

/// `GET /api/v1/prober`
pub const PROBERS: ResourceSpec = ResourceSpec {
    name: "probers",
    path: "/api/v1/prober",
    sort_keys: SortKeys::SortByDirection,
    extraction: Extraction::ROWS,
    gate: Gate::Session,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gated_resources_are_admin_only() {
        for spec in [NODES, NODES_DATATABLE, PROBE_LOGS] {
            assert_eq!(spec.gate, Gate::Public, "{}", spec.name);
        }
        for spec in [CRONS, PROBERS] {
            assert_eq!(spec.gate, Gate::Session, "{}", spec.name);
        }
    }

    #[test]
    fn crons_use_the_common_list_conventions() {
        assert_eq!(CRONS.sort_keys, SortKeys::SortByDirection);
        assert_eq!(CRONS.extraction, Extraction::ROWS);
    }

    #[test]
    fn both_nested_conventions_are_in_use() {
        assert_eq!(NODES.extraction, Extraction::ROWS);
        assert_eq!(NODES_DATATABLE.extraction, Extraction::NODES);
        assert_eq!(NODES_DATATABLE.sort_keys, SortKeys::SortDir);
    }
}
