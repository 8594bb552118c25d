//! Read-side graph queries. All queries here are safe to
//! call concurrently from multiple readers once the graph is frozen.

use std::collections::HashSet;

use crate::input::Location;

use super::edge::EdgeType;
use super::node::NodeId;
use super::Graph;

/// One location a symbol was referenced/called from, as returned by
/// [`find_references_by_id`].
#[derive(Debug, Clone, Copy)]
pub struct ReferenceHit {
    pub caller: NodeId,
    pub edge_type: EdgeType,
    pub location: Option<Location>,
}

/// Callers of `id`, direct plus inherited through each entry of
/// `parent_ids` (e.g. the `extends` chain of an overriding method's owner).
#[derive(Debug, Clone)]
pub struct InheritedCallers {
    pub direct: Vec<NodeId>,
    /// One entry per parent in `parent_ids`, in the order given.
    pub inherited: Vec<(NodeId, Vec<NodeId>)>,
}

/// Symbols with an outgoing `Calls` edge targeting `id`.
pub fn find_callers_by_id(graph: &Graph, id: NodeId) -> Vec<NodeId> {
    callers_of_kind(graph, id, EdgeType::Calls)
}

fn callers_of_kind(graph: &Graph, id: NodeId, edge_type: EdgeType) -> Vec<NodeId> {
    let Some(node) = graph.node(id) else {
        return Vec::new();
    };
    node.incoming
        .iter()
        .filter_map(|&edge_idx| edge_by_index(graph, edge_idx))
        .filter(|e| e.edge_type == edge_type)
        .map(|e| e.from)
        .collect()
}

/// Direct callers of `id`, plus — for each id in `parent_ids` — the callers
/// of that parent, deduplicated by symbol id across all levels (a caller
/// that calls both the override and the inherited base method is reported
/// once, at the level closest to `id`).
pub fn find_callers_with_inheritance(
    graph: &Graph,
    id: NodeId,
    parent_ids: &[NodeId],
) -> InheritedCallers {
    let mut seen: HashSet<NodeId> = HashSet::new();
    let direct: Vec<NodeId> = callers_of_kind(graph, id, EdgeType::Calls)
        .into_iter()
        .filter(|n| seen.insert(*n))
        .collect();

    let mut inherited = Vec::new();
    for &parent in parent_ids {
        let callers: Vec<NodeId> = callers_of_kind(graph, parent, EdgeType::Calls)
            .into_iter()
            .filter(|n| seen.insert(*n))
            .collect();
        inherited.push((parent, callers));
    }

    InheritedCallers { direct, inherited }
}

/// Two-pass reference lookup: all `References`-typed incoming
/// edges first, then `Calls`, then everything else, insertion order within
/// each bucket. `limit` truncates the combined result if `Some`.
pub fn find_references_by_id(graph: &Graph, id: NodeId, limit: Option<usize>) -> Vec<ReferenceHit> {
    let Some(node) = graph.node(id) else {
        return Vec::new();
    };

    let mut references = Vec::new();
    let mut calls = Vec::new();
    let mut others = Vec::new();

    for &edge_idx in &node.incoming {
        let Some(edge) = edge_by_index(graph, edge_idx) else {
            continue;
        };
        let hit = ReferenceHit {
            caller: edge.from,
            edge_type: edge.edge_type,
            location: edge.location,
        };
        match edge.edge_type {
            EdgeType::References => references.push(hit),
            EdgeType::Calls => calls.push(hit),
            _ => others.push(hit),
        }
    }

    references.extend(calls);
    references.extend(others);

    if let Some(limit) = limit {
        references.truncate(limit);
    }
    references
}

fn edge_by_index(graph: &Graph, idx: petgraph::stable_graph::EdgeIndex) -> Option<super::Edge> {
    graph.edge_by_index(idx).cloned()
}
