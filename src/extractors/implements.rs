//! Explicit `implements` edge extractor.

use crate::error::EdgeError;
use crate::extractors::{resolve_name, to_edge_error};
use crate::graph::node::NodeId;
use crate::graph::{EdgeType, Graph};

/// For each name in `metadata.implements`, resolve an Interface node and emit
/// `Implements`. Unresolved names are skipped silently (no placeholder).
pub fn extract_implements_edges(graph: &mut Graph, node_id: NodeId) -> Vec<EdgeError> {
    let Some(node) = graph.node(node_id) else {
        return Vec::new();
    };
    let Some(meta) = &node.symbol.metadata else {
        return Vec::new();
    };
    if meta.implements.is_empty() {
        return Vec::new();
    }
    let file_path = node.symbol.file_path.clone();
    let location = node.symbol.start;
    let names = meta.implements.clone();

    let mut errors = Vec::new();
    for name in names {
        let Some(target) = resolve_name(graph, &file_path, &name, node_id) else {
            continue;
        };
        if let Err(err) = graph.add_edge(node_id, target, EdgeType::Implements, Some(location)) {
            errors.push(to_edge_error(graph, node_id, target, EdgeType::Implements, err));
        }
    }
    errors
}
