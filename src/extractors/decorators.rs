//! Decorator-argument reference extractor.

use crate::error::EdgeError;
use crate::extractors::{resolve_name, to_edge_error};
use crate::graph::node::NodeId;
use crate::graph::{EdgeType, Graph};
use crate::names::is_pascal_case;

/// For each `(decorator_name -> args)` entry, emit `References` to every
/// PascalCase argument that resolves to a node. Lowercase identifiers and
/// other non-PascalCase strings are skipped, and unresolved PascalCase names
/// do **not** create placeholders.
pub fn extract_decorator_reference_edges(graph: &mut Graph, node_id: NodeId) -> Vec<EdgeError> {
    let Some(node) = graph.node(node_id) else {
        return Vec::new();
    };
    let Some(meta) = &node.symbol.metadata else {
        return Vec::new();
    };
    if meta.decorator_args.is_empty() {
        return Vec::new();
    }
    let file_path = node.symbol.file_path.clone();
    let location = node.symbol.start;
    let mut candidates: Vec<String> = meta
        .decorator_args
        .values()
        .flatten()
        .filter(|arg| is_pascal_case(arg))
        .cloned()
        .collect();
    candidates.sort();
    candidates.dedup();

    let mut errors = Vec::new();
    for name in candidates {
        let Some(target) = resolve_name(graph, &file_path, &name, node_id) else {
            continue;
        };
        if let Err(err) = graph.add_edge(node_id, target, EdgeType::References, Some(location)) {
            errors.push(to_edge_error(graph, node_id, target, EdgeType::References, err));
        }
    }
    errors
}
