//! Receiver edge extractor.

use crate::error::EdgeError;
use crate::extractors::{resolve_name, to_edge_error};
use crate::graph::node::NodeId;
use crate::graph::{EdgeType, Graph};
use crate::input::SymbolKind;
use crate::names::extract_type_name;

/// If `node_id` is a Method with a non-empty receiver, resolve the bare
/// receiver type name (in-file first, then globally) and emit `Receives`.
/// Returns `Some(EdgeError)` only when a target was found but the edge was
/// rejected; an unresolved receiver is silently skipped, not an error.
pub fn extract_receiver_edge(graph: &mut Graph, node_id: NodeId) -> Option<EdgeError> {
    let node = graph.node(node_id)?;
    if node.symbol.kind != SymbolKind::Method {
        return None;
    }
    let receiver = node.symbol.receiver.as_deref()?;
    if receiver.is_empty() {
        return None;
    }
    let type_name = extract_type_name(receiver);
    if type_name.is_empty() {
        return None;
    }
    let file_path = node.symbol.file_path.clone();
    let location = node.symbol.start;

    let target = resolve_name(graph, &file_path, &type_name, node_id)?;
    match graph.add_edge(node_id, target, EdgeType::Receives, Some(location)) {
        Ok(_) => None,
        Err(err) => Some(to_edge_error(graph, node_id, target, EdgeType::Receives, err)),
    }
}
