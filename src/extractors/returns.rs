//! Return-type edge extractor.

use crate::error::EdgeError;
use crate::extractors::{resolve_name, to_edge_error};
use crate::graph::node::NodeId;
use crate::graph::{EdgeType, Graph};
use crate::input::SymbolKind;
use crate::names::extract_type_name;

/// Parse `metadata.return_type`, strip decoration, and emit one `Returns`
/// edge per remaining nominal type. Go-style multi-value returns
/// (`"(int, error)"`) are split on top-level commas; built-ins are dropped by
/// [`extract_type_name`] already.
pub fn extract_returns_edges(graph: &mut Graph, node_id: NodeId) -> Vec<EdgeError> {
    let Some(node) = graph.node(node_id) else {
        return Vec::new();
    };
    if !matches!(node.symbol.kind, SymbolKind::Function | SymbolKind::Method) {
        return Vec::new();
    }
    let Some(raw) = node.symbol.metadata.as_ref().and_then(|m| m.return_type.clone()) else {
        return Vec::new();
    };
    let file_path = node.symbol.file_path.clone();
    let location = node.symbol.start;

    let mut errors = Vec::new();
    let mut seen = std::collections::HashSet::new();
    for part in split_top_level_commas(&raw) {
        let type_name = extract_type_name(part.trim());
        if type_name.is_empty() || !seen.insert(type_name.clone()) {
            continue;
        }
        let Some(target) = resolve_name(graph, &file_path, &type_name, node_id) else {
            continue;
        };
        if let Err(err) = graph.add_edge(node_id, target, EdgeType::Returns, Some(location)) {
            errors.push(to_edge_error(graph, node_id, target, EdgeType::Returns, err));
        }
    }
    errors
}

/// Split `"(int, error)"` into `["int", "error"]`, `"Widget"` into
/// `["Widget"]`. Respects nested brackets so `"map[string]int"` is not split.
fn split_top_level_commas(s: &str) -> Vec<&str> {
    let inner = s.trim().strip_prefix('(').and_then(|r| r.strip_suffix(')')).unwrap_or(s.trim());
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;
    for (i, c) in inner.char_indices() {
        match c {
            '(' | '[' | '<' => depth += 1,
            ')' | ']' | '>' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(&inner[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&inner[start..]);
    parts
}
