//! Edge extractors: the phase that runs once per collected
//! symbol and turns its structural metadata and call sites into typed edges.
//!
//! Each sub-extractor is a free function over `(&mut Graph, &BuildState,
//! NodeId)` so the driver can fan them out per-file across the rayon pool
//! while only the `Graph`'s own mutation methods need synchronizing.

pub mod calls;
pub mod callback_args;
pub mod decorators;
pub mod implements;
pub mod inheritance;
pub mod receiver;
pub mod returns;
pub mod type_refs;

use crate::error::EdgeError;
use crate::graph::node::NodeId;
use crate::graph::{Graph, GraphWriteError};

/// Tally of what one symbol's extraction pass produced, folded into
/// [`crate::stats::BuildStats`] by the driver.
#[derive(Debug, Default)]
pub struct ExtractionOutcome {
    pub edge_errors: Vec<EdgeError>,
    pub call_edges_resolved: usize,
    pub call_edges_unresolved: usize,
    pub commonjs_import_edges_resolved: usize,
}

impl ExtractionOutcome {
    fn merge(&mut self, other: ExtractionOutcome) {
        self.edge_errors.extend(other.edge_errors);
        self.call_edges_resolved += other.call_edges_resolved;
        self.call_edges_unresolved += other.call_edges_unresolved;
        self.commonjs_import_edges_resolved += other.commonjs_import_edges_resolved;
    }
}

/// Run every structural + call extractor for one symbol.
/// `edges_created` is not tracked here; the driver derives it from the delta
/// in `Graph::edge_count()` across the whole phase.
pub fn extract_for_symbol(
    graph: &mut Graph,
    state: &crate::state::BuildState,
    node_id: NodeId,
) -> ExtractionOutcome {
    let mut outcome = ExtractionOutcome::default();

    if let Some(err) = receiver::extract_receiver_edge(graph, node_id) {
        outcome.edge_errors.push(err);
    }
    outcome
        .edge_errors
        .extend(implements::extract_implements_edges(graph, node_id));
    if let Some(err) = inheritance::extract_embeds_edge(graph, node_id) {
        outcome.edge_errors.push(err);
    }
    outcome.edge_errors.extend(returns::extract_returns_edges(graph, node_id));
    outcome
        .edge_errors
        .extend(decorators::extract_decorator_reference_edges(graph, node_id));
    outcome
        .edge_errors
        .extend(type_refs::extract_type_reference_edges(graph, node_id));

    outcome.merge(calls::extract_call_edges(graph, state, node_id));
    outcome.merge(callback_args::extract_callback_reference_edges(graph, node_id));

    outcome
}

/// Resolve `name` preferring a node defined in `from_file`, falling back to
/// the first match in the global name index. Never returns `exclude` itself
/// (guards against the obvious self-loop when a symbol shares its own name
/// with the thing it references).
pub(crate) fn resolve_name(graph: &Graph, from_file: &str, name: &str, exclude: NodeId) -> Option<NodeId> {
    resolve_name_filtered(graph, from_file, name, exclude, |_| true)
}

/// Like [`resolve_name`], but a same-file or global candidate only counts as
/// a match when `kind_ok` accepts its [`crate::input::SymbolKind`]. A
/// same-file node that shares the name but fails the predicate (e.g. a
/// CommonJS alias bound as a `Variable`) is skipped rather than returned,
/// so the caller can fall through to a resolution step that looks past the
/// same-file name collision.
pub(crate) fn resolve_name_filtered(
    graph: &Graph,
    from_file: &str,
    name: &str,
    exclude: NodeId,
    kind_ok: impl Fn(crate::input::SymbolKind) -> bool,
) -> Option<NodeId> {
    if name.is_empty() {
        return None;
    }
    let matches = |&idx: &NodeId| {
        idx != exclude
            && graph
                .node(idx)
                .is_some_and(|n| n.symbol.name == name && kind_ok(n.symbol.kind))
    };
    graph
        .nodes_in_file(from_file)
        .iter()
        .find(|idx| matches(idx))
        .copied()
        .or_else(|| graph.nodes_by_name(name).iter().find(|idx| matches(idx)).copied())
}

/// Translate a [`GraphWriteError`] from `add_edge` into the accumulated,
/// non-fatal [`EdgeError`] record.
pub(crate) fn to_edge_error(
    graph: &Graph,
    from: NodeId,
    to: NodeId,
    edge_type: crate::graph::EdgeType,
    err: GraphWriteError,
) -> EdgeError {
    use crate::error::EdgeErrorKind;
    let kind = match err {
        GraphWriteError::MissingEndpoint(_) => EdgeErrorKind::InvalidEndpoints,
        GraphWriteError::InvalidEdgeType => EdgeErrorKind::KindMismatch,
        GraphWriteError::Frozen | GraphWriteError::DuplicateId(_) => EdgeErrorKind::InvalidEndpoints,
    };
    EdgeError {
        from_id: graph.node_id_of(from).unwrap_or("?").to_string(),
        to_id: graph.node_id_of(to).unwrap_or("?").to_string(),
        edge_type: edge_type.to_string(),
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Location, Symbol, SymbolKind};
    use std::path::PathBuf;

    fn sym(id: &str, name: &str, kind: SymbolKind, file: &str) -> Symbol {
        Symbol {
            id: id.into(),
            name: name.into(),
            kind,
            language: None,
            file_path: file.into(),
            start: Location { line: 1, col: 0 },
            end: Location { line: 1, col: 0 },
            receiver: None,
            signature: None,
            package: None,
            children: Vec::new(),
            calls: Vec::new(),
            metadata: None,
        }
    }

    #[test]
    fn test_resolve_name_prefers_same_file() {
        let mut g = Graph::new(PathBuf::new());
        let a = g.add_node(sym("a:1:X", "X", SymbolKind::Function, "a")).unwrap();
        let b = g.add_node(sym("b:1:X", "X", SymbolKind::Function, "b")).unwrap();
        let caller = g.add_node(sym("a:2:caller", "caller", SymbolKind::Function, "a")).unwrap();
        let found = resolve_name(&g, "a", "X", caller);
        assert_eq!(found, Some(a));
        assert_ne!(found, Some(b));
    }

    #[test]
    fn test_resolve_name_excludes_self() {
        let mut g = Graph::new(PathBuf::new());
        let a = g.add_node(sym("a:1:X", "X", SymbolKind::Function, "a")).unwrap();
        assert_eq!(resolve_name(&g, "a", "X", a), None);
    }
}
