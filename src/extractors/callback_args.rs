//! Callback/function-argument reference extractor.

use crate::extractors::{resolve_name, ExtractionOutcome};
use crate::graph::node::NodeId;
use crate::graph::{EdgeType, Graph};
use crate::input::SymbolKind;

/// For each call site's `function_args`, attempt resolution against the
/// local name index; emit `References` when it resolves to a Function or
/// Method. Unresolved names are skipped without creating placeholders.
pub fn extract_callback_reference_edges(graph: &mut Graph, node_id: NodeId) -> ExtractionOutcome {
    let mut outcome = ExtractionOutcome::default();
    let Some(node) = graph.node(node_id) else {
        return outcome;
    };
    let file_path = node.symbol.file_path.clone();
    let calls = node.symbol.calls.clone();

    for call in &calls {
        for name in &call.function_args {
            let Some(target) = resolve_name(graph, &file_path, name, node_id) else {
                continue;
            };
            let is_callable = graph
                .node(target)
                .map(|n| matches!(n.symbol.kind, SymbolKind::Function | SymbolKind::Method))
                .unwrap_or(false);
            if !is_callable {
                continue;
            }
            if let Err(err) = graph.add_edge(node_id, target, EdgeType::References, Some(call.location)) {
                outcome
                    .edge_errors
                    .push(crate::extractors::to_edge_error(graph, node_id, target, EdgeType::References, err));
            }
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{CallSite, Location, Symbol};
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
    fn test_callback_arg_resolves_to_function_emits_reference() {
        let mut g = Graph::new(PathBuf::new());
        let cb = g.add_node(sym("f:1:onDone", "onDone", SymbolKind::Function, "f")).unwrap();
        let mut caller = sym("f:2:run", "run", SymbolKind::Function, "f");
        caller.calls.push(CallSite {
            target: "schedule".into(),
            is_method: false,
            receiver: String::new(),
            function_args: vec!["onDone".into()],
            location: Location { line: 2, col: 0 },
        });
        let caller_id = g.add_node(caller).unwrap();

        let outcome = extract_callback_reference_edges(&mut g, caller_id);
        assert!(outcome.edge_errors.is_empty());
        assert_eq!(g.node(cb).unwrap().incoming.len(), 1);
    }

    #[test]
    fn test_unresolved_callback_arg_creates_no_placeholder() {
        let mut g = Graph::new(PathBuf::new());
        let mut caller = sym("f:2:run", "run", SymbolKind::Function, "f");
        caller.calls.push(CallSite {
            target: "schedule".into(),
            is_method: false,
            receiver: String::new(),
            function_args: vec!["missingCallback".into()],
            location: Location { line: 2, col: 0 },
        });
        let caller_id = g.add_node(caller).unwrap();
        extract_callback_reference_edges(&mut g, caller_id);
        assert_eq!(g.node_count(), 1, "no placeholder node created for unresolved callback arg");
    }
}
