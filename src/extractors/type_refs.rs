//! Type-argument / narrowing reference extractor, mainly exercised by
//! TypeScript generics and control-flow narrowing.

use crate::error::EdgeError;
use crate::extractors::{resolve_name, to_edge_error};
use crate::graph::node::NodeId;
use crate::graph::{EdgeType, Graph};
use crate::names::extract_type_name;

/// Emit `References` for each resolvable name drawn from
/// `metadata.type_arguments`, `metadata.type_narrowings`, and
/// `metadata.type_references`. Unresolvable names are skipped without
/// creating placeholders.
pub fn extract_type_reference_edges(graph: &mut Graph, node_id: NodeId) -> Vec<EdgeError> {
    let Some(node) = graph.node(node_id) else {
        return Vec::new();
    };
    let Some(meta) = &node.symbol.metadata else {
        return Vec::new();
    };
    let file_path = node.symbol.file_path.clone();
    let location = node.symbol.start;

    let mut names: Vec<String> = meta
        .type_arguments
        .iter()
        .chain(meta.type_narrowings.iter())
        .chain(meta.type_references.iter())
        .map(|raw| extract_type_name(raw))
        .filter(|n| !n.is_empty())
        .collect();
    names.sort();
    names.dedup();

    let mut errors = Vec::new();
    for name in names {
        let Some(target) = resolve_name(graph, &file_path, &name, node_id) else {
            continue;
        };
        if let Err(err) = graph.add_edge(node_id, target, EdgeType::References, Some(location)) {
            errors.push(to_edge_error(graph, node_id, target, EdgeType::References, err));
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Location, Symbol, SymbolKind, SymbolMetadata};
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
    fn test_type_argument_resolves_to_reference_edge() {
        let mut g = Graph::new(PathBuf::new());
        let widget = g.add_node(sym("f:1:Widget", "Widget", SymbolKind::Class, "f")).unwrap();
        let mut func = sym("f:2:make", "make", SymbolKind::Function, "f");
        func.metadata = Some(SymbolMetadata {
            type_arguments: vec!["Widget".into()],
            ..Default::default()
        });
        let id = g.add_node(func).unwrap();
        let errors = extract_type_reference_edges(&mut g, id);
        assert!(errors.is_empty());
        assert_eq!(g.node(widget).unwrap().incoming.len(), 1);
    }
}
