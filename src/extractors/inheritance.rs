//! Embeds/extends edge extractor.

use crate::error::EdgeError;
use crate::extractors::{resolve_name, to_edge_error};
use crate::graph::node::NodeId;
use crate::graph::{EdgeType, Graph};

/// If `metadata.extends` is non-empty, resolve it and emit `Embeds`.
pub fn extract_embeds_edge(graph: &mut Graph, node_id: NodeId) -> Option<EdgeError> {
    let node = graph.node(node_id)?;
    let extends = node.symbol.metadata.as_ref()?.extends.clone()?;
    if extends.is_empty() {
        return None;
    }
    let file_path = node.symbol.file_path.clone();
    let location = node.symbol.start;

    let target = resolve_name(graph, &file_path, &extends, node_id)?;
    match graph.add_edge(node_id, target, EdgeType::Embeds, Some(location)) {
        Ok(_) => None,
        Err(err) => Some(to_edge_error(graph, node_id, target, EdgeType::Embeds, err)),
    }
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
    fn test_extends_emits_embeds_edge() {
        let mut g = Graph::new(PathBuf::new());
        let parent = g
            .add_node(sym("f:1:RouterGroup", "RouterGroup", SymbolKind::Struct, "f"))
            .unwrap();
        let mut child = sym("f:2:Engine", "Engine", SymbolKind::Struct, "f");
        child.metadata = Some(SymbolMetadata {
            extends: Some("RouterGroup".into()),
            ..Default::default()
        });
        let child_id = g.add_node(child).unwrap();

        assert!(extract_embeds_edge(&mut g, child_id).is_none());
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.node(parent).unwrap().incoming.len(), 1);
    }
}
