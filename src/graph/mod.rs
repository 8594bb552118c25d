pub mod edge;
pub mod node;
pub mod query;

use std::collections::HashMap;
use std::path::PathBuf;

use petgraph::stable_graph::{EdgeIndex, StableDiGraph};

use crate::input::{Location, Symbol, SymbolKind};

pub use edge::{validate_edge_type, Edge, EdgeType};
pub use node::{Node, NodeId};

/// Why a mutation was refused. Distinct from [`crate::error::EdgeError`],
/// which is the *accumulated, non-fatal* record a caller keeps after
/// catching one of these; this is the Graph API's own return type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphWriteError {
    Frozen,
    DuplicateId(String),
    MissingEndpoint(String),
    InvalidEdgeType,
}

/// The in-memory code graph: a directed multigraph over [`Symbol`]-bearing
/// nodes and typed [`Edge`]s, with O(1) lookup indices. Mutable only before
/// [`Graph::freeze`]; read-only and freely shareable after.
pub struct Graph {
    inner: StableDiGraph<Node, Edge>,
    id_index: HashMap<String, NodeId>,
    name_index: HashMap<String, Vec<NodeId>>,
    file_index: HashMap<String, Vec<NodeId>>,
    frozen: bool,
    project_root: PathBuf,
}

impl Graph {
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            inner: StableDiGraph::new(),
            id_index: HashMap::new(),
            name_index: HashMap::new(),
            file_index: HashMap::new(),
            frozen: false,
            project_root,
        }
    }

    pub fn project_root(&self) -> &PathBuf {
        &self.project_root
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Flip to frozen. Idempotent.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Add a node for `symbol`. Fails if frozen or if `symbol.id` is already
    /// present.
    pub fn add_node(&mut self, symbol: Symbol) -> Result<NodeId, GraphWriteError> {
        if self.frozen {
            return Err(GraphWriteError::Frozen);
        }
        if self.id_index.contains_key(&symbol.id) {
            return Err(GraphWriteError::DuplicateId(symbol.id.clone()));
        }
        let id = symbol.id.clone();
        let name = symbol.name.clone();
        let file_path = symbol.file_path.clone();
        let idx = self.inner.add_node(Node::new(symbol));
        self.id_index.insert(id, idx);
        self.name_index.entry(name).or_default().push(idx);
        self.file_index.entry(file_path).or_default().push(idx);
        Ok(idx)
    }

    /// Add a directed edge. Fails if frozen, if either endpoint is missing,
    /// or if [`validate_edge_type`] rejects the endpoint kinds.
    pub fn add_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        edge_type: EdgeType,
        location: Option<Location>,
    ) -> Result<EdgeIndex, GraphWriteError> {
        if self.frozen {
            return Err(GraphWriteError::Frozen);
        }
        let from_kind = self
            .inner
            .node_weight(from)
            .ok_or_else(|| GraphWriteError::MissingEndpoint(format!("{from:?}")))?
            .symbol
            .kind;
        let to_kind = self
            .inner
            .node_weight(to)
            .ok_or_else(|| GraphWriteError::MissingEndpoint(format!("{to:?}")))?
            .symbol
            .kind;
        if !validate_edge_type(edge_type, from_kind, to_kind) {
            return Err(GraphWriteError::InvalidEdgeType);
        }
        let edge_idx = self.inner.add_edge(
            from,
            to,
            Edge {
                from,
                to,
                edge_type,
                location,
            },
        );
        self.inner[from].outgoing.push(edge_idx);
        self.inner[to].incoming.push(edge_idx);
        Ok(edge_idx)
    }

    pub fn get_node(&self, id: &str) -> Option<(NodeId, &Node)> {
        let idx = *self.id_index.get(id)?;
        self.inner.node_weight(idx).map(|n| (idx, n))
    }

    pub fn node(&self, idx: NodeId) -> Option<&Node> {
        self.inner.node_weight(idx)
    }

    /// Mutable node access for the collection phase only (linking resolved
    /// children into `Node.children` after insertion). Edge/id indices are
    /// untouched by mutating a node's `children` vec, so this is safe to
    /// expose even though the graph is otherwise append-only.
    pub fn node_mut(&mut self, idx: NodeId) -> Option<&mut Node> {
        self.inner.node_weight_mut(idx)
    }

    pub fn edge_by_index(&self, idx: EdgeIndex) -> Option<&Edge> {
        self.inner.edge_weight(idx)
    }

    pub fn node_id_of(&self, idx: NodeId) -> Option<&str> {
        self.inner.node_weight(idx).map(|n| n.symbol.id.as_str())
    }

    pub fn nodes_by_name(&self, name: &str) -> &[NodeId] {
        self.name_index.get(name).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Nodes defined in `path`, in the order they were added to the graph.
    pub fn nodes_in_file(&self, path: &str) -> &[NodeId] {
        self.file_index.get(path).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// All node indices, in insertion order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.inner.node_indices()
    }

    /// All edges, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.inner.edge_indices().filter_map(move |idx| self.inner.edge_weight(idx))
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Lookup by kind, for structural matchers and diagnostics.
    pub fn nodes_of_kind(&self, kind: SymbolKind) -> impl Iterator<Item = NodeId> + '_ {
        self.inner
            .node_indices()
            .filter(move |&idx| self.inner[idx].symbol.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{CallSite, Location, SymbolKind, SymbolMetadata};

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
    fn test_add_node_then_add_edge() {
        let mut g = Graph::new(PathBuf::new());
        let a = g
            .add_node(sym("f:1:UserService", "UserService", SymbolKind::Struct, "f"))
            .unwrap();
        let b = g
            .add_node(sym("f:2:Create", "Create", SymbolKind::Method, "f"))
            .unwrap();
        g.add_edge(b, a, EdgeType::Receives, None).unwrap();
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.node(b).unwrap().outgoing.len(), 1);
        assert_eq!(g.node(a).unwrap().incoming.len(), 1);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut g = Graph::new(PathBuf::new());
        g.add_node(sym("f:1:X", "X", SymbolKind::Function, "f")).unwrap();
        let err = g
            .add_node(sym("f:1:X", "X", SymbolKind::Function, "f"))
            .unwrap_err();
        assert_eq!(err, GraphWriteError::DuplicateId("f:1:X".into()));
    }

    #[test]
    fn test_freeze_rejects_further_writes() {
        let mut g = Graph::new(PathBuf::new());
        let a = g.add_node(sym("f:1:A", "A", SymbolKind::Function, "f")).unwrap();
        g.freeze();
        assert!(g.is_frozen());
        let err = g
            .add_node(sym("f:2:B", "B", SymbolKind::Function, "f"))
            .unwrap_err();
        assert_eq!(err, GraphWriteError::Frozen);
        let err2 = g.add_edge(a, a, EdgeType::Calls, None).unwrap_err();
        assert_eq!(err2, GraphWriteError::Frozen);
    }

    #[test]
    fn test_invalid_edge_kind_rejected() {
        let mut g = Graph::new(PathBuf::new());
        let iface = g
            .add_node(sym("f:1:I", "I", SymbolKind::Interface, "f"))
            .unwrap();
        let func = g
            .add_node(sym("f:2:foo", "foo", SymbolKind::Function, "f"))
            .unwrap();
        // Implements must go Class|Struct -> Interface; Function -> Interface is invalid.
        let err = g.add_edge(func, iface, EdgeType::Implements, None).unwrap_err();
        assert_eq!(err, GraphWriteError::InvalidEdgeType);
    }

    #[test]
    fn test_missing_endpoint_rejected() {
        let mut g = Graph::new(PathBuf::new());
        let a = g.add_node(sym("f:1:A", "A", SymbolKind::Function, "f")).unwrap();
        let ghost = NodeId::new(99);
        let err = g.add_edge(a, ghost, EdgeType::Calls, None).unwrap_err();
        assert!(matches!(err, GraphWriteError::MissingEndpoint(_)));
    }

    #[test]
    fn test_nodes_in_file_preserves_insertion_order() {
        let mut g = Graph::new(PathBuf::new());
        let a = g.add_node(sym("f:1:A", "A", SymbolKind::Function, "f")).unwrap();
        let b = g.add_node(sym("f:2:B", "B", SymbolKind::Function, "f")).unwrap();
        assert_eq!(g.nodes_in_file("f"), &[a, b]);
    }

    #[test]
    fn test_calls_metadata_round_trip() {
        // Sanity check that Symbol's optional fields compile and are usable
        // by extractors — not a Graph invariant per se.
        let mut s = sym("f:1:query", "query", SymbolKind::Method, "f");
        s.calls.push(CallSite {
            target: "filter".into(),
            is_method: true,
            receiver: "self".into(),
            function_args: vec![],
            location: Location { line: 2, col: 4 },
        });
        s.metadata = Some(SymbolMetadata::default());
        assert_eq!(s.calls.len(), 1);
    }
}
