use petgraph::stable_graph::{EdgeIndex, NodeIndex};

use crate::input::Symbol;

/// Petgraph's own node handle. Re-exported under a builder-domain name so
/// call sites read `NodeId` rather than a bare petgraph type.
pub type NodeId = NodeIndex;

/// A vertex in the code graph: one [`Symbol`] plus its adjacency.
///
/// `outgoing`/`incoming` are maintained as explicit, append-only vectors
/// (rather than relying on `StableGraph::edges_directed`, whose iteration
/// order is the *reverse* of insertion order) so that within-file edge
/// insertion order is preserved exactly.
#[derive(Debug, Clone)]
pub struct Node {
    pub symbol: Symbol,
    pub outgoing: Vec<EdgeIndex>,
    pub incoming: Vec<EdgeIndex>,
    /// Child symbols already linked into the graph as their own nodes
    /// (class methods, interface members).
    pub children: Vec<NodeId>,
}

impl Node {
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            outgoing: Vec::new(),
            incoming: Vec::new(),
            children: Vec::new(),
        }
    }
}
