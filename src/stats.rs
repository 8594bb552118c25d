//! Build statistics and the top-level [`BuildResult`].

use crate::error::{EdgeError, FileError};
use crate::graph::Graph;

#[derive(Debug, Default, Clone, Copy)]
pub struct BuildStats {
    pub files_processed: usize,
    pub files_failed: usize,
    pub nodes_created: usize,
    pub placeholder_nodes: usize,
    pub edges_created: usize,
    pub call_edges_resolved: usize,
    pub call_edges_unresolved: usize,
    pub go_interface_edges: usize,
    pub commonjs_import_edges_resolved: usize,
    pub duration_ms: u64,
}

/// What `BuilderDriver::build` returns. The graph is always frozen by the
/// time a caller sees it, whether or not the build ran to completion.
pub struct BuildResult {
    pub graph: Graph,
    pub stats: BuildStats,
    pub file_errors: Vec<FileError>,
    pub edge_errors: Vec<EdgeError>,
    /// `true` iff cancellation or the memory limit was observed.
    pub incomplete: bool,
}
