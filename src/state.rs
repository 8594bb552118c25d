//! Transient indices used only during construction.
//! Discarded once [`crate::builder::BuilderDriver::build`] returns; none of
//! it survives into the frozen [`crate::graph::Graph`].

use std::collections::HashMap;

use dashmap::DashMap;

use crate::graph::node::NodeId;
use crate::import_map::ImportNameMap;
use crate::input::Import;

/// Construction-time bookkeeping. `Graph`'s own `name_index`/`file_index`
/// already serve the "name -> symbols" / "file -> symbols" lookups
/// (they persist past freeze, which these do not), so `BuildState` carries
/// only what the extractor/matcher phases need and the frozen graph does
/// not: per-file imports, the class hierarchy implied by `children`, each
/// file's import-name map, and the cross-thread placeholder dedup table.
pub struct BuildState {
    /// Raw imports per file, for the import edge + import-aware call
    /// resolution passes.
    pub file_imports: HashMap<String, Vec<Import>>,
    /// symbol id -> enclosing class/interface node id, derived from the
    /// `children` nesting of the source `Symbol`s.
    pub enclosing_class: HashMap<String, NodeId>,
    /// class/interface node id -> its `extends` target name, cached off
    /// `Symbol.metadata.extends` for the inheritance-climb resolution step.
    pub class_extends: HashMap<NodeId, String>,
    /// file path -> that file's import-name map.
    pub import_maps: HashMap<String, ImportNameMap>,
    /// `(package, name) -> placeholder node id`, concurrent-safe so workers
    /// racing to create the same external placeholder during the
    /// edge-extraction phase agree on one winner.
    pub placeholders: DashMap<(String, String), NodeId>,
}

impl BuildState {
    pub fn new() -> Self {
        Self {
            file_imports: HashMap::new(),
            enclosing_class: HashMap::new(),
            class_extends: HashMap::new(),
            import_maps: HashMap::new(),
            placeholders: DashMap::new(),
        }
    }
}

impl Default for BuildState {
    fn default() -> Self {
        Self::new()
    }
}
