//! Collector: the single-threaded phase that turns a batch of
//! [`ParseResult`]s into graph nodes, deduplicated `external` placeholders,
//! and the [`BuildState`] indices the later phases read.

use crate::error::{FileError, FileErrorKind};
use crate::graph::node::NodeId;
use crate::graph::Graph;
use crate::import_map::build_import_map;
use crate::input::{ParseResult, Symbol, SymbolKind};
use crate::state::BuildState;

#[derive(Debug, Default, Clone, Copy)]
pub struct CollectStats {
    pub files_processed: usize,
    pub files_failed: usize,
    pub nodes_created: usize,
    pub placeholder_nodes: usize,
}

/// Everything the edge-extraction phase needs out of collection: per-file
/// lists of the node ids collected from that file (the unit of parallel
/// work), plus statistics and file errors.
pub struct CollectOutput {
    pub stats: CollectStats,
    pub file_errors: Vec<FileError>,
    /// `(file_path, node_ids)` in input order. `node_ids` includes nested
    /// children, which are also registered as their own top-level nodes
    /// addressable by id.
    pub files: Vec<(String, Vec<NodeId>)>,
}

pub struct Collector<'a> {
    graph: &'a mut Graph,
    state: &'a mut BuildState,
    project_root_empty: bool,
}

impl<'a> Collector<'a> {
    pub fn new(graph: &'a mut Graph, state: &'a mut BuildState, project_root_empty: bool) -> Self {
        Self {
            graph,
            state,
            project_root_empty,
        }
    }

    /// Run collection over `parse_results` in input order.
    /// `None` entries represent a nil `ParseResult` and are rejected as a
    /// `FileError` without aborting the rest of the batch.
    pub fn collect(&mut self, parse_results: Vec<Option<ParseResult>>) -> CollectOutput {
        let mut stats = CollectStats::default();
        let mut file_errors = Vec::new();
        let mut files = Vec::new();

        for maybe_result in parse_results {
            let Some(result) = maybe_result else {
                stats.files_failed += 1;
                file_errors.push(FileError::new("<nil>", FileErrorKind::NilParseResult));
                continue;
            };

            if let Err(reason) = self.validate_path(&result.file_path) {
                stats.files_failed += 1;
                file_errors.push(FileError::new(
                    result.file_path.clone(),
                    FileErrorKind::PathTraversal(reason),
                ));
                continue;
            }

            let node_ids = self.collect_file(&result, &mut stats);
            self.index_file_state(&result);
            files.push((result.file_path.clone(), node_ids));
            stats.files_processed += 1;
        }

        CollectOutput {
            stats,
            file_errors,
            files,
        }
    }

    /// Reject any path with a `..` segment, or an absolute path, once a
    /// non-empty project root is configured. With an
    /// empty project root, validation is relaxed.
    fn validate_path(&self, file_path: &str) -> Result<(), String> {
        if self.project_root_empty {
            return Ok(());
        }
        if file_path.starts_with('/') {
            return Err(format!("absolute path outside project root: {file_path}"));
        }
        if file_path.split('/').any(|segment| segment == "..") {
            return Err(format!("path contains '..' segment: {file_path}"));
        }
        Ok(())
    }

    fn collect_file(&mut self, result: &ParseResult, stats: &mut CollectStats) -> Vec<NodeId> {
        let mut node_ids = Vec::new();
        let mut package_node: Option<NodeId> = None;
        let mut first_node: Option<NodeId> = None;

        for maybe_symbol in &result.symbols {
            let Some(symbol) = maybe_symbol else {
                continue; // nil symbol, silently skipped
            };
            if let Some(idx) = self.add_symbol_recursive(symbol, None, stats) {
                node_ids.push(idx);
                if first_node.is_none() {
                    first_node = Some(idx);
                }
                if symbol.kind == SymbolKind::Package {
                    package_node = Some(idx);
                }
                self.collect_children_ids(symbol, &mut node_ids);
            }
        }

        let anchor = package_node.or(first_node);
        for import in &result.imports {
            self.collect_import(import, anchor, stats);
        }

        node_ids
    }

    /// Add `symbol` and, recursively, every non-nil child. Returns the
    /// top-level node id. Children are linked via `Node.children` and also
    /// pushed into the caller's flat `node_ids` list by
    /// [`Self::collect_children_ids`].
    fn add_symbol_recursive(
        &mut self,
        symbol: &Symbol,
        enclosing_class: Option<NodeId>,
        stats: &mut CollectStats,
    ) -> Option<NodeId> {
        let mut owned = symbol.clone();
        owned.children = Vec::new(); // children are linked via Node.children, not re-embedded
        let idx = match self.graph.add_node(owned) {
            Ok(idx) => idx,
            Err(_) => return None, // duplicate id or frozen: defensively skip rather than panic
        };
        stats.nodes_created += 1;

        if let Some(class_idx) = enclosing_class {
            self.state.enclosing_class.insert(symbol.id.clone(), class_idx);
        }
        if matches!(symbol.kind, SymbolKind::Class | SymbolKind::Interface | SymbolKind::Struct) {
            if let Some(meta) = &symbol.metadata {
                if let Some(extends) = &meta.extends {
                    self.state.class_extends.insert(idx, extends.clone());
                }
            }
        }

        let is_container = matches!(
            symbol.kind,
            SymbolKind::Class | SymbolKind::Interface | SymbolKind::Struct
        );
        for maybe_child in &symbol.children {
            let Some(child) = maybe_child else { continue };
            if let Some(child_idx) =
                self.add_symbol_recursive(child, if is_container { Some(idx) } else { enclosing_class }, stats)
            {
                if let Some(node) = self.graph.node_mut(idx) {
                    node.children.push(child_idx);
                }
            }
        }

        Some(idx)
    }

    fn collect_children_ids(&self, symbol: &Symbol, out: &mut Vec<NodeId>) {
        for maybe_child in &symbol.children {
            let Some(child) = maybe_child else { continue };
            if let Some((idx, _)) = self.graph.get_node(&child.id) {
                out.push(idx);
            }
            self.collect_children_ids(child, out);
        }
    }

    fn collect_import(&mut self, import: &crate::input::Import, anchor: Option<NodeId>, stats: &mut CollectStats) {
        let local_names: Vec<String> = if !import.names.is_empty() {
            import
                .names
                .iter()
                .map(|n| crate::names::parse_aliased_name(n).0)
                .collect()
        } else if let Some(alias) = &import.alias {
            vec![alias.clone()]
        } else {
            vec![import.path.rsplit('/').next().unwrap_or(&import.path).to_string()]
        };

        for local_name in local_names {
            let placeholder_idx = self.get_or_create_placeholder(&import.path, &local_name, stats);
            if let Some(from) = anchor {
                let _ = self.graph.add_edge(
                    from,
                    placeholder_idx,
                    crate::graph::EdgeType::Imports,
                    Some(import.location),
                );
            }
        }
    }

    /// At most one placeholder per `(package, name)` pair.
    fn get_or_create_placeholder(&mut self, package: &str, name: &str, stats: &mut CollectStats) -> NodeId {
        let key = (package.to_string(), name.to_string());
        if let Some(existing) = self.state.placeholders.get(&key) {
            return *existing;
        }
        let id = format!("external:{package}:{name}");
        if let Some((idx, _)) = self.graph.get_node(&id) {
            self.state.placeholders.insert(key, idx);
            return idx;
        }
        let symbol = Symbol {
            id: id.clone(),
            name: name.to_string(),
            kind: SymbolKind::External,
            language: None,
            file_path: String::new(),
            start: crate::input::Location { line: 0, col: 0 },
            end: crate::input::Location { line: 0, col: 0 },
            receiver: None,
            signature: None,
            package: Some(package.to_string()),
            children: Vec::new(),
            calls: Vec::new(),
            metadata: None,
        };
        let idx = self
            .graph
            .add_node(symbol)
            .expect("external placeholder ids are unique by construction");
        stats.nodes_created += 1;
        stats.placeholder_nodes += 1;
        self.state.placeholders.insert(key, idx);
        idx
    }

    fn index_file_state(&mut self, result: &ParseResult) {
        self.state
            .file_imports
            .insert(result.file_path.clone(), result.imports.clone());
        self.state
            .import_maps
            .insert(result.file_path.clone(), build_import_map(&result.imports));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Import, Language, Location, SymbolMetadata};
    use std::path::PathBuf;

    fn loc() -> Location {
        Location { line: 1, col: 0 }
    }

    fn func_symbol(id: &str, name: &str, file: &str) -> Symbol {
        Symbol {
            id: id.into(),
            name: name.into(),
            kind: SymbolKind::Function,
            language: Some(Language::Go),
            file_path: file.into(),
            start: loc(),
            end: loc(),
            receiver: None,
            signature: None,
            package: None,
            children: Vec::new(),
            calls: Vec::new(),
            metadata: Some(SymbolMetadata::default()),
        }
    }

    #[test]
    fn test_nil_parse_result_is_file_error() {
        let mut graph = Graph::new(PathBuf::new());
        let mut state = BuildState::new();
        let mut collector = Collector::new(&mut graph, &mut state, true);
        let out = collector.collect(vec![None]);
        assert_eq!(out.stats.files_failed, 1);
        assert_eq!(out.file_errors.len(), 1);
        assert_eq!(out.file_errors[0].kind, FileErrorKind::NilParseResult);
    }

    #[test]
    fn test_path_traversal_rejected() {
        let mut graph = Graph::new(PathBuf::from("/proj"));
        let mut state = BuildState::new();
        let mut collector = Collector::new(&mut graph, &mut state, false);
        let result = ParseResult {
            file_path: "../etc/passwd".into(),
            language: Language::Go,
            package: None,
            symbols: vec![Some(func_symbol("../etc/passwd:1:main", "main", "../etc/passwd"))],
            imports: vec![],
        };
        let out = collector.collect(vec![Some(result)]);
        assert_eq!(out.stats.files_failed, 1);
        assert_eq!(out.file_errors.len(), 1);
        assert!(matches!(out.file_errors[0].kind, FileErrorKind::PathTraversal(_)));
        assert_eq!(graph.node_count(), 0);
    }

    #[test]
    fn test_nil_symbol_silently_skipped() {
        let mut graph = Graph::new(PathBuf::new());
        let mut state = BuildState::new();
        let mut collector = Collector::new(&mut graph, &mut state, true);
        let result = ParseResult {
            file_path: "f.go".into(),
            language: Language::Go,
            package: None,
            symbols: vec![None, Some(func_symbol("f.go:1:main", "main", "f.go"))],
            imports: vec![],
        };
        let out = collector.collect(vec![Some(result)]);
        assert_eq!(out.file_errors.len(), 0, "a nil symbol is not a FileError");
        assert_eq!(out.stats.nodes_created, 1);
    }

    #[test]
    fn test_placeholder_dedup_across_files() {
        let mut graph = Graph::new(PathBuf::new());
        let mut state = BuildState::new();
        let mut collector = Collector::new(&mut graph, &mut state, true);

        let make = |n: usize| ParseResult {
            file_path: format!("f{n}.go"),
            language: Language::Go,
            package: None,
            symbols: vec![Some(func_symbol(&format!("f{n}.go:1:main"), "main", &format!("f{n}.go")))],
            imports: vec![Import {
                path: "fmt".into(),
                alias: None,
                names: vec![],
                is_commonjs: false,
                location: loc(),
            }],
        };

        let out = collector.collect(vec![Some(make(1)), Some(make(2)), Some(make(3))]);
        assert_eq!(out.stats.placeholder_nodes, 1, "all three files import 'fmt'; one placeholder");
        assert!(graph.get_node("external:fmt:fmt").is_some());
    }
}
