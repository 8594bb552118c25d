//! Per-language composition rules for the structural matchers: composing
//! interface method sets via `extends`/`implements`, and promoting
//! struct/class method sets through Go embedding.

use std::collections::{HashMap, HashSet};

use crate::graph::node::NodeId;
use crate::graph::Graph;
use crate::input::{Language, SymbolKind};

const MAX_DEPTH: u8 = 10;

/// Own method names declared directly on a symbol's metadata, ignoring
/// arity/receiver-type — matching is name-only.
pub fn method_names_of(graph: &Graph, idx: NodeId) -> HashSet<String> {
    graph
        .node(idx)
        .and_then(|n| n.symbol.metadata.as_ref())
        .map(|m| m.methods.iter().map(|sig| sig.name.clone()).collect())
        .unwrap_or_default()
}

/// Flatten `methods(I) = methods(I) ∪ methods(parent(I))`, recursing through
/// both `extends` and `implements` on the interface symbol itself.
/// Cycle-protected via a visited set and a depth cap; an unresolved parent
/// just contributes nothing.
pub fn composed_interface_methods(
    graph: &Graph,
    idx: NodeId,
    language: Language,
    cache: &mut HashMap<NodeId, HashSet<String>>,
) -> HashSet<String> {
    let mut visited = HashSet::new();
    compose_recursive(graph, idx, language, cache, &mut visited, 0)
}

fn compose_recursive(
    graph: &Graph,
    idx: NodeId,
    language: Language,
    cache: &mut HashMap<NodeId, HashSet<String>>,
    visited: &mut HashSet<NodeId>,
    depth: u8,
) -> HashSet<String> {
    if let Some(cached) = cache.get(&idx) {
        return cached.clone();
    }
    let mut methods = method_names_of(graph, idx);
    if depth >= MAX_DEPTH || !visited.insert(idx) {
        cache.insert(idx, methods.clone());
        return methods;
    }

    let Some(meta) = graph.node(idx).and_then(|n| n.symbol.metadata.as_ref()) else {
        cache.insert(idx, methods.clone());
        return methods;
    };
    let mut parent_names: Vec<String> = meta.extends.iter().cloned().collect();
    parent_names.extend(meta.implements.iter().cloned());

    for parent_name in parent_names {
        if let Some(parent_idx) = find_interface_by_name(graph, &parent_name, language) {
            let parent_methods = compose_recursive(graph, parent_idx, language, cache, visited, depth + 1);
            methods.extend(parent_methods);
        }
    }

    cache.insert(idx, methods.clone());
    methods
}

fn find_interface_by_name(graph: &Graph, name: &str, language: Language) -> Option<NodeId> {
    graph.nodes_by_name(name).iter().copied().find(|&idx| {
        graph
            .node(idx)
            .map(|n| n.symbol.kind == SymbolKind::Interface && n.symbol.language == Some(language))
            .unwrap_or(false)
    })
}

/// Own method set plus, for Go only, the union of methods promoted through
/// the `extends` chain (embedded field). TS/Python classes use direct
/// methods only.
pub fn promoted_type_methods(
    graph: &Graph,
    idx: NodeId,
    language: Language,
    cache: &mut HashMap<NodeId, HashSet<String>>,
) -> HashSet<String> {
    let mut visited = HashSet::new();
    promote_recursive(graph, idx, language, cache, &mut visited, 0)
}

fn promote_recursive(
    graph: &Graph,
    idx: NodeId,
    language: Language,
    cache: &mut HashMap<NodeId, HashSet<String>>,
    visited: &mut HashSet<NodeId>,
    depth: u8,
) -> HashSet<String> {
    if let Some(cached) = cache.get(&idx) {
        return cached.clone();
    }
    let mut methods = method_names_of(graph, idx);
    if language != Language::Go || depth >= MAX_DEPTH || !visited.insert(idx) {
        cache.insert(idx, methods.clone());
        return methods;
    }

    let extends = graph
        .node(idx)
        .and_then(|n| n.symbol.metadata.as_ref())
        .and_then(|m| m.extends.clone());
    if let Some(parent_name) = extends {
        if let Some(parent_idx) = find_type_by_name(graph, &parent_name, language) {
            let parent_methods = promote_recursive(graph, parent_idx, language, cache, visited, depth + 1);
            methods.extend(parent_methods);
        }
    }

    cache.insert(idx, methods.clone());
    methods
}

fn find_type_by_name(graph: &Graph, name: &str, language: Language) -> Option<NodeId> {
    graph.nodes_by_name(name).iter().copied().find(|&idx| {
        graph
            .node(idx)
            .map(|n| matches!(n.symbol.kind, SymbolKind::Class | SymbolKind::Struct) && n.symbol.language == Some(language))
            .unwrap_or(false)
    })
}
