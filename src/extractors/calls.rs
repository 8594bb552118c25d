//! Call-site edge extractor: the six-step target resolution
//! strategy, tried in order until a target is found or a placeholder is
//! created.

use crate::extractors::{resolve_name_filtered, to_edge_error, ExtractionOutcome};
use crate::graph::node::NodeId;
use crate::graph::{EdgeType, Graph};
use crate::input::{CallSite, SymbolKind};
use crate::names::{extract_type_name, matches_import_path};
use crate::state::BuildState;

const MAX_INHERITANCE_DEPTH: u8 = 10;

pub fn extract_call_edges(graph: &mut Graph, state: &BuildState, caller_id: NodeId) -> ExtractionOutcome {
    let mut outcome = ExtractionOutcome::default();
    let Some(node) = graph.node(caller_id) else {
        return outcome;
    };
    if node.symbol.calls.is_empty() {
        return outcome;
    }
    let caller_symbol_id = node.symbol.id.clone();
    let file_path = node.symbol.file_path.clone();
    let calls = node.symbol.calls.clone();

    for call in &calls {
        let resolution = resolve_target(graph, state, caller_id, &caller_symbol_id, &file_path, call);
        let (target, is_placeholder, via_commonjs) = match resolution {
            Some((idx, via_commonjs)) => (idx, false, via_commonjs),
            None => (get_or_create_call_placeholder(graph, state, &call.target), true, false),
        };

        match graph.add_edge(caller_id, target, EdgeType::Calls, Some(call.location)) {
            Ok(_) => {
                if is_placeholder {
                    outcome.call_edges_unresolved += 1;
                } else {
                    outcome.call_edges_resolved += 1;
                    if via_commonjs {
                        outcome.commonjs_import_edges_resolved += 1;
                    }
                }
            }
            Err(err) => outcome
                .edge_errors
                .push(to_edge_error(graph, caller_id, target, EdgeType::Calls, err)),
        }
    }

    outcome
}

/// Run the six-step strategy. Returns `(target, resolved_via_commonjs)`.
fn resolve_target(
    graph: &Graph,
    state: &BuildState,
    caller_id: NodeId,
    caller_symbol_id: &str,
    file_path: &str,
    call: &CallSite,
) -> Option<(NodeId, bool)> {
    if let Some(idx) = resolve_this_self(graph, state, caller_id, caller_symbol_id, call) {
        return Some((idx, false));
    }
    if let Some(idx) = resolve_receiver_typed(graph, caller_id, call) {
        return Some((idx, false));
    }
    if let Some(idx) = resolve_name_filtered(graph, file_path, &call.target, caller_id, is_call_target_kind) {
        return Some((idx, false));
    }
    if let Some((idx, via_commonjs)) = resolve_import_aware(graph, state, file_path, caller_id, call) {
        return Some((idx, via_commonjs));
    }
    if let Some(idx) = resolve_inheritance_climb(graph, state, caller_id, caller_symbol_id, call) {
        return Some((idx, false));
    }
    None
}

/// Kinds a bare-name call resolution (step 3) may land on: real definitions
/// only. Excludes `Variable`/`Constant` so a same-file CommonJS alias (`var
/// Route = require('./route')`, recorded as a `Variable` named `Route`)
/// doesn't shadow the real class, and excludes `External` so an
/// already-registered import placeholder sharing the call's local name
/// doesn't preempt step 4's import-aware lookup or step 6's own placeholder
/// handling.
fn is_call_target_kind(kind: SymbolKind) -> bool {
    matches!(
        kind,
        SymbolKind::Function | SymbolKind::Method | SymbolKind::Class | SymbolKind::Struct | SymbolKind::Property
    )
}

/// Step 1: `this`/`self` resolution.
fn resolve_this_self(
    graph: &Graph,
    state: &BuildState,
    caller_id: NodeId,
    caller_symbol_id: &str,
    call: &CallSite,
) -> Option<NodeId> {
    if call.receiver != "this" && call.receiver != "self" {
        return None;
    }
    let class_idx = *state.enclosing_class.get(caller_symbol_id)?;
    find_child_by_name(graph, class_idx, &call.target, caller_id)
}

fn find_child_by_name(graph: &Graph, class_idx: NodeId, name: &str, exclude: NodeId) -> Option<NodeId> {
    graph.node(class_idx)?.children.iter().copied().find(|&idx| {
        idx != exclude && graph.node(idx).map(|n| n.symbol.name.as_str()) == Some(name)
    })
}

/// Step 2: Go-style receiver-typed resolution. Prefers an exact-case match
/// of the receiver token against a candidate method's receiver type name;
/// falls back to the first case-insensitive match.
fn resolve_receiver_typed(graph: &Graph, caller_id: NodeId, call: &CallSite) -> Option<NodeId> {
    if !call.is_method || call.receiver.is_empty() {
        return None;
    }
    let mut case_insensitive_match = None;
    for &idx in graph.nodes_by_name(&call.target) {
        if idx == caller_id {
            continue;
        }
        let Some(n) = graph.node(idx) else { continue };
        if n.symbol.kind != SymbolKind::Method {
            continue;
        }
        let Some(receiver_type) = n.symbol.receiver.as_deref().map(extract_type_name) else {
            continue;
        };
        if receiver_type.is_empty() {
            continue;
        }
        if receiver_type == call.receiver {
            return Some(idx); // exact case wins outright
        }
        if case_insensitive_match.is_none() && receiver_type.eq_ignore_ascii_case(&call.receiver) {
            case_insensitive_match = Some(idx);
        }
    }
    case_insensitive_match
}

/// Step 4: import-map-aware resolution. Tries the call target's name and
/// (for method calls) the receiver token as possible locally-bound import
/// names, preferring the binding's original name when searching.
fn resolve_import_aware(
    graph: &Graph,
    state: &BuildState,
    file_path: &str,
    caller_id: NodeId,
    call: &CallSite,
) -> Option<(NodeId, bool)> {
    let import_map = state.import_maps.get(file_path)?;
    let lookup_keys: [&str; 2] = [call.target.as_str(), call.receiver.as_str()];
    for local_name in lookup_keys {
        if local_name.is_empty() {
            continue;
        }
        let Some(binding) = import_map.get(local_name) else {
            continue;
        };
        let wanted_name = if binding.original_name.is_empty() {
            call.target.as_str()
        } else {
            binding.original_name.as_str()
        };
        for &idx in graph.nodes_by_name(wanted_name) {
            if idx == caller_id {
                continue;
            }
            let Some(n) = graph.node(idx) else { continue };
            if matches_import_path(&n.symbol.file_path, &binding.module_path) {
                return Some((idx, binding.is_commonjs));
            }
        }
    }
    None
}

/// Step 5: climb the `extends` chain from the caller's enclosing class,
/// repeating the `this`/`self` child lookup at each level. Cycle-protected,
/// depth capped at [`MAX_INHERITANCE_DEPTH`].
fn resolve_inheritance_climb(
    graph: &Graph,
    state: &BuildState,
    caller_id: NodeId,
    caller_symbol_id: &str,
    call: &CallSite,
) -> Option<NodeId> {
    let mut current = *state.enclosing_class.get(caller_symbol_id)?;
    let mut visited = std::collections::HashSet::new();
    visited.insert(current);

    for _ in 0..MAX_INHERITANCE_DEPTH {
        let parent_name = state.class_extends.get(&current)?;
        let parent_idx = graph
            .nodes_by_name(parent_name)
            .iter()
            .copied()
            .find(|&idx| matches!(graph.node(idx).map(|n| n.symbol.kind), Some(SymbolKind::Class | SymbolKind::Struct)))?;
        if !visited.insert(parent_idx) {
            return None; // cycle
        }
        if let Some(found) = find_child_by_name(graph, parent_idx, &call.target, caller_id) {
            return Some(found);
        }
        current = parent_idx;
    }
    None
}

/// Step 6: fallback External placeholder, keyed by name only (empty
/// package), deduplicated the same way import placeholders are.
fn get_or_create_call_placeholder(graph: &mut Graph, state: &BuildState, name: &str) -> NodeId {
    let key = (String::new(), name.to_string());
    if let Some(existing) = state.placeholders.get(&key) {
        return *existing;
    }
    let id = format!("external::{name}");
    if let Some((idx, _)) = graph.get_node(&id) {
        state.placeholders.insert(key, idx);
        return idx;
    }
    let symbol = crate::input::Symbol {
        id: id.clone(),
        name: name.to_string(),
        kind: SymbolKind::External,
        language: None,
        file_path: String::new(),
        start: crate::input::Location { line: 0, col: 0 },
        end: crate::input::Location { line: 0, col: 0 },
        receiver: None,
        signature: None,
        package: None,
        children: Vec::new(),
        calls: Vec::new(),
        metadata: None,
    };
    let idx = graph
        .add_node(symbol)
        .expect("call-site placeholder ids are unique by construction");
    state.placeholders.insert(key, idx);
    idx
}
