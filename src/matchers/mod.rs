//! Structural interface matchers: per-language implicit
//! interface satisfaction, including composed interfaces and promoted
//! methods through Go embedding.

pub mod strategy;

use std::collections::{HashMap, HashSet};

use crate::extractors::to_edge_error;
use crate::graph::node::NodeId;
use crate::graph::{EdgeType, Graph};
use crate::input::{Language, SymbolKind};

#[derive(Debug, Default)]
pub struct MatcherOutcome {
    pub edge_errors: Vec<crate::error::EdgeError>,
    pub go_interface_edges: usize,
    pub implements_edges_emitted: usize,
}

const ALL_LANGUAGES: [Language; 4] = [Language::Go, Language::Python, Language::TypeScript, Language::JavaScript];

/// Run the four-step algorithm once per language, globally.
pub fn run_structural_matchers(graph: &mut Graph) -> MatcherOutcome {
    let mut outcome = MatcherOutcome::default();
    for &language in &ALL_LANGUAGES {
        run_for_language(graph, language, &mut outcome);
    }
    outcome
}

fn run_for_language(graph: &mut Graph, language: Language, outcome: &mut MatcherOutcome) {
    let interface_ids: Vec<NodeId> = graph
        .nodes_of_kind(SymbolKind::Interface)
        .filter(|&idx| graph.node(idx).and_then(|n| n.symbol.language) == Some(language))
        .collect();
    let type_ids: Vec<NodeId> = graph
        .node_indices()
        .filter(|&idx| {
            let Some(n) = graph.node(idx) else { return false };
            n.symbol.language == Some(language) && matches!(n.symbol.kind, SymbolKind::Class | SymbolKind::Struct)
        })
        .collect();
    if interface_ids.is_empty() || type_ids.is_empty() {
        return;
    }

    // Step 1+2: composed interface method sets, language-scoped, empty ones excluded (guards against "implements everything").
    let mut iface_cache: HashMap<NodeId, HashSet<String>> = HashMap::new();
    let eligible_interfaces: Vec<NodeId> = interface_ids
        .into_iter()
        .filter(|&idx| {
            let methods = strategy::composed_interface_methods(graph, idx, language, &mut iface_cache);
            !methods.is_empty()
        })
        .collect();
    if eligible_interfaces.is_empty() {
        return;
    }

    // Step 3: promoted struct/class method sets.
    let mut type_cache: HashMap<NodeId, HashSet<String>> = HashMap::new();
    let type_methods: HashMap<NodeId, HashSet<String>> = type_ids
        .iter()
        .map(|&idx| (idx, strategy::promoted_type_methods(graph, idx, language, &mut type_cache)))
        .collect();

    // Step 4: name-only superset match, same language only, already guaranteed
    // since both id lists were filtered by `language` above.
    for &type_idx in &type_ids {
        let Some(own_methods) = type_methods.get(&type_idx) else { continue };
        for &iface_idx in &eligible_interfaces {
            let iface_methods = iface_cache.get(&iface_idx).expect("computed above");
            if iface_methods.is_subset(own_methods) {
                let location = graph.node(type_idx).map(|n| n.symbol.start);
                match graph.add_edge(type_idx, iface_idx, EdgeType::Implements, location) {
                    Ok(_) => {
                        outcome.implements_edges_emitted += 1;
                        if language == Language::Go {
                            outcome.go_interface_edges += 1;
                        }
                    }
                    Err(err) => outcome
                        .edge_errors
                        .push(to_edge_error(graph, type_idx, iface_idx, EdgeType::Implements, err)),
                }
            }
        }
    }
}
