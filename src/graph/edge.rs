use crate::input::{Location, SymbolKind};

/// The six typed semantic relationships between nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeType {
    Calls,
    Receives,
    Implements,
    Embeds,
    Returns,
    Imports,
    References,
}

impl std::fmt::Display for EdgeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EdgeType::Calls => "Calls",
            EdgeType::Receives => "Receives",
            EdgeType::Implements => "Implements",
            EdgeType::Embeds => "Embeds",
            EdgeType::Returns => "Returns",
            EdgeType::Imports => "Imports",
            EdgeType::References => "References",
        };
        f.write_str(s)
    }
}

/// A directed, typed edge. Logically a multiset: two edges with identical
/// `(from, to, edge_type)` but different locations are both kept.
#[derive(Debug, Clone)]
pub struct Edge {
    pub from: super::node::NodeId,
    pub to: super::node::NodeId,
    pub edge_type: EdgeType,
    pub location: Option<Location>,
}

/// Whether an edge of `edge_type` may connect a node of kind `from` to a
/// node of kind `to`.
pub fn validate_edge_type(edge_type: EdgeType, from: SymbolKind, to: SymbolKind) -> bool {
    use SymbolKind::*;
    match edge_type {
        EdgeType::Calls => {
            matches!(from, Function | Method | Property | External)
                && matches!(to, Function | Method | Class | Struct | Property | External)
        }
        EdgeType::Receives => matches!(from, Method) && matches!(to, Struct | Class),
        EdgeType::Implements => matches!(from, Class | Struct) && matches!(to, Interface),
        EdgeType::Embeds => {
            matches!(from, Class | Struct | Interface) && matches!(to, Class | Struct | Interface)
        }
        EdgeType::Returns => matches!(from, Function | Method) && is_nominal_type_kind(to),
        EdgeType::Imports => matches!(to, External | Package),
        EdgeType::References => !matches!(to, Import),
    }
}

/// The set of kinds a `Returns` edge may target — anything that denotes a
/// nominal type the caller could hold a value of.
fn is_nominal_type_kind(kind: SymbolKind) -> bool {
    matches!(
        kind,
        SymbolKind::Class
            | SymbolKind::Struct
            | SymbolKind::Interface
            | SymbolKind::External
            | SymbolKind::Variable
            | SymbolKind::Constant
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use SymbolKind::*;

    #[test]
    fn test_calls_allows_external_both_ends() {
        assert!(validate_edge_type(EdgeType::Calls, External, External));
    }

    #[test]
    fn test_calls_rejects_interface_source() {
        assert!(!validate_edge_type(EdgeType::Calls, Interface, Function));
    }

    #[test]
    fn test_implements_requires_interface_target() {
        assert!(validate_edge_type(EdgeType::Implements, Struct, Interface));
        assert!(!validate_edge_type(EdgeType::Implements, Struct, Class));
    }

    #[test]
    fn test_receives_requires_method_source() {
        assert!(validate_edge_type(EdgeType::Receives, Method, Struct));
        assert!(!validate_edge_type(EdgeType::Receives, Function, Struct));
    }

    #[test]
    fn test_imports_rejects_non_external_non_package_target() {
        assert!(validate_edge_type(EdgeType::Imports, Package, External));
        assert!(!validate_edge_type(EdgeType::Imports, Package, Function));
    }

    #[test]
    fn test_references_rejects_import_target() {
        assert!(!validate_edge_type(EdgeType::References, Function, Import));
        assert!(validate_edge_type(EdgeType::References, Function, Class));
    }
}
