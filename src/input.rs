//! Input types produced by external per-language parsers.
//!
//! Everything in this module is read-only from the builder's perspective:
//! symbols, imports and call sites are materialized upstream (file discovery
//! and tree-sitter/AST-level extraction are out of scope here) and handed to
//! the [`crate::builder::BuilderDriver`] as a batch of
//! [`ParseResult`]s.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The kind of a [`Symbol`]. A closed, tagged enum rather than dynamic
/// dispatch — every kind-dependent rule (`validate_edge_type`, callability,
/// reference-target eligibility) is a total function over this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Function,
    Method,
    Class,
    Struct,
    Interface,
    Property,
    Field,
    Variable,
    Constant,
    Package,
    Import,
    External,
}

/// Language family recognized by the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Go,
    Python,
    TypeScript,
    JavaScript,
}

impl Language {
    /// Infer a language from a file extension when a symbol's `language`
    /// field was left empty by the upstream parser. Returns `None` for
    /// extensions this builder does not recognize.
    pub fn infer_from_extension(path: &str) -> Option<Language> {
        let ext = path.rsplit('.').next()?;
        match ext {
            "go" => Some(Language::Go),
            "py" | "pyi" => Some(Language::Python),
            "ts" | "tsx" | "mts" => Some(Language::TypeScript),
            "js" | "jsx" | "mjs" | "cjs" => Some(Language::JavaScript),
            _ => None,
        }
    }
}

/// A 1-based line + 0-based column source location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub line: usize,
    pub col: usize,
}

/// A method signature recorded on an interface or struct/class's `methods`
/// metadata, used by the structural matchers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSignature {
    pub name: String,
    pub receiver_type: Option<String>,
    pub param_arity: usize,
    pub return_arity: usize,
}

/// Metadata carried by a subset of symbols — the fields a given symbol
/// populates depend on its kind and source language. All fields are
/// optional/empty by default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymbolMetadata {
    /// Single parent class/interface name (`extends`).
    pub extends: Option<String>,
    /// Interface names this class/struct explicitly declares (`implements X, Y`).
    pub implements: Vec<String>,
    /// Method signatures belonging to this interface/struct/class.
    pub methods: Vec<MethodSignature>,
    /// Raw return-type annotation, before decoration stripping.
    pub return_type: Option<String>,
    /// decorator/annotation name -> list of PascalCase identifiers passed to it.
    pub decorator_args: HashMap<String, Vec<String>>,
    /// Generic/type arguments applied at a use site (mainly TS).
    pub type_arguments: Vec<String>,
    /// Narrowed types from control-flow narrowing (mainly TS).
    pub type_narrowings: Vec<String>,
    /// Decorator names applied to this symbol (without arguments).
    pub decorators: Vec<String>,
    /// Free-standing type references found in the symbol's signature/body.
    pub type_references: Vec<String>,
}

/// A single call site recorded on a [`Symbol`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallSite {
    /// The name being called (function, method, or constructor).
    pub target: String,
    /// `true` when this is a method call (`recv.target(...)`) rather than a
    /// bare function call (`target(...)`).
    pub is_method: bool,
    /// The receiver expression text (`"self"`, `"this"`, a variable name, or
    /// empty for a bare call).
    pub receiver: String,
    /// Names passed as callback/function-valued arguments, if any.
    pub function_args: Vec<String>,
    pub location: Location,
}

/// A parser-produced declaration. Immutable to the builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Symbol {
    /// Stable id: `"<file>:<line>:<name>"` for source symbols,
    /// `"external:<package>:<name>"` for placeholders.
    pub id: String,
    pub name: String,
    pub kind: SymbolKind,
    pub language: Option<Language>,
    pub file_path: String,
    pub start: Location,
    pub end: Location,
    /// Owning type name for a method (Go-style), if any.
    pub receiver: Option<String>,
    pub signature: Option<String>,
    pub package: Option<String>,
    /// Nested symbols (e.g. class methods, interface members). A `None`
    /// entry represents a malformed child the upstream parser emitted as a
    /// null placeholder; the collector skips these silently.
    pub children: Vec<Option<Symbol>>,
    pub calls: Vec<CallSite>,
    pub metadata: Option<SymbolMetadata>,
}

/// A single import statement extracted from a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Import {
    /// Raw module/package path as written in source.
    pub path: String,
    /// Local alias, when the import binds to a different local name
    /// (`import X as Y`, `var Y = require('X')`).
    pub alias: Option<String>,
    /// Named imports bound from this module (`from X import a, b`).
    pub names: Vec<String>,
    pub is_commonjs: bool,
    pub location: Location,
}

/// One file's worth of parser output — the unit of work the Collector
/// consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResult {
    pub file_path: String,
    pub language: Language,
    pub package: Option<String>,
    /// A `None` entry is a malformed top-level symbol the upstream parser
    /// emitted as a null placeholder; skipped silently, not an error —
    /// distinct from a `None` [`ParseResult`] itself, which IS a
    /// `FileError`.
    pub symbols: Vec<Option<Symbol>>,
    pub imports: Vec<Import>,
}
