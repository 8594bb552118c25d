//! Polyglot code-reference graph builder.
//!
//! Given per-file parse results (symbols, imports, call sites already
//! extracted upstream by per-language parsers), [`builder::BuilderDriver`]
//! resolves symbol references across Go, Python, TypeScript and JavaScript
//! files into a single immutable [`graph::Graph`] of typed edges. File
//! discovery, parsing itself, and everything downstream of the graph
//! (diffing, classification, persistence) live outside this crate.

pub mod builder;
pub mod cancellation;
pub mod collector;
pub mod config;
pub mod error;
pub mod extractors;
pub mod graph;
pub mod import_map;
pub mod input;
pub mod matchers;
pub mod names;
pub mod state;
pub mod stats;

pub use builder::BuilderDriver;
pub use cancellation::CancellationToken;
pub use config::{BuilderOptions, Phase, Progress, ProgressCallback, TraceConfig};
pub use error::{BuildMisuseError, EdgeError, EdgeErrorKind, FileError, FileErrorKind};
pub use graph::{validate_edge_type, Edge, EdgeType, Graph, GraphWriteError, Node, NodeId};
pub use input::{
    CallSite, Import, Language, Location, MethodSignature, ParseResult, Symbol, SymbolKind,
    SymbolMetadata,
};
pub use stats::{BuildResult, BuildStats};
