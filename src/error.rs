//! Error types for the builder.
//!
//! Almost everything here is *data*, not a propagated `Result` — per-file and
//! per-edge failures accumulate into [`crate::stats::BuildResult`] and never
//! abort the build. The single exception is programmer misuse
//! (building twice against an already-consumed driver), which surfaces as a
//! plain `anyhow::Error`.

use serde::Serialize;
use thiserror::Error;

/// Why a file was rejected before its symbols could be collected.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail")]
pub enum FileErrorKind {
    #[error("parse result was nil")]
    NilParseResult,
    #[error("file path escapes project root: {0}")]
    PathTraversal(String),
    #[error("input could not be read: {0}")]
    UnreadableInput(String),
}

/// A single file-level failure, recorded but never fatal to the build.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{kind} ({file_path})")]
pub struct FileError {
    pub file_path: String,
    pub kind: FileErrorKind,
    pub message: String,
}

impl FileError {
    pub fn new(file_path: impl Into<String>, kind: FileErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            file_path: file_path.into(),
            kind,
            message,
        }
    }
}

/// Why `add_edge` refused to add an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeErrorKind {
    #[error("endpoint not found in graph")]
    InvalidEndpoints,
    #[error("edge type is incompatible with endpoint kinds")]
    KindMismatch,
    #[error("duplicate edge")]
    Duplicate,
}

/// A single edge-level failure, recorded but never fatal to the build.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{kind}: {from_id} -> {to_id} ({edge_type})")]
pub struct EdgeError {
    pub from_id: String,
    pub to_id: String,
    pub edge_type: String,
    pub kind: EdgeErrorKind,
}

/// Programmer-misuse errors — the only kind this crate returns as a `Result`.
#[derive(Debug, Error)]
pub enum BuildMisuseError {
    #[error("build() was already called on this driver; the graph is frozen and consumed")]
    AlreadyBuilt,
}
