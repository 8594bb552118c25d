//! Builder configuration and the external `trace.config.yaml` shape.
//!
//! [`BuilderOptions`] configures the graph-construction pipeline itself.
//! [`TraceConfig`] is *not* read by this crate — it documents the config file
//! format the downstream classification consumer reads, so that
//! consumer's `exclude_from_analysis`/`include_override` prefixes round-trip
//! through the same type other collaborators use. The builder only needs to
//! know it must tolerate the file's absence, which it does trivially by
//! never touching the filesystem at all.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;

/// Phase-transition / intra-phase progress event delivered to a caller's
/// `progress_callback`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Collecting,
    ExtractingEdges,
    ResolvingInterfaces,
    Finalizing,
}

/// A single progress tick.
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    pub phase: Phase,
    pub files_done: usize,
    pub files_total: usize,
    pub nodes: usize,
    pub edges: usize,
}

/// A `Fn(Progress)` callback, boxed so [`BuilderOptions`] can be constructed
/// and passed around without generic parameters.
pub type ProgressCallback = Arc<dyn Fn(Progress) + Send + Sync>;

/// Options accepted by [`crate::builder::BuilderDriver::new`].
#[derive(Clone)]
pub struct BuilderOptions {
    /// Project root; may be empty, in which case path-traversal validation
    /// in the collector is relaxed.
    pub project_root: PathBuf,
    /// Soft cap on live node count. Exceeding it aborts the remainder of the
    /// build with `incomplete = true`, same as cancellation.
    pub max_memory_mb: usize,
    /// Worker pool size for the edge-extraction phase. Defaults to
    /// available parallelism.
    pub worker_count: usize,
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            project_root: PathBuf::new(),
            max_memory_mb: 4096,
            worker_count: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            progress_callback: None,
        }
    }
}

impl std::fmt::Debug for BuilderOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuilderOptions")
            .field("project_root", &self.project_root)
            .field("max_memory_mb", &self.max_memory_mb)
            .field("worker_count", &self.worker_count)
            .field("progress_callback", &self.progress_callback.is_some())
            .finish()
    }
}

/// The shape of `trace.config.yaml`, read by the classification consumer
/// (out of scope for this crate). Kept as a `Deserialize`-only type so that
/// crate consumers sharing a workspace can reuse it instead of redefining it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TraceConfig {
    #[serde(default)]
    pub exclude_from_analysis: Vec<String>,
    #[serde(default)]
    pub include_override: Vec<String>,
}

impl TraceConfig {
    /// Resolve whether `path` should be analyzed under this config.
    /// Include wins over exclude on collision.
    pub fn should_analyze(&self, path: &str) -> bool {
        let included = self
            .include_override
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()));
        if included {
            return true;
        }
        !self
            .exclude_from_analysis
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_include_override_wins_on_collision() {
        let cfg = TraceConfig {
            exclude_from_analysis: vec!["vendor/".into()],
            include_override: vec!["vendor/mine/".into()],
        };
        assert!(
            cfg.should_analyze("vendor/mine/foo.go"),
            "include_override should win over a colliding exclude prefix"
        );
        assert!(!cfg.should_analyze("vendor/other/foo.go"));
    }

    #[test]
    fn test_default_config_analyzes_everything() {
        let cfg = TraceConfig::default();
        assert!(cfg.should_analyze("anything/at/all.py"));
    }
}
