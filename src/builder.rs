//! Builder Driver: phase orchestration, worker pool,
//! cancellation, progress, and final result assembly.

use rayon::prelude::*;

use crate::cancellation::CancellationToken;
use crate::collector::Collector;
use crate::config::{BuilderOptions, Phase, Progress};
use crate::error::BuildMisuseError;
use crate::extractors::{self, ExtractionOutcome};
use crate::graph::node::NodeId;
use crate::graph::Graph;
use crate::input::ParseResult;
use crate::matchers;
use crate::state::BuildState;
use crate::stats::{BuildResult, BuildStats};

/// Progress/cancellation checks happen every this-many items within a phase.
const TICK: usize = 10;

/// Rough heuristic for the soft memory cap: `max_memory_mb` is converted to
/// a node-count ceiling assuming ~512 bytes of graph overhead per node. This
/// is a deliberately simple stand-in for real memory accounting, which is
/// out of scope for an in-memory builder with no allocator instrumentation.
const ESTIMATED_BYTES_PER_NODE: usize = 512;

pub struct BuilderDriver {
    options: BuilderOptions,
    cancellation: CancellationToken,
    built: bool,
}

impl BuilderDriver {
    pub fn new(options: BuilderOptions) -> Self {
        Self {
            options,
            cancellation: CancellationToken::new(),
            built: false,
        }
    }

    /// A clone of the driver's cancellation handle, for a caller to trigger
    /// cancellation from another thread while `build` runs.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Run the full pipeline: Collecting -> ExtractingEdges ->
    /// ResolvingInterfaces -> Finalizing -> freeze. Returns a programmer
    /// misuse error if called twice on the same driver; every other failure
    /// mode is non-fatal and accumulates into the returned [`BuildResult`].
    pub fn build(&mut self, parse_results: Vec<Option<ParseResult>>) -> anyhow::Result<BuildResult> {
        if self.built {
            return Err(BuildMisuseError::AlreadyBuilt.into());
        }
        self.built = true;
        let _span = tracing::info_span!("build", files = parse_results.len()).entered();

        let started = std::time::Instant::now();
        let files_total = parse_results.len();
        let mut graph = Graph::new(self.options.project_root.clone());
        let mut state = BuildState::new();
        let mut stats = BuildStats::default();
        let mut file_errors = Vec::new();
        let mut edge_errors = Vec::new();
        let mut incomplete = false;

        let max_nodes = (self.options.max_memory_mb * 1024 * 1024) / ESTIMATED_BYTES_PER_NODE;

        self.emit_progress(Phase::Collecting, 0, files_total, 0, 0);
        if self.cancellation.is_cancelled() {
            tracing::info!("build cancelled before the collecting phase started");
            incomplete = true;
        }

        let mut collected_files: Vec<(String, Vec<NodeId>)> = Vec::new();
        if !incomplete {
            let project_root_empty = self.options.project_root.as_os_str().is_empty();
            let mut collector = Collector::new(&mut graph, &mut state, project_root_empty);

            for (chunk_index, chunk) in parse_results.chunks(TICK).enumerate() {
                if self.cancellation.is_cancelled() {
                    incomplete = true;
                    break;
                }
                let output = collector.collect(chunk.to_vec());
                stats.files_processed += output.stats.files_processed;
                stats.files_failed += output.stats.files_failed;
                stats.nodes_created += output.stats.nodes_created;
                stats.placeholder_nodes += output.stats.placeholder_nodes;
                for file_error in &output.file_errors {
                    tracing::debug!(file = %file_error.file_path, kind = %file_error.kind, "file rejected during collection");
                }
                file_errors.extend(output.file_errors);
                collected_files.extend(output.files);

                self.emit_progress(
                    Phase::Collecting,
                    (chunk_index + 1) * TICK,
                    files_total,
                    graph.node_count(),
                    graph.edge_count(),
                );

                if graph.node_count() > max_nodes {
                    incomplete = true;
                    break;
                }
            }
        }

        if !incomplete && self.cancellation.is_cancelled() {
            incomplete = true;
        }

        if !incomplete {
            let _span = tracing::info_span!("extracting_edges").entered();
            self.emit_progress(Phase::ExtractingEdges, stats.files_processed, files_total, graph.node_count(), graph.edge_count());
            let extraction_incomplete = self.run_extraction_phase(&mut graph, &state, &collected_files, &mut stats, &mut edge_errors);
            incomplete = incomplete || extraction_incomplete;
        }

        if !incomplete && self.cancellation.is_cancelled() {
            incomplete = true;
        }

        if !incomplete {
            let _span = tracing::info_span!("resolving_interfaces").entered();
            self.emit_progress(Phase::ResolvingInterfaces, stats.files_processed, files_total, graph.node_count(), graph.edge_count());
            let matcher_outcome = matchers::run_structural_matchers(&mut graph);
            stats.go_interface_edges += matcher_outcome.go_interface_edges;
            tracing::debug!(implements_edges = matcher_outcome.implements_edges_emitted, "structural matchers finished");
            edge_errors.extend(matcher_outcome.edge_errors);
        }

        self.emit_progress(Phase::Finalizing, stats.files_processed, files_total, graph.node_count(), graph.edge_count());
        stats.edges_created = graph.edge_count();
        graph.freeze();
        stats.duration_ms = started.elapsed().as_millis() as u64;
        tracing::info!(
            nodes = stats.nodes_created,
            edges = stats.edges_created,
            incomplete,
            duration_ms = stats.duration_ms,
            "build finished"
        );

        Ok(BuildResult {
            graph,
            stats,
            file_errors,
            edge_errors,
            incomplete,
        })
    }

    /// Runs the edge-extraction phase across a dedicated rayon pool sized to
    /// `worker_count`. The graph is locked per-symbol rather than held for
    /// the whole phase — coarser than `add_edge`-only locking, but the
    /// extractors need to read sibling nodes (enclosing class, parent
    /// chains) under the same mutable borrow they write through.
    fn run_extraction_phase(
        &self,
        graph: &mut Graph,
        state: &BuildState,
        files: &[(String, Vec<NodeId>)],
        stats: &mut BuildStats,
        edge_errors: &mut Vec<crate::error::EdgeError>,
    ) -> bool {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.options.worker_count.max(1))
            .build()
            .unwrap_or_else(|_| rayon::ThreadPoolBuilder::new().build().expect("default rayon pool"));

        let all_node_ids: Vec<NodeId> = files.iter().flat_map(|(_, ids)| ids.iter().copied()).collect();
        let graph_mutex = std::sync::Mutex::new(std::mem::replace(graph, Graph::new(std::path::PathBuf::new())));
        let mut incomplete = false;

        for chunk in all_node_ids.chunks(TICK) {
            if self.cancellation.is_cancelled() {
                incomplete = true;
                break;
            }
            let outcomes: Vec<ExtractionOutcome> = pool.install(|| {
                chunk
                    .par_iter()
                    .map(|&node_id| {
                        let mut locked = graph_mutex.lock().expect("graph mutex poisoned");
                        extractors::extract_for_symbol(&mut locked, state, node_id)
                    })
                    .collect()
            });
            for outcome in outcomes {
                stats.call_edges_resolved += outcome.call_edges_resolved;
                stats.call_edges_unresolved += outcome.call_edges_unresolved;
                stats.commonjs_import_edges_resolved += outcome.commonjs_import_edges_resolved;
                for edge_error in &outcome.edge_errors {
                    tracing::warn!(from = %edge_error.from_id, to = %edge_error.to_id, kind = %edge_error.kind, "edge rejected during extraction");
                }
                edge_errors.extend(outcome.edge_errors);
            }
        }

        *graph = graph_mutex.into_inner().expect("graph mutex poisoned");
        incomplete
    }

    fn emit_progress(&self, phase: Phase, files_done: usize, files_total: usize, nodes: usize, edges: usize) {
        if let Some(cb) = &self.options.progress_callback {
            cb(Progress {
                phase,
                files_done,
                files_total,
                nodes,
                edges,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Language, Location, Symbol, SymbolKind};

    fn parse_result(n: usize) -> ParseResult {
        ParseResult {
            file_path: format!("f{n}.go"),
            language: Language::Go,
            package: None,
            symbols: vec![Some(Symbol {
                id: format!("f{n}.go:1:main"),
                name: "main".into(),
                kind: SymbolKind::Function,
                language: Some(Language::Go),
                file_path: format!("f{n}.go"),
                start: Location { line: 1, col: 0 },
                end: Location { line: 1, col: 0 },
                receiver: None,
                signature: None,
                package: None,
                children: Vec::new(),
                calls: Vec::new(),
                metadata: None,
            })],
            imports: vec![],
        }
    }

    #[test]
    fn test_build_freezes_graph_and_reports_stats() {
        let mut driver = BuilderDriver::new(BuilderOptions::default());
        let result = driver.build(vec![Some(parse_result(1)), Some(parse_result(2))]).unwrap();
        assert!(result.graph.is_frozen());
        assert_eq!(result.stats.files_processed, 2);
        assert_eq!(result.stats.nodes_created, 2);
        assert!(!result.incomplete);
    }

    #[test]
    fn test_second_build_call_is_misuse_error() {
        let mut driver = BuilderDriver::new(BuilderOptions::default());
        driver.build(vec![Some(parse_result(1))]).unwrap();
        let err = driver.build(vec![Some(parse_result(2))]);
        assert!(err.is_err());
    }

    #[test]
    fn test_cancellation_before_build_still_returns_frozen_graph() {
        let mut driver = BuilderDriver::new(BuilderOptions::default());
        driver.cancellation_token().cancel();
        let inputs: Vec<Option<ParseResult>> = (0..100).map(|n| Some(parse_result(n))).collect();
        let result = driver.build(inputs).unwrap();
        assert!(result.incomplete);
        assert!(result.graph.is_frozen());
        assert!(result.stats.files_processed < 100);
    }
}
