//! The embedding driver (`spec.md` §6's `Embed`): wires DFS preprocessing,
//! sort-by-DFI, bicomp-root setup and the per-vertex Walkup/Walkdown loop
//! into the single public entry point, and isolates an obstruction the first
//! time Walkdown stalls.
//!
//! No source file for this driver survived the retrieval filter; `spec.md`
//! §2's control-flow prose (preprocess, sort, then one descending pass over
//! DFI assigning each vertex's pending back edges before moving to the next,
//! isolating on the first stall) is this module's primary source, adapted to
//! this crate's explicit `EmbedMode`/`EmbedOutcome` split instead of the
//! original's embed-flags bitmask and boolean return.

use error_stack::{report, Report};
use tracing::{instrument, trace};

use crate::bicomp::{init_bicomp_roots, join_bicomps};
use crate::dfs::preprocess_for_embedding;
use crate::error::PlanarityError;
use crate::graph::{Graph, RingEnd, VertexId};
use crate::isolator::{isolate, IsolationReport, ObstructionShape};
use crate::modes::{create_fwd_arc_lists, EmbedMode, EmbedOutcome};
use crate::sort::sort_vertices;
use crate::walkdown::{walkdown, WalkdownOutcome};
use crate::walkup::walkup;

/// Runs the full planarity/outerplanarity/search algorithm over `graph` in
/// the given mode, per `spec.md` §6. `graph` must still be in original-index
/// order (the order `add_edge` left it in) and must not already be
/// DFS-processed; call [`Graph::reinitialize`] first to retry on the same
/// vertex set.
#[instrument(level = "debug", skip(graph), fields(mode = ?mode))]
pub fn embed(graph: &mut Graph, mode: EmbedMode) -> Result<EmbedOutcome, Report<PlanarityError>> {
    if matches!(mode, EmbedMode::MaximalPlanarSubgraph) {
        return embed_maximal_planar_subgraph(graph);
    }
    embed_core(graph, mode)
}

fn embed_core(graph: &mut Graph, mode: EmbedMode) -> Result<EmbedOutcome, Report<PlanarityError>> {
    if graph.sorted_by_dfi {
        return Err(report!(PlanarityError::WrongVertexOrder { sorted_by_dfi_required: false }));
    }

    preprocess_for_embedding(graph)?;
    sort_vertices(graph)?;
    init_bicomp_roots(graph);
    create_fwd_arc_lists(graph, mode);

    let n = graph.vertex_count();
    for dfi in (0..n).rev() {
        let v = VertexId::new(dfi);
        let forwards: Vec<_> = graph.fwd_arc_iter(v).collect();
        for f in forwards {
            walkup(graph, v, f);
        }
        let (outcome, stall) = walkdown(graph, v, mode);
        if outcome == WalkdownOutcome::Stalled {
            let report = isolate(graph, v, stall, mode);
            trace!(v = v.index(), ?report, "embed stalled, obstruction isolated");
            return Ok(classify_stall(mode, report));
        }
    }

    join_bicomps(graph);
    Ok(if mode.is_search() { EmbedOutcome::SearchMiss } else { EmbedOutcome::Embedded })
}

/// Maps a stall's isolated obstruction to the outcome the caller's mode
/// expects (`SPEC_FULL.md` §13).
fn classify_stall(mode: EmbedMode, report: IsolationReport) -> EmbedOutcome {
    match mode {
        // These two modes are themselves thin aliases over Outerplanar/
        // Planar: a stall only counts as a hit if the isolator actually
        // closed the specific minor they're searching for, not merely *an*
        // obstruction (`SPEC_FULL.md` §13).
        EmbedMode::SearchForK4 | EmbedMode::SearchForK5 => {
            if report.shape == ObstructionShape::Complete {
                EmbedOutcome::SearchHit
            } else {
                EmbedOutcome::SearchMiss
            }
        }
        _ if mode.is_search() => EmbedOutcome::SearchHit,
        _ => EmbedOutcome::NonEmbeddable,
    }
}

/// `MaximalPlanarSubgraph` (`SPEC_FULL.md` §13): repeatedly attempts a plain
/// planar embed on a fresh working copy of the surviving edge set; on
/// `NonEmbeddable`, drops one edge of the isolated subdivision and retries.
/// `graph` itself is left untouched until a working copy succeeds, at which
/// point its contents replace `graph`'s.
fn embed_maximal_planar_subgraph(graph: &mut Graph) -> Result<EmbedOutcome, Report<PlanarityError>> {
    let n = graph.order();
    let mut edges = graph.edge_labels();

    loop {
        let mut work = Graph::new(n, Graph::default_arc_capacity(n));
        for &(u, w) in &edges {
            work.add_edge(VertexId::new(u as usize), RingEnd::Last, VertexId::new(w as usize), RingEnd::Last)?;
        }

        match embed_core(&mut work, EmbedMode::Planar)? {
            EmbedOutcome::Embedded => {
                graph.copy_from(&work)?;
                return Ok(EmbedOutcome::Embedded);
            }
            EmbedOutcome::NonEmbeddable => {
                let dropped = work
                    .edge_labels()
                    .into_iter()
                    .next()
                    .expect("a NonEmbeddable outcome always leaves a nonempty subdivision");
                trace!(u = dropped.0, v = dropped.1, "dropping subdivision edge and retrying");
                edges.retain(|&e| e != dropped && e != (dropped.1, dropped.0));
            }
            other => return Ok(other),
        }
    }
}
