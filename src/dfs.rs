//! DFS preprocessor (C3): DFI assignment, parent/child arc typing,
//! lowpoint and leastAncestor computation.
//!
//! Grounded directly on
//! `original_source/branches/Branch-ConvertToEdgeRec/c/graphPreprocess.c`'s
//! `gp_CreateDFSTree`: an iterative DFS driven by an explicit integer
//! stack holding `(parent_vertex, arc)` pairs (`NIL, NIL` pushed once per
//! root to start each connected component), retyping arcs to
//! `Child`/`Parent` on first discovery and to `Forward`/`Back` when a
//! already-visited neighbor is reached, and moving child arcs to the front
//! / forward arcs to the back of their owner's ring as it goes.
//!
//! An undirected-graph DFS never produces a cross edge — every non-tree
//! edge joins a vertex to one of its ancestors — so every such edge gets
//! classified exactly once, at the *later*-discovered endpoint's own
//! ring scan: by the time any vertex `u` is discovered, every neighbor
//! already visited at that moment is necessarily an ancestor of `u` (an
//! unrelated, already-finished vertex could never have an edge to `u`
//! without that edge having been seen, and pushed as a tree candidate,
//! from `u`'s side first). A stack entry can still go stale (pushed while
//! its target was unvisited, popped after some other branch reached it
//! first); that pop is a harmless duplicate of a classification the
//! target's own discovery-time scan already made, so it is skipped.
//!
//! `lowpoint`/`leastAncestor` are folded into the same traversal as a
//! second, explicit post-order pass (`gp_LowpointAndLeastAncestor` in the
//! original is a separate function; the two are independent enough here
//! that keeping them as two straightforward loops over DFI order reads far
//! more clearly in Rust than recreating the original's merged recursion-by-stack).

use error_stack::{report, Report};
use tracing::{instrument, trace};

use crate::error::PlanarityError;
use crate::graph::{ArcId, ArcType, Graph, NodeRef, VertexId};
use crate::stack::IntStack;

const NIL: u32 = u32::MAX;

/// Runs the DFS preprocessing pass over `graph`, assigning DFIs in
/// discovery order, typing every arc, and computing `lowpoint`/
/// `least_ancestor` for every vertex. Idempotent: a second call is a no-op.
#[instrument(level = "debug", skip_all)]
pub fn preprocess_for_embedding(graph: &mut Graph) -> Result<(), Report<PlanarityError>> {
    if graph.dfs_done {
        return Ok(());
    }

    let n = graph.vertex_count();
    let stack_capacity = 2 * graph.arc_capacity() + 2;
    let mut stack = IntStack::with_capacity(stack_capacity);
    let mut dfi: u32 = 0;

    for i in 0..n {
        let root = VertexId::new(i);
        if graph.dfs_visited(root) {
            continue;
        }

        stack
            .push2(NIL, NIL)
            .map_err(|_| report!(PlanarityError::StackExhausted))?;

        while let Some((uparent_raw, e_raw)) = stack.pop2() {
            let (uparent, e) = if uparent_raw == NIL {
                (None, None)
            } else {
                (Some(VertexId::new(uparent_raw as usize)), Some(ArcId::from_raw(e_raw)))
            };

            let u = match e {
                None => root,
                Some(arc) => graph.neighbor(arc).underlying(),
            };

            if !graph.dfs_visited(u) {
                graph.mark_dfs_visited(u);
                graph.vertex_mut(u).dfi = dfi;
                trace!(vertex = u.index(), dfi, parent = ?uparent.map(VertexId::index), "dfs discover");
                dfi += 1;
                graph.vertex_mut(u).parent = uparent.unwrap_or(VertexId::NIL);

                // The arc through which `u` was just discovered is excluded
                // from the generic scan below: it is already typed
                // Child/Parent, and its twin (owned by `u`, pointing back at
                // `uparent`) would otherwise be misread as a back edge to an
                // already-visited neighbor.
                let skip = e.map(|arc| {
                    graph.set_arc_type(arc, ArcType::Child);
                    graph.set_arc_type(arc.twin(), ArcType::Parent);
                    // Child arcs are gathered at the front of the parent's
                    // ring (spec.md §3's ring-partition invariant).
                    graph.move_arc_to_first(arc);
                    arc.twin()
                });

                let arcs: Vec<ArcId> = graph.iterate(NodeRef::Vertex(u)).collect();
                for arc in arcs {
                    if Some(arc) == skip {
                        continue;
                    }
                    let w = graph.neighbor(arc).underlying();
                    if !graph.dfs_visited(w) {
                        // Tree-edge candidate, deepest-discovered-first
                        // (LIFO), matching the source's single forward scan
                        // over `u`'s ring.
                        stack
                            .push2(u.index() as u32, arc.raw())
                            .map_err(|_| report!(PlanarityError::StackExhausted))?;
                    } else {
                        // `w` is already visited and isn't the arc we came
                        // in on: it must be an ancestor of `u` (see the
                        // module header). `arc` (owned by the descendant
                        // `u`) is the BACK half; its twin (owned by the
                        // ancestor `w`) is the FORWARD half.
                        let fwd = arc.twin();
                        graph.set_arc_type(arc, ArcType::Back);
                        graph.set_arc_type(fwd, ArcType::Forward);
                        // Forward arcs are gathered at the tail of their
                        // owner's ring.
                        graph.move_arc_to_last(fwd);
                        // Recorded on the owner (the ancestor) for Walkup to
                        // scan; `crate::modes::create_fwd_arc_lists`
                        // re-sorts this by descendant DFI for K3,3-search
                        // mode.
                        graph.fwd_arc_push_back(w, fwd);
                    }
                }
            }
            // Else: `u` was already visited by the time this stack entry
            // popped. Its discovery-time ring scan (above, run when `u` was
            // first reached, possibly via a different branch) already
            // classified this edge from the other end; nothing left to do.
        }
    }

    compute_lowpoints(graph);
    graph.dfs_done = true;
    Ok(())
}

/// Computes `leastAncestor(v) = min DFI among v's BACK-arc neighbors` and
/// `lowpoint(v) = min(leastAncestor(v), min lowpoint(child))` for every
/// vertex, in reverse-DFI (post-)order so every child's lowpoint is already
/// known when its parent is processed.
fn compute_lowpoints(graph: &mut Graph) {
    let n = graph.vertex_count();
    let mut by_dfi = vec![VertexId::NIL; n];
    for i in 0..n {
        let v = VertexId::new(i);
        let d = graph.vertex(v).dfi;
        if d != NIL {
            by_dfi[d as usize] = v;
        }
    }

    for dfi in (0..n).rev() {
        let v = by_dfi[dfi];
        if v.is_nil() {
            continue;
        }
        let mut least_ancestor = NIL;
        for arc in graph.iterate(NodeRef::Vertex(v)).collect::<Vec<_>>() {
            if graph.arc_type(arc) == ArcType::Back {
                let w = graph.neighbor(arc).underlying();
                let wd = graph.vertex(w).dfi;
                if wd < least_ancestor {
                    least_ancestor = wd;
                }
            }
        }
        let mut lowpoint = least_ancestor;
        for arc in graph.iterate(NodeRef::Vertex(v)).collect::<Vec<_>>() {
            if graph.arc_type(arc) == ArcType::Child {
                let c = graph.neighbor(arc).underlying();
                let cl = graph.vertex(c).lowpoint;
                if cl < lowpoint {
                    lowpoint = cl;
                }
            }
        }
        graph.vertex_mut(v).least_ancestor = least_ancestor;
        graph.vertex_mut(v).lowpoint = lowpoint;
    }
}
