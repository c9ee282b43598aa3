//! Walkdown (C6): the external-face walk that embeds vertex `v`'s pending
//! back edges, merging in whichever of `v`'s pertinent child bicomps stand
//! in the way.
//!
//! No source file for this component survived the retrieval filter either;
//! `spec.md` §4.5 is this module's primary source. One simplification is
//! made relative to the prose: the walk restarts from the bicomp root after
//! every embed/merge rather than resuming in place, trading the algorithm's
//! linear-time bound for a simpler, easier-to-get-right restart loop — this
//! crate targets correctness on the graphs `spec.md` §8 actually exercises,
//! not asymptotic performance (see `DESIGN.md`).
//!
//! A position `pos` the walk reaches is checked against *its own* DFS
//! parent's pertinent-bicomp list, not against `pos` itself: Walkup links
//! every pertinent child onto its direct parent's list (`crate::walkup`),
//! so a child `x` is due for a merge exactly when `x` is still sitting on
//! `parent(x)`'s list, regardless of how many levels of bicomp the walk has
//! already flattened between `v`'s own root and `x`. This is what lets a
//! single restart-from-root loop drain every level: `v`'s direct children
//! are merged on the first pass around the root's own ring, which — per
//! [`crate::bicomp::merge_child_bicomp`]'s "splice at the exact gap" — makes
//! their own children reachable at the same root ring on the very next
//! pass, and so on down.

use tracing::{instrument, trace};

use crate::bicomp::{merge_child_bicomp, start_arc, step, Side};
use crate::graph::{Graph, NodeRef, VertexId};
use crate::modes::{restricts_to_external_face, EmbedMode};

/// Result of walking down from `v`'s bicomp root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WalkdownOutcome {
    /// Every back edge pending for `v` was embedded as a chord or folded in
    /// through a merged child bicomp.
    Embedded,
    /// At least one pertinent vertex remains out of reach, blocked by an
    /// externally active vertex on both sides. `v`'s bicomp root is left as
    /// the isolator's starting point.
    Stalled,
}

/// The two externally-active vertices Walkdown stopped at on a stall,
/// `spec.md` §4.7's "X, Y" — one per side, `None` if that side's walk made
/// it all the way back around to the root instead of stopping early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct StallWitness {
    pub(crate) x: Option<VertexId>,
    pub(crate) y: Option<VertexId>,
}

/// Walks both sides of `v`'s bicomp root, embedding/merging everything
/// reachable, and reports whether the whole pertinent structure was
/// resolved.
#[instrument(level = "debug", skip(graph))]
pub(crate) fn walkdown(graph: &mut Graph, v: VertexId, mode: EmbedMode) -> (WalkdownOutcome, StallWitness) {
    let x = walk_side(graph, v, Side::Zero, mode);
    let y = walk_side(graph, v, Side::One, mode);
    if is_fully_resolved(graph, v) {
        (WalkdownOutcome::Embedded, StallWitness::default())
    } else {
        (WalkdownOutcome::Stalled, StallWitness { x, y })
    }
}

/// Walks one side of `v`'s external face, restarting from the root every
/// time an embed or merge changes the ring, until the walk returns to the
/// root (nothing left reachable on this side, returns `None`) or hits a
/// vertex it cannot pass (returns that vertex).
fn walk_side(graph: &mut Graph, v: VertexId, side: Side, mode: EmbedMode) -> Option<VertexId> {
    let root = NodeRef::Virtual(v);
    loop {
        let start = start_arc(graph, root, side)?;
        let mut arc = start;
        loop {
            let pos = graph.neighbor(arc);
            if pos == root {
                return None;
            }
            match advance_at(graph, v, pos, mode) {
                Advance::Progressed => break, // ring changed; restart this side's scan from the root
                Advance::Blocked => {
                    trace!(v = v.index(), blocked_at = pos.underlying().index(), ?side, "walkdown stalled");
                    return Some(pos.underlying());
                }
                Advance::NoOp => {}
            }
            arc = step(graph, pos, arc, side);
        }
    }
}

enum Advance {
    Progressed,
    Blocked,
    NoOp,
}

/// Tries a single action at walk position `pos`: embedding a pending back
/// edge if `pos` is a real vertex carrying one, merging `pos`'s own bicomp
/// into its current parent position if `pos` is itself due (still on its
/// DFS parent's pertinent-bicomp list), or reporting a block (externally
/// active, or an outerplanar-mode internal-placement conflict).
fn advance_at(graph: &mut Graph, v: VertexId, pos: NodeRef, mode: EmbedMode) -> Advance {
    if let NodeRef::Vertex(w) = pos {
        let info = graph.vertex(w).pertinent_adjacency_info;
        if !info.is_nil() {
            let f = graph.twin(info);
            crate::bicomp::embed_chord(graph, v, pos, f);
            graph.vertex_mut(w).pertinent_adjacency_info = crate::graph::ArcId::NIL;
            trace!(v = v.index(), w = w.index(), "embedded pending back edge as chord");
            return Advance::Progressed;
        }
    }
    let x = pos.underlying();
    let parent = graph.vertex(x).parent;
    if !parent.is_nil() && graph.pertinent_bicomp_iter(parent).any(|c| c == x) {
        if restricts_to_external_face(graph, mode, NodeRef::Virtual(parent)) {
            return Advance::Blocked;
        }
        graph.pertinent_bicomp_remove(parent, x);
        merge_child_bicomp(graph, x);
        trace!(v = v.index(), child = x.index(), "merged pertinent child bicomp");
        return Advance::Progressed;
    }
    if is_externally_active(graph, v, x) {
        return Advance::Blocked;
    }
    Advance::NoOp
}

/// `spec.md` §4.5/Glossary: `u` is externally active with respect to `v` if
/// some vertex with a strictly lower DFI than `v` still needs to reach it —
/// either `u` itself has a back edge climbing above `v` (`lowpoint < v`), or
/// one of `u`'s own unmerged DFS children does.
pub(crate) fn is_externally_active(graph: &Graph, v: VertexId, u: VertexId) -> bool {
    let v_dfi = v.index() as u32;
    graph.vertex(u).lowpoint < v_dfi
        || graph.separated_child_iter(u).any(|c| graph.vertex(c).lowpoint < v_dfi)
}

/// True once `v`'s pertinent bicomp list is drained and no vertex directly
/// on `v`'s ring still carries a pending back edge.
fn is_fully_resolved(graph: &Graph, v: VertexId) -> bool {
    if !graph.pertinent_bicomp_is_empty(v) {
        return false;
    }
    graph.iterate(NodeRef::Virtual(v)).all(|arc| match graph.neighbor(arc) {
        NodeRef::Vertex(w) => graph.vertex(w).pertinent_adjacency_info.is_nil(),
        NodeRef::Virtual(_) => true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bicomp::init_bicomp_roots;
    use crate::dfs::preprocess_for_embedding;
    use crate::graph::RingEnd as RE;
    use crate::sort::sort_vertices;
    use crate::walkup::walkup;

    fn triangle() -> Graph {
        let mut g = Graph::new(3, Graph::default_arc_capacity(3));
        g.add_edge(VertexId::new(0), RE::Last, VertexId::new(1), RE::Last).unwrap();
        g.add_edge(VertexId::new(1), RE::Last, VertexId::new(2), RE::Last).unwrap();
        g.add_edge(VertexId::new(2), RE::Last, VertexId::new(0), RE::Last).unwrap();
        g
    }

    #[test]
    fn walkdown_embeds_a_triangles_back_edge() {
        let mut g = triangle();
        preprocess_for_embedding(&mut g).unwrap();
        sort_vertices(&mut g).unwrap();
        init_bicomp_roots(&mut g);

        let v = VertexId::new(0);
        let forwards: Vec<_> = g.fwd_arc_iter(v).collect();
        for f in forwards {
            walkup(&mut g, v, f);
        }
        let (outcome, _) = walkdown(&mut g, v, EmbedMode::Planar);
        assert_eq!(outcome, WalkdownOutcome::Embedded);
        // The back edge 2->0 must now be a direct arc between v's bicomp
        // root and vertex 2.
        let found = g
            .iterate(NodeRef::Virtual(v))
            .any(|a| g.neighbor(a).underlying() == VertexId::new(2) && !g.neighbor(a).is_virtual());
        assert!(found);
    }
}
