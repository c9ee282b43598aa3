//! Walkup (C5): marks the bicomp roots pertinent to the vertex currently
//! being processed.
//!
//! No source file for this component survived the retrieval filter; `spec.md`
//! §4.4 is this module's primary source. The "two-finger external-face walk"
//! the prose describes is realized here as a plain ascent through DFS parent
//! pointers rather than a literal face walk: every tree edge was redirected,
//! at both ends, into virtual-root space by
//! [`crate::bicomp::init_bicomp_roots`], so the bicomp a vertex's parent-arc
//! leads to is always exactly the bicomp rooted at that parent's virtual
//! copy, and the ascent path coincides with the DFS-tree path. The
//! short-circuiting `spec.md` asks for ("a per-iteration visitation mark
//! equal to v") is kept exactly: [`crate::graph::VirtualVertex::visited`]
//! records, for the bicomp root of each DFS child touched during vertex v's
//! processing, that it has already been linked onto its parent's
//! `pertinentBicompList` this round, so a later back edge whose ascent
//! re-enters already-marked territory stops immediately instead of
//! re-walking (and re-linking, which the underlying list arena forbids) it.

use tracing::trace;

use crate::graph::{ArcId, Graph, VertexId};

/// Processes one of `v`'s pending forward arcs (`spec.md` §4.4's "back edge
/// (v → w)"): `f` is owned by `v` and points at the descendant `w` that owns
/// the matching BACK arc. Records `w`'s pending back edge so
/// [`crate::walkdown::walkdown`] can find it, then ascends the DFS-tree path
/// from `w` up to (but not including) `v`'s own bicomp, linking each DFS
/// child on that path onto its parent's `pertinentBicompList` the first time
/// it is reached this round.
pub(crate) fn walkup(graph: &mut Graph, v: VertexId, f: ArcId) {
    let v_stamp = v.index() as u32;
    let w = graph.neighbor(f).underlying();
    let b = graph.twin(f);
    trace!(v = v.index(), w = w.index(), "walkup");

    graph.vertex_mut(w).pertinent_adjacency_info = b;
    graph.vertex_mut(w).visited = v_stamp;

    let mut x = w;
    loop {
        let parent = graph.vertex(x).parent;
        if parent.is_nil() {
            break;
        }
        if graph.virtual_vertex(x).visited == v_stamp {
            // `x`'s bicomp root, and everything above it up to v, was already
            // linked during an earlier back edge's ascent this round.
            break;
        }
        graph.virtual_vertex_mut(x).visited = v_stamp;
        graph.pertinent_bicomp_push_back(parent, x);
        if parent == v {
            break;
        }
        x = parent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bicomp::init_bicomp_roots;
    use crate::dfs::preprocess_for_embedding;
    use crate::graph::RingEnd;
    use crate::sort::sort_vertices;

    /// Star-ish tree 0-1-2 plus a back edge 2->0: after sort-by-DFI, vertex
    /// 0 is the root, 1 its child, 2 the grandchild with a back edge to 0.
    fn rooted_back_edge() -> (Graph, VertexId, ArcId) {
        let mut g = Graph::new(3, Graph::default_arc_capacity(3));
        g.add_edge(VertexId::new(0), RingEnd::Last, VertexId::new(1), RingEnd::Last).unwrap();
        g.add_edge(VertexId::new(1), RingEnd::Last, VertexId::new(2), RingEnd::Last).unwrap();
        g.add_edge(VertexId::new(2), RingEnd::Last, VertexId::new(0), RingEnd::Last).unwrap();
        preprocess_for_embedding(&mut g).unwrap();
        sort_vertices(&mut g).unwrap();
        init_bicomp_roots(&mut g);
        let v = VertexId::new(0);
        let f = graph_forward_arc(&g, v);
        (g, v, f)
    }

    fn graph_forward_arc(g: &Graph, v: VertexId) -> ArcId {
        g.fwd_arc_iter(v).next().expect("vertex 0 has a pending forward arc to vertex 2")
    }

    #[test]
    fn walkup_marks_descendant_and_links_direct_child() {
        let (mut g, v, f) = rooted_back_edge();
        let w = g.neighbor(f).underlying();
        walkup(&mut g, v, f);
        assert_eq!(g.vertex(w).pertinent_adjacency_info, g.twin(f));
        // vertex 1 (v's only DFS child, and w's ancestor) must now be linked
        // onto v's pertinentBicompList.
        let linked: Vec<_> = g.pertinent_bicomp_iter(v).collect();
        assert_eq!(linked, vec![VertexId::new(1)]);
    }

    #[test]
    fn second_walkup_through_same_path_does_not_relink() {
        let (mut g, v, f) = rooted_back_edge();
        walkup(&mut g, v, f);
        // Re-running walkup for the same forward arc must not attempt a
        // second link of vertex 1 onto v's list (which would panic the
        // underlying arena's "not already linked" expectation).
        walkup(&mut g, v, f);
        let linked: Vec<_> = g.pertinent_bicomp_iter(v).collect();
        assert_eq!(linked, vec![VertexId::new(1)]);
    }
}
