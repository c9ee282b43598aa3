//! Sort-by-DFI (C4): the self-inverse toggle between original-index order
//! and DFI order.
//!
//! Grounded on `spec.md` §4.3 and the open question in §9 about
//! `sortedByDFI`: this module keeps an explicit flag on [`Graph`] rather
//! than inferring the ordering from vertex contents, and every operation
//! that needs one particular order (`embed`) checks the flag instead of
//! guessing.

use error_stack::{report, Report};
use tracing::instrument;

use crate::error::PlanarityError;
use crate::graph::{ArcType, Graph, NodeRef, VertexId};

/// Toggles vertex numbering between original-label order and DFI order.
/// Self-inverse: calling it twice in a row restores the original layout
/// bit-for-bit (`spec.md` §8's round-trip law).
#[instrument(level = "debug", skip_all)]
pub fn sort_vertices(graph: &mut Graph) -> Result<(), Report<PlanarityError>> {
    let n = graph.vertex_count();
    let mut perm = vec![0u32; n];

    if !graph.sorted_by_dfi {
        for i in 0..n {
            let v = VertexId::new(i);
            let dfi = graph.vertex(v).dfi;
            if dfi == u32::MAX {
                return Err(report!(PlanarityError::BrokenInvariant(
                    "sort_vertices called before DFS assigned a DFI"
                )));
            }
            perm[i] = dfi;
        }
    } else {
        for i in 0..n {
            perm[i] = graph.vertex(VertexId::new(i)).label;
        }
    }

    permute(graph, &perm);
    graph.sorted_by_dfi = !graph.sorted_by_dfi;
    Ok(())
}

/// Applies `perm` (old array position -> new array position) to the vertex
/// and virtual-vertex arrays and remaps every arc's `neighbor` field and
/// every vertex's `parent` field through it. Ring pointers (`first_arc`/
/// `last_arc`) live inside the moved records themselves and need no
/// separate remap.
fn permute(graph: &mut Graph, perm: &[u32]) {
    let n = perm.len();

    // Remap every arc's neighbor field in place; real vertices are raw ids
    // in [0, n), virtual vertices (root copies) in [n, 2n).
    for i in 0..n {
        for arc in graph.iterate(NodeRef::Vertex(VertexId::new(i))).collect::<Vec<_>>() {
            remap_arc_neighbor(graph, arc, perm, n);
        }
        for arc in graph.iterate(NodeRef::Virtual(VertexId::new(i))).collect::<Vec<_>>() {
            remap_arc_neighbor(graph, arc, perm, n);
        }
    }

    graph.permute_vertex_records(perm);

    // `parent` is a VertexId and must be remapped through the same
    // permutation once records have moved to their new slots.
    for i in 0..n {
        let v = VertexId::new(i);
        let old_parent = graph.vertex(v).parent;
        if !old_parent.is_nil() {
            let new_parent = VertexId::new(perm[old_parent.index()] as usize);
            graph.vertex_mut(v).parent = new_parent;
        }
    }

    // Pertinent/separated-child lists are only populated during an
    // in-progress embedding; sort_vertices is only ever called before
    // embedding starts or after it has fully finished, so these are empty.
    // Clearing them defensively keeps a misuse from producing stale ids
    // instead of failing loudly later.
    for i in 0..n {
        let v = VertexId::new(i);
        graph.separated_child_clear(v);
        while graph.pertinent_bicomp_pop_front(v).is_some() {}
    }
}

fn remap_arc_neighbor(graph: &mut Graph, arc: crate::graph::ArcId, perm: &[u32], n: usize) {
    let neighbor = graph.neighbor(arc);
    let (old_child, is_virtual) = match neighbor {
        NodeRef::Vertex(v) => (v, false),
        NodeRef::Virtual(v) => (v, true),
    };
    let new_child = VertexId::new(perm[old_child.index()] as usize);
    let new_ref = if is_virtual { NodeRef::Virtual(new_child) } else { NodeRef::Vertex(new_child) };
    graph.set_arc_neighbor(arc, new_ref, n);
    // Arc typing (Child/Parent/Forward/Back) is orientation-relative, not
    // index-relative, and needs no change.
    let _ = ArcType::Unknown;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dfs::preprocess_for_embedding;
    use crate::graph::RingEnd;

    fn triangle() -> Graph {
        let mut g = Graph::new(3, Graph::default_arc_capacity(3));
        g.add_edge(VertexId::new(0), RingEnd::Last, VertexId::new(1), RingEnd::Last).unwrap();
        g.add_edge(VertexId::new(1), RingEnd::Last, VertexId::new(2), RingEnd::Last).unwrap();
        g.add_edge(VertexId::new(2), RingEnd::Last, VertexId::new(0), RingEnd::Last).unwrap();
        g
    }

    #[test]
    fn sort_is_self_inverse() {
        let mut g = triangle();
        preprocess_for_embedding(&mut g).unwrap();
        let labels_before: Vec<u32> = (0..3).map(|i| g.vertex(VertexId::new(i)).label).collect();
        sort_vertices(&mut g).unwrap();
        assert!(g.sorted_by_dfi);
        sort_vertices(&mut g).unwrap();
        assert!(!g.sorted_by_dfi);
        let labels_after: Vec<u32> = (0..3).map(|i| g.vertex(VertexId::new(i)).label).collect();
        assert_eq!(labels_before, labels_after);
    }

    #[test]
    fn sort_puts_index_equal_to_dfi() {
        let mut g = triangle();
        preprocess_for_embedding(&mut g).unwrap();
        sort_vertices(&mut g).unwrap();
        for i in 0..3 {
            assert_eq!(g.vertex(VertexId::new(i)).dfi, i as u32);
        }
    }
}
