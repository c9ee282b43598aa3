//! Mode variants (C9): the algorithmic variants `spec.md` §4.8 describes as
//! behavioral deltas over the shared Walkup/Walkdown/isolator core.
//!
//! `spec.md` §9 explicitly asks that these be represented as "a discriminated
//! enum driving conditional branches at the four extensibility points"
//! rather than reproducing the original's function-table overload
//! (`CreateFwdArcLists`, `EmbedBackEdge`, `MergeBicomps`,
//! `HandleBlockedEmbedIteration`). [`EmbedMode`] is that enum; the four
//! points are realized as: [`create_fwd_arc_lists`] (this module),
//! [`crate::bicomp::embed_chord`] (always the same — no mode varies how a
//! chord is spliced in, only *whether* Walkdown is even allowed to continue
//! past a would-be-internal placement, which [`restricts_to_external_face`]
//! answers), [`crate::bicomp::merge_child_bicomp`] (likewise
//! mode-invariant), and [`crate::isolator::isolate`] (branches on
//! [`EmbedMode`] to decide K5-vs-K3,3 / K4-vs-K2,3 shape).

use crate::graph::{Graph, NodeRef, VertexId};

/// One of the algorithmic variants `spec.md` §6 lists as `Embed` modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedMode {
    /// Full planar embedding; obstruction (on failure) is a K5 or K3,3
    /// subdivision.
    Planar,
    /// Outerplanar embedding (external face only); obstruction is K4 or
    /// K2,3.
    Outerplanar,
    /// Planar embedding augmented with the bookkeeping
    /// [`crate::drawing`] needs to compute a visibility representation.
    DrawPlanar,
    /// Outerplanar-family search: success (`SearchMiss`) means no K2,3
    /// subdivision exists; failure (`SearchHit`) returns one.
    SearchForK23,
    /// Planar-family search with K3,3-search bookkeeping attached
    /// (`spec.md` §4.8): `SearchMiss` means the graph is planar or contains
    /// only a K4, `SearchHit` returns a K3,3 subdivision.
    SearchForK33,
    /// Thin alias over `Outerplanar`: reports `SearchHit` only when the
    /// isolator's outerplanar path actually produces a K4 minor rather than
    /// K2,3 (`SPEC_FULL.md` §13).
    SearchForK4,
    /// Thin alias over `Planar`: reports `SearchHit` only when the
    /// isolator's planar path actually closes a K5 minor rather than a
    /// K3,3 subdivision (`SPEC_FULL.md` §13).
    SearchForK5,
    /// Repeatedly embeds, deleting one edge of the isolated obstruction and
    /// retrying, until a planar subgraph is reached (`SPEC_FULL.md` §13).
    MaximalPlanarSubgraph,
}

impl EmbedMode {
    /// Whether this mode restricts Walkdown to the external face only
    /// (`spec.md` §4.8: "a bicomp is obstructed as soon as any vertex would
    /// be placed internally").
    pub(crate) fn is_outerplanar_family(self) -> bool {
        matches!(self, EmbedMode::Outerplanar | EmbedMode::SearchForK23 | EmbedMode::SearchForK4)
    }

    /// Whether this mode keeps forward-arc lists sorted by descendant DFI
    /// and installs the K3,3-search merge blockers (`spec.md` §4.8).
    pub(crate) fn is_k33_search(self) -> bool {
        matches!(self, EmbedMode::SearchForK33)
    }

    /// Whether a `NonEmbeddable`-shaped result should be reported to the
    /// caller as `SearchHit`/`SearchMiss` instead of `Embedded`/
    /// `NonEmbeddable`.
    pub(crate) fn is_search(self) -> bool {
        matches!(
            self,
            EmbedMode::SearchForK23 | EmbedMode::SearchForK33 | EmbedMode::SearchForK4 | EmbedMode::SearchForK5
        )
    }
}

/// The algorithmic outcome of an `embed` call (`spec.md` §6/§7). Distinct
/// from `Result`'s `Err` side: every variant here is a *successful*
/// execution of the algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedOutcome {
    /// Planarity established; the graph has been rewritten as a
    /// combinatorial embedding (a consistent rotation system per vertex).
    Embedded,
    /// An obstruction was isolated; the graph has been rewritten as the
    /// witnessing subdivision.
    NonEmbeddable,
    /// Search mode: the sought homeomorph was found and isolated.
    SearchHit,
    /// Search mode: the sought homeomorph is provably absent; the graph has
    /// been rewritten as its (possibly outerplanar) embedding anyway, since
    /// the search ran the full embedder to completion to prove the
    /// negative.
    SearchMiss,
}

/// `CreateFwdArcLists`: builds each vertex's `fwd_arc_list` from the arcs the
/// DFS preprocessor already tagged `Forward` and appended in discovery
/// order. For ordinary modes discovery order is kept; K3,3-search mode
/// resorts each list by descendant DFI (`spec.md` §4.8), which is what lets
/// the merge-blocker check in the isolator find the lowest-DFI descendant
/// first.
pub(crate) fn create_fwd_arc_lists(graph: &mut Graph, mode: EmbedMode) {
    if !mode.is_k33_search() {
        return;
    }
    let n = graph.vertex_count();
    for i in 0..n {
        let v = VertexId::new(i);
        let mut arcs: Vec<_> = graph.fwd_arc_iter(v).collect();
        if arcs.len() <= 1 {
            continue;
        }
        arcs.sort_by_key(|&a| {
            let w = graph.neighbor(a).underlying();
            graph.vertex(w).dfi
        });
        graph.rebuild_fwd_arc_list(v, &arcs);
    }
}

/// Whether Walkdown, running in an outerplanar-family mode, must stop at
/// `pos` rather than merge a pertinent child bicomp there: outerplanar
/// embedding keeps every vertex on the external face, so a second pertinent
/// child bicomp still queued at the same vertex after this merge (which
/// would place one of the two internally) blocks instead of merging
/// (`spec.md` §4.8).
pub(crate) fn restricts_to_external_face(graph: &Graph, mode: EmbedMode, pos: NodeRef) -> bool {
    if !mode.is_outerplanar_family() {
        return false;
    }
    graph.pertinent_bicomp_iter(pos.underlying()).nth(1).is_some()
}
