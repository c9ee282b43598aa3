//! The graph store: vertices, virtual vertices, arcs, and the adjacency-ring
//! operations the rest of the engine is built from.
//!
//! Vertex and arc ids are newtypes over `u32` in the style of an index-based
//! node/edge handle, with a per-node doubly linked adjacency ring instead of
//! a flat edge list. Arcs are allocated in twinned pairs and the twin of `a`
//! is always `a ^ 1`, so no separate owner-lookup table is needed.

use error_stack::{report, Report};
use tracing::instrument;

use crate::error::PlanarityError;
use crate::stack::{IntStack, ListCollection, NIL as LIST_NIL};

/// Sentinel raw id, matching the teacher's `NodeIndex::end()` /
/// `EdgeIndex::end()` "no such index" convention.
const NIL: u32 = u32::MAX;

/// Identifier for a real vertex, `v ∈ [0, N)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(u32);

impl VertexId {
    pub const NIL: VertexId = VertexId(NIL);

    #[inline]
    pub fn new(index: usize) -> Self {
        VertexId(index as u32)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn is_nil(self) -> bool {
        self.0 == NIL
    }

    #[inline]
    pub(crate) fn raw(self) -> u32 {
        self.0
    }
}

/// Identifier for an arc (half-edge) in the arc pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArcId(u32);

impl ArcId {
    pub const NIL: ArcId = ArcId(NIL);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn is_nil(self) -> bool {
        self.0 == NIL
    }

    /// The twin of this arc: arcs are allocated in adjacent pairs, so the
    /// twin is found by flipping the low bit (`original_source/c/graph.h`,
    /// `gp_GetTwinArc`).
    #[inline]
    pub fn twin(self) -> ArcId {
        ArcId(self.0 ^ 1)
    }

    #[inline]
    pub(crate) fn from_raw(x: u32) -> Self {
        ArcId(x)
    }

    #[inline]
    pub(crate) fn raw(self) -> u32 {
        self.0
    }
}

/// A node in the combined `[0, 2N)` index space: a real vertex in `[0, N)`
/// or the root copy ("virtual vertex") of DFS child `c` at index `N + c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef {
    Vertex(VertexId),
    Virtual(VertexId),
}

impl NodeRef {
    #[inline]
    fn to_raw(self, n: usize) -> u32 {
        match self {
            NodeRef::Vertex(v) => v.0,
            NodeRef::Virtual(v) => n as u32 + v.0,
        }
    }

    #[inline]
    fn from_raw(raw: u32, n: usize) -> NodeRef {
        if (raw as usize) < n {
            NodeRef::Vertex(VertexId(raw))
        } else {
            NodeRef::Virtual(VertexId(raw - n as u32))
        }
    }

    pub fn is_virtual(self) -> bool {
        matches!(self, NodeRef::Virtual(_))
    }

    /// The real vertex this node represents: itself if real, or the DFS
    /// child a root copy stands in for.
    pub fn underlying(self) -> VertexId {
        match self {
            NodeRef::Vertex(v) | NodeRef::Virtual(v) => v,
        }
    }
}

/// Arc type classification assigned by the DFS preprocessor (C3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcType {
    Unknown,
    Child,
    Parent,
    Forward,
    Back,
    RandomTree,
}

/// Direction-flag bits, preserved on arcs as a digraph-IO convenience; the
/// planarity algorithm itself always treats edges as undirected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectionFlags(u8);

impl DirectionFlags {
    pub const NONE: DirectionFlags = DirectionFlags(0);
    pub const IN_ONLY: DirectionFlags = DirectionFlags(1);
    pub const OUT_ONLY: DirectionFlags = DirectionFlags(2);

    pub fn contains(self, other: DirectionFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: DirectionFlags) {
        self.0 |= other.0;
    }
}

/// High/low role a vertex plays in the isolator's minor classification
/// (`spec.md` §3's `obstructionType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstructionRole {
    None,
    RootR,
    HighRx,
    LowRx,
    HighRy,
    LowRy,
    HighRw,
    LowRw,
}

impl Default for ObstructionRole {
    fn default() -> Self {
        ObstructionRole::None
    }
}

#[derive(Debug, Clone)]
pub struct Vertex {
    /// Original input label, preserved across `sort_vertices` toggles.
    pub label: u32,
    pub dfi: u32,
    pub parent: VertexId,
    pub lowpoint: u32,
    pub least_ancestor: u32,
    pub(crate) first_arc: ArcId,
    pub(crate) last_arc: ArcId,
    /// Pending back edge from the current root into this vertex's subtree,
    /// set by Walkup, consumed by Walkdown.
    pub pertinent_adjacency_info: ArcId,
    /// Ordered list of root copies of pertinent DFS children, keyed by this
    /// vertex's own id in the graph's `pertinent_bicomp_lists` arena.
    pub(crate) pertinent_bicomp_list: u32,
    /// DFS children ordered by lowpoint, keyed likewise.
    pub(crate) separated_dfs_child_list: u32,
    /// Forward arcs to unvisited descendants, kept sorted by descendant DFI
    /// only in K3,3-search mode.
    pub(crate) fwd_arc_list: u32,
    /// Stamp-based visited mark: holds the DFI of the vertex whose
    /// Walkup/Walkdown pass last touched this vertex, so a fresh pass is
    /// recognized without an O(N) reset sweep.
    pub visited: u32,
    pub obstruction_role: ObstructionRole,
}

impl Vertex {
    fn new(label: u32) -> Self {
        Vertex {
            label,
            dfi: NIL,
            parent: VertexId::NIL,
            lowpoint: NIL,
            least_ancestor: NIL,
            first_arc: ArcId::NIL,
            last_arc: ArcId::NIL,
            pertinent_adjacency_info: ArcId::NIL,
            pertinent_bicomp_list: NIL,
            separated_dfs_child_list: NIL,
            fwd_arc_list: NIL,
            visited: NIL,
            obstruction_role: ObstructionRole::None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VirtualVertex {
    /// The DFS child this is a root copy for; also its index.
    pub dfs_child: VertexId,
    pub(crate) first_arc: ArcId,
    pub(crate) last_arc: ArcId,
    pub visited: u32,
}

#[derive(Debug, Clone, Copy)]
struct Arc {
    neighbor: u32,
    next: ArcId,
    prev: ArcId,
    arc_type: ArcType,
    direction: DirectionFlags,
    visited: bool,
}

impl Arc {
    fn empty() -> Self {
        Arc {
            neighbor: NIL,
            next: ArcId::NIL,
            prev: ArcId::NIL,
            arc_type: ArcType::Unknown,
            direction: DirectionFlags::NONE,
            visited: false,
        }
    }
}

/// Which end of a ring an arc is inserted at. `First` mirrors `link[0]`,
/// `Last` mirrors `link[1]`, matching the convention `spec.md` §9 asks
/// implementations to adopt and document for the external-face walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingEnd {
    First,
    Last,
}

/// The graph store. Owns every array the engine touches; see `spec.md` §3's
/// "Ownership & lifecycle" note — arcs are allocated from a fixed-capacity
/// pool sized at `init_graph`/`new` and never grown past it once a search
/// mode has attached (`spec.md` §9, §4.1).
#[derive(Debug, Clone)]
pub struct Graph {
    n: usize,
    arc_capacity: usize,
    next_free_arc: u32,
    vertices: Vec<Vertex>,
    virtual_vertices: Vec<VirtualVertex>,
    arcs: Vec<Arc>,
    hide_stack: IntStack,
    pub(crate) pertinent_bicomp_lists: ListCollection,
    pub(crate) separated_child_lists: ListCollection,
    pub(crate) fwd_arc_lists: ListCollection,
    pub(crate) sorted_by_dfi: bool,
    pub(crate) dfs_done: bool,
    pub(crate) extension_attached: bool,
}

impl Graph {
    /// Default arc capacity for a simple graph on `n` vertices: enough arcs
    /// for a maximal planar graph (`3n - 6` edges, or `n*(n-1)/2` for tiny
    /// `n`), doubled for the two arcs per edge, per `spec.md` §11's
    /// construction-time sizing rule.
    pub fn default_arc_capacity(n: usize) -> usize {
        if n < 3 {
            return n * (n.saturating_sub(1));
        }
        let max_edges = (3 * n).saturating_sub(6).max(n.saturating_sub(1));
        2 * max_edges
    }

    /// Allocates a new graph on `n` vertices with the given arc capacity
    /// (number of arcs, i.e. twice the number of edges it can hold).
    #[instrument(level = "debug", skip_all, fields(n, arc_capacity))]
    pub fn new(n: usize, arc_capacity: usize) -> Self {
        let stack_capacity = 2 * arc_capacity + 2;
        Graph {
            n,
            arc_capacity,
            next_free_arc: 0,
            vertices: (0..n).map(|i| Vertex::new(i as u32)).collect(),
            virtual_vertices: (0..n)
                .map(|i| VirtualVertex {
                    dfs_child: VertexId::new(i),
                    first_arc: ArcId::NIL,
                    last_arc: ArcId::NIL,
                    visited: NIL,
                })
                .collect(),
            arcs: vec![Arc::empty(); arc_capacity],
            hide_stack: IntStack::with_capacity(stack_capacity),
            pertinent_bicomp_lists: ListCollection::new(n),
            separated_child_lists: ListCollection::new(n),
            fwd_arc_lists: ListCollection::new(arc_capacity.max(1)),
            sorted_by_dfi: false,
            dfs_done: false,
            extension_attached: false,
        }
    }

    /// Resets all vertex/arc state while keeping the allocated arrays,
    /// matching `gp_ReinitializeGraph`'s "same order, fresh state" contract.
    pub fn reinitialize(&mut self) {
        let n = self.n;
        let arc_capacity = self.arc_capacity;
        *self = Graph::new(n, arc_capacity);
    }

    pub fn order(&self) -> usize {
        self.n
    }

    pub fn arc_capacity(&self) -> usize {
        self.arc_capacity
    }

    pub fn edge_count(&self) -> usize {
        self.next_free_arc as usize / 2
    }

    /// Grows the arc pool to hold at least `required` arcs. Fails once an
    /// extension mode's fixed structures have attached (`spec.md` §9).
    pub fn ensure_arc_capacity(&mut self, required: usize) -> Result<(), Report<PlanarityError>> {
        if required <= self.arc_capacity {
            return Ok(());
        }
        if self.extension_attached {
            return Err(report!(PlanarityError::ExtensionAttached));
        }
        self.arcs.resize(required, Arc::empty());
        self.fwd_arc_lists = ListCollection::new(required.max(1));
        self.hide_stack = IntStack::with_capacity(2 * required + 2);
        self.arc_capacity = required;
        Ok(())
    }

    fn check_vertex(&self, v: VertexId) -> Result<(), Report<PlanarityError>> {
        if v.index() >= self.n {
            return Err(report!(PlanarityError::VertexOutOfRange(v.0)));
        }
        Ok(())
    }

    // ---- raw node accessors (shared between Vertex and VirtualVertex) ----

    fn node_ring(&self, node: NodeRef) -> (ArcId, ArcId) {
        match node {
            NodeRef::Vertex(v) => (self.vertices[v.index()].first_arc, self.vertices[v.index()].last_arc),
            NodeRef::Virtual(v) => {
                let vv = &self.virtual_vertices[v.index()];
                (vv.first_arc, vv.last_arc)
            }
        }
    }

    fn set_node_ring(&mut self, node: NodeRef, first: ArcId, last: ArcId) {
        match node {
            NodeRef::Vertex(v) => {
                let vx = &mut self.vertices[v.index()];
                vx.first_arc = first;
                vx.last_arc = last;
            }
            NodeRef::Virtual(v) => {
                let vv = &mut self.virtual_vertices[v.index()];
                vv.first_arc = first;
                vv.last_arc = last;
            }
        }
    }

    pub fn vertex(&self, v: VertexId) -> &Vertex {
        &self.vertices[v.index()]
    }

    pub fn vertex_mut(&mut self, v: VertexId) -> &mut Vertex {
        &mut self.vertices[v.index()]
    }

    pub fn virtual_vertex(&self, v: VertexId) -> &VirtualVertex {
        &self.virtual_vertices[v.index()]
    }

    pub fn virtual_vertex_mut(&mut self, v: VertexId) -> &mut VirtualVertex {
        &mut self.virtual_vertices[v.index()]
    }

    pub fn vertex_count(&self) -> usize {
        self.n
    }

    /// Whether `v` has been discovered by the current DFS pass. The
    /// `visited` stamp is reused afterward by Walkup/Walkdown for a
    /// different purpose (see [`Vertex::visited`]); this accessor is only
    /// meaningful before `dfs_done` is set.
    pub(crate) fn dfs_visited(&self, v: VertexId) -> bool {
        self.vertices[v.index()].visited != NIL
    }

    pub(crate) fn mark_dfs_visited(&mut self, v: VertexId) {
        self.vertices[v.index()].visited = 0;
    }

    fn arc(&self, a: ArcId) -> &Arc {
        &self.arcs[a.index()]
    }

    fn arc_mut(&mut self, a: ArcId) -> &mut Arc {
        &mut self.arcs[a.index()]
    }

    pub fn arc_type(&self, a: ArcId) -> ArcType {
        self.arc(a).arc_type
    }

    pub fn set_arc_type(&mut self, a: ArcId, t: ArcType) {
        self.arc_mut(a).arc_type = t;
    }

    pub fn arc_direction(&self, a: ArcId) -> DirectionFlags {
        self.arc(a).direction
    }

    pub fn set_arc_direction(&mut self, a: ArcId, dir: DirectionFlags) {
        self.arc_mut(a).direction.insert(dir);
    }

    pub fn arc_visited(&self, a: ArcId) -> bool {
        self.arc(a).visited
    }

    pub fn set_arc_visited(&mut self, a: ArcId, v: bool) {
        self.arc_mut(a).visited = v;
    }

    /// The node this arc points at.
    pub fn neighbor(&self, a: ArcId) -> NodeRef {
        NodeRef::from_raw(self.arc(a).neighbor, self.n)
    }

    /// The node that owns this arc (`neighbor` of its twin, per the
    /// invariant in `spec.md` §3: "T(a) lives in w's ring and points back
    /// to the arc's owner").
    pub fn owner(&self, a: ArcId) -> NodeRef {
        self.neighbor(a.twin())
    }

    pub fn twin(&self, a: ArcId) -> ArcId {
        a.twin()
    }

    pub fn first_arc(&self, node: NodeRef) -> Option<ArcId> {
        let (f, _) = self.node_ring(node);
        (!f.is_nil()).then_some(f)
    }

    pub fn last_arc(&self, node: NodeRef) -> Option<ArcId> {
        let (_, l) = self.node_ring(node);
        (!l.is_nil()).then_some(l)
    }

    pub fn next_arc(&self, a: ArcId) -> Option<ArcId> {
        let n = self.arc(a).next;
        (!n.is_nil()).then_some(n)
    }

    pub fn prev_arc(&self, a: ArcId) -> Option<ArcId> {
        let p = self.arc(a).prev;
        (!p.is_nil()).then_some(p)
    }

    /// The next arc around `node`'s ring after `a`, wrapping from the last
    /// arc back to the first. Used by the external-face walk and by the
    /// integrity checker's face trace, both of which need a ring that
    /// closes up into cycles rather than the NIL-terminated straight-line
    /// order `iterate` exposes.
    pub fn ring_next(&self, node: NodeRef, a: ArcId) -> ArcId {
        match self.next_arc(a) {
            Some(n) => n,
            None => self.first_arc(node).expect("ring_next on an empty ring"),
        }
    }

    /// Symmetric counterpart of [`Graph::ring_next`].
    pub fn ring_prev(&self, node: NodeRef, a: ArcId) -> ArcId {
        match self.prev_arc(a) {
            Some(p) => p,
            None => self.last_arc(node).expect("ring_prev on an empty ring"),
        }
    }

    /// A lazy, non-restartable iterator over `node`'s ring in first-to-last
    /// order (`spec.md` §4.1's `iterate(v)`).
    pub fn iterate(&self, node: NodeRef) -> ArcIter<'_> {
        ArcIter { graph: self, cur: self.first_arc(node) }
    }

    pub fn degree(&self, node: NodeRef) -> usize {
        self.iterate(node).count()
    }

    // ---- mutation primitives ----

    fn alloc_arc_pair(&mut self) -> Result<(ArcId, ArcId), Report<PlanarityError>> {
        if self.next_free_arc as usize + 2 > self.arc_capacity {
            return Err(report!(PlanarityError::ArcCapacityExhausted));
        }
        let a = ArcId(self.next_free_arc);
        let t = ArcId(self.next_free_arc + 1);
        self.next_free_arc += 2;
        Ok((a, t))
    }

    fn insert_at(&mut self, owner: NodeRef, a: ArcId, end: RingEnd) {
        let (first, last) = self.node_ring(owner);
        match end {
            RingEnd::First => {
                self.arc_mut(a).prev = ArcId::NIL;
                self.arc_mut(a).next = first;
                if !first.is_nil() {
                    self.arc_mut(first).prev = a;
                }
                let new_last = if last.is_nil() { a } else { last };
                self.set_node_ring(owner, a, new_last);
            }
            RingEnd::Last => {
                self.arc_mut(a).next = ArcId::NIL;
                self.arc_mut(a).prev = last;
                if !last.is_nil() {
                    self.arc_mut(last).next = a;
                }
                let new_first = if first.is_nil() { a } else { first };
                self.set_node_ring(owner, new_first, a);
            }
        }
    }

    /// Permanently removes `a` from its owner's ring, fixing up neighbors'
    /// links and the owner's first/last pointers. Unlike [`Graph::hide_arc`]
    /// this does not remember how to restore `a`; used by `move_arc_to_*`
    /// (reinsert elsewhere) and by the isolator (delete for good).
    fn unlink(&mut self, a: ArcId) {
        let owner = self.owner(a);
        let prev = self.arc(a).prev;
        let next = self.arc(a).next;
        let (first, last) = self.node_ring(owner);
        let new_first = if first == a { next } else { first };
        let new_last = if last == a { prev } else { last };
        if !prev.is_nil() {
            self.arc_mut(prev).next = next;
        }
        if !next.is_nil() {
            self.arc_mut(next).prev = prev;
        }
        self.set_node_ring(owner, new_first, new_last);
        self.arc_mut(a).prev = ArcId::NIL;
        self.arc_mut(a).next = ArcId::NIL;
    }

    /// Adds an edge `(u, v)`, inserting the `u`-side arc at `link_u` and the
    /// `v`-side arc at `link_v` of their respective rings.
    pub fn add_edge(
        &mut self,
        u: VertexId,
        link_u: RingEnd,
        v: VertexId,
        link_v: RingEnd,
    ) -> Result<ArcId, Report<PlanarityError>> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        if u == v {
            return Err(report!(PlanarityError::LoopEdge(u.0)));
        }
        let (au, av) = self.alloc_arc_pair()?;
        self.arc_mut(au).neighbor = v.0;
        self.arc_mut(av).neighbor = u.0;
        self.insert_at(NodeRef::Vertex(u), au, link_u);
        self.insert_at(NodeRef::Vertex(v), av, link_v);
        Ok(au)
    }

    /// Connects a virtual vertex's ring to a real neighbor; used when
    /// splicing a child bicomp's root copy into its parent during merges.
    pub fn add_virtual_edge(
        &mut self,
        owner: NodeRef,
        link_owner: RingEnd,
        neighbor: VertexId,
        link_neighbor: RingEnd,
    ) -> Result<ArcId, Report<PlanarityError>> {
        let (a, t) = self.alloc_arc_pair()?;
        self.arc_mut(a).neighbor = neighbor.0;
        self.arc_mut(t).neighbor = owner.to_raw(self.n);
        self.insert_at(owner, a, link_owner);
        self.insert_at(NodeRef::Vertex(neighbor), t, link_neighbor);
        Ok(a)
    }

    pub fn move_arc_to_first(&mut self, a: ArcId) {
        let owner = self.owner(a);
        self.unlink(a);
        self.insert_at(owner, a, RingEnd::First);
    }

    pub fn move_arc_to_last(&mut self, a: ArcId) {
        let owner = self.owner(a);
        self.unlink(a);
        self.insert_at(owner, a, RingEnd::Last);
    }

    /// Detaches arc `a` and its twin from their rings without losing the
    /// information needed to put them back, pushing onto the hide stack.
    /// Classic toggle-delete: `a`'s own `prev`/`next` are left untouched so
    /// `restore_edge` can relink using them directly (the arc's neighbors
    /// are never themselves hidden out from under it while `a` stays
    /// hidden, since hides/restores nest in stack discipline).
    pub fn hide_edge(&mut self, a: ArcId) -> Result<(), Report<PlanarityError>> {
        let t = a.twin();
        self.detach_preserving_links(a);
        self.detach_preserving_links(t);
        self.hide_stack.push(a.0)?;
        Ok(())
    }

    fn detach_preserving_links(&mut self, a: ArcId) {
        let owner = self.owner(a);
        let prev = self.arc(a).prev;
        let next = self.arc(a).next;
        let (first, last) = self.node_ring(owner);
        let new_first = if first == a { next } else { first };
        let new_last = if last == a { prev } else { last };
        if !prev.is_nil() {
            self.arc_mut(prev).next = next;
        }
        if !next.is_nil() {
            self.arc_mut(next).prev = prev;
        }
        self.set_node_ring(owner, new_first, new_last);
    }

    /// Restores the most recently hidden edge, exactly undoing [`Graph::hide_edge`].
    pub fn restore_edge(&mut self) -> Option<ArcId> {
        let raw = self.hide_stack.pop()?;
        let a = ArcId(raw);
        let t = a.twin();
        self.reattach_preserving_links(t);
        self.reattach_preserving_links(a);
        Some(a)
    }

    fn reattach_preserving_links(&mut self, a: ArcId) {
        let owner = self.owner(a);
        let prev = self.arc(a).prev;
        let next = self.arc(a).next;
        let (first, last) = self.node_ring(owner);
        if prev.is_nil() {
            self.set_node_ring(owner, a, if last.is_nil() { a } else { last });
        } else {
            self.arc_mut(prev).next = a;
        }
        if next.is_nil() {
            let (first_now, _) = self.node_ring(owner);
            self.set_node_ring(owner, if first_now.is_nil() { a } else { first_now }, a);
        } else {
            self.arc_mut(next).prev = a;
        }
        let _ = first;
    }

    /// Permanently deletes an edge (both arcs), used by the isolator to
    /// reduce the graph down to the witnessing Kuratowski subdivision and
    /// by `MaximalPlanarSubgraph` to drop an offending edge and retry.
    pub fn delete_edge(&mut self, a: ArcId) {
        let t = a.twin();
        self.unlink(a);
        self.unlink(t);
    }

    pub fn hidden_edge_count(&self) -> usize {
        self.hide_stack.len()
    }

    /// Returns every original-edge arc as a `(u, v)` label pair in
    /// original-index order, one entry per edge (the lower-indexed arc of
    /// each twin pair). Used by callers wanting to snapshot the edge set
    /// before `embed` mutates the graph (`spec.md` §6's `DupGraph`/
    /// `CopyGraph`; `spec.md` §3's "clients needing the original must
    /// duplicate beforehand").
    pub fn edge_labels(&self) -> Vec<(u32, u32)> {
        let mut out = Vec::with_capacity(self.next_free_arc as usize / 2);
        let mut i = 0u32;
        while i < self.next_free_arc {
            let a = ArcId(i);
            if let (NodeRef::Vertex(u), NodeRef::Vertex(w)) = (self.owner(a), self.neighbor(a)) {
                out.push((self.vertices[u.index()].label, self.vertices[w.index()].label));
            }
            i += 2;
        }
        out
    }

    /// Deep-copies `src`'s full state into `self`, matching `gp_CopyGraph`'s
    /// "same order, different instance" contract. Fails if the two graphs
    /// were not built with the same vertex count.
    pub fn copy_from(&mut self, src: &Graph) -> Result<(), Report<PlanarityError>> {
        if self.n != src.n {
            return Err(report!(PlanarityError::OrderMismatch { expected: self.n as u32, found: src.n as u32 }));
        }
        *self = src.clone();
        Ok(())
    }

    /// Returns an independent deep copy of this graph (`spec.md` §6's
    /// `DupGraph`).
    pub fn duplicate(&self) -> Graph {
        self.clone()
    }

    /// Detaches `a` from its current owner's ring and re-links it at `end`
    /// of `new_owner`'s ring, without touching its `neighbor` field. Used
    /// by bicomp setup/merging to move a tree-edge arc (or a pending
    /// forward/back arc being embedded as a chord) from a real vertex's
    /// ring onto a virtual root's ring, or back again at join time.
    pub(crate) fn rehome_arc(&mut self, a: ArcId, new_owner: NodeRef, end: RingEnd) {
        self.unlink(a);
        self.insert_at(new_owner, a, end);
    }

    /// Links `a` into `owner`'s ring immediately after `anchor`, without
    /// touching `a`'s `neighbor` field. `anchor` must already be a member of
    /// `owner`'s ring.
    fn insert_after(&mut self, owner: NodeRef, anchor: ArcId, a: ArcId) {
        let next = self.arc(anchor).next;
        self.arc_mut(a).prev = anchor;
        self.arc_mut(a).next = next;
        self.arc_mut(anchor).next = a;
        if !next.is_nil() {
            self.arc_mut(next).prev = a;
        } else {
            let (first, _) = self.node_ring(owner);
            self.set_node_ring(owner, first, a);
        }
    }

    /// Detaches `a` from its current owner's ring and re-links it into
    /// `new_owner`'s ring immediately after `anchor`, without touching `a`'s
    /// `neighbor` field. Used by a Walkdown merge to splice a child bicomp's
    /// ring into the exact interior position the walk reached, in cyclic
    /// order, rather than always at an end.
    pub(crate) fn rehome_arc_after(&mut self, a: ArcId, new_owner: NodeRef, anchor: ArcId) {
        self.unlink(a);
        self.insert_after(new_owner, anchor, a);
    }
}

/// A lazy, non-restartable iterator over one node's adjacency ring.
pub struct ArcIter<'a> {
    graph: &'a Graph,
    cur: Option<ArcId>,
}

impl<'a> Iterator for ArcIter<'a> {
    type Item = ArcId;

    fn next(&mut self) -> Option<ArcId> {
        let cur = self.cur?;
        self.cur = self.graph.next_arc(cur);
        Some(cur)
    }
}

/// Lists keyed by vertex id, layered on the shared [`ListCollection`] arena.
/// Each vertex owns at most one entry per list kind at a time.
impl Graph {
    pub fn pertinent_bicomp_push_front(&mut self, owner: VertexId, child: VertexId) {
        self.pertinent_bicomp_lists.push_front(owner.index(), child.0);
    }

    pub fn pertinent_bicomp_push_back(&mut self, owner: VertexId, child: VertexId) {
        self.pertinent_bicomp_lists.push_back(owner.index(), child.0);
    }

    pub fn pertinent_bicomp_pop_front(&mut self, owner: VertexId) -> Option<VertexId> {
        self.pertinent_bicomp_lists.pop_front(owner.index()).map(VertexId)
    }

    pub fn pertinent_bicomp_is_empty(&self, owner: VertexId) -> bool {
        self.pertinent_bicomp_lists.is_empty(owner.index())
    }

    pub fn pertinent_bicomp_iter(&self, owner: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.pertinent_bicomp_lists.iter(owner.index()).map(VertexId)
    }

    pub fn separated_child_push_back(&mut self, owner: VertexId, child: VertexId) {
        self.separated_child_lists.push_back(owner.index(), child.0);
    }

    pub fn separated_child_iter(&self, owner: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.separated_child_lists.iter(owner.index()).map(VertexId)
    }

    pub fn separated_child_clear(&mut self, owner: VertexId) {
        self.separated_child_lists.clear_list(owner.index());
    }

    /// Drops `child` from `owner`'s separated-child list once it has been
    /// merged into a pertinent bicomp; a no-op if it is already off the
    /// list.
    pub fn separated_child_remove(&mut self, owner: VertexId, child: VertexId) {
        self.separated_child_lists.remove(owner.index(), child.0);
    }

    /// Drops `child` from `owner`'s pertinent-bicomp list once Walkdown has
    /// merged it in, wherever in the list it sits (not necessarily the
    /// front — Walkdown reaches children in ring order, which need not match
    /// the order Walkup linked them in).
    pub fn pertinent_bicomp_remove(&mut self, owner: VertexId, child: VertexId) {
        self.pertinent_bicomp_lists.remove(owner.index(), child.0);
    }

    pub fn fwd_arc_push_back(&mut self, owner: VertexId, arc: ArcId) {
        self.fwd_arc_lists.push_back(owner.index(), arc.0);
    }

    pub fn fwd_arc_iter(&self, owner: VertexId) -> impl Iterator<Item = ArcId> + '_ {
        self.fwd_arc_lists.iter(owner.index()).map(ArcId)
    }

    pub fn fwd_arc_is_empty(&self, owner: VertexId) -> bool {
        self.fwd_arc_lists.is_empty(owner.index())
    }

    /// Replaces `owner`'s entire `fwd_arc_list` with `ordered`, in the given
    /// order. Used by [`crate::modes::create_fwd_arc_lists`] to re-sort the
    /// list by descendant DFI for K3,3-search mode.
    pub(crate) fn rebuild_fwd_arc_list(&mut self, owner: VertexId, ordered: &[ArcId]) {
        while self.fwd_arc_lists.pop_front(owner.index()).is_some() {}
        for &a in ordered {
            self.fwd_arc_lists.push_back(owner.index(), a.0);
        }
    }
}

/// Support for [`crate::sort::sort_vertices`]: moving vertex/virtual-vertex
/// records between array slots and remapping arc endpoints accordingly.
impl Graph {
    /// Moves every `Vertex`/`VirtualVertex` record from its old array slot
    /// `i` to `perm[i]`, leaving arc contents untouched (ring pointers live
    /// inside the moved records and travel with them). Resets each virtual
    /// vertex's `dfs_child` to match its new slot, since that field is
    /// always equal to its own index by construction.
    pub(crate) fn permute_vertex_records(&mut self, perm: &[u32]) {
        let n = self.n;
        let mut new_vertices = vec![Vertex::new(0); n];
        let mut new_virtual = vec![
            VirtualVertex { dfs_child: VertexId::NIL, first_arc: ArcId::NIL, last_arc: ArcId::NIL, visited: NIL };
            n
        ];
        for i in 0..n {
            let dest = perm[i] as usize;
            new_vertices[dest] = self.vertices[i].clone();
            new_virtual[dest] = self.virtual_vertices[i].clone();
            new_virtual[dest].dfs_child = VertexId::new(dest);
        }
        self.vertices = new_vertices;
        self.virtual_vertices = new_virtual;
    }

    /// Repoints arc `a`'s neighbor field at `new_ref`, used to remap arc
    /// endpoints through a vertex permutation.
    pub(crate) fn set_arc_neighbor(&mut self, a: ArcId, new_ref: NodeRef, n: usize) {
        self.arc_mut(a).neighbor = new_ref.to_raw(n);
    }
}

// Keep `LIST_NIL` referenced so the import documents intent even though the
// typed wrappers above never leak the raw sentinel.
const _: u32 = LIST_NIL;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_edge_links_both_arcs_as_twins() {
        let mut g = Graph::new(3, 12);
        let a = g.add_edge(VertexId::new(0), RingEnd::Last, VertexId::new(1), RingEnd::Last).unwrap();
        let t = g.twin(a);
        assert_eq!(g.neighbor(a), NodeRef::Vertex(VertexId::new(1)));
        assert_eq!(g.neighbor(t), NodeRef::Vertex(VertexId::new(0)));
        assert_eq!(g.owner(a), NodeRef::Vertex(VertexId::new(0)));
        assert_eq!(g.owner(t), NodeRef::Vertex(VertexId::new(1)));
        assert_eq!(t.twin(), a);
    }

    #[test]
    fn loop_edge_is_rejected() {
        let mut g = Graph::new(2, 8);
        assert!(g.add_edge(VertexId::new(0), RingEnd::Last, VertexId::new(0), RingEnd::Last).is_err());
    }

    #[test]
    fn ring_order_first_and_last() {
        let mut g = Graph::new(4, 16);
        let v = VertexId::new(0);
        g.add_edge(v, RingEnd::Last, VertexId::new(1), RingEnd::Last).unwrap();
        g.add_edge(v, RingEnd::Last, VertexId::new(2), RingEnd::Last).unwrap();
        g.add_edge(v, RingEnd::First, VertexId::new(3), RingEnd::Last).unwrap();
        let order: Vec<_> = g
            .iterate(NodeRef::Vertex(v))
            .map(|a| g.neighbor(a).underlying().index())
            .collect();
        assert_eq!(order, vec![3, 1, 2]);
    }

    #[test]
    fn hide_restore_is_bit_exact() {
        let mut g = Graph::new(3, 12);
        let a = g.add_edge(VertexId::new(0), RingEnd::Last, VertexId::new(1), RingEnd::Last).unwrap();
        g.add_edge(VertexId::new(0), RingEnd::Last, VertexId::new(2), RingEnd::Last).unwrap();
        let before: Vec<_> = g.iterate(NodeRef::Vertex(VertexId::new(0))).collect();
        g.hide_edge(a).unwrap();
        assert_eq!(g.iterate(NodeRef::Vertex(VertexId::new(0))).count(), 1);
        g.restore_edge();
        let after: Vec<_> = g.iterate(NodeRef::Vertex(VertexId::new(0))).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn move_to_first_and_last() {
        let mut g = Graph::new(4, 16);
        let v = VertexId::new(0);
        let a1 = g.add_edge(v, RingEnd::Last, VertexId::new(1), RingEnd::Last).unwrap();
        let a2 = g.add_edge(v, RingEnd::Last, VertexId::new(2), RingEnd::Last).unwrap();
        g.add_edge(v, RingEnd::Last, VertexId::new(3), RingEnd::Last).unwrap();
        g.move_arc_to_first(a2);
        g.move_arc_to_last(a1);
        let order: Vec<_> = g
            .iterate(NodeRef::Vertex(v))
            .map(|a| g.neighbor(a).underlying().index())
            .collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn ring_next_wraps_around() {
        let mut g = Graph::new(3, 12);
        let v = VertexId::new(0);
        let a1 = g.add_edge(v, RingEnd::Last, VertexId::new(1), RingEnd::Last).unwrap();
        let a2 = g.add_edge(v, RingEnd::Last, VertexId::new(2), RingEnd::Last).unwrap();
        assert_eq!(g.ring_next(NodeRef::Vertex(v), a2), a1);
        assert_eq!(g.ring_prev(NodeRef::Vertex(v), a1), a2);
    }
}
