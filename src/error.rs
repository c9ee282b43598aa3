//! Error type for the planarity engine.
//!
//! Three kinds of outcome are kept strictly separate (see `spec.md` §7):
//! the algorithmic outcome (`EmbedOutcome`, never an error), input
//! rejection, and internal invariant violations. This module covers the
//! latter two, which share one enum because callers handle both the same
//! way: abandon the `Graph` and report a single diagnostic line.

use core::fmt::{self, Display, Formatter};

use error_stack::Context;

/// Errors produced by graph construction and the embedding engine.
///
/// An `Err(PlanarityError)` always means the `Graph` should be discarded
/// (input rejection leaves it in a defined but possibly partial state;
/// an internal invariant violation leaves it in an undefined state).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanarityError {
    /// A vertex index passed to a public operation is not in `[0, N)`.
    VertexOutOfRange(u32),
    /// `add_edge(v, v, ..)` was requested; loop edges are rejected uniformly.
    LoopEdge(u32),
    /// The arc pool is exhausted and cannot be grown (either at capacity, or
    /// an extension mode with fixed structures has already attached).
    ArcCapacityExhausted,
    /// `ensure_arc_capacity` was called after a search mode's fixed
    /// structures (e.g. K3,3-search `backArcList`) had already attached.
    ExtensionAttached,
    /// `reinitialize_graph`/`copy_graph` was given a graph of the wrong order.
    OrderMismatch { expected: u32, found: u32 },
    /// An operation that requires one vertex numbering (original-index or
    /// DFI) was invoked while the graph was in the other.
    WrongVertexOrder { sorted_by_dfi_required: bool },
    /// The DFS/Walkdown integer stack underflowed or overflowed; this can
    /// only happen if `EnsureArcCapacity` under-sized the stack relative to
    /// the arc pool, which is itself an internal bug.
    StackExhausted,
    /// A broken internal invariant was detected (twin mismatch, unexpected
    /// Walkdown state, and the like). Carries a short static tag naming the
    /// invariant, not a formatted message, so call sites stay cheap.
    BrokenInvariant(&'static str),
}

impl Display for PlanarityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::VertexOutOfRange(v) => write!(f, "vertex {v} is out of range"),
            Self::LoopEdge(v) => write!(f, "loop edge rejected at vertex {v}"),
            Self::ArcCapacityExhausted => write!(f, "arc pool exhausted"),
            Self::ExtensionAttached => {
                write!(f, "arc capacity cannot grow once an extension mode has attached")
            }
            Self::OrderMismatch { expected, found } => {
                write!(f, "graph order mismatch: expected {expected}, found {found}")
            }
            Self::WrongVertexOrder { sorted_by_dfi_required } => {
                if *sorted_by_dfi_required {
                    write!(f, "operation requires vertices sorted by DFI")
                } else {
                    write!(f, "operation requires vertices in original-index order")
                }
            }
            Self::StackExhausted => write!(f, "internal DFS/Walkdown stack exhausted"),
            Self::BrokenInvariant(tag) => write!(f, "internal invariant violated: {tag}"),
        }
    }
}

impl Context for PlanarityError {}

/// Convenience alias for `error_stack::Result` over [`PlanarityError`].
pub type Result<T> = error_stack::Result<T, PlanarityError>;
