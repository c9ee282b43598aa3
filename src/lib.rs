//! **planarity** is a linear-time Boyer–Myrvold planarity testing, embedding
//! and Kuratowski-subgraph isolation library.
//!
//! The entry point is [`Graph`](./graph/struct.Graph.html): build one with
//! [`Graph::new`], add edges with [`Graph::add_edge`], then call
//! [`embed`] with an [`EmbedMode`] to either obtain a combinatorial planar
//! embedding (the graph's adjacency rings rewritten into a consistent
//! rotation system) or a Kuratowski subdivision proving non-planarity.
//!
//! ```
//! use planarity::{embed, EmbedMode, EmbedOutcome, Graph, RingEnd, VertexId};
//!
//! let mut g = Graph::new(4, Graph::default_arc_capacity(4));
//! for i in 0..4 {
//!     for j in (i + 1)..4 {
//!         g.add_edge(VertexId::new(i), RingEnd::Last, VertexId::new(j), RingEnd::Last).unwrap();
//!     }
//! }
//! assert_eq!(embed(&mut g, EmbedMode::Planar).unwrap(), EmbedOutcome::Embedded);
//! ```
//!
//! The programmatic surface described in `spec.md` §6 is everything this
//! crate implements; file-format parsing/emission, the interactive CLI
//! driver, and ASCII-art rendering of a visibility representation are
//! explicitly out of scope (see `spec.md` §1 and `SPEC_FULL.md` §6).

pub mod bicomp;
pub mod dfs;
pub mod drawing;
pub mod embed;
pub mod error;
pub mod graph;
pub mod integrity;
pub mod isolator;
pub mod modes;
pub mod sort;
mod stack;
pub mod walkdown;
pub mod walkup;

pub use drawing::{compute_visibility, VisibilityDrawing};
pub use embed::embed;
pub use error::{PlanarityError, Result};
pub use graph::{ArcId, ArcType, DirectionFlags, Graph, NodeRef, ObstructionRole, RingEnd, Vertex, VertexId, VirtualVertex};
pub use integrity::{
    check_embedding_integrity, check_obstruction_integrity, EmbeddingIntegrity, ObstructionIntegrity,
};
pub use isolator::{IsolationReport, MinorType, ObstructionShape};
pub use modes::{EmbedMode, EmbedOutcome};
pub use sort::sort_vertices;
