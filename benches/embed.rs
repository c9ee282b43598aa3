//! Benchmarks `embed` on maximal planar graphs of increasing order, mirroring
//! the teacher workspace's `criterion`-based `[[bench]]` entries (grounded on
//! `examples/rnbguy-dbcop/crates/core/benches/consistency.rs`'s
//! `benchmark_group`-of-sizes shape).

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use planarity::{embed, EmbedMode, Graph, RingEnd, VertexId};

/// Builds a maximal planar graph on `n` vertices by stacking a new vertex
/// into a triangular face each time ("Apollonian network" construction):
/// start from a single triangle, then repeatedly attach the next vertex to
/// all three corners of some still-open triangular face, splitting it into
/// three. Every intermediate and final graph is planar by construction and
/// has exactly `3n - 6` edges for `n >= 3`, which is the densest a simple
/// planar graph on `n` vertices can be — the worst case for Walkdown's
/// merge bookkeeping.
fn stacked_triangulation(n: usize) -> Graph {
    let mut g = Graph::new(n, Graph::default_arc_capacity(n));
    if n < 3 {
        return g;
    }
    g.add_edge(VertexId::new(0), RingEnd::Last, VertexId::new(1), RingEnd::Last).unwrap();
    g.add_edge(VertexId::new(1), RingEnd::Last, VertexId::new(2), RingEnd::Last).unwrap();
    g.add_edge(VertexId::new(2), RingEnd::Last, VertexId::new(0), RingEnd::Last).unwrap();

    let mut open_faces = vec![(0usize, 1usize, 2usize)];
    for i in 3..n {
        let (a, b, c) = open_faces.pop().expect("n-3 vertices each consume one open face");
        g.add_edge(VertexId::new(i), RingEnd::Last, VertexId::new(a), RingEnd::Last).unwrap();
        g.add_edge(VertexId::new(i), RingEnd::Last, VertexId::new(b), RingEnd::Last).unwrap();
        g.add_edge(VertexId::new(i), RingEnd::Last, VertexId::new(c), RingEnd::Last).unwrap();
        open_faces.push((i, a, b));
        open_faces.push((i, b, c));
        open_faces.push((i, a, c));
    }
    g
}

fn bench_embed(c: &mut Criterion) {
    let small = stacked_triangulation(50);
    let medium = stacked_triangulation(500);
    let large = stacked_triangulation(5_000);

    let mut group = c.benchmark_group("embed_planar");

    group.bench_function("maximal_planar_50", |b| {
        b.iter(|| {
            let mut g = small.clone();
            embed(black_box(&mut g), EmbedMode::Planar).unwrap()
        })
    });

    group.bench_function("maximal_planar_500", |b| {
        b.iter(|| {
            let mut g = medium.clone();
            embed(black_box(&mut g), EmbedMode::Planar).unwrap()
        })
    });

    group.bench_function("maximal_planar_5000", |b| {
        b.iter(|| {
            let mut g = large.clone();
            embed(black_box(&mut g), EmbedMode::Planar).unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_embed);
criterion_main!(benches);
