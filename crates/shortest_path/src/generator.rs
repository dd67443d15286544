use std::collections::HashSet;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::graph::DirectedGraph;
use crate::graph::GraphError;
use crate::graph::ring;

const C_MAX: u64 = 1_000_000_000;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum GraphCase {
    SparseRandom,
    LoopsAndParallel,
    DenseZero,
    AlmostLine,
    GridRandom,
    WrongDijkstraKiller,
    Ring,
    Islands,
}

impl GraphCase {
    pub const ALL: [GraphCase; 8] = [
        GraphCase::SparseRandom,
        GraphCase::LoopsAndParallel,
        GraphCase::DenseZero,
        GraphCase::AlmostLine,
        GraphCase::GridRandom,
        GraphCase::WrongDijkstraKiller,
        GraphCase::Ring,
        GraphCase::Islands,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::SparseRandom => "sparse_random",
            Self::LoopsAndParallel => "loops_and_parallel",
            Self::DenseZero => "dense_zero",
            Self::AlmostLine => "almost_line",
            Self::GridRandom => "grid_random",
            Self::WrongDijkstraKiller => "wrong_dijkstra_killer",
            Self::Ring => "ring",
            Self::Islands => "islands",
        }
    }
}

#[derive(Clone, Debug)]
pub struct GeneratedGraph {
    pub graph: DirectedGraph,
    pub source: usize,
    pub target: usize,
}

pub fn generate_case(case: GraphCase, size: usize, seed: u64) -> Result<GeneratedGraph, GraphError> {
    match case {
        GraphCase::SparseRandom => sparse_random_case(size.max(32), seed, 4),
        GraphCase::LoopsAndParallel => loops_and_parallel_case(size.max(16), seed),
        GraphCase::DenseZero => dense_zero_case(size.max(64), seed),
        GraphCase::AlmostLine => almost_line_case(size.max(8), seed),
        GraphCase::GridRandom => grid_random_case(size.max(64), seed),
        GraphCase::WrongDijkstraKiller => wrong_dijkstra_killer_case(size.max(32)),
        GraphCase::Ring => ring_case(size.max(3)),
        GraphCase::Islands => islands_case(size.max(16), seed),
    }
}

fn sparse_random_case(n: usize, seed: u64, edge_factor: usize) -> Result<GeneratedGraph, GraphError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let m_target = n.saturating_mul(edge_factor).min(complete_edges(n));
    let mut edges = Vec::with_capacity(m_target);
    let mut used = HashSet::with_capacity(m_target * 2 + 1);

    while edges.len() < m_target {
        let u = rng.random_range(0..n);
        let v = rng.random_range(0..n);
        push_unique_edge(&mut edges, &mut used, u, v, rng.random_range(0..=C_MAX));
    }

    let (source, target) = random_endpoints(&mut rng, n);
    Ok(GeneratedGraph {
        graph: DirectedGraph::from_edges(n, &edges)?,
        source,
        target,
    })
}

// Self-loops and repeated (u, v) pairs with different weights.
fn loops_and_parallel_case(n: usize, seed: u64) -> Result<GeneratedGraph, GraphError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut edges: Vec<(u32, u32, u64)> = Vec::with_capacity(n * 6);

    for u in 0..n {
        edges.push((u as u32, u as u32, rng.random_range(0..=100)));
        let v = rng.random_range(0..n) as u32;
        for _ in 0..rng.random_range(1..=3) {
            edges.push((u as u32, v, rng.random_range(0..=1_000)));
        }
        edges.push((u as u32, rng.random_range(0..n) as u32, rng.random_range(0..=1_000)));
    }
    edges.shuffle(&mut rng);

    let (source, target) = random_endpoints(&mut rng, n);
    Ok(GeneratedGraph {
        graph: DirectedGraph::from_edges(n, &edges)?,
        source,
        target,
    })
}

fn dense_zero_case(size: usize, seed: u64) -> Result<GeneratedGraph, GraphError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = floor_sqrt(size).max(8);
    let mut edges = Vec::with_capacity(complete_edges(n));

    for u in 0..n {
        for v in 0..n {
            if u != v {
                edges.push((u as u32, v as u32, 0));
            }
        }
    }

    let (source, target) = random_endpoints(&mut rng, n);
    Ok(GeneratedGraph {
        graph: DirectedGraph::from_edges(n, &edges)?,
        source,
        target,
    })
}

fn almost_line_case(n: usize, seed: u64) -> Result<GeneratedGraph, GraphError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut edges = Vec::with_capacity(n * 2);
    let mut used = HashSet::with_capacity(n * 4);

    for i in 0..(n - 1) {
        push_unique_edge(&mut edges, &mut used, i, i + 1, rng.random_range(0..=C_MAX));
    }

    let m_target = n.saturating_mul(2).min(complete_edges(n));
    while edges.len() < m_target {
        let a = rng.random_range(0..(n - 2));
        let b = (a + rng.random_range(2..=3)).min(n - 1);
        let (u, v) = if rng.random_bool(0.5) { (b, a) } else { (a, b) };
        push_unique_edge(&mut edges, &mut used, u, v, rng.random_range(0..=C_MAX));
    }

    let mut perm: Vec<usize> = (0..n).collect();
    perm.shuffle(&mut rng);
    for edge in &mut edges {
        edge.0 = perm[edge.0 as usize] as u32;
        edge.1 = perm[edge.1 as usize] as u32;
    }
    edges.shuffle(&mut rng);

    Ok(GeneratedGraph {
        graph: DirectedGraph::from_edges(n, &edges)?,
        source: perm[0],
        target: perm[n - 1],
    })
}

fn grid_random_case(size: usize, seed: u64) -> Result<GeneratedGraph, GraphError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let len = floor_sqrt(size).max(4);
    let n = len * len;
    let mut edges = Vec::with_capacity(n * 4);

    let index = |i: usize, j: usize| -> u32 { (i * len + j) as u32 };
    for i in 0..len {
        for j in 0..len {
            let mut neighbors = Vec::with_capacity(4);
            if j + 1 < len {
                neighbors.push(index(i, j + 1));
            }
            if i + 1 < len {
                neighbors.push(index(i + 1, j));
            }
            if j > 0 {
                neighbors.push(index(i, j - 1));
            }
            if i > 0 {
                neighbors.push(index(i - 1, j));
            }
            for v in neighbors {
                edges.push((index(i, j), v, rng.random_range(0..=C_MAX)));
            }
        }
    }

    edges.shuffle(&mut rng);
    let (source, target) = random_endpoints(&mut rng, n);
    Ok(GeneratedGraph {
        graph: DirectedGraph::from_edges(n, &edges)?,
        source,
        target,
    })
}

// Early settles look cheap but the cheapest route to the sink is found last.
fn wrong_dijkstra_killer_case(size: usize) -> Result<GeneratedGraph, GraphError> {
    let one = (size / 4).max(8);
    let n = one * 2 + 3;
    let mut edges: Vec<(u32, u32, u64)> = Vec::with_capacity(one * 4);

    for i in 0..one {
        edges.push((0, (i + 1) as u32, i as u64));
        edges.push(((i + 1) as u32, (one + 1) as u32, ((one - i - 1) * 2) as u64));
        edges.push(((one + 1) as u32, (one + 2 + i) as u32, (2 * i) as u64));
        edges.push(((one + 2 + i) as u32, (n - 1) as u32, (one - i - 1) as u64));
    }

    Ok(GeneratedGraph {
        graph: DirectedGraph::from_edges(n, &edges)?,
        source: 0,
        target: n - 1,
    })
}

fn ring_case(n: usize) -> Result<GeneratedGraph, GraphError> {
    Ok(GeneratedGraph {
        graph: ring(n),
        source: 0,
        target: n / 2,
    })
}

// Two random halves with edges only inside each half. The target lives in
// the half the source cannot reach.
fn islands_case(n: usize, seed: u64) -> Result<GeneratedGraph, GraphError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let half = n / 2;
    let mut edges = Vec::with_capacity(n * 3);
    let mut used = HashSet::with_capacity(n * 6);

    for (lo, hi) in [(0, half), (half, n)] {
        for _ in 0..(hi - lo) * 3 {
            let u = rng.random_range(lo..hi);
            let v = rng.random_range(lo..hi);
            push_unique_edge(&mut edges, &mut used, u, v, rng.random_range(0..=C_MAX));
        }
    }

    Ok(GeneratedGraph {
        graph: DirectedGraph::from_edges(n, &edges)?,
        source: rng.random_range(0..half),
        target: rng.random_range(half..n),
    })
}

fn random_endpoints(rng: &mut StdRng, n: usize) -> (usize, usize) {
    let source = rng.random_range(0..n);
    let mut target = rng.random_range(0..n);
    if source == target {
        target = (target + 1) % n;
    }
    (source, target)
}

#[inline]
fn complete_edges(n: usize) -> usize {
    n.saturating_mul(n.saturating_sub(1))
}

#[inline]
fn floor_sqrt(value: usize) -> usize {
    (value as f64).sqrt().floor() as usize
}

#[inline]
fn push_unique_edge(
    edges: &mut Vec<(u32, u32, u64)>,
    used: &mut HashSet<u64>,
    u: usize,
    v: usize,
    weight: u64,
) -> bool {
    if u == v {
        return false;
    }
    let key = ((u as u64) << 32) | v as u64;
    if used.insert(key) {
        edges.push((u as u32, v as u32, weight));
        true
    } else {
        false
    }
}
