use indexed_heap::IndexedMinHeap;
use log::debug;
use log::trace;

use crate::Error;
use crate::graph::DirectedGraph;

/// Tentative path length. Every finite distance orders before `Infinite`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Distance {
    Finite(u64),
    Infinite,
}

impl Distance {
    #[inline]
    pub fn finite(self) -> Option<u64> {
        match self {
            Self::Finite(d) => Some(d),
            Self::Infinite => None,
        }
    }

    /// Length of this path followed by an edge of `weight`. A sum that does
    /// not fit in `u64` is infinite.
    #[inline]
    pub fn extend(self, weight: u64) -> Self {
        match self {
            Self::Finite(d) => d.checked_add(weight).map_or(Self::Infinite, Self::Finite),
            Self::Infinite => Self::Infinite,
        }
    }
}

/// Distances and predecessors from a single source.
///
/// The source is its own predecessor. A vertex without a predecessor was
/// never reached.
#[derive(Clone, Debug)]
pub struct ShortestPaths {
    source: usize,
    dist: Vec<Distance>,
    pred: Vec<Option<usize>>,
    settled: usize,
}

impl ShortestPaths {
    pub(crate) fn from_parts(
        source: usize,
        dist: Vec<Distance>,
        pred: Vec<Option<usize>>,
        settled: usize,
    ) -> Self {
        Self {
            source,
            dist,
            pred,
            settled,
        }
    }

    /// Runs Dijkstra's algorithm until every reachable vertex is settled.
    pub fn run(graph: &DirectedGraph, source: usize) -> Result<Self, Error> {
        dijkstra(graph, source, None)
    }

    /// Like [`ShortestPaths::run`], but stops as soon as `target` is settled.
    /// Distances of vertices that were not settled yet are upper bounds only.
    pub fn run_to(graph: &DirectedGraph, source: usize, target: usize) -> Result<Self, Error> {
        let vertex_count = graph.vertex_count();
        if target >= vertex_count {
            return Err(Error::TargetOutOfRange {
                vertex: target,
                vertex_count,
            });
        }
        dijkstra(graph, source, Some(target))
    }

    pub fn source(&self) -> usize {
        self.source
    }

    /// `None` when `v` is unreachable (or out of range).
    pub fn dist(&self, v: usize) -> Option<u64> {
        self.dist.get(v)?.finite()
    }

    pub fn pred(&self, v: usize) -> Option<usize> {
        self.pred.get(v).copied().flatten()
    }

    pub fn distances(&self) -> Vec<Option<u64>> {
        self.dist.iter().map(|d| d.finite()).collect()
    }

    pub fn settled_count(&self) -> usize {
        self.settled
    }

    /// Walks the predecessors of `from` back to the source. `from` itself is
    /// not yielded.
    pub fn reconstruct(&self, from: usize) -> PathReconstruction<'_> {
        PathReconstruction {
            curr: from,
            source: self.source,
            pred: &self.pred,
        }
    }

    /// Vertices on the shortest path, starting at the source and ending at
    /// `target`.
    pub fn path_to(&self, target: usize) -> Option<Vec<usize>> {
        self.dist(target)?;
        let mut path: Vec<usize> = std::iter::once(target).chain(self.reconstruct(target)).collect();
        path.reverse();
        Some(path)
    }
}

pub struct PathReconstruction<'a> {
    curr: usize,
    source: usize,
    pred: &'a [Option<usize>],
}

impl Iterator for PathReconstruction<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.curr == self.source {
            return None;
        }
        self.curr = self.pred.get(self.curr).copied().flatten()?;
        Some(self.curr)
    }
}

// A vertex still in the queue is either unreached (infinite priority) or on
// the frontier; once extracted it is settled and its key leaves the index, so
// later decrease-key calls on it fail without touching the queue.
fn dijkstra(graph: &DirectedGraph, source: usize, target: Option<usize>) -> Result<ShortestPaths, Error> {
    let n = graph.vertex_count();
    if source >= n {
        return Err(Error::SourceOutOfRange {
            vertex: source,
            vertex_count: n,
        });
    }
    debug!(
        "dijkstra: {} vertices, {} edges, source {}",
        n,
        graph.edge_count(),
        source
    );

    let mut dist = vec![Distance::Infinite; n];
    let mut pred = vec![None; n];
    dist[source] = Distance::Finite(0);
    pred[source] = Some(source);

    let mut queue = IndexedMinHeap::new(n);
    for (v, &d) in dist.iter().enumerate() {
        queue.insert(v, d)?;
    }

    let mut settled = 0;
    while let Some((u, d)) = queue.extract_min() {
        if d == Distance::Infinite {
            debug!("dijkstra: {} vertices unreachable", queue.len() + 1);
            break;
        }
        settled += 1;
        trace!("settled {u} at {d:?}");

        if target == Some(u) {
            debug!("dijkstra: target {u} settled, stopping");
            break;
        }

        for edge in graph.out_edges(u) {
            let v = edge.to as usize;
            let alt = d.extend(edge.weight);
            if alt < dist[v] {
                dist[v] = alt;
                pred[v] = Some(u);
                match queue.decrease_key(v, alt) {
                    Ok(()) => trace!("relaxed {u} -> {v} to {alt:?}"),
                    Err(err) => trace!("relaxation {u} -> {v} ignored: {err}"),
                }
            }
        }
    }

    debug!("dijkstra: settled {settled} of {n} vertices");
    Ok(ShortestPaths::from_parts(source, dist, pred, settled))
}
