use log::debug;

use crate::Error;
use crate::dijkstra::Distance;
use crate::dijkstra::ShortestPaths;
use crate::graph::DirectedGraph;

/// Reference solver: relaxes every edge until a full round changes nothing.
/// `O(V * E)`, meant for cross-checking.
pub fn bellman_ford(graph: &DirectedGraph, source: usize) -> Result<ShortestPaths, Error> {
    let n = graph.vertex_count();
    if source >= n {
        return Err(Error::SourceOutOfRange {
            vertex: source,
            vertex_count: n,
        });
    }

    let edges = graph.edges_vec();
    let mut dist = vec![Distance::Infinite; n];
    let mut pred = vec![None; n];
    dist[source] = Distance::Finite(0);
    pred[source] = Some(source);

    let mut rounds = 0;
    // Try to relax edges |V| - 1 times.
    for _ in 1..n {
        rounds += 1;
        let mut relaxed = false;

        for &(u, v, w) in &edges {
            let (u, v) = (u as usize, v as usize);
            let alt = dist[u].extend(w);
            if alt < dist[v] {
                dist[v] = alt;
                pred[v] = Some(u);
                relaxed = true;
            }
        }

        if !relaxed {
            break;
        }
    }
    debug!("bellman_ford: {rounds} rounds over {} edges", edges.len());

    let reached = dist.iter().filter(|d| **d != Distance::Infinite).count();
    Ok(ShortestPaths::from_parts(source, dist, pred, reached))
}
