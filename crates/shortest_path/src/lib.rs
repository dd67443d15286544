mod bellman_ford;
mod dijkstra;
pub mod generator;
pub mod graph;

use indexed_heap::HeapError;
use thiserror::Error;

pub use bellman_ford::bellman_ford;
pub use dijkstra::Distance;
pub use dijkstra::PathReconstruction;
pub use dijkstra::ShortestPaths;
pub use graph::DirectedGraph;
pub use graph::Edge;
pub use graph::GraphError;
pub use graph::ring;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("source vertex {vertex} is outside of [0, {vertex_count})")]
    SourceOutOfRange { vertex: usize, vertex_count: usize },
    #[error("target vertex {vertex} is outside of [0, {vertex_count})")]
    TargetOutOfRange { vertex: usize, vertex_count: usize },
    #[error("priority queue rejected an operation: {0}")]
    Queue(#[from] HeapError),
}
