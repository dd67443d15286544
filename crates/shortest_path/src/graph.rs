use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("edge ({from}, {to}) references a vertex outside of [0, {vertex_count})")]
    VertexOutOfRange {
        from: u32,
        to: u32,
        vertex_count: usize,
    },
    #[error("offset table has {got} entries, expected {expected}")]
    OffsetsLength { got: usize, expected: usize },
    #[error("offset table decreases at vertex {0}")]
    OffsetsNotMonotone(usize),
    #[error("offset table ends at {end}, but there are {edge_count} edges")]
    OffsetsEdgeCountMismatch { end: usize, edge_count: usize },
    #[error("{targets} edge targets but {weights} edge weights")]
    EdgeArraysMismatch { targets: usize, weights: usize },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Edge {
    pub to: u32,
    pub weight: u64,
}

/// Static directed graph in compressed sparse row form.
///
/// The edges leaving `v` occupy `offsets[v]..offsets[v + 1]` of the edge
/// arrays, so scanning them is a single contiguous run.
#[derive(Clone, Debug)]
pub struct DirectedGraph {
    vertex_count: usize,
    offsets: Vec<usize>,
    to: Vec<u32>,
    weight: Vec<u64>,
}

impl DirectedGraph {
    /// Groups an edge list of `(from, to, weight)` by source vertex. Edges
    /// sharing a source keep their relative order.
    pub fn from_edges(vertex_count: usize, edges: &[(u32, u32, u64)]) -> Result<Self, GraphError> {
        let mut out_deg = vec![0_usize; vertex_count];
        for &(from, to, _) in edges {
            if from as usize >= vertex_count || to as usize >= vertex_count {
                return Err(GraphError::VertexOutOfRange {
                    from,
                    to,
                    vertex_count,
                });
            }
            out_deg[from as usize] += 1;
        }

        let mut offsets = vec![0_usize; vertex_count + 1];
        for v in 0..vertex_count {
            offsets[v + 1] = offsets[v] + out_deg[v];
        }

        let mut to = vec![0_u32; edges.len()];
        let mut weight = vec![0_u64; edges.len()];
        let mut cursor = offsets[..vertex_count].to_vec();

        for &(from, dst, w) in edges {
            let idx = cursor[from as usize];
            cursor[from as usize] += 1;
            to[idx] = dst;
            weight[idx] = w;
        }

        Ok(Self {
            vertex_count,
            offsets,
            to,
            weight,
        })
    }

    /// Takes edges that are already grouped by source vertex.
    ///
    /// `offsets` has `vertex_count + 1` non-decreasing entries starting at 0
    /// and ending at the number of edges; `to[i]` and `weight[i]` describe
    /// edge `i`.
    pub fn from_csr(offsets: Vec<usize>, to: Vec<u32>, weight: Vec<u64>) -> Result<Self, GraphError> {
        if to.len() != weight.len() {
            return Err(GraphError::EdgeArraysMismatch {
                targets: to.len(),
                weights: weight.len(),
            });
        }
        let Some(vertex_count) = offsets.len().checked_sub(1) else {
            return Err(GraphError::OffsetsLength {
                got: 0,
                expected: 1,
            });
        };
        if offsets[0] != 0 {
            return Err(GraphError::OffsetsNotMonotone(0));
        }
        if let Some(v) = offsets.windows(2).position(|w| w[0] > w[1]) {
            return Err(GraphError::OffsetsNotMonotone(v + 1));
        }
        if offsets[vertex_count] != to.len() {
            return Err(GraphError::OffsetsEdgeCountMismatch {
                end: offsets[vertex_count],
                edge_count: to.len(),
            });
        }

        for u in 0..vertex_count {
            for &dst in &to[offsets[u]..offsets[u + 1]] {
                if dst as usize >= vertex_count {
                    return Err(GraphError::VertexOutOfRange {
                        from: u as u32,
                        to: dst,
                        vertex_count,
                    });
                }
            }
        }

        Ok(Self {
            vertex_count,
            offsets,
            to,
            weight,
        })
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.to.len()
    }

    #[inline]
    pub fn out_degree(&self, v: usize) -> usize {
        let start = self.offsets[v];
        let end = self.offsets[v + 1];
        end - start
    }

    #[inline]
    pub fn out_edges(&self, v: usize) -> OutEdges<'_> {
        let start = self.offsets[v];
        let end = self.offsets[v + 1];
        OutEdges {
            to: &self.to[start..end],
            weight: &self.weight[start..end],
            idx: 0,
        }
    }

    pub fn edges_vec(&self) -> Vec<(u32, u32, u64)> {
        let mut edges = Vec::with_capacity(self.edge_count());
        for u in 0..self.vertex_count {
            for edge in self.out_edges(u) {
                edges.push((u as u32, edge.to, edge.weight));
            }
        }
        edges
    }
}

pub struct OutEdges<'a> {
    to: &'a [u32],
    weight: &'a [u64],
    idx: usize,
}

impl<'a> Iterator for OutEdges<'a> {
    type Item = Edge;

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= self.to.len() {
            return None;
        }
        let edge = Edge {
            to: self.to[self.idx],
            weight: self.weight[self.idx],
        };
        self.idx += 1;
        Some(edge)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remain = self.to.len() - self.idx;
        (remain, Some(remain))
    }
}

impl ExactSizeIterator for OutEdges<'_> {}

/// Bidirectional ring: every vertex `i` has an edge to `i - 1` and then to
/// `i + 1` (both mod `n`), all of weight 1.
pub fn ring(n: usize) -> DirectedGraph {
    let mut offsets = Vec::with_capacity(n + 1);
    let mut to = Vec::with_capacity(2 * n);
    for i in 0..n {
        offsets.push(to.len());
        to.push(((i + n - 1) % n) as u32);
        to.push(((i + 1) % n) as u32);
    }
    offsets.push(to.len());

    let weight = vec![1; to.len()];
    DirectedGraph {
        vertex_count: n,
        offsets,
        to,
        weight,
    }
}
