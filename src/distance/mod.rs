//! All-pairs hop distances.
//!
//! One breadth-first search per source over the directed adjacency. Edge
//! weights are ignored: every edge is a single hop. The result is a dense
//! `N × N` matrix, which is fine for UI navigation graphs (a few thousand
//! pages at most) and keeps lookups branch-free.
//!
//! Rows are independent: BFS from one source only reads the frozen adjacency
//! and writes its own row. With the `parallel` feature the rows are handed to
//! rayon workers, each owning a disjoint slice of the matrix.

use std::collections::VecDeque;
use std::time::Instant;

use crate::model::{NavGraph, NodeId};
use crate::Result;

/// Sentinel stored for "no directed path".
pub const UNREACHABLE: u32 = u32::MAX;

/// Hop counts between every ordered pair of nodes.
///
/// Row `u` holds the distances *from* `u`. `distance(u, u) == 0` always;
/// the matrix is not symmetric because the graph is directed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    n: usize,
    cells: Vec<u32>,
}

impl DistanceMatrix {
    /// Compute the matrix with one sequential BFS per node.
    pub fn compute(graph: &NavGraph) -> Self {
        let started = Instant::now();
        let n = graph.node_count();
        let mut cells = vec![UNREACHABLE; n * n];

        if n > 0 {
            let mut queue = VecDeque::with_capacity(n);
            for (source, row) in cells.chunks_mut(n).enumerate() {
                bfs_row(graph, NodeId::from(source), row, &mut queue);
            }
        }

        tracing::debug!(nodes = n, elapsed_us = started.elapsed().as_micros() as u64, "distance matrix computed");
        Self { n, cells }
    }

    /// Compute the matrix with BFS rows spread over the rayon thread pool.
    ///
    /// Produces exactly the same matrix as [`compute`](Self::compute).
    #[cfg(feature = "parallel")]
    pub fn compute_parallel(graph: &NavGraph) -> Self {
        use rayon::prelude::*;

        let started = Instant::now();
        let n = graph.node_count();
        let mut cells = vec![UNREACHABLE; n * n];

        if n > 0 {
            cells
                .par_chunks_mut(n)
                .enumerate()
                .for_each_init(
                    || VecDeque::with_capacity(n),
                    |queue, (source, row)| bfs_row(graph, NodeId::from(source), row, queue),
                );
        }

        tracing::debug!(
            nodes = n,
            threads = rayon::current_num_threads(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "distance matrix computed in parallel"
        );
        Self { n, cells }
    }

    pub fn node_count(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Hop count from `from` to `to`, or `None` when unreachable.
    pub fn get(&self, from: NodeId, to: NodeId) -> Option<u32> {
        match self.row(from)[to.index()] {
            UNREACHABLE => None,
            d => Some(d),
        }
    }

    /// Raw row for `from`; unreachable cells hold [`UNREACHABLE`].
    pub fn row(&self, from: NodeId) -> &[u32] {
        let start = from.index() * self.n;
        &self.cells[start..start + self.n]
    }

    /// Label-based lookup. Unknown labels are an error, unreachable is `Ok(None)`.
    pub fn distance(&self, graph: &NavGraph, from: &str, to: &str) -> Result<Option<u32>> {
        let from = graph.resolve(from)?;
        let to = graph.resolve(to)?;
        Ok(self.get(from, to))
    }

    /// Ordered pairs `u != v` with a directed path.
    pub fn reachable_pairs(&self) -> u64 {
        let finite = self.cells.iter().filter(|&&d| d != UNREACHABLE).count() as u64;
        // Diagonal is always finite
        finite - self.n as u64
    }

    /// Ordered pairs `u != v` with no directed path.
    pub fn unreachable_pairs(&self) -> u64 {
        self.cells.iter().filter(|&&d| d == UNREACHABLE).count() as u64
    }
}

/// BFS from `source`, writing hop counts into `row`.
///
/// `row` must arrive filled with [`UNREACHABLE`]; `queue` is scratch space
/// reused across sources.
fn bfs_row(graph: &NavGraph, source: NodeId, row: &mut [u32], queue: &mut VecDeque<NodeId>) {
    queue.clear();
    row[source.index()] = 0;
    queue.push_back(source);

    while let Some(current) = queue.pop_front() {
        let next = row[current.index()] + 1;
        for &neighbor in graph.successors(current) {
            let cell = &mut row[neighbor.index()];
            if *cell == UNREACHABLE {
                *cell = next;
                queue.push_back(neighbor);
            }
        }
    }
}
