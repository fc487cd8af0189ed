//! A module for computing all-pairs shortest path lengths over unweighted graphs.

use std::collections::{BTreeMap, VecDeque};

use nalgebra::DMatrix;
use tracing::{debug, instrument};

use crate::{error::GraphError, graph::Adjacency};

const UNREACHED: u32 = u32::MAX;

/// The shortest path length, in edges, between every unordered pair of distinct vertices.
///
/// Each pair `{u, v}` is stored once, canonicalised so that `u < v` under `T`'s implementation of
/// `Ord`.
#[derive(Clone, Debug)]
pub struct PathLengths<T> {
    /// Vertices in ascending order, row `i` of the matrix belongs to `vertices[i]`.
    vertices: Vec<T>,
    /// Only the strict upper triangle (`i < j`) is populated.
    distances: DMatrix<u32>,
}

impl<T> PathLengths<T>
where
    T: Copy + Ord,
{
    /// Returns the number of vertices covered by the table.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of unordered vertex pairs stored, `n * (n - 1) / 2`.
    pub fn pair_count(&self) -> usize {
        let n = self.vertex_count();
        n * n.saturating_sub(1) / 2
    }

    /// Returns whether the table holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.pair_count() == 0
    }

    /// Returns the shortest path length between `u` and `v` in either order, `None` if `u == v`
    /// or either vertex is unknown.
    pub fn get(&self, u: &T, v: &T) -> Option<u32> {
        let i = self.vertices.binary_search(u).ok()?;
        let j = self.vertices.binary_search(v).ok()?;

        match i.cmp(&j) {
            std::cmp::Ordering::Less => Some(self.distances[(i, j)]),
            std::cmp::Ordering::Greater => Some(self.distances[(j, i)]),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Iterates over `(u, v, length)` with `u < v`, sorted by `u` then `v`.
    pub fn iter(&self) -> impl Iterator<Item = (T, T, u32)> + '_ {
        let n = self.vertex_count();
        (0..n).flat_map(move |i| {
            (i + 1..n).map(move |j| (self.vertices[i], self.vertices[j], self.distances[(i, j)]))
        })
    }

    /// Iterates over the stored path lengths.
    pub fn lengths(&self) -> impl Iterator<Item = u32> + '_ {
        self.iter().map(|(_, _, length)| length)
    }

    /// Returns how many pairs have each path length.
    ///
    /// Each source vertex contributes the lengths to the vertices ordered after it, the per-source
    /// tallies are summed into one table.
    pub fn counts(&self) -> BTreeMap<u32, usize> {
        let n = self.vertex_count();
        let mut counts = BTreeMap::new();

        for i in 0..n {
            for j in i + 1..n {
                *counts.entry(self.distances[(i, j)]).or_insert(0) += 1;
            }
        }

        counts
    }

    /// Returns the longest shortest path, `None` when there are no pairs.
    pub fn diameter(&self) -> Option<u32> {
        self.lengths().max()
    }

    /// Returns the mean shortest path length, `None` when there are no pairs.
    pub fn average(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }

        let total: u64 = self.lengths().map(u64::from).sum();
        Some(total as f64 / self.pair_count() as f64)
    }
}

/// Computes the shortest path length between every pair of vertices with one breadth-first search
/// per source, `O(n * (n + e))`.
///
/// Fails with [`GraphError::Disconnected`] if any pair is unreachable.
#[instrument(level = "debug", skip_all, fields(vertices = adjacency.len()))]
pub(crate) fn shortest_path_lengths<T>(
    adjacency: &Adjacency<T>,
) -> Result<PathLengths<T>, GraphError>
where
    T: Copy + Ord,
{
    let n = adjacency.len();
    let mut distances = DMatrix::<u32>::zeros(n, n);
    let mut deltas = vec![UNREACHED; n];
    let mut queue = VecDeque::with_capacity(n);
    let mut unreachable = 0;

    for source in 0..n {
        search_from(source, adjacency, &mut deltas, &mut queue);

        // Only keep the pairs where the target sorts after the source, the rest were recorded by
        // an earlier search.
        for (target, &delta) in deltas.iter().enumerate().skip(source + 1) {
            if delta == UNREACHED {
                unreachable += 1;
            } else {
                distances[(source, target)] = delta;
            }
        }
    }

    if unreachable > 0 {
        return Err(GraphError::Disconnected { unreachable });
    }

    debug!(pairs = n * n.saturating_sub(1) / 2, "computed shortest path lengths");

    Ok(PathLengths {
        vertices: adjacency.vertices().to_vec(),
        distances,
    })
}

/// Breadth-first search from `source`, leaving the hop count to every vertex in `deltas`.
fn search_from<T>(
    source: usize,
    adjacency: &Adjacency<T>,
    deltas: &mut [u32],
    queue: &mut VecDeque<usize>,
) where
    T: Copy + Ord,
{
    deltas.fill(UNREACHED);
    queue.clear();

    deltas[source] = 0;
    queue.push_back(source);

    while let Some(current) = queue.pop_front() {
        let next = deltas[current] + 1;
        for &neighbour in adjacency.neighbours(current) {
            if deltas[neighbour] == UNREACHED {
                deltas[neighbour] = next;
                queue.push_back(neighbour);
            }
        }
    }
}
