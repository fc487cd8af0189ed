//! The graph primitives the metrics are built on.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::Debug,
    hash::Hash,
};

use itertools::Itertools;

use crate::{components, error::GraphError, graph::Graph, paths::PathLengths};

/// Structural queries over an undirected graph.
///
/// The metric and distribution functions only depend on this trait, [`Graph`] is the provided
/// implementation.
pub trait GraphAlgorithms {
    /// Vertex identifier, its `Ord` implementation defines the canonical order of vertex pairs.
    type Vertex: Copy + Ord + Debug;

    /// Returns the number of vertices.
    fn vertex_count(&self) -> usize;

    /// Returns the number of edges.
    fn edge_count(&self) -> usize;

    /// Returns every vertex with its degree, in ascending vertex order.
    fn degrees(&self) -> Vec<(Self::Vertex, usize)>;

    /// Partitions the vertices into connected components, ordered by their smallest vertex.
    fn connected_components(&self) -> Vec<BTreeSet<Self::Vertex>>;

    /// Returns the local clustering coefficient of every vertex: the fraction of pairs of its
    /// neighbours that are themselves connected, 0 for vertices of degree below 2.
    fn clustering(&self) -> BTreeMap<Self::Vertex, f64>;

    /// Returns the shortest path length between every unordered pair of distinct vertices.
    ///
    /// # Errors
    ///
    /// Fails with [`GraphError::Disconnected`] if some pair has no connecting path.
    fn shortest_path_lengths(&self) -> Result<PathLengths<Self::Vertex>, GraphError>;
}

impl<T> GraphAlgorithms for Graph<T>
where
    T: Copy + Eq + Hash + Ord + Debug,
{
    type Vertex = T;

    fn vertex_count(&self) -> usize {
        Graph::vertex_count(self)
    }

    fn edge_count(&self) -> usize {
        Graph::edge_count(self)
    }

    fn degrees(&self) -> Vec<(T, usize)> {
        let adjacency = self.adjacency();
        (0..adjacency.len())
            .map(|i| (adjacency.vertex(i), adjacency.degree(i)))
            .collect()
    }

    fn connected_components(&self) -> Vec<BTreeSet<T>> {
        components::components(self.adjacency())
    }

    fn clustering(&self) -> BTreeMap<T, f64> {
        let adjacency = self.adjacency();

        (0..adjacency.len())
            .map(|i| {
                let neighbours = adjacency.neighbours(i);
                let degree = neighbours.len();

                let coefficient = if degree < 2 {
                    0.0
                } else {
                    let links = neighbours
                        .iter()
                        .tuple_combinations()
                        .filter(|&(&a, &b)| adjacency.is_adjacent(a, b))
                        .count();
                    let possible = degree * (degree - 1) / 2;

                    links as f64 / possible as f64
                };

                (adjacency.vertex(i), coefficient)
            })
            .collect()
    }

    fn shortest_path_lengths(&self) -> Result<PathLengths<T>, GraphError> {
        crate::paths::shortest_path_lengths(self.adjacency())
    }
}
