//! A module for partitioning graphs into connected components.

use std::{
    collections::{BTreeSet, VecDeque},
    fmt::Debug,
    hash::Hash,
};

use tracing::{debug, instrument};

use crate::{
    algorithms::GraphAlgorithms,
    graph::{Adjacency, Graph},
};

/// Partitions the vertices into connected components with a breadth-first traversal.
///
/// Components are listed in ascending order of their smallest vertex.
pub(crate) fn components<T>(adjacency: &Adjacency<T>) -> Vec<BTreeSet<T>>
where
    T: Copy + Ord,
{
    let n = adjacency.len();
    let mut visited = vec![false; n];
    let mut queue = VecDeque::new();
    let mut components = Vec::new();

    // Vertices are indexed in ascending order, so the first unvisited index is always the smallest
    // vertex of a new component.
    for start in 0..n {
        if visited[start] {
            continue;
        }

        let mut component = BTreeSet::new();
        visited[start] = true;
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            component.insert(adjacency.vertex(current));
            for &neighbour in adjacency.neighbours(current) {
                if !visited[neighbour] {
                    visited[neighbour] = true;
                    queue.push_back(neighbour);
                }
            }
        }

        components.push(component);
    }

    components
}

/// Returns the subgraph induced by the largest connected component (the giant component).
///
/// When several components share the largest size, the one holding the smallest vertex wins. An
/// empty graph yields an empty graph.
///
/// # Examples
///
/// ```
/// use smallworld::{components::largest_component, edge::Edge, graph::Graph};
///
/// let graph: Graph<u32> = [Edge::new(0, 1), Edge::new(2, 3), Edge::new(3, 4)]
///     .into_iter()
///     .collect();
/// let giant = largest_component(&graph);
///
/// assert_eq!(giant.vertex_count(), 3);
/// assert_eq!(giant.edge_count(), 2);
/// ```
#[instrument(level = "debug", skip_all, fields(vertices = graph.vertex_count()))]
pub fn largest_component<T>(graph: &Graph<T>) -> Graph<T>
where
    T: Copy + Eq + Hash + Ord + Debug,
{
    let components = graph.connected_components();
    let count = components.len();

    // `max_by_key` keeps the last maximum, fold instead to keep the first.
    let largest = components
        .into_iter()
        .fold(None, |best: Option<BTreeSet<T>>, component| match best {
            Some(best) if best.len() >= component.len() => Some(best),
            _ => Some(component),
        });

    match largest {
        Some(component) => {
            debug!(
                components = count,
                size = component.len(),
                "selected giant component"
            );
            graph.induced_subgraph(&component)
        }
        None => Graph::new(),
    }
}
