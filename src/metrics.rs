//! Structural measurements over a connected graph.
//!
//! Every function here is generic over [`GraphAlgorithms`], measurements that are undefined on
//! graphs with too few vertices fail with [`GraphError::DegenerateGraph`] rather than dividing by
//! zero.

use std::collections::BTreeMap;

use crate::{algorithms::GraphAlgorithms, error::GraphError, paths::PathLengths};

/// Returns the degree of every vertex, in ascending vertex order.
///
/// # Examples
///
/// ```
/// use smallworld::{edge::Edge, graph::Graph, metrics::degree_sequence};
///
/// let graph: Graph<u32> = [Edge::new(0, 1), Edge::new(0, 2)].into_iter().collect();
///
/// assert_eq!(degree_sequence(&graph), vec![2, 1, 1]);
/// ```
pub fn degree_sequence<G: GraphAlgorithms>(graph: &G) -> Vec<usize> {
    graph
        .degrees()
        .into_iter()
        .map(|(_, degree)| degree)
        .collect()
}

/// Returns the local clustering coefficient of every vertex.
pub fn clustering_coefficients<G: GraphAlgorithms>(graph: &G) -> BTreeMap<G::Vertex, f64> {
    graph.clustering()
}

/// Returns the shortest path length between every unordered pair of distinct vertices.
///
/// # Errors
///
/// Fails with [`GraphError::Disconnected`] if some pair of vertices is unreachable.
pub fn all_pairs_shortest_path_lengths<G: GraphAlgorithms>(
    graph: &G,
) -> Result<PathLengths<G::Vertex>, GraphError> {
    graph.shortest_path_lengths()
}

/// Returns the mean local clustering coefficient.
///
/// # Errors
///
/// Fails with [`GraphError::DegenerateGraph`] on a graph without vertices.
pub fn average_clustering<G: GraphAlgorithms>(graph: &G) -> Result<f64, GraphError> {
    mean_clustering(&graph.clustering())
}

/// Returns the mean of already computed clustering coefficients.
///
/// # Errors
///
/// Fails with [`GraphError::DegenerateGraph`] when there are no coefficients.
pub fn mean_clustering<V>(coefficients: &BTreeMap<V, f64>) -> Result<f64, GraphError> {
    if coefficients.is_empty() {
        return Err(GraphError::DegenerateGraph {
            vertex_count: 0,
            measure: "average clustering",
        });
    }

    Ok(coefficients.values().sum::<f64>() / coefficients.len() as f64)
}

/// Returns the mean shortest path length over all unordered vertex pairs.
///
/// # Errors
///
/// Fails with [`GraphError::DegenerateGraph`] on graphs with fewer than two vertices and with
/// [`GraphError::Disconnected`] if some pair is unreachable.
pub fn average_shortest_path_length<G: GraphAlgorithms>(graph: &G) -> Result<f64, GraphError> {
    let lengths = measurable_lengths(graph, "average shortest path length")?;
    lengths.average().ok_or(GraphError::DegenerateGraph {
        vertex_count: lengths.vertex_count(),
        measure: "average shortest path length",
    })
}

/// Returns the longest shortest path between any two vertices.
///
/// # Errors
///
/// Fails with [`GraphError::DegenerateGraph`] on graphs with fewer than two vertices and with
/// [`GraphError::Disconnected`] if some pair is unreachable.
///
/// # Examples
///
/// ```
/// use smallworld::{edge::Edge, graph::Graph, metrics::diameter};
///
/// let graph: Graph<u32> = (1..5).map(|i| Edge::new(i - 1, i)).collect();
///
/// assert_eq!(diameter(&graph), Ok(4));
/// ```
pub fn diameter<G: GraphAlgorithms>(graph: &G) -> Result<u32, GraphError> {
    let lengths = measurable_lengths(graph, "diameter")?;
    lengths.diameter().ok_or(GraphError::DegenerateGraph {
        vertex_count: lengths.vertex_count(),
        measure: "diameter",
    })
}

/// Checks the graph is large enough for a path measurement before paying for the all-pairs search.
fn measurable_lengths<G: GraphAlgorithms>(
    graph: &G,
    measure: &'static str,
) -> Result<PathLengths<G::Vertex>, GraphError> {
    let vertex_count = graph.vertex_count();
    if vertex_count < 2 {
        return Err(GraphError::DegenerateGraph {
            vertex_count,
            measure,
        });
    }

    graph.shortest_path_lengths()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{edge::Edge, graph::Graph};

    macro_rules! graph {
          ($($path:expr),*) => {{
              let mut graph: Graph<u32> = Graph::new();

              $(
                  let mut iter = $path.into_iter().peekable();
                  while let (Some(a), Some(b)) = (iter.next(), iter.peek()) {
                      graph.insert(Edge::new(a, *b));
                  }

              )*

              graph
          }}
      }

    #[test]
    fn triangle() {
        let graph = graph!([0, 1, 2, 0]);

        assert!(clustering_coefficients(&graph)
            .values()
            .all(|&c| c == 1.0));
        assert_eq!(average_clustering(&graph), Ok(1.0));
        assert_eq!(diameter(&graph), Ok(1));
        assert_eq!(average_shortest_path_length(&graph), Ok(1.0));
        assert_eq!(degree_sequence(&graph), vec![2, 2, 2]);
    }

    #[test]
    fn path_of_five() {
        let graph = graph!([0, 1, 2, 3, 4]);
        let lengths = all_pairs_shortest_path_lengths(&graph).unwrap();

        assert_eq!(lengths.get(&0, &4), Some(4));
        assert_eq!(lengths.get(&0, &1), Some(1));
        assert_eq!(lengths.get(&1, &3), Some(2));
        assert_eq!(diameter(&graph), Ok(4));
        assert_eq!(average_shortest_path_length(&graph), Ok(2.0));
        assert_eq!(average_clustering(&graph), Ok(0.0));
    }

    #[test]
    fn square_with_diagonal() {
        // 0-1-2-3-0 plus the 0-2 chord.
        let graph = graph!([0, 1, 2, 3, 0], [0, 2]);

        let clustering = clustering_coefficients(&graph);
        assert_eq!(clustering[&1], 1.0);
        assert_eq!(clustering[&3], 1.0);
        assert_eq!(clustering[&0], 2.0 / 3.0);
        assert_eq!(clustering[&2], 2.0 / 3.0);

        assert_eq!(diameter(&graph), Ok(2));
        // Five adjacent pairs and the 1-3 pair at distance two.
        assert_eq!(average_shortest_path_length(&graph), Ok(7.0 / 6.0));
    }

    #[test]
    fn degenerate() {
        let empty: Graph<u32> = Graph::new();
        let single = Graph::with_vertices([0u32]);

        assert_eq!(
            average_clustering(&empty),
            Err(GraphError::DegenerateGraph {
                vertex_count: 0,
                measure: "average clustering"
            })
        );
        assert_eq!(average_clustering(&single), Ok(0.0));
        assert_eq!(
            diameter(&single),
            Err(GraphError::DegenerateGraph {
                vertex_count: 1,
                measure: "diameter"
            })
        );
        assert!(matches!(
            average_shortest_path_length(&empty),
            Err(GraphError::DegenerateGraph { .. })
        ));
    }

    #[test]
    fn disconnected() {
        let graph = graph!([0, 1], [2, 3]);

        assert!(matches!(
            diameter(&graph),
            Err(GraphError::Disconnected { .. })
        ));
    }
}
