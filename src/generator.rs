//! Watts-Strogatz small-world graph generation.

use std::collections::BTreeSet;

use rand::Rng;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::{edge::Edge, error::GraphError, graph::Graph};

/// Validated parameters of the Watts-Strogatz model.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SmallWorldParams {
    n: usize,
    k: usize,
    p: f64,
}

impl SmallWorldParams {
    /// Validates the model parameters.
    ///
    /// - `n`: number of vertices, at least 3.
    /// - `k`: mean degree, even with `2 <= k < n`; each vertex links to `k / 2` neighbours per
    ///   side.
    /// - `p`: probability of rewiring each lattice edge, in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidParameter`] naming the first offending parameter.
    ///
    /// # Examples
    ///
    /// ```
    /// use smallworld::generator::SmallWorldParams;
    ///
    /// assert!(SmallWorldParams::new(1000, 20, 0.1).is_ok());
    /// assert!(SmallWorldParams::new(1000, 21, 0.1).is_err());
    /// assert!(SmallWorldParams::new(10, 10, 0.1).is_err());
    /// assert!(SmallWorldParams::new(10, 4, 1.5).is_err());
    /// ```
    pub fn new(n: usize, k: usize, p: f64) -> Result<Self, GraphError> {
        if n < 3 {
            return Err(GraphError::invalid("n", format!("{n} is below the minimum of 3")));
        }
        if k % 2 != 0 {
            return Err(GraphError::invalid("k", format!("{k} is odd")));
        }
        if k < 2 {
            return Err(GraphError::invalid("k", format!("{k} is below the minimum of 2")));
        }
        if k >= n {
            return Err(GraphError::invalid(
                "k",
                format!("{k} must be smaller than n ({n})"),
            ));
        }
        if !(0.0..=1.0).contains(&p) {
            return Err(GraphError::invalid("p", format!("{p} is outside [0, 1]")));
        }

        Ok(Self { n, k, p })
    }

    /// Number of vertices.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Mean degree.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Rewiring probability.
    pub fn p(&self) -> f64 {
        self.p
    }

    /// Number of edges every generated graph has, `n * k / 2`.
    pub fn edge_count(&self) -> usize {
        self.n * self.k / 2
    }

    /// Generates a small-world graph with these parameters.
    ///
    /// The vertices `0..n` are laid out on a ring, each linked to its `k / 2` nearest neighbours on
    /// either side. The lattice edges are then visited by source vertex and, for each source, by
    /// increasing clockwise distance. Each edge `(u, v)` is replaced with probability `p` by
    /// `(u, w)`, `w` drawn uniformly from the vertices that are neither `u` nor already adjacent to
    /// it. A vertex already adjacent to every other vertex keeps its edge.
    #[instrument(level = "debug", skip(rng))]
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Graph<usize> {
        let (n, half) = (self.n, self.k / 2);
        let mut neighbours = lattice_neighbours(n, half);
        let mut rewired = 0;

        for u in 0..n {
            for distance in 1..=half {
                let v = (u + distance) % n;

                if !rng.gen_bool(self.p) {
                    continue;
                }

                // No candidate target left for `u`.
                if neighbours[u].len() >= n - 1 {
                    continue;
                }

                let mut w = rng.gen_range(0..n);
                while w == u || neighbours[u].contains(&w) {
                    w = rng.gen_range(0..n);
                }

                neighbours[u].remove(&v);
                neighbours[v].remove(&u);
                neighbours[u].insert(w);
                neighbours[w].insert(u);
                rewired += 1;
            }
        }

        debug!(rewired, "rewired lattice edges");

        into_graph(n, &neighbours)
    }
}

/// Builds the ring lattice of `n` vertices each linked to its `k / 2` nearest neighbours per side.
///
/// # Errors
///
/// Returns [`GraphError::InvalidParameter`] under the same rules as [`SmallWorldParams::new`].
///
/// # Examples
///
/// ```
/// use smallworld::generator::ring_lattice;
///
/// let lattice = ring_lattice(10, 4).unwrap();
///
/// assert_eq!(lattice.vertex_count(), 10);
/// assert_eq!(lattice.edge_count(), 20);
/// ```
pub fn ring_lattice(n: usize, k: usize) -> Result<Graph<usize>, GraphError> {
    let params = SmallWorldParams::new(n, k, 0.0)?;
    Ok(into_graph(n, &lattice_neighbours(n, params.k / 2)))
}

/// Validates the parameters and generates a Watts-Strogatz small-world graph.
///
/// # Errors
///
/// Returns [`GraphError::InvalidParameter`] if `n < 3`, `k` is odd or below 2, `k >= n`, or `p` is
/// outside `[0, 1]`.
///
/// # Examples
///
/// ```
/// use rand::{rngs::SmallRng, SeedableRng};
/// use smallworld::generator::generate_small_world;
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let graph = generate_small_world(100, 6, 0.1, &mut rng).unwrap();
///
/// assert_eq!(graph.vertex_count(), 100);
/// assert_eq!(graph.edge_count(), 300);
/// ```
pub fn generate_small_world<R: Rng + ?Sized>(
    n: usize,
    k: usize,
    p: f64,
    rng: &mut R,
) -> Result<Graph<usize>, GraphError> {
    Ok(SmallWorldParams::new(n, k, p)?.generate(rng))
}

fn lattice_neighbours(n: usize, half: usize) -> Vec<BTreeSet<usize>> {
    let mut neighbours = vec![BTreeSet::new(); n];

    for u in 0..n {
        for distance in 1..=half {
            let v = (u + distance) % n;
            neighbours[u].insert(v);
            neighbours[v].insert(u);
        }
    }

    neighbours
}

fn into_graph(n: usize, neighbours: &[BTreeSet<usize>]) -> Graph<usize> {
    let mut graph = Graph::with_vertices(0..n);
    graph.extend(neighbours.iter().enumerate().flat_map(|(u, list)| {
        list.range(u + 1..).map(move |&v| Edge::new(u, v))
    }));

    graph
}
