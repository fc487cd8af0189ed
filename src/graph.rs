//! A module for working with graphs.

use std::{
    cell::OnceCell,
    collections::{BTreeMap, BTreeSet, HashSet},
    fmt::Debug,
    hash::Hash,
};

use crate::edge::Edge;

/// An undirected simple graph: a set of vertices and a set of edges between them.
///
/// Unlike a pure edge list, isolated vertices are tracked explicitly so that a graph of `n`
/// vertices always reports `n`, whatever its connectivity.
#[derive(Clone, Debug)]
pub struct Graph<T> {
    /// The vertices in the graph, sorted by `T`'s implementation of `Ord`.
    vertices: BTreeSet<T>,
    /// The edges in the graph.
    edges: HashSet<Edge<T>>,
    /// Cache the index-based adjacency lists when possible.
    adjacency: OnceCell<Adjacency<T>>,
}

/// A dense, index-based view of a graph's adjacency.
///
/// Vertices are numbered `0..len` in ascending `Ord` order and each neighbour list is sorted, which
/// keeps traversals deterministic between computations.
#[derive(Clone, Debug)]
pub struct Adjacency<T> {
    vertices: Vec<T>,
    index: BTreeMap<T, usize>,
    neighbours: Vec<Vec<usize>>,
}

impl<T> Default for Graph<T>
where
    Edge<T>: Eq + Hash,
    T: Copy + Eq + Hash + Ord + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Graph<T>
where
    Edge<T>: Eq + Hash,
    T: Copy + Eq + Hash + Ord + Debug,
{
    /// Creates an empty graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use smallworld::graph::Graph;
    ///
    /// let graph: Graph<usize> = Graph::new();
    /// assert_eq!(graph.vertex_count(), 0);
    /// ```
    pub fn new() -> Self {
        Self {
            vertices: Default::default(),
            edges: Default::default(),
            adjacency: OnceCell::new(),
        }
    }

    /// Creates a graph containing the given vertices and no edges.
    ///
    /// # Examples
    ///
    /// ```
    /// use smallworld::graph::Graph;
    ///
    /// let graph = Graph::with_vertices(0..5);
    /// assert_eq!(graph.vertex_count(), 5);
    /// assert_eq!(graph.edge_count(), 0);
    /// ```
    pub fn with_vertices(vertices: impl IntoIterator<Item = T>) -> Self {
        Self {
            vertices: vertices.into_iter().collect(),
            ..Self::new()
        }
    }

    /// Returns the vertices of the graph in ascending order.
    pub fn vertices(&self) -> &BTreeSet<T> {
        &self.vertices
    }

    /// Returns the edges of the graph.
    pub fn edges(&self) -> &HashSet<Edge<T>> {
        &self.edges
    }

    /// Inserts a vertex into the graph and returns whether it was newly added.
    pub fn insert_vertex(&mut self, vertex: T) -> bool {
        let is_inserted = self.vertices.insert(vertex);

        if is_inserted {
            self.clear_cache()
        }

        is_inserted
    }

    /// Inserts an edge into the graph, adding its vertices if needed.
    ///
    /// Self-loops are rejected, the graph stays simple. Returns whether the edge was newly added.
    ///
    /// # Examples
    ///
    /// ```
    /// use smallworld::edge::Edge;
    /// use smallworld::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    ///
    /// assert!(graph.insert(Edge::new(0, 1)));
    /// assert!(!graph.insert(Edge::new(1, 0)));
    /// assert!(!graph.insert(Edge::new(2, 2)));
    /// assert_eq!(graph.edge_count(), 1);
    /// ```
    pub fn insert(&mut self, edge: Edge<T>) -> bool {
        if edge.is_loop() {
            return false;
        }

        self.vertices.insert(*edge.source());
        self.vertices.insert(*edge.target());
        let is_inserted = self.edges.insert(edge);

        // Delete the cached adjacency if the edge was successfully inserted because we can't
        // reliably update it from the new connection alone.
        if is_inserted {
            self.clear_cache()
        }

        is_inserted
    }

    /// Removes an edge from the set and returns whether it was present in the set. Its vertices
    /// are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use smallworld::edge::Edge;
    /// use smallworld::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// graph.insert(Edge::new("a", "b"));
    ///
    /// assert_eq!(graph.remove(&Edge::new("a", "b")), true);
    /// assert_eq!(graph.remove(&Edge::new("a", "c")), false);
    /// assert_eq!(graph.vertex_count(), 2);
    /// ```
    pub fn remove(&mut self, edge: &Edge<T>) -> bool {
        let is_removed = self.edges.remove(edge);

        if is_removed {
            self.clear_cache()
        }

        is_removed
    }

    /// Checks if the graph contains an edge.
    pub fn contains(&self, edge: &Edge<T>) -> bool {
        self.edges.contains(edge)
    }

    /// Returns the vertex count of the graph.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the edge count of the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Computes the density of the graph, the ratio of edges with respect to the maximum possible
    /// edges.
    ///
    /// # Examples
    ///
    /// ```
    /// use smallworld::edge::Edge;
    /// use smallworld::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    ///
    /// graph.insert(Edge::new("a", "b"));
    /// assert_eq!(graph.density(), 1.0);
    ///
    /// graph.insert(Edge::new("a", "c"));
    /// assert_eq!(graph.density(), 2.0 / 3.0);
    /// ```
    pub fn density(&self) -> f64 {
        let vc = self.vertex_count() as f64;
        let ec = self.edge_count() as f64;

        // Calculate the total number of possible edges given a vertex count.
        let pec = vc * (vc - 1.0) / 2.0;
        // Actual edges divided by the possible edges gives the density.
        ec / pec
    }

    /// Returns the index-based adjacency of the graph, building and caching it on first use.
    pub fn adjacency(&self) -> &Adjacency<T> {
        self.adjacency.get_or_init(|| Adjacency::build(self))
    }

    /// Returns the subgraph induced by `subset`: the given vertices present in this graph and
    /// every edge with both ends among them.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeSet;
    ///
    /// use smallworld::edge::Edge;
    /// use smallworld::graph::Graph;
    ///
    /// let graph: Graph<u32> = [Edge::new(0, 1), Edge::new(1, 2), Edge::new(2, 3)]
    ///     .into_iter()
    ///     .collect();
    /// let subgraph = graph.induced_subgraph(&BTreeSet::from([0, 1, 2]));
    ///
    /// assert_eq!(subgraph.vertex_count(), 3);
    /// assert_eq!(subgraph.edge_count(), 2);
    /// ```
    pub fn induced_subgraph(&self, subset: &BTreeSet<T>) -> Self {
        let vertices: BTreeSet<T> = self.vertices.intersection(subset).copied().collect();
        let edges = self
            .edges
            .iter()
            .filter(|edge| vertices.contains(edge.source()) && vertices.contains(edge.target()))
            .cloned()
            .collect();

        Self {
            vertices,
            edges,
            adjacency: OnceCell::new(),
        }
    }

    //
    // Private
    //

    /// Clears the computed state.
    ///
    /// This should be called every time the graph is mutated since the cached state won't
    /// correspond to the new graph.
    fn clear_cache(&mut self) {
        self.adjacency.take();
    }
}

impl<T> FromIterator<Edge<T>> for Graph<T>
where
    Edge<T>: Eq + Hash,
    T: Copy + Eq + Hash + Ord + Debug,
{
    fn from_iter<I: IntoIterator<Item = Edge<T>>>(iter: I) -> Self {
        let mut graph = Self::new();
        graph.extend(iter);
        graph
    }
}

impl<T> Extend<Edge<T>> for Graph<T>
where
    Edge<T>: Eq + Hash,
    T: Copy + Eq + Hash + Ord + Debug,
{
    fn extend<I: IntoIterator<Item = Edge<T>>>(&mut self, iter: I) {
        for edge in iter {
            self.insert(edge);
        }
    }
}

impl<T> Adjacency<T>
where
    T: Copy + Ord,
{
    fn build(graph: &Graph<T>) -> Self {
        let vertices: Vec<T> = graph.vertices.iter().copied().collect();
        let index: BTreeMap<T, usize> = vertices
            .iter()
            .enumerate()
            .map(|(i, &vertex)| (vertex, i))
            .collect();

        let mut neighbours = vec![Vec::new(); vertices.len()];
        for edge in &graph.edges {
            // Edges only ever reference vertices of the graph, `insert` guarantees it.
            if let (Some(&i), Some(&j)) = (index.get(edge.source()), index.get(edge.target())) {
                neighbours[i].push(j);
                neighbours[j].push(i);
            }
        }

        for list in &mut neighbours {
            list.sort_unstable();
        }

        Self {
            vertices,
            index,
            neighbours,
        }
    }

    /// Returns the number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns whether there are no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the vertices in index order.
    pub fn vertices(&self) -> &[T] {
        &self.vertices
    }

    /// Returns the vertex stored at index `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    pub fn vertex(&self, i: usize) -> T {
        self.vertices[i]
    }

    /// Returns the index of `vertex`.
    pub fn index_of(&self, vertex: &T) -> Option<usize> {
        self.index.get(vertex).copied()
    }

    /// Returns the sorted neighbour indices of the vertex at index `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    pub fn neighbours(&self, i: usize) -> &[usize] {
        &self.neighbours[i]
    }

    /// Returns the degree of the vertex at index `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    pub fn degree(&self, i: usize) -> usize {
        self.neighbours[i].len()
    }

    /// Returns whether the vertices at indices `i` and `j` share an edge.
    pub fn is_adjacent(&self, i: usize, j: usize) -> bool {
        self.neighbours
            .get(i)
            .is_some_and(|list| list.binary_search(&j).is_ok())
    }
}
