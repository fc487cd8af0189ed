//! A module for working with edges.

use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

use serde::Serialize;

/// A pair of vertices representing a graph edge. Edges don't have a direction, despite the
/// `source`-`target` nomenclature used.
#[derive(Clone, Copy, Debug, Eq, Serialize)]
pub struct Edge<T> {
    source: T,
    target: T,
}

impl<T> Edge<T> {
    /// Creates a new edge from two vertices.
    ///
    /// # Examples
    ///
    /// ```
    /// use smallworld::edge::Edge;
    ///
    /// let edge = Edge::new(0, 1);
    /// assert_eq!(edge, Edge::new(1, 0));
    /// ```
    pub fn new(source: T, target: T) -> Self {
        Self { source, target }
    }

    /// Returns the first vertex forming the edge.
    pub fn source(&self) -> &T {
        &self.source
    }

    /// Returns the second vertex forming the edge.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Returns whether both ends of the edge are the same vertex.
    pub fn is_loop(&self) -> bool
    where
        T: PartialEq,
    {
        self.source == self.target
    }

    /// Returns the vertices in canonical order, smallest first.
    ///
    /// # Examples
    ///
    /// ```
    /// use smallworld::edge::Edge;
    ///
    /// assert_eq!(Edge::new(4, 2).ordered(), (2, 4));
    /// ```
    pub fn ordered(&self) -> (T, T)
    where
        T: Copy + Ord,
    {
        match self.source.cmp(&self.target) {
            Ordering::Greater => (self.target, self.source),
            _ => (self.source, self.target),
        }
    }
}

//
// Trait implementations
//

impl<T: PartialEq> PartialEq for Edge<T> {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (&self.source, &self.target);
        let (c, d) = (&other.source, &other.target);

        a == d && b == c || a == c && b == d
    }
}

impl<T: Hash + Ord> Hash for Edge<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let (a, b) = (&self.source, &self.target);

        // The hash must be the same for (a, b) as it is for (b, a).
        match a.cmp(b) {
            Ordering::Greater => {
                b.hash(state);
                a.hash(state);
            }
            _ => {
                a.hash(state);
                b.hash(state);
            }
        }
    }
}
