//! Smallworld is a small toolkit for generating Watts-Strogatz small-world networks and measuring
//! the structure of their giant connected component, though the measurements apply to any
//! undirected graph.
//!
//! # Basic usage
//!
//! The library is centered around the [`Graph`](graph::Graph) structure which can be generated
//! with [`generate_small_world`](generator::generate_small_world) or built from
//! [`Edge`](edge::Edge) instances. Measurements go through the
//! [`GraphAlgorithms`](algorithms::GraphAlgorithms) trait and can be reduced to probability
//! distributions.
//!
//! ```rust
//! use rand::{rngs::SmallRng, SeedableRng};
//!
//! use smallworld::{
//!     components::largest_component,
//!     distribution::degree_distribution,
//!     generator::generate_small_world,
//!     metrics::{average_clustering, degree_sequence, diameter},
//! };
//!
//! // A ring of 200 vertices, each linked to its 3 nearest neighbours per side, with 10% of the
//! // edges rewired at random.
//! let mut rng = SmallRng::seed_from_u64(1);
//! let graph = generate_small_world(200, 6, 0.1, &mut rng).unwrap();
//!
//! // Measure the giant connected component.
//! let giant = largest_component(&graph);
//! let clustering = average_clustering(&giant).unwrap();
//! let longest = diameter(&giant).unwrap();
//! let degrees = degree_distribution(&degree_sequence(&giant));
//!
//! assert!(clustering > 0.0 && clustering < 1.0);
//! assert!(longest > 1);
//! assert!((degrees.total() - 1.0).abs() < 1e-9);
//! ```

pub mod algorithms;
pub mod cli;
pub mod components;
pub mod distribution;
pub mod edge;
pub mod error;
pub mod experiment;
pub mod generator;
pub mod graph;
pub mod logging;
pub mod metrics;
pub mod paths;
pub mod report;
