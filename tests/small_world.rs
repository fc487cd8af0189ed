use std::collections::BTreeSet;

use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};
use rstest::{fixture, rstest};

use smallworld::{
    algorithms::GraphAlgorithms,
    components::largest_component,
    distribution::{clustering_distribution, degree_distribution, path_length_distribution},
    edge::Edge,
    error::{GraphError, GraphErrorCode},
    generator::{generate_small_world, ring_lattice},
    graph::Graph,
    metrics::{
        all_pairs_shortest_path_lengths, average_clustering, average_shortest_path_length,
        clustering_coefficients, degree_sequence, diameter,
    },
};

#[fixture]
fn rewired() -> Graph<usize> {
    let mut rng = SmallRng::seed_from_u64(42);
    generate_small_world(200, 8, 0.2, &mut rng).unwrap()
}

#[rstest]
fn giant_component_is_connected_subgraph(rewired: Graph<usize>) {
    let giant = largest_component(&rewired);

    assert!(giant.vertices().is_subset(rewired.vertices()));
    assert!(giant.edges().iter().all(|edge| rewired.contains(edge)));
    assert!(giant.shortest_path_lengths().is_ok());
}

#[rstest]
fn rewiring_shortens_paths(rewired: Graph<usize>) {
    let lattice = ring_lattice(200, 8).unwrap();
    let giant = largest_component(&rewired);

    let lattice_length = average_shortest_path_length(&lattice).unwrap();
    let rewired_length = average_shortest_path_length(&giant).unwrap();

    assert!(rewired_length < lattice_length);
    assert!(diameter(&giant).unwrap() < diameter(&lattice).unwrap());
}

#[rstest]
fn lattice_measurements() {
    // Every vertex of a ring lattice has 3(k - 2) / (4(k - 1)) clustering.
    let lattice = ring_lattice(30, 6).unwrap();

    let clustering = average_clustering(&lattice).unwrap();
    assert!((clustering - 0.6).abs() < 1e-12);
    assert_eq!(diameter(&lattice).unwrap(), 5);

    let degrees = degree_distribution(&degree_sequence(&lattice));
    assert_eq!(degrees.iter().collect::<Vec<_>>(), vec![(6, 1.0)]);
}

#[rstest]
fn distributions_of_giant_component(rewired: Graph<usize>) {
    let giant = largest_component(&rewired);
    let n = giant.vertex_count();

    let degrees = degree_distribution(&degree_sequence(&giant));
    let clustering = clustering_distribution(&clustering_coefficients(&giant));
    let paths = path_length_distribution(&all_pairs_shortest_path_lengths(&giant).unwrap());

    assert_eq!(degrees.sample_size(), n);
    assert_eq!(clustering.sample_size(), n);
    assert_eq!(paths.sample_size(), n * (n - 1) / 2);

    for total in [degrees.total(), clustering.total(), paths.total()] {
        assert!((total - 1.0).abs() < 1e-9);
    }
}

#[rstest]
fn picks_largest_of_several_components() {
    let graph: Graph<u32> = [(1, 2), (2, 3), (10, 11), (11, 12), (12, 13)]
        .into_iter()
        .map(|(a, b)| Edge::new(a, b))
        .collect();

    let giant = largest_component(&graph);

    assert_eq!(giant.vertices(), &BTreeSet::from([10, 11, 12, 13]));
    assert_eq!(giant.edge_count(), 3);
}

#[rstest]
#[case::single_vertex(Graph::with_vertices([0usize]))]
#[case::empty(Graph::new())]
fn degenerate_graphs_are_rejected(#[case] graph: Graph<usize>) {
    let err = average_shortest_path_length(&graph).unwrap_err();
    assert_eq!(err.code(), GraphErrorCode::DegenerateGraph);
}

#[test]
fn disconnected_graph_has_no_average_path_length() {
    let graph: Graph<u8> = [Edge::new(0, 1), Edge::new(2, 3)].into_iter().collect();

    assert_eq!(
        average_shortest_path_length(&graph),
        Err(GraphError::Disconnected { unreachable: 4 })
    );
}

fn params() -> impl Strategy<Value = (usize, usize, f64)> {
    (3usize..60).prop_flat_map(|n| {
        let max_half = (n - 1) / 2;
        (Just(n), 1..=max_half, 0.0..=1.0f64).prop_map(|(n, half, p)| (n, 2 * half, p))
    })
}

proptest! {
    #[test]
    fn generator_invariants((n, k, p) in params(), seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let graph = generate_small_world(n, k, p, &mut rng).unwrap();

        prop_assert_eq!(graph.vertex_count(), n);
        prop_assert_eq!(graph.edge_count(), n * k / 2);
        prop_assert!(graph.edges().iter().all(|edge| !edge.is_loop()));
        prop_assert_eq!(degree_sequence(&graph).iter().sum::<usize>(), n * k);
    }

    #[test]
    fn giant_component_measurements_are_bounded((n, k, p) in params(), seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let graph = generate_small_world(n, k, p, &mut rng).unwrap();
        let giant = largest_component(&graph);

        prop_assert!(giant.vertex_count() >= 2);
        let coefficients = clustering_coefficients(&giant);
        prop_assert!(coefficients.values().all(|c| (0.0..=1.0).contains(c)));

        let average = average_shortest_path_length(&giant).unwrap();
        prop_assert!(average >= 1.0);
        prop_assert!(f64::from(diameter(&giant).unwrap()) >= average);
    }
}
