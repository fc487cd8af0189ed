//! Repeated generate-and-measure runs over one set of model parameters.

use std::{
    panic,
    sync::{Mutex, PoisonError},
    thread,
};

use rand::{rngs::SmallRng, SeedableRng};
use serde::Serialize;
use tracing::{info, info_span, instrument};

use crate::{
    components::largest_component,
    distribution::{
        clustering_distribution, degree_distribution, path_length_distribution, ClusteringBin,
        Distribution,
    },
    error::GraphError,
    generator::SmallWorldParams,
    graph::Graph,
    metrics::{
        all_pairs_shortest_path_lengths, clustering_coefficients, degree_sequence, mean_clustering,
    },
};

pub(crate) const MIN_NUM_THREADS: usize = 1;
pub(crate) const MAX_NUM_THREADS: usize = 64;

/// The settings of an experiment: model parameters, how many independent runs, and how to seed
/// them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ExperimentConfig {
    params: SmallWorldParams,
    runs: usize,
    seed: u64,
    threads: usize,
}

impl ExperimentConfig {
    /// Creates a single-threaded configuration.
    ///
    /// Run `i` (counted from 0) is seeded with `seed + i`. Without a seed one is drawn from the
    /// thread RNG and logged so the experiment can be replayed.
    pub fn new(params: SmallWorldParams, runs: usize, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            let seed: u64 = rand::random();
            info!(seed, "no seed given, drew one");
            seed
        });

        Self {
            params,
            runs,
            seed,
            threads: MIN_NUM_THREADS,
        }
    }

    /// Sets how many runs may execute concurrently, clamped to `1..=64`.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.clamp(MIN_NUM_THREADS, MAX_NUM_THREADS);
        self
    }

    /// Model parameters shared by every run.
    pub fn params(&self) -> &SmallWorldParams {
        &self.params
    }

    /// Number of independent runs.
    pub fn runs(&self) -> usize {
        self.runs
    }

    /// Base seed, run `i` uses `seed + i`.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Maximum number of concurrent runs.
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Returns the seed of the run at `index`.
    pub fn seed_for(&self, index: usize) -> u64 {
        self.seed.wrapping_add(index as u64)
    }
}

/// Size of the giant component.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ComponentSummary {
    /// Number of vertices.
    pub vertex_count: usize,
    /// Number of edges.
    pub edge_count: usize,
    /// Ratio of edges to the maximum possible.
    pub density: f64,
}

/// Everything measured in one run, ready for the reporter.
#[derive(Clone, Debug, Serialize)]
pub struct RunReport {
    /// Run number, counted from 1.
    pub run: usize,
    /// Seed the run was generated from.
    pub seed: u64,
    /// Model parameters.
    pub params: SmallWorldParams,
    /// Size of the giant component.
    pub giant: ComponentSummary,
    /// Degree distribution of the giant component.
    pub degree_distribution: Distribution<usize>,
    /// Clustering coefficient distribution, binned to hundredths.
    pub clustering_distribution: Distribution<ClusteringBin>,
    /// Shortest path length distribution over all vertex pairs.
    pub path_length_distribution: Distribution<u32>,
    /// Mean local clustering coefficient.
    pub average_clustering: f64,
    /// Mean shortest path length.
    pub average_shortest_path_length: f64,
    /// Longest shortest path.
    pub diameter: u32,
    /// The giant component itself, for layout plots.
    #[serde(skip)]
    pub component: Graph<usize>,
}

/// Generates one graph, extracts its giant component and measures it.
///
/// # Errors
///
/// Returns [`GraphError::DegenerateGraph`] if the giant component has fewer than two vertices.
#[instrument(skip(params), fields(n = params.n(), k = params.k(), p = params.p()))]
pub fn run_once(params: &SmallWorldParams, run: usize, seed: u64) -> Result<RunReport, GraphError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let graph = params.generate(&mut rng);
    let component = largest_component(&graph);

    let vertex_count = component.vertex_count();
    if vertex_count < 2 {
        return Err(GraphError::DegenerateGraph {
            vertex_count,
            measure: "shortest path lengths",
        });
    }

    let degrees = degree_sequence(&component);
    let coefficients = clustering_coefficients(&component);
    let lengths = all_pairs_shortest_path_lengths(&component)?;

    let average_clustering = mean_clustering(&coefficients)?;
    let (average_shortest_path_length, diameter) = match (lengths.average(), lengths.diameter()) {
        (Some(average), Some(diameter)) => (average, diameter),
        _ => {
            return Err(GraphError::DegenerateGraph {
                vertex_count,
                measure: "shortest path lengths",
            })
        }
    };

    info!(
        vertices = vertex_count,
        edges = component.edge_count(),
        average_clustering,
        average_shortest_path_length,
        diameter,
        "run complete"
    );

    Ok(RunReport {
        run,
        seed,
        params: *params,
        giant: ComponentSummary {
            vertex_count,
            edge_count: component.edge_count(),
            density: component.density(),
        },
        degree_distribution: degree_distribution(&degrees),
        clustering_distribution: clustering_distribution(&coefficients),
        path_length_distribution: path_length_distribution(&lengths),
        average_clustering,
        average_shortest_path_length,
        diameter,
        component,
    })
}

/// Executes every run of the experiment and returns the reports in run order.
///
/// Runs are spread over up to `config.threads()` worker threads, each run owning its seeded RNG.
///
/// # Errors
///
/// Returns the error of the first failing run.
pub fn run_experiment(config: &ExperimentConfig) -> Result<Vec<RunReport>, GraphError> {
    let _span = info_span!("experiment", runs = config.runs, seed = config.seed).entered();

    let num_threads = config.threads.min(config.runs).max(MIN_NUM_THREADS);
    if num_threads == 1 {
        return (0..config.runs)
            .map(|index| run_once(&config.params, index + 1, config.seed_for(index)))
            .collect();
    }

    let counter = Mutex::new(0);
    let mut results: Vec<(usize, Result<RunReport, GraphError>)> = thread::scope(|scope| {
        let handles: Vec<_> = (0..num_threads)
            .map(|_| {
                let counter = &counter;
                scope.spawn(move || run_task(counter, config))
            })
            .collect();

        let mut results = Vec::with_capacity(config.runs);
        for handle in handles {
            match handle.join() {
                Ok(finished) => results.extend(finished),
                Err(payload) => panic::resume_unwind(payload),
            }
        }
        results
    });

    results.sort_by_key(|(index, _)| *index);
    results.into_iter().map(|(_, report)| report).collect()
}

/// The worker thread task: claims the next unstarted run until none are left.
fn run_task(
    counter: &Mutex<usize>,
    config: &ExperimentConfig,
) -> Vec<(usize, Result<RunReport, GraphError>)> {
    let mut finished = Vec::new();

    loop {
        let index = {
            let mut counter = counter.lock().unwrap_or_else(PoisonError::into_inner);
            let index = *counter;
            *counter += 1;
            index
        };

        if index >= config.runs {
            break;
        }

        finished.push((
            index,
            run_once(&config.params, index + 1, config.seed_for(index)),
        ));
    }

    finished
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(runs: usize) -> ExperimentConfig {
        let params = SmallWorldParams::new(60, 4, 0.2).unwrap();
        ExperimentConfig::new(params, runs, Some(11))
    }

    #[test]
    fn seeds() {
        let config = config(3);

        assert_eq!(config.seed(), 11);
        assert_eq!(config.seed_for(0), 11);
        assert_eq!(config.seed_for(2), 13);
    }

    #[test]
    fn threads_are_clamped() {
        assert_eq!(config(1).with_threads(0).threads(), 1);
        assert_eq!(config(1).with_threads(1_000).threads(), MAX_NUM_THREADS);
    }

    #[test]
    fn run_once_on_lattice() {
        let params = SmallWorldParams::new(12, 4, 0.0).unwrap();
        let report = run_once(&params, 1, 0).unwrap();

        assert_eq!(report.giant.vertex_count, 12);
        assert_eq!(report.giant.edge_count, 24);
        assert_eq!(report.degree_distribution.get(&4), Some(1.0));
        // Each vertex of the k = 4 ring lattice has 3 linked pairs out of 6.
        assert_eq!(report.average_clustering, 0.5);
        assert_eq!(
            report.clustering_distribution.get(&ClusteringBin::from_coefficient(0.5)),
            Some(1.0)
        );
        assert_eq!(report.diameter, 3);
    }

    #[test]
    fn reports_come_back_in_order() {
        let sequential = run_experiment(&config(4)).unwrap();
        let parallel = run_experiment(&config(4).with_threads(3)).unwrap();

        let runs: Vec<usize> = parallel.iter().map(|report| report.run).collect();
        assert_eq!(runs, vec![1, 2, 3, 4]);

        for (a, b) in sequential.iter().zip(&parallel) {
            assert_eq!(a.seed, b.seed);
            assert_eq!(a.giant, b.giant);
            assert_eq!(a.diameter, b.diameter);
            assert_eq!(a.average_shortest_path_length, b.average_shortest_path_length);
        }
    }

    #[test]
    fn zero_runs() {
        assert!(run_experiment(&config(0)).unwrap().is_empty());
    }
}
