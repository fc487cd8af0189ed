//! Command-line interface for running small-world experiments.

use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use clap::{Parser, ValueEnum};
use thiserror::Error;
use tracing::info;

use crate::{
    error::{GraphError, GraphErrorCode},
    experiment::{run_experiment, ExperimentConfig, RunReport},
    generator::SmallWorldParams,
    report::{render_json_summary, render_plots, render_summary, JsonPlotRenderer, ReportError},
};

const DEFAULT_NODES: usize = 1000;
const DEFAULT_DEGREE: usize = 20;
const DEFAULT_REWIRE: f64 = 0.1;
const DEFAULT_RUNS: usize = 3;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "smallworld",
    about = "Generate Watts-Strogatz graphs and measure their giant connected component."
)]
pub struct Cli {
    /// Number of vertices on the ring.
    #[arg(short = 'n', long, default_value_t = DEFAULT_NODES)]
    pub nodes: usize,

    /// Mean degree, each vertex links to `degree / 2` neighbours on each side.
    #[arg(short = 'k', long, default_value_t = DEFAULT_DEGREE)]
    pub degree: usize,

    /// Probability of rewiring each lattice edge.
    #[arg(short = 'p', long, default_value_t = DEFAULT_REWIRE)]
    pub rewire: f64,

    /// Number of independent runs.
    #[arg(long, default_value_t = DEFAULT_RUNS)]
    pub runs: usize,

    /// Base seed, run `i` uses `seed + i - 1`. Drawn at random when absent.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Maximum number of runs executed concurrently.
    #[arg(long, default_value_t = 1)]
    pub threads: usize,

    /// Directory receiving the plot data of every run, created if missing.
    #[arg(long)]
    pub plots: Option<PathBuf>,

    /// Summary output format.
    #[arg(long, value_enum, default_value_t = SummaryFormat::Text)]
    pub format: SummaryFormat,
}

/// Supported summary formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SummaryFormat {
    /// One line per measurement, a blank line between runs.
    Text,
    /// All reports as one JSON array.
    Json,
}

/// Errors surfaced while executing the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// The plot directory couldn't be created.
    #[error("failed to create `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Writing the summary failed.
    #[error("failed to write summary: {0}")]
    Summary(#[source] io::Error),
    /// Generating or measuring a graph failed.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// Rendering a report failed.
    #[error(transparent)]
    Report(#[from] ReportError),
}

impl CliError {
    /// Returns the graph error code when the failure came from the analysis itself.
    pub fn graph_code(&self) -> Option<GraphErrorCode> {
        match self {
            Self::Graph(err) => Some(err.code()),
            _ => None,
        }
    }

    /// Returns the symbolic error code of the failure, if it carries one.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Graph(err) => Some(err.code().as_str()),
            Self::Report(err) => Some(err.code().as_str()),
            Self::Io { .. } | Self::Summary(_) => None,
        }
    }
}

impl Cli {
    /// Validates the options into an experiment configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidParameter`] for parameters outside the model's domain.
    pub fn config(&self) -> Result<ExperimentConfig, GraphError> {
        let params = SmallWorldParams::new(self.nodes, self.degree, self.rewire)?;
        Ok(ExperimentConfig::new(params, self.runs, self.seed).with_threads(self.threads))
    }
}

/// Executes the experiment described by `cli`, writes plot data if requested, and renders the
/// summary to `writer`.
///
/// # Errors
///
/// Returns [`CliError`] if the parameters are invalid, a run fails, or an output can't be written.
///
/// # Examples
///
/// ```
/// # use std::error::Error;
/// use clap::Parser;
/// use smallworld::cli::{run_cli, Cli};
///
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let args = ["smallworld", "-n", "40", "-k", "4", "--runs", "2", "--seed", "5"];
/// let cli = Cli::try_parse_from(args)?;
/// let mut out = Vec::new();
/// let reports = run_cli(&cli, &mut out)?;
///
/// assert_eq!(reports.len(), 2);
/// assert!(String::from_utf8(out)?.starts_with("The n value for ws 1 was: 40"));
/// # Ok(())
/// # }
/// ```
pub fn run_cli<W: Write>(cli: &Cli, writer: &mut W) -> Result<Vec<RunReport>, CliError> {
    let config = cli.config()?;
    info!(
        n = cli.nodes,
        k = cli.degree,
        p = cli.rewire,
        runs = config.runs(),
        seed = config.seed(),
        "starting experiment"
    );

    let mut renderer = match &cli.plots {
        Some(dir) => {
            fs::create_dir_all(dir).map_err(|source| CliError::Io {
                path: dir.clone(),
                source,
            })?;
            Some(JsonPlotRenderer::new(dir))
        }
        None => None,
    };

    let reports = run_experiment(&config)?;

    if let Some(renderer) = renderer.as_mut() {
        for report in &reports {
            render_plots(report, renderer)?;
        }
    }

    match cli.format {
        SummaryFormat::Text => {
            for (i, report) in reports.iter().enumerate() {
                let is_last = i + 1 == reports.len();
                render_summary(report, is_last, writer).map_err(CliError::Summary)?;
            }
        }
        SummaryFormat::Json => render_json_summary(&reports, writer)?,
    }

    Ok(reports)
}
