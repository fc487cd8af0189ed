//! Presentation of run reports: console summaries and plot data.
//!
//! The measurements are turned into [`Plot`] descriptions, the drawing itself is left to a
//! [`PlotRenderer`]. [`JsonPlotRenderer`] stores each plot as a JSON document so any plotting tool
//! can pick them up.

use std::{
    f64::consts::TAU,
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::{distribution::Distribution, experiment::RunReport};

/// Errors raised while rendering reports.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing an output failed.
    #[error("failed to write `{path}`: {source}")]
    Io {
        /// Destination that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Writing to an output stream failed.
    #[error("failed to write `{name}`: {source}")]
    Write {
        /// Name of the plot or summary being written.
        name: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Encoding a plot or summary as JSON failed.
    #[error("failed to encode `{name}` as JSON: {source}")]
    Json {
        /// Name of the plot or summary being encoded.
        name: String,
        /// Underlying encoder error.
        #[source]
        source: serde_json::Error,
    },
}

impl ReportError {
    /// Returns a stable, machine-readable error code for the variant.
    pub const fn code(&self) -> ReportErrorCode {
        match self {
            Self::Io { .. } | Self::Write { .. } => ReportErrorCode::Io,
            Self::Json { .. } => ReportErrorCode::Json,
        }
    }
}

/// Machine-readable error codes for [`ReportError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ReportErrorCode {
    /// Writing an output failed.
    Io,
    /// Encoding JSON failed.
    Json,
}

impl ReportErrorCode {
    /// Returns the symbolic representation of the error code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Io => "REPORT_IO",
            Self::Json => "REPORT_JSON",
        }
    }
}

/// How a plot's axes are scaled.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scale {
    /// Linear axes.
    Linear,
    /// Logarithmic axes.
    LogLog,
}

/// What a plot draws.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlotData {
    /// Unconnected markers at `(x, y)`.
    Scatter {
        /// Marker coordinates.
        points: Vec<(f64, f64)>,
    },
    /// A node-link drawing of a graph.
    Layout {
        /// Vertex and its position.
        positions: Vec<(usize, (f64, f64))>,
        /// Pairs of linked vertices.
        edges: Vec<(usize, usize)>,
    },
}

/// A renderer-agnostic description of a plot.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Plot {
    /// File stem identifying the plot, e.g. `WS1DD`.
    pub name: String,
    /// Title.
    pub title: String,
    /// Horizontal axis label.
    pub x_label: String,
    /// Vertical axis label.
    pub y_label: String,
    /// Axis scaling.
    pub scale: Scale,
    /// Content.
    pub data: PlotData,
}

impl Plot {
    fn scatter<K: Copy + Ord>(
        name: String,
        title: &str,
        (x_label, y_label): (&str, &str),
        scale: Scale,
        distribution: &Distribution<K>,
        x: impl Fn(K) -> f64,
    ) -> Self {
        Self {
            name,
            title: title.to_owned(),
            x_label: x_label.to_owned(),
            y_label: y_label.to_owned(),
            scale,
            data: PlotData::Scatter {
                points: distribution.iter().map(|(k, p)| (x(k), p)).collect(),
            },
        }
    }
}

/// Something able to draw a [`Plot`].
pub trait PlotRenderer {
    /// Draws the plot.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if the plot can't be produced.
    fn render(&mut self, plot: &Plot) -> Result<(), ReportError>;
}

/// Writes each plot as `<dir>/<name>.json`.
#[derive(Clone, Debug)]
pub struct JsonPlotRenderer {
    dir: PathBuf,
}

impl JsonPlotRenderer {
    /// Creates a renderer writing into `dir`, which must exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the path a plot is written to.
    pub fn path_for(&self, plot: &Plot) -> PathBuf {
        self.dir.join(format!("{}.json", plot.name))
    }
}

impl PlotRenderer for JsonPlotRenderer {
    fn render(&mut self, plot: &Plot) -> Result<(), ReportError> {
        let path = self.path_for(plot);
        let file = File::create(&path).map_err(|source| ReportError::Io {
            path: path.clone(),
            source,
        })?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, plot).map_err(|source| ReportError::Json {
            name: plot.name.clone(),
            source,
        })?;
        writer
            .flush()
            .map_err(|source| ReportError::Io {
                path: path.clone(),
                source,
            })?;

        debug!(path = %path.display(), "wrote plot");
        Ok(())
    }
}

/// Builds the four plots of a run: the giant component layout and the degree, clustering and
/// shortest path length distributions.
pub fn plots(report: &RunReport) -> [Plot; 4] {
    let run = report.run;

    [
        layout_plot(report),
        Plot::scatter(
            format!("WS{run}DD"),
            "Degree Distribution of Giant Connected Component",
            ("Degree", "P(k)"),
            Scale::LogLog,
            &report.degree_distribution,
            |degree| degree as f64,
        ),
        Plot::scatter(
            format!("WS{run}CP"),
            "Clustering Coefficient Distribution of Giant Connected Component",
            ("Rounded Clustering Coefficient", "C(k)"),
            Scale::Linear,
            &report.clustering_distribution,
            |bin| bin.value(),
        ),
        Plot::scatter(
            format!("WS{run}SP"),
            "Shortest Path Length Distribution of Giant Connected Component",
            ("Distance", "P(k)"),
            Scale::Linear,
            &report.path_length_distribution,
            f64::from,
        ),
    ]
}

/// Renders every plot of a run.
///
/// # Errors
///
/// Returns the first [`ReportError`] raised by the renderer.
#[instrument(level = "debug", skip_all, fields(run = report.run))]
pub fn render_plots<R: PlotRenderer + ?Sized>(
    report: &RunReport,
    renderer: &mut R,
) -> Result<(), ReportError> {
    for plot in plots(report) {
        renderer.render(&plot)?;
    }

    Ok(())
}

/// Places the giant component's vertices evenly on the unit circle in ascending order.
fn layout_plot(report: &RunReport) -> Plot {
    let vertices = report.component.vertices();
    let count = vertices.len().max(1) as f64;

    let positions = vertices
        .iter()
        .enumerate()
        .map(|(i, &vertex)| {
            let angle = TAU * i as f64 / count;
            (vertex, (angle.cos(), angle.sin()))
        })
        .collect();

    let mut edges: Vec<(usize, usize)> = report
        .component
        .edges()
        .iter()
        .map(|edge| edge.ordered())
        .collect();
    edges.sort_unstable();

    Plot {
        name: format!("WS{}", report.run),
        title: "Giant Connected Component".to_owned(),
        x_label: String::new(),
        y_label: String::new(),
        scale: Scale::Linear,
        data: PlotData::Layout { positions, edges },
    }
}

/// Writes the human-readable summary of a run.
///
/// Runs are separated by a blank line, `is_last` suppresses it after the final run.
///
/// # Errors
///
/// Propagates write failures.
pub fn render_summary<W: Write>(
    report: &RunReport,
    is_last: bool,
    writer: &mut W,
) -> io::Result<()> {
    let run = report.run;
    let params = &report.params;

    writeln!(writer, "The n value for ws {run} was: {}", params.n())?;
    writeln!(writer, "The k value for ws {run} was: {}", params.k())?;
    writeln!(writer, "The p value for ws {run} was: {}", params.p())?;
    writeln!(
        writer,
        "For ws {run}, the number of nodes in the giant connected component is: {}",
        report.giant.vertex_count
    )?;
    writeln!(
        writer,
        "For ws {run}, the number of edges in the giant connected component is: {}",
        report.giant.edge_count
    )?;
    writeln!(
        writer,
        "For ws {run}, the density of the giant connected component is: {:.4}",
        report.giant.density
    )?;
    writeln!(
        writer,
        "The average clustering coefficient for ws {run} is: {:.4}",
        report.average_clustering
    )?;
    writeln!(
        writer,
        "The average shortest path length for ws {run} is: {:.4}",
        report.average_shortest_path_length
    )?;
    writeln!(writer, "The diameter for ws {run} is: {}", report.diameter)?;

    if !is_last {
        writeln!(writer)?;
    }

    Ok(())
}

/// Writes every report as one pretty-printed JSON array.
///
/// # Errors
///
/// Returns [`ReportError::Write`] if the writer fails and [`ReportError::Json`] if encoding fails.
pub fn render_json_summary<W: Write>(
    reports: &[RunReport],
    writer: &mut W,
) -> Result<(), ReportError> {
    const NAME: &str = "summary";

    serde_json::to_writer_pretty(&mut *writer, reports).map_err(|source| {
        if source.is_io() {
            ReportError::Write {
                name: NAME.to_owned(),
                source: source.into(),
            }
        } else {
            ReportError::Json {
                name: NAME.to_owned(),
                source,
            }
        }
    })?;
    writeln!(writer).map_err(|source| ReportError::Write {
        name: NAME.to_owned(),
        source,
    })
}
