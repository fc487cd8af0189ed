use std::fs;

use clap::Parser;
use rstest::rstest;
use serde_json::Value;
use tempfile::TempDir;

use smallworld::{
    cli::{run_cli, Cli},
    experiment::{run_experiment, ExperimentConfig},
    generator::SmallWorldParams,
    report::{render_plots, JsonPlotRenderer, ReportError, ReportErrorCode},
};

#[test]
fn json_renderer_writes_every_plot() {
    let dir = TempDir::new().unwrap();
    let params = SmallWorldParams::new(40, 4, 0.1).unwrap();
    let reports = run_experiment(&ExperimentConfig::new(params, 1, Some(3))).unwrap();
    let mut renderer = JsonPlotRenderer::new(dir.path());

    render_plots(&reports[0], &mut renderer).unwrap();

    for name in ["WS1", "WS1DD", "WS1CP", "WS1SP"] {
        let raw = fs::read_to_string(dir.path().join(format!("{name}.json"))).unwrap();
        let plot: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(plot["name"], name);
    }

    let raw = fs::read_to_string(dir.path().join("WS1DD.json")).unwrap();
    let plot: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(plot["scale"], "log_log");
}

#[rstest]
#[case::sequential("1")]
#[case::parallel("3")]
fn cli_writes_summary_and_plots(#[case] threads: &str) {
    let dir = TempDir::new().unwrap();
    let plots = dir.path().join("plots");
    let cli = Cli::try_parse_from([
        "smallworld",
        "-n",
        "50",
        "-k",
        "6",
        "-p",
        "0.2",
        "--runs",
        "3",
        "--seed",
        "11",
        "--threads",
        threads,
        "--plots",
        plots.to_str().unwrap(),
    ])
    .unwrap();
    let mut out = Vec::new();

    let reports = run_cli(&cli, &mut out).unwrap();

    assert_eq!(reports.iter().map(|r| r.run).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(fs::read_dir(&plots).unwrap().count(), 12);

    let text = String::from_utf8(out).unwrap();
    let blocks: Vec<&str> = text.split("\n\n").collect();
    assert_eq!(blocks.len(), 3);
    assert!(blocks[2].starts_with("The n value for ws 3 was: 50"));
    assert!(text.ends_with('\n') && !text.ends_with("\n\n"));
}

#[test]
fn same_seed_same_summary() {
    let args = ["smallworld", "-n", "60", "-k", "4", "--runs", "2", "--seed", "99"];
    let mut first = Vec::new();
    let mut second = Vec::new();

    run_cli(&Cli::try_parse_from(args).unwrap(), &mut first).unwrap();
    run_cli(&Cli::try_parse_from(args).unwrap(), &mut second).unwrap();

    assert_eq!(first, second);
}

#[test]
fn missing_plot_directory_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let params = SmallWorldParams::new(20, 4, 0.0).unwrap();
    let reports = run_experiment(&ExperimentConfig::new(params, 1, Some(1))).unwrap();
    let mut renderer = JsonPlotRenderer::new(dir.path().join("missing"));

    let err = render_plots(&reports[0], &mut renderer).unwrap_err();

    assert!(matches!(err, ReportError::Io { .. }));
    assert_eq!(err.code(), ReportErrorCode::Io);
    assert_eq!(err.code().as_str(), "REPORT_IO");
}
