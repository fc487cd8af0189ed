use std::process::{Command, Output};

use rstest::rstest;

fn run(args: &[&str], log_format: Option<&str>) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_smallworld"));
    command.args(args).env_remove("RUST_LOG");

    match log_format {
        Some(value) => {
            command.env("SMALLWORLD_LOG_FORMAT", value);
        }
        None => {
            command.env_remove("SMALLWORLD_LOG_FORMAT");
        }
    }

    match command.output() {
        Ok(output) => output,
        Err(error) => panic!("failed to run smallworld: {error}"),
    }
}

#[rstest]
#[case::human_logs(None)]
#[case::json_logs(Some("json"))]
fn prints_summary_and_exits_cleanly(#[case] log_format: Option<&str>) {
    let output = run(
        &["-n", "40", "-k", "4", "--runs", "2", "--seed", "5"],
        log_format,
    );

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).unwrap();
    let blocks: Vec<&str> = stdout.split("\n\n").collect();
    assert_eq!(blocks.len(), 2);
    assert!(blocks[0].starts_with("The n value for ws 1 was: 40\n"));
    assert!(blocks[1].starts_with("The n value for ws 2 was: 40\n"));
    assert_eq!(stdout.lines().count(), 19);

    // Diagnostics stay off stdout.
    assert!(!String::from_utf8_lossy(&output.stderr).is_empty());
}

#[test]
fn invalid_parameters_fail() {
    let output = run(&["-n", "10", "-k", "3"], None);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("GRAPH_INVALID_PARAMETER"));
}

#[test]
fn unknown_log_format_fails() {
    let output = run(&["-n", "10", "-k", "2"], Some("xml"));

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unsupported log format `xml`"));
}
