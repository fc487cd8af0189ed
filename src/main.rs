//! Entry point: parses the command line, runs the experiment, prints the summary to stdout and
//! maps failures to a non-zero exit code. Diagnostics go to stderr through `tracing`.

use std::{
    io::{self, BufWriter, Write},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;

use smallworld::{
    cli::{run_cli, Cli, CliError},
    logging::{self, LoggingError},
};

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());

    run_cli(&cli, &mut writer).context("failed to execute experiment")?;
    writer.flush().context("failed to flush output")?;

    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let code = err
            .downcast_ref::<CliError>()
            .and_then(CliError::code);

        error!(error = %format!("{err:#}"), code, "experiment failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
