//! Robot creation CLI.
//!
//! This binary delegates to `robot_catalog::cli` for the submission flow,
//! keeping the behaviour testable without spawning a process.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use robot_catalog::SubmissionError;
use robot_catalog::cli::{
    CliArgs, CliError, Outcome, load_settings, rejection_lines, render_countries, render_robot,
    run,
};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
    if let Err(err) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        drop(err);
    }

    let args = CliArgs::parse();
    match execute(&args) {
        Ok(output) => {
            write_line(io::stdout().lock(), &output);
            ExitCode::SUCCESS
        }
        Err(CliError::Submission {
            source: SubmissionError::Rejected(report),
        }) => {
            let mut err = io::stderr().lock();
            for line in rejection_lines(&report) {
                write_line(&mut err, &line);
            }
            ExitCode::FAILURE
        }
        Err(err) => {
            write_line(io::stderr().lock(), &err.to_string());
            ExitCode::FAILURE
        }
    }
}

fn execute(args: &CliArgs) -> Result<String, CliError> {
    let settings = load_settings()?;
    match run(args, &settings)? {
        Outcome::Created(robot) => render_robot(&robot),
        Outcome::Countries(lookup) => Ok(render_countries(&lookup).trim_end().to_owned()),
    }
}

fn write_line(mut out: impl Write, line: &str) {
    if let Err(err) = writeln!(out, "{line}") {
        drop(err);
    }
}
