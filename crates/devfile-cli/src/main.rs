//! `devfile-wizard` binary

use std::process::ExitCode;

use anyhow::Result;
use devfile_cli::{cli, execute, init_tracing, load_config, log_filter};

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let matches = cli::command().get_matches();
    let config = load_config(&matches)?;
    init_tracing(log_filter(&matches, &config));
    tracing::debug!(?config, "configuration loaded");

    let stdout = std::io::stdout();
    let outcome = execute(&matches, &config, &mut stdout.lock())?;
    Ok(outcome.into())
}
