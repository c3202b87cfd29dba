//! Devfile Wizard CLI
//!
//! Drives a [`WizardStore`] from an action script and prints the resulting
//! document, the full wizard state, or advisory findings.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::ArgMatches;
use devfile_model::{lint, render, PreviewFormat, PreviewOptions, ValidationErrors};
use devfile_wizard::{Action, Step, WizardState, WizardStore};

pub mod cli;
pub mod config;
pub mod script;

pub use config::CliConfig;

/// How a subcommand finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Work done, nothing to report
    Success,
    /// Lint found problems
    Findings,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => Self::SUCCESS,
            Outcome::Findings => Self::FAILURE,
        }
    }
}

/// Install the global `tracing` subscriber, writing to stderr
///
/// `RUST_LOG` takes precedence over `filter`. A second call keeps the first
/// subscriber.
pub fn init_tracing(filter: &str) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
    if let Err(error) = installed {
        tracing::debug!(%error, "keeping the subscriber already installed");
    }
}

/// Configuration selected by the global `--config` flag, if any
///
/// # Errors
/// Returns error if the named file cannot be loaded
pub fn load_config(matches: &ArgMatches) -> Result<CliConfig> {
    let path = matches
        .subcommand()
        .and_then(|(_, args)| args.get_one::<PathBuf>("config"))
        .or_else(|| matches.get_one::<PathBuf>("config"));
    CliConfig::load_optional(path.map(PathBuf::as_path))
}

/// Log filter: `--log` over the config file over the default
#[must_use]
pub fn log_filter<'a>(matches: &'a ArgMatches, config: &'a CliConfig) -> &'a str {
    matches
        .subcommand()
        .and_then(|(_, args)| args.get_one::<String>("log"))
        .or_else(|| matches.get_one::<String>("log"))
        .map_or_else(|| config.log_filter(), String::as_str)
}

/// Run the selected subcommand, writing primary output to `out`
///
/// # Errors
/// Returns error if a script, config or output file fails
pub fn execute(matches: &ArgMatches, config: &CliConfig, out: &mut dyn Write) -> Result<Outcome> {
    match matches.subcommand() {
        Some(("new", args)) => {
            let options = preview_options(args, config);
            let text = render(&WizardState::initial().document, &options)?;
            emit(&text, args.get_one::<PathBuf>("out"), out)?;
            Ok(Outcome::Success)
        }
        Some(("steps", _)) => {
            for step in Step::ALL {
                writeln!(out, "{}\t{}\t{}", step.index(), step.id(), step.title())?;
            }
            Ok(Outcome::Success)
        }
        Some(("apply", args)) => {
            let mut store = store_from(args)?;
            if args.get_flag("lint") {
                let findings = lint(&store.state().document);
                report(&findings, &mut std::io::stderr())?;
                store.dispatch(Action::SetValidationErrors(findings));
            }

            let options = preview_options(args, config);
            let text = if args.get_flag("state") {
                render_state(&store.state(), options.format)?
            } else {
                render(&store.state().document, &options)?
            };
            emit(&text, args.get_one::<PathBuf>("out"), out)?;
            Ok(Outcome::Success)
        }
        Some(("lint", args)) => {
            let store = store_from(args)?;
            let findings = lint(&store.state().document);
            report(&findings, out)?;
            Ok(if findings.is_empty() {
                Outcome::Success
            } else {
                Outcome::Findings
            })
        }
        _ => Ok(Outcome::Success),
    }
}

fn preview_options(args: &ArgMatches, config: &CliConfig) -> PreviewOptions {
    config.preview_options(
        cli::preview_format(args.get_one::<String>("format")),
        args.get_flag("keep-empty"),
    )
}

fn store_from(args: &ArgMatches) -> Result<WizardStore> {
    let path = args
        .get_one::<PathBuf>("script")
        .context("missing script argument")?;
    Ok(script::run(script::load(path)?))
}

fn render_state(state: &WizardState, format: PreviewFormat) -> Result<String> {
    Ok(match format {
        PreviewFormat::Yaml => serde_yaml::to_string(state)?,
        PreviewFormat::Json => serde_json::to_string_pretty(state)?,
    })
}

fn report(findings: &ValidationErrors, out: &mut dyn Write) -> Result<()> {
    for (path, message) in findings {
        writeln!(out, "{path}: {message}")?;
    }
    Ok(())
}

fn emit(text: &str, path: Option<&PathBuf>, out: &mut dyn Write) -> Result<()> {
    match path {
        Some(path) => write_file(path, text),
        None => {
            out.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                writeln!(out)?;
            }
            Ok(())
        }
    }
}

fn write_file(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = text.len(), "wrote output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(args: &[&str]) -> (Outcome, String) {
        let matches = cli::command()
            .try_get_matches_from(args.iter().copied())
            .unwrap();
        let config = load_config(&matches).unwrap();
        let mut out = Vec::new();
        let code = execute(&matches, &config, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn steps_lists_titles() {
        let (code, out) = run(&["devfile-wizard", "steps"]);
        assert_eq!(code, Outcome::Success);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "0\tmetadata\tBasic Information");
        assert_eq!(lines[6], "6\treview\tReview & Download");
    }

    #[test]
    fn new_prints_initial_document() {
        let (_, out) = run(&["devfile-wizard", "new", "--format", "json"]);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["schemaVersion"], "2.3.0");
        assert_eq!(value["components"], serde_json::json!([]));
    }

    #[test]
    fn init_tracing_twice_keeps_first_subscriber() {
        init_tracing("warn");
        init_tracing("debug");
        assert!(tracing::dispatcher::has_been_set());
    }

    #[test]
    fn log_flag_overrides_config() {
        let matches = cli::command()
            .try_get_matches_from(["devfile-wizard", "steps", "--log", "debug"])
            .unwrap();
        let config = CliConfig {
            log_filter: Some("info".to_string()),
            ..CliConfig::default()
        };
        assert_eq!(log_filter(&matches, &config), "debug");

        let matches = cli::command()
            .try_get_matches_from(["devfile-wizard", "steps"])
            .unwrap();
        assert_eq!(log_filter(&matches, &config), "info");
    }
}
