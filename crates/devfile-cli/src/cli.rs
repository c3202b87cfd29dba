//! Command-line definition

use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, Command};
use devfile_model::PreviewFormat;

fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .short('f')
        .value_parser(["yaml", "json"])
        .help("Output format (default from config, else yaml)")
}

fn keep_empty_arg() -> Arg {
    Arg::new("keep-empty")
        .long("keep-empty")
        .action(ArgAction::SetTrue)
        .help("Keep empty fields in the rendered document")
}

fn out_arg() -> Arg {
    Arg::new("out")
        .long("out")
        .short('o')
        .value_parser(value_parser!(PathBuf))
        .help("Write output to this file instead of stdout")
}

fn script_arg() -> Arg {
    Arg::new("script")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("YAML or JSON list of actions")
}

/// Build the `devfile-wizard` command
#[must_use]
pub fn command() -> Command {
    Command::new("devfile-wizard")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Build devfile 2.3.0 documents by replaying wizard actions")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("log")
                .long("log")
                .global(true)
                .help("Log filter, e.g. devfile_wizard=debug (RUST_LOG wins)"),
        )
        .subcommand(
            Command::new("new")
                .about("Print the initial document")
                .arg(format_arg())
                .arg(keep_empty_arg())
                .arg(out_arg()),
        )
        .subcommand(Command::new("steps").about("List the wizard steps"))
        .subcommand(
            Command::new("apply")
                .about("Dispatch a script of actions and print the result")
                .arg(script_arg())
                .arg(format_arg())
                .arg(keep_empty_arg())
                .arg(out_arg())
                .arg(
                    Arg::new("state")
                        .long("state")
                        .action(ArgAction::SetTrue)
                        .help("Print the whole wizard state instead of the document"),
                )
                .arg(
                    Arg::new("lint")
                        .long("lint")
                        .action(ArgAction::SetTrue)
                        .help("Record advisory findings and print them to stderr"),
                ),
        )
        .subcommand(
            Command::new("lint")
                .about("Dispatch a script and report advisory findings")
                .arg(script_arg()),
        )
}

/// Parse the `--format` value
#[must_use]
pub fn preview_format(value: Option<&String>) -> Option<PreviewFormat> {
    match value.map(String::as_str) {
        Some("json") => Some(PreviewFormat::Json),
        Some("yaml") => Some(PreviewFormat::Yaml),
        _ => None,
    }
}
