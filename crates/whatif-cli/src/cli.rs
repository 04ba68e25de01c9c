//! Command-line definition

use clap::{value_parser, Arg, ArgAction, Command};

/// Build the `whatif` command
#[must_use]
pub fn build_cli() -> Command {
    Command::new("whatif")
        .version(env!("CARGO_PKG_VERSION"))
        .about("What-if delay forecasts for backlog items")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .help("Path to an engine configuration TOML file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity (RUST_LOG overrides)"),
        )
        .subcommand(
            scenario_args(Command::new("forecast").about("Forecast a single backlog item"))
                .arg(
                    Arg::new("key")
                        .long("key")
                        .required(true)
                        .help("Tracker key of the item"),
                )
                .arg(Arg::new("due").long("due").help("Due date (YYYY-MM-DD or RFC 3339)"))
                .arg(Arg::new("assignee").long("assignee").help("Assignee identifier"))
                .arg(
                    Arg::new("sample")
                        .long("sample")
                        .value_parser(value_parser!(f64))
                        .conflicts_with("seed")
                        .help("Fixed absence sample in [0, 1)"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_parser(value_parser!(u64))
                        .help("Random seed (defaults to one derived from the key)"),
                ),
        )
        .subcommand(
            scenario_args(Command::new("backlog").about("Forecast a backlog file"))
                .arg(
                    Arg::new("input")
                        .long("input")
                        .required(true)
                        .help("JSON array of backlog items"),
                )
                .arg(
                    Arg::new("abort-on-invalid")
                        .long("abort-on-invalid")
                        .action(ArgAction::SetTrue)
                        .help("Fail the batch on the first invalid item"),
                ),
        )
        .subcommand(
            Command::new("walk")
                .about("Advance a date by working days")
                .arg(
                    Arg::new("from")
                        .long("from")
                        .required(true)
                        .help("Start date (YYYY-MM-DD)"),
                )
                .arg(
                    Arg::new("days")
                        .long("days")
                        .required(true)
                        .value_parser(value_parser!(u64))
                        .help("Working days to add"),
                ),
        )
}

/// Driver, shock and output arguments shared by forecasting commands
fn scenario_args(command: Command) -> Command {
    command
        .arg(driver_arg("cognitive", "Cognitive load in [0, 100]"))
        .arg(driver_arg("complexity", "System complexity in [0, 100]"))
        .arg(driver_arg("absence", "Absence risk in [0, 100]"))
        .arg(
            Arg::new("today")
                .long("today")
                .help("Simulation date (defaults to the current UTC date)"),
        )
        .arg(
            Arg::new("shock-member")
                .long("shock-member")
                .action(ArgAction::Append)
                .help("Member hit by a 3-day shock (repeatable)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Output as JSON"),
        )
}

fn driver_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .default_value("0")
        .value_parser(value_parser!(f64))
        .help(help)
}
