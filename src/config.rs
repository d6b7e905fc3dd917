use clap::arg;
use config::{*, ext::*};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug)]
pub struct Config {
    pub gpx_fname: String,
    pub params_fname: String,
    pub format: String,
    pub command: String,
    pub years_fname: String,
    pub verbose: bool,
    // Parameter overrides from the command line, "name=value;..."
    pub overrides: String,
}

lazy_static! {
    pub static ref CONFIG: Config = Config::new();
}

pub const CLAP_STYLING: clap::builder::styling::Styles =
    clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

// Options that map directly onto a params field
const OVERRIDES: [&str; 4] = ["speed", "rest", "start", "lunch"];

pub fn command() -> clap::Command {
    clap::Command::new("tabella")
        .bin_name("tabella")
        .about("Marching tables for hikes planned on the Swiss map")
        .styles(CLAP_STYLING)
        .args([
            arg!(-p --params <FILE> "Read params from file"),
            arg!(-f --format <FORMAT> "Output format: table, csv or json"),
            arg!(--speed <KMH> "Walking speed on flat ground, kms per hour"),
            arg!(--rest <MIN> "Rest per hour of walking, minutes"),
            arg!(--start <TIME> "Start time, HH:MM"),
            arg!(--lunch <BREAK> "Lunch break, <waypoint>:<minutes>"),
            arg!(-v --verbose "Log progress"),
            arg!(<GPX> "GPX file with waypoints and track"),
        ])
        .subcommand_required(false)
        .subcommand(clap::command!("schedule")
                    .about("Print the marching table (default)"))
        .subcommand(clap::command!("profile")
                    .about("Print the elevation profile"))
        .subcommand(clap::command!("sheets")
                    .about("List the map sheets covering the track")
                    .arg(arg!(--years <FILE> "CSV file with sheet edition years")))
        .subcommand(clap::command!("params")
                    .about("Print the effective params"))
}

impl Config {
    pub fn new() -> Self {
        Config::from_matches(&command().get_matches())
    }

    pub fn from_matches(matches: &clap::ArgMatches) -> Self {
        let get = |name: &str| -> String {
            matches.get_one::<String>(name).cloned().unwrap_or_default()
        };

        let gpx_fname = get("GPX");
        let params_fname = get("params");
        let mut format = get("format");
        if format == "" {
            format = "table".to_string();
        }

        let verbose = matches.get_flag("verbose");

        let mut command = "schedule".to_string();
        let mut years_fname = String::new();

        if let Some((cmd, sub)) = matches.subcommand() {
            command = cmd.to_string();
            if let Some(years) = sub.try_get_one::<String>("years").ok().flatten() {
                years_fname = years.clone();
            }
        }

        let overrides = OVERRIDES.iter()
            .filter_map(|name| matches.get_one::<String>(name)
                        .map(|v| format!("{}={}", name, v)))
            .collect::<Vec<String>>()
            .join(";");
        let verbose_s = verbose.to_string();

        // Create config with default settings
        let config = DefaultConfigurationBuilder::new()
            .add_in_memory(&[
                ("gpx_fname", gpx_fname.as_str()),
                ("params_fname", params_fname.as_str()),
                ("format", format.as_str()),
                ("command", command.as_str()),
                ("years_fname", years_fname.as_str()),
                ("verbose", verbose_s.as_str()),
                ("overrides", overrides.as_str()),
            ])
            .build();

        match config {
            Ok(config) => config.reify(),
            Err(_) => Config {
                gpx_fname: gpx_fname,
                params_fname: params_fname,
                format: format,
                command: command,
                years_fname: years_fname,
                verbose: verbose,
                overrides: overrides,
            },
        }
    }

    /// Overrides as (name, value) pairs: speed, rest, start, lunch, each
    /// only when given.
    pub fn param_overrides(&self) -> Vec<(&str, &str)> {
        self.overrides.split(';')
            .filter_map(|o| o.split_once('='))
            .collect()
    }
}
