use std::path::{Path, PathBuf};

use clap::{value_parser, Arg, ArgAction, ArgMatches, ColorChoice, Command};

use zdgps::{
    config::DEFAULT_CONFIG_FILE,
    pipeline::{DEFAULT_PERIOD, DEFAULT_SLACK},
    prelude::HeaderPolicy,
    runner::DEFAULT_PROGRAM,
};

/// Default DGPS system, when the configuration declares none
pub const DEFAULT_SYSTEM: &str = "V1G1";

pub struct Cli {
    /// Arguments passed by user
    pub matches: ArgMatches,
}

impl Default for Cli {
    fn default() -> Self {
        Self::new()
    }
}

impl Cli {
    /// Builds the command line interface
    pub fn command() -> Command {
        Command::new("zdgps-report")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Extracts the zDGPS reports of one Julian day")
            .long_about("zdgps-report lists the 24h databases of the desired Julian day,
extracts one raw report per DGPS system and 24h database with orca_prhrep,
then glues the raw reports together: one final report per system,
named <SYSTEM>_zDGPS.<YEAR>_<JJJ>.
When no Julian day is given, the previous day is reported on.")
            .color(ColorChoice::Always)
            .next_help_heading("Setup")
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .value_parser(value_parser!(PathBuf))
                    .default_value(DEFAULT_CONFIG_FILE)
                    .help("Configuration file (vessel, project and system records)"),
            )
            .arg(
                Arg::new("dgps")
                    .short('d')
                    .long("dgps")
                    .value_name("SYSTEM")
                    .default_value(DEFAULT_SYSTEM)
                    .help("DGPS system to report on, when the configuration declares none"),
            )
            .arg(
                Arg::new("workdir")
                    .short('w')
                    .long("workdir")
                    .value_name("FOLDER")
                    .value_parser(value_parser!(PathBuf))
                    .default_value(".")
                    .help("Folder where orca_prhrep runs and reports are generated"),
            )
            .arg(
                Arg::new("tool")
                    .long("tool")
                    .value_name("PROGRAM")
                    .value_parser(value_parser!(PathBuf))
                    .default_value(DEFAULT_PROGRAM)
                    .help("Survey tool to invoke"),
            )
            .arg(
                Arg::new("quiet")
                    .short('q')
                    .long("quiet")
                    .action(ArgAction::SetTrue)
                    .help("Only report warnings and errors"),
            )
            .next_help_heading("Day")
            .arg(
                Arg::new("julian")
                    .short('j')
                    .long("julian")
                    .value_name("JJJ")
                    .help("Julian day to report on. Defaults to previous day."),
            )
            .arg(
                Arg::new("year")
                    .short('y')
                    .long("year")
                    .value_name("YYYY")
                    .value_parser(value_parser!(i32))
                    .help("Year of the Julian day. Defaults to the year of the previous day."),
            )
            .next_help_heading("Report")
            .arg(
                Arg::new("period")
                    .short('p')
                    .long("period")
                    .default_value(DEFAULT_PERIOD)
                    .help("Observation interval"),
            )
            .arg(
                Arg::new("slack")
                    .short('s')
                    .long("slack")
                    .default_value(DEFAULT_SLACK)
                    .help("Slack (padding) in observation interval"),
            )
            .arg(
                Arg::new("last-header")
                    .long("last-header")
                    .action(ArgAction::SetTrue)
                    .help("Only keep the header of the last 24h database.
Otherwise, headers of all 24h databases are kept."),
            )
    }
    /// Parses the process arguments
    pub fn new() -> Self {
        Self {
            matches: Self::command().get_matches(),
        }
    }
    pub fn config_path(&self) -> &Path {
        self.matches.get_one::<PathBuf>("config").unwrap()
    }
    pub fn dgps_system(&self) -> &str {
        self.matches.get_one::<String>("dgps").unwrap()
    }
    pub fn workdir(&self) -> &Path {
        self.matches.get_one::<PathBuf>("workdir").unwrap()
    }
    pub fn tool(&self) -> &Path {
        self.matches.get_one::<PathBuf>("tool").unwrap()
    }
    pub fn quiet(&self) -> bool {
        self.matches.get_flag("quiet")
    }
    pub fn julian_day(&self) -> Option<&String> {
        self.matches.get_one::<String>("julian")
    }
    pub fn year(&self) -> Option<i32> {
        self.matches.get_one::<i32>("year").copied()
    }
    pub fn period(&self) -> &str {
        self.matches.get_one::<String>("period").unwrap()
    }
    pub fn slack(&self) -> &str {
        self.matches.get_one::<String>("slack").unwrap()
    }
    pub fn header_policy(&self) -> HeaderPolicy {
        if self.matches.get_flag("last-header") {
            HeaderPolicy::LastSegment
        } else {
            HeaderPolicy::Accumulate
        }
    }
}
