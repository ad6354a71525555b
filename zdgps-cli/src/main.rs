//! Command line tool to extract the zDGPS reports of one Julian day.
//! Runs nightly on the previous day, or manually on any given day.
#[macro_use]
extern crate log;

mod cli;

use chrono::{Local, NaiveDate};
use env_logger::{Builder, Env, Target};
use log::LevelFilter;
use std::path::{Path, PathBuf};
use thiserror::Error;

use zdgps::prelude::{Config, Day, OrcaPrhrep, Pipeline, PipelineOpts};

use cli::Cli;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Zdgps(#[from] zdgps::Error),
    #[error("failed to generate the report of: {}", .0.join(", "))]
    ReportFailures(Vec<String>),
}

/// Anchors a relative path to the current directory: the survey tool
/// runs from within the workdir, relative paths would no longer resolve.
fn anchored(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Determines the day to report on: user inputs prevail,
/// otherwise the day preceding `today`.
fn resolve_day(cli: &Cli, today: NaiveDate) -> Result<Day, zdgps::Error> {
    let previous = Day::previous(today);
    let year = cli.year().unwrap_or(previous.year);
    match cli.julian_day() {
        Some(julian) => Day::from_julian(year, julian),
        None => Day::new(year, previous.doy),
    }
}

pub fn main() -> Result<(), Error> {
    let cli = Cli::new();

    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder
        .target(Target::Stdout)
        .format_timestamp_secs()
        .format_module_path(false);
    if cli.quiet() {
        builder.filter_level(LevelFilter::Warn);
    }
    builder.init();

    let day = resolve_day(&cli, Local::now().date_naive())?;
    info!("reporting on {} (julian day {})", day, day.julian_day());

    // configuration issues abort before any external invocation
    let config = Config::from_file(cli.config_path())?;
    let systems = config.systems(Some(cli.dgps_system()));
    info!(
        "systems: {}",
        systems
            .iter()
            .map(|s| s.code.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let cwd = std::env::current_dir().map_err(zdgps::Error::from)?;
    let workdir = anchored(cli.workdir(), &cwd);
    // bare program names are looked up in $PATH
    let tool = if cli.tool().components().count() < 2 {
        cli.tool().to_path_buf()
    } else {
        anchored(cli.tool(), &cwd)
    };
    debug!("workdir: \"{}\"", workdir.display());

    let runner = OrcaPrhrep::default()
        .with_program(&tool)
        .with_workdir(&workdir);

    let opts = PipelineOpts {
        workdir,
        period: cli.period().to_string(),
        slack: cli.slack().to_string(),
        header_policy: cli.header_policy(),
    };

    let summary = Pipeline::new(runner, opts).run(&day, &systems)?;
    info!(
        "{} 24h database(s), {} report(s) generated",
        summary.segments.len(),
        summary.reports.len()
    );

    if !summary.success() {
        let failures = summary
            .failures
            .into_iter()
            .map(|(system, _)| system)
            .collect();
        return Err(Error::ReportFailures(failures));
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["zdgps-report"];
        argv.extend_from_slice(args);
        Cli {
            matches: Cli::command().get_matches_from(argv),
        }
    }
    #[test]
    fn day_resolution() {
        let today = NaiveDate::from_ymd_opt(2022, 1, 7).unwrap();
        assert_eq!(resolve_day(&cli(&[]), today).unwrap(), Day::new(2022, 6).unwrap());
        assert_eq!(
            resolve_day(&cli(&["-j", "45"]), today).unwrap(),
            Day::new(2022, 45).unwrap()
        );
        assert_eq!(
            resolve_day(&cli(&["-j", "300", "-y", "2021"]), today).unwrap(),
            Day::new(2021, 300).unwrap()
        );
        // year of the previous day
        let today = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        assert_eq!(
            resolve_day(&cli(&["-j", "006"]), today).unwrap(),
            Day::new(2022, 6).unwrap()
        );
        assert!(resolve_day(&cli(&["-j", "abc"]), today).is_err());
    }
    #[test]
    #[cfg(unix)]
    fn path_anchoring() {
        let cwd = Path::new("/data/survey");
        assert_eq!(anchored(Path::new("work"), cwd), cwd.join("work"));
        assert_eq!(anchored(Path::new("."), cwd), cwd.join("."));
        assert_eq!(anchored(Path::new("bin/orca"), cwd), cwd.join("bin/orca"));
        assert_eq!(anchored(Path::new("/opt/work"), cwd), PathBuf::from("/opt/work"));
    }
}
