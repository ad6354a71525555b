use std::path::PathBuf;
use thiserror::Error;

/// Errors that may rise while extracting or gluing zDGPS reports
#[derive(Error, Debug)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("file pattern error: {0}")]
    Pattern(#[from] regex::Error),
    /// 24h database identifier does not follow the
    /// `<prefix>_24hr_<year>_<doy>_<time>` naming convention
    #[error("malformed 24h database identifier \"{0}\"")]
    MalformedSegment(String),
    #[error("invalid julian day \"{0}\"")]
    BadJulianDay(String),
    #[error("configuration line {line}: invalid record \"{content}\"")]
    BadConfigRecord { line: usize, content: String },
    #[error("configuration file \"{}\" not found or unreadable", .0.display())]
    ConfigNotFound(PathBuf),
    #[error("failed to spawn \"{command}\": {source}")]
    ToolSpawn {
        command: String,
        source: std::io::Error,
    },
    /// External tool terminated with a non zero exit code,
    /// or was killed by a signal (no status)
    #[error("\"{command}\" failed (status: {status:?})")]
    ToolFailure {
        command: String,
        status: Option<i32>,
    },
    #[error("\"{0}\" returned no output")]
    EmptyToolOutput(String),
    #[error("no raw report found for {system} in {segment}")]
    MissingRawReport { system: String, segment: String },
}

pub type Result<T> = std::result::Result<T, Error>;
