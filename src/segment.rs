//! 24h databases and their selection
#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{
    day::Day,
    runner::{ExternalToolRunner, LIST_ARGS},
    Error, Result,
};

/// Position of the julian day field, once the identifier
/// has been split on [SEGMENT_DELIMITER].
pub const JULIAN_DAY_FIELD: usize = 3;

/// Field delimiter used in 24h database identifiers
pub const SEGMENT_DELIMITER: char = '_';

/// [Segment] names one 24h database, for example `SYS_24hr_2022_006_000000`.
/// Segments are discovered through the external tool, never created.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Segment(String);

impl Segment {
    /// Identifier, as listed by the external tool
    pub fn as_str(&self) -> &str {
        &self.0
    }
    /// Returns the julian day this 24h database pertains to
    pub fn julian_day(&self) -> &str {
        // shape is verified on construction
        self.0
            .split(SEGMENT_DELIMITER)
            .nth(JULIAN_DAY_FIELD)
            .unwrap_or_default()
    }
}

impl std::str::FromStr for Segment {
    type Err = Error;
    fn from_str(content: &str) -> Result<Self> {
        let content = content.trim();
        if content.split(SEGMENT_DELIMITER).count() <= JULIAN_DAY_FIELD {
            return Err(Error::MalformedSegment(content.to_string()));
        }
        Ok(Self(content.to_string()))
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// [SegmentSelector] retains the 24h databases of a given [Day].
pub struct SegmentSelector;

impl SegmentSelector {
    /// Filters a newline delimited catalogue, preserving discovery order.
    /// Blank lines are tolerated, a non conforming identifier is not.
    /// Returns an empty set when no database pertains to `day`.
    pub fn select(catalogue: &str, day: &Day) -> Result<Vec<Segment>> {
        let julian_day = day.julian_day();
        let mut segments = Vec::new();
        for line in catalogue.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let segment = line.parse::<Segment>()?;
            if segment.julian_day() == julian_day {
                info!("{} selected", segment);
                segments.push(segment);
            } else {
                trace!("{} does not pertain to day {}", segment, julian_day);
            }
        }
        Ok(segments)
    }
    /// Requests the 24h database catalogue from the external tool
    /// and retains the databases of `day`.
    pub fn list<R: ExternalToolRunner>(runner: &R, day: &Day) -> Result<Vec<Segment>> {
        let args = LIST_ARGS.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let output = runner.run(&args)?;
        if !output.success() {
            return Err(Error::ToolFailure {
                command: runner.command_line(&args),
                status: output.status,
            });
        }
        if output.stdout.trim().is_empty() {
            return Err(Error::EmptyToolOutput(runner.command_line(&args)));
        }
        Self::select(&output.stdout, day)
    }
}
