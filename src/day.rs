//! Julian day definition
#[cfg(feature = "serde")]
use serde::Serialize;

use chrono::{Datelike, NaiveDate};

use crate::{Error, Result};

/// [Day] identifies the 24h window reports are extracted for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Day {
    /// Year
    pub year: i32,
    /// Day of year, 1 = January 1st
    pub doy: u16,
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

impl Day {
    /// Builds a new [Day], verifying the day of year exists in given year.
    pub fn new(year: i32, doy: u16) -> Result<Self> {
        let max = if is_leap_year(year) { 366 } else { 365 };
        if doy == 0 || doy > max {
            return Err(Error::BadJulianDay(format!("{}_{:03}", year, doy)));
        }
        Ok(Self { year, doy })
    }
    /// Builds a [Day] from a calendar date
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            doy: date.ordinal() as u16,
        }
    }
    /// Returns the calendar day preceding `today`. This is what
    /// scheduled (nightly) runs operate on.
    pub fn previous(today: NaiveDate) -> Self {
        match today.pred_opt() {
            Some(date) => Self::from_date(date),
            None => Self::from_date(today),
        }
    }
    /// Builds a [Day] from a user provided julian day description:
    /// "6", "06" and "006" are all accepted.
    pub fn from_julian(year: i32, julian: &str) -> Result<Self> {
        let trimmed = julian.trim();
        if trimmed.is_empty() || trimmed.len() > 3 || !trimmed.chars().all(|c| c.is_ascii_digit())
        {
            return Err(Error::BadJulianDay(julian.to_string()));
        }
        let doy = trimmed
            .parse::<u16>()
            .map_err(|_| Error::BadJulianDay(julian.to_string()))?;
        Self::new(year, doy)
    }
    /// Zero padded, 3 digit julian day, as it appears
    /// in 24h database identifiers and file names.
    pub fn julian_day(&self) -> String {
        format!("{:03}", self.doy)
    }
}

impl std::fmt::Display for Day {
    /// Formats as `<year>_<jjj>`, which is the suffix of every report file
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}_{:03}", self.year, self.doy)
    }
}
