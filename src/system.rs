//! DGPS systems and their report headers
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{config::HeaderAttribute, day::Day, Result};

const BANNER: &str = "*******************************************";
const REPORT_TITLE: &str = "zDGPS Report for PGS office";

/// [DgpsSystem] describes a receiver configuration to report on,
/// for example "V1G1".
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DgpsSystem {
    /// System code
    pub code: String,
    /// Attributes injected into the header
    pub attributes: Vec<HeaderAttribute>,
}

impl DgpsSystem {
    pub fn new(code: &str, attributes: Vec<HeaderAttribute>) -> Self {
        Self {
            code: code.to_string(),
            attributes,
        }
    }
    /// Header lines handed over to the external tool, `\n` terminated
    pub fn header_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.attributes.len() + 4);
        lines.push(format!("{}\n", BANNER));
        lines.push(format!("* {}\n", REPORT_TITLE));
        for attribute in self.attributes.iter() {
            lines.push(format!("* {}\n", attribute));
        }
        lines.push(format!("* System: {}\n", self.code));
        lines.push(format!("{}\n", BANNER));
        lines
    }
    /// Header temporary file name
    pub fn header_filename(&self) -> String {
        format!("{}.hdr", self.code)
    }
    /// Final report file name, for given [Day]
    pub fn report_filename(&self, day: &Day) -> String {
        format!("{}_zDGPS.{}", self.code, day)
    }
    /// Writes (or rewrites) the header temporary within `dir`
    pub fn write_header(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(self.header_filename());
        let mut writer = BufWriter::new(File::create(&path)?);
        for line in self.header_lines() {
            writer.write_all(line.as_bytes())?;
        }
        writer.flush()?;
        debug!("{} header: \"{}\"", self.code, path.display());
        Ok(path)
    }
}

impl std::fmt::Display for DgpsSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.code)
    }
}
