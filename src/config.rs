//! Flat configuration file
//!
//! One record per line, comma delimited, first field being the tag:
//! ```text
//! vessel,Ramform Titan
//! project,North Sea 3D
//! system,V1G1
//! system,V1G2
//! ```
use std::path::Path;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{system::DgpsSystem, Error, Result};

/// Default configuration file
pub const DEFAULT_CONFIG_FILE: &str = "zdgps_report.config";

/// [HeaderAttribute]s are injected in the header of every system
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum HeaderAttribute {
    /// Vessel name
    Vessel(String),
    /// Project name
    Project(String),
}

impl std::fmt::Display for HeaderAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Vessel(name) => write!(f, "Vessel: {}", name),
            Self::Project(name) => write!(f, "Project: {}", name),
        }
    }
}

/// [Config] gathers every record of the configuration file.
/// Attributes are global: they apply to all declared systems,
/// wherever they appear in the file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Header attributes, in order of appearance
    pub attributes: Vec<HeaderAttribute>,
    /// Declared system codes, in order of appearance
    pub systems: Vec<String>,
}

impl Config {
    /// Parses the configuration file. A missing or unreadable
    /// file is fatal and reported as such.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            error!("failed to read \"{}\": {}", path.display(), e);
            Error::ConfigNotFound(path.to_path_buf())
        })?;
        content.parse()
    }
    /// Builds every declared [DgpsSystem], each carrying all attributes.
    /// `fallback` is used when no system is declared at all.
    pub fn systems(&self, fallback: Option<&str>) -> Vec<DgpsSystem> {
        let mut codes = self.systems.iter().map(|s| s.as_str()).collect::<Vec<_>>();
        if codes.is_empty() {
            if let Some(fallback) = fallback {
                warn!("no system declared, defaulting to {}", fallback);
                codes.push(fallback);
            }
        }
        codes
            .into_iter()
            .map(|code| DgpsSystem::new(code, self.attributes.clone()))
            .collect()
    }
}

impl std::str::FromStr for Config {
    type Err = Error;
    fn from_str(content: &str) -> Result<Self> {
        let mut config = Self::default();
        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split(',').map(|f| f.trim());
            let tag = fields.next().unwrap_or_default();
            if !matches!(tag, "vessel" | "project" | "system") {
                debug!("ignoring unknown record \"{}\"", line);
                continue;
            }
            let value = match fields.next() {
                Some(value) if !value.is_empty() => value.to_string(),
                _ => {
                    return Err(Error::BadConfigRecord {
                        line: index + 1,
                        content: line.to_string(),
                    })
                },
            };
            match tag {
                "vessel" => config.attributes.push(HeaderAttribute::Vessel(value)),
                "project" => config.attributes.push(HeaderAttribute::Project(value)),
                _ => config.systems.push(value),
            }
        }
        Ok(config)
    }
}
