#![doc = include_str!("../README.md")]

/*
 * zDGPS is a small toolbox wrapped around the orca_prhrep survey tool.
 * It extracts the per 24h database quality reports of a given Julian day
 * and glues them back together, one final report per DGPS system.
 *
 * This framework is shipped under both Apache-2.0 and MIT License.
 */

#[macro_use]
extern crate log;

pub mod config;
pub mod day;
pub mod fops;
pub mod merge;
pub mod pipeline;
pub mod runner;
pub mod segment;
pub mod system;

mod error;

#[cfg(test)]
mod tests;

/// Package to include all basic structures
pub mod prelude {
    pub use crate::{
        config::{Config, HeaderAttribute, DEFAULT_CONFIG_FILE},
        day::Day,
        error::{Error, Result},
        merge::{FinalReport, HeaderPolicy, LineKind, Merger},
        pipeline::{Pipeline, PipelineOpts, RunSummary},
        runner::{ExternalToolRunner, OrcaPrhrep, ReportRequest, ToolOutput},
        segment::{Segment, SegmentSelector},
        system::DgpsSystem,
    };
}

pub use error::{Error, Result};
