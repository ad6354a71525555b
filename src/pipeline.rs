//! Report extraction pipeline
//!
//!  1. list the 24h databases pertaining to the desired day
//!  2. write the header of each system
//!  3. extract one raw report per system and 24h database
//!  4. glue the raw reports together, one final report per system
//!  5. remove the temporary files (headers and raw reports)
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{
    day::Day,
    fops,
    merge::{HeaderPolicy, Merger},
    runner::{ExternalToolRunner, ReportRequest},
    segment::{Segment, SegmentSelector},
    system::DgpsSystem,
    Error, Result,
};

/// Default observation period
pub const DEFAULT_PERIOD: &str = "5";

/// Default slack (padding) of the observation interval
pub const DEFAULT_SLACK: &str = "2";

/// [PipelineOpts] tunes the extraction
#[derive(Debug, Clone)]
pub struct PipelineOpts {
    /// Directory where the external tool runs, and
    /// where all files are generated
    pub workdir: PathBuf,
    /// Observation period
    pub period: String,
    /// Slack (padding) of the observation interval
    pub slack: String,
    /// Header combination policy
    pub header_policy: HeaderPolicy,
}

impl Default for PipelineOpts {
    fn default() -> Self {
        Self {
            workdir: PathBuf::from("."),
            period: DEFAULT_PERIOD.to_string(),
            slack: DEFAULT_SLACK.to_string(),
            header_policy: HeaderPolicy::default(),
        }
    }
}

/// [RunSummary] describes the outcome of one run
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RunSummary {
    /// Day that was reported on
    pub day: Day,
    /// 24h databases that were processed
    pub segments: Vec<Segment>,
    /// Final reports that were generated
    pub reports: Vec<PathBuf>,
    /// Systems that could not be reported on
    #[cfg_attr(feature = "serde", serde(skip))]
    pub failures: Vec<(String, Error)>,
    /// Number of temporary files removed
    pub removed: usize,
}

impl RunSummary {
    pub fn success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// [Pipeline] sequences the external tool invocations and
/// the report gluing, for one day.
pub struct Pipeline<R: ExternalToolRunner> {
    runner: R,
    opts: PipelineOpts,
}

impl<R: ExternalToolRunner> Pipeline<R> {
    pub fn new(runner: R, opts: PipelineOpts) -> Self {
        Self { runner, opts }
    }
    pub fn opts(&self) -> &PipelineOpts {
        &self.opts
    }
    pub fn runner(&self) -> &R {
        &self.runner
    }
    /// Runs the complete pipeline for given day and systems.
    /// Fails only when the 24h databases could not be determined.
    /// Per system failures are reported in the [RunSummary],
    /// temporary files are always removed.
    pub fn run(&self, day: &Day, systems: &[DgpsSystem]) -> Result<RunSummary> {
        let segments = SegmentSelector::list(&self.runner, day)?;
        if segments.is_empty() {
            warn!("no 24h database found for day {}", day);
        }

        let mut summary = RunSummary {
            day: day.clone(),
            segments,
            reports: Vec::new(),
            failures: Vec::new(),
            removed: 0,
        };

        // headers first: a system without header cannot be reported on
        let mut headers = Vec::with_capacity(systems.len());
        for system in systems {
            match system.write_header(&self.opts.workdir) {
                // the tool runs within the workdir: file name only
                Ok(_) => headers.push((system, PathBuf::from(system.header_filename()))),
                Err(e) => {
                    error!("{}: failed to write header: {}", system, e);
                    summary.failures.push((system.code.clone(), e));
                },
            }
        }

        // raw reports, one per system and 24h database
        let mut raw_reports = Vec::with_capacity(headers.len());
        for (system, header) in headers.iter() {
            let mut files = Vec::new();
            for segment in summary.segments.iter() {
                match self.extract(system, header, segment, day) {
                    Ok(found) => files.extend(found),
                    Err(e) => warn!("{}: excluding {}: {}", system, segment, e),
                }
            }
            raw_reports.push((*system, files));
        }

        // final reports
        for (system, files) in raw_reports {
            match self.merge(system, day, &files) {
                Ok(path) => {
                    info!("\"{}\" has been generated", path.display());
                    summary.reports.push(path);
                },
                Err(e) => {
                    error!("{}: final report failure: {}", system, e);
                    summary.failures.push((system.code.clone(), e));
                },
            }
        }

        summary.removed = self.cleanup(day, systems, &summary.segments);
        Ok(summary)
    }
    /// Requests one raw report and returns the resulting file(s)
    fn extract(
        &self,
        system: &DgpsSystem,
        header: &Path,
        segment: &Segment,
        day: &Day,
    ) -> Result<Vec<PathBuf>> {
        let request = ReportRequest {
            period: &self.opts.period,
            slack: &self.opts.slack,
            header,
            system: &system.code,
            segment,
        };
        let args = request.args();
        let output = self.runner.run(&args)?;
        if !output.success() {
            return Err(Error::ToolFailure {
                command: self.runner.command_line(&args),
                status: output.status,
            });
        }
        let files = fops::raw_reports(&self.opts.workdir, &system.code, segment, day)?;
        if files.is_empty() {
            return Err(Error::MissingRawReport {
                system: system.code.clone(),
                segment: segment.to_string(),
            });
        }
        Ok(files)
    }
    /// Glues raw reports into the final report of `system`
    pub fn merge(&self, system: &DgpsSystem, day: &Day, raw_reports: &[PathBuf]) -> Result<PathBuf> {
        let report = Merger::merge_files(raw_reports, self.opts.header_policy)?;
        if report.is_empty() {
            warn!("{}: no content for day {}, final report is empty", system, day);
        }
        report.to_file(self.opts.workdir.join(system.report_filename(day)))
    }
    /// Removes the headers and raw reports of this run
    fn cleanup(&self, day: &Day, systems: &[DgpsSystem], segments: &[Segment]) -> usize {
        let headers = systems
            .iter()
            .map(|system| self.opts.workdir.join(system.header_filename()))
            .collect::<Vec<_>>();
        let codes = systems.iter().map(|s| s.code.as_str()).collect::<Vec<_>>();
        let removed = fops::remove_files(&headers)
            + fops::remove_raw_reports(&self.opts.workdir, &codes, segments, day);
        debug!("{} temporary file(s) removed", removed);
        removed
    }
}
